//! Render task
//!
//! Sends a frame whenever drawables changed since the last one. Updates
//! from other tasks only mark the display dirty, so at most one frame goes
//! out per tick.

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::display::SharedDisplay;

/// Render interval in milliseconds
pub const RENDER_INTERVAL_MS: u64 = 100;

/// Render task - redraws the panel on a fixed tick
#[embassy_executor::task]
pub async fn render_task(display: &'static SharedDisplay) {
    info!("Render task started");

    let mut ticker = Ticker::every(Duration::from_millis(RENDER_INTERVAL_MS));
    let mut failing = false;

    loop {
        ticker.next().await;

        match display.tick() {
            Ok(true) => {
                if failing {
                    info!("Display transfer recovered");
                    failing = false;
                }
                if let Ok(frames) = display.with(|engine| engine.frames()) {
                    trace!("Frame {} sent", frames);
                }
            }
            Ok(false) => {}
            Err(e) => {
                // Log the first failure of a run only
                if !failing {
                    warn!("Display transfer failed: {:?}", Debug2Format(&e));
                    failing = true;
                }
            }
        }
    }
}
