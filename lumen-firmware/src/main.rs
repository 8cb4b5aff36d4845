//! Lumen - Air-quality panel firmware
//!
//! Drives a 128x64 SSD1306 OLED over I2C0 on RP2040 boards and shows CO2,
//! temperature and humidity readings plus link status icons.
//!
//! Readings arrive on `channels::READINGS`; the display is redrawn by a
//! periodic render task whenever something changed.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use lumen_core::{Engine, SharedEngine};
use lumen_display::{Dashboard, DisplayConfig, DisplayError, Ssd1306Ext};
use lumen_hal::I2cRegisterBus;

mod channels;
mod display;
mod tasks;

use display::SharedDisplay;

include!(concat!(env!("OUT_DIR"), "/display_config.rs"));

static DISPLAY: StaticCell<SharedDisplay> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Lumen firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Board wiring: SDA=GPIO4, SCL=GPIO5
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = DISPLAY_CONFIG.i2c().frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let bus = I2cRegisterBus::new(i2c, DISPLAY_CONFIG.address);
    info!(
        "I2C0 at {} Hz, display at {=u8:#x}",
        DISPLAY_CONFIG.frequency_hz, DISPLAY_CONFIG.address
    );

    let display: &'static SharedDisplay = DISPLAY.init(SharedEngine::new(
        ThreadModeRawMutex::new(),
        Engine::new(bus),
    ));

    let init = display
        .with(|engine| engine.init_panel(&DISPLAY_CONFIG))
        .map_err(DisplayError::from)
        .and_then(|r| r);
    if let Err(e) = init {
        // Keep going: the render task retries every frame once the panel answers
        error!("Display init failed: {:?}", e);
    }

    let dashboard = display
        .update(|registry| Dashboard::create(registry))
        .map_err(DisplayError::from)
        .and_then(|r| r.map_err(DisplayError::from));
    let dashboard = match dashboard {
        Ok(dashboard) => dashboard,
        Err(e) => {
            error!("Dashboard does not fit the drawable registry: {:?}", e);
            return;
        }
    };

    let on = display
        .with(|engine| engine.set_display_on(true))
        .map_err(DisplayError::from)
        .and_then(|r| r);
    if let Err(e) = on {
        warn!("Display on failed: {:?}", e);
    }

    unwrap!(spawner.spawn(tasks::render_task(display)));
    unwrap!(spawner.spawn(tasks::readings_task(display, dashboard)));

    info!("All tasks spawned, entering main loop");
}
