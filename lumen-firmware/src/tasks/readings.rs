//! Readings task
//!
//! Applies incoming readings to the dashboard drawables.

use defmt::*;
use lumen_display::{Dashboard, DisplayError};

use crate::channels::{Reading, READINGS};
use crate::display::SharedDisplay;

/// Readings task - owns the dashboard for the lifetime of the firmware
#[embassy_executor::task]
pub async fn readings_task(display: &'static SharedDisplay, mut dashboard: Dashboard) {
    info!("Readings task started");

    loop {
        let reading = READINGS.receive().await;
        debug!("Reading: {:?}", reading);

        let result = display
            .update(|registry| match reading {
                Reading::Co2(ppm) => dashboard.update_co2(registry, ppm),
                Reading::Temperature(celsius) => dashboard.update_temperature(registry, celsius),
                Reading::Humidity(percent) => dashboard.update_humidity(registry, percent),
                Reading::Wifi(up) => dashboard.set_wifi_icon(registry, up),
                Reading::Cloud(up) => dashboard.set_cloud_icon(registry, up),
            })
            .map_err(DisplayError::from)
            .and_then(|r| r.map_err(DisplayError::from));

        if let Err(e) = result {
            warn!("Dashboard update failed: {:?}", e);
        }
    }
}
