//! Inter-task communication channels
//!
//! Sensor and network drivers publish into [`READINGS`]; the readings task
//! is the only consumer.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Channel capacity for readings
const READINGS_CHANNEL_SIZE: usize = 8;

/// A value to show on the dashboard
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reading {
    /// CO2 concentration in ppm
    Co2(u16),
    /// Temperature in degrees Celsius
    Temperature(f32),
    /// Relative humidity in percent
    Humidity(f32),
    /// Wi-Fi association state
    Wifi(bool),
    /// Cloud connection state
    Cloud(bool),
}

/// Readings from sensor and network tasks
pub static READINGS: Channel<CriticalSectionRawMutex, Reading, READINGS_CHANNEL_SIZE> =
    Channel::new();
