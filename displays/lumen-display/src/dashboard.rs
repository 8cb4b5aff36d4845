//! Air-quality dashboard
//!
//! One screen of text fields and status icons for a CO2 / temperature /
//! humidity sensor node:
//!
//! ```text
//!  Temp:     [wifi] [cloud]        RH:
//!  21.5C                          45.0%
//!
//!              CO2:
//!
//!  812                              ppm
//! ```
//!
//! The dashboard only remembers which drawables it owns. Every method takes
//! the registry explicitly, so it can run inside `SharedEngine::update` and
//! let the next tick render the result.

use core::fmt::Write;

use heapless::Vec;
use lumen_core::{DrawableError, DrawableId, Registry, Text};

use crate::icons::{CLOUD_ICON, WIFI_ICON};

/// Shown until the first reading arrives
pub const CO2_PLACEHOLDER: &str = "---";
pub const TEMPERATURE_PLACEHOLDER: &str = "---C";
pub const HUMIDITY_PLACEHOLDER: &str = " ---%";

/// Icon anchors
const WIFI_ICON_POS: (u8, u8) = (40, 0);
const CLOUD_ICON_POS: (u8, u8) = (70, 0);

/// Drawables making up the dashboard
#[derive(Debug)]
pub struct Dashboard {
    co2_heading: DrawableId,
    co2_unit: DrawableId,
    co2_value: DrawableId,
    temperature_heading: DrawableId,
    temperature_value: DrawableId,
    humidity_heading: DrawableId,
    humidity_value: DrawableId,
    cloud_icon: Option<DrawableId>,
    wifi_icon: Option<DrawableId>,
}

impl Dashboard {
    /// Drawables a dashboard needs with both icons shown
    pub const DRAWABLES: usize = 9;

    /// Create the dashboard text fields with placeholder values
    ///
    /// Icons start hidden. If the registry runs out of slots part way, the
    /// fields created so far are freed again.
    pub fn create<const N: usize>(registry: &mut Registry<'_, N>) -> Result<Self, DrawableError> {
        let fields: [(u8, u8, &str, u8); 7] = [
            (42, 20, "CO2:", 2),
            (107, 55, "ppm", 1),
            (0, 39, CO2_PLACEHOLDER, 3),
            (0, 0, "Temp:", 1),
            (0, 10, TEMPERATURE_PLACEHOLDER, 1),
            (99, 0, "RH:", 1),
            (99, 10, HUMIDITY_PLACEHOLDER, 1),
        ];

        let mut ids: Vec<DrawableId, 7> = Vec::new();
        for &(x, y, text, scale) in &fields {
            match registry.create_text(x, y, text, scale, false) {
                Ok(id) => {
                    let pushed = ids.push(id);
                    debug_assert!(pushed.is_ok(), "one id per field");
                }
                Err(err) => {
                    for &id in &ids {
                        let _ = registry.free(id);
                    }
                    return Err(err);
                }
            }
        }

        let [co2_heading, co2_unit, co2_value, temp_heading, temp_value, rh_heading, rh_value] =
            <[DrawableId; 7]>::try_from(ids.as_slice())
                .map_err(|_| DrawableError::AllocationFailed)?;
        Ok(Self {
            co2_heading,
            co2_unit,
            co2_value,
            temperature_heading: temp_heading,
            temperature_value: temp_value,
            humidity_heading: rh_heading,
            humidity_value: rh_value,
            cloud_icon: None,
            wifi_icon: None,
        })
    }

    /// Show a CO2 reading in ppm
    pub fn update_co2<const N: usize>(
        &self,
        registry: &mut Registry<'_, N>,
        ppm: u16,
    ) -> Result<(), DrawableError> {
        let mut text = Text::new();
        let written = write!(text, "{}", ppm);
        debug_assert!(written.is_ok(), "u16 fits a text field");
        registry.set_text(self.co2_value, &text)
    }

    /// Show a temperature in degrees Celsius, one decimal
    pub fn update_temperature<const N: usize>(
        &self,
        registry: &mut Registry<'_, N>,
        celsius: f32,
    ) -> Result<(), DrawableError> {
        let text = format_reading(celsius, "C", TEMPERATURE_PLACEHOLDER);
        registry.set_text(self.temperature_value, &text)
    }

    /// Show relative humidity in percent, one decimal
    pub fn update_humidity<const N: usize>(
        &self,
        registry: &mut Registry<'_, N>,
        percent: f32,
    ) -> Result<(), DrawableError> {
        let text = format_reading(percent, "%", HUMIDITY_PLACEHOLDER);
        registry.set_text(self.humidity_value, &text)
    }

    /// Show or hide the cloud icon; repeated calls are no-ops
    pub fn set_cloud_icon<const N: usize>(
        &mut self,
        registry: &mut Registry<'_, N>,
        visible: bool,
    ) -> Result<(), DrawableError> {
        toggle_icon(registry, &mut self.cloud_icon, visible, CLOUD_ICON_POS, &CLOUD_ICON)
    }

    /// Show or hide the Wi-Fi icon; repeated calls are no-ops
    pub fn set_wifi_icon<const N: usize>(
        &mut self,
        registry: &mut Registry<'_, N>,
        visible: bool,
    ) -> Result<(), DrawableError> {
        toggle_icon(registry, &mut self.wifi_icon, visible, WIFI_ICON_POS, &WIFI_ICON)
    }

    /// Check if the cloud icon is shown
    pub fn cloud_icon_visible(&self) -> bool {
        self.cloud_icon.is_some()
    }

    /// Check if the Wi-Fi icon is shown
    pub fn wifi_icon_visible(&self) -> bool {
        self.wifi_icon.is_some()
    }

    /// Free every drawable the dashboard owns
    pub fn destroy<const N: usize>(self, registry: &mut Registry<'_, N>) {
        let fields = [
            self.co2_heading,
            self.co2_value,
            self.co2_unit,
            self.humidity_heading,
            self.humidity_value,
            self.temperature_heading,
            self.temperature_value,
        ];
        let icons = [self.cloud_icon, self.wifi_icon];
        for id in fields.into_iter().chain(icons.into_iter().flatten()) {
            let _ = registry.free(id);
        }
    }
}

/// `value` with one decimal and a unit suffix, or `fallback` if it does not fit
fn format_reading(value: f32, unit: &str, fallback: &str) -> Text {
    let mut text = Text::new();
    if write!(text, "{:.1}{}", value, unit).is_err() {
        text.clear();
        let _ = text.push_str(fallback);
    }
    text
}

fn toggle_icon<'a, const N: usize>(
    registry: &mut Registry<'a, N>,
    slot: &mut Option<DrawableId>,
    visible: bool,
    (x, y): (u8, u8),
    bitmap: &'a [u8],
) -> Result<(), DrawableError> {
    match (visible, *slot) {
        (true, None) => {
            *slot = Some(registry.create_image(x, y, bitmap)?);
        }
        (false, Some(id)) => {
            *slot = None;
            registry.free(id)?;
        }
        _ => {}
    }
    Ok(())
}
