//! Panel configuration
//!
//! Everything about the panel that varies between boards but not between
//! frames: bus address and speed, contrast, precharge and mounting
//! orientation. Geometry is fixed at compile time by the engine.
//!
//! Example `display.toml`:
//!
//! ```toml
//! [display]
//! address = 0x3C
//! frequency_hz = 400000
//! contrast = 0x9F
//! flip_horizontal = true
//! flip_vertical = true
//! ```

use lumen_hal::I2cConfig;

use crate::ssd1306::SSD1306_ADDR;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input is not valid TOML or has wrongly typed keys
    Parse,
    /// Address does not fit 7 bits
    InvalidAddress,
    /// A value is out of its allowed range
    InvalidValue,
}

/// SSD1306 panel options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct DisplayConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Bus clock in Hz
    pub frequency_hz: u32,
    /// Contrast (0-255)
    pub contrast: u8,
    /// Precharge periods: phase 2 in the high nibble, phase 1 in the low
    pub precharge: u8,
    /// Mirror columns (segment remap)
    pub flip_horizontal: bool,
    /// Mirror rows (COM scan direction)
    pub flip_vertical: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Maximum bus clock accepted (fast mode plus)
pub const MAX_FREQUENCY_HZ: u32 = I2cConfig::FAST_PLUS.frequency;

impl DisplayConfig {
    /// Settings for the stock 128x64 module
    pub const DEFAULT: Self = Self {
        address: SSD1306_ADDR,
        frequency_hz: I2cConfig::FAST.frequency,
        contrast: 0x9F,
        precharge: 0x22,
        flip_horizontal: true,
        flip_vertical: true,
    };

    /// Bus settings for the panel
    pub const fn i2c(&self) -> I2cConfig {
        I2cConfig {
            frequency: self.frequency_hz,
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address > 0x7F {
            return Err(ConfigError::InvalidAddress);
        }
        if self.frequency_hz == 0 || self.frequency_hz > MAX_FREQUENCY_HZ {
            return Err(ConfigError::InvalidValue);
        }
        // A zero-length precharge phase is invalid on SSD1306
        if self.precharge & 0x0F == 0 || self.precharge >> 4 == 0 {
            return Err(ConfigError::InvalidValue);
        }
        Ok(())
    }

    /// Parse and validate the `[display]` table of a TOML document
    ///
    /// Missing keys, or a missing table, fall back to [`DisplayConfig::DEFAULT`].
    #[cfg(feature = "toml")]
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        #[derive(serde::Deserialize, Default)]
        #[serde(default)]
        struct ConfigFile {
            display: DisplayConfig,
        }

        let file: ConfigFile = toml::from_str(input).map_err(|_| ConfigError::Parse)?;
        file.display.validate()?;
        Ok(file.display)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(DisplayConfig::default().validate(), Ok(()));
        assert_eq!(DisplayConfig::default().address, 0x3C);
        assert_eq!(DisplayConfig::default().i2c(), I2cConfig::FAST);
    }

    #[test]
    fn test_i2c_follows_frequency() {
        let config = DisplayConfig {
            frequency_hz: 100_000,
            ..DisplayConfig::DEFAULT
        };
        assert_eq!(config.i2c(), I2cConfig::STANDARD);

        let config = DisplayConfig {
            frequency_hz: I2cConfig::FAST_PLUS.frequency + 1,
            ..DisplayConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidValue));
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let config = DisplayConfig {
            address: 0x80,
            ..DisplayConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidAddress));

        let config = DisplayConfig {
            frequency_hz: 0,
            ..DisplayConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidValue));

        let config = DisplayConfig {
            precharge: 0xF0,
            ..DisplayConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::InvalidValue));
    }

    #[cfg(feature = "toml")]
    mod toml_tests {
        use super::*;

        #[test]
        fn test_parse_full_table() {
            let config = DisplayConfig::from_toml(
                r#"
                [display]
                address = 0x3D
                frequency_hz = 100000
                contrast = 0xCF
                precharge = 0xF1
                flip_horizontal = false
                flip_vertical = false
                "#,
            )
            .unwrap();

            assert_eq!(
                config,
                DisplayConfig {
                    address: 0x3D,
                    frequency_hz: 100_000,
                    contrast: 0xCF,
                    precharge: 0xF1,
                    flip_horizontal: false,
                    flip_vertical: false,
                }
            );
        }

        #[test]
        fn test_missing_keys_use_defaults() {
            let config = DisplayConfig::from_toml("[display]\ncontrast = 10\n").unwrap();
            assert_eq!(config.contrast, 10);
            assert_eq!(config.address, DisplayConfig::DEFAULT.address);

            let config = DisplayConfig::from_toml("# nothing here\n").unwrap();
            assert_eq!(config, DisplayConfig::DEFAULT);
        }

        #[test]
        fn test_invalid_input() {
            assert_eq!(
                DisplayConfig::from_toml("[display]\naddress = \"oled\"\n"),
                Err(ConfigError::Parse)
            );
            assert_eq!(
                DisplayConfig::from_toml("[display]\naddress = 300\n"),
                Err(ConfigError::Parse)
            );
            assert_eq!(
                DisplayConfig::from_toml("[display]\naddress = 0x7E\nfrequency_hz = 5000000\n"),
                Err(ConfigError::InvalidValue)
            );
            assert_eq!(
                DisplayConfig::from_toml("[display]\naddress = 0x7F\n").map(|c| c.address),
                Ok(0x7F)
            );
            assert_eq!(
                DisplayConfig::from_toml("[display]\naddress = 200\n"),
                Err(ConfigError::InvalidAddress)
            );
        }
    }
}
