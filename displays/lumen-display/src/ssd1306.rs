//! SSD1306 controller support
//!
//! Command constants, the power-on sequence for page-addressed panels and
//! controller commands as an extension of the core [`Engine`].
//!
//! The sequence selects horizontal addressing over the full column and
//! page window, so one data-stream write of `WIDTH * PAGES` bytes always
//! lands at (page 0, column 0) and wraps through the whole panel.

use heapless::Vec;
use lumen_core::Engine;
use lumen_hal::RegisterBus;

use crate::backend::DisplayError;
use crate::config::DisplayConfig;

/// SSD1306 I2C address (0x3C, or 0x3D with SA0 high)
pub const SSD1306_ADDR: u8 = 0x3C;

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGES: usize = HEIGHT / 8;

/// Longest sequence `init_sequence` produces
pub const INIT_SEQUENCE_LEN: usize = 32;

/// SSD1306 commands
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_COLUMN_ADDR: u8 = 0x21;
    pub const SET_PAGE_ADDR: u8 = 0x22;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_SEG_REMAP_OFF: u8 = 0xA0;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const RESUME_TO_RAM: u8 = 0xA4;
    pub const ENTIRE_DISPLAY_ON: u8 = 0xA5;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_COM_SCAN_INC: u8 = 0xC0;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_START_LINE: u8 = 0x40;

    /// `SET_MEMORY_MODE` argument
    pub const HORIZONTAL_ADDRESSING: u8 = 0x00;
    /// `SET_CHARGE_PUMP` argument
    pub const CHARGE_PUMP_ENABLE: u8 = 0x14;
}

/// Build the power-on command stream for a `width` x `pages * 8` panel
///
/// The panel is left off; turn it on with [`Ssd1306Ext::set_display_on`]
/// once the first frame is in display RAM.
pub fn init_sequence(
    config: &DisplayConfig,
    width: usize,
    pages: usize,
) -> Vec<u8, INIT_SEQUENCE_LEN> {
    let last_column = width.saturating_sub(1).min(0x7F) as u8;
    let last_page = pages.saturating_sub(1).min(7) as u8;
    let height = (pages * 8).min(64) as u8;
    // Sequential COM pins for 32-row panels, alternative for 64
    let com_pins = if height == 64 { 0x12 } else { 0x02 };

    let bytes = [
        cmd::DISPLAY_OFF,
        cmd::SET_MEMORY_MODE,
        cmd::HORIZONTAL_ADDRESSING,
        cmd::SET_COLUMN_ADDR,
        0x00,
        last_column,
        cmd::SET_PAGE_ADDR,
        0x00,
        last_page,
        cmd::SET_CLOCK_DIV,
        0x80,
        cmd::SET_PRECHARGE,
        config.precharge,
        cmd::SET_MUX_RATIO,
        height.saturating_sub(1),
        cmd::SET_DISPLAY_OFFSET,
        0x00,
        cmd::SET_START_LINE,
        if config.flip_horizontal {
            cmd::SET_SEG_REMAP
        } else {
            cmd::SET_SEG_REMAP_OFF
        },
        if config.flip_vertical {
            cmd::SET_COM_SCAN_DEC
        } else {
            cmd::SET_COM_SCAN_INC
        },
        cmd::SET_COM_PINS,
        com_pins,
        cmd::SET_CONTRAST,
        config.contrast,
        cmd::RESUME_TO_RAM,
        cmd::SET_NORMAL,
        cmd::SET_CHARGE_PUMP,
        cmd::CHARGE_PUMP_ENABLE,
    ];

    let mut sequence = Vec::new();
    let fits = sequence.extend_from_slice(&bytes);
    debug_assert!(fits.is_ok(), "init sequence exceeds {} bytes", INIT_SEQUENCE_LEN);
    sequence
}

/// Controller commands on top of the render engine
pub trait Ssd1306Ext {
    /// Validate `config`, send the power-on sequence and push a first frame
    fn init_panel(&mut self, config: &DisplayConfig) -> Result<(), DisplayError>;

    /// Switch the panel on or off (display RAM is kept)
    fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError>;

    /// Invert every pixel in hardware
    fn set_display_inverted(&mut self, inverted: bool) -> Result<(), DisplayError>;

    /// Change contrast
    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError>;
}

impl<'a, B, const W: usize, const P: usize, const N: usize> Ssd1306Ext for Engine<'a, B, W, P, N>
where
    B: RegisterBus,
{
    fn init_panel(&mut self, config: &DisplayConfig) -> Result<(), DisplayError> {
        config.validate().map_err(|_| DisplayError::Config)?;
        let sequence = init_sequence(config, W, P);
        self.init(&sequence)?;
        #[cfg(feature = "defmt")]
        defmt::info!("SSD1306 at {=u8:#x} initialized ({}x{})", config.address, W, P * 8);
        Ok(())
    }

    fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError> {
        let command = if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF };
        self.send_commands(&[command])?;
        Ok(())
    }

    fn set_display_inverted(&mut self, inverted: bool) -> Result<(), DisplayError> {
        let command = if inverted {
            cmd::SET_INVERSE
        } else {
            cmd::SET_NORMAL
        };
        self.send_commands(&[command])?;
        Ok(())
    }

    fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError> {
        self.send_commands(&[cmd::SET_CONTRAST, contrast])?;
        Ok(())
    }
}
