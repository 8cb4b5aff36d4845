//! Concrete display types for this board

use embassy_rp::i2c::{Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use lumen_core::SharedEngine;
use lumen_display::{PAGES, WIDTH};
use lumen_hal::I2cRegisterBus;

/// OLED on I2C0
pub type DisplayBus = I2cRegisterBus<I2c<'static, I2C0, Blocking>>;

/// Engine shared between the render and readings tasks
///
/// Both tasks run on the thread-mode executor. A frame is a blocking
/// transfer of the whole buffer, so the lock must not mask interrupts.
pub type SharedDisplay =
    SharedEngine<'static, ThreadModeRawMutex, DisplayBus, WIDTH, PAGES>;
