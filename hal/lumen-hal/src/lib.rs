//! Lumen Hardware Abstraction Layer
//!
//! Defines the narrow bus surface the display engine streams through.
//! The engine never talks to a peripheral directly: it only needs a sink
//! that accepts "write N bytes starting at register R" and may fail.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  lumen-core engine / lumen-display      │
//! └─────────────────────────────────────────┘
//!                     │  RegisterBus
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  I2cRegisterBus (this crate)            │
//! └─────────────────────────────────────────┘
//!                     │  embedded_hal::i2c::I2c
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  chip HAL (embassy-rp, mocks, ...)      │
//! └─────────────────────────────────────────┘
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod i2c;

pub use i2c::{I2cConfig, I2cRegisterBus, RegisterBus};
