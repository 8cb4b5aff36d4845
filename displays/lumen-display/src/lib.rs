//! Display support for Lumen
//!
//! This crate provides:
//! - SSD1306 command set and power-on sequence (`ssd1306`)
//! - Panel configuration, loadable from TOML (`config`)
//! - The air-quality dashboard screen (`dashboard`)
//! - Display-level error type (`backend`)
//!
//! # Architecture
//!
//! The rendering itself lives in `lumen-core`. This crate only knows what
//! an SSD1306 needs to hear before the first frame, and which drawables
//! make up the dashboard. Controller commands are an extension of the core
//! `Engine`, so they work the same on a bare engine and inside a
//! `SharedEngine::with` closure.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod config;
pub mod dashboard;
pub mod icons;
pub mod ssd1306;

// Re-export key types
pub use backend::DisplayError;
pub use config::{ConfigError, DisplayConfig};
pub use dashboard::Dashboard;
pub use ssd1306::{init_sequence, Ssd1306Ext, PAGES, WIDTH};
