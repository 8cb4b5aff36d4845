//! Rendering core for page-organized monochrome displays
//!
//! This crate contains everything between "a caller wants some text on the
//! panel" and "a finished frame goes out on the bus":
//!
//! - Drawable object model and fixed-capacity registry
//! - Page-organized 1bpp framebuffer with clipped primitives
//! - Rasterizers for text, lines, rectangles and images
//! - Render cycle controller
//! - Shared engine with dirty-flag scheduling
//!
//! Nothing here allocates; capacities and geometry are const generics.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod drawable;
pub mod engine;
pub mod font;
pub mod framebuffer;
pub mod raster;
pub mod registry;
pub mod shared;

pub use drawable::{Bitmap, Color, Drawable, DrawableError, DrawableId, Kind, Shape, Text};
pub use engine::{Engine, Error, CONTROL_COMMAND_STREAM, CONTROL_DATA_STREAM};
pub use framebuffer::Framebuffer;
pub use registry::{Registry, DEFAULT_CAPACITY};
pub use shared::SharedEngine;
