//! Display errors
//!
//! Collapses engine and bus failures into one display-level error.

use lumen_core::{DrawableError, Error};

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Drawable could not be created or updated
    Drawable(DrawableError),
    /// Panel configuration rejected
    Config,
    /// Engine already in use further up the call stack
    Busy,
}

impl From<DrawableError> for DisplayError {
    fn from(err: DrawableError) -> Self {
        DisplayError::Drawable(err)
    }
}

impl<E> From<Error<E>> for DisplayError {
    fn from(err: Error<E>) -> Self {
        match err {
            Error::Drawable(err) => DisplayError::Drawable(err),
            Error::Transport(_) => DisplayError::Communication,
            Error::Busy => DisplayError::Busy,
        }
    }
}
