//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod readings;
pub mod render;

pub use readings::readings_task;
pub use render::render_task;
