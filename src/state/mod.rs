//! Application state module

mod app_state;
mod booking;
mod forms;

pub use app_state::*;
pub use booking::*;
pub use forms::*;
