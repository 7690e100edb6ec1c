//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `booking_form`: The booking form with its repeating occasion rows
//!
//! `draw_help_text` is shared with the answers view.

mod booking_form;
mod field_renderer;

pub use booking_form::draw_booking_form;
pub use field_renderer::draw_help_text;
