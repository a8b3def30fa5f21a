//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `register_form`: The account registration form

mod field_renderer;
mod register_form;

pub use register_form::draw_register;
