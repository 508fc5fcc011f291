//! Terminal UI module using ratatui.
//!
//! - `render`: frame layout and overlays (help, quit, registration dialog)
//! - `input`: keyboard event handling
//! - `styles`: color scheme and text styling
//! - `tabs`: per-tab content (events, contact)

pub mod input;
pub mod render;
pub mod styles;
pub mod tabs;
