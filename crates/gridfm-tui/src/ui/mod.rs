//! UI widget modules for the terminal frontend.
//!
//! Each sub-module renders a single UI component using ratatui.

pub mod footer;
pub mod grid;
pub mod header;
pub mod popup;
