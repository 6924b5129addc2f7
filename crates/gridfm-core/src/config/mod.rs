//! Configuration for gridfm.
//!
//! User preferences ([`settings::Config`]) and colours ([`theme::Theme`])
//! come from one optional TOML file read at startup.

pub mod settings;
pub mod theme;
