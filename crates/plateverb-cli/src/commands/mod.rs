//! CLI command implementations.

pub mod common;
pub mod inspect;
pub mod params;
pub mod presets;
