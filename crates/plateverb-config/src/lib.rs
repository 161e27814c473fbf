//! Configuration and preset management for the plateverb reverberator.
//!
//! # Features
//!
//! - **Preset System**: Load and save reverb presets as TOML files
//! - **Validation**: Check preset keys and values against the engine's controls
//! - **Paths**: Platform-specific preset and config directories
//! - **Factory Presets**: Built-in presets for common use cases
//!
//! # Example
//!
//! ```rust,no_run
//! use plateverb_config::{ReverbPreset, user_presets_dir};
//! use plateverb_engine::PlateReverb;
//!
//! let preset = ReverbPreset::new("Vocal")
//!     .with_description("Short bright plate")
//!     .with_param("decay", 1.8)
//!     .with_param("damping", 0.3);
//!
//! let mut reverb = PlateReverb::new(48000.0).unwrap();
//! reverb.set_params(preset.to_params().unwrap());
//!
//! preset.save(user_presets_dir().join("vocal.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets and configuration.
pub mod paths;

/// Preset parameter validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_all_presets, list_system_presets,
    list_user_presets, preset_name_from_path, resolve_preset, system_presets_dir,
    user_config_dir, user_presets_dir,
};
pub use preset::ReverbPreset;
pub use validation::{
    ValidationError, ValidationResult, parse_assignment, validate_param, validate_preset,
};
