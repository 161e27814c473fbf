//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use plateverb_engine::{PARAMS, ReverbParams};

use crate::error::ConfigError;
use crate::validation::{ValidationResult, validate_param, validate_preset};

/// A named set of reverb control values.
///
/// Presets are stored as TOML files. Parameters are keyed by the control's
/// stable string id; absent keys take the control's default when the preset
/// is applied.
///
/// # TOML Format
///
/// ```toml
/// name = "Vocal Plate"
/// description = "Bright plate with a short predelay"
/// sample_rate = 48000
///
/// [params]
/// mix = 0.3
/// predelay = 15.0
/// decay = 2.2
/// damping = 0.35
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReverbPreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Sample rate hint (defaults to 48000).
    /// Used by tools that build an engine from a preset alone.
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    /// Control values keyed by string id.
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

fn default_sample_rate() -> u32 {
    48000
}

/// Widen an `f32` to the `f64` with the same shortest decimal form, so that
/// `0.3f32` is written to TOML as `0.3` rather than `0.30000001192092896`.
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}

impl ReverbPreset {
    /// Create a new preset with no explicit parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            sample_rate: default_sample_rate(),
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the sample rate hint.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set one parameter by string id. Not validated until applied.
    pub fn with_param(mut self, key: impl Into<String>, value: f64) -> Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Capture every control of `params` into a preset.
    ///
    /// ```rust
    /// use plateverb_config::ReverbPreset;
    /// use plateverb_engine::ReverbParams;
    ///
    /// let preset = ReverbPreset::from_params("Snapshot", &ReverbParams::default());
    /// assert_eq!(preset.params.len(), 11);
    /// assert_eq!(preset.get("mix"), Some(0.25));
    /// ```
    pub fn from_params(name: impl Into<String>, params: &ReverbParams) -> Self {
        let params = params.sanitized();
        let mut preset = Self::new(name);
        for (i, desc) in PARAMS.iter().enumerate() {
            preset
                .params
                .insert(desc.string_id.to_string(), widen(params.get(i)));
        }
        preset
    }

    /// Value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.params.get(key).copied()
    }

    /// Set one parameter after validating it.
    pub fn set(&mut self, key: &str, value: f64) -> ValidationResult<()> {
        validate_param(key, value)?;
        self.params.insert(key.to_string(), value);
        Ok(())
    }

    /// Build the engine's control snapshot.
    ///
    /// Every key must name a control and every value must be in range; absent
    /// keys take their defaults.
    pub fn to_params(&self) -> Result<ReverbParams, ConfigError> {
        validate_preset(self).map_err(|e| ConfigError::validation(&self.name, e))?;

        let mut params = ReverbParams::default();
        for (key, &value) in &self.params {
            if let Some(index) = ReverbParams::index_of(key) {
                params.set(index, value as f32);
            }
        }
        Ok(params.sanitized())
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for ReverbPreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preset_new() {
        let preset = ReverbPreset::new("Test Preset");
        assert_eq!(preset.name, "Test Preset");
        assert!(preset.description.is_none());
        assert_eq!(preset.sample_rate, 48000);
        assert!(preset.params.is_empty());
        assert_eq!(ReverbPreset::default().name, "Untitled");
    }

    #[test]
    fn test_preset_from_toml() {
        let toml = r#"
name = "Test"
description = "A test preset"
sample_rate = 44100

[params]
decay = 4
damping = 0.25
"#;

        let preset = ReverbPreset::from_toml(toml).unwrap();
        assert_eq!(preset.name, "Test");
        assert_eq!(preset.description.as_deref(), Some("A test preset"));
        assert_eq!(preset.sample_rate, 44100);
        assert_eq!(preset.get("decay"), Some(4.0));

        let params = preset.to_params().unwrap();
        assert_eq!(params.decay_s, 4.0);
        assert_eq!(params.damping, 0.25);
        // Absent keys fall back to defaults
        assert_eq!(params.mix, 0.25);
        assert_eq!(params.low_cut_hz, 10.0);
    }

    #[test]
    fn test_minimal_toml() {
        let preset = ReverbPreset::from_toml("name = \"Minimal\"").unwrap();
        assert_eq!(preset.sample_rate, 48000);
        assert_eq!(preset.to_params().unwrap(), ReverbParams::default());
    }

    #[test]
    fn test_to_toml_writes_short_decimals() {
        let params = ReverbParams { mix: 0.3, ..ReverbParams::default() };
        let toml = ReverbPreset::from_params("Short", &params).to_toml().unwrap();
        assert!(toml.contains("name = \"Short\""));
        assert!(toml.contains("mix = 0.3\n"), "got:\n{toml}");
        assert!(toml.contains("[params]"));
    }

    #[test]
    fn test_params_roundtrip() {
        let original = ReverbParams {
            mix: 0.42,
            predelay_ms: 37.5,
            decay_s: 7.25,
            damping: 0.1,
            diffusion: 0.9,
            size: 1.3,
            gate: 0.2,
            mod_depth_ms: 2.5,
            mod_rate_hz: 0.8,
            low_cut_hz: 150.0,
            grit: 0.05,
        };
        let toml = ReverbPreset::from_params("Roundtrip", &original)
            .to_toml()
            .unwrap();
        let parsed = ReverbPreset::from_toml(&toml).unwrap().to_params().unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let preset = ReverbPreset::new("Bad").with_param("decay", 99.0);
        let err = preset.to_params().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref preset, .. } if preset == "Bad"));

        let preset = ReverbPreset::new("Typo").with_param("dcay", 2.0);
        assert!(preset.to_params().is_err());
    }

    #[test]
    fn test_set_validates() {
        let mut preset = ReverbPreset::new("Edit");
        preset.set("size", 1.2).unwrap();
        assert_eq!(preset.get("size"), Some(1.2));
        assert!(preset.set("size", 3.0).is_err());
        assert_eq!(preset.get("size"), Some(1.2));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            ReverbPreset::from_toml("name = "),
            Err(ConfigError::TomlParse(_))
        ));
        // Parameters must be numbers
        assert!(ReverbPreset::from_toml("name = \"x\"\n[params]\nmix = \"high\"").is_err());
    }
}
