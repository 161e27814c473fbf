//! Shared CLI helpers used across multiple commands.

use anyhow::Context;
use plateverb_config::{ReverbPreset, parse_assignment, resolve_preset};

/// Parse a `key=value` string for clap's `value_parser`.
pub fn parse_key_val(s: &str) -> Result<(String, f64), String> {
    parse_assignment(s).map_err(|e| e.to_string())
}

/// Load a preset by path, user/system preset name, or factory name.
pub fn load_preset(name: &str) -> anyhow::Result<ReverbPreset> {
    let preset = resolve_preset(name).with_context(|| {
        format!("could not load preset '{name}' (see 'plateverb presets list')")
    })?;
    tracing::debug!(name, preset = %preset.name, "resolved preset");
    Ok(preset)
}

/// Apply `--set` overrides to a preset, validating each one.
pub fn apply_assignments(
    preset: &mut ReverbPreset,
    assignments: &[(String, f64)],
) -> anyhow::Result<()> {
    for (key, value) in assignments {
        preset
            .set(key, *value)
            .with_context(|| format!("invalid --set {key}={value}"))?;
    }
    Ok(())
}
