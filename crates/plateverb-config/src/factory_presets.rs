//! Factory presets bundled with the plateverb library.
//!
//! These are embedded at compile time and always available without any
//! preset files on disk. Each one sets only the controls it cares about;
//! everything else stays at its default.

use crate::ReverbPreset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "init",
    "plate",
    "small_room",
    "cathedral",
    "gated_drums",
    "dirty_plate",
    "wide_chorus",
];

/// TOML content for factory presets.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("plate", PLATE_PRESET),
    ("small_room", SMALL_ROOM_PRESET),
    ("cathedral", CATHEDRAL_PRESET),
    ("gated_drums", GATED_DRUMS_PRESET),
    ("dirty_plate", DIRTY_PLATE_PRESET),
    ("wide_chorus", WIDE_CHORUS_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Every control at its default"
sample_rate = 48000
"#;

const PLATE_PRESET: &str = r#"
name = "Plate"
description = "Classic bright vocal plate"
sample_rate = 48000

[params]
mix = 0.3
predelay = 12.0
decay = 2.2
damping = 0.3
diffusion = 0.8
size = 1.0
low_cut = 120.0
"#;

const SMALL_ROOM_PRESET: &str = r#"
name = "Small Room"
description = "Short, dense and dark ambience"
sample_rate = 48000

[params]
mix = 0.2
predelay = 4.0
decay = 0.6
damping = 0.7
diffusion = 0.85
size = 0.55
mod_depth = 0.3
"#;

const CATHEDRAL_PRESET: &str = r#"
name = "Cathedral"
description = "Huge slow-moving tail"
sample_rate = 48000

[params]
mix = 0.45
predelay = 60.0
decay = 12.0
damping = 0.45
diffusion = 0.75
size = 1.5
mod_depth = 2.0
mod_rate = 0.25
"#;

const GATED_DRUMS_PRESET: &str = r#"
name = "Gated Drums"
description = "Big burst cut short by the tail gate"
sample_rate = 48000

[params]
mix = 0.5
predelay = 0.0
decay = 4.0
damping = 0.4
diffusion = 0.9
size = 1.2
gate = 0.55
low_cut = 80.0
"#;

const DIRTY_PLATE_PRESET: &str = r#"
name = "Dirty Plate"
description = "Saturated input into a mid-length plate"
sample_rate = 48000

[params]
mix = 0.35
predelay = 20.0
decay = 3.0
damping = 0.55
diffusion = 0.7
grit = 0.6
low_cut = 200.0
"#;

const WIDE_CHORUS_PRESET: &str = r#"
name = "Wide Chorus"
description = "Deep allpass modulation for a lush, wide tail"
sample_rate = 48000

[params]
mix = 0.4
predelay = 25.0
decay = 3.5
damping = 0.5
diffusion = 0.65
size = 1.1
mod_depth = 4.5
mod_rate = 1.2
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use plateverb_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("{}: {:?}", preset.name, preset.description);
/// }
/// ```
pub fn factory_presets() -> Vec<ReverbPreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| ReverbPreset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by identifier or display name (case-insensitive).
///
/// # Example
///
/// ```rust
/// use plateverb_config::get_factory_preset;
///
/// let preset = get_factory_preset("cathedral").expect("bundled");
/// assert_eq!(preset.name, "Cathedral");
/// assert!(get_factory_preset("Gated Drums").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<ReverbPreset> {
    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
    {
        return ReverbPreset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Get the identifiers of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name matches a factory preset (case-insensitive).
///
/// ```rust
/// use plateverb_config::is_factory_preset;
///
/// assert!(is_factory_preset("plate"));
/// assert!(is_factory_preset("Small Room"));
/// assert!(!is_factory_preset("shimmer"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
