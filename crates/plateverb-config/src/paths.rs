//! Platform-specific paths for presets and configuration.
//!
//! # Directory Structure
//!
//! - **User presets**: `~/.config/plateverb/presets/` (Linux), `~/Library/Application Support/plateverb/presets/` (macOS), `%APPDATA%\plateverb\presets\` (Windows)
//! - **User config**: `~/.config/plateverb/` (Linux), `~/Library/Application Support/plateverb/` (macOS), `%APPDATA%\plateverb\` (Windows)
//! - **System presets**: `/usr/share/plateverb/presets/` (Linux), `/Library/Application Support/plateverb/presets/` (macOS)
//!
//! # Example
//!
//! ```rust,no_run
//! use plateverb_config::paths;
//!
//! let presets_dir = paths::user_presets_dir();
//! println!("User presets: {:?}", presets_dir);
//!
//! // Files first, then the bundled factory presets
//! let preset = paths::resolve_preset("cathedral").expect("factory preset");
//! assert_eq!(preset.name, "Cathedral");
//! ```

use std::path::{Path, PathBuf};

use crate::{ConfigError, ReverbPreset, get_factory_preset};

/// Application name used for directory paths.
const APP_NAME: &str = "plateverb";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_presets_dir() -> PathBuf {
    user_config_dir().join(PRESETS_SUBDIR)
}

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the system-wide presets directory.
///
/// This directory is typically read-only.
pub fn system_presets_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        PathBuf::from("/usr/share").join(APP_NAME).join(PRESETS_SUBDIR)
    }
    #[cfg(target_os = "macos")]
    {
        PathBuf::from("/Library/Application Support")
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos")))]
    {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
            .join(PRESETS_SUBDIR)
    }
}

/// Find a preset file by path or name.
///
/// Searches in order:
/// 1. `name` itself, if it is an existing file
/// 2. The user presets directory
/// 3. The system presets directory
///
/// A `.toml` extension is added to bare names.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }

    let filename = preset_filename(name);
    [user_presets_dir(), system_presets_dir()]
        .into_iter()
        .map(|dir| dir.join(&filename))
        .find(|candidate| candidate.is_file())
}

/// Load a preset by path, by name from the preset directories, or from the
/// factory presets, in that order.
pub fn resolve_preset(name: &str) -> Result<ReverbPreset, ConfigError> {
    if let Some(path) = find_preset(name) {
        return ReverbPreset::load(path);
    }
    get_factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
}

/// File name a preset called `name` is stored under.
///
/// ```rust
/// use plateverb_config::paths::preset_filename;
///
/// assert_eq!(preset_filename("vocal"), "vocal.toml");
/// assert_eq!(preset_filename("vocal.toml"), "vocal.toml");
/// ```
pub fn preset_filename(name: &str) -> String {
    if name.ends_with(".toml") {
        name.to_string()
    } else {
        format!("{}.toml", name)
    }
}

/// Ensure the user presets directory exists.
///
/// Creates the directory and any parent directories if they don't exist.
pub fn ensure_user_presets_dir() -> Result<PathBuf, ConfigError> {
    let dir = user_presets_dir();

    if !dir.exists() {
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::create_dir(&dir, e))?;
    }

    Ok(dir)
}

/// List all preset files in the user presets directory.
pub fn list_user_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&user_presets_dir())
}

/// List all preset files in the system presets directory.
pub fn list_system_presets() -> Vec<PathBuf> {
    list_presets_in_dir(&system_presets_dir())
}

/// List all preset files, user presets first.
pub fn list_all_presets() -> Vec<PathBuf> {
    let mut presets = list_user_presets();
    presets.extend(list_system_presets());
    presets
}

/// List `.toml` files in `dir`, sorted by path.
///
/// Returns an empty vector if the directory doesn't exist or can't be read.
pub fn list_presets_in_dir(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut presets: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    presets.sort();
    presets
}

/// Get the preset name from a file path (the file stem).
///
/// ```rust
/// use plateverb_config::paths::preset_name_from_path;
/// use std::path::Path;
///
/// let name = preset_name_from_path(Path::new("/path/to/vocal_plate.toml"));
/// assert_eq!(name, Some("vocal_plate".to_string()));
/// ```
pub fn preset_name_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
