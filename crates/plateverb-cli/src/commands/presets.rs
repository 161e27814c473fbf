//! Preset management commands.
//!
//! Provides commands to list, show, and save reverb presets.

use clap::{Args, Subcommand};
use plateverb_config::{
    ReverbPreset, ensure_user_presets_dir, factory_presets, list_user_presets,
    preset_name_from_path, system_presets_dir, user_config_dir, user_presets_dir,
};
use plateverb_engine::PARAMS;
use std::path::PathBuf;

use super::common::{apply_assignments, load_preset, parse_key_val};

#[derive(Args)]
pub struct PresetsArgs {
    #[command(subcommand)]
    command: PresetsCommand,
}

#[derive(Subcommand)]
enum PresetsCommand {
    /// List available presets (factory and user)
    List {
        /// Show only factory presets
        #[arg(long)]
        factory: bool,

        /// Show only user presets
        #[arg(long)]
        user: bool,
    },

    /// Show every control value of a preset
    Show {
        /// Preset name or path
        name: String,
    },

    /// Save a preset built from a base preset and overrides
    Save {
        /// Name for the new preset
        name: String,

        /// Preset to start from (defaults to every control at its default)
        #[arg(long)]
        from: Option<String>,

        /// Control override, e.g. --set decay=4 (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
        assignments: Vec<(String, f64)>,

        /// Description of the preset
        #[arg(short, long)]
        description: Option<String>,

        /// Write to this file instead of the user presets directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite if the preset file already exists
        #[arg(long)]
        force: bool,
    },

    /// Show preset directories
    Paths,
}

pub fn run(args: PresetsArgs) -> anyhow::Result<()> {
    match args.command {
        PresetsCommand::List { factory, user } => list_presets(factory, user),
        PresetsCommand::Show { name } => show_preset(&name),
        PresetsCommand::Save {
            name,
            from,
            assignments,
            description,
            output,
            force,
        } => save_preset(SaveRequest {
            name: &name,
            from: from.as_deref(),
            assignments: &assignments,
            description: description.as_deref(),
            output,
            force,
        }),
        PresetsCommand::Paths => show_paths(),
    }
}

fn list_presets(factory_only: bool, user_only: bool) -> anyhow::Result<()> {
    let show_factory = !user_only;
    let show_user = !factory_only;

    if show_factory {
        println!("Factory Presets:");
        println!("================");
        for (id, preset) in plateverb_config::FACTORY_PRESET_NAMES
            .iter()
            .zip(factory_presets())
        {
            let desc = preset.description.as_deref().unwrap_or("");
            println!("  {:14} {:14} - {}", id, preset.name, desc);
        }
        println!();
    }

    if show_user {
        println!("User Presets:");
        println!("=============");
        let user_presets = list_user_presets();
        if user_presets.is_empty() {
            println!("  (none)");
            println!();
            println!("  Create a preset with: plateverb presets save <name> --set decay=4\n");
        } else {
            for path in user_presets {
                let name = preset_name_from_path(&path).unwrap_or_else(|| "unknown".to_string());

                match ReverbPreset::load(&path) {
                    Ok(preset) => {
                        let desc = preset.description.as_deref().unwrap_or("");
                        println!("  {:20} - {}", name, desc);
                    }
                    Err(e) => {
                        tracing::warn!(path = %path.display(), error = %e, "unreadable preset");
                        println!("  {:20} - (error loading)", name);
                    }
                }
            }
        }
        println!();
    }

    Ok(())
}

fn show_preset(name: &str) -> anyhow::Result<()> {
    let preset = load_preset(name)?;
    let params = preset.to_params()?;

    println!("Preset: {}", preset.name);
    println!("{}", "=".repeat(8 + preset.name.len()));
    println!();

    if let Some(desc) = &preset.description {
        println!("Description: {}", desc);
        println!();
    }

    println!("Sample Rate: {} Hz", preset.sample_rate);
    println!();

    println!("Controls:");
    for (i, desc) in PARAMS.iter().enumerate() {
        let marker = if preset.get(desc.string_id).is_some() {
            ""
        } else {
            "  (default)"
        };
        println!(
            "  {:10} = {}{}{}",
            desc.string_id,
            params.get(i),
            desc.unit.suffix(),
            marker
        );
    }

    Ok(())
}

struct SaveRequest<'a> {
    name: &'a str,
    from: Option<&'a str>,
    assignments: &'a [(String, f64)],
    description: Option<&'a str>,
    output: Option<PathBuf>,
    force: bool,
}

fn save_preset(request: SaveRequest<'_>) -> anyhow::Result<()> {
    let preset_path = match request.output {
        Some(path) => path,
        None => ensure_user_presets_dir()?.join(format!("{}.toml", request.name)),
    };

    if preset_path.exists() && !request.force {
        anyhow::bail!(
            "Preset file '{}' already exists. Use --force to overwrite.",
            preset_path.display()
        );
    }

    let base = match request.from {
        Some(source) => load_preset(source)?,
        None => ReverbPreset::default(),
    };

    let mut preset = ReverbPreset::from_params(request.name, &base.to_params()?)
        .with_sample_rate(base.sample_rate);
    if let Some(desc) = request.description.or(base.description.as_deref()) {
        preset = preset.with_description(desc);
    }
    apply_assignments(&mut preset, request.assignments)?;

    preset.save(&preset_path)?;
    tracing::info!(name = request.name, path = %preset_path.display(), "saved preset");

    println!("Saved preset '{}' to {}", request.name, preset_path.display());
    Ok(())
}

fn show_paths() -> anyhow::Result<()> {
    println!("Preset Directories:");
    println!("===================");
    println!();
    println!("User presets:   {}", user_presets_dir().display());
    println!("System presets: {}", system_presets_dir().display());
    println!("Config dir:     {}", user_config_dir().display());

    Ok(())
}
