//! Print the buffer sizes and per-block coefficients an engine would run with.

use clap::Args;
use plateverb_config::ReverbPreset;
use plateverb_core::{Effect, GRIT_DRIVE_MAX, ParameterInfo, linear_to_db};
use plateverb_engine::PlateReverb;

use super::common::{apply_assignments, load_preset, parse_key_val};

#[derive(Args)]
pub struct InspectArgs {
    /// Preset name or path to start from
    #[arg(short, long)]
    preset: Option<String>,

    /// Sample rate in Hz (defaults to the preset's, else 48000)
    #[arg(short = 'r', long)]
    sample_rate: Option<f32>,

    /// Control override, e.g. --set decay=4 (repeatable)
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    assignments: Vec<(String, f64)>,
}

pub fn run(args: InspectArgs) -> anyhow::Result<()> {
    let mut preset = match &args.preset {
        Some(name) => load_preset(name)?,
        None => ReverbPreset::default(),
    };
    apply_assignments(&mut preset, &args.assignments)?;
    let params = preset.to_params()?;

    let sample_rate = args.sample_rate.unwrap_or(preset.sample_rate as f32);
    let mut reverb = PlateReverb::new(sample_rate)?;
    reverb.set_params(params);
    reverb.prepare_block();

    print!("{}", report(&reverb)?);
    Ok(())
}

fn join<T: std::fmt::Display>(values: &[T], precision: usize) -> String {
    values
        .iter()
        .map(|v| format!("{v:.precision$}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Human-readable dump of the engine's tuning and prepared block.
fn report(reverb: &PlateReverb) -> Result<String, std::fmt::Error> {
    use std::fmt::Write;

    let tuning = reverb.tuning();
    let coeffs = reverb.coefficients();
    let gate = reverb.gate();
    let mut out = String::new();

    writeln!(out, "Engine")?;
    writeln!(out, "======")?;
    writeln!(out, "Sample rate:        {} Hz", reverb.sample_rate())?;
    writeln!(out, "Latency:            {} samples", reverb.latency_samples())?;
    writeln!(out, "Predelay capacity:  {} samples", tuning.predelay_capacity())?;
    writeln!(out, "Comb capacity:      {} samples", tuning.comb_capacity())?;
    writeln!(
        out,
        "Allpass capacity:   {} samples (guard {})",
        tuning.allpass_capacity(),
        tuning.guard()
    )?;
    writeln!(out)?;

    writeln!(out, "Controls")?;
    writeln!(out, "========")?;
    for i in 0..reverb.param_count() {
        if let Some(desc) = reverb.param_info(i) {
            writeln!(
                out,
                "  {:10} = {}{}",
                desc.string_id,
                reverb.get_param(i),
                desc.unit.suffix()
            )?;
        }
    }
    writeln!(out)?;

    writeln!(out, "Block")?;
    writeln!(out, "=====")?;
    writeln!(out, "Predelay:           {} samples", coeffs.predelay_samples)?;
    for (label, ch) in [("L", 0), ("R", 1)] {
        writeln!(
            out,
            "Comb delays {label}:      [{}]",
            join(&coeffs.comb_delays[ch], 0)
        )?;
        writeln!(
            out,
            "Comb feedback {label}:    [{}]",
            join(&coeffs.comb_feedback[ch], 4)
        )?;
        writeln!(
            out,
            "Allpass delays {label}:   [{}]",
            join(&coeffs.allpass_delays[ch], 0)
        )?;
    }
    writeln!(out, "Damping coeff:      {:.4}", coeffs.damping_coeff)?;
    writeln!(out, "Diffusion coeff:    {:.4}", coeffs.diffusion_coeff)?;
    writeln!(out, "High-pass coeff:    {:.6}", coeffs.highpass_coeff)?;
    writeln!(
        out,
        "Mod depth:          {:.2} samples at {} Hz",
        coeffs.mod_depth_samples, coeffs.mod_rate_hz
    )?;
    if coeffs.grit > 1e-4 {
        let drive = 1.0 + coeffs.grit * (GRIT_DRIVE_MAX - 1.0);
        writeln!(out, "Grit drive:         {drive:.2}x")?;
    } else {
        writeln!(out, "Grit drive:         off")?;
    }
    if gate.is_enabled() {
        writeln!(
            out,
            "Gate:               open {:.1} dB, close {:.1} dB",
            linear_to_db(gate.open_threshold()),
            linear_to_db(gate.close_threshold())
        )?;
    } else {
        writeln!(out, "Gate:               off")?;
    }
    writeln!(out, "Mix:                {}", coeffs.mix)?;

    Ok(out)
}
