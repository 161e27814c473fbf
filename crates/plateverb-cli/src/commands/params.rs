//! Control listing command.

#![allow(clippy::print_literal)] // literal table headers

use clap::Args;
use plateverb_core::ParamScale;
use plateverb_engine::PARAMS;

#[derive(Args)]
pub struct ParamsArgs {
    /// Show details for a single control (string id, e.g. "decay")
    #[arg(value_name = "PARAM")]
    param: Option<String>,
}

pub fn run(args: ParamsArgs) -> anyhow::Result<()> {
    if let Some(id) = &args.param {
        let desc = PARAMS
            .iter()
            .find(|d| d.string_id.eq_ignore_ascii_case(id))
            .ok_or_else(|| anyhow::anyhow!("Unknown parameter: {}", id))?;

        let unit = desc.unit.suffix();
        println!("{}", desc.name);
        println!("{}", "=".repeat(desc.name.len()));
        println!();
        println!("Id:       {} ({})", desc.string_id, desc.id.0);
        println!("Range:    {}{unit} .. {}{unit}", desc.min, desc.max);
        println!("Default:  {}{unit}", desc.default);
        if desc.step > 0.0 {
            println!("Step:     {}", desc.step);
        }
        if desc.scale == ParamScale::Logarithmic {
            println!("Scale:    logarithmic");
        }
        println!();
        println!("Example usage:");
        println!("  plateverb inspect --set {}={}", desc.string_id, desc.default);
        return Ok(());
    }

    println!("Reverb Controls:");
    println!();
    println!(
        "  {:3}  {:10}  {:18}  {:>9}  {:>9}  {:>9}  {}",
        "#", "Id", "Name", "Min", "Max", "Default", "Unit"
    );
    println!(
        "  {:3}  {:10}  {:18}  {:>9}  {:>9}  {:>9}  {}",
        "-", "--", "----", "---", "---", "-------", "----"
    );
    for (i, desc) in PARAMS.iter().enumerate() {
        println!(
            "  {:3}  {:10}  {:18}  {:>9}  {:>9}  {:>9}  {}",
            i,
            desc.string_id,
            desc.name,
            desc.min,
            desc.max,
            desc.default,
            desc.unit.suffix().trim()
        );
    }
    println!();
    println!("Override any control with --set <id>=<value>, e.g. --set decay=4");

    Ok(())
}
