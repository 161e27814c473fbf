//! Integration tests for plateverb-cli.
//!
//! Tests run the built `plateverb` binary and check its output.

use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `plateverb` binary built by cargo.
fn plateverb_bin() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_plateverb"));
    cmd.env("RUST_LOG", "warn");
    cmd
}

fn run(args: &[&str]) -> Output {
    plateverb_bin()
        .args(args)
        .output()
        .expect("failed to run plateverb")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

// ---------------------------------------------------------------------------
// `plateverb params`
// ---------------------------------------------------------------------------

#[test]
fn cli_params_lists_every_control() {
    let output = run(&["params"]);
    assert!(output.status.success(), "plateverb params failed");

    let text = stdout(&output);
    for id in [
        "mix", "predelay", "decay", "damping", "diffusion", "size", "gate", "mod_depth",
        "mod_rate", "low_cut", "grit",
    ] {
        assert!(text.contains(id), "params listing should contain '{id}'");
    }
}

#[test]
fn cli_params_detail_and_unknown() {
    let output = run(&["params", "decay"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Decay"));
    assert!(text.contains("logarithmic"));

    let output = run(&["params", "shimmer"]);
    assert!(!output.status.success(), "unknown control should fail");
}

// ---------------------------------------------------------------------------
// `plateverb presets`
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_factory() {
    let output = run(&["presets", "list", "--factory"]);
    assert!(output.status.success());

    let text = stdout(&output);
    for name in ["init", "plate", "small_room", "cathedral", "gated_drums", "dirty_plate", "wide_chorus"] {
        assert!(text.contains(name), "factory list should contain '{name}'");
    }
}

#[test]
fn cli_presets_show_factory() {
    let output = run(&["presets", "show", "cathedral"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Preset: Cathedral"));
    assert!(text.contains("decay      = 12 s"));
    assert!(text.contains("grit       = 0  (default)"));
}

#[test]
fn cli_presets_save_then_show() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("mine.toml");
    let path_str = path.to_str().unwrap();

    let output = run(&[
        "presets", "save", "Mine", "--from", "plate", "--set", "mix=0.6", "--set", "grit=0.1",
        "--output", path_str,
    ]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(path.is_file());

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("name = \"Mine\""));
    assert!(content.contains("mix = 0.6"));
    assert!(content.contains("low_cut = 120.0"), "base preset values carry over:\n{content}");

    let output = run(&["presets", "show", path_str]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("grit       = 0.1"));

    // Refuses to overwrite without --force
    let output = run(&["presets", "save", "Mine", "--output", path_str]);
    assert!(!output.status.success());
    let output = run(&["presets", "save", "Mine", "--output", path_str, "--force"]);
    assert!(output.status.success());
}

#[test]
fn cli_presets_save_rejects_bad_values() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");

    let output = run(&[
        "presets", "save", "Bad", "--set", "size=4", "--output", path.to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    assert!(!path.exists(), "nothing is written on validation failure");
}

// ---------------------------------------------------------------------------
// `plateverb inspect`
// ---------------------------------------------------------------------------

#[test]
fn cli_inspect_defaults() {
    let output = run(&["inspect"]);
    assert!(output.status.success());

    let text = stdout(&output);
    assert!(text.contains("Sample rate:        48000 Hz"));
    assert!(text.contains("Comb capacity:      3844 samples"));
    assert!(text.contains("[1201, 1553, 1867, 2203]"));
    assert!(text.contains("Predelay:           960 samples"));
}

#[test]
fn cli_inspect_scales_with_rate_and_size() {
    let output = run(&["inspect", "--sample-rate", "96000"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("[2402, 3106, 3734, 4406]"));

    let output = run(&["inspect", "--set", "size=0.5", "--set", "predelay=0"]);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("Allpass delays L:   [120, 211]"));
    assert!(text.contains("Predelay:           0 samples"));
}

#[test]
fn cli_inspect_preset_and_invalid_input() {
    let output = run(&["inspect", "--preset", "gated_drums"]);
    assert!(output.status.success());
    assert!(stdout(&output).contains("Gate:               open"));

    assert!(!run(&["inspect", "--set", "decay=99"]).status.success());
    assert!(!run(&["inspect", "--set", "decay"]).status.success());
    assert!(!run(&["inspect", "--preset", "no_such_preset_42"]).status.success());
}
