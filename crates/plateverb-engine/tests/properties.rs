//! Property-based tests for the plate reverb engine.
//!
//! Covers buffer sizing across sample rates, the exact dry path at mix 0,
//! long-run stability of the tail and linearity of the clean path.

use proptest::prelude::*;
use plateverb_core::{Effect, MIN_ALLPASS_DELAY, MIN_COMB_DELAY};
use plateverb_engine::{BlockCoefficients, PlateReverb, ReverbParams, Tuning};

fn arb_params() -> impl Strategy<Value = ReverbParams> {
    (
        (0.0f32..=1.0, 0.0f32..=200.0, 0.1f32..=20.0, 0.0f32..=1.0),
        (0.0f32..=1.0, 0.5f32..=1.5, 0.0f32..=1.0, 0.0f32..=5.0),
        (0.0f32..=5.0, 10.0f32..=1000.0, 0.0f32..=1.0),
    )
        .prop_map(
            |(
                (mix, predelay_ms, decay_s, damping),
                (diffusion, size, gate, mod_depth_ms),
                (mod_rate_hz, low_cut_hz, grit),
            )| ReverbParams {
                mix,
                predelay_ms,
                decay_s,
                damping,
                diffusion,
                size,
                gate,
                mod_depth_ms,
                mod_rate_hz,
                low_cut_hz,
                grit,
            },
        )
}

fn peak(signal: &[f32]) -> f32 {
    signal.iter().fold(0.0f32, |m, s| m.max(s.abs()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every derived delay fits inside its buffer at any rate and setting.
    #[test]
    fn derived_delays_fit_capacity(
        sample_rate in 2.0f32..384_000.0,
        params in arb_params(),
    ) {
        let tuning = Tuning::new(sample_rate);
        let c = BlockCoefficients::derive(&params, &tuning);

        prop_assert!(c.predelay_samples + 1 < tuning.predelay_capacity());
        for &d in c.comb_delays.iter().flatten() {
            prop_assert!(d >= MIN_COMB_DELAY);
            prop_assert!(d < tuning.comb_capacity());
        }
        for &d in c.allpass_delays.iter().flatten() {
            prop_assert!(d >= MIN_ALLPASS_DELAY);
            // Base tap plus the largest excursion stays below capacity
            prop_assert!((d as f32 + c.mod_depth_samples) < (tuning.allpass_capacity() - 1) as f32);
            // and the shortest excursion stays at or above the minimum length
            prop_assert!(d as f32 - c.mod_depth_samples >= MIN_ALLPASS_DELAY as f32);
        }
        for &g in c.comb_feedback.iter().flatten() {
            prop_assert!((0.0..1.0).contains(&g));
        }
    }

    /// With mix 0 the output is the dry input, bit for bit.
    #[test]
    fn mix_zero_is_exact_dry(
        params in arb_params(),
        input in prop::collection::vec(-1.0f32..=1.0, 512),
    ) {
        let mut reverb = PlateReverb::new(16000.0).expect("allocation");
        reverb.set_params(ReverbParams { mix: 0.0, ..params });

        let mut left = vec![0.0; input.len()];
        let mut right = vec![0.0; input.len()];
        reverb.process_block(&input, &mut left, &mut right);
        prop_assert_eq!(&left, &input);
        prop_assert_eq!(&right, &input);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// After the input stops the tail never grows back and keeps shrinking.
    #[test]
    fn tail_decays_after_input_stops(params in arb_params()) {
        let fs = 8000.0;
        let mut reverb = PlateReverb::new(fs).expect("allocation");
        reverb.set_params(ReverbParams { mix: 1.0, ..params });

        let burst: Vec<f32> = (0..1600).map(|i| if i % 7 < 3 { 0.7 } else { -0.5 }).collect();
        let mut left = vec![0.0; burst.len()];
        let mut right = vec![0.0; burst.len()];
        reverb.process_block(&burst, &mut left, &mut right);

        // Render decay_s worth of silence in one-second windows
        let window = 8000;
        let silence = vec![0.0; window];
        let mut peaks = Vec::new();
        let seconds = (params.decay_s.ceil() as usize).clamp(2, 20);
        for _ in 0..seconds {
            let mut l = vec![0.0; window];
            let mut r = vec![0.0; window];
            reverb.process_block(&silence, &mut l, &mut r);
            prop_assert!(l.iter().chain(&r).all(|s| s.is_finite()));
            peaks.push(peak(&l).max(peak(&r)));
        }

        // Allow a little transient growth from diffusion, but not beyond it
        let first = peaks[0].max(1e-12);
        let last = *peaks.last().unwrap_or(&0.0);
        prop_assert!(last <= first * 1.01, "tail grew: {:?}", peaks);
    }

    /// With grit 0 and the gate off the wet path is linear in its input.
    #[test]
    fn clean_path_is_linear(
        params in arb_params(),
        scale in 0.1f32..4.0,
    ) {
        let params = ReverbParams { grit: 0.0, gate: 0.0, ..params };
        let input: Vec<f32> = (0..2000).map(|i| if i < 200 { ((i * 37) % 11) as f32 / 11.0 - 0.5 } else { 0.0 }).collect();
        let scaled: Vec<f32> = input.iter().map(|x| x * scale).collect();

        let render = |signal: &[f32]| {
            let mut reverb = PlateReverb::new(8000.0).expect("allocation");
            reverb.set_params(params);
            let mut l = vec![0.0; signal.len()];
            let mut r = vec![0.0; signal.len()];
            reverb.process_block(signal, &mut l, &mut r);
            l
        };

        let base = render(&input);
        let out = render(&scaled);
        let tolerance = 1e-4 * scale.max(1.0);
        for (a, b) in base.iter().zip(&out) {
            prop_assert!((a * scale - b).abs() <= tolerance, "{} vs {}", a * scale, b);
        }
    }
}
