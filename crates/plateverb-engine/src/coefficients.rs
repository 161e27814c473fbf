//! Per-block coefficient derivation.
//!
//! Everything the per-sample path needs is computed here once per block from
//! a [`ReverbParams`] snapshot and the fixed [`Tuning`]. Every delay length
//! and modulation depth is clamped to the allocated buffers before it leaves
//! this module.

use libm::roundf;
use plateverb_core::{
    MIN_ALLPASS_DELAY, MIN_COMB_DELAY, highpass_coeff, ms_to_samples, rt60_to_feedback,
};

use crate::params::ReverbParams;
use crate::tuning::{ALLPASSES_PER_CHANNEL, CHANNELS, COMBS_PER_CHANNEL, Tuning};

/// Damping coefficient at a damping control of 0.
pub const DAMPING_BASE: f32 = 0.5;
/// Damping coefficient added across the full control range.
pub const DAMPING_SPAN: f32 = 0.48;
/// Allpass coefficient at a diffusion control of 0.
pub const DIFFUSION_BASE: f32 = 0.3;
/// Allpass coefficient added across the full control range.
pub const DIFFUSION_SPAN: f32 = 0.55;

/// Derived values for one processing block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockCoefficients {
    /// Predelay tap in samples.
    pub predelay_samples: usize,
    /// Comb delay lengths per channel.
    pub comb_delays: [[usize; COMBS_PER_CHANNEL]; CHANNELS],
    /// Comb feedback gains per channel, each in `[0, 0.9999]`.
    pub comb_feedback: [[f32; COMBS_PER_CHANNEL]; CHANNELS],
    /// Allpass base delay lengths per channel.
    pub allpass_delays: [[usize; ALLPASSES_PER_CHANNEL]; CHANNELS],
    /// One-pole damping coefficient in the comb feedback path.
    pub damping_coeff: f32,
    /// Allpass reflection coefficient.
    pub diffusion_coeff: f32,
    /// Pre-tank high-pass coefficient.
    pub highpass_coeff: f32,
    /// Peak modulation excursion in samples.
    pub mod_depth_samples: f32,
    /// LFO rate in Hz.
    pub mod_rate_hz: f32,
    /// Saturation control, handed to the saturator.
    pub grit: f32,
    /// Gate control, handed to the gate controller.
    pub gate: f32,
    /// Wet/dry balance.
    pub mix: f32,
}

impl BlockCoefficients {
    /// Derive every per-block value from `params` at `tuning`'s rate.
    ///
    /// `params` is sanitized first, so any snapshot is accepted.
    ///
    /// # Example
    ///
    /// ```rust
    /// use plateverb_engine::{BlockCoefficients, ReverbParams, Tuning};
    ///
    /// let tuning = Tuning::new(48000.0);
    /// let coeffs = BlockCoefficients::derive(&ReverbParams::default(), &tuning);
    /// assert_eq!(coeffs.predelay_samples, 960);
    /// assert_eq!(coeffs.comb_delays[0][0], 1201);
    /// ```
    pub fn derive(params: &ReverbParams, tuning: &Tuning) -> Self {
        let params = params.sanitized();
        let fs = tuning.sample_rate();

        let predelay = roundf(ms_to_samples(params.predelay_ms, fs)) as usize;
        let predelay_samples = predelay.min(tuning.max_predelay_tap());

        let scale = |base: usize| roundf(base as f32 * params.size) as usize;

        let comb_delays = tuning.comb_lengths().map(|channel| {
            channel.map(|base| scale(base).clamp(MIN_COMB_DELAY, tuning.max_comb_delay()))
        });
        let comb_feedback = comb_delays
            .map(|channel| channel.map(|delay| rt60_to_feedback(params.decay_s, delay, fs)));
        let allpass_delays = tuning.allpass_lengths().map(|channel| {
            channel.map(|base| scale(base).clamp(MIN_ALLPASS_DELAY, tuning.max_allpass_delay()))
        });

        // Depth is limited so the shortest base minus the excursion stays at
        // MIN_ALLPASS_DELAY, scaling the sweep down instead of clipping it.
        let shortest_allpass = allpass_delays
            .iter()
            .flatten()
            .copied()
            .min()
            .unwrap_or(MIN_ALLPASS_DELAY);
        let depth_limit = tuning
            .max_excursion()
            .min(shortest_allpass.saturating_sub(MIN_ALLPASS_DELAY) as f32);

        Self {
            predelay_samples,
            comb_delays,
            comb_feedback,
            allpass_delays,
            damping_coeff: DAMPING_BASE + DAMPING_SPAN * params.damping,
            diffusion_coeff: DIFFUSION_BASE + DIFFUSION_SPAN * params.diffusion,
            highpass_coeff: highpass_coeff(params.low_cut_hz, fs),
            mod_depth_samples: ms_to_samples(params.mod_depth_ms, fs).min(depth_limit),
            mod_rate_hz: params.mod_rate_hz,
            grit: params.grit,
            gate: params.gate,
            mix: params.mix,
        }
    }
}
