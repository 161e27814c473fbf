//! Stereo plate reverb.
//!
//! A mono input runs through predelay, a high-pass, optional saturation, a
//! parallel comb bank per channel and a cascade of LFO-modulated allpass
//! diffusers per channel, then through a stereo-linked tail gate.
//!
//! ```text
//!  x ─┬─► predelay ─► HP ─► grit ─┬─► 4 combs L ─► avg ─► AP ─► AP ─┐
//!     │                           └─► 4 combs R ─► avg ─► AP ─► AP ─┤
//!     │                                                   gate ◄────┤
//!     └──────────────────────────── dry ─────────────────► mix ◄────┘
//! ```
//!
//! Coefficients are derived once per block ([`PlateReverb::prepare_block`])
//! and held fixed while the block's samples are stepped.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

use plateverb_core::{
    AllpassUnit, CombUnit, DelayLine, Effect, GateController, Lfo, OnePoleHighpass,
    ParamDescriptor, ParameterInfo, Saturator, wet_dry_mix,
};

use crate::coefficients::BlockCoefficients;
use crate::error::EngineError;
use crate::params::{PARAM_COUNT, PARAMS, ReverbParams};
use crate::tuning::{ALLPASSES_PER_CHANNEL, CHANNELS, COMBS_PER_CHANNEL, Tuning};

/// One channel of the tank: parallel combs into cascaded allpasses.
#[derive(Debug, Clone)]
struct TankChannel {
    combs: Vec<CombUnit>,
    allpasses: Vec<AllpassUnit>,
}

impl TankChannel {
    fn try_new(tuning: &Tuning) -> Result<Self, EngineError> {
        let combs = (0..COMBS_PER_CHANNEL)
            .map(|_| CombUnit::try_new(tuning.comb_capacity()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(EngineError::allocation("comb"))?;
        let allpasses = (0..ALLPASSES_PER_CHANNEL)
            .map(|_| AllpassUnit::try_new(tuning.allpass_capacity(), tuning.guard()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(EngineError::allocation("allpass"))?;
        Ok(Self { combs, allpasses })
    }

    fn apply(&mut self, coeffs: &BlockCoefficients, channel: usize) {
        for (i, comb) in self.combs.iter_mut().enumerate() {
            comb.set_delay(coeffs.comb_delays[channel][i]);
            comb.set_feedback(coeffs.comb_feedback[channel][i]);
            comb.set_damping(coeffs.damping_coeff);
        }
        for (i, allpass) in self.allpasses.iter_mut().enumerate() {
            allpass.set_delay(coeffs.allpass_delays[channel][i]);
            allpass.set_coeff(coeffs.diffusion_coeff);
        }
    }

    /// Average of the comb outputs.
    #[inline]
    fn comb_sum(&mut self, input: f32, feedback_scale: f32) -> f32 {
        let sum: f32 = self
            .combs
            .iter_mut()
            .map(|comb| comb.process(input, feedback_scale))
            .sum();
        sum * (1.0 / COMBS_PER_CHANNEL as f32)
    }

    /// Run the allpass cascade. Even stages take `+excursion`, odd stages `-excursion`.
    #[inline]
    fn diffuse(&mut self, input: f32, excursion: f32) -> f32 {
        self.allpasses
            .iter_mut()
            .enumerate()
            .fold(input, |signal, (i, allpass)| {
                let polarity = if i % 2 == 0 { 1.0 } else { -1.0 };
                allpass.process_modulated(signal, polarity * excursion)
            })
    }

    fn clear(&mut self) {
        self.combs.iter_mut().for_each(CombUnit::clear);
        self.allpasses.iter_mut().for_each(AllpassUnit::clear);
    }
}

/// Mono-in, stereo-out plate reverb.
///
/// # Parameters
///
/// | Index | Control | Range | Default |
/// |-------|---------|-------|---------|
/// | 0 | Mix | 0–1 | 0.25 |
/// | 1 | Pre-Delay | 0–200 ms | 20 |
/// | 2 | Decay (RT60) | 0.1–20 s | 2.5 |
/// | 3 | Damping | 0–1 | 0.5 |
/// | 4 | Diffusion | 0–1 | 0.7 |
/// | 5 | Size | 0.5–1.5 | 1.0 |
/// | 6 | Gate | 0–1 | 0 (off) |
/// | 7 | Mod Depth | 0–5 ms | 1.0 |
/// | 8 | Mod Rate | 0–5 Hz | 0.5 |
/// | 9 | Low Cut | 10–1000 Hz | 10 |
/// | 10 | Grit | 0–1 | 0 (off) |
///
/// # Example
///
/// ```rust
/// use plateverb_core::{Effect, ParameterInfo};
/// use plateverb_engine::PlateReverb;
///
/// let mut reverb = PlateReverb::new(48000.0).expect("allocation");
/// let idx = reverb.find_param_by_string_id("decay").unwrap();
/// reverb.set_param(idx, 4.0);
///
/// let input = [1.0, 0.0, 0.0, 0.0];
/// let mut left = [0.0; 4];
/// let mut right = [0.0; 4];
/// reverb.process_block(&input, &mut left, &mut right);
/// // Default mix is 0.25 and the wet path starts silent
/// assert_eq!(left[0], 0.75);
/// ```
#[derive(Debug, Clone)]
pub struct PlateReverb {
    tuning: Tuning,
    params: ReverbParams,
    coeffs: BlockCoefficients,
    predelay: DelayLine,
    highpass: OnePoleHighpass,
    saturator: Saturator,
    channels: [TankChannel; CHANNELS],
    lfo: Lfo,
    gate: GateController,
    params_dirty: bool,
}

impl PlateReverb {
    /// Allocate every buffer for `sample_rate` and prepare default parameters.
    ///
    /// Non-finite rates and rates at or below 1 Hz fall back to 48 kHz. The
    /// only failure is buffer allocation, in which case nothing is returned.
    pub fn new(sample_rate: f32) -> Result<Self, EngineError> {
        #[cfg(feature = "tracing")]
        {
            if crate::tuning::sanitize_sample_rate(sample_rate).1 {
                tracing::warn!(sample_rate, "plateverb: invalid sample rate, using 48 kHz");
            }
        }

        let tuning = Tuning::new(sample_rate);
        let fs = tuning.sample_rate();
        let params = ReverbParams::default();

        let predelay = DelayLine::try_new(tuning.predelay_capacity())
            .map_err(EngineError::allocation("predelay"))?;
        let channels = [TankChannel::try_new(&tuning)?, TankChannel::try_new(&tuning)?];

        let mut reverb = Self {
            coeffs: BlockCoefficients::derive(&params, &tuning),
            tuning,
            params,
            predelay,
            highpass: OnePoleHighpass::new(),
            saturator: Saturator::new(),
            channels,
            lfo: Lfo::new(fs, params.mod_rate_hz),
            gate: GateController::new(fs),
            params_dirty: false,
        };
        reverb.prepare_block();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = fs,
            predelay_capacity = reverb.tuning.predelay_capacity(),
            comb_capacity = reverb.tuning.comb_capacity(),
            allpass_capacity = reverb.tuning.allpass_capacity(),
            "plateverb: engine constructed"
        );

        Ok(reverb)
    }

    /// Sample rate the engine runs at, after any fallback.
    pub fn sample_rate(&self) -> f32 {
        self.tuning.sample_rate()
    }

    /// Tuning tables and capacities.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Current control snapshot.
    pub fn params(&self) -> &ReverbParams {
        &self.params
    }

    /// Replace every control. Values are sanitized; takes effect at the next block.
    pub fn set_params(&mut self, params: ReverbParams) {
        self.params = params.sanitized();
        self.params_dirty = true;
    }

    /// Coefficients the last prepared block ran with.
    pub fn coefficients(&self) -> &BlockCoefficients {
        &self.coeffs
    }

    /// Gate state, for metering.
    pub fn gate(&self) -> &GateController {
        &self.gate
    }

    /// Derive coefficients from the current controls and load them into every unit.
    ///
    /// Called once per block by [`process_block`](Effect::process_block).
    /// Call it directly before a run of [`step`](Self::step) calls.
    pub fn prepare_block(&mut self) {
        self.coeffs = BlockCoefficients::derive(&self.params, &self.tuning);
        let coeffs = &self.coeffs;

        for (ch, channel) in self.channels.iter_mut().enumerate() {
            channel.apply(coeffs, ch);
        }
        self.highpass.set_coeff(coeffs.highpass_coeff);
        self.saturator.set_grit(coeffs.grit);
        self.lfo.set_rate_hz(coeffs.mod_rate_hz);
        self.gate.set_gate(coeffs.gate);

        self.params_dirty = false;
    }

    /// Process one sample with the coefficients of the last prepared block.
    #[inline]
    pub fn step(&mut self, input: f32) -> (f32, f32) {
        // Write before read: tap P + 1 is a P-sample delay.
        self.predelay.write(input);
        let delayed = self.predelay.read_tap(self.coeffs.predelay_samples + 1);

        let filtered = self.highpass.process(delayed);
        let driven = self.saturator.process(filtered);

        let feedback_scale = self.gate.feedback_scale();
        let [left, right] = &mut self.channels;
        let tank_l = left.comb_sum(driven, feedback_scale);
        let tank_r = right.comb_sum(driven, feedback_scale);

        let (sin, cos) = self.lfo.advance();
        let depth = self.coeffs.mod_depth_samples;
        let mut wet_l = left.diffuse(tank_l, sin * depth);
        let mut wet_r = right.diffuse(tank_r, cos * depth);

        if self.gate.is_enabled() {
            let gain = self.gate.process(wet_l.abs().max(wet_r.abs()));
            wet_l *= gain;
            wet_r *= gain;
        }

        let mix = self.coeffs.mix;
        (wet_dry_mix(input, wet_l, mix), wet_dry_mix(input, wet_r, mix))
    }
}

impl Effect for PlateReverb {
    fn process(&mut self, input: f32) -> (f32, f32) {
        if self.params_dirty {
            self.prepare_block();
        }
        self.step(input)
    }

    fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        self.prepare_block();
        for ((&x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            (*l, *r) = self.step(x);
        }
    }

    fn reset(&mut self) {
        self.predelay.clear();
        for channel in &mut self.channels {
            channel.clear();
        }
        self.highpass.reset();
        self.lfo.reset();
        self.gate.reset();

        #[cfg(feature = "tracing")]
        tracing::debug!("plateverb: reset");
    }
}

impl ParameterInfo for PlateReverb {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        PARAMS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get(index)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        let Some(desc) = PARAMS.get(index) else {
            return;
        };
        self.params.set(index, desc.clamp(value));
        self.params_dirty = true;
    }
}
