//! Per-block control snapshot.
//!
//! [`ReverbParams`] holds the eleven user controls in their natural units.
//! The engine reads it once per processing block; nothing here is touched
//! from the per-sample path.

use plateverb_core::{ParamDescriptor, ParamId, ParamScale};

/// Number of user controls.
pub const PARAM_COUNT: usize = 11;

/// Index of each control in [`PARAMS`] and in [`ReverbParams::get`]/[`ReverbParams::set`].
pub mod index {
    /// Wet/dry balance.
    pub const MIX: usize = 0;
    /// Predelay in milliseconds.
    pub const PREDELAY: usize = 1;
    /// RT60 in seconds.
    pub const DECAY: usize = 2;
    /// High-frequency damping in the feedback path.
    pub const DAMPING: usize = 3;
    /// Allpass diffusion amount.
    pub const DIFFUSION: usize = 4;
    /// Delay length multiplier.
    pub const SIZE: usize = 5;
    /// Gate threshold control.
    pub const GATE: usize = 6;
    /// Allpass modulation depth in milliseconds.
    pub const MOD_DEPTH: usize = 7;
    /// LFO rate in Hz.
    pub const MOD_RATE: usize = 8;
    /// Pre-tank high-pass cutoff in Hz.
    pub const LOW_CUT: usize = 9;
    /// Input saturation amount.
    pub const GRIT: usize = 10;
}

/// Descriptor table for every control, in index order.
///
/// Numeric ids start at 1500 and never change; string ids are the keys used in
/// preset files.
pub const PARAMS: [ParamDescriptor; PARAM_COUNT] = [
    ParamDescriptor::amount("Mix", "Mix", 0.25).with_id(ParamId(1500), "mix"),
    ParamDescriptor::time_ms("Pre-Delay", "PreDly", 0.0, 200.0, 20.0)
        .with_id(ParamId(1501), "predelay"),
    ParamDescriptor::time_s("Decay", "Decay", 0.1, 20.0, 2.5)
        .with_id(ParamId(1502), "decay")
        .with_scale(ParamScale::Logarithmic),
    ParamDescriptor::amount("Damping", "Damp", 0.5).with_id(ParamId(1503), "damping"),
    ParamDescriptor::amount("Diffusion", "Diffuse", 0.7).with_id(ParamId(1504), "diffusion"),
    ParamDescriptor::multiplier("Size", "Size", 0.5, 1.5, 1.0).with_id(ParamId(1505), "size"),
    ParamDescriptor::amount("Gate", "Gate", 0.0).with_id(ParamId(1506), "gate"),
    ParamDescriptor::time_ms("Mod Depth", "ModDep", 0.0, 5.0, 1.0)
        .with_id(ParamId(1507), "mod_depth")
        .with_step(0.05),
    ParamDescriptor::frequency_hz("Mod Rate", "ModRate", 0.0, 5.0, 0.5)
        .with_id(ParamId(1508), "mod_rate"),
    ParamDescriptor::frequency_hz("Low Cut", "LowCut", 10.0, 1000.0, 10.0)
        .with_id(ParamId(1509), "low_cut")
        .with_scale(ParamScale::Logarithmic)
        .with_step(1.0),
    ParamDescriptor::amount("Grit", "Grit", 0.0).with_id(ParamId(1510), "grit"),
];

/// Snapshot of every user control.
///
/// Fields are public for convenience; the engine always runs
/// [`sanitized`](Self::sanitized) before deriving coefficients, so any value
/// is safe to store here.
///
/// # Example
///
/// ```rust
/// use plateverb_engine::ReverbParams;
///
/// let params = ReverbParams { decay_s: 99.0, mix: f32::NAN, ..ReverbParams::default() };
/// let clean = params.sanitized();
/// assert_eq!(clean.decay_s, 20.0);
/// assert_eq!(clean.mix, 0.25);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverbParams {
    /// Wet/dry balance, `[0, 1]`.
    pub mix: f32,
    /// Wet-path predelay, `[0, 200]` ms.
    pub predelay_ms: f32,
    /// RT60 decay time, `[0.1, 20]` s.
    pub decay_s: f32,
    /// High-frequency damping, `[0, 1]`.
    pub damping: f32,
    /// Allpass diffusion, `[0, 1]`.
    pub diffusion: f32,
    /// Delay length multiplier, `[0.5, 1.5]`.
    pub size: f32,
    /// Gate threshold control, `[0, 1]`. 0 disables the gate.
    pub gate: f32,
    /// Allpass modulation depth, `[0, 5]` ms.
    pub mod_depth_ms: f32,
    /// LFO rate, `[0, 5]` Hz.
    pub mod_rate_hz: f32,
    /// Pre-tank high-pass cutoff, `[10, 1000]` Hz.
    pub low_cut_hz: f32,
    /// Input saturation, `[0, 1]`. 0 bypasses the saturator.
    pub grit: f32,
}

impl Default for ReverbParams {
    fn default() -> Self {
        let mut params = Self {
            mix: 0.0,
            predelay_ms: 0.0,
            decay_s: 0.0,
            damping: 0.0,
            diffusion: 0.0,
            size: 0.0,
            gate: 0.0,
            mod_depth_ms: 0.0,
            mod_rate_hz: 0.0,
            low_cut_hz: 0.0,
            grit: 0.0,
        };
        for (i, desc) in PARAMS.iter().enumerate() {
            params.set(i, desc.default);
        }
        params
    }
}

impl ReverbParams {
    /// Descriptor for the control at `index`.
    pub fn descriptor(index: usize) -> Option<&'static ParamDescriptor> {
        PARAMS.get(index)
    }

    /// Build a snapshot from host control slots.
    ///
    /// Slot `i` feeds control `i`. `None` (an unconnected port) and missing
    /// trailing slots take the control's default; connected values are
    /// clamped.
    pub fn from_controls(controls: &[Option<f32>]) -> Self {
        let mut params = Self::default();
        for (i, desc) in PARAMS.iter().enumerate() {
            let value = controls.get(i).copied().flatten().unwrap_or(desc.default);
            params.set(i, value);
        }
        params.sanitized()
    }

    /// Copy with every control clamped to its range.
    ///
    /// Non-finite values are replaced by the control's default.
    pub fn sanitized(&self) -> Self {
        let mut out = *self;
        for (i, desc) in PARAMS.iter().enumerate() {
            let value = self.get(i);
            let value = if value.is_finite() { desc.clamp(value) } else { desc.default };
            out.set(i, value);
        }
        out
    }

    /// Value of the control at `index`, or 0 for an unknown index.
    pub fn get(&self, index: usize) -> f32 {
        match index {
            index::MIX => self.mix,
            index::PREDELAY => self.predelay_ms,
            index::DECAY => self.decay_s,
            index::DAMPING => self.damping,
            index::DIFFUSION => self.diffusion,
            index::SIZE => self.size,
            index::GATE => self.gate,
            index::MOD_DEPTH => self.mod_depth_ms,
            index::MOD_RATE => self.mod_rate_hz,
            index::LOW_CUT => self.low_cut_hz,
            index::GRIT => self.grit,
            _ => 0.0,
        }
    }

    /// Store `value` in the control at `index` without clamping.
    ///
    /// Unknown indices are ignored.
    pub fn set(&mut self, index: usize, value: f32) {
        let slot = match index {
            index::MIX => &mut self.mix,
            index::PREDELAY => &mut self.predelay_ms,
            index::DECAY => &mut self.decay_s,
            index::DAMPING => &mut self.damping,
            index::DIFFUSION => &mut self.diffusion,
            index::SIZE => &mut self.size,
            index::GATE => &mut self.gate,
            index::MOD_DEPTH => &mut self.mod_depth_ms,
            index::MOD_RATE => &mut self.mod_rate_hz,
            index::LOW_CUT => &mut self.low_cut_hz,
            index::GRIT => &mut self.grit,
            _ => return,
        };
        *slot = value;
    }

    /// Index of the control whose string id is `string_id`.
    pub fn index_of(string_id: &str) -> Option<usize> {
        PARAMS.iter().position(|d| d.string_id == string_id)
    }
}
