//! One-pole filters for feedback damping and the pre-tank low cut.
//!
//! The lowpass is a single-state exponential smoother:
//!
//! ```text
//! y[n] = (1 - a) * x[n] + a * y[n-1]
//! ```
//!
//! `a` near 0 passes the signal unchanged; `a` near 1 smooths heavily. Inside
//! a comb feedback loop this models high-frequency absorption.
//!
//! The high-pass is the RC complement of the same primitive:
//!
//! ```text
//! y[n] = a * (y[n-1] + x[n] - x[n-1]),   a = rc / (rc + dt)
//! ```
//!
//! Both coefficients are set once per processing block.
//!
//! # Usage
//!
//! ```rust
//! use plateverb_core::{OnePole, OnePoleHighpass};
//!
//! let mut damp = OnePole::with_coeff(0.74);
//! let darkened = damp.process(1.0);
//! assert!(darkened < 1.0);
//!
//! let mut low_cut = OnePoleHighpass::new();
//! low_cut.set_cutoff(80.0, 48000.0);
//! let _y = low_cut.process(1.0);
//! ```

use crate::{flush_denormal, highpass_coeff};

/// Upper bound on the lowpass coefficient. Keeps the pole inside the unit circle.
const MAX_COEFF: f32 = 0.9999;

/// One-pole (6 dB/oct) smoothing lowpass.
///
/// # Invariants
///
/// - `coeff` is always in `[0, 0.9999]`
/// - `state` is flushed to zero when below 1e-20 (denormal protection)
#[derive(Debug, Clone, Default)]
pub struct OnePole {
    state: f32,
    coeff: f32,
}

impl OnePole {
    /// Creates a transparent filter (`coeff = 0`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter with the given smoothing coefficient.
    pub fn with_coeff(coeff: f32) -> Self {
        let mut filter = Self::new();
        filter.set_coeff(coeff);
        filter
    }

    /// Sets the smoothing coefficient, clamped to `[0, 0.9999]`.
    ///
    /// Non-finite values fall back to 0 (no smoothing).
    pub fn set_coeff(&mut self, coeff: f32) {
        self.coeff = if coeff.is_finite() {
            coeff.clamp(0.0, MAX_COEFF)
        } else {
            0.0
        };
    }

    /// Returns the current smoothing coefficient.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Process one sample through the lowpass filter.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        // y[n] = x[n] + coeff * (y[n-1] - x[n])
        self.state = flush_denormal(input + self.coeff * (self.state - input));
        self.state
    }

    /// Reset filter state to zero.
    pub fn reset(&mut self) {
        self.state = 0.0;
    }
}

/// RC one-pole high-pass.
///
/// Blocks DC and rumble ahead of the comb bank. The state pair holds the
/// previous input and output.
#[derive(Debug, Clone)]
pub struct OnePoleHighpass {
    x1: f32,
    y1: f32,
    coeff: f32,
}

impl Default for OnePoleHighpass {
    fn default() -> Self {
        Self::new()
    }
}

impl OnePoleHighpass {
    /// Creates a high-pass with `coeff = 1` (DC blocker with infinite time constant).
    pub fn new() -> Self {
        Self {
            x1: 0.0,
            y1: 0.0,
            coeff: 1.0,
        }
    }

    /// Sets the coefficient directly, clamped to `[0, 1]`.
    pub fn set_coeff(&mut self, coeff: f32) {
        self.coeff = if coeff.is_finite() {
            coeff.clamp(0.0, 1.0)
        } else {
            1.0
        };
    }

    /// Sets the coefficient from a cutoff frequency.
    pub fn set_cutoff(&mut self, cutoff_hz: f32, sample_rate: f32) {
        self.set_coeff(highpass_coeff(cutoff_hz, sample_rate));
    }

    /// Returns the current coefficient.
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Process one sample through the high-pass.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let y = flush_denormal(self.coeff * (self.y1 + input - self.x1));
        self.x1 = input;
        self.y1 = y;
        y
    }

    /// Clear both state values.
    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}
