//! Quadrature sine LFO for allpass modulation.
//!
//! One free-running oscillator feeds every modulated diffuser. The sine output
//! drives the left channel and the cosine output the right, so the two tails
//! wobble a quarter-cycle apart.

use core::f32::consts::TAU;
use libm::{cosf, fmodf, sinf};

/// Low-frequency sine oscillator with sine and cosine outputs.
///
/// Phase is kept in radians in `[0, 2π)` and advanced by `2π·rate/fs` every
/// sample. A rate of 0 freezes the phase.
///
/// # Example
///
/// ```rust
/// use plateverb_core::Lfo;
///
/// let mut lfo = Lfo::new(48000.0, 0.5);
/// let (s, c) = lfo.advance();
/// assert!((s * s + c * c - 1.0).abs() < 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct Lfo {
    /// Current phase in radians
    phase: f32,
    /// Phase increment per sample
    phase_inc: f32,
    sample_rate: f32,
    rate_hz: f32,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(48000.0, 0.5)
    }
}

impl Lfo {
    /// Create an LFO at phase 0.
    pub fn new(sample_rate: f32, rate_hz: f32) -> Self {
        let mut lfo = Self {
            phase: 0.0,
            phase_inc: 0.0,
            sample_rate,
            rate_hz: 0.0,
        };
        lfo.set_rate_hz(rate_hz);
        lfo
    }

    /// Set the oscillation rate in Hz. Negative and non-finite rates become 0.
    pub fn set_rate_hz(&mut self, rate_hz: f32) {
        self.rate_hz = if rate_hz.is_finite() { rate_hz.max(0.0) } else { 0.0 };
        self.phase_inc = TAU * self.rate_hz / self.sample_rate;
    }

    /// Current rate in Hz.
    pub fn rate_hz(&self) -> f32 {
        self.rate_hz
    }

    /// Current phase in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Advance one sample and return `(sin, cos)` of the new phase.
    #[inline]
    pub fn advance(&mut self) -> (f32, f32) {
        self.phase += self.phase_inc;
        if self.phase >= TAU {
            self.phase = fmodf(self.phase, TAU);
        }
        (sinf(self.phase), cosf(self.phase))
    }

    /// Return the phase to 0.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
