//! Asymmetric one-pole envelope follower.
//!
//! Tracks the magnitude of its input with separate rise and fall time
//! constants. The tail gate uses two of these: one as a peak detector on the
//! wet signal and one as the smoother that glides its gain between 0 and 1.

use crate::{flush_denormal, time_constant_coeff};

/// Peak envelope follower with separate attack and release times.
///
/// Each time constant becomes a per-sample coefficient
/// `exp(-1 / (fs · τ))`.
///
/// # Example
///
/// ```rust
/// use plateverb_core::EnvelopeFollower;
///
/// let mut env = EnvelopeFollower::with_times(48000.0, 3.0, 50.0);
/// let level = env.process(-0.5);
/// assert!(level > 0.0 && level < 0.5);
/// ```
#[derive(Debug, Clone)]
pub struct EnvelopeFollower {
    /// Current envelope level (linear)
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
}

impl EnvelopeFollower {
    /// Create a follower with the given attack and release times in milliseconds.
    pub fn with_times(sample_rate: f32, attack_ms: f32, release_ms: f32) -> Self {
        Self {
            envelope: 0.0,
            attack_coeff: time_constant_coeff(attack_ms, sample_rate),
            release_coeff: time_constant_coeff(release_ms, sample_rate),
        }
    }

    /// Process a sample and return the updated envelope.
    ///
    /// The input is rectified first. The attack coefficient applies while the
    /// magnitude exceeds the envelope, the release coefficient otherwise.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let input_abs = input.abs();

        let coeff = if input_abs > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };

        // y[n] = coeff * y[n-1] + (1 - coeff) * x[n]
        self.envelope = flush_denormal(coeff * self.envelope + (1.0 - coeff) * input_abs);
        self.envelope
    }

    /// Current envelope level without processing new input.
    pub fn level(&self) -> f32 {
        self.envelope
    }

    /// Force the envelope to `level`.
    pub fn set_level(&mut self, level: f32) {
        self.envelope = level;
    }

    /// Reset the envelope to zero.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}
