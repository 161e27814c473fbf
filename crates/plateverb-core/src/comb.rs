//! Feedback comb unit for the reverb tank.
//!
//! A delay line whose output is damped by a one-pole lowpass and fed back,
//! scaled, into its input. Parallel banks of these form the decaying body of
//! the reverb.
//!
//! ```text
//!  x ──►(+)──► [ delay D ] ──┬──► y
//!        ▲                   │
//!        └── g·s ◄─ [ LP ] ◄─┘
//! ```
//!
//! `s` is an external feedback scale in `[0, 1]`. The tail gate drives it
//! toward zero to cut the decay without touching the dry path.

use crate::OnePole;
use crate::delay::{AllocError, DelayLine};
use crate::flush_denormal;

/// Shortest delay a comb unit will run at, in samples.
pub const MIN_COMB_DELAY: usize = 16;

/// Feedback comb with damping in the loop.
///
/// # Example
///
/// ```rust
/// use plateverb_core::CombUnit;
///
/// let mut comb = CombUnit::new(256);
/// comb.set_delay(100);
/// comb.set_feedback(0.8);
/// comb.set_damping(0.3);
///
/// // Echo of the impulse arrives after exactly 100 samples
/// let first = comb.process(1.0, 1.0);
/// assert_eq!(first, 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct CombUnit {
    delay: DelayLine,
    damping: OnePole,
    feedback: f32,
    delay_samples: usize,
}

impl CombUnit {
    /// Create a comb unit with room for `capacity` samples of delay.
    ///
    /// Capacity is raised to at least `MIN_COMB_DELAY + 1`.
    pub fn new(capacity: usize) -> Self {
        Self::from_delay(DelayLine::new(capacity.max(MIN_COMB_DELAY + 1)))
    }

    /// Create a comb unit, reporting allocation failure.
    pub fn try_new(capacity: usize) -> Result<Self, AllocError> {
        DelayLine::try_new(capacity.max(MIN_COMB_DELAY + 1)).map(Self::from_delay)
    }

    fn from_delay(delay: DelayLine) -> Self {
        let mut comb = Self {
            delay,
            damping: OnePole::new(),
            feedback: 0.0,
            delay_samples: 0,
        };
        comb.set_delay(MIN_COMB_DELAY);
        comb
    }

    /// Set the delay length in samples, clamped to `[MIN_COMB_DELAY, capacity - 1]`.
    #[inline]
    pub fn set_delay(&mut self, samples: usize) {
        let max = self.delay.capacity() - 1;
        self.delay_samples = samples.max(MIN_COMB_DELAY).min(max);
    }

    /// Current delay length in samples.
    #[inline]
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Set the feedback gain, clamped to `[0, 0.9999]`.
    ///
    /// Use [`rt60_to_feedback`](crate::rt60_to_feedback) to derive it from a
    /// decay time.
    #[inline]
    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = if feedback.is_finite() {
            feedback.clamp(0.0, crate::math::MAX_FEEDBACK)
        } else {
            0.0
        };
    }

    /// Current feedback gain.
    #[inline]
    pub fn feedback(&self) -> f32 {
        self.feedback
    }

    /// Set the damping filter coefficient (0 = bright, near 1 = dark).
    #[inline]
    pub fn set_damping(&mut self, coeff: f32) {
        self.damping.set_coeff(coeff);
    }

    /// Current damping coefficient.
    #[inline]
    pub fn damping(&self) -> f32 {
        self.damping.coeff()
    }

    /// Process one sample.
    ///
    /// Returns the undamped delayed sample read before this call's write.
    /// `feedback_scale` multiplies the loop gain for this sample only.
    #[inline]
    pub fn process(&mut self, input: f32, feedback_scale: f32) -> f32 {
        let output = self.delay.read_tap(self.delay_samples);
        let damped = self.damping.process(output);
        self.delay
            .write(flush_denormal(input + self.feedback * feedback_scale * damped));
        output
    }

    /// Silence the delay line and the damping state.
    pub fn clear(&mut self) {
        self.delay.clear();
        self.damping.reset();
    }

    /// Delay capacity in samples.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
