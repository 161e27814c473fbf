//! Schroeder allpass diffuser.
//!
//! Passes every frequency at unity gain while scattering phase, smearing the
//! discrete echoes of the comb bank into a continuous tail.
//!
//! ```text
//! d = delay[D]
//! y = d - a·x
//! u = x + a·y      (written back into the delay)
//! ```
//!
//! The modulated variant reads at a fractional, time-varying tap while still
//! writing at the integer cursor. Slowly wobbling the read position breaks up
//! the periodicity of the comb tail and removes metallic ringing.

use crate::delay::{AllocError, DelayLine};
use crate::flush_denormal;

/// Shortest delay an allpass unit will run at, in samples.
pub const MIN_ALLPASS_DELAY: usize = 8;

/// Coefficient ceiling. The stage is unstable as `|a|` approaches 1.
const MAX_COEFF: f32 = 0.95;

/// Allpass diffuser with an optional modulated fractional tap.
///
/// The delay line is allocated with a guard band above the longest base
/// length so that `base + excursion` never leaves the buffer.
///
/// # Example
///
/// ```rust
/// use plateverb_core::AllpassUnit;
///
/// let mut ap = AllpassUnit::new(600, 0);
/// ap.set_delay(239);
/// ap.set_coeff(0.685);
///
/// let y = ap.process(1.0);
/// assert!((y + 0.685).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct AllpassUnit {
    delay: DelayLine,
    coeff: f32,
    delay_samples: usize,
    guard: usize,
}

impl AllpassUnit {
    /// Create an allpass with `capacity` samples of storage, `guard` of which
    /// are reserved for modulation excursion.
    ///
    /// Capacity is raised so at least `MIN_ALLPASS_DELAY` fits below the guard.
    pub fn new(capacity: usize, guard: usize) -> Self {
        let capacity = Self::min_capacity(capacity, guard);
        Self::from_delay(DelayLine::new(capacity), guard)
    }

    /// Create an allpass, reporting allocation failure.
    pub fn try_new(capacity: usize, guard: usize) -> Result<Self, AllocError> {
        let capacity = Self::min_capacity(capacity, guard);
        DelayLine::try_new(capacity).map(|delay| Self::from_delay(delay, guard))
    }

    fn min_capacity(capacity: usize, guard: usize) -> usize {
        capacity.max(MIN_ALLPASS_DELAY + guard + 2)
    }

    fn from_delay(delay: DelayLine, guard: usize) -> Self {
        let mut allpass = Self {
            delay,
            coeff: 0.5,
            delay_samples: 0,
            guard,
        };
        allpass.set_delay(MIN_ALLPASS_DELAY);
        allpass
    }

    /// Set the base delay length, clamped to
    /// `[MIN_ALLPASS_DELAY, capacity - 1 - guard]`.
    #[inline]
    pub fn set_delay(&mut self, samples: usize) {
        let max = self.delay.capacity() - 1 - self.guard;
        self.delay_samples = samples.max(MIN_ALLPASS_DELAY).min(max);
    }

    /// Current base delay length in samples.
    #[inline]
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Samples reserved above the longest base length for modulation.
    #[inline]
    pub fn guard(&self) -> usize {
        self.guard
    }

    /// Set the diffusion coefficient, clamped to `[-0.95, 0.95]`.
    #[inline]
    pub fn set_coeff(&mut self, coeff: f32) {
        self.coeff = if coeff.is_finite() {
            coeff.clamp(-MAX_COEFF, MAX_COEFF)
        } else {
            0.0
        };
    }

    /// Current diffusion coefficient.
    #[inline]
    pub fn coeff(&self) -> f32 {
        self.coeff
    }

    /// Process one sample at the integer base tap.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.delay.read_tap(self.delay_samples);
        self.diffuse(input, delayed)
    }

    /// Process one sample reading at `base + excursion` samples.
    ///
    /// The effective tap is clamped to `[MIN_ALLPASS_DELAY, capacity - 2]`.
    /// Callers scale the excursion to fit; the clamp is the backstop. An
    /// excursion of exactly 0 matches [`process`](Self::process).
    #[inline]
    pub fn process_modulated(&mut self, input: f32, excursion: f32) -> f32 {
        let max_tap = (self.delay.capacity() - 2) as f32;
        let tap = (self.delay_samples as f32 + excursion).clamp(MIN_ALLPASS_DELAY as f32, max_tap);
        let delayed = self.delay.read_interpolated(tap);
        self.diffuse(input, delayed)
    }

    #[inline]
    fn diffuse(&mut self, input: f32, delayed: f32) -> f32 {
        let output = delayed - self.coeff * input;
        self.delay
            .write(flush_denormal(input + self.coeff * output));
        output
    }

    /// Silence the delay line.
    pub fn clear(&mut self) {
        self.delay.clear();
    }

    /// Delay capacity in samples, guard band included.
    pub fn capacity(&self) -> usize {
        self.delay.capacity()
    }
}
