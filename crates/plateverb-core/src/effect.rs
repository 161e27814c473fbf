//! Core Effect trait.
//!
//! The [`Effect`] trait is the seam a host adapter binds to: one mono input
//! stream in, one stereo pair out, processed a sample or a block at a time.
//!
//! ## Design Decisions
//!
//! - **Mono in, stereo out**: The reverb decorrelates a single input into two
//!   channels, so `process` returns a `(left, right)` pair.
//!
//! - **Object-safe**: `dyn Effect` works for runtime dispatch; generic static
//!   dispatch is preferred in the audio path.
//!
//! - **No allocations**: Every method is callable from a real-time context.

/// Core trait for mono-in, stereo-out audio processors.
///
/// # Example
///
/// ```rust
/// use plateverb_core::Effect;
///
/// struct Pan {
///     position: f32,
/// }
///
/// impl Effect for Pan {
///     fn process(&mut self, input: f32) -> (f32, f32) {
///         (input * (1.0 - self.position), input * self.position)
///     }
///
///     fn reset(&mut self) {}
/// }
///
/// let mut pan = Pan { position: 0.25 };
/// assert_eq!(pan.process(1.0), (0.75, 0.25));
/// ```
pub trait Effect {
    /// Process a single input sample into a stereo pair.
    fn process(&mut self, input: f32) -> (f32, f32);

    /// Process a block of samples.
    ///
    /// Runs over the shortest of the three slices; any excess output samples
    /// are left untouched. Implementations may override this to do per-block
    /// work once before the per-sample loop.
    fn process_block(&mut self, input: &[f32], left: &mut [f32], right: &mut [f32]) {
        for ((&x, l), r) in input.iter().zip(left.iter_mut()).zip(right.iter_mut()) {
            (*l, *r) = self.process(x);
        }
    }

    /// Reset internal state to silence without changing parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Default 0.
    fn latency_samples(&self) -> usize {
        0
    }
}
