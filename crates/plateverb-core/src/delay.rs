//! Fixed-capacity circular delay line.
//!
//! The delay line is the storage primitive behind every time-based stage of
//! the reverb: predelay, comb units and allpass diffusers all own one.
//!
//! # Tap Convention
//!
//! The write cursor always points at the slot the *next* sample will occupy.
//! A read at tap `D` returns the value written `D` steps before that next
//! write, so `read_tap(1)` is the most recently written sample and
//! `read_tap(D)` followed by `write(x)` forms a `D`-sample delay.
//!
//! ```text
//!            read_tap(3)   read_tap(1)
//!                 │             │
//!   ... [ s0 ][ s1 ][ s2 ][ s3 ][ s4 ][ ... ]
//!                                  ▲
//!                              write_pos
//! ```
//!
//! # Bounds
//!
//! Taps must satisfy `tap < capacity` (integer) or `tap <= capacity - 2`
//! (interpolated). Callers clamp; the checks here are `debug_assert!` only.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;

/// Construction-time allocation failure.
///
/// Returned by [`DelayLine::try_new`] when the buffer cannot be reserved.
/// This is the only fault a delay line ever reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    /// Requested capacity in samples.
    pub samples: usize,
}

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "failed to allocate delay line of {} samples", self.samples)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocError {}

/// Circular sample buffer with integer and linearly interpolated taps.
///
/// # Memory
///
/// The buffer is allocated once at construction and never reallocated.
/// No allocations occur during audio processing.
///
/// # Example
///
/// ```rust
/// use plateverb_core::DelayLine;
///
/// let mut delay = DelayLine::new(64);
/// delay.write(1.0);
/// delay.write(2.0);
/// delay.write(3.0);
///
/// assert_eq!(delay.read_tap(3), 1.0);
/// assert_eq!(delay.read_interpolated(1.5), 2.5);
/// ```
#[derive(Debug, Clone)]
pub struct DelayLine {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Slot the next sample is written to, always in `[0, capacity)`
    write_pos: usize,
}

impl DelayLine {
    /// Creates a silent delay line holding `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is 0, or aborts if the allocation fails.
    /// Use [`try_new`](Self::try_new) where allocation failure must be reported.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Delay size must be > 0");

        Self {
            buffer: alloc::vec![0.0; capacity],
            write_pos: 0,
        }
    }

    /// Creates a silent delay line, reporting allocation failure instead of aborting.
    ///
    /// A zero capacity is rounded up to one sample.
    pub fn try_new(capacity: usize) -> Result<Self, AllocError> {
        let capacity = capacity.max(1);
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(capacity).map_err(|_| {
            #[cfg(feature = "tracing")]
            tracing::warn!("delay_line: allocation of {capacity} samples failed");
            AllocError { samples: capacity }
        })?;
        buffer.resize(capacity, 0.0);

        Ok(Self {
            buffer,
            write_pos: 0,
        })
    }

    /// Writes a sample at the cursor and advances it, wrapping at capacity.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos += 1;
        if self.write_pos == self.buffer.len() {
            self.write_pos = 0;
        }
    }

    /// Reads the sample written `tap` steps before the next write.
    ///
    /// `tap` must be strictly less than [`capacity`](Self::capacity).
    /// `read_tap(0)` addresses the oldest slot, which the next write overwrites.
    #[inline]
    pub fn read_tap(&self, tap: usize) -> f32 {
        let len = self.buffer.len();
        debug_assert!(tap < len, "tap {tap} out of range for capacity {len}");

        let mut read_pos = self.write_pos + len - tap;
        if read_pos >= len {
            read_pos -= len;
        }
        self.buffer[read_pos]
    }

    /// Reads at a fractional tap using linear interpolation.
    ///
    /// Blends the two integer taps around `tap` by its fractional part.
    /// `tap` must lie in `[0, capacity - 2]`. A whole-number `tap` returns
    /// exactly the same value as [`read_tap`](Self::read_tap).
    #[inline]
    pub fn read_interpolated(&self, tap: f32) -> f32 {
        debug_assert!(tap >= 0.0);

        let tap_int = tap as usize;
        let frac = tap - tap_int as f32;

        let a = self.read_tap(tap_int);
        let b = self.read_tap(tap_int + 1);
        a + (b - a) * frac
    }

    /// Clears the delay line to silence and rewinds the cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Returns the capacity in samples.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the current write cursor.
    pub fn write_pos(&self) -> usize {
        self.write_pos
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_basic() {
        let mut delay = DelayLine::new(10);

        for i in 1..=6 {
            delay.write(i as f32);
        }

        // Last written sample sits at tap 1
        assert_eq!(delay.read_tap(1), 6.0);
        assert_eq!(delay.read_tap(3), 4.0);
    }

    #[test]
    fn test_delay_round_trip() {
        // Writing N distinct samples then reading tap N yields the first one
        for n in 1..32 {
            let mut delay = DelayLine::new(32);
            for i in 0..n {
                delay.write(100.0 + i as f32);
            }
            assert_eq!(delay.read_tap(n), 100.0, "round trip failed for N = {n}");
        }
    }

    #[test]
    fn test_delay_wrap() {
        let mut delay = DelayLine::new(4);

        delay.write(1.0);
        delay.write(2.0);
        delay.write(3.0);
        delay.write(4.0);
        assert_eq!(delay.write_pos(), 0);

        delay.write(5.0);

        // Tap that crosses the wrap boundary
        assert_eq!(delay.read_tap(2), 4.0);
        assert_eq!(delay.read_tap(3), 3.0);
    }

    #[test]
    fn test_read_then_write_is_fixed_delay() {
        let mut delay = DelayLine::new(16);
        let d = 5;
        let mut outputs = [0.0f32; 12];

        for (i, out) in outputs.iter_mut().enumerate() {
            let input = if i == 0 { 1.0 } else { 0.0 };
            *out = delay.read_tap(d);
            delay.write(input);
        }

        for (i, &out) in outputs.iter().enumerate() {
            let expected = if i == d { 1.0 } else { 0.0 };
            assert_eq!(out, expected, "sample {i}");
        }
    }

    #[test]
    fn test_tap_zero_is_oldest_slot() {
        let mut delay = DelayLine::new(4);
        for i in 0..4 {
            delay.write(i as f32 + 1.0);
        }
        assert_eq!(delay.read_tap(0), 1.0);
    }

    #[test]
    fn test_interpolation() {
        let mut delay = DelayLine::new(10);

        delay.write(0.0);
        delay.write(1.0);
        delay.write(2.0);
        delay.write(3.0);

        // Between tap 1 (3.0) and tap 2 (2.0)
        let output = delay.read_interpolated(1.5);
        assert!((output - 2.5).abs() < 1e-6, "Expected 2.5, got {}", output);

        let quarter = delay.read_interpolated(2.25);
        assert!((quarter - 1.75).abs() < 1e-6, "Expected 1.75, got {}", quarter);
    }

    #[test]
    fn test_interpolation_whole_tap_matches_integer_read() {
        let mut delay = DelayLine::new(16);
        for i in 0..20 {
            delay.write(libm::sinf(i as f32 * 0.37));
        }
        for tap in 1..14 {
            assert_eq!(delay.read_interpolated(tap as f32), delay.read_tap(tap));
        }
    }

    #[test]
    fn test_clear() {
        let mut delay = DelayLine::new(8);
        for _ in 0..11 {
            delay.write(1.0);
        }

        delay.clear();

        assert_eq!(delay.write_pos(), 0);
        for tap in 0..8 {
            assert_eq!(delay.read_tap(tap), 0.0);
        }
    }

    #[test]
    fn test_try_new() {
        let delay = DelayLine::try_new(480).expect("small allocation should succeed");
        assert_eq!(delay.capacity(), 480);

        let tiny = DelayLine::try_new(0).expect("zero rounds up");
        assert_eq!(tiny.capacity(), 1);
    }

    #[test]
    fn test_try_new_reports_impossible_allocation() {
        let err = DelayLine::try_new(usize::MAX / 2).unwrap_err();
        assert_eq!(err.samples, usize::MAX / 2);
    }

    #[test]
    #[should_panic]
    fn test_delay_zero_size_panics() {
        let _delay = DelayLine::new(0);
    }
}
