//! Fixed tuning tables and buffer sizing.
//!
//! Every base delay length is tuned at 48 kHz and scaled to the running rate.
//! The lengths are mutually near-prime across units and channels so that no
//! two combs resonate on the same period. Buffer capacities come from fixed
//! maximum durations and never change after construction.

use libm::{ceilf, roundf};
use plateverb_core::{MIN_ALLPASS_DELAY, MIN_COMB_DELAY, ms_to_samples};

/// Rate the reference lengths were tuned at.
pub const REFERENCE_RATE: f32 = 48000.0;

/// Rate used when the host supplies a non-finite or non-positive rate.
pub const FALLBACK_SAMPLE_RATE: f32 = 48000.0;

/// Output channels.
pub const CHANNELS: usize = 2;

/// Parallel combs per channel.
pub const COMBS_PER_CHANNEL: usize = 4;

/// Cascaded allpass diffusers per channel.
pub const ALLPASSES_PER_CHANNEL: usize = 2;

/// Comb lengths at 48 kHz, left then right.
pub const COMB_REFERENCE: [[usize; COMBS_PER_CHANNEL]; CHANNELS] =
    [[1201, 1553, 1867, 2203], [1319, 1613, 1973, 2411]];

/// Allpass lengths at 48 kHz, left then right.
pub const ALLPASS_REFERENCE: [[usize; ALLPASSES_PER_CHANNEL]; CHANNELS] =
    [[239, 421], [263, 463]];

/// Predelay buffer duration. The control tops out at 200 ms.
pub const MAX_PREDELAY_MS: f32 = 220.0;

/// Comb buffer duration.
pub const MAX_COMB_MS: f32 = 80.0;

/// Allpass buffer duration, excluding the modulation guard band.
pub const MAX_ALLPASS_MS: f32 = 50.0;

/// Largest modulation excursion the guard band accommodates.
pub const MAX_MOD_DEPTH_MS: f32 = 5.0;

/// Replaces an unusable sample rate with [`FALLBACK_SAMPLE_RATE`].
///
/// Returns the rate to use and whether the fallback was taken.
pub fn sanitize_sample_rate(sample_rate: f32) -> (f32, bool) {
    if sample_rate.is_finite() && sample_rate > 1.0 {
        (sample_rate, false)
    } else {
        (FALLBACK_SAMPLE_RATE, true)
    }
}

/// Buffer length for `ms` milliseconds at `sample_rate`: `floor(ms·fs/1000) + 4`.
pub fn capacity_for_ms(ms: f32, sample_rate: f32) -> usize {
    ms_to_samples(ms, sample_rate) as usize + 4
}

/// Rate-scaled base lengths and buffer capacities for one sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuning {
    sample_rate: f32,
    comb_lengths: [[usize; COMBS_PER_CHANNEL]; CHANNELS],
    allpass_lengths: [[usize; ALLPASSES_PER_CHANNEL]; CHANNELS],
    predelay_capacity: usize,
    comb_capacity: usize,
    allpass_capacity: usize,
    guard: usize,
}

impl Tuning {
    /// Scale the reference tables to `sample_rate`.
    ///
    /// Unusable rates fall back to 48 kHz (see [`sanitize_sample_rate`]).
    pub fn new(sample_rate: f32) -> Self {
        let (sample_rate, _) = sanitize_sample_rate(sample_rate);
        let ratio = sample_rate / REFERENCE_RATE;
        let scale = |reference: usize| (roundf(reference as f32 * ratio) as usize).max(1);

        let guard = ceilf(ms_to_samples(MAX_MOD_DEPTH_MS, sample_rate)) as usize + 2;

        Self {
            sample_rate,
            comb_lengths: COMB_REFERENCE.map(|channel| channel.map(scale)),
            allpass_lengths: ALLPASS_REFERENCE.map(|channel| channel.map(scale)),
            predelay_capacity: capacity_for_ms(MAX_PREDELAY_MS, sample_rate).max(2),
            comb_capacity: capacity_for_ms(MAX_COMB_MS, sample_rate).max(MIN_COMB_DELAY + 1),
            allpass_capacity: (capacity_for_ms(MAX_ALLPASS_MS, sample_rate) + guard)
                .max(MIN_ALLPASS_DELAY + guard + 2),
            guard,
        }
    }

    /// Sample rate the tables were scaled to.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Base comb lengths in samples, per channel.
    pub fn comb_lengths(&self) -> &[[usize; COMBS_PER_CHANNEL]; CHANNELS] {
        &self.comb_lengths
    }

    /// Base allpass lengths in samples, per channel.
    pub fn allpass_lengths(&self) -> &[[usize; ALLPASSES_PER_CHANNEL]; CHANNELS] {
        &self.allpass_lengths
    }

    /// Predelay buffer capacity in samples.
    pub fn predelay_capacity(&self) -> usize {
        self.predelay_capacity
    }

    /// Capacity of every comb buffer in samples.
    pub fn comb_capacity(&self) -> usize {
        self.comb_capacity
    }

    /// Capacity of every allpass buffer in samples, guard band included.
    pub fn allpass_capacity(&self) -> usize {
        self.allpass_capacity
    }

    /// Samples reserved above the longest allpass length for modulation.
    pub fn guard(&self) -> usize {
        self.guard
    }

    /// Longest predelay tap the buffer supports.
    ///
    /// The engine reads one slot past the tap, so this stays two below capacity.
    pub fn max_predelay_tap(&self) -> usize {
        self.predelay_capacity - 2
    }

    /// Longest comb delay the buffers support.
    pub fn max_comb_delay(&self) -> usize {
        self.comb_capacity - 1
    }

    /// Longest allpass base delay the buffers support.
    pub fn max_allpass_delay(&self) -> usize {
        self.allpass_capacity - 1 - self.guard
    }

    /// Largest modulation excursion in samples that keeps the tap inside the guard band.
    pub fn max_excursion(&self) -> f32 {
        (self.guard - 2) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_rate_is_identity() {
        let tuning = Tuning::new(48000.0);
        assert_eq!(tuning.comb_lengths(), &COMB_REFERENCE);
        assert_eq!(tuning.allpass_lengths(), &ALLPASS_REFERENCE);
        assert_eq!(tuning.comb_capacity(), 3844);
        assert_eq!(tuning.predelay_capacity(), 10564);
        assert_eq!(tuning.guard(), 242);
        assert_eq!(tuning.allpass_capacity(), 2404 + 242);
    }

    #[test]
    fn test_scaling_to_44k() {
        let tuning = Tuning::new(44100.0);
        // 1201 · 44100/48000 = 1103.4
        assert_eq!(tuning.comb_lengths()[0][0], 1103);
        assert_eq!(tuning.allpass_lengths()[1][1], 425);
    }

    #[test]
    fn test_invalid_rates_fall_back() {
        for fs in [0.0, 1.0, -48000.0, f32::NAN, f32::INFINITY] {
            let (rate, fell_back) = sanitize_sample_rate(fs);
            assert!(fell_back, "{fs} should fall back");
            assert_eq!(rate, FALLBACK_SAMPLE_RATE);
            assert_eq!(Tuning::new(fs), Tuning::new(48000.0));
        }
        assert_eq!(sanitize_sample_rate(1.5), (1.5, false));
    }

    #[test]
    fn test_tiny_rate_still_has_room() {
        let tuning = Tuning::new(2.0);
        assert!(tuning.comb_capacity() > MIN_COMB_DELAY);
        assert!(tuning.max_allpass_delay() >= MIN_ALLPASS_DELAY);
        assert!(tuning.max_excursion() >= 0.0);
        assert!(tuning.max_predelay_tap() + 1 < tuning.predelay_capacity());
    }

    #[test]
    fn test_lengths_are_distinct() {
        let tuning = Tuning::new(48000.0);
        let mut all: [usize; 8] = [0; 8];
        for (i, len) in tuning.comb_lengths().iter().flatten().enumerate() {
            all[i] = *len;
        }
        all.sort_unstable();
        assert!(all.windows(2).all(|w| w[0] != w[1]));
    }
}
