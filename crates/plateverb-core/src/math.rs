//! Mathematical utility functions for DSP.
//!
//! Every function here is allocation-free and `no_std` compatible. The
//! coefficient helpers are evaluated once per processing block; the rest are
//! cheap enough for the per-sample path.
//!
//! # Level Conversions
//!
//! - [`db_to_linear`] / [`linear_to_db`] - Convert between dB and linear gain
//!
//! # Coefficient Derivation
//!
//! - [`rt60_to_feedback`] - Comb feedback gain from a decay time
//! - [`time_constant_coeff`] - One-pole smoothing coefficient from milliseconds
//! - [`highpass_coeff`] - RC high-pass coefficient from a cutoff frequency
//!
//! # Per-Sample Helpers
//!
//! - [`soft_clip`] - Bounded tanh compressor
//! - [`flush_denormal`] - Subnormal suppression for feedback paths
//! - [`wet_dry_mix`] - Linear crossfade

use libm::{expf, logf, tanhf};

/// Shortest decay time accepted by [`rt60_to_feedback`], in seconds.
pub const MIN_RT60: f32 = 0.05;

/// Largest comb feedback gain ever produced. Keeps every comb strictly stable.
pub const MAX_FEEDBACK: f32 = 0.9999;

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use plateverb_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-60.0) - 0.001).abs() < 1e-6);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels.
///
/// Inputs at or below `1e-10` are floored there, so silence maps to -200 dB
/// rather than negative infinity.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Hyperbolic-tangent soft clipper.
///
/// Monotonic, odd-symmetric and bounded in `(-1, 1)`. Near zero it is close
/// to unity gain.
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    tanhf(x)
}

/// Convert milliseconds to a (fractional) sample count.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Flush subnormal-range values to zero.
///
/// Feedback loops decaying toward silence eventually produce subnormal floats,
/// which are dramatically slower on most CPUs. Anything below `1e-20` in
/// magnitude is inaudible (about -400 dBFS) and is replaced by exact zero.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals: `(1 - mix) · dry + mix · wet`.
///
/// Exact at both ends: `mix = 0` returns `dry` and `mix = 1` returns `wet`
/// for any finite inputs.
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    (1.0 - mix) * dry + mix * wet
}

/// Per-sample coefficient of a one-pole smoother with the given time constant.
///
/// `coeff = exp(-1 / (fs · τ))`. A non-positive time constant yields 0
/// (instant response).
///
/// # Example
/// ```rust
/// use plateverb_core::time_constant_coeff;
///
/// let attack = time_constant_coeff(3.0, 48000.0);
/// let release = time_constant_coeff(50.0, 48000.0);
/// assert!(attack < release);
/// assert_eq!(time_constant_coeff(0.0, 48000.0), 0.0);
/// ```
#[inline]
pub fn time_constant_coeff(time_ms: f32, sample_rate: f32) -> f32 {
    let samples = ms_to_samples(time_ms, sample_rate);
    if samples > 0.0 {
        expf(-1.0 / samples)
    } else {
        0.0
    }
}

/// Feedback gain giving a comb of `delay_samples` a decay time of `rt60` seconds.
///
/// Solves `g^(fs·RT60 / D) = 10^-3` for `g`:
///
/// ```text
/// g = 10^(-3·D / (RT60·fs))
/// ```
///
/// `rt60` is floored at [`MIN_RT60`] and the result is clamped to
/// `[0, MAX_FEEDBACK]`.
///
/// # Example
/// ```rust
/// use plateverb_core::rt60_to_feedback;
///
/// let g = rt60_to_feedback(2.5, 1201, 48000.0);
/// assert!(g > 0.9 && g < 1.0);
/// ```
#[inline]
pub fn rt60_to_feedback(rt60: f32, delay_samples: usize, sample_rate: f32) -> f32 {
    let rt60 = rt60.max(MIN_RT60);
    let exponent = -3.0 * delay_samples as f32 / (rt60 * sample_rate);
    let g = expf(exponent * core::f32::consts::LN_10);
    g.clamp(0.0, MAX_FEEDBACK)
}

/// RC high-pass coefficient for a cutoff of `cutoff_hz`.
///
/// `a = rc / (rc + dt)` with `rc = 1 / (2π·fc)` and `dt = 1 / fs`.
/// Lower cutoffs push `a` toward 1 (less filtering).
#[inline]
pub fn highpass_coeff(cutoff_hz: f32, sample_rate: f32) -> f32 {
    let rc = 1.0 / (core::f32::consts::TAU * cutoff_hz.max(1e-3));
    let dt = 1.0 / sample_rate;
    rc / (rc + dt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_linear_roundtrip() {
        for db in [-60.0, -20.0, -6.0, 0.0, 6.0, 12.0] {
            let back = linear_to_db(db_to_linear(db));
            assert!((back - db).abs() < 0.01, "{db} dB came back as {back}");
        }
    }

    #[test]
    fn test_linear_to_db_silence_floor() {
        assert!((linear_to_db(0.0) - (-200.0)).abs() < 0.01);
    }

    #[test]
    fn test_soft_clip_bounds() {
        for x in [-100.0, -3.0, -0.5, 0.0, 0.5, 3.0, 100.0] {
            let y = soft_clip(x);
            assert!(y.abs() <= 1.0, "soft_clip({x}) = {y}");
        }
        assert!(soft_clip(1.0) < soft_clip(2.0));
    }

    #[test]
    fn test_ms_samples_conversion() {
        assert_eq!(ms_to_samples(1000.0, 48000.0), 48000.0);
        assert_eq!(ms_to_samples(20.0, 48000.0), 960.0);
    }

    #[test]
    fn test_wet_dry_mix() {
        assert_eq!(wet_dry_mix(0.3, 0.9, 0.0), 0.3);
        assert_eq!(wet_dry_mix(0.3, 0.9, 1.0), 0.9);
        assert!((wet_dry_mix(0.0, 1.0, 0.25) - 0.25).abs() < 1e-7);
    }

    #[test]
    fn test_wet_dry_mix_endpoints_are_exact() {
        // A tiny wet signal next to a loud dry one must survive at full wet
        assert_eq!(wet_dry_mix(1.0, 1e-9, 1.0), 1e-9);
        assert_eq!(wet_dry_mix(-0.8, 3e-7, 1.0), 3e-7);
        assert_eq!(wet_dry_mix(1e-9, 1.0, 0.0), 1e-9);
    }

    #[test]
    fn test_flush_denormal() {
        assert_eq!(flush_denormal(1.0), 1.0);
        assert_eq!(flush_denormal(-0.5), -0.5);
        assert_eq!(flush_denormal(1e-10), 1e-10);

        assert_eq!(flush_denormal(1e-21), 0.0);
        assert_eq!(flush_denormal(-1e-21), 0.0);
        assert_eq!(flush_denormal(1e-38), 0.0);
    }

    #[test]
    fn test_time_constant_coeff() {
        // One time constant of samples: e^-1
        let c = time_constant_coeff(1.0, 1000.0);
        assert!((c - libm::expf(-1.0)).abs() < 1e-6);
        assert_eq!(time_constant_coeff(-5.0, 48000.0), 0.0);
    }

    #[test]
    fn test_rt60_feedback_reaches_minus_60_db() {
        let fs = 48000.0;
        for (rt60, d) in [(0.5, 1201), (2.5, 1553), (10.0, 2411)] {
            let g = rt60_to_feedback(rt60, d, fs);
            // Number of round trips in RT60 seconds
            let trips = rt60 * fs / d as f32;
            let level = libm::powf(g, trips);
            assert!(
                (level - 1e-3).abs() < 1e-4,
                "rt60={rt60} d={d}: level {level}"
            );
        }
    }

    #[test]
    fn test_rt60_feedback_clamps() {
        // Enormous decay saturates at the stability ceiling
        assert_eq!(rt60_to_feedback(1e9, 16, 192000.0), MAX_FEEDBACK);
        // Tiny decay is floored rather than dividing by zero
        let floor = rt60_to_feedback(0.0, 1200, 48000.0);
        assert_eq!(floor, rt60_to_feedback(MIN_RT60, 1200, 48000.0));
        assert!(floor >= 0.0);
    }

    #[test]
    fn test_highpass_coeff_range() {
        let low = highpass_coeff(10.0, 48000.0);
        let high = highpass_coeff(1000.0, 48000.0);
        assert!(low > high);
        assert!(low < 1.0 && high > 0.0);
        // 10 Hz at 48k: rc/(rc+dt) ≈ 0.99869
        assert!((low - 0.998_69).abs() < 1e-4);
    }
}
