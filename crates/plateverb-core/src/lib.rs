//! Plateverb Core - DSP primitives for the plateverb reverberator
//!
//! This crate provides the per-sample building blocks the reverb engine is
//! assembled from. Everything here is designed for real-time audio: buffers
//! are allocated once at construction and never again.
//!
//! # Core Abstractions
//!
//! ## Effect System
//!
//! - [`Effect`] - Object-safe trait for mono-in, stereo-out processors
//!
//! ## Delay Structures
//!
//! - [`DelayLine`] - Fixed-capacity circular buffer with integer and
//!   interpolated taps
//! - [`CombUnit`] - Feedback comb with damping in the loop
//! - [`AllpassUnit`] - Schroeder allpass diffuser with optional fractional tap
//!
//! ## Filters
//!
//! - [`OnePole`] - One-pole smoothing lowpass (feedback damping)
//! - [`OnePoleHighpass`] - RC high-pass (pre-tank low cut)
//!
//! ## Modulation & Dynamics
//!
//! - [`Lfo`] - Free-running quadrature sine oscillator
//! - [`EnvelopeFollower`] - Asymmetric peak envelope
//! - [`GateController`] - Hysteretic tail gate driving a smoothed gain
//! - [`Saturator`] - Soft-clipping drive stage
//!
//! ## Utilities
//!
//! - Math functions: [`db_to_linear`], [`rt60_to_feedback`], [`soft_clip`], etc.
//! - Parameter metadata: [`ParameterInfo`], [`ParamDescriptor`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! plateverb-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use plateverb_core::{CombUnit, rt60_to_feedback};
//!
//! let mut comb = CombUnit::new(4096);
//! comb.set_delay(1201);
//! comb.set_feedback(rt60_to_feedback(2.5, 1201, 48000.0));
//! comb.set_damping(0.7);
//!
//! let _out = comb.process(1.0, 1.0);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod allpass;
pub mod comb;
pub mod delay;
pub mod effect;
pub mod envelope;
pub mod gate;
pub mod lfo;
pub mod math;
pub mod one_pole;
pub mod param_info;
pub mod saturator;

// Re-export main types at crate root
pub use allpass::{AllpassUnit, MIN_ALLPASS_DELAY};
pub use comb::{CombUnit, MIN_COMB_DELAY};
pub use delay::{AllocError, DelayLine};
pub use effect::Effect;
pub use envelope::EnvelopeFollower;
pub use gate::{GATE_HYSTERESIS, GateController};
pub use lfo::Lfo;
pub use math::{
    db_to_linear, flush_denormal, highpass_coeff, linear_to_db, ms_to_samples, rt60_to_feedback,
    soft_clip, time_constant_coeff, wet_dry_mix,
};
pub use one_pole::{OnePole, OnePoleHighpass};
pub use param_info::{ParamDescriptor, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use saturator::{GRIT_DRIVE_MAX, Saturator};
