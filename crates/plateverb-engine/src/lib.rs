//! Plateverb Engine - Stereo plate reverb built on plateverb-core
//!
//! This crate assembles the core primitives into the reverb:
//!
//! - [`PlateReverb`] - The engine: predelay, comb bank, modulated allpass
//!   diffusion, tail gate and dry/wet mix
//! - [`ReverbParams`] - Snapshot of the eleven user controls
//! - [`BlockCoefficients`] - Values derived once per processing block
//! - [`Tuning`] - Rate-scaled reference lengths and buffer capacities
//!
//! ## Example
//!
//! ```rust
//! use plateverb_core::Effect;
//! use plateverb_engine::{PlateReverb, ReverbParams};
//!
//! let mut reverb = PlateReverb::new(44100.0).expect("allocation");
//! reverb.set_params(ReverbParams { mix: 0.4, decay_s: 3.0, ..ReverbParams::default() });
//!
//! let input = [0.5; 64];
//! let mut left = [0.0; 64];
//! let mut right = [0.0; 64];
//! reverb.process_block(&input, &mut left, &mut right);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod coefficients;
pub mod error;
pub mod params;
pub mod reverb;
pub mod tuning;

// Re-export main types at crate root
pub use coefficients::BlockCoefficients;
pub use error::EngineError;
pub use params::{PARAM_COUNT, PARAMS, ReverbParams};
pub use reverb::PlateReverb;
pub use tuning::Tuning;
