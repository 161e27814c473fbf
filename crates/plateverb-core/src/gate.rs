//! Hysteretic tail gate.
//!
//! Follows the peak level of the wet signal and drives a smoothed gain that
//! scales the comb feedback. When the reverb's own output falls below the
//! close threshold the gain glides to zero and the tail is cut off, while
//! the dry path is untouched.
//!
//! ## State Machine
//!
//! ```text
//!              env >= open
//!     ┌────────────────────────────┐
//!     │                            ▼
//! [target 0]                  [target 1]
//!     ▲                            │
//!     └────────────────────────────┘
//!              env <= close
//! ```
//!
//! Between the close threshold (`open × 0.7`, about 3 dB lower) and the open
//! threshold the previous target is held. The dead zone keeps the gate from
//! chattering when the envelope hovers near a single threshold.

use crate::{EnvelopeFollower, db_to_linear};

/// Ratio between the close and open thresholds.
pub const GATE_HYSTERESIS: f32 = 0.7;

/// Gate control values at or below this bypass the gate entirely.
const GATE_EPSILON: f32 = 1e-4;

/// Open threshold at gate control 0, in dB.
const THRESHOLD_FLOOR_DB: f32 = -60.0;

/// Threshold span covered by the gate control, in dB.
const THRESHOLD_RANGE_DB: f32 = 60.0;

const ENVELOPE_ATTACK_MS: f32 = 3.0;
const ENVELOPE_RELEASE_MS: f32 = 50.0;
const GAIN_OPEN_MS: f32 = 2.0;
const GAIN_CLOSE_MS: f32 = 20.0;

/// Stereo-linked tail gate with hysteresis.
///
/// # Example
///
/// ```rust
/// use plateverb_core::GateController;
///
/// let mut gate = GateController::new(48000.0);
/// assert!(!gate.is_enabled());
/// assert_eq!(gate.feedback_scale(), 1.0);
///
/// gate.set_gate(0.5);
/// assert!(gate.is_enabled());
/// let gain = gate.process(0.0);
/// assert!(gain <= 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct GateController {
    envelope: EnvelopeFollower,
    gain: EnvelopeFollower,
    target: f32,
    open_threshold: f32,
    close_threshold: f32,
    enabled: bool,
}

impl GateController {
    /// Create a disabled gate: gain 1, envelope 0.
    pub fn new(sample_rate: f32) -> Self {
        let mut gate = Self {
            envelope: EnvelopeFollower::with_times(
                sample_rate,
                ENVELOPE_ATTACK_MS,
                ENVELOPE_RELEASE_MS,
            ),
            gain: EnvelopeFollower::with_times(sample_rate, GAIN_OPEN_MS, GAIN_CLOSE_MS),
            target: 1.0,
            open_threshold: 0.0,
            close_threshold: 0.0,
            enabled: false,
        };
        gate.set_gate(0.0);
        gate.reset();
        gate
    }

    /// Set the gate control in `[0, 1]`.
    ///
    /// The open threshold is `-60 + 60·gate` dB. Values at or below `1e-4`
    /// disable the gate.
    pub fn set_gate(&mut self, gate: f32) {
        let gate = if gate.is_finite() { gate.clamp(0.0, 1.0) } else { 0.0 };
        self.enabled = gate > GATE_EPSILON;
        self.open_threshold = db_to_linear(THRESHOLD_FLOOR_DB + THRESHOLD_RANGE_DB * gate);
        self.close_threshold = self.open_threshold * GATE_HYSTERESIS;
    }

    /// Update the envelope from the current peak magnitude and return the
    /// smoothed gain.
    ///
    /// Returns 1 without touching any state when the gate is disabled.
    #[inline]
    pub fn process(&mut self, peak: f32) -> f32 {
        if !self.enabled {
            return 1.0;
        }

        let env = self.envelope.process(peak);
        if env >= self.open_threshold {
            self.target = 1.0;
        } else if env <= self.close_threshold {
            self.target = 0.0;
        }

        self.gain.process(self.target)
    }

    /// Multiplier for the comb feedback path: the current gain, or 1 when disabled.
    #[inline]
    pub fn feedback_scale(&self) -> f32 {
        if self.enabled { self.gain.level() } else { 1.0 }
    }

    /// Whether the gate is active.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Current peak envelope.
    pub fn envelope(&self) -> f32 {
        self.envelope.level()
    }

    /// Target the gain is gliding toward (0 or 1).
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Current smoothed gain.
    pub fn gain(&self) -> f32 {
        self.gain.level()
    }

    /// Linear level at or above which the gate opens.
    pub fn open_threshold(&self) -> f32 {
        self.open_threshold
    }

    /// Linear level at or below which the gate closes.
    pub fn close_threshold(&self) -> f32 {
        self.close_threshold
    }

    /// Envelope to 0, gain and target fully open.
    pub fn reset(&mut self) {
        self.envelope.reset();
        self.gain.set_level(1.0);
        self.target = 1.0;
    }
}
