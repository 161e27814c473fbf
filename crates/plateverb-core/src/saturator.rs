//! Soft-clipping drive stage ahead of the comb bank.
//!
//! `y = tanh(x · drive)` with `drive = 1 + grit · (GRIT_DRIVE_MAX - 1)`.
//! At grit 0 the stage is skipped entirely so the clean path stays linear
//! and bit-exact.

use crate::soft_clip;

/// Drive gain at full grit.
pub const GRIT_DRIVE_MAX: f32 = 8.0;

/// Grit values at or below this bypass the stage.
const GRIT_EPSILON: f32 = 1e-4;

/// Stateless tanh saturator.
///
/// # Example
///
/// ```rust
/// use plateverb_core::Saturator;
///
/// let mut sat = Saturator::new();
/// assert_eq!(sat.process(0.3), 0.3);
///
/// sat.set_grit(1.0);
/// assert!(sat.process(0.3) > 0.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturator {
    drive: f32,
    active: bool,
}

impl Default for Saturator {
    fn default() -> Self {
        Self::new()
    }
}

impl Saturator {
    /// Create a bypassed saturator.
    pub fn new() -> Self {
        Self {
            drive: 1.0,
            active: false,
        }
    }

    /// Set grit in `[0, 1]`. Out-of-range values are clamped, non-finite ones bypass.
    pub fn set_grit(&mut self, grit: f32) {
        let grit = if grit.is_finite() { grit.clamp(0.0, 1.0) } else { 0.0 };
        self.active = grit > GRIT_EPSILON;
        self.drive = 1.0 + grit * (GRIT_DRIVE_MAX - 1.0);
    }

    /// Current drive gain.
    pub fn drive(&self) -> f32 {
        self.drive
    }

    /// Whether the stage is applied.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Saturate one sample, or pass it through unchanged when bypassed.
    #[inline]
    pub fn process(&self, input: f32) -> f32 {
        if self.active {
            soft_clip(input * self.drive)
        } else {
            input
        }
    }
}
