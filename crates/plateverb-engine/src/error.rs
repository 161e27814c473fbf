//! Engine construction errors.

use plateverb_core::AllocError;

/// Failure to construct a [`PlateReverb`](crate::PlateReverb).
///
/// Only construction can fail; processing never reports errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// A delay buffer could not be allocated.
    Allocation {
        /// Which buffer failed ("predelay", "comb" or "allpass").
        line: &'static str,
        /// Requested capacity in samples.
        samples: usize,
    },
}

impl EngineError {
    pub(crate) fn allocation(line: &'static str) -> impl Fn(AllocError) -> Self {
        move |err| EngineError::Allocation {
            line,
            samples: err.samples,
        }
    }
}

impl core::fmt::Display for EngineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EngineError::Allocation { line, samples } => {
                write!(f, "failed to allocate {line} buffer of {samples} samples")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EngineError {}
