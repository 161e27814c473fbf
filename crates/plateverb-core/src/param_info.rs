//! Parameter introspection for discoverable controls.
//!
//! The [`ParameterInfo`] trait lets presets, the command line front end and a
//! future host adapter enumerate, read and write an effect's controls by index
//! without knowing its concrete type.
//!
//! # Design
//!
//! Access is index-based. Each control is described by a [`ParamDescriptor`]
//! carrying display metadata, its valid range and default, a stable numeric
//! [`ParamId`] for host automation, a stable string id for preset files and a
//! [`ParamScale`] knob response hint.
//!
//! # Example
//!
//! ```rust
//! use plateverb_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Width {
//!     amount: f32,
//! }
//!
//! impl ParameterInfo for Width {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::amount("Width", "Width", 1.0)
//!                 .with_id(ParamId(100), "width")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.amount } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.amount = desc.clamp(value);
//!         }
//!     }
//! }
//!
//! let mut w = Width { amount: 1.0 };
//! w.set_param(0, 3.0);
//! assert_eq!(w.get_param(0), 1.0);
//! assert_eq!(w.find_param_by_string_id("width"), Some(0));
//! ```

/// Response curve a front end should use when mapping a knob onto the
/// control's range.
///
/// The engine itself only ever sees plain values; the scale is a display hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping. More resolution at low values.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` never changes for a given control. The reverb
/// engine numbers its controls from 1500.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Trait for effects that expose introspectable parameters.
///
/// Indices are zero-based and stable for the lifetime of the effect. Use
/// [`param_count`](Self::param_count) to find the valid range.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`. Out-of-range indices return 0.
    fn get_param(&self, index: usize) -> f32;

    /// Set the parameter at `index`.
    ///
    /// Implementations clamp to the descriptor's range and ignore
    /// out-of-range indices.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name or short name (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name) || desc.short_name.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Find a parameter index by its stable string id (exact match).
    fn find_param_by_string_id(&self, string_id: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.string_id == string_id))
    }

    /// Stable [`ParamId`] of the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Scans all parameters (O(n)); meant for setup paths, not audio.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Metadata for a single parameter: display, range, identity and scaling.
///
/// `short_name` should stay within 8 characters for small displays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g. "Pre-Delay").
    pub name: &'static str,

    /// Short name for compact displays, at most 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Value used when the control is missing or unconnected.
    pub default: f32,

    /// Recommended step increment for encoder-style control.
    pub step: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable string ID used as the key in preset files. Default: `""`.
    pub string_id: &'static str,

    /// Knob response curve. Default: [`ParamScale::Linear`].
    pub scale: ParamScale,
}

impl ParamDescriptor {
    const fn base(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
        step: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
        }
    }

    /// Dimensionless amount in `[0, 1]` (mix, damping, diffusion, gate, grit).
    pub const fn amount(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::base(name, short_name, ParamUnit::None, 0.0, 1.0, default, 0.01)
    }

    /// Time in milliseconds.
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Milliseconds, min, max, default, 1.0)
    }

    /// Time in seconds.
    pub const fn time_s(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Seconds, min, max, default, 0.1)
    }

    /// Frequency or rate in Hz.
    pub const fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Hertz, min, max, default, 0.05)
    }

    /// Scaling multiplier (e.g. room size).
    pub const fn multiplier(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::base(name, short_name, ParamUnit::Multiplier, min, max, default, 0.01)
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// ```rust
    /// use plateverb_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::amount("Mix", "Mix", 0.25).with_id(ParamId(1500), "mix");
    /// assert_eq!(desc.id, ParamId(1500));
    /// assert_eq!(desc.string_id, "mix");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the knob response curve.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Whether `value` is finite and inside `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Clamps a value to this parameter's range. NaN maps to the default.
    ///
    /// ```rust
    /// use plateverb_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::time_ms("Pre-Delay", "PreDly", 0.0, 200.0, 20.0);
    /// assert_eq!(desc.clamp(50.0), 50.0);
    /// assert_eq!(desc.clamp(-10.0), 0.0);
    /// assert_eq!(desc.clamp(900.0), 200.0);
    /// assert_eq!(desc.clamp(f32::NAN), 20.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz, for cutoff and modulation rate.
    Hertz,
    /// Milliseconds, for predelay and modulation depth.
    Milliseconds,
    /// Seconds, for decay time.
    Seconds,
    /// Multiplier, for size scaling.
    Multiplier,
    /// Dimensionless amount.
    None,
}

impl ParamUnit {
    /// Unit suffix for display.
    ///
    /// ```rust
    /// use plateverb_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Seconds.suffix(), " s");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Seconds => " s",
            ParamUnit::Multiplier => "x",
            ParamUnit::None => "",
        }
    }
}
