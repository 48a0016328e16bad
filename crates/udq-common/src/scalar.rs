use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single UDQ value: either a finite number or the *undefined* marker.
///
/// Undefined means "no applicable value" (a well that is not yet drilled, a
/// domain violation such as `LN(-1)`, a division by zero) and is distinct from
/// zero. Functions propagate it according to their own policy instead of
/// failing.
///
/// Build values through [`UdqScalar::new`], which refuses non-finite input.
/// The `Defined` variant is public for pattern matching; constructing it
/// directly with NaN or an infinity bypasses that invariant.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "Option<f64>", into = "Option<f64>")
)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum UdqScalar {
    Defined(f64),
    #[default]
    Undefined,
}

impl UdqScalar {
    /// Checked constructor: NaN and ±∞ become `Undefined`.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self::Defined(value)
        } else {
            Self::Undefined
        }
    }

    /// Re-applies the finiteness check to a value that may have been built
    /// from the `Defined` variant directly.
    pub fn normalized(self) -> Self {
        self.and_then(Self::new)
    }

    pub const fn undefined() -> Self {
        Self::Undefined
    }

    pub const fn is_defined(&self) -> bool {
        matches!(self, Self::Defined(_))
    }

    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    pub const fn value(&self) -> Option<f64> {
        match *self {
            Self::Defined(v) => Some(v),
            Self::Undefined => None,
        }
    }

    /// Value for reporting, with `fallback` standing in for undefined.
    pub const fn value_or(&self, fallback: f64) -> f64 {
        match *self {
            Self::Defined(v) => v,
            Self::Undefined => fallback,
        }
    }

    /// Apply `f` to a defined value; the result goes through [`UdqScalar::new`].
    pub fn map(self, f: impl FnOnce(f64) -> f64) -> Self {
        match self {
            Self::Defined(v) => Self::new(f(v)),
            Self::Undefined => Self::Undefined,
        }
    }

    pub fn and_then(self, f: impl FnOnce(f64) -> UdqScalar) -> Self {
        match self {
            Self::Defined(v) => f(v),
            Self::Undefined => Self::Undefined,
        }
    }
}

impl From<f64> for UdqScalar {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Option<f64>> for UdqScalar {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Undefined, Self::new)
    }
}

impl From<UdqScalar> for Option<f64> {
    fn from(value: UdqScalar) -> Self {
        value.value()
    }
}

impl Display for UdqScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Defined(v) => write!(f, "{v}"),
            Self::Undefined => f.write_str("UNDEFINED"),
        }
    }
}
