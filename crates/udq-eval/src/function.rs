//! Function objects for the three UDQ families and their capability flags.
//!
//! The families have different call shapes (set → scalar, set → set,
//! set × set → set) and are never invoked through one polymorphic entry point.
//! They share nothing beyond carrying a name, and are unified only by the
//! [`UdqFunction`] tag the registry stores.

use std::fmt;
use std::sync::Arc;

use udq_common::{UdqScalar, UdqSet};

use crate::rng::UdqRng;

bitflags::bitflags! {
    /// Describes the capabilities and properties of a function.
    ///
    /// An evaluator uses these to decide what it must thread through a call:
    /// a generator for `RANDOM`, an epsilon for `TOLERANT`.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct FnCaps: u8 {
        /// Output depends only on the explicit arguments.
        const PURE           = 0b0000_0001;
        /// Draws from the caller-supplied generator and advances it.
        const RANDOM         = 0b0000_0010;
        /// Collapses a set to one scalar.
        const REDUCTION      = 0b0000_0100;
        /// Produces one entry per input key.
        const ELEMENTWISE    = 0b0000_1000;
        /// Reads the comparison epsilon.
        const TOLERANT       = 0b0001_0000;
        /// Substitutes an identity element for a missing operand.
        const UNDEF_TOLERANT = 0b0010_0000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UdqFamily {
    Scalar,
    Unary,
    Binary,
}

impl fmt::Display for UdqFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "scalar",
            Self::Unary => "unary",
            Self::Binary => "binary",
        })
    }
}

type ScalarBody = Arc<dyn Fn(&UdqSet) -> UdqScalar + Send + Sync>;
type PureBody = Arc<dyn Fn(&UdqSet) -> UdqSet + Send + Sync>;
type RandomBody = Arc<dyn Fn(&mut UdqRng, &UdqSet) -> UdqSet + Send + Sync>;
type BinaryBody = Arc<dyn Fn(f64, &UdqSet, &UdqSet) -> UdqSet + Send + Sync>;

/// Set-reducing function (`SUM`, `AVEA`, `NORM2`, …).
#[derive(Clone)]
pub struct ScalarFunction {
    name: Arc<str>,
    body: ScalarBody,
}

impl ScalarFunction {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&UdqSet) -> UdqScalar + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caps(&self) -> FnCaps {
        FnCaps::PURE | FnCaps::REDUCTION
    }

    pub fn eval(&self, arg: &UdqSet) -> UdqScalar {
        (self.body)(arg)
    }
}

#[derive(Clone)]
enum UnaryBody {
    Pure(PureBody),
    Random(RandomBody),
}

/// Elementwise function of one set.
///
/// [`UnaryFunction::eval`] takes the evaluation context's generator for every
/// member of the family; pure bodies never touch it. A context without a
/// generator uses [`UnaryFunction::eval_pure`] instead.
#[derive(Clone)]
pub struct UnaryFunction {
    name: Arc<str>,
    caps: FnCaps,
    body: UnaryBody,
}

impl UnaryFunction {
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&UdqSet) -> UdqSet + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            caps: FnCaps::PURE | FnCaps::ELEMENTWISE,
            body: UnaryBody::Pure(Arc::new(body)),
        }
    }

    /// A function that samples from the supplied generator.
    pub fn random<F>(name: &str, body: F) -> Self
    where
        F: Fn(&mut UdqRng, &UdqSet) -> UdqSet + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            caps: FnCaps::RANDOM | FnCaps::ELEMENTWISE,
            body: UnaryBody::Random(Arc::new(body)),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caps(&self) -> FnCaps {
        self.caps
    }

    pub fn is_random(&self) -> bool {
        self.caps.contains(FnCaps::RANDOM)
    }

    pub fn eval(&self, rng: &mut UdqRng, arg: &UdqSet) -> UdqSet {
        match &self.body {
            UnaryBody::Pure(body) => body(arg),
            UnaryBody::Random(body) => body(rng, arg),
        }
    }

    /// Evaluate without a generator. `None` for `RANDN`, `RANDU` and any
    /// other function built with [`UnaryFunction::random`].
    pub fn eval_pure(&self, arg: &UdqSet) -> Option<UdqSet> {
        match &self.body {
            UnaryBody::Pure(body) => Some(body(arg)),
            UnaryBody::Random(_) => None,
        }
    }
}

/// Keywise combination of two sets.
#[derive(Clone)]
pub struct BinaryFunction {
    name: Arc<str>,
    caps: FnCaps,
    body: BinaryBody,
}

impl BinaryFunction {
    /// Strict function; the epsilon passed to [`BinaryFunction::eval`] is ignored.
    pub fn new<F>(name: &str, body: F) -> Self
    where
        F: Fn(&UdqSet, &UdqSet) -> UdqSet + Send + Sync + 'static,
    {
        Self::with_caps(
            name,
            FnCaps::PURE | FnCaps::ELEMENTWISE,
            move |_eps: f64, lhs: &UdqSet, rhs: &UdqSet| body(lhs, rhs),
        )
    }

    /// Comparison parameterised by the caller's epsilon.
    pub fn tolerant<F>(name: &str, body: F) -> Self
    where
        F: Fn(f64, &UdqSet, &UdqSet) -> UdqSet + Send + Sync + 'static,
    {
        Self::with_caps(
            name,
            FnCaps::PURE | FnCaps::ELEMENTWISE | FnCaps::TOLERANT,
            body,
        )
    }

    /// `U`-prefixed merge that treats a missing side as the identity element.
    pub fn undef_tolerant<F>(name: &str, body: F) -> Self
    where
        F: Fn(&UdqSet, &UdqSet) -> UdqSet + Send + Sync + 'static,
    {
        Self::with_caps(
            name,
            FnCaps::PURE | FnCaps::ELEMENTWISE | FnCaps::UNDEF_TOLERANT,
            move |_eps: f64, lhs: &UdqSet, rhs: &UdqSet| body(lhs, rhs),
        )
    }

    fn with_caps<F>(name: &str, caps: FnCaps, body: F) -> Self
    where
        F: Fn(f64, &UdqSet, &UdqSet) -> UdqSet + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            caps,
            body: Arc::new(body),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn caps(&self) -> FnCaps {
        self.caps
    }

    pub fn eval(&self, epsilon: f64, lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
        (self.body)(epsilon, lhs, rhs)
    }
}

/// Tagged union stored by the registry.
#[derive(Clone, Debug)]
pub enum UdqFunction {
    Scalar(ScalarFunction),
    Unary(UnaryFunction),
    Binary(BinaryFunction),
}

impl UdqFunction {
    pub fn name(&self) -> &str {
        match self {
            Self::Scalar(f) => f.name(),
            Self::Unary(f) => f.name(),
            Self::Binary(f) => f.name(),
        }
    }

    pub fn family(&self) -> UdqFamily {
        match self {
            Self::Scalar(_) => UdqFamily::Scalar,
            Self::Unary(_) => UdqFamily::Unary,
            Self::Binary(_) => UdqFamily::Binary,
        }
    }

    pub fn caps(&self) -> FnCaps {
        match self {
            Self::Scalar(f) => f.caps(),
            Self::Unary(f) => f.caps(),
            Self::Binary(f) => f.caps(),
        }
    }
}

impl From<ScalarFunction> for UdqFunction {
    fn from(f: ScalarFunction) -> Self {
        Self::Scalar(f)
    }
}

impl From<UnaryFunction> for UdqFunction {
    fn from(f: UnaryFunction) -> Self {
        Self::Unary(f)
    }
}

impl From<BinaryFunction> for UdqFunction {
    fn from(f: BinaryFunction) -> Self {
        Self::Binary(f)
    }
}

macro_rules! impl_debug_by_name {
    ($($ty:ty),+) => {
        $(
            impl fmt::Debug for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.debug_struct(stringify!($ty))
                        .field("name", &self.name())
                        .field("caps", &self.caps())
                        .finish()
                }
            }
        )+
    };
}

impl_debug_by_name!(ScalarFunction, UnaryFunction, BinaryFunction);
