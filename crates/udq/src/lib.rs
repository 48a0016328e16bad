//! Meta crate that re-exports the UDQ building blocks. Depend on this crate
//! and opt into layers via feature flags, or on the underlying crates directly
//! when only the value types are needed.

#[cfg(feature = "common")]
pub use udq_common as common;

#[cfg(feature = "eval")]
pub use udq_eval as eval;

#[cfg(feature = "common")]
pub use udq_common::{UdqError, UdqResult, UdqScalar, UdqSet, UdqVarType};

#[cfg(feature = "eval")]
pub use udq_eval::{
    BinaryFunction, FnCaps, FunctionRegistry, ScalarFunction, UdqFamily, UdqFunction, UdqParams,
    UdqRng, UnaryFunction,
};
