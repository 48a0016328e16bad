//! Function catalog for user-defined quantities (UDQ).
//!
//! Three families of total numeric functions over [`UdqSet`]s: set
//! reductions, elementwise unary functions, and keywise binary functions.
//! None of them fail at evaluation time; missing data and domain violations
//! come back as undefined entries. Callers look functions up by name in a
//! [`FunctionRegistry`] and own every piece of state a call needs: the
//! comparison epsilon and, for `RANDN` / `RANDU`, the generator.

pub mod builtins;
pub mod function;
pub mod function_registry;
pub mod params;
pub mod rng;

mod macros;


pub use function::{BinaryFunction, FnCaps, ScalarFunction, UdqFamily, UdqFunction, UnaryFunction};
pub use function_registry::FunctionRegistry;
pub use params::UdqParams;
pub use rng::UdqRng;
pub use udq_common::{UdqError, UdqResult, UdqScalar, UdqSet, UdqVarType};
