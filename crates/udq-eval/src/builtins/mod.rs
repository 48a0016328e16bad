pub mod binary;
pub mod random;
pub mod scalar;
pub mod unary;
mod utils;

use udq_common::UdqResult;

use crate::function_registry::FunctionRegistry;

/// Register the full UDQ catalog with `registry`.
pub fn load_builtins(registry: &FunctionRegistry) -> UdqResult<()> {
    scalar::register_builtins(registry)?;
    unary::register_builtins(registry)?;
    random::register_builtins(registry)?;
    binary::register_builtins(registry)?;
    Ok(())
}
