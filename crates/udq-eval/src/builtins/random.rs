//! RANDN and RANDU: random draws over a set's key sequence.
//!
//! The generator is always supplied by the caller and is advanced by every
//! call; there is no ambient generator. Draws are taken in key order, one per
//! entry, whether or not the entry was defined.
use rand::Rng;
use rand::distributions::Standard;
use rand_distr::StandardNormal;
use udq_common::{UdqResult, UdqScalar, UdqSet};

use crate::function::UnaryFunction;
use crate::function_registry::FunctionRegistry;

/// Independent standard-normal draw for every entry.
pub fn randn<R: Rng + ?Sized>(rng: &mut R, arg: &UdqSet) -> UdqSet {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("RANDN", entries = arg.len()).entered();
    arg.map_values(|_| UdqScalar::new(rng.sample::<f64, _>(StandardNormal)))
}

/// Independent uniform draw from `[0, 1)` for every entry.
pub fn randu<R: Rng + ?Sized>(rng: &mut R, arg: &UdqSet) -> UdqSet {
    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!("RANDU", entries = arg.len()).entered();
    arg.map_values(|_| UdqScalar::Defined(rng.sample::<f64, _>(Standard)))
}

pub fn register_builtins(registry: &FunctionRegistry) -> UdqResult<()> {
    crate::register_functions!(registry;
        UnaryFunction::random("RANDN", |rng, arg| randn(rng, arg)),
        UnaryFunction::random("RANDU", |rng, arg| randu(rng, arg)),
    );
    Ok(())
}
