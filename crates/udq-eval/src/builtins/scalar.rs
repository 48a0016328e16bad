//! Set-reducing functions: `SUM`, `AVEA`, `AVEG`, `AVEH`, `MIN`, `MAX`,
//! `NORM1`, `NORM2`, `NORMI`, `PROD`.
//!
//! Each reduces the *defined* values of a set. An empty domain (no entries, or
//! every entry undefined) reduces to `Undefined`, never to zero, and a domain
//! violation (`AVEG` over a non-positive value, `AVEH` over a zero) also gives
//! `Undefined`. Overflow to a non-finite number is reported the same way.

use udq_common::{UdqResult, UdqScalar, UdqSet};

use super::utils::reduce_defined;
use crate::function::ScalarFunction;
use crate::function_registry::FunctionRegistry;

/// Arithmetic sum of the defined values.
pub fn sum(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| UdqScalar::new(xs.iter().sum()))
}

pub fn prod(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| UdqScalar::new(xs.iter().product()))
}

/// Arithmetic mean of the defined values.
pub fn avea(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| {
        UdqScalar::new(xs.iter().sum::<f64>() / xs.len() as f64)
    })
}

/// Geometric mean of the defined values.
///
/// # Remarks
/// - Every defined value must be strictly positive; one value `<= 0` makes the
///   whole result undefined.
/// - Computed through the mean of logarithms, so long sets of large values do
///   not overflow the intermediate product.
pub fn aveg(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| {
        if xs.iter().any(|&x| x <= 0.0) {
            return UdqScalar::Undefined;
        }
        let mean_ln = xs.iter().map(|x| x.ln()).sum::<f64>() / xs.len() as f64;
        UdqScalar::new(mean_ln.exp())
    })
}

/// Harmonic mean, `n / Σ(1/x)`.
///
/// # Remarks
/// - A zero among the defined values makes the result undefined.
/// - Reciprocals that cancel to a zero sum (e.g. `1` and `-1`) also give
///   undefined.
/// - Reciprocals are taken relative to the smallest magnitude so subnormal
///   values do not overflow `1/x`.
pub fn aveh(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| {
        if xs.contains(&0.0) {
            return UdqScalar::Undefined;
        }
        let scale = xs.iter().map(|x| x.abs()).fold(f64::INFINITY, f64::min);
        let inv_sum: f64 = xs.iter().map(|x| scale / x).sum();
        UdqScalar::new(xs.len() as f64 / inv_sum * scale)
    })
}

pub fn min(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| {
        UdqScalar::new(xs.iter().copied().fold(f64::INFINITY, f64::min))
    })
}

pub fn max(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| {
        UdqScalar::new(xs.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    })
}

/// Sum of absolute values.
pub fn norm1(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| UdqScalar::new(xs.iter().map(|x| x.abs()).sum()))
}

/// Euclidean norm.
pub fn norm2(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| {
        UdqScalar::new(xs.iter().map(|x| x * x).sum::<f64>().sqrt())
    })
}

/// Largest absolute value.
pub fn normi(arg: &UdqSet) -> UdqScalar {
    reduce_defined(arg, |xs| {
        UdqScalar::new(xs.iter().map(|x| x.abs()).fold(0.0, f64::max))
    })
}

pub fn register_builtins(registry: &FunctionRegistry) -> UdqResult<()> {
    crate::register_functions!(registry;
        ScalarFunction::new("SUM", sum),
        ScalarFunction::new("AVEA", avea),
        ScalarFunction::new("AVEG", aveg),
        ScalarFunction::new("AVEH", aveh),
        ScalarFunction::new("MIN", min),
        ScalarFunction::new("MAX", max),
        ScalarFunction::new("NORM1", norm1),
        ScalarFunction::new("NORM2", norm2),
        ScalarFunction::new("NORMI", normi),
        ScalarFunction::new("PROD", prod),
    );
    Ok(())
}
