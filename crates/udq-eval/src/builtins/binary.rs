//! Keywise functions of two sets.
//!
//! Three policies:
//! - strict (`ADD`, `SUB`, `MUL`, `DIV`, `POW`, `LT`, `GT`): undefined on
//!   either side gives undefined
//! - tolerant comparisons (`EQ`, `NE`, `LE`, `GE`): strict about undefined,
//!   but compare within a caller-supplied epsilon
//! - undefined-tolerant merges (`UADD`, `UMUL`, `UMAX`, `UMIN`): a missing
//!   side is replaced by the operation's identity element; only two missing
//!   sides give undefined
//!
//! Key pairing and scalar broadcasting are described on [`combine`].
//!
//! [`combine`]: super::utils::combine

use udq_common::{UdqResult, UdqScalar, UdqSet};

use super::utils::{indicator, strict, undef_tolerant};
use crate::function::BinaryFunction;
use crate::function_registry::FunctionRegistry;

pub fn add(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| UdqScalar::new(a + b))
}

pub fn sub(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| UdqScalar::new(a - b))
}

pub fn mul(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| UdqScalar::new(a * b))
}

/// Division; a zero divisor gives undefined.
pub fn div(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| {
        if b == 0.0 {
            UdqScalar::Undefined
        } else {
            UdqScalar::new(a / b)
        }
    })
}

/// `lhs ^ rhs`.
///
/// # Remarks
/// - A negative base with a non-integer exponent is undefined.
/// - Results that are not finite (`0 ^ -1`, overflow) are undefined.
pub fn pow(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |base, exponent| {
        if base < 0.0 && exponent.fract() != 0.0 {
            UdqScalar::Undefined
        } else {
            UdqScalar::new(base.powf(exponent))
        }
    })
}

pub fn lt(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| indicator(a < b))
}

pub fn gt(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| indicator(a > b))
}

fn within(eps: f64, a: f64, b: f64) -> bool {
    (a - b).abs() <= eps.max(0.0)
}

/// `1` where `|lhs - rhs| <= eps`, else `0`.
pub fn eq(eps: f64, lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| indicator(within(eps, a, b)))
}

/// Logical complement of [`eq`] for the same inputs and epsilon.
pub fn ne(eps: f64, lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    strict(lhs, rhs, |a, b| indicator(!within(eps, a, b)))
}

/// `1` where `lhs <= rhs + eps`, else `0`.
pub fn le(eps: f64, lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    let eps = eps.max(0.0);
    strict(lhs, rhs, |a, b| indicator(a <= b + eps))
}

/// `1` where `lhs >= rhs - eps`, else `0`.
pub fn ge(eps: f64, lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    let eps = eps.max(0.0);
    strict(lhs, rhs, |a, b| indicator(a >= b - eps))
}

/// Sum with a missing side read as `0`.
pub fn uadd(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    undef_tolerant(lhs, rhs, 0.0, |a, b| a + b)
}

/// Product with a missing side read as `1`.
pub fn umul(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    undef_tolerant(lhs, rhs, 1.0, |a, b| a * b)
}

pub fn umax(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    undef_tolerant(lhs, rhs, f64::NEG_INFINITY, f64::max)
}

pub fn umin(lhs: &UdqSet, rhs: &UdqSet) -> UdqSet {
    undef_tolerant(lhs, rhs, f64::INFINITY, f64::min)
}

pub fn register_builtins(registry: &FunctionRegistry) -> UdqResult<()> {
    crate::register_functions!(registry;
        BinaryFunction::tolerant("EQ", eq),
        BinaryFunction::tolerant("NE", ne),
        BinaryFunction::tolerant("LE", le),
        BinaryFunction::tolerant("GE", ge),
        BinaryFunction::new("POW", pow),
        BinaryFunction::new("LT", lt),
        BinaryFunction::new("GT", gt),
        BinaryFunction::new("ADD", add),
        BinaryFunction::new("MUL", mul),
        BinaryFunction::new("SUB", sub),
        BinaryFunction::new("DIV", div),
        BinaryFunction::undef_tolerant("UADD", uadd),
        BinaryFunction::undef_tolerant("UMUL", umul),
        BinaryFunction::undef_tolerant("UMAX", umax),
        BinaryFunction::undef_tolerant("UMIN", umin),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use udq_common::UdqVarType;

    fn pair(a: Option<f64>, b: Option<f64>) -> (UdqSet, UdqSet) {
        let lhs = UdqSet::from_entries("WUL", UdqVarType::Well, [("P1", UdqScalar::from(a))]).unwrap();
        let rhs = UdqSet::from_entries("WUR", UdqVarType::Well, [("P1", UdqScalar::from(b))]).unwrap();
        (lhs, rhs)
    }

    fn apply(f: fn(&UdqSet, &UdqSet) -> UdqSet, a: Option<f64>, b: Option<f64>) -> UdqScalar {
        let (lhs, rhs) = pair(a, b);
        f(&lhs, &rhs).get("P1")
    }

    fn apply_eps(
        f: fn(f64, &UdqSet, &UdqSet) -> UdqSet,
        eps: f64,
        a: Option<f64>,
        b: Option<f64>,
    ) -> UdqScalar {
        let (lhs, rhs) = pair(a, b);
        f(eps, &lhs, &rhs).get("P1")
    }

    #[test]
    fn arithmetic_propagates_undefined() {
        assert_eq!(apply(add, Some(2.0), Some(3.0)), UdqScalar::Defined(5.0));
        assert_eq!(apply(sub, Some(2.0), Some(3.0)), UdqScalar::Defined(-1.0));
        assert_eq!(apply(mul, Some(2.0), Some(3.0)), UdqScalar::Defined(6.0));
        for f in [add, sub, mul, div, pow, lt, gt] {
            assert_eq!(apply(f, None, Some(3.0)), UdqScalar::Undefined);
            assert_eq!(apply(f, Some(3.0), None), UdqScalar::Undefined);
        }
    }

    #[test]
    fn division_by_zero_is_undefined() {
        assert_eq!(apply(div, Some(5.0), Some(0.0)), UdqScalar::Undefined);
        assert_eq!(apply(div, Some(5.0), Some(2.0)), UdqScalar::Defined(2.5));
    }

    #[test]
    fn pow_domain() {
        assert_eq!(apply(pow, Some(2.0), Some(3.0)), UdqScalar::Defined(8.0));
        assert_eq!(apply(pow, Some(-2.0), Some(3.0)), UdqScalar::Defined(-8.0));
        assert_eq!(apply(pow, Some(-2.0), Some(0.5)), UdqScalar::Undefined);
        assert_eq!(apply(pow, Some(0.0), Some(-1.0)), UdqScalar::Undefined);
        let root = apply(pow, Some(4.0), Some(0.5)).value().unwrap();
        assert!((root - 2.0).abs() < 1e-12);
    }

    #[test]
    fn strict_comparisons() {
        assert_eq!(apply(lt, Some(1.0), Some(2.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply(lt, Some(2.0), Some(2.0)), UdqScalar::Defined(0.0));
        assert_eq!(apply(gt, Some(3.0), Some(2.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply(gt, Some(2.0), Some(2.0)), UdqScalar::Defined(0.0));
    }

    #[test]
    fn tolerant_comparisons() {
        assert_eq!(apply_eps(eq, 0.01, Some(1.0), Some(1.005)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(eq, 0.01, Some(1.0), Some(1.02)), UdqScalar::Defined(0.0));
        assert_eq!(apply_eps(ne, 0.01, Some(1.0), Some(1.005)), UdqScalar::Defined(0.0));
        assert_eq!(apply_eps(ne, 0.01, Some(1.0), Some(1.02)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(le, 0.01, Some(1.005), Some(1.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(le, 0.01, Some(1.02), Some(1.0)), UdqScalar::Defined(0.0));
        assert_eq!(apply_eps(ge, 0.01, Some(0.995), Some(1.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(ge, 0.01, Some(0.98), Some(1.0)), UdqScalar::Defined(0.0));
        assert_eq!(apply_eps(eq, 0.0, Some(1.0), Some(1.0)), UdqScalar::Defined(1.0));
        for f in [eq, ne, le, ge] {
            assert_eq!(apply_eps(f, 0.01, None, Some(1.0)), UdqScalar::Undefined);
            assert_eq!(apply_eps(f, 0.01, Some(1.0), None), UdqScalar::Undefined);
        }
    }

    #[test]
    fn negative_epsilon_is_treated_as_zero() {
        assert_eq!(apply_eps(eq, -1.0, Some(1.0), Some(1.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(eq, -1.0, Some(1.0), Some(1.5)), UdqScalar::Defined(0.0));
        assert_eq!(apply_eps(ne, -1.0, Some(1.0), Some(1.0)), UdqScalar::Defined(0.0));
        assert_eq!(apply_eps(le, -1.0, Some(2.0), Some(2.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(le, -1.0, Some(1.5), Some(2.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(le, -1.0, Some(2.5), Some(2.0)), UdqScalar::Defined(0.0));
        assert_eq!(apply_eps(ge, -1.0, Some(2.0), Some(2.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(ge, -1.0, Some(2.5), Some(2.0)), UdqScalar::Defined(1.0));
        assert_eq!(apply_eps(ge, -1.0, Some(1.5), Some(2.0)), UdqScalar::Defined(0.0));
    }

    #[test]
    fn u_family_substitutes_identity() {
        assert_eq!(apply(uadd, None, Some(3.0)), UdqScalar::Defined(3.0));
        assert_eq!(apply(uadd, Some(2.0), Some(3.0)), UdqScalar::Defined(5.0));
        assert_eq!(apply(umul, Some(0.0), None), UdqScalar::Defined(0.0));
        assert_eq!(apply(umul, None, Some(4.0)), UdqScalar::Defined(4.0));
        assert_eq!(apply(umax, Some(-7.0), None), UdqScalar::Defined(-7.0));
        assert_eq!(apply(umax, Some(-7.0), Some(2.0)), UdqScalar::Defined(2.0));
        assert_eq!(apply(umin, None, Some(7.0)), UdqScalar::Defined(7.0));
        assert_eq!(apply(umin, Some(-7.0), Some(2.0)), UdqScalar::Defined(-7.0));
        for f in [uadd, umul, umax, umin] {
            assert_eq!(apply(f, None, None), UdqScalar::Undefined);
        }
    }

    #[test]
    fn mismatched_keys_are_unioned() {
        let hist = UdqSet::from_entries(
            "WUHIST",
            UdqVarType::Well,
            [("P1", UdqScalar::new(10.0)), ("P2", UdqScalar::Undefined)],
        )
        .unwrap();
        let pred = UdqSet::from_entries(
            "WUPRED",
            UdqVarType::Well,
            [("P2", UdqScalar::new(4.0)), ("P3", UdqScalar::new(1.0))],
        )
        .unwrap();
        let merged = uadd(&hist, &pred);
        assert_eq!(merged.name(), "WUHIST");
        assert_eq!(merged.keys().collect::<Vec<_>>(), vec!["P1", "P2", "P3"]);
        assert_eq!(merged.get("P1"), UdqScalar::Defined(10.0));
        assert_eq!(merged.get("P2"), UdqScalar::Defined(4.0));
        assert_eq!(merged.get("P3"), UdqScalar::Defined(1.0));

        let summed = add(&hist, &pred);
        assert_eq!(summed.len(), 3);
        assert_eq!(summed.defined_size(), 0);
    }

    #[test]
    fn scalar_operand_broadcasts() {
        let wells = UdqSet::from_entries(
            "WOPR",
            UdqVarType::Well,
            [
                ("P1", UdqScalar::new(120.0)),
                ("P2", UdqScalar::Undefined),
                ("P3", UdqScalar::new(80.0)),
            ],
        )
        .unwrap();
        let limit = UdqSet::scalar("LIMIT", 100.0);

        let over = sub(&wells, &limit);
        assert_eq!(over.name(), "WOPR");
        assert_eq!(over.var_type(), UdqVarType::Well);
        assert_eq!(
            over.values(),
            &[
                UdqScalar::Defined(20.0),
                UdqScalar::Undefined,
                UdqScalar::Defined(-20.0)
            ]
        );

        let under = sub(&limit, &wells);
        assert_eq!(under.name(), "LIMIT");
        assert_eq!(under.var_type(), UdqVarType::Well);
        assert_eq!(under.keys().collect::<Vec<_>>(), vec!["P1", "P2", "P3"]);
        assert_eq!(under.get("P1"), UdqScalar::Defined(-20.0));

        let field = UdqSet::field("FOPR", 2.0);
        let both = mul(&limit, &field);
        assert_eq!(both.len(), 1);
        assert_eq!(both.scalar_value(), UdqScalar::Defined(200.0));
    }
}
