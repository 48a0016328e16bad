//! Elementwise functions of one set. Every result keeps the argument's name,
//! type and key sequence.

use udq_common::{UdqResult, UdqScalar, UdqSet};

use super::utils::{indicator, map_defined};
use crate::function::UnaryFunction;
use crate::function_registry::FunctionRegistry;

pub fn abs(arg: &UdqSet) -> UdqSet {
    map_defined(arg, |x| UdqScalar::new(x.abs()))
}

/// `e^x`, saturating at `f64::MAX` instead of overflowing.
pub fn exp(arg: &UdqSet) -> UdqSet {
    map_defined(arg, |x| UdqScalar::new(x.exp().min(f64::MAX)))
}

/// Natural logarithm; non-positive input is undefined.
pub fn ln(arg: &UdqSet) -> UdqSet {
    map_defined(arg, |x| {
        if x <= 0.0 {
            UdqScalar::Undefined
        } else {
            UdqScalar::new(x.ln())
        }
    })
}

/// Base-10 logarithm; non-positive input is undefined.
pub fn log(arg: &UdqSet) -> UdqSet {
    map_defined(arg, |x| {
        if x <= 0.0 {
            UdqScalar::Undefined
        } else {
            UdqScalar::new(x.log10())
        }
    })
}

/// Nearest integer, halves rounded away from zero (`2.5 → 3`, `-2.5 → -3`).
pub fn nint(arg: &UdqSet) -> UdqSet {
    map_defined(arg, |x| UdqScalar::new(x.round()))
}

/// Defined values in ascending order, laid back into the defined positions.
///
/// # Remarks
/// - The key sequence is unchanged; only values move.
/// - Undefined entries keep their position and are left out of the sort.
/// - `{A: 3, B: undef, C: 1, D: 2}` becomes `{A: 1, B: undef, C: 2, D: 3}`.
pub fn sorta(arg: &UdqSet) -> UdqSet {
    redistribute_sorted(arg, |a, b| a.total_cmp(b))
}

/// Descending counterpart of [`sorta`].
pub fn sortd(arg: &UdqSet) -> UdqSet {
    redistribute_sorted(arg, |a, b| b.total_cmp(a))
}

fn redistribute_sorted(
    arg: &UdqSet,
    order: impl FnMut(&f64, &f64) -> std::cmp::Ordering,
) -> UdqSet {
    let mut values = arg.defined_values();
    values.sort_by(order);
    let mut sorted = values.into_iter();
    arg.map_values(|v| match v {
        UdqScalar::Defined(_) => sorted.next().map_or(UdqScalar::Undefined, UdqScalar::Defined),
        UdqScalar::Undefined => UdqScalar::Undefined,
    })
}

/// `1` where the entry is defined, `0` where it is not. Always fully defined.
pub fn def(arg: &UdqSet) -> UdqSet {
    arg.map_values(|v| indicator(v.is_defined()))
}

/// Complement of [`def`]: `1` where the entry is undefined, `0` where it is
/// defined.
pub fn idv(arg: &UdqSet) -> UdqSet {
    arg.map_values(|v| indicator(v.is_undefined()))
}

/// Every entry undefined, over the argument's key set.
pub fn undef(arg: &UdqSet) -> UdqSet {
    arg.map_values(|_| UdqScalar::Undefined)
}

pub fn register_builtins(registry: &FunctionRegistry) -> UdqResult<()> {
    crate::register_functions!(registry;
        UnaryFunction::new("ABS", abs),
        UnaryFunction::new("DEF", def),
        UnaryFunction::new("EXP", exp),
        UnaryFunction::new("IDV", idv),
        UnaryFunction::new("LN", ln),
        UnaryFunction::new("LOG", log),
        UnaryFunction::new("NINT", nint),
        UnaryFunction::new("SORTA", sorta),
        UnaryFunction::new("SORTD", sortd),
        UnaryFunction::new("UNDEF", undef),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use udq_common::UdqVarType;

    fn set(entries: &[(&str, Option<f64>)]) -> UdqSet {
        UdqSet::from_entries(
            "WUX",
            UdqVarType::Well,
            entries.iter().map(|(k, v)| (*k, UdqScalar::from(*v))),
        )
        .unwrap()
    }

    fn values(s: &UdqSet) -> Vec<Option<f64>> {
        s.values().iter().map(UdqScalar::value).collect()
    }

    #[test]
    fn abs_keeps_undefined() {
        let s = set(&[("A", Some(-2.0)), ("B", None), ("C", Some(3.0))]);
        let r = abs(&s);
        assert_eq!(values(&r), vec![Some(2.0), None, Some(3.0)]);
        assert_eq!(r.name(), "WUX");
        assert_eq!(r.var_type(), UdqVarType::Well);
    }

    #[test]
    fn exp_saturates() {
        let s = set(&[("A", Some(0.0)), ("B", Some(1000.0)), ("C", None)]);
        let r = exp(&s);
        assert_eq!(values(&r), vec![Some(1.0), Some(f64::MAX), None]);
        let r = exp(&set(&[("A", Some(-1000.0))]));
        assert_eq!(values(&r), vec![Some(0.0)]);
    }

    #[test]
    fn logs_reject_non_positive() {
        let s = set(&[
            ("A", Some(100.0)),
            ("B", Some(0.0)),
            ("C", Some(-5.0)),
            ("D", None),
        ]);
        assert_eq!(values(&log(&s)), vec![Some(2.0), None, None, None]);
        let r = ln(&s);
        assert!((r.get("A").value().unwrap() - 100f64.ln()).abs() < 1e-12);
        assert_eq!(values(&r)[1..], [None, None, None]);
    }

    #[test]
    fn nint_rounds_half_away_from_zero() {
        let s = set(&[
            ("A", Some(2.5)),
            ("B", Some(-2.5)),
            ("C", Some(1.4)),
            ("D", Some(-0.6)),
            ("E", None),
        ]);
        assert_eq!(
            values(&nint(&s)),
            vec![Some(3.0), Some(-3.0), Some(1.0), Some(-1.0), None]
        );
    }

    #[test]
    fn sorts_redistribute_into_defined_positions() {
        let s = set(&[("A", Some(3.0)), ("B", None), ("C", Some(1.0)), ("D", Some(2.0))]);
        let a = sorta(&s);
        assert_eq!(a.keys().collect::<Vec<_>>(), vec!["A", "B", "C", "D"]);
        assert_eq!(values(&a), vec![Some(1.0), None, Some(2.0), Some(3.0)]);
        let d = sortd(&s);
        assert_eq!(values(&d), vec![Some(3.0), None, Some(2.0), Some(1.0)]);
    }

    #[test]
    fn indicators_are_complementary() {
        let s = set(&[("A", Some(0.0)), ("B", None), ("C", Some(-1.0))]);
        assert_eq!(values(&def(&s)), vec![Some(1.0), Some(0.0), Some(1.0)]);
        assert_eq!(values(&idv(&s)), vec![Some(0.0), Some(1.0), Some(0.0)]);
    }

    #[test]
    fn non_finite_input_stays_undefined() {
        let s = UdqSet::from_entries(
            "WUX",
            UdqVarType::Well,
            [
                ("A", UdqScalar::Defined(f64::INFINITY)),
                ("B", UdqScalar::Defined(f64::NEG_INFINITY)),
                ("C", UdqScalar::Defined(-1.5)),
            ],
        )
        .unwrap();
        assert_eq!(values(&abs(&s)), vec![None, None, Some(1.5)]);
        assert_eq!(values(&nint(&s)), vec![None, None, Some(-2.0)]);
    }

    #[test]
    fn undef_clears_everything() {
        let s = set(&[("A", Some(1.0)), ("B", None)]);
        let r = undef(&s);
        assert_eq!(r.len(), 2);
        assert_eq!(r.defined_size(), 0);
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["A", "B"]);
    }
}
