use udq_common::{UdqScalar, UdqSet};

/// Run `f` over the defined values, or return undefined when there are none.
pub(crate) fn reduce_defined(arg: &UdqSet, f: impl FnOnce(&[f64]) -> UdqScalar) -> UdqScalar {
    let defined = arg.defined_values();
    if defined.is_empty() {
        return UdqScalar::Undefined;
    }
    f(&defined)
}

/// Elementwise map over defined entries; undefined entries stay undefined.
pub(crate) fn map_defined(arg: &UdqSet, f: impl Fn(f64) -> UdqScalar) -> UdqSet {
    arg.map_values(|v| v.and_then(&f))
}

pub(crate) fn indicator(flag: bool) -> UdqScalar {
    UdqScalar::Defined(if flag { 1.0 } else { 0.0 })
}

/// Pair the entries of two sets key by key and combine them with `f`.
///
/// - a scalar-typed operand broadcasts over the other operand's keys
/// - otherwise the result is keyed by the lhs keys followed by rhs-only keys,
///   and a side that lacks a key contributes `Undefined`
///
/// The result carries the lhs name and the type of the keyed operand.
pub(crate) fn combine(
    lhs: &UdqSet,
    rhs: &UdqSet,
    f: impl Fn(UdqScalar, UdqScalar) -> UdqScalar,
) -> UdqSet {
    match (lhs.var_type().is_scalar(), rhs.var_type().is_scalar()) {
        (true, true) => {
            let r = rhs.scalar_value();
            lhs.map_values(|l| f(l, r))
        }
        (true, false) => {
            let l = lhs.scalar_value();
            rhs.map_values(|r| f(l, r)).renamed(lhs.name())
        }
        (false, true) => {
            let r = rhs.scalar_value();
            lhs.map_values(|l| f(l, r))
        }
        (false, false) => {
            let mut out = lhs.key_union(rhs);
            let values: Vec<UdqScalar> = out
                .keys()
                .map(|key| f(lhs.get(key), rhs.get(key)))
                .collect();
            for (index, value) in values.into_iter().enumerate() {
                out.assign_index(index, value);
            }
            out
        }
    }
}

/// Strict combination: undefined on either side gives undefined.
pub(crate) fn strict(lhs: &UdqSet, rhs: &UdqSet, op: impl Fn(f64, f64) -> UdqScalar) -> UdqSet {
    combine(lhs, rhs, |l, r| match (l, r) {
        (UdqScalar::Defined(a), UdqScalar::Defined(b)) => op(a, b),
        _ => UdqScalar::Undefined,
    })
}

/// Identity-substituting combination used by the `U` family.
pub(crate) fn undef_tolerant(
    lhs: &UdqSet,
    rhs: &UdqSet,
    identity: f64,
    op: impl Fn(f64, f64) -> f64,
) -> UdqSet {
    combine(lhs, rhs, |l, r| match (l, r) {
        (UdqScalar::Undefined, UdqScalar::Undefined) => UdqScalar::Undefined,
        (l, r) => UdqScalar::new(op(l.value_or(identity), r.value_or(identity))),
    })
}
