//! The keyed value container every UDQ function consumes and produces.
//!
//! A [`UdqSet`] is an ordered sequence of `(key, UdqScalar)` pairs. Keys are
//! unique and fixed at construction; insertion order is meaningful and is the
//! order in which elementwise results, sorts, and random draws are laid out.

use std::fmt::{self, Display};

use rustc_hash::FxHashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{UdqError, UdqResult, UdqScalar};

/// Key used by the single entry of a [`UdqVarType::Field`] set.
pub const FIELD_KEY: &str = "FIELD";

/// What kind of entity a set is keyed by.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UdqVarType {
    Scalar,
    Field,
    Group,
    Well,
    Connection,
    Segment,
    Region,
    Aquifer,
    Block,
}

impl UdqVarType {
    /// Scalar-typed sets hold a single value that broadcasts over keyed sets.
    pub const fn is_scalar(&self) -> bool {
        matches!(self, Self::Scalar | Self::Field)
    }
}

impl Display for UdqVarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scalar => "SCALAR",
            Self::Field => "FIELD",
            Self::Group => "GROUP",
            Self::Well => "WELL",
            Self::Connection => "CONNECTION",
            Self::Segment => "SEGMENT",
            Self::Region => "REGION",
            Self::Aquifer => "AQUIFER",
            Self::Block => "BLOCK",
        })
    }
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "SetRepr", into = "SetRepr")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct UdqSet {
    name: String,
    var_type: UdqVarType,
    keys: Vec<String>,
    values: Vec<UdqScalar>,
    index: FxHashMap<String, usize>,
}

impl UdqSet {
    /// A set over `keys` with every entry undefined.
    pub fn new<I, S>(name: impl Into<String>, var_type: UdqVarType, keys: I) -> UdqResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_entries(
            name,
            var_type,
            keys.into_iter().map(|k| (k, UdqScalar::Undefined)),
        )
    }

    /// A set from `(key, value)` pairs in order.
    ///
    /// # Errors
    /// - [`UdqError::DuplicateKey`] when a key repeats
    /// - [`UdqError::ScalarShape`] when a `Scalar` or `Field` set does not
    ///   hold exactly one entry
    ///
    /// Non-finite `Defined` values are stored as undefined.
    pub fn from_entries<I, S>(
        name: impl Into<String>,
        var_type: UdqVarType,
        entries: I,
    ) -> UdqResult<Self>
    where
        I: IntoIterator<Item = (S, UdqScalar)>,
        S: Into<String>,
    {
        let name = name.into();
        let mut set = Self {
            name,
            var_type,
            keys: Vec::new(),
            values: Vec::new(),
            index: FxHashMap::default(),
        };
        for (key, value) in entries {
            let key = key.into();
            if set.index.contains_key(&key) {
                return Err(UdqError::DuplicateKey { set: set.name, key });
            }
            set.index.insert(key.clone(), set.keys.len());
            set.keys.push(key);
            set.values.push(value.normalized());
        }
        if set.var_type.is_scalar() && set.len() != 1 {
            return Err(UdqError::ScalarShape {
                len: set.len(),
                var_type: set.var_type.to_string(),
                set: set.name,
            });
        }
        Ok(set)
    }

    /// Single unkeyed value.
    pub fn scalar(name: impl Into<String>, value: impl Into<UdqScalar>) -> Self {
        Self::single(name.into(), UdqVarType::Scalar, String::new(), value.into())
    }

    /// Scalar set holding `Undefined`.
    pub fn empty(name: impl Into<String>) -> Self {
        Self::scalar(name, UdqScalar::Undefined)
    }

    pub fn field(name: impl Into<String>, value: impl Into<UdqScalar>) -> Self {
        Self::single(
            name.into(),
            UdqVarType::Field,
            FIELD_KEY.to_string(),
            value.into(),
        )
    }

    /// Well set with every well holding `value`.
    pub fn wells<I, S>(name: impl Into<String>, wells: I, value: impl Into<UdqScalar>) -> UdqResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let value = value.into();
        Self::from_entries(name, UdqVarType::Well, wells.into_iter().map(|w| (w, value)))
    }

    pub fn groups<I, S>(name: impl Into<String>, groups: I, value: impl Into<UdqScalar>) -> UdqResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let value = value.into();
        Self::from_entries(name, UdqVarType::Group, groups.into_iter().map(|g| (g, value)))
    }

    fn single(name: String, var_type: UdqVarType, key: String, value: UdqScalar) -> Self {
        let mut index = FxHashMap::default();
        index.insert(key.clone(), 0);
        Self {
            name,
            var_type,
            keys: vec![key],
            values: vec![value.normalized()],
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn var_type(&self) -> UdqVarType {
        self.var_type
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.keys.iter().map(String::as_str)
    }

    pub fn values(&self) -> &[UdqScalar] {
        &self.values
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, UdqScalar)> + '_ {
        self.keys
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn position(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Value for `key`; a key the set does not hold reads as undefined.
    pub fn get(&self, key: &str) -> UdqScalar {
        self.position(key)
            .map_or(UdqScalar::Undefined, |i| self.values[i])
    }

    pub fn get_index(&self, index: usize) -> Option<UdqScalar> {
        self.values.get(index).copied()
    }

    /// The broadcast value of a scalar-typed set (its first entry).
    pub fn scalar_value(&self) -> UdqScalar {
        self.values.first().copied().unwrap_or_default()
    }

    pub fn defined_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(UdqScalar::value).collect()
    }

    pub fn defined_size(&self) -> usize {
        self.values.iter().filter(|v| v.is_defined()).count()
    }

    pub fn assign(&mut self, key: &str, value: impl Into<UdqScalar>) -> UdqResult<()> {
        match self.position(key) {
            Some(i) => {
                self.values[i] = value.into().normalized();
                Ok(())
            }
            None => Err(UdqError::UnknownKey {
                set: self.name.clone(),
                key: key.to_string(),
            }),
        }
    }

    /// Panics if `index >= self.len()`, like slice indexing.
    pub fn assign_index(&mut self, index: usize, value: impl Into<UdqScalar>) {
        self.values[index] = value.into().normalized();
    }

    pub fn assign_all(&mut self, value: impl Into<UdqScalar>) {
        let value = value.into().normalized();
        self.values.fill(value);
    }

    /// Same name, type and key sequence with every value passed through `f`.
    /// Non-finite results are stored as undefined.
    pub fn map_values(&self, mut f: impl FnMut(UdqScalar) -> UdqScalar) -> Self {
        Self {
            name: self.name.clone(),
            var_type: self.var_type,
            keys: self.keys.clone(),
            values: self.values.iter().map(|v| f(*v).normalized()).collect(),
            index: self.index.clone(),
        }
    }

    pub fn renamed(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// All-undefined set named and typed after `self`, keyed by the keys of
    /// `self` in order followed by the keys only `other` holds.
    pub fn key_union(&self, other: &UdqSet) -> Self {
        let mut union = self.map_values(|_| UdqScalar::Undefined);
        for key in other.keys.iter().filter(|k| !self.index.contains_key(*k)) {
            union.index.insert(key.clone(), union.keys.len());
            union.keys.push(key.clone());
            union.values.push(UdqScalar::Undefined);
        }
        union
    }
}

#[cfg(feature = "serde")]
#[derive(Clone, Serialize, Deserialize)]
struct SetRepr {
    name: String,
    var_type: UdqVarType,
    entries: Vec<(String, UdqScalar)>,
}

#[cfg(feature = "serde")]
impl From<UdqSet> for SetRepr {
    fn from(set: UdqSet) -> Self {
        Self {
            name: set.name,
            var_type: set.var_type,
            entries: set.keys.into_iter().zip(set.values).collect(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<SetRepr> for UdqSet {
    type Error = UdqError;

    fn try_from(repr: SetRepr) -> Result<Self, Self::Error> {
        UdqSet::from_entries(repr.name, repr.var_type, repr.entries)
    }
}
