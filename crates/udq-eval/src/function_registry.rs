use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use udq_common::{UdqError, UdqResult};

use crate::function::{BinaryFunction, ScalarFunction, UdqFamily, UdqFunction, UnaryFunction};

/// Name-keyed lookup table for the three function families.
///
/// Names are unique within a family and case-sensitive. The table is safe to
/// share across threads; registration is expected once, at setup.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    scalar: DashMap<Arc<str>, ScalarFunction>,
    unary: DashMap<Arc<str>, UnaryFunction>,
    binary: DashMap<Arc<str>, BinaryFunction>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh table holding the builtin catalog.
    pub fn with_builtins() -> UdqResult<Self> {
        let registry = Self::new();
        crate::builtins::load_builtins(&registry)?;
        Ok(registry)
    }

    pub fn register(&self, f: impl Into<UdqFunction>) -> UdqResult<()> {
        let f = f.into();
        validate_name(f.name())?;
        #[cfg(feature = "tracing")]
        tracing::debug!(family = %f.family(), name = f.name(), caps = ?f.caps(), "udq_register");
        let name: Arc<str> = Arc::from(f.name());
        match f {
            UdqFunction::Scalar(s) => insert_unique(&self.scalar, UdqFamily::Scalar, name, s),
            UdqFunction::Unary(u) => insert_unique(&self.unary, UdqFamily::Unary, name, u),
            UdqFunction::Binary(b) => insert_unique(&self.binary, UdqFamily::Binary, name, b),
        }
    }

    pub fn get(&self, family: UdqFamily, name: &str) -> Option<UdqFunction> {
        match family {
            UdqFamily::Scalar => self.get_scalar(name).map(UdqFunction::Scalar),
            UdqFamily::Unary => self.get_unary(name).map(UdqFunction::Unary),
            UdqFamily::Binary => self.get_binary(name).map(UdqFunction::Binary),
        }
    }

    pub fn get_scalar(&self, name: &str) -> Option<ScalarFunction> {
        self.scalar.get(name).map(|v| v.value().clone())
    }

    pub fn get_unary(&self, name: &str) -> Option<UnaryFunction> {
        self.unary.get(name).map(|v| v.value().clone())
    }

    pub fn get_binary(&self, name: &str) -> Option<BinaryFunction> {
        self.binary.get(name).map(|v| v.value().clone())
    }

    pub fn contains(&self, family: UdqFamily, name: &str) -> bool {
        match family {
            UdqFamily::Scalar => self.scalar.contains_key(name),
            UdqFamily::Unary => self.unary.contains_key(name),
            UdqFamily::Binary => self.binary.contains_key(name),
        }
    }

    /// Registered names of one family, sorted.
    pub fn names(&self, family: UdqFamily) -> Vec<String> {
        let mut names: Vec<String> = match family {
            UdqFamily::Scalar => self.scalar.iter().map(|e| e.key().to_string()).collect(),
            UdqFamily::Unary => self.unary.iter().map(|e| e.key().to_string()).collect(),
            UdqFamily::Binary => self.binary.iter().map(|e| e.key().to_string()).collect(),
        };
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.scalar.len() + self.unary.len() + self.binary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn validate_name(name: &str) -> UdqResult<()> {
    if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(UdqError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

fn insert_unique<T>(
    map: &DashMap<Arc<str>, T>,
    family: UdqFamily,
    name: Arc<str>,
    f: T,
) -> UdqResult<()> {
    match map.entry(name) {
        Entry::Occupied(slot) => Err(UdqError::DuplicateFunction {
            family: family.to_string(),
            name: slot.key().to_string(),
        }),
        Entry::Vacant(slot) => {
            slot.insert(f);
            Ok(())
        }
    }
}

static GLOBAL: OnceCell<FunctionRegistry> = OnceCell::new();

/// Process-wide table holding the builtin catalog, built on first use.
pub fn global() -> UdqResult<&'static FunctionRegistry> {
    GLOBAL.get_or_try_init(FunctionRegistry::with_builtins)
}
