//! Construction-time failures for UDQ sets, parameters, and function tables.
//!
//! Evaluation never produces one of these: domain problems and missing data are
//! encoded as [`UdqScalar::Undefined`](crate::UdqScalar) entries instead. The only
//! places that return `UdqError` are the ones that run once at setup, such as
//! building a set, registering a function, or validating `UDQPARAM` settings.

use thiserror::Error;

/// Result alias used by every fallible setup API in the workspace.
pub type UdqResult<T> = Result<T, UdqError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum UdqError {
    /// A function with the same name already exists in that family.
    #[error("{family} function '{name}' is already registered")]
    DuplicateFunction {
        /// Family label (`scalar`, `unary`, `binary`)
        family: String,
        /// Offending name
        name: String,
    },

    /// Function names must be non-empty and free of whitespace.
    #[error("invalid function name '{name}'")]
    InvalidName { name: String },

    /// A set was constructed with the same key twice.
    #[error("key '{key}' appears more than once in set '{set}'")]
    DuplicateKey { set: String, key: String },

    /// A `Scalar` or `Field` set must hold exactly one entry.
    #[error("{var_type} set '{set}' must hold exactly one entry, got {len}")]
    ScalarShape {
        set: String,
        var_type: String,
        len: usize,
    },

    /// Assignment to a key the set was not constructed with.
    #[error("set '{set}' has no entry for key '{key}'")]
    UnknownKey { set: String, key: String },

    /// A configuration value is outside its permitted domain.
    #[error("invalid UDQ parameter {parameter}: {message}")]
    InvalidParameter { parameter: String, message: String },
}

impl UdqError {
    pub fn invalid_parameter(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            message: message.into(),
        }
    }
}
