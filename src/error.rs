//! Error types for stat construction and arithmetic.
//!
//! Every failure is one of two kinds (see [`ErrorKind`]): a *type* error,
//! raised when a value is not a usable number, and a *value* error, raised
//! when a number is out of bounds or a modifier has the wrong mode.

use crate::modifier::ModifierKind;
use crate::numeric::Number;
use thiserror::Error;

/// Coarse classification of a [`StatError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input was not an integer or float (booleans included).
    Type,
    /// The input was numeric but violated a bound or mode constraint.
    Value,
}

/// Errors that can occur while building or combining stat values.
///
/// # Examples
///
/// ```rust
/// use rpgstat::{Attribute, ErrorKind};
///
/// let err = Attribute::new(-1, 0, 0, 0, 0, 0, 0, 0).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Value);
/// println!("{}", err); // "strength: expected non-negative value, got -1"
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StatError {
    /// A raw value was not an integer or float.
    ///
    /// `found` names the actual type of the offending value.
    #[error("Expected int or float, got {found}")]
    Type { found: &'static str },

    /// A non-negative-only field received a negative value.
    #[error("{field}: expected non-negative value, got {value}")]
    Negative { field: &'static str, value: Number },

    /// NaN or an infinity was supplied.
    #[error("{field}: expected a finite number")]
    NonFinite { field: &'static str },

    /// The value does not fit in the field's storage.
    #[error("{field}: value {value} is out of range")]
    OutOfRange { field: &'static str, value: Number },

    /// An operation received a modifier of the wrong mode.
    #[error("{operation} requires an {expected} modifier, got {found}")]
    ModifierKind {
        operation: &'static str,
        expected: ModifierKind,
        found: ModifierKind,
    },

    /// Two modifiers of different modes were combined.
    #[error("Cannot combine {left} modifier with {right} modifier")]
    MismatchedModifiers {
        left: ModifierKind,
        right: ModifierKind,
    },

    /// The rules configuration could not be loaded.
    #[error("Invalid stat rules: {0}")]
    InvalidRules(String),
}

impl StatError {
    /// Classify this error as a type error or a value error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatError::Type { .. } => ErrorKind::Type,
            StatError::Negative { .. }
            | StatError::NonFinite { .. }
            | StatError::OutOfRange { .. }
            | StatError::ModifierKind { .. }
            | StatError::MismatchedModifiers { .. }
            | StatError::InvalidRules(_) => ErrorKind::Value,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_error_display() {
        let err = StatError::Type { found: "bool" };
        assert_eq!(err.to_string(), "Expected int or float, got bool");
        assert_eq!(err.kind(), ErrorKind::Type);
    }

    #[test]
    fn test_negative_error_display() {
        let err = StatError::Negative {
            field: "health",
            value: Number::Int(-3),
        };
        assert!(err.to_string().contains("health"));
        assert!(err.to_string().contains("-3"));
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_modifier_kind_error_display() {
        let err = StatError::ModifierKind {
            operation: "scale",
            expected: ModifierKind::Fractional,
            found: ModifierKind::Integer,
        };
        let display = err.to_string();
        assert!(display.contains("scale"));
        assert!(display.contains("fractional"));
        assert!(display.contains("integer"));
        assert_eq!(err.kind(), ErrorKind::Value);
    }

}
