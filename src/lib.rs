//! # rpgstat - Validated Character Stat Values
//!
//! Value objects for the numeric state of a role-playing game character:
//! - **Attributes**: eight non-negative base stats (strength, defense,
//!   intellect, willpower, dexterity, accuracy, speed, luck)
//! - **Status**: health and mana pools bounded by their maximums
//! - **Modifiers**: pending changes to either, typed as integer (additive)
//!   or fractional (percentage) and never mixed
//!
//! ## Core Concepts
//!
//! ### Modifier Arithmetic
//!
//! ```text
//! Attribute ± Attribute          → plus / minus
//! Attribute ± integer modifier   → apply / revert
//! Attribute × fractional modifier → scale
//! Status    ± integer modifier   → apply / revert   (clamped to max)
//! Status    × fractional modifier → scale           (clamped to max)
//! ```
//!
//! Each operation checks the modifier's mode before touching any field and
//! computes the whole result before storing it. Pure forms return a new
//! value; `*_assign` forms mutate in place and leave the value untouched on
//! error.
//!
//! ### Validated Fields
//!
//! Every field setter runs the same check: the value must be an integer or
//! float (booleans are rejected at the untyped boundary), finite, and, for
//! attributes and status, non-negative.
//!
//! ## Example
//!
//! ```rust
//! use rpgstat::*;
//!
//! let mut status = Status::new(10, 10, 10, 10).unwrap();
//!
//! // Negative subtraction heals, but never past the maximum.
//! status.revert_assign(&StatusModifier::integer(-10, -10, 0, 0)).unwrap();
//! assert_eq!((status.health(), status.mana()), (10, 10));
//!
//! // A mode mismatch is a value error.
//! let haste = StatusModifier::fractional(0.1, 0.0, 0.0, 0.0).unwrap();
//! assert_eq!(status.apply(&haste).unwrap_err().kind(), ErrorKind::Value);
//! ```
//!
//! ## Modules
//!
//! - [`attribute`] - Base attributes and attribute modifiers
//! - [`status`] - Health/mana pools and status modifiers
//! - [`modifier`] - Modifier modes
//! - [`numeric`] - Raw numeric input and field validation
//! - [`record`] - Plain-numeric records for persistence
//! - [`rules`] - Arithmetic rules configuration
//! - [`error`] - Error types

pub mod attribute;
pub mod error;
pub mod modifier;
pub mod numeric;
pub mod record;
pub mod rules;
pub mod status;

// Re-export main types for convenience
pub use attribute::{Attribute, AttributeField, AttributeModifier, ATTRIBUTE_FIELDS};
pub use error::{ErrorKind, StatError};
pub use modifier::ModifierKind;
pub use numeric::{validate, Number, Sign};
pub use record::{AttributeModifierRecord, AttributeRecord, StatusModifierRecord, StatusRecord};
pub use rules::{NegativeScalePolicy, StatRules};
pub use status::{Status, StatusField, StatusModifier, STATUS_FIELDS};
