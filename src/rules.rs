//! Runtime rules for modifier arithmetic.
//!
//! The defaults cover normal play. A game can load its own rules from JSON
//! and pass them to the `*_with` variants of the arithmetic operations.

use crate::error::StatError;
use serde::{Deserialize, Serialize};

/// What to do when scaling an [`Attribute`](crate::Attribute) by a
/// fractional modifier would produce a negative value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NegativeScalePolicy {
    /// Fail with a value error and leave the attribute untouched.
    #[default]
    Reject,
    /// Store zero instead of the negative result.
    ClampToZero,
}

/// Rules applied by modifier arithmetic.
///
/// Deserialized rules are validated before use, and every `*_with`
/// operation validates the rules it is given, so rules built from a struct
/// literal cannot bypass [`StatRules::validate`].
///
/// # Examples
///
/// ```rust
/// use rpgstat::{NegativeScalePolicy, StatRules};
///
/// let rules = StatRules::from_json_str(r#"{ "negative_scale": "clamp_to_zero" }"#).unwrap();
/// assert_eq!(rules.fraction_precision, 4);
/// assert_eq!(rules.negative_scale, NegativeScalePolicy::ClampToZero);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RulesDocument")]
pub struct StatRules {
    /// Decimal places kept after combining fractional modifiers.
    pub fraction_precision: u32,
    /// Policy for negative attribute scaling results.
    pub negative_scale: NegativeScalePolicy,
}

impl StatRules {
    /// Largest accepted `fraction_precision`.
    pub const MAX_FRACTION_PRECISION: u32 = 12;

    /// The rules used by operations that do not take explicit rules.
    pub const DEFAULT: StatRules = StatRules {
        fraction_precision: 4,
        negative_scale: NegativeScalePolicy::Reject,
    };

    /// Parse and validate rules from a JSON document.
    ///
    /// Missing keys fall back to [`StatRules::DEFAULT`]; unknown keys are
    /// rejected.
    pub fn from_json_str(json: &str) -> Result<Self, StatError> {
        let document: RulesDocument =
            serde_json::from_str(json).map_err(|e| StatError::InvalidRules(e.to_string()))?;
        StatRules::try_from(document)
    }

    /// Check that the rules are usable.
    pub fn validate(&self) -> Result<(), StatError> {
        if self.fraction_precision > Self::MAX_FRACTION_PRECISION {
            return Err(StatError::InvalidRules(format!(
                "fraction_precision {} exceeds {}",
                self.fraction_precision,
                Self::MAX_FRACTION_PRECISION
            )));
        }
        Ok(())
    }
}

impl Default for StatRules {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Unvalidated rules as they appear in a JSON document.
#[derive(Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RulesDocument {
    fraction_precision: u32,
    negative_scale: NegativeScalePolicy,
}

impl Default for RulesDocument {
    fn default() -> Self {
        Self {
            fraction_precision: StatRules::DEFAULT.fraction_precision,
            negative_scale: StatRules::DEFAULT.negative_scale,
        }
    }
}

impl TryFrom<RulesDocument> for StatRules {
    type Error = StatError;

    fn try_from(document: RulesDocument) -> Result<Self, Self::Error> {
        let rules = StatRules {
            fraction_precision: document.fraction_precision,
            negative_scale: document.negative_scale,
        };
        rules.validate()?;
        Ok(rules)
    }
}
