//! Modifier modes and the delta storage shared by both modifier types.
//!
//! A modifier is either *integer* (additive deltas) or *fractional*
//! (percentages). The mode is fixed when the modifier is built, and the
//! storage representation always matches it: integer modifiers hold `i64`
//! deltas, fractional ones hold `f64` fractions.

use crate::error::StatError;
use crate::numeric::{round_to_places, Number};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mode of a modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierKind {
    /// Whole-number deltas, applied with `apply`/`revert`.
    Integer,
    /// Fractions of the current value, applied with `scale`.
    Fractional,
}

impl ModifierKind {
    /// Mode from the persisted `frac` flag.
    pub fn from_frac(frac: bool) -> Self {
        if frac {
            ModifierKind::Fractional
        } else {
            ModifierKind::Integer
        }
    }

    /// Whether this is [`ModifierKind::Fractional`].
    pub fn is_fractional(self) -> bool {
        self == ModifierKind::Fractional
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierKind::Integer => write!(f, "integer"),
            ModifierKind::Fractional => write!(f, "fractional"),
        }
    }
}

/// Direction of an additive combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Add,
    Sub,
}

impl Step {
    pub(crate) fn int(self, a: i64, b: i64) -> Option<i64> {
        match self {
            Step::Add => a.checked_add(b),
            Step::Sub => a.checked_sub(b),
        }
    }

    pub(crate) fn float(self, a: f64, b: f64) -> f64 {
        match self {
            Step::Add => a + b,
            Step::Sub => a - b,
        }
    }
}

/// Per-field deltas of a modifier with `N` fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Deltas<const N: usize> {
    Integer([i64; N]),
    Fractional([f64; N]),
}

impl<const N: usize> Deltas<N> {
    pub(crate) fn zero(kind: ModifierKind) -> Self {
        match kind {
            ModifierKind::Integer => Deltas::Integer([0; N]),
            ModifierKind::Fractional => Deltas::Fractional([0.0; N]),
        }
    }

    /// Validate and convert raw values into the representation of `kind`.
    pub(crate) fn from_numbers(
        kind: ModifierKind,
        names: &[&'static str; N],
        values: [Number; N],
    ) -> Result<Self, StatError> {
        let mut deltas = Self::zero(kind);
        for (i, value) in values.into_iter().enumerate() {
            deltas.set(i, names[i], value)?;
        }
        Ok(deltas)
    }

    pub(crate) fn kind(&self) -> ModifierKind {
        match self {
            Deltas::Integer(_) => ModifierKind::Integer,
            Deltas::Fractional(_) => ModifierKind::Fractional,
        }
    }

    pub(crate) fn get(&self, index: usize) -> Number {
        match self {
            Deltas::Integer(values) => Number::Int(values[index]),
            Deltas::Fractional(values) => Number::Float(values[index]),
        }
    }

    /// Store `value` at `index`, converted to this modifier's representation.
    pub(crate) fn set(
        &mut self,
        index: usize,
        name: &'static str,
        value: Number,
    ) -> Result<(), StatError> {
        match self {
            Deltas::Integer(values) => values[index] = value.trunc_i64(name)?,
            Deltas::Fractional(values) => values[index] = value.finite_f64(name)?,
        }
        Ok(())
    }

    /// Integer deltas, or a mode error naming `operation`.
    pub(crate) fn integers(&self, operation: &'static str) -> Result<&[i64; N], StatError> {
        match self {
            Deltas::Integer(values) => Ok(values),
            Deltas::Fractional(_) => Err(StatError::ModifierKind {
                operation,
                expected: ModifierKind::Integer,
                found: ModifierKind::Fractional,
            }),
        }
    }

    /// Fractional deltas, or a mode error naming `operation`.
    pub(crate) fn fractions(&self, operation: &'static str) -> Result<&[f64; N], StatError> {
        match self {
            Deltas::Fractional(values) => Ok(values),
            Deltas::Integer(_) => Err(StatError::ModifierKind {
                operation,
                expected: ModifierKind::Fractional,
                found: ModifierKind::Integer,
            }),
        }
    }

    /// Combine with another modifier of the same mode.
    ///
    /// Fractional results are rounded to `precision` decimal places so
    /// repeated combination does not accumulate float drift.
    pub(crate) fn merge(
        &self,
        other: &Self,
        step: Step,
        names: &[&'static str; N],
        precision: u32,
    ) -> Result<Self, StatError> {
        match (self, other) {
            (Deltas::Integer(a), Deltas::Integer(b)) => {
                let mut out = [0; N];
                for (i, slot) in out.iter_mut().enumerate() {
                    *slot = step.int(a[i], b[i]).ok_or(StatError::OutOfRange {
                        field: names[i],
                        value: Number::Int(a[i]),
                    })?;
                }
                Ok(Deltas::Integer(out))
            }
            (Deltas::Fractional(a), Deltas::Fractional(b)) => {
                let mut out = [0.0; N];
                for (i, slot) in out.iter_mut().enumerate() {
                    let value = round_to_places(step.float(a[i], b[i]), precision);
                    *slot = Number::Float(value).finite_f64(names[i])?;
                }
                Ok(Deltas::Fractional(out))
            }
            _ => Err(StatError::MismatchedModifiers {
                left: self.kind(),
                right: other.kind(),
            }),
        }
    }

    /// Whether every delta is zero.
    pub(crate) fn is_zero(&self) -> bool {
        match self {
            Deltas::Integer(values) => values.iter().all(|v| *v == 0),
            Deltas::Fractional(values) => values.iter().all(|v| *v == 0.0),
        }
    }

    /// Signed display of one delta: `+3` or `+50%`.
    pub(crate) fn display_at(&self, index: usize) -> String {
        match self {
            Deltas::Integer(values) => format!("{:+}", values[index]),
            Deltas::Fractional(values) => format!("{:+.0}%", values[index] * 100.0),
        }
    }
}
