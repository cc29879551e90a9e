//! Health and mana pools with their modifiers.
//!
//! A [`Status`] holds current and maximum health and mana. The current
//! value never exceeds its maximum: constructors and setters clamp it, and
//! every modifier operation clamps against the newly computed maximum.

use crate::error::StatError;
use crate::modifier::{Deltas, ModifierKind, Step};
use crate::numeric::{trunc_u32, validate, whole_u32, Number, Sign};
use crate::record::{StatusModifierRecord, StatusRecord};
use crate::rules::StatRules;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fields in a status block.
pub const STATUS_FIELDS: usize = 4;

const NAMES: [&str; STATUS_FIELDS] = ["health", "mana", "max_health", "max_mana"];

/// One of the four status fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusField {
    Health,
    Mana,
    MaxHealth,
    MaxMana,
}

impl StatusField {
    /// All fields, in storage order.
    pub const ALL: [StatusField; STATUS_FIELDS] = [
        StatusField::Health,
        StatusField::Mana,
        StatusField::MaxHealth,
        StatusField::MaxMana,
    ];

    /// Field name as used in records and error messages.
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StatusField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Current and maximum health and mana.
///
/// # Examples
///
/// ```rust
/// use rpgstat::{Status, StatusModifier};
///
/// // Current values above their maximum are clamped, not rejected.
/// let status = Status::new(4, 3, 2, 1).unwrap();
/// assert_eq!((status.health(), status.mana()), (2, 1));
///
/// let pool = Status::new(10, 10, 100, 100).unwrap();
/// let regen = StatusModifier::fractional(0.5, 0.1, 0.0, 0.0).unwrap();
/// let pool = pool.scale(&regen).unwrap();
/// assert_eq!((pool.health(), pool.mana()), (60, 20));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "StatusRecord", into = "StatusRecord")]
pub struct Status {
    health: u32,
    mana: u32,
    max_health: u32,
    max_mana: u32,
}

impl Status {
    /// Build a status block.
    ///
    /// Fractional input is floored and negative input fails with a value
    /// error. A current value above its maximum is reduced to the maximum.
    pub fn new(
        health: impl Into<Number>,
        mana: impl Into<Number>,
        max_health: impl Into<Number>,
        max_mana: impl Into<Number>,
    ) -> Result<Self, StatError> {
        Self::from_numbers([health.into(), mana.into(), max_health.into(), max_mana.into()])
    }

    /// Build a status block from raw values in field order.
    pub fn from_numbers(values: [Number; STATUS_FIELDS]) -> Result<Self, StatError> {
        let mut stored = [0; STATUS_FIELDS];
        for (i, value) in values.into_iter().enumerate() {
            stored[i] = value.floor_u32(NAMES[i])?;
        }
        let [health, mana, max_health, max_mana] = stored;
        Ok(Self::clamped(health, mana, max_health, max_mana))
    }

    /// A full pool: current values equal to their maximums.
    pub fn full(max_health: u32, max_mana: u32) -> Self {
        Self {
            health: max_health,
            mana: max_mana,
            max_health,
            max_mana,
        }
    }

    fn clamped(health: u32, mana: u32, max_health: u32, max_mana: u32) -> Self {
        if health > max_health || mana > max_mana {
            log::debug!(
                "clamping status {}/{} {}/{} to its maximums",
                health,
                max_health,
                mana,
                max_mana
            );
        }
        Self {
            health: health.min(max_health),
            mana: mana.min(max_mana),
            max_health,
            max_mana,
        }
    }

    /// Current health.
    pub fn health(&self) -> u32 {
        self.health
    }

    /// Current mana.
    pub fn mana(&self) -> u32 {
        self.mana
    }

    /// Maximum health.
    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    /// Maximum mana.
    pub fn max_mana(&self) -> u32 {
        self.max_mana
    }

    /// Value of one field.
    pub fn get(&self, field: StatusField) -> u32 {
        match field {
            StatusField::Health => self.health,
            StatusField::Mana => self.mana,
            StatusField::MaxHealth => self.max_health,
            StatusField::MaxMana => self.max_mana,
        }
    }

    /// All field values in field order.
    pub fn values(&self) -> [u32; STATUS_FIELDS] {
        [self.health, self.mana, self.max_health, self.max_mana]
    }

    /// Set one field.
    ///
    /// Fractional input is floored and negatives are rejected. Setting a
    /// current value clamps it to its maximum; lowering a maximum clamps the
    /// paired current value.
    pub fn set(&mut self, field: StatusField, value: impl Into<Number>) -> Result<(), StatError> {
        let value = value.into().floor_u32(field.name())?;
        let [mut health, mut mana, mut max_health, mut max_mana] = self.values();
        match field {
            StatusField::Health => health = value,
            StatusField::Mana => mana = value,
            StatusField::MaxHealth => max_health = value,
            StatusField::MaxMana => max_mana = value,
        }
        *self = Self::clamped(health, mana, max_health, max_mana);
        Ok(())
    }

    /// Set one field from an untyped value, rejecting non-numbers.
    pub fn set_value(
        &mut self,
        field: StatusField,
        value: &serde_json::Value,
    ) -> Result<(), StatError> {
        let number = validate(field.name(), value, Sign::NonNegative)?;
        self.set(field, number)
    }

    /// Set current health.
    pub fn set_health(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::Health, value)
    }

    /// Set current mana.
    pub fn set_mana(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::Mana, value)
    }

    /// Set maximum health.
    pub fn set_max_health(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::MaxHealth, value)
    }

    /// Set maximum mana.
    pub fn set_max_mana(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::MaxMana, value)
    }

    /// Whether health has run out.
    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }

    /// Refill health and mana to their maximums.
    pub fn restore(&mut self) {
        self.health = self.max_health;
        self.mana = self.max_mana;
    }

    /// Add an integer modifier.
    ///
    /// Maximums move first; current values then move and are clamped to
    /// the new maximums. Any field that would go negative fails the whole
    /// operation with a value error. Fractional modifiers fail with a value
    /// error.
    pub fn apply(&self, modifier: &StatusModifier) -> Result<Status, StatError> {
        let deltas = modifier.deltas.integers("Status::apply")?;
        let result = self.offset(deltas, Step::Add)?;
        log::trace!("applied {} to {}", modifier, self);
        Ok(result)
    }

    /// Subtract an integer modifier. See [`apply`](Self::apply).
    pub fn revert(&self, modifier: &StatusModifier) -> Result<Status, StatError> {
        let deltas = modifier.deltas.integers("Status::revert")?;
        let result = self.offset(deltas, Step::Sub)?;
        log::trace!("reverted {} from {}", modifier, self);
        Ok(result)
    }

    /// In-place [`apply`](Self::apply).
    pub fn apply_assign(&mut self, modifier: &StatusModifier) -> Result<(), StatError> {
        *self = self.apply(modifier)?;
        Ok(())
    }

    /// In-place [`revert`](Self::revert).
    pub fn revert_assign(&mut self, modifier: &StatusModifier) -> Result<(), StatError> {
        *self = self.revert(modifier)?;
        Ok(())
    }

    /// Scale by a fractional modifier.
    ///
    /// Maximums become `trunc(max * (1 + fraction))`. Current values move
    /// by `max * fraction` (using the maximum before scaling), are clamped
    /// to the new maximum and truncated. Integer modifiers fail with a
    /// value error, as does any negative result.
    pub fn scale(&self, modifier: &StatusModifier) -> Result<Status, StatError> {
        let [health, mana, max_health, max_mana] = *modifier.deltas.fractions("Status::scale")?;

        let new_max_health = f64::from(self.max_health) * (1.0 + max_health);
        let new_max_mana = f64::from(self.max_mana) * (1.0 + max_mana);
        let new_max_health = trunc_u32("max_health", new_max_health)?;
        let new_max_mana = trunc_u32("max_mana", new_max_mana)?;

        let new_health = f64::from(self.health) + f64::from(self.max_health) * health;
        let new_mana = f64::from(self.mana) + f64::from(self.max_mana) * mana;
        let new_health = trunc_u32("health", new_health.min(f64::from(new_max_health)))?;
        let new_mana = trunc_u32("mana", new_mana.min(f64::from(new_max_mana)))?;

        log::trace!("scaled {} by {}", self, modifier);
        Ok(Status {
            health: new_health,
            mana: new_mana,
            max_health: new_max_health,
            max_mana: new_max_mana,
        })
    }

    /// In-place [`scale`](Self::scale).
    pub fn scale_assign(&mut self, modifier: &StatusModifier) -> Result<(), StatError> {
        *self = self.scale(modifier)?;
        Ok(())
    }

    fn offset(&self, deltas: &[i64; STATUS_FIELDS], step: Step) -> Result<Status, StatError> {
        let [health, mana, max_health, max_mana] = *deltas;
        let moved = |field: &'static str, current: u32, delta: i64| {
            step.int(i64::from(current), delta)
                .ok_or(StatError::OutOfRange {
                    field,
                    value: Number::Int(delta),
                })
        };

        let new_max_health = moved("max_health", self.max_health, max_health)?;
        let new_max_mana = moved("max_mana", self.max_mana, max_mana)?;
        let new_max_health = whole_u32("max_health", new_max_health)?;
        let new_max_mana = whole_u32("max_mana", new_max_mana)?;

        let new_health = moved("health", self.health, health)?.min(i64::from(new_max_health));
        let new_mana = moved("mana", self.mana, mana)?.min(i64::from(new_max_mana));

        Ok(Status {
            health: whole_u32("health", new_health)?,
            mana: whole_u32("mana", new_mana)?,
            max_health: new_max_health,
            max_mana: new_max_mana,
        })
    }
}

impl TryFrom<StatusRecord> for Status {
    type Error = StatError;

    fn try_from(record: StatusRecord) -> Result<Self, Self::Error> {
        Self::from_numbers(record.into_numbers())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "HP {}/{} MP {}/{}",
            self.health, self.max_health, self.mana, self.max_mana
        )
    }
}

/// A pending change to a [`Status`].
///
/// Integer modifiers add to current values and may change the maximums.
/// Fractional modifiers move current values by a fraction of the maximum
/// and rescale the maximums by `1 + fraction`.
///
/// # Examples
///
/// ```rust
/// use rpgstat::StatusModifier;
///
/// let potion = StatusModifier::integer(25, 0, 0, 0);
/// assert_eq!(potion.to_string(), "StatusModifier +25/+0 (+0/+0)");
///
/// let aura = StatusModifier::fractional(0.5, 0.1, 0.0, 0.0).unwrap();
/// assert_eq!(aura.to_string(), "StatusModifier +50%/+10% (+0%/+0%)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StatusModifierRecord", into = "StatusModifierRecord")]
pub struct StatusModifier {
    deltas: Deltas<STATUS_FIELDS>,
}

impl StatusModifier {
    /// Build a modifier of `kind` from raw values.
    ///
    /// Values are truncated toward zero for integer modifiers and widened
    /// for fractional ones.
    pub fn new(
        kind: ModifierKind,
        health: impl Into<Number>,
        mana: impl Into<Number>,
        max_health: impl Into<Number>,
        max_mana: impl Into<Number>,
    ) -> Result<Self, StatError> {
        Self::from_numbers(
            kind,
            [health.into(), mana.into(), max_health.into(), max_mana.into()],
        )
    }

    /// Build a modifier of `kind` from raw values in field order.
    pub fn from_numbers(
        kind: ModifierKind,
        values: [Number; STATUS_FIELDS],
    ) -> Result<Self, StatError> {
        let deltas = Deltas::from_numbers(kind, &NAMES, values)?;
        Ok(Self { deltas })
    }

    /// An integer modifier.
    pub fn integer(health: i64, mana: i64, max_health: i64, max_mana: i64) -> Self {
        Self {
            deltas: Deltas::Integer([health, mana, max_health, max_mana]),
        }
    }

    /// A fractional modifier. Fails on NaN or infinite input.
    pub fn fractional(
        health: f64,
        mana: f64,
        max_health: f64,
        max_mana: f64,
    ) -> Result<Self, StatError> {
        Self::new(ModifierKind::Fractional, health, mana, max_health, max_mana)
    }

    /// A modifier of `kind` with every field zero.
    pub fn zero(kind: ModifierKind) -> Self {
        Self {
            deltas: Deltas::zero(kind),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, field: StatusField, value: impl Into<Number>) -> Result<Self, StatError> {
        self.set(field, value)?;
        Ok(self)
    }

    /// The mode chosen at construction.
    pub fn kind(&self) -> ModifierKind {
        self.deltas.kind()
    }

    /// Whether this modifier holds whole-number deltas.
    pub fn is_integer(&self) -> bool {
        self.kind() == ModifierKind::Integer
    }

    /// Whether this modifier holds fractions.
    pub fn is_fractional(&self) -> bool {
        self.kind() == ModifierKind::Fractional
    }

    /// Whether applying this modifier is a no-op.
    pub fn is_zero(&self) -> bool {
        self.deltas.is_zero()
    }

    /// Value of one field, in this modifier's representation.
    pub fn get(&self, field: StatusField) -> Number {
        self.deltas.get(field.index())
    }

    /// Current health delta.
    pub fn health(&self) -> Number {
        self.get(StatusField::Health)
    }

    /// Current mana delta.
    pub fn mana(&self) -> Number {
        self.get(StatusField::Mana)
    }

    /// Maximum health delta.
    pub fn max_health(&self) -> Number {
        self.get(StatusField::MaxHealth)
    }

    /// Maximum mana delta.
    pub fn max_mana(&self) -> Number {
        self.get(StatusField::MaxMana)
    }

    /// All field values in field order.
    pub fn numbers(&self) -> [Number; STATUS_FIELDS] {
        StatusField::ALL.map(|field| self.get(field))
    }

    /// Set one field. Negative values are allowed.
    pub fn set(&mut self, field: StatusField, value: impl Into<Number>) -> Result<(), StatError> {
        self.deltas.set(field.index(), field.name(), value.into())
    }

    /// Set one field from an untyped value, rejecting non-numbers.
    pub fn set_value(
        &mut self,
        field: StatusField,
        value: &serde_json::Value,
    ) -> Result<(), StatError> {
        let number = validate(field.name(), value, Sign::Any)?;
        self.set(field, number)
    }

    /// Set the health delta.
    pub fn set_health(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::Health, value)
    }

    /// Set the mana delta.
    pub fn set_mana(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::Mana, value)
    }

    /// Set the max health delta.
    pub fn set_max_health(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::MaxHealth, value)
    }

    /// Set the max mana delta.
    pub fn set_max_mana(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(StatusField::MaxMana, value)
    }

    /// Sum with a modifier of the same mode.
    pub fn plus(&self, other: &StatusModifier) -> Result<StatusModifier, StatError> {
        self.plus_with(other, &StatRules::DEFAULT)
    }

    /// Difference with a modifier of the same mode.
    pub fn minus(&self, other: &StatusModifier) -> Result<StatusModifier, StatError> {
        self.minus_with(other, &StatRules::DEFAULT)
    }

    /// [`plus`](Self::plus) with explicit rules for fraction rounding.
    pub fn plus_with(
        &self,
        other: &StatusModifier,
        rules: &StatRules,
    ) -> Result<StatusModifier, StatError> {
        rules.validate()?;
        let deltas = self
            .deltas
            .merge(&other.deltas, Step::Add, &NAMES, rules.fraction_precision)?;
        Ok(Self { deltas })
    }

    /// [`minus`](Self::minus) with explicit rules for fraction rounding.
    pub fn minus_with(
        &self,
        other: &StatusModifier,
        rules: &StatRules,
    ) -> Result<StatusModifier, StatError> {
        rules.validate()?;
        let deltas = self
            .deltas
            .merge(&other.deltas, Step::Sub, &NAMES, rules.fraction_precision)?;
        Ok(Self { deltas })
    }

    /// In-place [`plus`](Self::plus).
    pub fn plus_assign(&mut self, other: &StatusModifier) -> Result<(), StatError> {
        *self = self.plus(other)?;
        Ok(())
    }

    /// In-place [`minus`](Self::minus).
    pub fn minus_assign(&mut self, other: &StatusModifier) -> Result<(), StatError> {
        *self = self.minus(other)?;
        Ok(())
    }
}

impl TryFrom<StatusModifierRecord> for StatusModifier {
    type Error = StatError;

    fn try_from(record: StatusModifierRecord) -> Result<Self, Self::Error> {
        let kind = ModifierKind::from_frac(record.frac);
        Self::from_numbers(kind, record.into_numbers())
    }
}

impl fmt::Display for StatusModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StatusModifier {}/{} ({}/{})",
            self.deltas.display_at(0),
            self.deltas.display_at(1),
            self.deltas.display_at(2),
            self.deltas.display_at(3)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_new_clamps_overflow() {
        let s = Status::new(4, 3, 2, 1).unwrap();
        assert_eq!(s.values(), [2, 1, 2, 1]);
    }

    #[test]
    fn test_new_floors_fractions() {
        let s = Status::new(0.1, 5.2, 9.3, 7.4).unwrap();
        assert_eq!(s.values(), [0, 5, 9, 7]);
    }

    #[test]
    fn test_new_rejects_negative() {
        let err = Status::new(-1, -2, -3, -4).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
    }

    #[test]
    fn test_setters_clamp() {
        let mut s = Status::new(1, 2, 3, 4).unwrap();
        s.set_health(5).unwrap();
        s.set_mana(6).unwrap();
        assert_eq!((s.health(), s.mana()), (3, 4));

        s.set_max_health(7).unwrap();
        s.set_max_mana(8).unwrap();
        s.set_health(9).unwrap();
        s.set_mana(10).unwrap();
        assert_eq!(s.values(), [7, 8, 7, 8]);

        s.set_max_health(6.5).unwrap();
        s.set_max_mana(3.9).unwrap();
        assert_eq!(s.values(), [6, 3, 6, 3]);
    }

    #[test]
    fn test_setters_reject_negative_and_bool() {
        let mut s = Status::new(1, 2, 3, 4).unwrap();
        assert_eq!(s.set_max_health(-3).unwrap_err().kind(), ErrorKind::Value);
        let err = s.set_value(StatusField::MaxMana, &json!(true)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
        assert_eq!(s.values(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_scale_uses_pre_scale_max() {
        let s = Status::new(50, 0, 100, 10).unwrap();
        let m = StatusModifier::fractional(0.1, 0.0, 1.0, 0.0).unwrap();
        let scaled = s.scale(&m).unwrap();
        assert_eq!(scaled.max_health(), 200);
        assert_eq!(scaled.health(), 60);
    }

    #[test]
    fn test_scale_truncates() {
        let s = Status::new(0, 0, 7, 7).unwrap();
        let m = StatusModifier::fractional(0.5, 0.0, 0.5, 0.0).unwrap();
        let scaled = s.scale(&m).unwrap();
        // 7 * 1.5 = 10.5 -> 10; 0 + 7 * 0.5 = 3.5 -> 3
        assert_eq!(scaled.max_health(), 10);
        assert_eq!(scaled.health(), 3);
    }

    #[test]
    fn test_depleted_and_restore() {
        let mut s = Status::new(0, 1, 10, 5).unwrap();
        assert!(s.is_depleted());
        s.restore();
        assert_eq!(s, Status::full(10, 5));
        assert!(!s.is_depleted());
    }

    #[test]
    fn test_display() {
        let s = Status::new(3, 1, 5, 4).unwrap();
        assert_eq!(s.to_string(), "HP 3/5 MP 1/4");
    }

    #[test]
    fn test_modifier_integer_truncates() {
        let m = StatusModifier::new(ModifierKind::Integer, 1.2, 2.4, 9.0, 5.2).unwrap();
        assert_eq!(m.numbers(), [Number::Int(1), Number::Int(2), Number::Int(9), Number::Int(5)]);
    }

    #[test]
    fn test_modifier_setters_allow_negative() {
        let mut m = StatusModifier::integer(1, 3, 9, 20);
        m.set_health(-1).unwrap();
        m.set_max_mana(-4.7).unwrap();
        assert_eq!(m.health(), Number::Int(-1));
        assert_eq!(m.max_mana(), Number::Int(-4));
        let err = m.set_value(StatusField::Mana, &json!("mana")).unwrap_err();
        assert_eq!(err, StatError::Type { found: "string" });
    }
}
