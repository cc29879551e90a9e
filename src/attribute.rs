//! Core character attributes and attribute modifiers.
//!
//! An [`Attribute`] is a block of eight non-negative whole-number stats.
//! It changes through an [`AttributeModifier`]:
//!
//! - integer modifiers are added or subtracted field by field
//!   ([`Attribute::apply`], [`Attribute::revert`]);
//! - fractional modifiers scale each field by `1 + fraction` and round half
//!   to even ([`Attribute::scale`]).
//!
//! Every operation computes the complete result before anything is stored,
//! so a failed in-place operation leaves the attribute untouched.

use crate::error::StatError;
use crate::modifier::{Deltas, ModifierKind, Step};
use crate::numeric::{validate, whole_u32, Number, Sign};
use crate::record::{AttributeModifierRecord, AttributeRecord};
use crate::rules::{NegativeScalePolicy, StatRules};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of fields in an attribute block.
pub const ATTRIBUTE_FIELDS: usize = 8;

const NAMES: [&str; ATTRIBUTE_FIELDS] = [
    "strength",
    "defense",
    "intellect",
    "willpower",
    "dexterity",
    "accuracy",
    "speed",
    "luck",
];

/// One of the eight attribute fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeField {
    Strength,
    Defense,
    Intellect,
    Willpower,
    Dexterity,
    Accuracy,
    Speed,
    Luck,
}

impl AttributeField {
    /// All fields, in storage order.
    pub const ALL: [AttributeField; ATTRIBUTE_FIELDS] = [
        AttributeField::Strength,
        AttributeField::Defense,
        AttributeField::Intellect,
        AttributeField::Willpower,
        AttributeField::Dexterity,
        AttributeField::Accuracy,
        AttributeField::Speed,
        AttributeField::Luck,
    ];

    /// Field name as used in records and error messages.
    pub fn name(self) -> &'static str {
        NAMES[self.index()]
    }

    /// Three-letter label used when displaying an attribute block.
    pub fn abbrev(self) -> &'static str {
        match self {
            AttributeField::Strength => "STR",
            AttributeField::Defense => "DEF",
            AttributeField::Intellect => "INT",
            AttributeField::Willpower => "WIL",
            AttributeField::Dexterity => "DEX",
            AttributeField::Accuracy => "ACC",
            AttributeField::Speed => "SPD",
            AttributeField::Luck => "LCK",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AttributeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A block of eight non-negative character stats.
///
/// # Examples
///
/// ```rust
/// use rpgstat::{Attribute, AttributeModifier};
///
/// let base = Attribute::new(10, 10, 10, 10, 10, 10, 10, 10).unwrap();
/// let ring = AttributeModifier::integer([5, 0, 0, 0, 0, 0, 0, -2]);
///
/// let equipped = base.apply(&ring).unwrap();
/// assert_eq!(equipped.strength(), 15);
/// assert_eq!(equipped.luck(), 8);
///
/// // Percentage modifiers go through `scale`, never `apply`.
/// let blessing =
///     AttributeModifier::fractional([0.25, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
/// assert!(base.apply(&blessing).is_err());
/// assert_eq!(base.scale(&blessing).unwrap().strength(), 12); // round(12.5) == 12
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AttributeRecord", into = "AttributeRecord")]
pub struct Attribute {
    values: [u32; ATTRIBUTE_FIELDS],
}

impl Attribute {
    /// Build an attribute block from eight raw values.
    ///
    /// Fractional input is floored, not rounded. Negative input fails with a
    /// value error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpgstat::Attribute;
    ///
    /// let attr = Attribute::new(10.9, 20, 30, 40, 50, 60, 70, 80).unwrap();
    /// assert_eq!(attr.strength(), 10);
    /// assert!(Attribute::new(-1, 0, 0, 0, 0, 0, 0, 0).is_err());
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        strength: impl Into<Number>,
        defense: impl Into<Number>,
        intellect: impl Into<Number>,
        willpower: impl Into<Number>,
        dexterity: impl Into<Number>,
        accuracy: impl Into<Number>,
        speed: impl Into<Number>,
        luck: impl Into<Number>,
    ) -> Result<Self, StatError> {
        Self::from_numbers([
            strength.into(),
            defense.into(),
            intellect.into(),
            willpower.into(),
            dexterity.into(),
            accuracy.into(),
            speed.into(),
            luck.into(),
        ])
    }

    /// Build an attribute block from raw values in field order.
    pub fn from_numbers(values: [Number; ATTRIBUTE_FIELDS]) -> Result<Self, StatError> {
        let mut stored = [0; ATTRIBUTE_FIELDS];
        for (i, value) in values.into_iter().enumerate() {
            stored[i] = value.floor_u32(NAMES[i])?;
        }
        Ok(Self { values: stored })
    }

    /// All field values in field order.
    pub fn values(&self) -> [u32; ATTRIBUTE_FIELDS] {
        self.values
    }

    /// Value of one field.
    pub fn get(&self, field: AttributeField) -> u32 {
        self.values[field.index()]
    }

    /// Strength (STR).
    pub fn strength(&self) -> u32 {
        self.get(AttributeField::Strength)
    }

    /// Defense (DEF).
    pub fn defense(&self) -> u32 {
        self.get(AttributeField::Defense)
    }

    /// Intellect (INT).
    pub fn intellect(&self) -> u32 {
        self.get(AttributeField::Intellect)
    }

    /// Willpower (WIL).
    pub fn willpower(&self) -> u32 {
        self.get(AttributeField::Willpower)
    }

    /// Dexterity (DEX).
    pub fn dexterity(&self) -> u32 {
        self.get(AttributeField::Dexterity)
    }

    /// Accuracy (ACC).
    pub fn accuracy(&self) -> u32 {
        self.get(AttributeField::Accuracy)
    }

    /// Speed (SPD).
    pub fn speed(&self) -> u32 {
        self.get(AttributeField::Speed)
    }

    /// Luck (LCK).
    pub fn luck(&self) -> u32 {
        self.get(AttributeField::Luck)
    }

    /// Set one field. Fractional input is floored; negatives are rejected.
    pub fn set(
        &mut self,
        field: AttributeField,
        value: impl Into<Number>,
    ) -> Result<(), StatError> {
        self.values[field.index()] = value.into().floor_u32(field.name())?;
        Ok(())
    }

    /// Set one field from an untyped value, rejecting non-numbers.
    pub fn set_value(
        &mut self,
        field: AttributeField,
        value: &serde_json::Value,
    ) -> Result<(), StatError> {
        let number = validate(field.name(), value, Sign::NonNegative)?;
        self.set(field, number)
    }

    /// Set strength (STR).
    pub fn set_strength(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Strength, value)
    }

    /// Set defense (DEF).
    pub fn set_defense(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Defense, value)
    }

    /// Set intellect (INT).
    pub fn set_intellect(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Intellect, value)
    }

    /// Set willpower (WIL).
    pub fn set_willpower(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Willpower, value)
    }

    /// Set dexterity (DEX).
    pub fn set_dexterity(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Dexterity, value)
    }

    /// Set accuracy (ACC).
    pub fn set_accuracy(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Accuracy, value)
    }

    /// Set speed (SPD).
    pub fn set_speed(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Speed, value)
    }

    /// Set luck (LCK).
    pub fn set_luck(&mut self, value: impl Into<Number>) -> Result<(), StatError> {
        self.set(AttributeField::Luck, value)
    }

    /// Field-wise sum of two attribute blocks.
    pub fn plus(&self, other: &Attribute) -> Result<Attribute, StatError> {
        self.offset(&other.as_deltas(), Step::Add)
    }

    /// Field-wise difference of two attribute blocks.
    ///
    /// Fails with a value error if any field would drop below zero.
    pub fn minus(&self, other: &Attribute) -> Result<Attribute, StatError> {
        self.offset(&other.as_deltas(), Step::Sub)
    }

    /// In-place [`plus`](Self::plus).
    pub fn plus_assign(&mut self, other: &Attribute) -> Result<(), StatError> {
        *self = self.plus(other)?;
        Ok(())
    }

    /// In-place [`minus`](Self::minus).
    pub fn minus_assign(&mut self, other: &Attribute) -> Result<(), StatError> {
        *self = self.minus(other)?;
        Ok(())
    }

    /// Add an integer modifier.
    ///
    /// Fractional modifiers fail with a value error.
    pub fn apply(&self, modifier: &AttributeModifier) -> Result<Attribute, StatError> {
        let deltas = modifier.deltas.integers("Attribute::apply")?;
        let result = self.offset(deltas, Step::Add)?;
        log::trace!("applied {} to attributes", modifier);
        Ok(result)
    }

    /// Subtract an integer modifier.
    pub fn revert(&self, modifier: &AttributeModifier) -> Result<Attribute, StatError> {
        let deltas = modifier.deltas.integers("Attribute::revert")?;
        let result = self.offset(deltas, Step::Sub)?;
        log::trace!("reverted {} from attributes", modifier);
        Ok(result)
    }

    /// In-place [`apply`](Self::apply).
    pub fn apply_assign(&mut self, modifier: &AttributeModifier) -> Result<(), StatError> {
        *self = self.apply(modifier)?;
        Ok(())
    }

    /// In-place [`revert`](Self::revert).
    pub fn revert_assign(&mut self, modifier: &AttributeModifier) -> Result<(), StatError> {
        *self = self.revert(modifier)?;
        Ok(())
    }

    /// Scale by a fractional modifier using the default rules.
    ///
    /// Each field becomes `round_half_even(old * (1 + fraction))`.
    pub fn scale(&self, modifier: &AttributeModifier) -> Result<Attribute, StatError> {
        self.scale_with(modifier, &StatRules::DEFAULT)
    }

    /// Scale by a fractional modifier.
    ///
    /// Integer modifiers fail with a value error. A negative result is
    /// handled according to `rules.negative_scale`.
    pub fn scale_with(
        &self,
        modifier: &AttributeModifier,
        rules: &StatRules,
    ) -> Result<Attribute, StatError> {
        rules.validate()?;
        let fractions = modifier.deltas.fractions("Attribute::scale")?;
        let mut values = [0; ATTRIBUTE_FIELDS];
        for (i, slot) in values.iter_mut().enumerate() {
            let field = NAMES[i];
            let scaled = (f64::from(self.values[i]) * (1.0 + fractions[i])).round_ties_even();
            let scaled = Number::Float(scaled).check(field, Sign::Any)?.as_f64();
            *slot = if scaled < 0.0 {
                match rules.negative_scale {
                    NegativeScalePolicy::Reject => {
                        return Err(StatError::Negative {
                            field,
                            value: Number::Float(scaled),
                        })
                    }
                    NegativeScalePolicy::ClampToZero => {
                        log::warn!("{} scaled to {}, clamping to zero", field, scaled);
                        0
                    }
                }
            } else if scaled > f64::from(u32::MAX) {
                return Err(StatError::OutOfRange {
                    field,
                    value: Number::Float(scaled),
                });
            } else {
                scaled as u32
            };
        }
        log::trace!("scaled attributes by {}", modifier);
        Ok(Attribute { values })
    }

    /// In-place [`scale`](Self::scale).
    pub fn scale_assign(&mut self, modifier: &AttributeModifier) -> Result<(), StatError> {
        *self = self.scale(modifier)?;
        Ok(())
    }

    /// In-place [`scale_with`](Self::scale_with).
    pub fn scale_assign_with(
        &mut self,
        modifier: &AttributeModifier,
        rules: &StatRules,
    ) -> Result<(), StatError> {
        *self = self.scale_with(modifier, rules)?;
        Ok(())
    }

    fn as_deltas(&self) -> [i64; ATTRIBUTE_FIELDS] {
        self.values.map(i64::from)
    }

    fn offset(&self, deltas: &[i64; ATTRIBUTE_FIELDS], step: Step) -> Result<Attribute, StatError> {
        let mut values = [0; ATTRIBUTE_FIELDS];
        for (i, slot) in values.iter_mut().enumerate() {
            let old = i64::from(self.values[i]);
            let new = step.int(old, deltas[i]).ok_or(StatError::OutOfRange {
                field: NAMES[i],
                value: Number::Int(deltas[i]),
            })?;
            *slot = whole_u32(NAMES[i], new)?;
        }
        Ok(Attribute { values })
    }
}

impl From<[u32; ATTRIBUTE_FIELDS]> for Attribute {
    fn from(values: [u32; ATTRIBUTE_FIELDS]) -> Self {
        Self { values }
    }
}

impl TryFrom<AttributeRecord> for Attribute {
    type Error = StatError;

    fn try_from(record: AttributeRecord) -> Result<Self, Self::Error> {
        Self::from_numbers(record.into_numbers())
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in AttributeField::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field.abbrev(), self.get(*field))?;
        }
        Ok(())
    }
}

/// A pending change to an [`Attribute`].
///
/// The mode ([`ModifierKind`]) is chosen at construction and never changes.
/// Integer modifiers store whole-number deltas; fractional modifiers store
/// fractions such as `0.1` for +10%. Values of either mode may be negative.
///
/// # Examples
///
/// ```rust
/// use rpgstat::{AttributeField, AttributeModifier, ModifierKind};
///
/// let a = AttributeModifier::zero(ModifierKind::Fractional)
///     .with(AttributeField::Speed, 0.1)
///     .unwrap();
/// let b = a.plus(&a).unwrap().plus(&a).unwrap();
/// assert_eq!(b.speed().as_f64(), 0.3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "AttributeModifierRecord",
    into = "AttributeModifierRecord"
)]
pub struct AttributeModifier {
    deltas: Deltas<ATTRIBUTE_FIELDS>,
}

impl AttributeModifier {
    /// Build a modifier of `kind` from raw values in field order.
    ///
    /// Values are converted to the modifier's representation: truncated
    /// toward zero for integer modifiers, widened for fractional ones.
    pub fn new<T: Into<Number>>(
        kind: ModifierKind,
        values: [T; ATTRIBUTE_FIELDS],
    ) -> Result<Self, StatError> {
        let deltas = Deltas::from_numbers(kind, &NAMES, values.map(Into::into))?;
        Ok(Self { deltas })
    }

    /// An integer modifier.
    pub fn integer(values: [i64; ATTRIBUTE_FIELDS]) -> Self {
        Self {
            deltas: Deltas::Integer(values),
        }
    }

    /// A fractional modifier. Fails on NaN or infinite input.
    pub fn fractional(values: [f64; ATTRIBUTE_FIELDS]) -> Result<Self, StatError> {
        Self::new(ModifierKind::Fractional, values)
    }

    /// A modifier of `kind` with every field zero.
    pub fn zero(kind: ModifierKind) -> Self {
        Self {
            deltas: Deltas::zero(kind),
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(
        mut self,
        field: AttributeField,
        value: impl Into<Number>,
    ) -> Result<Self, StatError> {
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
    pub fn get(&self, field: AttributeField) -> Number {
        self.deltas.get(field.index())
    }

    /// Strength (STR) delta.
    pub fn strength(&self) -> Number {
        self.get(AttributeField::Strength)
    }

    /// Defense (DEF) delta.
    pub fn defense(&self) -> Number {
        self.get(AttributeField::Defense)
    }

    /// Intellect (INT) delta.
    pub fn intellect(&self) -> Number {
        self.get(AttributeField::Intellect)
    }

    /// Willpower (WIL) delta.
    pub fn willpower(&self) -> Number {
        self.get(AttributeField::Willpower)
    }

    /// Dexterity (DEX) delta.
    pub fn dexterity(&self) -> Number {
        self.get(AttributeField::Dexterity)
    }

    /// Accuracy (ACC) delta.
    pub fn accuracy(&self) -> Number {
        self.get(AttributeField::Accuracy)
    }

    /// Speed (SPD) delta.
    pub fn speed(&self) -> Number {
        self.get(AttributeField::Speed)
    }

    /// Luck (LCK) delta.
    pub fn luck(&self) -> Number {
        self.get(AttributeField::Luck)
    }

    /// Set one field. Negative values are allowed.
    pub fn set(
        &mut self,
        field: AttributeField,
        value: impl Into<Number>,
    ) -> Result<(), StatError> {
        self.deltas.set(field.index(), field.name(), value.into())
    }

    /// Set one field from an untyped value, rejecting non-numbers.
    pub fn set_value(
        &mut self,
        field: AttributeField,
        value: &serde_json::Value,
    ) -> Result<(), StatError> {
        let number = validate(field.name(), value, Sign::Any)?;
        self.set(field, number)
    }

    /// Sum with a modifier of the same mode.
    pub fn plus(&self, other: &AttributeModifier) -> Result<AttributeModifier, StatError> {
        self.plus_with(other, &StatRules::DEFAULT)
    }

    /// Difference with a modifier of the same mode.
    pub fn minus(&self, other: &AttributeModifier) -> Result<AttributeModifier, StatError> {
        self.minus_with(other, &StatRules::DEFAULT)
    }

    /// [`plus`](Self::plus) with explicit rules for fraction rounding.
    pub fn plus_with(
        &self,
        other: &AttributeModifier,
        rules: &StatRules,
    ) -> Result<AttributeModifier, StatError> {
        rules.validate()?;
        let deltas = self
            .deltas
            .merge(&other.deltas, Step::Add, &NAMES, rules.fraction_precision)?;
        Ok(Self { deltas })
    }

    /// [`minus`](Self::minus) with explicit rules for fraction rounding.
    pub fn minus_with(
        &self,
        other: &AttributeModifier,
        rules: &StatRules,
    ) -> Result<AttributeModifier, StatError> {
        rules.validate()?;
        let deltas = self
            .deltas
            .merge(&other.deltas, Step::Sub, &NAMES, rules.fraction_precision)?;
        Ok(Self { deltas })
    }

    /// In-place [`plus`](Self::plus).
    pub fn plus_assign(&mut self, other: &AttributeModifier) -> Result<(), StatError> {
        *self = self.plus(other)?;
        Ok(())
    }

    /// In-place [`minus`](Self::minus).
    pub fn minus_assign(&mut self, other: &AttributeModifier) -> Result<(), StatError> {
        *self = self.minus(other)?;
        Ok(())
    }

    /// All field values in field order.
    pub fn numbers(&self) -> [Number; ATTRIBUTE_FIELDS] {
        AttributeField::ALL.map(|field| self.get(field))
    }
}

impl TryFrom<AttributeModifierRecord> for AttributeModifier {
    type Error = StatError;

    fn try_from(record: AttributeModifierRecord) -> Result<Self, Self::Error> {
        let kind = ModifierKind::from_frac(record.frac);
        Self::new(kind, record.into_numbers())
    }
}

impl fmt::Display for AttributeModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeModifier")?;
        for field in AttributeField::ALL {
            write!(f, " {} {}", field.abbrev(), self.deltas.display_at(field.index()))?;
        }
        Ok(())
    }
}
