//! Plain-numeric records for storing stat blocks.
//!
//! Records are what a persistence layer reads and writes: flat structs of
//! numeric fields, plus a `frac` flag for modifiers. Converting a record
//! back into an entity always goes through the validated constructor, so
//! stored data can never bypass the non-negativity and clamp invariants.
//! Missing fields default to zero and unknown fields are rejected.
//!
//! # Examples
//!
//! ```rust
//! use rpgstat::Status;
//!
//! let status: Status = serde_json::from_str(r#"{ "health": 9, "max_health": 5 }"#).unwrap();
//! assert_eq!(status.health(), 5);
//!
//! assert!(serde_json::from_str::<Status>(r#"{ "health": true }"#).is_err());
//! assert!(serde_json::from_str::<Status>(r#"{ "health": -1 }"#).is_err());
//! ```

use crate::attribute::{Attribute, AttributeModifier};
use crate::numeric::Number;
use crate::status::{Status, StatusModifier};
use serde::{Deserialize, Serialize};

/// Stored form of an [`Attribute`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeRecord {
    pub strength: Number,
    pub defense: Number,
    pub intellect: Number,
    pub willpower: Number,
    pub dexterity: Number,
    pub accuracy: Number,
    pub speed: Number,
    pub luck: Number,
}

impl AttributeRecord {
    pub(crate) fn into_numbers(self) -> [Number; 8] {
        [
            self.strength,
            self.defense,
            self.intellect,
            self.willpower,
            self.dexterity,
            self.accuracy,
            self.speed,
            self.luck,
        ]
    }

    fn from_numbers(values: [Number; 8]) -> Self {
        let [strength, defense, intellect, willpower, dexterity, accuracy, speed, luck] = values;
        Self {
            strength,
            defense,
            intellect,
            willpower,
            dexterity,
            accuracy,
            speed,
            luck,
        }
    }
}

impl From<Attribute> for AttributeRecord {
    fn from(attribute: Attribute) -> Self {
        Self::from_numbers(attribute.values().map(Number::from))
    }
}

/// Stored form of an [`AttributeModifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AttributeModifierRecord {
    pub frac: bool,
    pub strength: Number,
    pub defense: Number,
    pub intellect: Number,
    pub willpower: Number,
    pub dexterity: Number,
    pub accuracy: Number,
    pub speed: Number,
    pub luck: Number,
}

impl AttributeModifierRecord {
    pub(crate) fn into_numbers(self) -> [Number; 8] {
        [
            self.strength,
            self.defense,
            self.intellect,
            self.willpower,
            self.dexterity,
            self.accuracy,
            self.speed,
            self.luck,
        ]
    }
}

impl From<AttributeModifier> for AttributeModifierRecord {
    fn from(modifier: AttributeModifier) -> Self {
        let [strength, defense, intellect, willpower, dexterity, accuracy, speed, luck] =
            modifier.numbers();
        Self {
            frac: modifier.is_fractional(),
            strength,
            defense,
            intellect,
            willpower,
            dexterity,
            accuracy,
            speed,
            luck,
        }
    }
}

/// Stored form of a [`Status`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusRecord {
    pub health: Number,
    pub mana: Number,
    pub max_health: Number,
    pub max_mana: Number,
}

impl StatusRecord {
    pub(crate) fn into_numbers(self) -> [Number; 4] {
        [self.health, self.mana, self.max_health, self.max_mana]
    }

    fn from_numbers(values: [Number; 4]) -> Self {
        let [health, mana, max_health, max_mana] = values;
        Self {
            health,
            mana,
            max_health,
            max_mana,
        }
    }
}

impl From<Status> for StatusRecord {
    fn from(status: Status) -> Self {
        Self::from_numbers(status.values().map(Number::from))
    }
}

/// Stored form of a [`StatusModifier`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusModifierRecord {
    pub frac: bool,
    pub health: Number,
    pub mana: Number,
    pub max_health: Number,
    pub max_mana: Number,
}

impl StatusModifierRecord {
    pub(crate) fn into_numbers(self) -> [Number; 4] {
        [self.health, self.mana, self.max_health, self.max_mana]
    }
}

impl From<StatusModifier> for StatusModifierRecord {
    fn from(modifier: StatusModifier) -> Self {
        let [health, mana, max_health, max_mana] = modifier.numbers();
        Self {
            frac: modifier.is_fractional(),
            health,
            mana,
            max_health,
            max_mana,
        }
    }
}
