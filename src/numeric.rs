//! Raw numeric input and the shared field validation routine.
//!
//! Every settable field accepts a [`Number`], which is either an integer or
//! a float. Booleans, strings and other values never become a `Number`:
//! conversions from `serde_json::Value` and serde deserialization reject
//! them with [`StatError::Type`]. Once a value is a `Number`,
//! [`Number::check`] applies the remaining rules (finite, and optionally
//! non-negative) before the owning entity converts it to its storage type.

use crate::error::StatError;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Whether a field may hold negative values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Base stats: negative values are rejected.
    NonNegative,
    /// Modifier deltas: any sign is meaningful.
    Any,
}

/// A raw integer-or-float field value.
///
/// # Examples
///
/// ```rust
/// use rpgstat::Number;
///
/// let a: Number = 10.into();
/// let b: Number = 10.9.into();
/// assert_eq!(a, Number::Int(10));
/// assert_eq!(b.as_f64(), 10.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    /// The value as a float.
    pub fn as_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }

    /// Whether the value is below zero.
    pub fn is_negative(self) -> bool {
        match self {
            Number::Int(i) => i < 0,
            Number::Float(f) => f < 0.0,
        }
    }

    /// Validate this value for `field`.
    ///
    /// Rejects NaN and infinities, and negative values when `sign` is
    /// [`Sign::NonNegative`]. Returns the value unchanged on success.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rpgstat::{Number, Sign};
    ///
    /// assert!(Number::Int(-1).check("strength", Sign::Any).is_ok());
    /// assert!(Number::Int(-1).check("strength", Sign::NonNegative).is_err());
    /// assert!(Number::Float(f64::NAN).check("strength", Sign::Any).is_err());
    /// ```
    pub fn check(self, field: &'static str, sign: Sign) -> Result<Number, StatError> {
        if let Number::Float(f) = self {
            if !f.is_finite() {
                return Err(StatError::NonFinite { field });
            }
        }
        if sign == Sign::NonNegative && self.is_negative() {
            return Err(StatError::Negative { field, value: self });
        }
        Ok(self)
    }

    /// Floor to a non-negative whole number.
    pub(crate) fn floor_u32(self, field: &'static str) -> Result<u32, StatError> {
        match self.check(field, Sign::NonNegative)? {
            Number::Int(i) => whole_u32(field, i),
            Number::Float(f) => floor_u32(field, f),
        }
    }

    /// Truncate toward zero to a signed whole number.
    pub(crate) fn trunc_i64(self, field: &'static str) -> Result<i64, StatError> {
        match self.check(field, Sign::Any)? {
            Number::Int(i) => Ok(i),
            Number::Float(f) => {
                let t = f.trunc();
                if t < i64::MIN as f64 || t >= i64::MAX as f64 {
                    return Err(StatError::OutOfRange { field, value: self });
                }
                Ok(t as i64)
            }
        }
    }

    /// Widen to a finite float.
    pub(crate) fn finite_f64(self, field: &'static str) -> Result<f64, StatError> {
        Ok(self.check(field, Sign::Any)?.as_f64())
    }
}

impl Default for Number {
    fn default() -> Self {
        Number::Int(0)
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Int(i) => write!(f, "{}", i),
            Number::Float(x) => write!(f, "{}", x),
        }
    }
}

macro_rules! number_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Number {
            fn from(v: $t) -> Self {
                Number::Int(i64::from(v))
            }
        })*
    };
}

number_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Number {
    fn from(v: f32) -> Self {
        Number::Float(f64::from(v))
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Float(v)
    }
}

/// Name of a JSON value's type, as reported in type errors.
fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

impl TryFrom<&serde_json::Value> for Number {
    type Error = StatError;

    /// Accept only JSON numbers. Booleans are rejected even though they
    /// alias to 0/1 in many languages.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(n) => n
                .as_i64()
                .map(Number::Int)
                .or_else(|| n.as_f64().map(Number::Float))
                .ok_or(StatError::Type { found: "number" }),
            other => Err(StatError::Type {
                found: json_type_name(other),
            }),
        }
    }
}

/// Validate an untyped value for `field`.
///
/// This is the full two-stage check: the value must be a JSON number (not a
/// boolean, string, or container), and must then pass [`Number::check`].
///
/// # Examples
///
/// ```rust
/// use rpgstat::{validate, ErrorKind, Sign};
/// use serde_json::json;
///
/// assert!(validate("health", &json!(5), Sign::NonNegative).is_ok());
/// let err = validate("health", &json!(true), Sign::NonNegative).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Type);
/// ```
pub fn validate(
    field: &'static str,
    value: &serde_json::Value,
    sign: Sign,
) -> Result<Number, StatError> {
    Number::try_from(value)?.check(field, sign)
}

impl Serialize for Number {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match *self {
            Number::Int(i) => serializer.serialize_i64(i),
            Number::Float(f) => serializer.serialize_f64(f),
        }
    }
}

struct NumberVisitor;

impl<'de> Visitor<'de> for NumberVisitor {
    type Value = Number;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an int or float")
    }

    fn visit_i64<E>(self, v: i64) -> Result<Number, E>
    where
        E: de::Error,
    {
        Ok(Number::Int(v))
    }

    fn visit_u64<E>(self, v: u64) -> Result<Number, E>
    where
        E: de::Error,
    {
        Ok(i64::try_from(v).map_or(Number::Float(v as f64), Number::Int))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Number, E>
    where
        E: de::Error,
    {
        Ok(Number::Float(v))
    }
}

impl<'de> Deserialize<'de> for Number {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(NumberVisitor)
    }
}

/// Convert a signed whole number into non-negative storage.
pub(crate) fn whole_u32(field: &'static str, value: i64) -> Result<u32, StatError> {
    if value < 0 {
        return Err(StatError::Negative {
            field,
            value: Number::Int(value),
        });
    }
    u32::try_from(value).map_err(|_| StatError::OutOfRange {
        field,
        value: Number::Int(value),
    })
}

/// Floor a float into non-negative storage.
pub(crate) fn floor_u32(field: &'static str, value: f64) -> Result<u32, StatError> {
    to_u32(field, value, value.floor())
}

/// Truncate a float toward zero into non-negative storage.
pub(crate) fn trunc_u32(field: &'static str, value: f64) -> Result<u32, StatError> {
    to_u32(field, value, value.trunc())
}

fn to_u32(field: &'static str, raw: f64, whole: f64) -> Result<u32, StatError> {
    if !raw.is_finite() {
        return Err(StatError::NonFinite { field });
    }
    if whole < 0.0 {
        return Err(StatError::Negative {
            field,
            value: Number::Float(raw),
        });
    }
    if whole > u32::MAX as f64 {
        return Err(StatError::OutOfRange {
            field,
            value: Number::Float(raw),
        });
    }
    Ok(whole as u32)
}

/// Largest magnitude below which every `f64` can still carry a fraction.
const FRACTION_LIMIT: f64 = 9_007_199_254_740_992.0; // 2^53

/// Round to `places` decimal places, ties to even.
///
/// Values too large to hold a fraction at that precision are returned
/// unchanged.
pub(crate) fn round_to_places(value: f64, places: u32) -> f64 {
    let scale = 10_f64.powi(i32::try_from(places).unwrap_or(i32::MAX));
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= FRACTION_LIMIT {
        return value;
    }
    scaled.round_ties_even() / scale
}
