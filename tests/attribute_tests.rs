//! Tests for attribute blocks and attribute modifiers.
//!
//! These tests verify:
//! - Construction, flooring and negative rejection
//! - Attribute ± Attribute arithmetic (pure and in place)
//! - Integer and fractional modifier application and mode checks
//! - Modifier ± modifier arithmetic and fraction rounding

use rpgstat::*;
use serde_json::json;

fn base() -> Attribute {
    Attribute::new(10, 20, 30, 40, 50, 60, 70, 80).unwrap()
}

fn half() -> Attribute {
    Attribute::new(5, 10, 15, 20, 25, 30, 35, 40).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_attr_init() {
    let attr = Attribute::default();
    assert_eq!(attr.values(), [0; 8]);

    let attr = base();
    assert_eq!(attr.strength(), 10);
    assert_eq!(attr.defense(), 20);
    assert_eq!(attr.intellect(), 30);
    assert_eq!(attr.willpower(), 40);
    assert_eq!(attr.dexterity(), 50);
    assert_eq!(attr.accuracy(), 60);
    assert_eq!(attr.speed(), 70);
    assert_eq!(attr.luck(), 80);
}

#[test]
fn test_attr_init_floors() {
    let attr = Attribute::new(10.9, 0, 0, 0, 0, 0, 0, 0).unwrap();
    assert_eq!(attr.strength(), 10);
}

#[test]
fn test_attr_init_negative_epsilon() {
    let err = Attribute::new(-f64::EPSILON, 0, 0, 0, 0, 0, 0, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn test_attr_init_mixed_raw_values() {
    let values = [
        json!(1),
        json!(2),
        json!(3.5),
        json!(4),
        json!(5),
        json!(6),
        json!(7),
        json!("8"),
    ];
    let numbers: Result<Vec<Number>, StatError> =
        values.iter().map(Number::try_from).collect();
    assert_eq!(numbers.unwrap_err().kind(), ErrorKind::Type);
}

#[test]
fn test_attr_from_json_rejects_string_field() {
    let result = serde_json::from_value::<Attribute>(json!({ "strength": "a" }));
    assert!(result.is_err());
}

#[test]
fn test_attr_setters() {
    let mut attr = base();
    for field in AttributeField::ALL {
        attr.set(field, 1.5).unwrap();
        assert_eq!(attr.get(field), 1);
    }
    for field in AttributeField::ALL {
        let err = attr.set(field, -1).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Value);
        let err = attr.set_value(field, &json!(false)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Type);
    }
    assert_eq!(attr.values(), [1; 8]);
}

// ============================================================================
// Attribute ± Attribute
// ============================================================================

#[test]
fn test_attr_plus() {
    let result = base().plus(&half()).unwrap();
    assert_eq!(result.values(), [15, 30, 45, 60, 75, 90, 105, 120]);

    let result = base().plus(&Attribute::default()).unwrap();
    assert_eq!(result, base());
}

#[test]
fn test_attr_minus() {
    let result = base().minus(&half()).unwrap();
    assert_eq!(result.values(), [5, 10, 15, 20, 25, 30, 35, 40]);

    let result = base().minus(&Attribute::default()).unwrap();
    assert_eq!(result, base());
}

#[test]
fn test_attr_minus_below_zero() {
    let err = half().minus(&base()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Value);
}

#[test]
fn test_attr_plus_assign() {
    let mut attr = base();
    attr.plus_assign(&half()).unwrap();
    assert_eq!(attr.values(), [15, 30, 45, 60, 75, 90, 105, 120]);

    attr.plus_assign(&Attribute::default()).unwrap();
    assert_eq!(attr.values(), [15, 30, 45, 60, 75, 90, 105, 120]);
}

#[test]
fn test_attr_minus_assign() {
    let mut attr = base();
    attr.minus_assign(&half()).unwrap();
    assert_eq!(attr, half());

    attr.minus_assign(&Attribute::default()).unwrap();
    assert_eq!(attr, half());
}

// ============================================================================
// Attribute with modifiers
// ============================================================================

#[test]
fn test_attr_apply_integer_modifier() {
    let m = AttributeModifier::integer([1, 2, 3, 4, 5, 6, 7, 8]);
    let result = base().apply(&m).unwrap();
    assert_eq!(result.values(), [11, 22, 33, 44, 55, 66, 77, 88]);
    assert_eq!(result.revert(&m).unwrap(), base());
}

#[test]
fn test_attr_apply_negative_modifier_below_zero() {
    let m = AttributeModifier::integer([-11, 0, 0, 0, 0, 0, 0, 0]);
    let mut attr = base();
    let err = attr.apply_assign(&m).unwrap_err();
    assert!(matches!(err, StatError::Negative { field: "strength", .. }));
    assert_eq!(attr, base());
}

#[test]
fn test_attr_apply_rejects_fractional_modifier() {
    let attr = Attribute::new(10, 10, 10, 10, 10, 10, 10, 10).unwrap();
    let m = AttributeModifier::fractional([0.1; 8]).unwrap();
    assert_eq!(attr.apply(&m).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(attr.revert(&m).unwrap_err().kind(), ErrorKind::Value);
}

#[test]
fn test_attr_scale_rejects_integer_modifier() {
    let mut attr = Attribute::new(10, 10, 10, 10, 10, 10, 10, 10).unwrap();
    let m = AttributeModifier::integer([1; 8]);
    let err = attr.scale_assign(&m).unwrap_err();
    assert_eq!(
        err,
        StatError::ModifierKind {
            operation: "Attribute::scale",
            expected: ModifierKind::Fractional,
            found: ModifierKind::Integer,
        }
    );
}

#[test]
fn test_attr_scale() {
    let m = AttributeModifier::fractional([0.1, 0.5, -0.5, 0.0, 1.0, -1.0, 0.25, 0.05]).unwrap();
    let result = base().scale(&m).unwrap();
    // 11, 30, 15, 40, 100, 0, 87.5 -> 88, 84
    assert_eq!(result.values(), [11, 30, 15, 40, 100, 0, 88, 84]);
}

#[test]
fn test_attr_scale_assign_with_clamp_rules() {
    let rules = StatRules::from_json_str(r#"{ "negative_scale": "clamp_to_zero" }"#).unwrap();
    let m = AttributeModifier::fractional([-3.0; 8]).unwrap();
    let mut attr = base();
    attr.scale_assign_with(&m, &rules).unwrap();
    assert_eq!(attr, Attribute::default());
}

#[test]
fn test_attr_zero_modifier_is_identity() {
    let attr = base();
    let zero_int = AttributeModifier::zero(ModifierKind::Integer);
    let zero_frac = AttributeModifier::zero(ModifierKind::Fractional);
    assert!(zero_int.is_zero());
    assert_eq!(attr.apply(&zero_int).unwrap(), attr);
    assert_eq!(attr.revert(&zero_int).unwrap(), attr);
    assert_eq!(attr.scale(&zero_frac).unwrap(), attr);
}

// ============================================================================
// Modifier ± modifier
// ============================================================================

#[test]
fn test_modifier_plus_same_kind() {
    let a = AttributeModifier::integer([1, 2, 3, 4, 5, 6, 7, 8]);
    let b = AttributeModifier::integer([-1, -1, -1, -1, -1, -1, -1, -1]);
    let sum = a.plus(&b).unwrap();
    assert_eq!(sum, AttributeModifier::integer([0, 1, 2, 3, 4, 5, 6, 7]));
    assert_eq!(sum.minus(&b).unwrap(), a);
}

#[test]
fn test_modifier_fraction_drift_rounded() {
    let step = AttributeModifier::fractional([0.1; 8]).unwrap();
    let mut total = AttributeModifier::zero(ModifierKind::Fractional);
    for _ in 0..10 {
        total.plus_assign(&step).unwrap();
    }
    assert_eq!(total.strength(), Number::Float(1.0));
    total.minus_assign(&step).unwrap();
    assert_eq!(total.luck(), Number::Float(0.9));
}

#[test]
fn test_modifier_custom_precision() {
    let rules = StatRules {
        fraction_precision: 1,
        ..StatRules::DEFAULT
    };
    let a = AttributeModifier::fractional([0.14; 8]).unwrap();
    let b = AttributeModifier::fractional([0.0; 8]).unwrap();
    assert_eq!(a.plus_with(&b, &rules).unwrap().speed(), Number::Float(0.1));
}

#[test]
fn test_modifier_mismatched_kinds() {
    let mut a = AttributeModifier::integer([1; 8]);
    let b = AttributeModifier::zero(ModifierKind::Fractional);
    assert_eq!(a.plus(&b).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(a.minus_assign(&b).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(a, AttributeModifier::integer([1; 8]));
}

#[test]
fn test_modifier_kind_is_fixed() {
    let mut m = AttributeModifier::zero(ModifierKind::Integer);
    m.set(AttributeField::Luck, 0.75).unwrap();
    assert!(m.is_integer());
    assert_eq!(m.luck(), Number::Int(0));

    let err = m.set_value(AttributeField::Luck, &json!(true)).unwrap_err();
    assert_eq!(err, StatError::Type { found: "bool" });
}

#[test]
fn test_modifier_builder() {
    let m = AttributeModifier::zero(ModifierKind::Integer)
        .with(AttributeField::Strength, 3)
        .unwrap()
        .with(AttributeField::Luck, -2)
        .unwrap();
    let result = base().apply(&m).unwrap();
    assert_eq!(result.strength(), 13);
    assert_eq!(result.luck(), 78);
}

// ============================================================================
// Storage limits and rules
// ============================================================================

#[test]
fn test_attr_plus_past_storage() {
    let top = Attribute::from([u32::MAX; 8]);
    let err = top.plus(&top).unwrap_err();
    assert!(matches!(err, StatError::OutOfRange { field: "strength", .. }));
    assert_eq!(err.kind(), ErrorKind::Value);

    let mut attr = top;
    let one_luck = Attribute::from([0, 0, 0, 0, 0, 0, 0, 1]);
    let err = attr.plus_assign(&one_luck).unwrap_err();
    assert!(matches!(err, StatError::OutOfRange { field: "luck", .. }));
    assert_eq!(attr, top);
}

#[test]
fn test_attr_apply_past_storage() {
    let mut attr = Attribute::from([u32::MAX; 8]);
    let m = AttributeModifier::integer([0, 0, 0, 0, 0, 0, 1, 0]);
    assert_eq!(attr.apply_assign(&m).unwrap_err().kind(), ErrorKind::Value);
    assert_eq!(attr, Attribute::from([u32::MAX; 8]));
}

#[test]
fn test_attr_scale_past_storage() {
    let mut attr = Attribute::from([u32::MAX; 8]);
    let m = AttributeModifier::fractional([0.5; 8]).unwrap();
    let err = attr.scale_assign(&m).unwrap_err();
    assert!(matches!(err, StatError::OutOfRange { field: "strength", .. }));
    assert_eq!(err.kind(), ErrorKind::Value);
    assert_eq!(attr, Attribute::from([u32::MAX; 8]));
}

#[test]
fn test_modifier_combination_rejects_invalid_rules() {
    let rules = StatRules {
        fraction_precision: 13,
        ..StatRules::DEFAULT
    };
    let a = AttributeModifier::fractional([0.5; 8]).unwrap();
    let err = a.plus_with(&a, &rules).unwrap_err();
    assert!(matches!(err, StatError::InvalidRules(_)));
    assert_eq!(err.kind(), ErrorKind::Value);
    assert!(a.minus_with(&a, &rules).is_err());
}

#[test]
fn test_attr_scale_rejects_invalid_rules() {
    let rules = StatRules {
        fraction_precision: u32::MAX,
        ..StatRules::DEFAULT
    };
    let mut attr = base();
    let m = AttributeModifier::fractional([0.5; 8]).unwrap();
    let err = attr.scale_assign_with(&m, &rules).unwrap_err();
    assert!(matches!(err, StatError::InvalidRules(_)));
    assert_eq!(attr, base());
}

#[test]
fn test_rules_from_json_rejects_precision() {
    let err = StatRules::from_json_str(r#"{ "fraction_precision": 13 }"#).unwrap_err();
    assert!(matches!(err, StatError::InvalidRules(_)));
    assert!(serde_json::from_str::<StatRules>(r#"{ "fraction_precision": 13 }"#).is_err());
}

#[test]
fn test_modifier_large_fractions_combine() {
    let big = AttributeModifier::fractional([1e305; 8]).unwrap();
    let zero = AttributeModifier::zero(ModifierKind::Fractional);
    let sum = big.plus(&zero).unwrap();
    assert_eq!(sum.strength(), Number::Float(1e305));
    assert_eq!(big.plus(&big).unwrap().luck(), Number::Float(2e305));
}
