//! Character example: a health/mana pool across a short fight
//!
//! This example demonstrates:
//! - Loading arithmetic rules from JSON
//! - Damage, healing and max-health changes with clamping
//! - Knockout detection and a full restore
//! - Persisting stat blocks as plain numeric records

use rpgstat::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rules = StatRules::from_json_str(
        r#"{ "fraction_precision": 4, "negative_scale": "clamp_to_zero" }"#,
    )?;

    let mut status = Status::full(120, 40);
    let mut attributes = Attribute::new(14, 12, 8, 10, 11, 13, 9, 7)?;
    println!("Start: {}", status);

    // Take a hit
    status.revert_assign(&StatusModifier::integer(45, 0, 0, 0))?;
    println!("Hit for 45: {}", status);

    // Healing cannot exceed the maximum
    status.apply_assign(&StatusModifier::integer(100, 0, 0, 0))?;
    println!("Healed 100: {}", status);

    // A curse lowers maximum health; current health follows it down
    status.revert_assign(&StatusModifier::integer(0, 0, 30, 0))?;
    println!("Cursed: {}", status);

    // Regeneration restores a fraction of the maximum
    status.revert_assign(&StatusModifier::integer(60, 25, 0, 0))?;
    status.scale_assign(&StatusModifier::fractional(0.25, 0.5, 0.0, 0.0)?)?;
    println!("Regenerated: {}", status);

    // A finishing blow, then a rest at the inn
    let finishing_blow = StatusModifier::integer(i64::from(status.health()), 0, 0, 0);
    status.revert_assign(&finishing_blow)?;
    if status.is_depleted() {
        println!("Knocked out: {}", status);
        status.restore();
    }
    println!("Rested: {}", status);

    // A crippling debuff, clamped at zero by the loaded rules
    let cripple = AttributeModifier::fractional([-1.5, 0.0, 0.0, 0.0, -0.5, 0.0, 0.0, 0.0])?;
    attributes.scale_assign_with(&cripple, &rules)?;
    println!("\nCrippled:\n{}", attributes);

    // Persist and reload
    let saved = serde_json::to_string(&(status, attributes))?;
    println!("\nSaved: {}", saved);
    let (reloaded, _): (Status, Attribute) = serde_json::from_str(&saved)?;
    assert_eq!(reloaded, status);

    Ok(())
}
