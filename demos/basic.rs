//! Basic example: attributes and modifiers
//!
//! This example demonstrates:
//! - Building an attribute block
//! - Applying integer (flat) and fractional (percentage) modifiers
//! - The mode check that keeps the two apart

use rpgstat::*;

fn main() -> Result<(), StatError> {
    let base = Attribute::new(12, 8, 10, 6, 14, 11, 9, 5)?;
    println!("Base attributes:\n{}", base);

    // A flat bonus from equipment
    let gauntlets = AttributeModifier::zero(ModifierKind::Integer)
        .with(AttributeField::Strength, 4)?
        .with(AttributeField::Dexterity, -1)?;
    println!("\nEquipping: {}", gauntlets);
    let equipped = base.apply(&gauntlets)?;
    println!("{}", equipped);

    // A percentage buff
    let rage = AttributeModifier::zero(ModifierKind::Fractional)
        .with(AttributeField::Strength, 0.25)?
        .with(AttributeField::Defense, -0.25)?;
    println!("\nBuff: {}", rage);
    let buffed = equipped.scale(&rage)?;
    println!("{}", buffed);

    // Percentages cannot be added, flat bonuses cannot scale
    match buffed.apply(&rage) {
        Ok(_) => println!("\nunexpected success"),
        Err(err) => println!("\nRejected: {}", err),
    }

    // Unequip
    let unequipped = equipped.revert(&gauntlets)?;
    assert_eq!(unequipped, base);
    println!("\nAfter unequipping, attributes match the base block again.");

    Ok(())
}
