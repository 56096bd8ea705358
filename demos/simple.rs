//! Parsing, marshaling and combining field masks.
//!
//! Run with: cargo run --example simple

use fieldmask::{parse, FieldPath};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let update = parse("spec.(name, labels.*), metadata.\"display name\"")?;
    println!("Parsed mask: {}", update);

    // Alternatives are sorted, so the text form is stable
    let again = parse(&update.marshal())?;
    assert_eq!(update, again);
    println!("✓ Round-trip successful");

    // Reset matching: `*` reaches every label
    for keys in [&["spec", "labels", "team"][..], &["spec", "size"][..]] {
        let path: FieldPath = keys.iter().copied().collect();
        println!("{:<20} reset: {}", path.to_string(), path.matches_reset_mask(&update));
    }

    // Combining masks
    let other = parse("spec.(name, size)")?;
    println!("\nunion:              {}", &update + &other);
    println!("reset intersection: {}", &update & &other);
    println!("reset subtraction:  {}", &update - &other);

    Ok(())
}
