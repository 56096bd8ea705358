//! Limiting what the parser accepts with ParseOptions.
//!
//! Run with: cargo run --example custom_options

use fieldmask::{parse_with_options, ParseOptions, DEFAULT_MAX_DEPTH};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("Default depth limit: {}", DEFAULT_MAX_DEPTH);

    // Tight limits for masks coming from clients
    let strict = ParseOptions::new().with_max_depth(3).with_max_length(64);

    let mask = parse_with_options("spec.disks.*", strict.clone())?;
    println!("Accepted: {}", mask);

    match parse_with_options("spec.disks.*.size", strict.clone()) {
        Ok(mask) => println!("Unexpectedly accepted: {}", mask),
        Err(err) => println!("Rejected:\n{}\n", err),
    }

    let long = vec!["field"; 20].join(",");
    if let Err(err) = parse_with_options(&long, strict) {
        println!("Rejected: {:?}", err.kind());
    }

    // Trusted input may lift every limit
    let deep = vec!["a"; 500].join(".");
    let mask = parse_with_options(&deep, ParseOptions::unlimited())?;
    println!("Unlimited depth: {} keys", mask.to_field_path()?.map_or(0, |p| p.len()));

    Ok(())
}
