//! Sending and receiving reset masks in request headers.
//!
//! Run with: cargo run --example reset_header

use fieldmask::{ensure_reset_mask, reset_mask_from_headers, FieldPath, RESET_MASK_HEADER};
use http::HeaderMap;
use serde_json::json;
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // A full update: empty and default-valued fields must be reset
    let body = json!({
        "name": "vm-1",
        "labels": {},
        "spec": { "cpus": 4, "gpu": null },
        "disks": [{ "id": "boot", "size": 0 }],
    });

    let mut headers = HeaderMap::new();
    ensure_reset_mask(&mut headers, &body)?;
    println!("{}: {:?}", RESET_MASK_HEADER, headers.get(RESET_MASK_HEADER));

    // The receiving side parses the header back
    let Some(mask) = reset_mask_from_headers(&headers)? else {
        println!("No reset mask");
        return Ok(());
    };
    for keys in [&["labels"][..], &["spec", "gpu"][..], &["spec", "cpus"][..]] {
        let path: FieldPath = keys.iter().copied().collect();
        println!("{:<12} reset: {}", path.to_string(), path.matches_reset_mask_final(&mask));
    }

    Ok(())
}
