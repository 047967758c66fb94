use json_sketch_schema::{generate_schema, path_de, SchemaNode};
use serde_json::{json, Value};

/// Realistic API-ish payload samples:
/// - Collections of same-keyed records (collapse)
/// - Mixed tuples and scalar lists (per-index)
/// - Numeric-looking strings and null padding
fn realistic_samples() -> Vec<(&'static str, Value)> {
    vec![
        ("user-profile", json!({
            "id": "10293",
            "login": "acme-bot",
            "display_name": "",
            "verified": false,
            "score": 4.5,
            "avatar": null,
            "roles": ["admin", "billing"],
            "address": {"street": "1 Main St", "zip": "94043", "geo": [37.42, -122.08]}
        })),
        ("order-list", json!([
            {"order_id": 1, "items": [{"sku": "A-1", "qty": 2}, {"qty": 1, "sku": "B-7"}], "note": null},
            {"note": "gift", "order_id": 2, "items": []},
        ])),
        ("mixed-tuple", json!([
            {"kind": "header", "v": 1},
            {"kind": "row", "cells": ["x", 2, null]},
            "trailer",
            [1, [2, 3]]
        ])),
        ("scalar-root", json!("just a string")),
        ("empty", json!({})),
    ]
}

fn main() {
    let mut failures = 0usize;
    for (name, sample) in realistic_samples() {
        let schema = generate_schema(&sample);
        let src = match serde_json::to_string_pretty(&schema) {
            Ok(x) => x,
            Err(error) => {
                eprintln!("❌ {name}: failed to serialize: {error}");
                failures += 1;
                continue;
            }
        };
        // typed round trip with path-aware errors
        match path_de::from_str_with_path::<SchemaNode>(&src) {
            Ok(back) if back == schema => {
                eprintln!("✅ {name}");
                println!("// {name}\n{src}");
            }
            Ok(_) => {
                eprintln!("❌ {name}: round trip changed the document");
                failures += 1;
            }
            Err(error) => {
                eprintln!("❌ {name}: {error}");
                failures += 1;
            }
        }
    }
    if failures > 0 {
        std::process::exit(1);
    }
}
