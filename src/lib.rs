//! Infer a draft-04 JSON Schema from one example document.
//!
//! Two stages: [`shape::build`] walks the value into a shape tree, then
//! [`compile::compile`] turns that tree into a [`SchemaNode`] document.
//!
//! ```
//! use serde_json::json;
//!
//! let schema = json_sketch_schema::generate(&json!({"name": "Alice", "age": 30}));
//! assert_eq!(schema["properties"]["name"], json!({"type": "string", "minLength": 1}));
//! assert_eq!(schema["required"], json!(["name", "age"]));
//! ```
pub mod cli;
pub mod compile;
pub mod error;
pub mod jq_exec;
pub mod path_de;
pub mod schema;
pub mod shape;

use serde::Serialize;
use serde_json::Value;

pub use error::{Result, SchemaGenError};
pub use schema::SchemaNode;
pub use shape::{ShapeKind, ShapeNode};

/// Generate the schema document for `json`.
///
/// Pure: no I/O, no shared state. Recursion follows the document's nesting,
/// so values built in memory with extreme depth can exhaust the stack.
pub fn generate(json: &Value) -> Value {
    generate_schema(json).to_value()
}

/// Typed variant of [`generate`].
pub fn generate_schema(json: &Value) -> SchemaNode {
    let tree = shape::build(json);
    compile::compile(&tree)
}

/// Parse JSON text, then [`generate`].
pub fn generate_from_str(src: &str) -> Result<Value> {
    let json = path_de::from_str_with_path::<Value>(src)?;
    Ok(generate(&json))
}

/// Convert any serializable value to JSON, then [`generate`].
///
/// Fails with [`SchemaGenError::InvalidInput`] when the value has no JSON
/// representation (e.g. a map with non-string keys).
pub fn generate_from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    let json = serde_json::to_value(value)
        .map_err(|e| SchemaGenError::InvalidInput(e.to_string()))?;
    Ok(generate(&json))
}

/// Service-style adapter; forwards its one argument to [`generate`].
#[derive(Clone, Copy, Debug, Default)]
pub struct SchemaGenerator;

impl SchemaGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(&self, json: &Value) -> Value {
        generate(json)
    }
}
