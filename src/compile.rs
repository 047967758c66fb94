//! Shape tree → draft-04 schema document.
//!
//! The compiler only ever reads the [`ShapeNode`] tree; the source document
//! is gone by the time we get here.
use indexmap::IndexMap;

use crate::schema::SchemaNode;
use crate::shape::{ShapeKind, ShapeNode};

/// Where a child's key goes when it counts as required.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequiredTarget {
    /// Enclosing object's `required`; every container child and every
    /// required primitive is appended.
    AttachToObjectRequired,
    /// Enclosing array's `items.required`; only required primitives are
    /// appended, container children never are.
    AttachToItemsRequired,
}

/// Object roots compile to an object document, anything else to an array
/// document whose `items` is an object schema.
pub fn compile(tree: &ShapeNode) -> SchemaNode {
    let mut properties = IndexMap::new();
    let mut required = Vec::new();
    generate(tree, &mut properties, &mut required, RequiredTarget::AttachToObjectRequired);
    tracing::debug!(kind = ?tree.kind, properties = properties.len(), required = required.len(), "compiled");

    if tree.kind == Some(ShapeKind::Object) {
        return SchemaNode::object(properties, required).into_document();
    }
    SchemaNode {
        ty: Some(ShapeKind::Array),
        min_items: Some(1),
        unique_items: Some(true),
        items: Some(Box::new(SchemaNode::object(properties, required))),
        ..SchemaNode::default()
    }
    .into_document()
}

/// Emit one schema per child of `tree` into `properties`, appending
/// required keys to `required` according to `target`.
pub fn generate(
    tree: &ShapeNode,
    properties: &mut IndexMap<String, SchemaNode>,
    required: &mut Vec<String>,
    target: RequiredTarget,
) {
    for (key, child) in &tree.children {
        let node = match child.kind {
            Some(ShapeKind::Object) => {
                if target == RequiredTarget::AttachToObjectRequired {
                    required.push(key.clone());
                }
                let mut props = IndexMap::new();
                let mut req = Vec::new();
                generate(child, &mut props, &mut req, RequiredTarget::AttachToObjectRequired);
                SchemaNode::object(props, req)
            }
            Some(ShapeKind::Array) => {
                if target == RequiredTarget::AttachToObjectRequired {
                    required.push(key.clone());
                }
                let mut props = IndexMap::new();
                let mut req = Vec::new();
                generate(child, &mut props, &mut req, RequiredTarget::AttachToItemsRequired);
                SchemaNode {
                    ty: Some(ShapeKind::Array),
                    unique_items: child.unique_items,
                    min_items: child.min_items,
                    items: Some(Box::new(SchemaNode::items(props, req))),
                    ..SchemaNode::default()
                }
            }
            kind => {
                // both targets take required primitives
                if child.required {
                    required.push(key.clone());
                }
                SchemaNode {
                    ty: kind,
                    // zero carries no constraint
                    min_length: child.min_length.filter(|n| *n > 0),
                    ..SchemaNode::default()
                }
            }
        };
        properties.insert(key.clone(), node);
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::build;
    use serde_json::{json, Value};

    fn compile_json(v: Value) -> Value {
        compile(&build(&v)).to_value()
    }

    #[test]
    fn empty_object_document() {
        assert_eq!(compile_json(json!({})), json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "description": "",
            "type": "object",
            "properties": {},
            "required": []
        }));
    }

    #[test]
    fn empty_array_document() {
        assert_eq!(compile_json(json!([])), json!({
            "$schema": "http://json-schema.org/draft-04/schema#",
            "description": "",
            "type": "array",
            "minItems": 1,
            "uniqueItems": true,
            "items": {"type": "object", "properties": {}, "required": []}
        }));
    }

    #[test]
    fn nested_object_required_threading() {
        let s = compile_json(json!({"user": {"id": 7, "nick": null}, "ok": true}));
        assert_eq!(s["required"], json!(["user", "ok"]));
        assert_eq!(s["properties"]["user"], json!({
            "type": "object",
            "properties": {"id": {"type": "number"}, "nick": {}},
            "required": ["id"]
        }));
        assert_eq!(s["properties"]["ok"], json!({"type": "boolean"}));
    }

    #[test]
    fn empty_string_drops_min_length() {
        let s = compile_json(json!({"a": "", "b": "x"}));
        assert_eq!(s["properties"]["a"], json!({"type": "string"}));
        assert_eq!(s["properties"]["b"], json!({"type": "string", "minLength": 1}));
        assert_eq!(s["required"], json!(["a", "b"]));
    }

    #[test]
    fn collapsed_array_property_uses_items_required() {
        let s = compile_json(json!({"list": [{"n": 1, "o": {"x": 1}}, {"o": {"x": 2}, "n": 2}]}));
        assert_eq!(s["required"], json!(["list"]));
        assert_eq!(s["properties"]["list"], json!({
            "type": "array",
            "minItems": 1,
            "uniqueItems": true,
            "items": {
                "properties": {
                    "n": {"type": "number"},
                    "o": {"type": "object", "properties": {"x": {"type": "number"}}, "required": ["x"]}
                },
                // the nested object is not appended under an items target
                "required": ["n"]
            }
        }));
    }

    #[test]
    fn array_root_children_attach_to_items_required() {
        let s = compile_json(json!([{"a": 1}, {"b": "x"}]));
        assert_eq!(s["items"]["required"], json!(["0", "1"]));
        assert_eq!(s["items"]["properties"]["0"], json!({
            "type": "object",
            "properties": {"a": {"type": "number"}},
            "required": ["a"]
        }));
    }

    #[test]
    fn nested_per_index_arrays() {
        let s = compile_json(json!([[1, 2], []]));
        assert_eq!(s["items"]["required"], json!(["0", "1"]));
        assert_eq!(s["items"]["properties"]["0"], json!({
            "type": "array",
            "uniqueItems": true,
            "items": {
                "properties": {"0": {"type": "number"}, "1": {"type": "number"}},
                "required": ["0", "1"]
            }
        }));
        assert_eq!(s["items"]["properties"]["1"], json!({
            "type": "array",
            "uniqueItems": true,
            "items": {"properties": {}, "required": []}
        }));
    }

    #[test]
    fn null_inside_scalar_list_not_required() {
        let s = compile_json(json!({"xs": [1, null]}));
        let xs = &s["properties"]["xs"];
        assert_eq!(xs["items"]["properties"]["1"], json!({}));
        assert_eq!(xs["items"]["required"], json!(["0"]));
    }

    #[test]
    fn required_target_is_explicit() {
        let tree = build(&json!({"o": {}, "a": [], "p": 1}));
        let mut props = IndexMap::new();
        let mut req = Vec::new();
        generate(&tree, &mut props, &mut req, RequiredTarget::AttachToItemsRequired);
        assert_eq!(req, vec!["p".to_string()]);
        assert_eq!(props.len(), 3);
    }
}
