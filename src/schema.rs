// Typed draft-04 schema document. Absent members are never emitted.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::shape::ShapeKind;

pub const DRAFT_04: &str = "http://json-schema.org/draft-04/schema#";

/// Serializes through [`Value::from`], which fixes member order:
/// `$schema, description, type, minLength, minItems, uniqueItems, items`,
/// then `properties, required` on object nodes and `required, properties`
/// inside an array's `items`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SchemaNode {
    #[serde(rename = "$schema", default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type", default)]
    pub ty: Option<ShapeKind>,
    #[serde(default)]
    pub min_length: Option<u32>,
    #[serde(default)]
    pub min_items: Option<u32>,
    #[serde(default)]
    pub unique_items: Option<bool>,
    #[serde(default)]
    pub items: Option<Box<SchemaNode>>,
    #[serde(default)]
    pub properties: Option<IndexMap<String, SchemaNode>>,
    #[serde(default)]
    pub required: Option<Vec<String>>,
}

impl SchemaNode {
    /// `{type: "object", properties, required}`
    pub fn object(properties: IndexMap<String, SchemaNode>, required: Vec<String>) -> Self {
        Self {
            ty: Some(ShapeKind::Object),
            properties: Some(properties),
            required: Some(required),
            ..Self::default()
        }
    }

    /// Untyped `{properties, required}` wrapper used as an array's `items`.
    pub fn items(properties: IndexMap<String, SchemaNode>, required: Vec<String>) -> Self {
        Self {
            properties: Some(properties),
            required: Some(required),
            ..Self::default()
        }
    }

    /// Marks this node as a document root.
    pub fn into_document(mut self) -> Self {
        self.schema = Some(DRAFT_04.to_string());
        self.description = Some(String::new());
        self
    }

    pub fn to_value(&self) -> Value {
        Value::from(self)
    }
}

/// Where a node sits; `items` wrappers list `required` first.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Position {
    Member,
    Items,
}

fn node_to_value(node: &SchemaNode, position: Position) -> Value {
    let mut out = Map::new();
    if let Some(s) = &node.schema {
        out.insert("$schema".into(), Value::from(s.as_str()));
    }
    if let Some(d) = &node.description {
        out.insert("description".into(), Value::from(d.as_str()));
    }
    if let Some(ty) = node.ty {
        out.insert("type".into(), Value::from(ty.as_str()));
    }
    if let Some(n) = node.min_length {
        out.insert("minLength".into(), Value::from(n));
    }
    if let Some(n) = node.min_items {
        out.insert("minItems".into(), Value::from(n));
    }
    if let Some(b) = node.unique_items {
        out.insert("uniqueItems".into(), Value::from(b));
    }
    if let Some(items) = &node.items {
        out.insert("items".into(), node_to_value(items, Position::Items));
    }
    let properties = node.properties.as_ref().map(|props| {
        Value::Object(props.iter().map(|(k, v)| (k.clone(), Value::from(v))).collect())
    });
    let required = node.required.as_ref().map(|req| Value::from(req.clone()));
    let tail = match position {
        Position::Member => [("properties", properties), ("required", required)],
        Position::Items => [("required", required), ("properties", properties)],
    };
    for (key, value) in tail {
        if let Some(value) = value {
            out.insert(key.into(), value);
        }
    }
    Value::Object(out)
}

impl From<&SchemaNode> for Value {
    fn from(node: &SchemaNode) -> Self {
        node_to_value(node, Position::Member)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_value().serialize(serializer)
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        Value::from(&node)
    }
}
