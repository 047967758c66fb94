//! Shape tree construction (single pass over one example document).
//!
//! Walk a JSON value and classify every node into a [`ShapeNode`] carrying
//! what schema emission needs: kind, required-ness, string minimum length
//! and the array homogeneity flags.
//!
//! - Objects keep every own property, in document order.
//! - Arrays whose elements share one key set collapse into a single
//!   representative object; otherwise every index is classified on its own.
//! - Each builder returns a fresh subtree; nothing is shared or mutated
//!   across sibling calls.
pub mod kind;
pub mod similar;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

pub use kind::{classify, ShapeKind};

// ------------------------------ State ------------------------------------ //

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ShapeNode {
    /// `None` for null.
    pub kind: Option<ShapeKind>,
    /// Property names, or array indices as decimal strings.
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub children: IndexMap<String, ShapeNode>,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_items: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u32>,
}

impl ShapeNode {
    fn of_kind(kind: ShapeKind) -> Self {
        Self { kind: Some(kind), ..Self::default() }
    }
}

/// What the per-index fallback does with scalar elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Scalars {
    Keep,
    Skip,
}

// ------------------------------ Build ------------------------------------ //

/// Root entry: arrays build an array tree, everything else an object tree.
/// A primitive or null root is an object with no properties.
pub fn build(v: &Value) -> ShapeNode {
    match v {
        Value::Array(xs) => build_array_tree(xs),
        Value::Object(m) => build_object_tree(m),
        other => {
            tracing::debug!(value = %other, "primitive root, treating as empty object");
            ShapeNode::of_kind(ShapeKind::Object)
        }
    }
}

fn build_value(v: &Value) -> ShapeNode {
    match v {
        Value::Object(m) => build_object_tree(m),
        Value::Array(xs) => build_array_tree(xs),
        _ => build_primitive(v),
    }
}

/// Required whenever the value is not null, including `false`, `0` and `""`.
pub fn build_primitive(v: &Value) -> ShapeNode {
    let kind = classify(v);
    tracing::trace!(?kind, "primitive");
    let min_length = match (kind, v) {
        (Some(ShapeKind::String), Value::String(s)) => Some(if s.is_empty() { 0 } else { 1 }),
        _ => None,
    };
    ShapeNode {
        kind,
        required: !v.is_null(),
        min_length,
        ..ShapeNode::default()
    }
}

pub fn build_object_tree(map: &Map<String, Value>) -> ShapeNode {
    let mut node = ShapeNode::of_kind(ShapeKind::Object);
    for (k, v) in map {
        node.children.insert(k.clone(), build_value(v));
    }
    node
}

pub fn build_array_tree(xs: &[Value]) -> ShapeNode {
    if let Some(Value::Object(_)) = xs.first() {
        let similar = similar::all_similar_objects(xs);
        if similar.same {
            if let Some(selected) = similar.selected {
                tracing::debug!(len = xs.len(), keys = selected.len(), "homogeneous array collapsed");
                // merge the representative's properties into the array node itself
                let mut node = build_object_tree(selected);
                node.kind = Some(ShapeKind::Array);
                node.unique_items = Some(true);
                node.min_items = Some(1);
                return node;
            }
        }
        tracing::debug!(len = xs.len(), "heterogeneous array, classifying per index");
        return build_per_index(xs, Scalars::Skip);
    }
    build_per_index(xs, Scalars::Keep)
}

fn build_per_index(xs: &[Value], scalars: Scalars) -> ShapeNode {
    let mut node = ShapeNode::of_kind(ShapeKind::Array);
    for (i, el) in xs.iter().enumerate() {
        let child = match el {
            Value::Object(m) => {
                let mut child = build_object_tree(m);
                child.required = !m.is_empty();
                child
            }
            Value::Array(ys) => {
                let mut child = build_array_tree(ys);
                child.unique_items = Some(true);
                child.required = !ys.is_empty();
                child
            }
            _ if scalars == Scalars::Keep => build_primitive(el),
            _ => continue,
        };
        node.children.insert(i.to_string(), child);
    }
    node
}

// ------------------------------- Tests ------------------------------------ //
