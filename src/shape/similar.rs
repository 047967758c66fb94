use std::collections::HashSet;
use serde_json::{Map, Value};

/// Result of the array homogeneity check.
#[derive(Debug)]
pub struct Similarity<'a> {
    /// Every element hashed into the same bucket.
    pub same: bool,
    /// Object element with the most own properties (first maximum wins).
    pub selected: Option<&'a Map<String, Value>>,
}

/// Structural hash: the sorted key list for objects, the serialized value
/// for anything else. Only key sets are compared, never nested values.
pub fn shape_hash(v: &Value) -> String {
    match v {
        Value::Object(m) => {
            let mut keys: Vec<&str> = m.keys().map(String::as_str).collect();
            keys.sort_unstable();
            format!("keys:{}", Value::from(keys))
        }
        other => format!("value:{other}"),
    }
}

pub fn all_similar_objects(xs: &[Value]) -> Similarity<'_> {
    let mut buckets = HashSet::<String>::new();
    let mut max = 0usize;
    let mut selected = None;
    for el in xs {
        buckets.insert(shape_hash(el));
        if let Value::Object(m) = el {
            // a zero max keeps re-selecting until some element has keys
            if max == 0 || m.len() > max {
                max = m.len();
                selected = Some(m);
            }
        }
    }
    Similarity { same: buckets.len() == 1, selected }
}
