use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Node kind recorded in the shape tree and emitted as the schema `type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Object,
    Array,
    String,
    Number,
    Boolean,
}

impl ShapeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Object => "object",
            Self::Array => "array",
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

/// Priority: object → array → null → boolean → string → number.
///
/// `null` has no kind. Strings that coerce to a number are `Number`
/// (see [`is_numeric_str`]).
pub fn classify(v: &Value) -> Option<ShapeKind> {
    match v {
        Value::Object(_) => Some(ShapeKind::Object),
        Value::Array(_) => Some(ShapeKind::Array),
        Value::Null => None,
        Value::Bool(_) => Some(ShapeKind::Boolean),
        Value::String(s) if is_numeric_str(s) => Some(ShapeKind::Number),
        Value::String(_) => Some(ShapeKind::String),
        Value::Number(_) => Some(ShapeKind::Number),
    }
}

// ------------------------- Numeric coercion ------------------------------- //

/// `Number(s) - parseFloat(s) + 1 >= 0` with ECMAScript conversion rules.
///
/// Any NaN on either side fails the test, so `""`, `"12abc"` and
/// `"Infinity"` stay strings while `"123"`, `" 4.5 "` and `"0x10"` pass.
pub fn is_numeric_str(s: &str) -> bool {
    let n = string_to_number(s);
    let p = parse_float(s);
    n - p + 1.0 >= 0.0
}

static DECIMAL_FULL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$").expect("static regex")
});

static DECIMAL_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").expect("static regex")
});

/// ECMAScript WhiteSpace and LineTerminator; U+0085 is not in the set.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\u{b}' | '\u{c}' | '\r' | ' ' | '\u{a0}' | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}' | '\u{2029}' | '\u{202f}' | '\u{205f}' | '\u{3000}' | '\u{feff}'
    )
}

/// ECMAScript `Number(string)`.
fn string_to_number(s: &str) -> f64 {
    let t = s.trim_matches(is_js_whitespace);
    if t.is_empty() {
        return 0.0;
    }
    match t {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = t.strip_prefix(prefix) {
            return radix_to_f64(digits, radix);
        }
    }
    // `f64::from_str` also takes "inf"/"nan"; gate on the JS grammar first.
    if DECIMAL_FULL.is_match(t) {
        t.parse::<f64>().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

/// ECMAScript `parseFloat(string)`: longest decimal prefix after leading whitespace.
fn parse_float(s: &str) -> f64 {
    let t = s.trim_start_matches(is_js_whitespace);
    let Some(m) = DECIMAL_PREFIX.find(t) else {
        return f64::NAN;
    };
    match m.as_str() {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        lit => lit.parse::<f64>().unwrap_or(f64::NAN),
    }
}

fn radix_to_f64(digits: &str, radix: u32) -> f64 {
    if digits.is_empty() {
        return f64::NAN;
    }
    digits
        .chars()
        .try_fold(0f64, |acc, c| c.to_digit(radix).map(|d| acc * radix as f64 + d as f64))
        .unwrap_or(f64::NAN)
}
