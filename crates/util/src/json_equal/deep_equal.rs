use serde_json::{Map, Number, Value};

/// Structural equality over two JSON trees.
///
/// Object key order is ignored, array order is not. Numbers compare by
/// value, so `24` and `24.0` are equal: sample data comes out of an
/// expression evaluator that does not distinguish integers from floats.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use form_schema_util::json_equal::deep_equal;
///
/// let a = json!({"name": "John", "tags": ["a", "b"]});
/// let b = json!({"tags": ["a", "b"], "name": "John"});
/// let c = json!({"name": "John", "tags": ["b", "a"]});
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => number_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| deep_equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => object_equal(a, b),
        _ => false,
    }
}

/// Like [`deep_equal`] but treats a missing value as equal only to another
/// missing value.
pub fn deep_equal_opt(a: Option<&Value>, b: Option<&Value>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => deep_equal(a, b),
        _ => false,
    }
}

fn number_equal(a: &Number, b: &Number) -> bool {
    if a == b {
        return true;
    }
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

fn object_equal(a: &Map<String, Value>, b: &Map<String, Value>) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .all(|(key, val_a)| b.get(key).is_some_and(|val_b| deep_equal(val_a, val_b)))
}
