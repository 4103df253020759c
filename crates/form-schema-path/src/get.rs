use serde_json::{Map, Value};

use crate::PathError;

/// Get a value by path. Returns `None` if any step is missing.
pub fn get<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for step in path {
        current = match current {
            Value::Object(map) => map.get(step)?,
            Value::Array(arr) => arr.get(step.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Write `value` at `path`, creating missing intermediate objects.
///
/// Setting the root replaces the whole document. A `null` met on the way
/// is replaced by an object. An array step must be an existing index or
/// the index one past the end, which appends.
///
/// # Errors
///
/// [`PathError::NotContainer`] when a step would descend into a string,
/// number or boolean, [`PathError::InvalidIndex`] for a bad array step.
///
/// # Example
///
/// ```
/// use form_schema_path::set;
/// use serde_json::json;
///
/// let mut doc = json!({});
/// set(&mut doc, &["schema".into(), "title".into()], json!("Order")).unwrap();
/// assert_eq!(doc, json!({"schema": {"title": "Order"}}));
/// ```
pub fn set(doc: &mut Value, path: &[String], value: Value) -> Result<(), PathError> {
    let Some((last, parents)) = path.split_last() else {
        *doc = value;
        return Ok(());
    };

    let mut current = doc;
    for step in parents {
        current = child_entry(current, step)?;
    }

    if current.is_null() {
        *current = Value::Object(Map::new());
    }
    match current {
        Value::Object(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = array_index(last, arr.len())?;
            if idx == arr.len() {
                arr.push(value);
            } else {
                arr[idx] = value;
            }
            Ok(())
        }
        _ => Err(PathError::NotContainer(last.clone())),
    }
}

fn child_entry<'a>(current: &'a mut Value, step: &str) -> Result<&'a mut Value, PathError> {
    if current.is_null() {
        *current = Value::Object(Map::new());
    }
    match current {
        Value::Object(map) => Ok(map
            .entry(step.to_string())
            .or_insert_with(|| Value::Object(Map::new()))),
        Value::Array(arr) => {
            let idx = array_index(step, arr.len())?;
            if idx == arr.len() {
                arr.push(Value::Object(Map::new()));
            }
            Ok(&mut arr[idx])
        }
        _ => Err(PathError::NotContainer(step.to_string())),
    }
}

fn array_index(step: &str, len: usize) -> Result<usize, PathError> {
    match step.parse::<usize>() {
        Ok(idx) if idx <= len && crate::is_valid_index(step) => Ok(idx),
        _ => Err(PathError::InvalidIndex(step.to_string())),
    }
}
