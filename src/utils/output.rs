use crate::constants::messages::NO_RECORDS;
use serde_json::Value;

/// Marker returned instead of an empty `result`.
pub fn empty_result_marker() -> Value {
    serde_json::json!({
        "success": true,
        "message": NO_RECORDS,
    })
}

/// Collapses an empty `result` (object or array) into the success marker;
/// anything else comes back unchanged.
pub fn simplify(result: Value) -> Value {
    let empty = match &result {
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if empty {
        empty_result_marker()
    } else {
        result
    }
}

/// Appends one simplified result to the output, splicing arrays element by
/// element.
pub fn append_records(records: &mut Vec<Value>, simplified: Value) {
    match simplified {
        Value::Array(items) => records.extend(items),
        other => records.push(other),
    }
}
