use crate::errors::NodeError;
use crate::utils::suggest::suggest;

pub fn unknown_operation_error(resource: &str, operation: &str, known: &[String]) -> NodeError {
    let requested = format!("{}:{}", resource, operation);
    let suggestions = suggest(&requested, known, 3);
    let mut hint = format!("Use one of: {}.", known.join(", "));
    if !suggestions.is_empty() {
        hint = format!("Did you mean: {}? {}", suggestions.join(", "), hint);
    }
    NodeError::validation(format!(
        "The operation \"{}\" is not known for resource \"{}\"",
        operation, resource
    ))
    .with_hint(hint)
    .with_details(serde_json::json!({
        "known_operations": known,
        "did_you_mean": suggestions,
    }))
}
