//! Declarative (resource, operation) table.
//!
//! Each record names the remote method, the node parameters that carry the
//! JSON and form variants of the method parameters, and the coercion rule
//! for every form field that needs one. Fields without a rule pass through.

mod common;
mod history;
mod host;
mod item;
mod problem;
mod service;
mod sla;

use once_cell::sync::Lazy;
use std::collections::HashMap;

pub use common::sort_fields;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// `[{id}]` wrapper objects -> flat list of ids.
    IdList,
    /// `[{severityNumber}]` -> flat list of numbers.
    SeverityList,
    /// `{key: [...]}` -> inner value.
    Unwrap(&'static str),
    /// `true -> 1`, `false -> null`.
    Flag,
    /// `true -> 1`, `false -> 0`.
    Number01,
    /// `{header: [{key, value}]}` -> `{key: value}`.
    HeaderPairs,
    /// `{filter: [{key, values}]}` -> `{key: values}`.
    KeyValues(&'static str),
    /// `{property: {key, value}}` -> `{key: value}`.
    KeyValue(&'static str),
    /// Tri-state option: empty string omits the field, otherwise a boolean.
    OptionalBool,
}

#[derive(Debug, Clone)]
pub struct OperationSchema {
    pub resource: &'static str,
    pub operation: &'static str,
    pub remote_method: &'static str,
    pub json_parameter: &'static str,
    pub ui_parameter: &'static str,
    pub fields: Vec<(&'static str, FieldRule)>,
    pub required_params: &'static [&'static str],
}

impl OperationSchema {
    pub(crate) fn new(
        resource: &'static str,
        operation: &'static str,
        remote_method: &'static str,
    ) -> Self {
        Self {
            resource,
            operation,
            remote_method,
            json_parameter: "parametersJson",
            ui_parameter: "parametersUi",
            fields: Vec::new(),
            required_params: &[],
        }
    }

    pub(crate) fn with_parameter_names(
        mut self,
        json_parameter: &'static str,
        ui_parameter: &'static str,
    ) -> Self {
        self.json_parameter = json_parameter;
        self.ui_parameter = ui_parameter;
        self
    }

    pub(crate) fn with_fields(mut self, fields: &[(&'static str, FieldRule)]) -> Self {
        self.fields.extend_from_slice(fields);
        self
    }

    pub(crate) fn with_ids(mut self, names: &[&'static str]) -> Self {
        self.fields
            .extend(names.iter().map(|name| (*name, FieldRule::IdList)));
        self
    }

    pub(crate) fn with_flags(mut self, names: &[&'static str]) -> Self {
        self.fields
            .extend(names.iter().map(|name| (*name, FieldRule::Flag)));
        self
    }

    pub(crate) fn with_common_get(self) -> Self {
        self.with_fields(common::COMMON_GET_FIELDS)
    }

    pub(crate) fn with_required(mut self, names: &'static [&'static str]) -> Self {
        self.required_params = names;
        self
    }

    pub fn key(&self) -> String {
        format!("{}:{}", self.resource, self.operation)
    }

    pub fn rule_for(&self, field: &str) -> Option<FieldRule> {
        self.fields
            .iter()
            .rev()
            .find(|(name, _)| *name == field)
            .map(|(_, rule)| *rule)
    }
}

static SCHEMAS: Lazy<Vec<OperationSchema>> = Lazy::new(|| {
    let mut all = Vec::new();
    all.extend(history::schemas());
    all.extend(item::schemas());
    all.extend(problem::schemas());
    all.extend(host::schemas());
    all.extend(service::schemas());
    all.extend(sla::schemas());
    all
});

static SCHEMA_MAP: Lazy<HashMap<String, &'static OperationSchema>> =
    Lazy::new(|| SCHEMAS.iter().map(|schema| (schema.key(), schema)).collect());

pub fn schemas() -> &'static [OperationSchema] {
    &SCHEMAS
}

pub fn lookup(resource: &str, operation: &str) -> Option<&'static OperationSchema> {
    SCHEMA_MAP
        .get(&format!("{}:{}", resource.trim(), operation.trim()))
        .copied()
}

pub fn known_operations() -> Vec<String> {
    SCHEMAS.iter().map(OperationSchema::key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_declared_pair_resolves_to_its_method() {
        let expected = [
            ("history", "get", "history.get"),
            ("item", "get", "item.get"),
            ("problem", "get", "problem.get"),
            ("host", "get", "host.get"),
            ("host", "update", "host.update"),
            ("service", "get", "service.get"),
            ("sla", "get", "sla.get"),
            ("sla", "getsli", "sla.getsli"),
            ("sla", "update", "sla.update"),
        ];
        for (resource, operation, method) in expected {
            let schema = lookup(resource, operation).expect("schema registered");
            assert_eq!(schema.remote_method, method);
        }
        assert_eq!(schemas().len(), expected.len());
    }

    #[test]
    fn unknown_pair_is_absent() {
        assert!(lookup("item", "delete").is_none());
    }

    #[test]
    fn keys_are_unique() {
        let keys = known_operations();
        let unique: std::collections::HashSet<_> = keys.iter().collect();
        assert_eq!(keys.len(), unique.len());
    }

    #[test]
    fn query_resources_use_query_parameter_names() {
        let schema = lookup("item", "get").unwrap();
        assert_eq!(schema.json_parameter, "queryParametersJson");
        assert_eq!(schema.ui_parameter, "queryParametersUi");
        let schema = lookup("sla", "get").unwrap();
        assert_eq!(schema.ui_parameter, "parametersUi");
    }
}
