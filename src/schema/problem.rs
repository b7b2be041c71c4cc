use super::{FieldRule, OperationSchema};

pub(super) fn schemas() -> Vec<OperationSchema> {
    vec![OperationSchema::new("problem", "get", "problem.get")
        .with_parameter_names("queryParametersJson", "queryParametersUi")
        .with_common_get()
        .with_fields(&[
            ("tags", FieldRule::Unwrap("tags")),
            ("severities", FieldRule::SeverityList),
        ])
        .with_ids(&[
            "eventids",
            "groupids",
            "hostids",
            "objectids",
            "applicationids",
        ])]
}
