use super::{FieldRule, OperationSchema};

pub(super) fn schemas() -> Vec<OperationSchema> {
    vec![OperationSchema::new("item", "get", "item.get")
        .with_parameter_names("queryParametersJson", "queryParametersUi")
        .with_common_get()
        .with_fields(&[
            ("follow_redirects", FieldRule::Number01),
            ("output_format", FieldRule::Number01),
        ])
        .with_ids(&[
            "itemids",
            "groupids",
            "templateids",
            "hostids",
            "proxyids",
            "interfaceids",
            "applicationids",
            "graphids",
            "triggerids",
        ])
        .with_flags(&["webitems"])]
}
