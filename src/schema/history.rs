use super::OperationSchema;

pub(super) fn schemas() -> Vec<OperationSchema> {
    vec![OperationSchema::new("history", "get", "history.get")
        .with_parameter_names("queryParametersJson", "queryParametersUi")
        .with_common_get()
        .with_ids(&["hostids", "itemids"])]
}
