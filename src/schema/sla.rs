use super::{FieldRule, OperationSchema};

pub(super) fn schemas() -> Vec<OperationSchema> {
    vec![
        OperationSchema::new("sla", "get", "sla.get")
            .with_common_get()
            .with_ids(&["slaids", "serviceids"]),
        OperationSchema::new("sla", "getsli", "sla.getsli")
            .with_ids(&["serviceids"])
            .with_required(&["slaid"]),
        OperationSchema::new("sla", "update", "sla.update")
            .with_fields(&[
                ("service_tags", FieldRule::Unwrap("metadataValues")),
                ("schedule", FieldRule::Unwrap("metadataValues")),
                ("excluded_downtimes", FieldRule::Unwrap("metadataValues")),
            ])
            .with_required(&["slaid"]),
    ]
}
