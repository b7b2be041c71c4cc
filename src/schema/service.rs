use super::{FieldRule, OperationSchema};

pub(super) fn schemas() -> Vec<OperationSchema> {
    vec![OperationSchema::new("service", "get", "service.get")
        .with_common_get()
        .with_ids(&["serviceids", "parentids", "childids", "slaids"])
        .with_flags(&["deep_parentids", "without_problem_tags"])
        .with_fields(&[
            ("tags", FieldRule::Unwrap("tags")),
            ("problem_tags", FieldRule::Unwrap("problem_tags")),
            ("selectStatusTimeline", FieldRule::Unwrap("statusTimeline")),
        ])]
}
