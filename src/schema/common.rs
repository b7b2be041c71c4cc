use super::FieldRule;

/// Parameters shared by every `*.get` method.
pub(super) const COMMON_GET_FIELDS: &[(&str, FieldRule)] = &[
    ("filter", FieldRule::KeyValues("filter")),
    ("search", FieldRule::KeyValue("property")),
    ("sortorder", FieldRule::Unwrap("order")),
    ("headers", FieldRule::HeaderPairs),
];

/// Properties each resource's `get` method can sort by.
pub fn sort_fields(resource: &str) -> &'static [&'static str] {
    match resource {
        "history" => &["itemid", "clock"],
        "item" => &[
            "itemid", "name", "key_", "delay", "history", "trends", "type", "status",
        ],
        "problem" => &["eventid"],
        "host" => &["hostid", "host", "name", "status"],
        "service" => &["serviceid", "name", "status", "sortorder", "created_at"],
        "sla" => &[
            "slaid",
            "name",
            "period",
            "slo",
            "effective_date",
            "timezone",
            "status",
            "description",
        ],
        _ => &[],
    }
}
