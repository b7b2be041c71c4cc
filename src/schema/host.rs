use super::{FieldRule, OperationSchema};

pub(super) fn schemas() -> Vec<OperationSchema> {
    vec![
        OperationSchema::new("host", "get", "host.get")
            .with_common_get()
            .with_ids(&[
                "groupids",
                "applicationids",
                "dserviceids",
                "graphids",
                "hostids",
                "httptestids",
                "interfaceids",
                "itemids",
                "maintenanceids",
                "proxyids",
                "templateids",
                "triggerids",
            ])
            .with_flags(&[
                "monitored_hosts",
                "proxy_hosts",
                "with_items",
                "with_item_prototypes",
                "with_simple_graph_item_prototypes",
                "with_applications",
                "with_graphs",
                "with_graph_prototypes",
                "with_httptests",
                "with_monitored_httptests",
                "with_monitored_items",
                "with_monitored_triggers",
                "with_simple_graph_items",
                "with_triggers",
            ])
            .with_fields(&[
                ("severities", FieldRule::SeverityList),
                ("tags", FieldRule::Unwrap("tags")),
                ("withProblemsSuppressed", FieldRule::OptionalBool),
                ("searchInventory", FieldRule::KeyValue("property")),
            ]),
        // Only macros arrive wrapped; groups, interfaces, tags and inventory
        // already have the shape host.update expects.
        OperationSchema::new("host", "update", "host.update")
            .with_fields(&[("macros", FieldRule::Unwrap("metadataValues"))])
            .with_required(&["hostid"]),
    ]
}
