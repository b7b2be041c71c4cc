use serde_json::Value;
use std::sync::Arc;

use crate::errors::NodeError;
use crate::managers::zabbix::ZabbixManager;
use crate::schema;
use crate::services::context::ExecutionContext;
use crate::services::logger::Logger;
use crate::services::transport::{HttpTransport, Transport};
use crate::services::validation::Validation;

pub struct App {
    pub logger: Logger,
    pub zabbix: Arc<ZabbixManager>,
}

impl App {
    pub fn initialize() -> Result<Self, NodeError> {
        let logger = Logger::new("bridge");
        let transport = Arc::new(HttpTransport::new(logger.clone()));
        Self::validate_schema_wiring()?;
        Ok(Self::with_transport(logger, transport))
    }

    pub fn with_transport(logger: Logger, transport: Arc<dyn Transport>) -> Self {
        let zabbix = Arc::new(ZabbixManager::new(
            logger.clone(),
            Validation::new(),
            transport,
        ));
        Self { logger, zabbix }
    }

    pub async fn run(&self, ctx: &dyn ExecutionContext) -> Result<Vec<Value>, NodeError> {
        let records = self.zabbix.execute(ctx).await;
        if let Err(err) = &records {
            self.logger.error(
                "invocation failed",
                Some(&serde_json::json!({ "code": err.code, "error": err.message })),
            );
        }
        records
    }

    /// `(resource, operation, remote method)` for every supported pair.
    pub fn operations() -> Vec<Value> {
        schema::schemas()
            .iter()
            .map(|schema| {
                serde_json::json!({
                    "resource": schema.resource,
                    "operation": schema.operation,
                    "method": schema.remote_method,
                })
            })
            .collect()
    }

    fn validate_schema_wiring() -> Result<(), NodeError> {
        let mut seen = std::collections::HashSet::new();
        let duplicates: Vec<String> = schema::schemas()
            .iter()
            .map(|schema| schema.key())
            .filter(|key| !seen.insert(key.clone()))
            .collect();
        if duplicates.is_empty() {
            return Ok(());
        }
        Err(NodeError::internal("Operation table is inconsistent")
            .with_hint("Every (resource, operation) pair must be declared once.")
            .with_details(serde_json::json!({ "duplicates": duplicates })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_table_has_no_duplicates() {
        assert!(App::validate_schema_wiring().is_ok());
    }

    #[test]
    fn operations_list_every_remote_method() {
        let methods: Vec<String> = App::operations()
            .iter()
            .filter_map(|op| op["method"].as_str().map(str::to_string))
            .collect();
        for method in [
            "history.get",
            "item.get",
            "problem.get",
            "host.get",
            "host.update",
            "service.get",
            "sla.get",
            "sla.getsli",
            "sla.update",
        ] {
            assert!(methods.iter().any(|m| m == method), "missing {}", method);
        }
    }
}
