use serde_json::{Map, Value};
use std::sync::Arc;

use crate::constants::messages::{MALFORMED_RESPONSE, NO_CREDENTIALS};
use crate::constants::parameters::{
    AUTHENTICATION, ENDPOINT_URL, JSON_PARAMETERS, OPERATION, RESOURCE,
};
use crate::errors::NodeError;
use crate::rpc::JsonRpcResponse;
use crate::schema::{self, sort_fields, OperationSchema};
use crate::services::context::ExecutionContext;
use crate::services::logger::Logger;
use crate::services::normalizer::{normalize, ParameterSource};
use crate::services::session::{AuthMode, Session, SessionManager};
use crate::services::transport::Transport;
use crate::services::validation::Validation;
use crate::utils::operation_errors::unknown_operation_error;
use crate::utils::output::{append_records, simplify};

const SORTFIELD: &str = "sortfield";

/// Runs one node invocation: a single session around every input item.
#[derive(Clone)]
pub struct ZabbixManager {
    logger: Logger,
    validation: Validation,
    sessions: SessionManager,
}

impl ZabbixManager {
    pub fn new(logger: Logger, validation: Validation, transport: Arc<dyn Transport>) -> Self {
        let logger = logger.child("zabbix");
        Self {
            sessions: SessionManager::new(logger.clone(), transport),
            logger,
            validation,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub async fn execute(&self, ctx: &dyn ExecutionContext) -> Result<Vec<Value>, NodeError> {
        let count = ctx.item_count();
        if count == 0 {
            return Ok(Vec::new());
        }

        let session = self.open_session(ctx).await?;
        let mut records = Vec::new();
        for index in 0..count {
            let outcome = self.execute_item(ctx, &session, index).await;
            match outcome {
                Ok(result) => append_records(&mut records, result),
                Err(err) if ctx.continue_on_fail() && err.kind.is_item_scoped() => {
                    self.logger.warn(
                        "item failed, continuing",
                        Some(&serde_json::json!({ "item": index, "error": err.message })),
                    );
                    records.push(err.to_record());
                }
                Err(err) => {
                    self.release_after_failure(session).await;
                    return Err(err);
                }
            }
        }

        self.sessions.release(session).await.map_err(|err| {
            let response = err.details.clone();
            err.with_details(serde_json::json!({
                "records_collected": records.len(),
                "response": response,
            }))
        })?;
        self.logger.debug(
            "invocation finished",
            Some(&serde_json::json!({ "items": count, "records": records.len() })),
        );
        Ok(records)
    }

    async fn open_session(&self, ctx: &dyn ExecutionContext) -> Result<Session, NodeError> {
        let mode = AuthMode::parse(
            ctx.node_parameter(AUTHENTICATION, 0)
                .as_ref()
                .and_then(|v| v.as_str()),
        )?;
        let raw = ctx
            .credentials(mode.credential_name())
            .await?
            .ok_or_else(|| NodeError::authentication(NO_CREDENTIALS))?;
        let credentials = mode.parse_credentials(&raw)?;
        let endpoint_override = ctx
            .node_parameter(ENDPOINT_URL, 0)
            .and_then(|v| v.as_str().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty());
        self.sessions
            .acquire(mode, credentials, endpoint_override)
            .await
    }

    async fn release_after_failure(&self, session: Session) {
        if let Err(err) = self.sessions.release(session).await {
            self.logger.warn(
                "logout after failed item did not succeed",
                Some(&serde_json::json!({ "error": err.message })),
            );
        }
    }

    async fn execute_item(
        &self,
        ctx: &dyn ExecutionContext,
        session: &Session,
        index: usize,
    ) -> Result<Value, NodeError> {
        let schema = self.resolve_schema(ctx, index)?;
        let params = self.resolve_parameters(ctx, schema, index)?;

        let raw = self
            .sessions
            .authenticate(session, schema.remote_method, Value::Object(params))
            .await?;
        let response = JsonRpcResponse::from_value(&raw)?;
        if let Some(remote) = response.remote_error() {
            return Err(remote.into_node_error(&raw));
        }
        let result = response
            .result
            .ok_or_else(|| NodeError::remote(MALFORMED_RESPONSE).with_details(raw.clone()))?;
        Ok(simplify(result))
    }

    fn resolve_schema(
        &self,
        ctx: &dyn ExecutionContext,
        index: usize,
    ) -> Result<&'static OperationSchema, NodeError> {
        let resource = self.validation.ensure_string(
            &ctx.node_parameter(RESOURCE, index).unwrap_or(Value::Null),
            RESOURCE,
            true,
        )?;
        let operation = self.validation.ensure_string(
            &ctx.node_parameter(OPERATION, index).unwrap_or(Value::Null),
            OPERATION,
            true,
        )?;
        schema::lookup(&resource, &operation).ok_or_else(|| {
            unknown_operation_error(&resource, &operation, &schema::known_operations())
        })
    }

    fn resolve_parameters(
        &self,
        ctx: &dyn ExecutionContext,
        schema: &OperationSchema,
        index: usize,
    ) -> Result<Map<String, Value>, NodeError> {
        let json_mode = self
            .validation
            .ensure_bool(ctx.node_parameter(JSON_PARAMETERS, index).as_ref(), false);
        if json_mode {
            let params = self
                .validation
                .ensure_json_parameters(ctx.node_parameter(schema.json_parameter, index).as_ref())?;
            return Ok(normalize(schema, ParameterSource::Json(params), Map::new()));
        }

        let form = match ctx.node_parameter(schema.ui_parameter, index) {
            None | Some(Value::Null) => Map::new(),
            Some(value) => self.validation.ensure_object(&value, schema.ui_parameter)?,
        };
        self.check_sortfield(schema, &form);

        let mut required = Map::new();
        for name in schema.required_params {
            let value = self
                .validation
                .ensure_identifier(ctx.node_parameter(name, index).as_ref(), name)?;
            required.insert(name.to_string(), Value::String(value));
        }
        Ok(normalize(schema, ParameterSource::Form(form), required))
    }

    fn check_sortfield(&self, schema: &OperationSchema, form: &Map<String, Value>) {
        let requested: Vec<&str> = match form.get(SORTFIELD) {
            Some(Value::String(field)) => vec![field.as_str()],
            Some(Value::Array(fields)) => fields.iter().filter_map(|v| v.as_str()).collect(),
            _ => return,
        };
        let known = sort_fields(schema.resource);
        for field in requested {
            if !known.contains(&field) {
                self.logger.warn(
                    "sortfield is not sortable for this resource",
                    Some(&serde_json::json!({
                        "method": schema.remote_method,
                        "sortfield": field,
                        "sortable": known,
                    })),
                );
            }
        }
    }
}
