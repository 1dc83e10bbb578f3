//! JSON-RPC protocol representations and formatting utilities
//!
//! Provides standardized mapping of internal AppErrors to valid JSON-RPC payloads.

use rust_mcp_sdk::schema::{
    CallToolResult, ContentBlock, JsonrpcErrorResponse, JsonrpcResultResponse, RequestId,
    Result as McpResult, RpcError, TextContent,
};
use serde_json::{json, Value};
use tracing::warn;

use crate::errors::AppError;

pub fn is_json_rpc_error(value: &Value) -> bool {
    value.get("error").is_some()
        || value
            .get("result")
            .and_then(|result| result.get("isError"))
            .and_then(Value::as_bool)
            .unwrap_or(false)
}

/// Protocol misuse becomes a JSON-RPC error; relay-side failures become an
/// `isError` tool result so the caller can read the reason.
pub fn app_error_to_json_rpc(id: Option<Value>, err: AppError) -> Value {
    match err {
        AppError::Validation { code, message } => json_rpc_error_with_data(
            id,
            -32602,
            "Invalid params",
            Some(json!({
                "code": code,
                "message": message,
                "details": {}
            })),
        ),
        AppError::UnknownTool { ref name } => json_rpc_error_with_data(
            id,
            -32601,
            "Method not found",
            Some(json!({
                "code": err.code(),
                "message": "unknown tool name",
                "details": {
                    "name": name,
                },
            })),
        ),
        AppError::Configuration { .. }
        | AppError::Transport { .. }
        | AppError::SemanticRejection { .. } => {
            warn!(code = err.code(), error = %err, "tool call failed");
            json_rpc_result(
                id,
                serde_json::to_value(tool_error_result(&err))
                    .expect("tool error result serialization"),
            )
        }
    }
}

pub fn tool_error_result(err: &AppError) -> CallToolResult {
    let mut structured = serde_json::Map::from_iter([("code".to_string(), json!(err.code()))]);
    // absent for network failures, where no HTTP status was received
    if let AppError::Transport {
        status: Some(status),
        ..
    } = err
    {
        structured.insert("status".to_string(), json!(status));
    }

    CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(
            err.to_string(),
            None,
            None,
        ))],
        is_error: Some(true),
        meta: None,
        structured_content: Some(structured),
    }
}

pub fn json_rpc_error(id: Option<Value>, code: i32, message: &str) -> Value {
    json_rpc_error_with_data(id, code, message, None)
}

pub fn json_rpc_error_with_data(
    id: Option<Value>,
    code: i32,
    message: &str,
    data: Option<Value>,
) -> Value {
    let response = JsonrpcErrorResponse::new(
        RpcError {
            code: i64::from(code),
            data,
            message: message.to_string(),
        },
        id.as_ref().and_then(value_to_request_id),
    );
    serde_json::to_value(response).expect("jsonrpc error response serialization")
}

pub fn json_rpc_result(id: Option<Value>, result: Value) -> Value {
    if let Some(request_id) = id.as_ref().and_then(value_to_request_id) {
        let extra = result.as_object().cloned();
        let response = JsonrpcResultResponse::new(request_id, McpResult { meta: None, extra });
        return serde_json::to_value(response).expect("jsonrpc result response serialization");
    }

    json!({
        "jsonrpc": "2.0",
        "id": id,
        "result": result
    })
}

pub fn value_to_request_id(value: &Value) -> Option<RequestId> {
    if let Some(string_id) = value.as_str() {
        return Some(RequestId::String(string_id.to_string()));
    }

    value.as_i64().map(RequestId::Integer)
}

pub fn request_id_to_value(id: RequestId) -> Value {
    match id {
        RequestId::String(value) => Value::String(value),
        RequestId::Integer(value) => Value::Number(value.into()),
    }
}
