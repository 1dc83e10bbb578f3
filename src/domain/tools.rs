//! The `write_note` tool exposed via Model Context Protocol
//!
//! Validates the invocation against the configured endpoint and delegates the
//! write to the `NoteRelay` implementation held in `AppState`.

use rust_mcp_sdk::{
    macros,
    schema::{CallToolRequestParams, CallToolResult, ContentBlock, TextContent, Tool},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::info;

use crate::domain::notes::{memo_url, NoteRequest};
use crate::mcp::rpc::{app_error_to_json_rpc, json_rpc_error, json_rpc_result};
use crate::{errors::AppError, AppState};

pub const WRITE_NOTE_TOOL: &str = "write_note";

#[macros::mcp_tool(name = "write_note", description = "Write a new note to flomo")]
#[derive(Debug, Deserialize, Serialize, macros::JsonSchema)]
pub struct WriteNoteTool {
    /// Text content of the note
    pub content: String,
}

pub fn build_tools_list() -> Vec<Tool> {
    vec![WriteNoteTool::tool()]
}

/// Strings pass through, numbers and booleans use their JSON text, null counts as absent.
pub fn note_request_from_arguments(
    arguments: Option<&Map<String, Value>>,
) -> Result<NoteRequest, AppError> {
    let content = match arguments.and_then(|args| args.get("content")) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Array(_) | Value::Object(_)) => {
            return Err(AppError::validation(
                "invalid_content",
                "content must be a string",
            ))
        }
    };

    NoteRequest::new(content)
}

pub async fn write_note(
    state: &AppState,
    arguments: Option<&Map<String, Value>>,
) -> Result<CallToolResult, AppError> {
    if !state.config.is_configured() {
        return Err(AppError::configuration(
            "flomo api url is not set; pass --flomo_api_url or set FLOMO_API_URL",
        ));
    }

    let request = note_request_from_arguments(arguments)?;
    let slug = state.relay.write_note(&request).await?.into_slug()?;
    let url = memo_url(&slug);

    info!(memo_id = %slug, "note written");

    Ok(CallToolResult {
        content: vec![ContentBlock::from(TextContent::new(
            format!("Note written to flomo: {url}"),
            None,
            None,
        ))],
        is_error: None,
        meta: None,
        structured_content: Some(Map::from_iter([
            ("memo_id".to_string(), json!(slug)),
            ("url".to_string(), json!(url)),
        ])),
    })
}

pub async fn handle_tools_call(
    state: &AppState,
    id: Option<Value>,
    params: Option<Value>,
) -> Value {
    let Some(raw_params) = params else {
        return json_rpc_error(id, -32602, "Invalid params");
    };

    let tool_call: CallToolRequestParams = match serde_json::from_value(raw_params) {
        Ok(value) => value,
        Err(_) => return json_rpc_error(id, -32602, "Invalid params"),
    };

    let outcome = match tool_call.name.as_str() {
        WRITE_NOTE_TOOL => write_note(state, tool_call.arguments.as_ref()).await,
        other => Err(AppError::unknown_tool(other)),
    };

    match outcome {
        Ok(result) => json_rpc_result(
            id,
            serde_json::to_value(result).expect("write_note tool result serialization"),
        ),
        Err(err) => app_error_to_json_rpc(id, err),
    }
}
