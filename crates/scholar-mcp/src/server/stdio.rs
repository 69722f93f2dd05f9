//! Stdio transport for MCP protocol.
//!
//! Handles newline-delimited JSON-RPC 2.0 over stdin/stdout. Requests are
//! handled one at a time: each call finishes before the next line is read.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::dispatcher::Dispatcher;
use super::protocol::{DEFAULT_PROTOCOL_VERSION, JsonRpcRequest, JsonRpcResponse, codes};

/// Handle MCP protocol over the process's stdin/stdout.
pub async fn run_stdio(dispatcher: &Dispatcher) -> anyhow::Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = tokio::io::stdout();

    serve(reader, writer, dispatcher).await
}

/// Serve MCP requests from `reader` until EOF, writing responses to `writer`.
pub async fn serve<R, W>(mut reader: R, mut writer: W, dispatcher: &Dispatcher) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        buf.clear();
        let bytes_read = reader.read_until(b'\n', &mut buf).await?;

        if bytes_read == 0 {
            // EOF
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line.trim(),
            Err(e) => {
                tracing::warn!(error = %e, "Non UTF-8 input line");
                let response =
                    JsonRpcResponse::error(None, codes::PARSE_ERROR, format!("Parse error: {}", e));
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        if line.is_empty() {
            continue;
        }

        let response = match parse_message(line) {
            Ok(request) => {
                tracing::debug!(method = %request.method, "Received request");
                handle_request(&request, dispatcher).await
            }
            Err(response) => Some(response),
        };

        if let Some(response) = response {
            write_response(&mut writer, &response).await?;
        }
    }

    Ok(())
}

/// Decode one line. Bad JSON is a parse error; JSON of the wrong shape is an
/// invalid request.
fn parse_message(line: &str) -> Result<JsonRpcRequest, JsonRpcResponse> {
    let value: serde_json::Value = serde_json::from_str(line).map_err(|e| {
        tracing::warn!(error = %e, "Unparseable JSON-RPC message");
        JsonRpcResponse::error(None, codes::PARSE_ERROR, format!("Parse error: {}", e))
    })?;

    let id = value.get("id").cloned();
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "Malformed JSON-RPC request");
        JsonRpcResponse::error(id, codes::INVALID_REQUEST, format!("Invalid request: {}", e))
    })
}

async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)?;
    writer.write_all(response_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

/// Route one message. Notifications yield no response.
async fn handle_request(req: &JsonRpcRequest, dispatcher: &Dispatcher) -> Option<JsonRpcResponse> {
    if req.is_notification() {
        tracing::debug!(method = %req.method, "Notification received");
        return None;
    }

    let id = req.id.clone();

    if req.jsonrpc != "2.0" {
        return Some(JsonRpcResponse::error(
            id,
            codes::INVALID_REQUEST,
            format!("Unsupported jsonrpc version: {:?}", req.jsonrpc),
        ));
    }

    let response = match req.method.as_str() {
        "initialize" => handle_initialize(id, &req.params),
        "tools/list" => handle_tools_list(id, dispatcher),
        "tools/call" => handle_tools_call(id, &req.params, dispatcher).await,
        "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
        _ => JsonRpcResponse::error(
            id,
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", req.method),
        ),
    };

    Some(response)
}

fn handle_initialize(id: Option<serde_json::Value>, params: &serde_json::Value) -> JsonRpcResponse {
    let protocol_version = params
        .get("protocolVersion")
        .and_then(|v| v.as_str())
        .unwrap_or(DEFAULT_PROTOCOL_VERSION);

    tracing::info!("MCP initialize: protocol version {}", protocol_version);

    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": "scholar-mcp",
                "version": env!("CARGO_PKG_VERSION")
            }
        }),
    )
}

fn handle_tools_list(id: Option<serde_json::Value>, dispatcher: &Dispatcher) -> JsonRpcResponse {
    JsonRpcResponse::success(
        id,
        serde_json::json!({
            "tools": dispatcher.list_tools()
        }),
    )
}

async fn handle_tools_call(
    id: Option<serde_json::Value>,
    params: &serde_json::Value,
    dispatcher: &Dispatcher,
) -> JsonRpcResponse {
    let tool_name = match params.get("name").and_then(|v| v.as_str()) {
        Some(name) => name,
        None => {
            return JsonRpcResponse::error(id, codes::INVALID_PARAMS, "Missing 'name' parameter");
        }
    };

    let arguments = match params.get("arguments") {
        None | Some(serde_json::Value::Null) => serde_json::json!({}),
        Some(args) => args.clone(),
    };

    let result = dispatcher.call_tool(tool_name, arguments).await;

    match serde_json::to_value(&result) {
        Ok(value) => JsonRpcResponse::success(id, value),
        Err(e) => JsonRpcResponse::error(id, codes::INTERNAL_ERROR, format!("Internal error: {}", e)),
    }
}
