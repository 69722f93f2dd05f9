//! MCP protocol tests.
//!
//! Drive the stdio loop with in-memory buffers and check the JSON-RPC
//! responses, plus dispatcher behavior that never reaches a provider.

use serde_json::{Value, json};
use wiremock::MockServer;

use scholar_mcp::config::Config;
use scholar_mcp::server::Dispatcher;
use scholar_mcp::server::stdio::serve;
use scholar_mcp::tools::{ToolContext, ToolRegistry};

fn dispatcher_for(config: &Config) -> Dispatcher {
    let ctx = ToolContext::from_config(config).unwrap();
    Dispatcher::new(ToolRegistry::from_config(config), ctx)
}

/// Feed `input` through the stdio loop and collect one JSON value per output line.
async fn run_session(dispatcher: &Dispatcher, input: &str) -> Vec<Value> {
    run_session_bytes(dispatcher, input.as_bytes()).await
}

async fn run_session_bytes(dispatcher: &Dispatcher, input: &[u8]) -> Vec<Value> {
    let mut output = Vec::new();
    serve(input, &mut output, dispatcher).await.unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

// =============================================================================
// Stdio session
// =============================================================================

#[tokio::test]
async fn test_initialize_echoes_protocol_version() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses = run_session(
        &dispatcher,
        r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{"protocolVersion":"2025-03-26"}}
"#,
    )
    .await;

    assert_eq!(responses.len(), 1);
    let result = &responses[0]["result"];
    assert_eq!(responses[0]["id"], 1);
    assert_eq!(result["protocolVersion"], "2025-03-26");
    assert_eq!(result["serverInfo"]["name"], "scholar-mcp");
    assert!(result["capabilities"]["tools"].is_object());
}

#[tokio::test]
async fn test_initialize_defaults_protocol_version() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses =
        run_session(&dispatcher, "{\"jsonrpc\":\"2.0\",\"id\":\"a\",\"method\":\"initialize\"}\n")
            .await;

    assert_eq!(responses[0]["id"], "a");
    assert_eq!(responses[0]["result"]["protocolVersion"], "2024-11-05");
}

#[tokio::test]
async fn test_tools_list_order_and_schema() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses =
        run_session(&dispatcher, "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n")
            .await;

    let tools = responses[0]["result"]["tools"].as_array().unwrap();
    let names: Vec<&str> = tools.iter().map(|t| t["name"].as_str().unwrap()).collect();
    assert_eq!(
        names,
        vec![
            "search_articles",
            "search_author",
            "get_citations",
            "get_article_versions",
            "get_fulltext",
            "search_open_access",
        ]
    );
    for tool in tools {
        assert_eq!(tool["inputSchema"]["type"], "object");
        assert!(tool["description"].as_str().is_some_and(|d| !d.is_empty()));
    }
}

#[tokio::test]
async fn test_tools_list_honors_allow_list() {
    let config = Config::default()
        .with_enabled_tools(Some(vec!["get_fulltext".to_string(), "search_open_access".to_string()]));
    let dispatcher = dispatcher_for(&config);
    let responses =
        run_session(&dispatcher, "{\"jsonrpc\":\"2.0\",\"id\":2,\"method\":\"tools/list\"}\n")
            .await;

    let tools = responses[0]["result"]["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 2);
    assert_eq!(tools[0]["name"], "get_fulltext");
}

#[tokio::test]
async fn test_notifications_get_no_response() {
    let dispatcher = dispatcher_for(&Config::default());
    let input = concat!(
        "{\"jsonrpc\":\"2.0\",\"method\":\"notifications/initialized\"}\n",
        "\n",
        "{\"jsonrpc\":\"2.0\",\"id\":3,\"method\":\"ping\"}\n",
    );
    let responses = run_session(&dispatcher, input).await;

    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["id"], 3);
    assert_eq!(responses[0]["result"], json!({}));
}

#[tokio::test]
async fn test_parse_error_keeps_session_alive() {
    let dispatcher = dispatcher_for(&Config::default());
    let input = "not json\n{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"ping\"}\n";
    let responses = run_session(&dispatcher, input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[1]["id"], 4);
}

#[tokio::test]
async fn test_invalid_utf8_line_keeps_session_alive() {
    let dispatcher = dispatcher_for(&Config::default());
    let input = b"\xff\xfe bad\n{\"jsonrpc\":\"2.0\",\"id\":4,\"method\":\"ping\"}\n";
    let responses = run_session_bytes(&dispatcher, input).await;

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 4);
    assert_eq!(responses[1]["result"], json!({}));
}

#[tokio::test]
async fn test_null_id_gets_a_response() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses =
        run_session(&dispatcher, "{\"jsonrpc\":\"2.0\",\"id\":null,\"method\":\"ping\"}\n").await;

    assert_eq!(responses.len(), 1);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[0]["result"], json!({}));
}

#[tokio::test]
async fn test_well_formed_json_with_wrong_shape_is_invalid_request() {
    let dispatcher = dispatcher_for(&Config::default());
    let input = concat!(
        "{\"jsonrpc\":\"2.0\",\"id\":9}\n",
        "[1,2,3]\n",
        "{\"jsonrpc\":\"2.0\",\"id\":10,\"method\":\"ping\"}\n",
    );
    let responses = run_session(&dispatcher, input).await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["error"]["code"], -32600);
    assert_eq!(responses[0]["id"], 9);
    assert_eq!(responses[1]["error"]["code"], -32600);
    assert!(responses[1]["id"].is_null());
    assert_eq!(responses[2]["id"], 10);
}

#[tokio::test]
async fn test_unknown_method() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses = run_session(
        &dispatcher,
        "{\"jsonrpc\":\"2.0\",\"id\":5,\"method\":\"resources/list\"}\n",
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], -32601);
    assert!(responses[0].get("result").is_none());
}

#[tokio::test]
async fn test_wrong_jsonrpc_version() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses =
        run_session(&dispatcher, "{\"jsonrpc\":\"1.0\",\"id\":6,\"method\":\"ping\"}\n").await;

    assert_eq!(responses[0]["error"]["code"], -32600);
}

#[tokio::test]
async fn test_tools_call_without_name() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses = run_session(
        &dispatcher,
        "{\"jsonrpc\":\"2.0\",\"id\":7,\"method\":\"tools/call\",\"params\":{}}\n",
    )
    .await;

    assert_eq!(responses[0]["error"]["code"], -32602);
}

#[tokio::test]
async fn test_tools_call_failure_is_a_result_not_an_error() {
    let dispatcher = dispatcher_for(&Config::default());
    let responses = run_session(
        &dispatcher,
        "{\"jsonrpc\":\"2.0\",\"id\":8,\"method\":\"tools/call\",\"params\":{\"name\":\"unknown_tool\"}}\n",
    )
    .await;

    assert!(responses[0].get("error").is_none());
    let result = &responses[0]["result"];
    assert_eq!(result["isError"], true);
    assert_eq!(result["content"][0]["type"], "text");
    assert_eq!(result["content"][0]["text"], "Error: Unknown tool: unknown_tool");
}

// =============================================================================
// Dispatcher
// =============================================================================

#[tokio::test]
async fn test_unknown_tool_is_checked_before_api_key() {
    let dispatcher = dispatcher_for(&Config::default());
    let result = dispatcher.call_tool("unknown_tool", json!({})).await;

    assert!(result.is_error);
    assert_eq!(result.text(), "Error: Unknown tool: unknown_tool");
}

#[tokio::test]
async fn test_missing_required_parameter() {
    let mock_server = MockServer::start().await;
    let dispatcher = dispatcher_for(&Config::for_testing(&mock_server.uri()));

    let result = dispatcher.call_tool("search_author", json!({})).await;

    assert!(result.is_error);
    assert_eq!(result.text(), "Error: Missing required parameter: author_name");
    assert!(mock_server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_every_tool_fails_without_serpapi_key() {
    let mock_server = MockServer::start().await;

    let mut config = Config::for_testing(&mock_server.uri());
    config.serpapi_api_key = None;
    let dispatcher = dispatcher_for(&config);

    let calls = [
        ("search_articles", json!({"query": "x"})),
        ("search_author", json!({"author_name": "x"})),
        ("get_citations", json!({"citation_id": "x"})),
        ("get_article_versions", json!({"cluster_id": "x"})),
        ("get_fulltext", json!({"doi": "10.1/x"})),
        ("search_open_access", json!({"query": "x"})),
    ];

    for (name, args) in calls {
        let result = dispatcher.call_tool(name, args).await;
        assert!(result.is_error, "{name}");
        assert!(result.text().starts_with("Error: "), "{name}");
        assert!(result.text().contains("SERPAPI_API_KEY"), "{name}: {}", result.text());
    }

    assert!(mock_server.received_requests().await.unwrap_or_default().is_empty());
}

#[tokio::test]
async fn test_invalid_argument_types() {
    let mock_server = MockServer::start().await;
    let dispatcher = dispatcher_for(&Config::for_testing(&mock_server.uri()));

    let result = dispatcher
        .call_tool("search_articles", json!({"query": "x", "num_results": "many"}))
        .await;

    assert!(result.is_error);
    assert!(result.text().starts_with("Error: Invalid arguments for search_articles"));
}
