//! End-to-end tests for the basic LSP lifecycle using direct JSON-RPC
//! communication with the voyager-ls binary.
//!
//! Run with: `cargo test --test e2e_lsp_protocol --features e2e`

#![cfg(feature = "e2e")]

mod helpers;

use helpers::LspClient;
use serde_json::json;

#[test]
fn test_initialize_advertises_completion_capability() {
    let mut client = LspClient::start();

    let response = client.request(
        "initialize",
        json!({
            "processId": std::process::id(),
            "rootUri": null,
            "capabilities": {}
        }),
    );

    let result = response
        .get("result")
        .expect("initialize should return a result");

    assert_eq!(
        result["serverInfo"]["name"].as_str(),
        Some("Voyager code completion")
    );
    assert!(
        result["capabilities"].get("completionProvider").is_some(),
        "completion capability should be advertised: {:?}",
        result
    );
    assert_eq!(
        result["capabilities"]["completionProvider"]["triggerCharacters"],
        json!(["."])
    );
}

#[test]
fn test_shutdown_and_exit_terminate_cleanly() {
    let mut client = LspClient::start();

    client.request(
        "initialize",
        json!({
            "processId": std::process::id(),
            "rootUri": null,
            "capabilities": {}
        }),
    );
    client.notify("initialized", json!({}));

    let response = client.request("shutdown", serde_json::Value::Null);
    assert!(
        response.get("error").is_none(),
        "shutdown should succeed: {:?}",
        response
    );

    client.notify("exit", serde_json::Value::Null);

    // The server process should terminate after the exit notification
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
    loop {
        match client.server().try_wait() {
            Ok(Some(_)) => break,
            Ok(None) if std::time::Instant::now() < deadline => {
                std::thread::sleep(std::time::Duration::from_millis(50));
            }
            Ok(None) => panic!("server did not exit after exit notification"),
            Err(err) => panic!("failed to poll server process: {}", err),
        }
    }
}
