//! Integration test: dispatching raw option records through the method table.

mod common;

use std::sync::Arc;

use serde_json::{json, Value};
use structor_sandbox::{Method, SandboxError};

use common::{facade_over, ScriptedBackend};

async fn dispatch(
    method: &str,
    options: Value,
) -> (Arc<ScriptedBackend>, Result<Value, SandboxError>) {
    let backend = Arc::new(ScriptedBackend::default());
    let facade = facade_over(&backend);
    let method: Method = method.parse().expect("known method");
    let result = facade.dispatch(method, options).await;
    (backend, result)
}

#[tokio::test]
async fn loopback_and_error_answer_with_prefix() {
    let (_, ok) = dispatch("loopback", json!({"message": "hi"})).await;
    assert_eq!(ok.expect("loopback resolves"), json!("Response: hi"));

    let (_, err) = dispatch("error", json!({"message": "hi"})).await;
    assert_eq!(err.expect_err("error rejects").to_string(), "Response: hi");
}

#[tokio::test]
async fn make_working_directory_forwards_both_ids() {
    let (backend, result) =
        dispatch("makeWorkingDirectory", json!({"generatorId": 17, "userId": "ann"})).await;
    assert_eq!(
        result.expect("working copy created"),
        json!({"generatorId": "17", "userId": "ann"})
    );
    assert_eq!(backend.calls(), vec!["makeWorkingCopy(17, ann)".to_owned()]);
}

#[tokio::test]
async fn option_free_methods_accept_null_options() {
    for (method, call) in [
        ("removeWorkingDirectory", "deleteWorkingCopy"),
        ("compileWorkingDesk", "compileWorkingCopy"),
        ("getGeneratorSamples", "getGeneratorSamples"),
    ] {
        let (backend, result) = dispatch(method, Value::Null).await;
        assert!(result.is_ok(), "{method} failed: {result:?}");
        assert_eq!(backend.calls(), vec![call.to_owned()]);
    }
}

#[tokio::test]
async fn sandbox_client_methods_forward_their_fields() {
    let (backend, _) =
        dispatch("sandboxPrepare", json!({"generatorId": "g1", "version": "2.0.0"})).await;
    assert_eq!(backend.calls(), vec![r#"sandboxPrepare(g1, Some("2.0.0"))"#.to_owned()]);

    let (backend, _) = dispatch("sandboxReadFiles", json!({"sampleId": "button"})).await;
    assert_eq!(backend.calls(), vec!["sandboxReadFiles(button)".to_owned()]);

    let (backend, _) = dispatch(
        "sandboxWriteFiles",
        json!({"sampleId": "button", "filesObject": {"a.js": "1"}}),
    )
    .await;
    assert_eq!(
        backend.calls(),
        vec![r#"sandboxWriteFiles(button, {"a.js":"1"})"#.to_owned()]
    );

    let (backend, result) = dispatch(
        "sandboxPublish",
        json!({"sampleId": "button", "generatorKey": "acme/button"}),
    )
    .await;
    assert_eq!(result.expect("publish succeeds"), json!({"published": "acme/button"}));
    assert_eq!(
        backend.calls(),
        vec!["sandboxPublish(button, acme/button, false)".to_owned()]
    );
}

#[tokio::test]
async fn sandbox_generate_result_carries_default_model() {
    let (_, result) = dispatch("sandboxGenerate", json!({"sampleId": "button"})).await;
    let value = result.expect("generation succeeds");
    assert_eq!(value["defaultModel"], json!([{"type": "TestComponent"}]));
    assert_eq!(value["files"], json!([]));
}

#[tokio::test]
async fn missing_required_field_is_invalid_options() {
    let (backend, result) = dispatch("sandboxReadFiles", json!({})).await;
    match result {
        Err(SandboxError::InvalidOptions { method, .. }) => assert_eq!(method, "sandboxReadFiles"),
        other => panic!("expected InvalidOptions, got {other:?}"),
    }
    assert!(backend.calls().is_empty(), "collaborators must not be called");
}
