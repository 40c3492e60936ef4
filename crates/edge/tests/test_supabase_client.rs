use edge::{FunctionInvoker, InvokeError, SupabaseFunctionsClient};
use mockito::{Matcher, Server};
use serde_json::json;

fn client_for(server: &Server) -> SupabaseFunctionsClient {
    SupabaseFunctionsClient::new(server.url(), "test-anon-key").unwrap()
}

#[tokio::test]
async fn test_invoke_sends_auth_headers_and_body() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/functions/v1/policy-impact-simulation")
        .match_header("authorization", "Bearer test-anon-key")
        .match_header("apikey", "test-anon-key")
        .match_header("content-type", "application/json")
        .match_header("x-client-info", Matcher::Any)
        .match_body(Matcher::Json(json!({"policy": {"name": "X"}})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"impactScore": 72, "economicImpact": "Positive"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let result = client
        .invoke("policy-impact-simulation", json!({"policy": {"name": "X"}}))
        .await
        .unwrap();

    assert_eq!(result["impactScore"], json!(72));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_2xx_uses_body_message() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/functions/v1/knowledge-search")
        .with_status(500)
        .with_body(r#"{"error":"OpenAI API key not configured"}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .invoke("knowledge-search", json!({"query": "triage"}))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        InvokeError::Http {
            status: 500,
            message: "OpenAI API key not configured".to_string(),
        }
    );
}

#[tokio::test]
async fn test_non_2xx_without_body_uses_status_text() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/functions/v1/admin-insights")
        .with_status(503)
        .create_async()
        .await;

    let err = client_for(&server)
        .invoke("admin-insights", json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(503));
    assert_eq!(err.message(), "Service Unavailable");
}

#[tokio::test]
async fn test_envelope_error_becomes_function_error() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/functions/v1/support-chat")
        .with_status(200)
        .with_body(r#"{"data": null, "error": {"message": "rate limited"}}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .invoke("support-chat", json!({"question": "hi"}))
        .await
        .unwrap_err();

    assert_eq!(err, InvokeError::Function("rate limited".to_string()));
}

#[tokio::test]
async fn test_plain_text_body_is_returned_as_string() {
    let mut server = Server::new_async().await;

    let _mock = server
        .mock("POST", "/functions/v1/policy-brief")
        .with_status(200)
        .with_body("Here you go: {\"title\": \"Brief\"}")
        .create_async()
        .await;

    let value = client_for(&server)
        .invoke("policy-brief", json!({}))
        .await
        .unwrap();

    assert_eq!(value, json!("Here you go: {\"title\": \"Brief\"}"));
    assert_eq!(edge::coerce_payload(value, &[]), Ok(json!({"title": "Brief"})));
}

#[tokio::test]
async fn test_connection_failure_is_transport_error() {
    let client = SupabaseFunctionsClient::new("http://127.0.0.1:9", "key").unwrap();
    let err = client.invoke("anything", json!({})).await.unwrap_err();
    assert!(matches!(err, InvokeError::Transport(_)));
}
