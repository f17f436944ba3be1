use perplexity_async::test_support::{
    EnvGuard, client_for, completion_body, unconfigured_client_for,
};
use perplexity_async::types::chat::SEARCH_SYSTEM_PROMPT;
use perplexity_async::{Client, PerplexityConfig, PerplexityError};
use serial_test::serial;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn search_maps_answer_and_citations() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(
            "Paris is the capital of France.",
            &["https://a.example", "https://b.example"],
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    let result = client
        .search("What is the capital of France?", None)
        .await
        .unwrap();

    assert_eq!(result.result, "Paris is the capital of France.");
    assert_eq!(result.links.len(), 2);
    for (link, url) in result.links.iter().zip(["https://a.example", "https://b.example"]) {
        assert_eq!(link.url, url);
        assert_eq!(link.title, url);
        assert_eq!(link.snippet, "");
    }
}

#[tokio::test]
async fn search_link_count_tracks_citation_count() {
    for n in [0_usize, 1, 7] {
        let server = MockServer::start().await;
        let urls: Vec<String> = (0..n).map(|i| format!("https://src{i}.example/")).collect();
        let refs: Vec<&str> = urls.iter().map(String::as_str).collect();

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("a", &refs)))
            .expect(1)
            .mount(&server)
            .await;

        let result = client_for(&server.uri())
            .search("q", None)
            .await
            .unwrap();

        assert_eq!(result.links.len(), n);
        for (i, link) in result.links.iter().enumerate() {
            assert_eq!(link.url, urls[i]);
        }
    }
}

#[tokio::test]
async fn search_ignores_extra_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "canonical"}},
                {"index": 1, "message": {"role": "assistant", "content": "alternate"}}
            ],
            "citations": []
        })))
        .mount(&server)
        .await;

    let result = client_for(&server.uri()).search("q", None).await.unwrap();
    assert_eq!(result.result, "canonical");
    assert!(result.links.is_empty());
}

#[tokio::test]
async fn search_sends_fixed_payload_with_default_model() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-api-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "sonar",
            "messages": [
                {"role": "system", "content": SEARCH_SYSTEM_PROMPT},
                {"role": "user", "content": "Who wrote Dune?"}
            ],
            "return_related_questions": false,
            "stream": false
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("Frank Herbert", &[])))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server.uri())
        .search("Who wrote Dune?", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!((body["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    assert!((body["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
}

#[tokio::test]
async fn search_honors_explicit_model_and_defaults_blank() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({"model": "sonar-pro"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("pro", &[])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({"model": "sonar"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("default", &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());
    assert_eq!(
        client.search("q", Some("sonar-pro")).await.unwrap().result,
        "pro"
    );
    assert_eq!(client.search("q", Some("  ")).await.unwrap().result, "default");
}

#[tokio::test]
async fn missing_api_key_is_config_error_without_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("x", &[])))
        .expect(0)
        .mount(&server)
        .await;

    let err = unconfigured_client_for(&server.uri())
        .search("q", None)
        .await
        .unwrap_err();

    match err {
        PerplexityError::Config(msg) => assert!(msg.contains("PERPLEXITY_API_KEY")),
        other => panic!("Expected Config error, got {other:?}"),
    }
}

#[tokio::test]
#[serial(env)]
async fn env_key_is_picked_up() {
    let server = MockServer::start().await;
    let _key = EnvGuard::set("PERPLEXITY_API_KEY", "  env-key  ");
    let _base = EnvGuard::set("PERPLEXITY_BASE_URL", &server.uri());

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer env-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("env", &[])))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::new();
    assert_eq!(client.search("q", None).await.unwrap().result, "env");
}

#[tokio::test]
async fn non_success_status_is_api_error_single_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .search("q", None)
        .await
        .unwrap_err();

    match err {
        PerplexityError::Api(obj) => {
            assert_eq!(obj.status_code, Some(503));
            assert_eq!(obj.message, "Service Unavailable");
        }
        other => panic!("Expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_envelope_is_parsed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"message": "Invalid API key", "type": "invalid_api_key", "code": 401}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .search("q", None)
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(!err.is_configuration());
}

#[tokio::test]
async fn empty_choices_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [],
            "citations": ["https://a.example"]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .search("q", None)
        .await
        .unwrap_err();
    assert!(matches!(err, PerplexityError::MalformedResponse(_)));
}

#[tokio::test]
async fn missing_citations_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "answer"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .search("q", None)
        .await
        .unwrap_err();
    assert!(matches!(err, PerplexityError::MalformedResponse(_)));
}

#[tokio::test]
async fn undecodable_body_is_serde_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server.uri())
        .search("q", None)
        .await
        .unwrap_err();

    match err {
        PerplexityError::Serde(msg) => assert!(msg.contains("<html>")),
        other => panic!("Expected Serde error, got {other:?}"),
    }
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Bind then drop a listener so the port is closed
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let client = Client::with_config(
        PerplexityConfig::new()
            .with_api_base(uri)
            .with_api_key("test-api-key"),
    );
    let err = client.search("q", None).await.unwrap_err();
    assert!(matches!(err, PerplexityError::Reqwest(_)));
}
