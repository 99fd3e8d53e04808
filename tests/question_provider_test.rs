//! Tests for question generation against a mock transport.

mod common;

use common::{MockTransport, configured_provider, paris_json, question_json, unconfigured_provider};
use millionaire::{OptionLabel, ProviderError};

#[tokio::test]
async fn test_missing_credential_never_calls_transport() {
    let transport = MockTransport::new();
    transport.push_ok(paris_json());
    let provider = unconfigured_provider(transport.clone());

    let err = provider.fetch_question(1).await.expect_err("not configured");
    assert_eq!(
        err,
        ProviderError::NotConfigured {
            variable: "GROQ_API_KEY".to_string()
        }
    );
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_valid_response_becomes_question() {
    let transport = MockTransport::new();
    transport.push_ok(paris_json());
    let provider = configured_provider(transport.clone());

    let question = provider.fetch_question(1).await.expect("question");
    assert_eq!(*question.level(), 1);
    assert_eq!(question.prompt(), "Thủ đô của Pháp là gì?");
    assert_eq!(question.options()[0], "Paris");
    assert_eq!(question.correct_label(), OptionLabel::A);
    assert_eq!(transport.calls(), 1);
}

#[tokio::test]
async fn test_prompt_carries_level() {
    let transport = MockTransport::new();
    transport.push_ok(paris_json());
    let provider = configured_provider(transport.clone());

    provider.fetch_question(12).await.expect("question");
    let prompts = transport.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("12/15"));
}

#[tokio::test]
async fn test_transport_failure_is_request_failed() {
    let transport = MockTransport::new();
    transport.push_err("API error 503 Service Unavailable: overloaded");
    let provider = configured_provider(transport.clone());

    let err = provider.fetch_question(1).await.expect_err("failed");
    match err {
        ProviderError::RequestFailed(detail) => assert!(detail.contains("503")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_schema_mismatches_are_rejected() {
    let cases = [
        "not json at all".to_string(),
        r#"{"question":"q","options":["a","b","c"],"answer_idx":0}"#.to_string(),
        question_json("q", ["a", "b", "c", "d"], 4),
        question_json("q", ["a", "b", "c", "d"], -1),
        question_json("", ["a", "b", "c", "d"], 0),
        r#"{"question":"q","options":["a","b","c","d"],"answer_idx":"0"}"#.to_string(),
    ];

    for content in cases {
        let transport = MockTransport::new();
        transport.push_ok(content.clone());
        let provider = configured_provider(transport);
        let err = provider.fetch_question(1).await.expect_err(&content);
        assert!(
            matches!(err, ProviderError::RequestFailed(_)),
            "{content} gave {err:?}"
        );
    }
}

#[tokio::test]
async fn test_no_retry_after_failure() {
    let transport = MockTransport::new();
    transport.push_err("timeout");
    transport.push_ok(paris_json());
    let provider = configured_provider(transport.clone());

    assert!(provider.fetch_question(1).await.is_err());
    assert_eq!(transport.calls(), 1);

    // The caller retries by asking again.
    assert!(provider.fetch_question(1).await.is_ok());
    assert_eq!(transport.calls(), 2);
}
