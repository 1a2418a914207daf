mod common;

use pretty_assertions::assert_eq;
use smartreader::api::{ApiError, SummaryApi};
use smartreader::summary::{AnswerRequest, SubmissionRequest};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn status_reports_initializing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "initializing",
            "message": "Models are still loading"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = common::http_api(&server).status().await.unwrap();
    assert!(status.is_initializing());
    assert_eq!(status.message.as_deref(), Some("Models are still loading"));
}

#[tokio::test]
async fn status_without_a_server_is_a_network_error() {
    // Nothing listens on the discard port
    let base = url::Url::parse("http://127.0.0.1:9/api").unwrap();
    let api = smartreader::HttpApi::new(base, std::time::Duration::from_secs(2)).unwrap();

    let err = api.status().await.unwrap_err();
    assert!(err.is_connectivity(), "{:?}", err);
}

#[tokio::test]
async fn summarize_posts_the_url_body() {
    common::init_logging();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .and(body_json(serde_json::json!({"url": "https://example.com/a"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "42",
            "title": "Example",
            "summary": "Short.",
            "created_at": "2024-05-01T10:30:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = common::http_api(&server)
        .summarize(&SubmissionRequest::Url {
            url: "https://example.com/a".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.id, "42");
    assert_eq!(response.title.as_deref(), Some("Example"));
}

#[tokio::test]
async fn summarize_surfaces_the_server_error_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/summarize"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "error": "Server is still initializing, please try again in a minute"
        })))
        .mount(&server)
        .await;

    let err = common::http_api(&server)
        .summarize(&SubmissionRequest::Text {
            text: "t".repeat(60),
            title: "Untitled".to_string(),
        })
        .await
        .unwrap_err();
    match err {
        ApiError::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(
                message.as_deref(),
                Some("Server is still initializing, please try again in a minute")
            );
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn non_json_error_bodies_have_no_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = common::http_api(&server).summaries().await.unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 500, message: None }));
}

#[tokio::test]
async fn summaries_unwraps_the_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "summaries": [
                common::summary_json("1", "Alpha", "first"),
                common::summary_json("2", "Beta", "second"),
            ]
        })))
        .mount(&server)
        .await;

    let summaries = common::http_api(&server).summaries().await.unwrap();
    let titles: Vec<_> = summaries.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Beta"]);
}

#[tokio::test]
async fn summary_by_id_interpolates_the_id() {
    let server = MockServer::start().await;
    let mut body = common::summary_json("42", "Answer", "Everything.");
    body["questions"] = serde_json::json!([
        {"id": "q0", "question": "Why?", "answer": "Because.", "created_at": "2024-05-01T10:31:00"}
    ]);
    Mock::given(method("GET"))
        .and(path("/api/summaries/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let summary = common::http_api(&server).summary("42").await.unwrap();
    assert_eq!(summary.id, "42");
    assert_eq!(summary.questions.len(), 1);
    assert_eq!(summary.questions[0].answer, "Because.");
}

#[tokio::test]
async fn answer_posts_question_and_summary_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/answer"))
        .and(body_json(serde_json::json!({"question": "Q", "summary_id": "42"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "q1",
            "summary_id": "42",
            "question": "Q",
            "answer": "A",
            "created_at": "2024-05-01T10:32:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let qa = common::http_api(&server)
        .answer(&AnswerRequest {
            question: "Q".to_string(),
            summary_id: "42".to_string(),
        })
        .await
        .unwrap();
    assert_eq!((qa.id.as_str(), qa.answer.as_str()), ("q1", "A"));
}

#[tokio::test]
async fn malformed_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/summaries/7"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = common::http_api(&server).summary("7").await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
