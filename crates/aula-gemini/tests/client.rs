use aula_core::models::catalog::Modality;
use aula_core::models::request::LessonPlanRequest;
use aula_gemini::classify::RemoteFailure;
use aula_gemini::client::{GeminiClient, GeminiSettings};
use aula_gemini::error::GeminiError;
use aula_gemini::reference::ReferenceLoader;
use aula_gemini::transaction::{collect_fragments, generate_lesson_plan};
use futures::stream;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const FIXTURE: &str = include_str!("../../aula-core/tests/fixtures/plan.json");
const STREAM_PATH: &str = "/v1beta/models/gemini-2.5-flash:streamGenerateContent";

fn request() -> LessonPlanRequest {
    LessonPlanRequest {
        topic: "Sistema Nervoso Central".to_string(),
        ..Modality::HighSchool.default_request()
    }
}

fn client(server: &MockServer, api_key: Option<&str>) -> GeminiClient {
    GeminiClient::new(GeminiSettings {
        api_key: api_key.map(str::to_string),
        base_url: server.uri(),
        ..GeminiSettings::default()
    })
}

/// Split `text` into `n` roughly equal pieces on char boundaries.
fn split_into(text: &str, n: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(chars.len().div_ceil(n))
        .map(|c| c.iter().collect())
        .collect()
}

fn sse_body(pieces: &[String], finish_reason: &str) -> String {
    let mut body = String::new();
    for (i, piece) in pieces.iter().enumerate() {
        let mut candidate = json!({
            "content": { "role": "model", "parts": [{ "text": piece }] }
        });
        if i + 1 == pieces.len() {
            candidate["finishReason"] = json!(finish_reason);
        }
        body.push_str(&format!("data: {}\r\n\r\n", json!({ "candidates": [candidate] })));
    }
    body
}

async fn mount_stream(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .and(query_param("alt", "sse"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn missing_credential_fails_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    for key in [None, Some(""), Some("   ")] {
        let client = client(&server, key);
        let loader = ReferenceLoader::new(client.http().clone(), server.uri());

        let err = generate_lesson_plan(&client, Some(&loader), &request(), |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, GeminiError::Config(_)), "got {err:?}");
        assert!(err.user_message().starts_with("Erro de configuração"));
    }

    let received = server.received_requests().await.unwrap();
    assert!(received.is_empty(), "expected no outbound requests");
}

#[tokio::test]
async fn incomplete_request_fails_before_any_request() {
    let server = MockServer::start().await;
    let client = client(&server, Some("test-key"));

    let mut req = request();
    req.topic.clear();

    let err = client
        .generate_stream(&req, &Default::default())
        .await
        .err()
        .unwrap();
    assert!(matches!(err, GeminiError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn incomplete_request_skips_reference_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = client(&server, Some("test-key"));
    let loader = ReferenceLoader::new(client.http().clone(), server.uri());
    let mut req = request();
    req.grade = "  ".to_string();

    let err = generate_lesson_plan(&client, Some(&loader), &req, |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::InvalidRequest(_)), "got {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn streamed_fragments_reconstruct_the_plan() {
    let server = MockServer::start().await;
    let pieces = split_into(FIXTURE, 7);
    mount_stream(&server, sse_body(&pieces, "STOP")).await;

    let client = client(&server, Some("test-key"));
    let mut seen = Vec::new();
    let result = generate_lesson_plan(&client, None, &request(), |f| seen.push(f.to_string()))
        .await
        .unwrap();

    assert_eq!(seen, pieces);
    assert_eq!(result.fragment_count, pieces.len());
    assert_eq!(result.model_id, "gemini-2.5-flash");
    assert_eq!(result.raw_text, FIXTURE);

    let plan = result.plan;
    assert_eq!(plan.title, "Sistema Nervoso Central: estrutura e funções");
    assert_eq!(plan.skills[0].code, "EM13CNT202");
    assert_eq!(plan.skills[1].code, "EM13CNT207");
    assert_eq!(
        plan.methodology.iter().map(|s| s.duration_min).collect::<Vec<_>>(),
        [10, 30, 10]
    );
}

#[tokio::test]
async fn request_carries_schema_prompt_and_limits() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&[FIXTURE.to_string()], "STOP")).await;

    let client = client(&server, Some("test-key"));
    generate_lesson_plan(&client, None, &request(), |_| {})
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let body: Value = serde_json::from_slice(&received[0].body).unwrap();

    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["maxOutputTokens"], 8192);
    assert_eq!(config["responseSchema"]["required"], json!(["lesson_plan"]));
    assert!((config["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);

    let prompt = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("Sistema Nervoso Central"));
    let instruction = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    assert!(instruction.contains("BNCC"));
}

#[tokio::test]
async fn reference_data_is_fetched_and_embedded() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&[FIXTURE.to_string()], "STOP")).await;
    Mock::given(method("GET"))
        .and(path("/data/bncc.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "codigo": "EM13CNT202" }])))
        .mount(&server)
        .await;

    let client = client(&server, Some("test-key"));
    let loader = ReferenceLoader::new(client.http().clone(), server.uri());
    generate_lesson_plan(&client, Some(&loader), &request(), |_| {})
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let post = received
        .iter()
        .find(|r| r.method.as_str() == "POST")
        .unwrap();
    let body: Value = serde_json::from_slice(&post.body).unwrap();
    let instruction = body["systemInstruction"]["parts"][0]["text"].as_str().unwrap();
    assert!(instruction.contains("EM13CNT202"));
    // saeb.json was not mounted: the empty object stands in.
    assert!(instruction.contains("--- DADOS SAEB ---\n{}\n"));
}

#[tokio::test]
async fn rate_limit_response_is_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(STREAM_PATH))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "code": 429,
                "message": "Resource has been exhausted (e.g. check quota).",
                "status": "RESOURCE_EXHAUSTED"
            }
        })))
        .mount(&server)
        .await;

    let client = client(&server, Some("test-key"));
    let err = generate_lesson_plan(&client, None, &request(), |_| {})
        .await
        .unwrap_err();

    match err {
        GeminiError::Remote { failure, detail } => {
            assert_eq!(failure, RemoteFailure::RateLimited);
            assert!(detail.contains("exhausted"));
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn safety_stop_is_content_rejected() {
    let server = MockServer::start().await;
    let pieces = split_into(FIXTURE, 3);
    mount_stream(&server, sse_body(&pieces[..2], "SAFETY")).await;

    let client = client(&server, Some("test-key"));
    let err = generate_lesson_plan(&client, None, &request(), |_| {})
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GeminiError::Remote {
            failure: RemoteFailure::ContentRejected,
            ..
        }
    ));
}

#[tokio::test]
async fn blocked_prompt_is_content_rejected() {
    let server = MockServer::start().await;
    let body = format!(
        "data: {}\n\n",
        json!({ "promptFeedback": { "blockReason": "SAFETY" } })
    );
    mount_stream(&server, body).await;

    let client = client(&server, Some("test-key"));
    let err = generate_lesson_plan(&client, None, &request(), |_| {})
        .await
        .unwrap_err();
    assert_eq!(
        err.user_message(),
        RemoteFailure::ContentRejected.user_message()
    );
}

#[tokio::test]
async fn truncated_output_is_a_malformed_result() {
    let server = MockServer::start().await;
    let pieces = split_into(FIXTURE, 4);
    mount_stream(&server, sse_body(&pieces[..3], "MAX_TOKENS")).await;

    let client = client(&server, Some("test-key"));
    let err = generate_lesson_plan(&client, None, &request(), |_| {})
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::MalformedPlan(_)), "got {err:?}");
}

#[tokio::test]
async fn collect_fragments_preserves_arrival_order() {
    let fragments = vec![
        Ok("{\"a\":".to_string()),
        Ok("[1,".to_string()),
        Ok("2]}".to_string()),
    ];
    let text = collect_fragments(stream::iter(fragments)).await.unwrap();
    assert_eq!(text, "{\"a\":[1,2]}");
}

#[tokio::test]
async fn collect_fragments_stops_at_first_error() {
    let fragments = vec![
        Ok("{".to_string()),
        Err(GeminiError::ResponseParse("boom".to_string())),
        Ok("}".to_string()),
    ];
    let err = collect_fragments(stream::iter(fragments)).await.unwrap_err();
    assert!(matches!(err, GeminiError::ResponseParse(_)));
}
