use super::*;
use axum::{
    body::{self, Body},
    http::{header, Request, Response},
};
use tower::ServiceExt;

const BODY_LIMIT: usize = 16 * 1024;

fn test_app() -> (Router, ApiContext) {
    let api = ApiContext::new(DeckStore::new());
    let app = build_router(Arc::new(AppState { api: api.clone() }), BODY_LIMIT);
    (app, api)
}

fn post_json(uri: &str, value: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(value.to_string()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request")
}

async fn text(response: Response<Body>) -> String {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    String::from_utf8(bytes.to_vec()).expect("utf8")
}

async fn json(response: Response<Body>) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn healthz_reports_ok() {
    let (app, _api) = test_app();
    let response = app.oneshot(get("/healthz")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "ok");
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    let (app, _api) = test_app();

    let response = app
        .clone()
        .oneshot(get("/api/listFlashcards"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await, serde_json::json!({ "flashcards": [] }));

    let response = app.oneshot(get("/api/listScores")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await, serde_json::json!({ "scores": [] }));
}

#[tokio::test]
async fn save_then_load_round_trips_deck() {
    let (app, _api) = test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/saveFlashcards",
            serde_json::json!({ "name": "test1", "value": [["7*7", "49"]] }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text(response).await, "test1 was saved");

    let response = app
        .clone()
        .oneshot(get("/api/loadFlashcards?name=test1"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json(response).await,
        serde_json::json!({ "name": "test1", "value": [["7*7", "49"]] })
    );

    let response = app
        .oneshot(get("/api/listFlashcards"))
        .await
        .expect("response");
    assert_eq!(
        json(response).await,
        serde_json::json!({ "flashcards": ["test1"] })
    );
}

#[tokio::test]
async fn save_flashcards_failures_carry_fixed_messages() {
    let (app, api) = test_app();
    api.store
        .create_deck("test1", vec![shared::domain::Card::new("7*7", "49")])
        .expect("seed");

    let cases = [
        (
            serde_json::json!({ "value": [["3+3", "6"]] }),
            "Faulty request: argument \"name\" was missing or incorrectly formatted",
        ),
        (
            serde_json::json!({ "name": "something" }),
            "Faulty Request: request body is missing argument \"value\"",
        ),
        (
            serde_json::json!({ "name": "something", "value": 42 }),
            "Oops, something went wrong...",
        ),
        (
            serde_json::json!({ "name": "test1", "value": [["7*7", "49"]] }),
            "Quiz already exists",
        ),
    ];
    for (body, message) in cases {
        let response = app
            .clone()
            .oneshot(post_json("/api/saveFlashcards", body))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, message);
    }
}

#[tokio::test]
async fn non_json_body_fails_on_first_field() {
    let (app, _api) = test_app();
    let request = Request::post("/api/saveScores")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from("not json"))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        text(response).await,
        "Faulty request: argument \"testTaker\" was missing or incorrectly formatted"
    );
}

#[tokio::test]
async fn scores_are_listed_in_submission_order() {
    let (app, _api) = test_app();

    for (taker, quiz, score) in [("Jaser", "Math", "66"), ("Niko", "Spanish", "100")] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/saveScores",
                serde_json::json!({ "testTaker": taker, "quizName": quiz, "score": score }),
            ))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, format!("{taker}'s score was saved"));
    }

    let response = app.oneshot(get("/api/listScores")).await.expect("response");
    assert_eq!(
        json(response).await,
        serde_json::json!({ "scores": ["Jaser, Math: 66", "Niko, Spanish: 100"] })
    );
}

#[tokio::test]
async fn save_scores_reports_score_field() {
    let (app, _api) = test_app();
    let response = app
        .oneshot(post_json(
            "/api/saveScores",
            serde_json::json!({ "testTaker": "Jaser", "quizName": "Math", "score": 66 }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        text(response).await,
        "Faulty request: argument \"score\" was missing or incorrectly formatted"
    );
}

#[tokio::test]
async fn load_requires_name_and_known_deck() {
    let (app, _api) = test_app();

    for uri in ["/api/loadFlashcards", "/api/loadFlashcards?randoParam=Random"] {
        let response = app.clone().oneshot(get(uri)).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(text(response).await, "required argument \"name\" was missing");
    }

    let response = app
        .oneshot(get("/api/loadFlashcards?name=nope"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(text(response).await, "no flashcard found with that name");
}

#[tokio::test]
async fn repeated_name_parameter_uses_first_value() {
    let (app, api) = test_app();
    api.store
        .create_deck("first", vec![shared::domain::Card::new("q", "a")])
        .expect("seed");

    let response = app
        .oneshot(get("/api/loadFlashcards?name=first&name=second"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json(response).await["name"], "first");
}

#[tokio::test]
async fn encoded_deck_names_are_decoded() {
    let (app, api) = test_app();
    api.store
        .create_deck("Spanish verbs", vec![shared::domain::Card::new("ser", "to be")])
        .expect("seed");

    let response = app
        .oneshot(get("/api/loadFlashcards?name=Spanish%20verbs"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json(response).await,
        serde_json::json!({ "name": "Spanish verbs", "value": [["ser", "to be"]] })
    );
}

#[tokio::test]
async fn oversized_body_is_refused() {
    let (app, api) = test_app();
    let front = "x".repeat(BODY_LIMIT);
    let response = app
        .oneshot(post_json(
            "/api/saveFlashcards",
            serde_json::json!({ "name": "huge", "value": [[front, "a"]] }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert!(api.store.list_deck_names().is_empty());
}

#[tokio::test]
async fn configured_limit_above_two_mib_is_honoured() {
    let api = ApiContext::new(DeckStore::new());
    let app = build_router(Arc::new(AppState { api: api.clone() }), 8 * 1024 * 1024);
    let front = "x".repeat(3 * 1024 * 1024);
    let response = app
        .oneshot(post_json(
            "/api/saveFlashcards",
            serde_json::json!({ "name": "large", "value": [[front, "a"]] }),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(api.store.list_deck_names(), vec!["large".to_string()]);
}
