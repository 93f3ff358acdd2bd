use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use interview_prep_backend::{
    error::{Error, Result},
    models::{
        question::{AnswerOption, QuizQuestion},
        quiz_category::QuizCategory,
    },
    services::{
        ai_service::{GenerationRequest, QuestionGenerator},
        fallback_bank::FallbackBank,
        question_store::QuizRepository,
    },
    AppState,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

const AMAZON_HR: Uuid = Uuid::from_u128(0x0a11);
const STOCKED: Uuid = Uuid::from_u128(0x0b22);

enum Behaviour {
    Fail,
    Return(Vec<JsonValue>),
}

struct StubGenerator(Behaviour);

#[async_trait]
impl QuestionGenerator for StubGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Vec<JsonValue>> {
        match &self.0 {
            Behaviour::Fail => Err(Error::Generation("Gemini API error 503".into())),
            Behaviour::Return(items) => Ok(items.clone()),
        }
    }
}

struct StubRepository {
    categories: Vec<QuizCategory>,
    stocked: Vec<QuizQuestion>,
}

#[async_trait]
impl QuizRepository for StubRepository {
    async fn list_categories(&self, company: Option<String>) -> Result<Vec<QuizCategory>> {
        Ok(self
            .categories
            .iter()
            .filter(|c| match &company {
                Some(company) => c.company.as_deref().unwrap_or("General").eq_ignore_ascii_case(company),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<QuizCategory>> {
        Ok(self.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn load_for_category(&self, category_id: Uuid, _limit: i64) -> Result<Vec<QuizQuestion>> {
        Ok(if category_id == STOCKED {
            self.stocked.clone()
        } else {
            Vec::new()
        })
    }

    async fn save_generated(&self, _category_id: Uuid, questions: &[QuizQuestion]) -> Result<u64> {
        Ok(questions.len() as u64)
    }
}

fn category(id: Uuid, company: Option<&str>, role: Option<&str>, kind: &str) -> QuizCategory {
    QuizCategory {
        id,
        name: format!("{} {}", company.unwrap_or("General"), role.unwrap_or(kind)),
        category_type: kind.to_string(),
        company: company.map(str::to_string),
        role: role.map(str::to_string),
        description: Some("Practice questions".to_string()),
        created_at: Utc::now(),
    }
}

fn stub_repository() -> StubRepository {
    StubRepository {
        categories: vec![
            category(STOCKED, None, None, "technical"),
            category(AMAZON_HR, Some("Amazon"), None, "hr"),
        ],
        stocked: (0..11)
            .map(|i| QuizQuestion {
                id: Uuid::from_u128(0x1000 + i).to_string(),
                question: format!("Saved question {}?", i),
                option_a: "a".into(),
                option_b: "b".into(),
                option_c: "c".into(),
                option_d: "d".into(),
                correct_answer: AnswerOption::D,
                difficulty: "easy".into(),
            })
            .collect(),
    }
}

fn generated(n: usize) -> Vec<JsonValue> {
    (0..n)
        .map(|i| {
            json!({
                "question": format!("How does {} scale service {}?", "Google", i),
                "option_a": "Vertically only",
                "option_b": "Horizontally with sharding",
                "option_c": "It does not",
                "option_d": "By rebooting",
                "correct_answer": "B",
                "difficulty": "medium"
            })
        })
        .collect()
}

fn setup_app(behaviour: Behaviour) -> Router {
    let bank = Arc::new(FallbackBank::new("Google").expect("bank"));
    router(AppState::from_parts(
        Arc::new(StubGenerator(behaviour)),
        bank,
        None,
        Duration::from_secs(5),
    ))
}

fn setup_app_with_categories(behaviour: Behaviour) -> Router {
    let bank = Arc::new(FallbackBank::new("Google").expect("bank"));
    router(AppState::with_repository(
        Arc::new(StubGenerator(behaviour)),
        bank,
        Some(Arc::new(stub_repository())),
        None,
        Duration::from_secs(5),
    ))
}

fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/health",
            get(interview_prep_backend::routes::health::health),
        )
        .route(
            "/api/quiz/generate",
            post(interview_prep_backend::routes::quiz::generate_quiz),
        )
        .route(
            "/api/quiz/catalog",
            get(interview_prep_backend::routes::quiz::get_catalog),
        )
        .route(
            "/api/quiz/categories",
            get(interview_prep_backend::routes::quiz::list_categories),
        )
        .route(
            "/api/quiz/categories/:id",
            get(interview_prep_backend::routes::quiz::get_category),
        )
        .route(
            "/api/quiz/categories/:id/questions",
            get(interview_prep_backend::routes::quiz::get_category_questions),
        )
        .route(
            "/api/quiz/attempts",
            post(interview_prep_backend::routes::quiz::submit_attempt),
        )
        .route(
            "/api/tips",
            post(interview_prep_backend::routes::tips::get_tips),
        )
        .with_state(state)
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

fn ids(body: &JsonValue) -> Vec<String> {
    body["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn generate_falls_back_when_generator_fails() {
    let app = setup_app(Behaviour::Fail);
    let (status, body) = post_json(
        &app,
        "/api/quiz/generate",
        json!({ "company": "Google", "role": "technical" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["fallback_reason"], "generation_failed");
    assert_eq!(body["notice"], "Using offline questions");
    let ids = ids(&body);
    assert!((10..=15).contains(&ids.len()));
    assert_eq!(body["total"], ids.len());
    assert!(ids.iter().all(|id| id.starts_with("google-tech-")));
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
}

#[tokio::test]
async fn generate_serves_generated_questions_without_fallback() {
    let app = setup_app(Behaviour::Return(generated(12)));
    let (status, body) = post_json(
        &app,
        "/api/quiz/generate",
        json!({ "company": "Google", "role": "technical", "categoryId": "7f1c2a9e-3b4d-4e5f-8a6b-1c2d3e4f5a6b" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "generated");
    assert!(body.get("fallback_reason").is_none());
    let ids = ids(&body);
    assert_eq!(ids.len(), 12);
    assert!(ids.iter().all(|id| id.starts_with("google-technical-ai-")));
    for q in body["questions"].as_array().unwrap() {
        assert_eq!(q["correct_answer"], "B");
    }
}

#[tokio::test]
async fn unknown_company_and_empty_body_still_get_a_quiz() {
    let app = setup_app(Behaviour::Return(generated(3)));

    let (status, body) = post_json(
        &app,
        "/api/quiz/generate",
        json!({ "company": "Zylo", "role": "technical" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["fallback_reason"], "insufficient_questions");
    let zylo = ids(&body);
    assert!(zylo.len() >= 10);
    assert!(zylo.iter().all(|id| id.starts_with("google-tech-")));

    let (status, body) = post_json(&app, "/api/quiz/generate", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert!((10..=15).contains(&ids(&body).len()));
}

#[tokio::test]
async fn oversized_company_still_gets_a_quiz() {
    let app = setup_app(Behaviour::Fail);
    let (status, body) = post_json(
        &app,
        "/api/quiz/generate",
        json!({ "company": "x".repeat(500), "role": "hr" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    let ids = ids(&body);
    assert!((10..=15).contains(&ids.len()));
    assert!(ids.iter().all(|id| id.starts_with("google-hr-")));
}

#[tokio::test]
async fn category_id_alone_resolves_company_and_role() {
    let app = setup_app_with_categories(Behaviour::Fail);
    let (status, body) = post_json(
        &app,
        "/api/quiz/generate",
        json!({ "categoryId": AMAZON_HR.to_string() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "fallback");
    assert!(ids(&body).iter().all(|id| id.starts_with("amazon-hr-")));
}

#[tokio::test]
async fn stocked_category_serves_stored_questions() {
    let app = setup_app_with_categories(Behaviour::Fail);
    let (status, body) = post_json(
        &app,
        "/api/quiz/generate",
        json!({ "category_id": STOCKED.to_string() }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["source"], "stored");
    assert!(body.get("notice").is_none());
    assert_eq!(body["total"], 11);
    for q in body["questions"].as_array().unwrap() {
        assert!(q["question"].as_str().unwrap().starts_with("Saved question"));
    }
}

#[tokio::test]
async fn categories_are_listed_and_filtered_by_company() {
    let app = setup_app_with_categories(Behaviour::Fail);
    let (status, body) = get_json(&app, "/api/quiz/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"].as_array().unwrap().len(), 2);

    let (_, body) = get_json(&app, "/api/quiz/categories?company=amazon").await;
    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["type"], "hr");
    assert_eq!(categories[0]["company"], "Amazon");
}

#[tokio::test]
async fn category_detail_and_stored_questions() {
    let app = setup_app_with_categories(Behaviour::Fail);
    let (status, body) = get_json(&app, &format!("/api/quiz/categories/{}", AMAZON_HR)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], AMAZON_HR.to_string());

    let (status, body) = get_json(&app, &format!("/api/quiz/categories/{}/questions", STOCKED)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 11);
    assert_eq!(body["category"]["type"], "technical");

    let (status, body) = get_json(&app, &format!("/api/quiz/categories/{}", Uuid::from_u128(7))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn categories_without_database_are_empty() {
    let app = setup_app(Behaviour::Fail);
    let (status, body) = get_json(&app, "/api/quiz/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["categories"], json!([]));

    let (status, _) = get_json(&app, &format!("/api/quiz/categories/{}/questions", STOCKED)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn catalog_lists_supported_companies() {
    let app = setup_app(Behaviour::Fail);
    let req = Request::builder()
        .method("GET")
        .uri("/api/quiz/catalog")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["default_company"], "Google");
    let companies = body["companies"].as_array().unwrap();
    assert_eq!(companies.len(), 12);
    let accenture = companies
        .iter()
        .find(|c| c["company"] == "Accenture")
        .expect("Accenture listed");
    assert_eq!(accenture["roles"], json!(["hr", "technical"]));
    assert_eq!(accenture["question_count"], 20);
}

#[tokio::test]
async fn attempts_are_scored_without_database() {
    let app = setup_app(Behaviour::Fail);
    let (status, body) = post_json(
        &app,
        "/api/quiz/attempts",
        json!({
            "user_id": "0b7e3c1a-5f2d-4c8b-9a1e-6d4f2b3c5a7e",
            "answers": [
                { "question_id": "google-hr-1", "user_answer": "B", "correct_answer": "B" },
                { "question_id": "google-hr-2", "user_answer": "C", "correct_answer": "C" },
                { "question_id": "google-hr-3", "user_answer": "A", "correct_answer": "B" },
                { "question_id": "google-hr-4", "user_answer": "B", "correct_answer": "B" }
            ],
            "time_taken_seconds": 95
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["score"], 75);
    assert_eq!(body["passed"], true);
    assert_eq!(body["attempt_id"], JsonValue::Null);
    assert_eq!(body["total_questions"], 4);
}

#[tokio::test]
async fn attempts_without_answers_are_rejected() {
    let app = setup_app(Behaviour::Fail);
    let (status, _) = post_json(
        &app,
        "/api/quiz/attempts",
        json!({
            "user_id": "0b7e3c1a-5f2d-4c8b-9a1e-6d4f2b3c5a7e",
            "answers": []
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tips_follow_role() {
    let app = setup_app(Behaviour::Fail);
    let (status, body) = post_json(&app, "/api/tips", json!({ "role": "Frontend Developer" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tips"][0], "Brush up on core technical subjects");

    let (_, body) = post_json(&app, "/api/tips", json!({ "role": "HR" })).await;
    assert_eq!(body["tips"][1], "Use STAR method for answers");
}

#[tokio::test]
async fn health_reports_disabled_database() {
    let app = setup_app(Behaviour::Fail);
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["database"], "disabled");
}
