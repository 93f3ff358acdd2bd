use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::quiz_dto::{
    CatalogEntry, CatalogResponse, CategoriesResponse, CategoryQuery, GenerateQuizRequest,
    GenerateQuizResponse, StoredQuestionsResponse, SubmitAttemptRequest,
};
use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn generate_quiz(
    State(state): State<AppState>,
    Json(payload): Json<GenerateQuizRequest>,
) -> Result<impl IntoResponse> {
    let outcome = state
        .quiz_service
        .serve_quiz(
            payload.company.as_deref(),
            payload.role.as_deref(),
            payload.category_id,
        )
        .await;

    Ok(Json(GenerateQuizResponse {
        total: outcome.questions.len(),
        questions: outcome.questions,
        source: outcome.source,
        fallback_reason: outcome.fallback_reason,
        notice: outcome.notice,
    }))
}

#[axum::debug_handler]
pub async fn get_catalog(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let bank = state.quiz_service.bank();
    let companies = bank
        .companies()
        .map(|company| CatalogEntry {
            company: company.to_string(),
            roles: bank.roles(company).into_iter().map(str::to_string).collect(),
            question_count: bank.question_count(company),
        })
        .collect();

    Ok(Json(CatalogResponse {
        default_company: bank.default_company().to_string(),
        companies,
    }))
}

#[axum::debug_handler]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryQuery>,
) -> Result<impl IntoResponse> {
    let categories = state
        .quiz_service
        .list_categories(query.company.as_deref())
        .await?;
    Ok(Json(CategoriesResponse { categories }))
}

#[axum::debug_handler]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let category = state.quiz_service.get_category(id).await?;
    Ok(Json(category))
}

#[axum::debug_handler]
pub async fn get_category_questions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let (category, questions) = state.quiz_service.stored_questions(id).await?;
    Ok(Json(StoredQuestionsResponse {
        total: questions.len(),
        category,
        questions,
    }))
}

#[axum::debug_handler]
pub async fn submit_attempt(
    State(state): State<AppState>,
    Json(payload): Json<SubmitAttemptRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state.attempt_service.submit(payload).await?;
    Ok(Json(response))
}
