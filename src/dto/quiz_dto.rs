use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::question::{AnswerOption, FallbackReason, QuestionSource, QuizQuestion};
use crate::models::quiz_category::QuizCategory;

/// Labels of any length are accepted; the provider trims and caps them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateQuizRequest {
    pub company: Option<String>,
    pub role: Option<String>,
    #[serde(alias = "categoryId")]
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateQuizResponse {
    pub questions: Vec<QuizQuestion>,
    pub source: QuestionSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<FallbackReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub company: String,
    pub roles: Vec<String>,
    pub question_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogResponse {
    pub default_company: String,
    pub companies: Vec<CatalogEntry>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryQuery {
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<QuizCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredQuestionsResponse {
    pub category: QuizCategory,
    pub questions: Vec<QuizQuestion>,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmittedAnswer {
    #[validate(length(min = 1))]
    pub question_id: String,
    pub user_answer: AnswerOption,
    pub correct_answer: AnswerOption,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SubmitAttemptRequest {
    pub user_id: Uuid,
    #[serde(alias = "categoryId")]
    pub category_id: Option<Uuid>,
    #[validate(length(min = 1, max = 50), nested)]
    pub answers: Vec<SubmittedAnswer>,
    #[validate(range(min = 0))]
    pub time_taken_seconds: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAttemptResponse {
    pub attempt_id: Option<Uuid>,
    pub score: i32,
    pub correct_answers: usize,
    pub total_questions: usize,
    pub time_taken_seconds: Option<i32>,
    pub passed: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TipsRequest {
    #[validate(length(max = 120))]
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TipsResponse {
    pub tips: Vec<String>,
}
