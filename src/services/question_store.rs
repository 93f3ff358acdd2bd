use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::Result;
use crate::models::question::{AnswerOption, QuizQuestion, DEFAULT_DIFFICULTY};
use crate::models::quiz_category::QuizCategory;

/// Persistent categories and the questions saved under them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn list_categories(&self, company: Option<String>) -> Result<Vec<QuizCategory>>;
    async fn get_category(&self, id: Uuid) -> Result<Option<QuizCategory>>;
    async fn load_for_category(&self, category_id: Uuid, limit: i64) -> Result<Vec<QuizQuestion>>;
    async fn save_generated(&self, category_id: Uuid, questions: &[QuizQuestion]) -> Result<u64>;
}

/// Postgres-backed storage for categories and generated questions.
#[derive(Clone)]
pub struct QuestionStore {
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct StoredQuestionRow {
    id: Uuid,
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: String,
    difficulty: Option<String>,
}

impl StoredQuestionRow {
    fn into_question(self) -> Option<QuizQuestion> {
        let correct_answer = AnswerOption::parse_label(&self.correct_answer)?;
        let question = QuizQuestion {
            id: self.id.to_string(),
            question: self.question,
            option_a: self.option_a,
            option_b: self.option_b,
            option_c: self.option_c,
            option_d: self.option_d,
            correct_answer,
            difficulty: self
                .difficulty
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
        };
        question.is_well_formed().then_some(question)
    }
}

impl QuestionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuizRepository for QuestionStore {
    async fn list_categories(&self, company: Option<String>) -> Result<Vec<QuizCategory>> {
        let categories = sqlx::query_as::<_, QuizCategory>(
            r#"
            SELECT id, name, type, company, role, description, created_at
            FROM quiz_categories
            WHERE $1::text IS NULL OR LOWER(COALESCE(company, 'General')) = LOWER($1)
            ORDER BY company NULLS FIRST, role
            "#,
        )
        .bind(company)
        .fetch_all(&self.pool)
        .await?;
        Ok(categories)
    }

    async fn get_category(&self, id: Uuid) -> Result<Option<QuizCategory>> {
        let category = sqlx::query_as::<_, QuizCategory>(
            r#"
            SELECT id, name, type, company, role, description, created_at
            FROM quiz_categories
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(category)
    }

    async fn load_for_category(&self, category_id: Uuid, limit: i64) -> Result<Vec<QuizQuestion>> {
        let rows = sqlx::query_as::<_, StoredQuestionRow>(
            r#"
            SELECT id, question, option_a, option_b, option_c, option_d, correct_answer, difficulty
            FROM quiz_questions
            WHERE category_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(category_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let total = rows.len();
        let questions: Vec<QuizQuestion> = rows
            .into_iter()
            .filter_map(StoredQuestionRow::into_question)
            .collect();
        if questions.len() < total {
            tracing::warn!(%category_id, dropped = total - questions.len(), "Skipping malformed stored questions");
        }
        Ok(questions)
    }

    async fn save_generated(&self, category_id: Uuid, questions: &[QuizQuestion]) -> Result<u64> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for q in questions {
            let res = sqlx::query(
                r#"
                INSERT INTO quiz_questions (
                    category_id, question, option_a, option_b, option_c, option_d,
                    correct_answer, difficulty
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(category_id)
            .bind(&q.question)
            .bind(&q.option_a)
            .bind(&q.option_b)
            .bind(&q.option_c)
            .bind(&q.option_d)
            .bind(q.correct_answer.as_str())
            .bind(&q.difficulty)
            .execute(&mut *tx)
            .await?;
            inserted += res.rows_affected();
        }

        tx.commit().await?;
        Ok(inserted)
    }
}

/// Saves in a detached task; failures are only logged.
pub fn spawn_save(repository: Arc<dyn QuizRepository>, category_id: Uuid, questions: Vec<QuizQuestion>) {
    tokio::spawn(async move {
        match repository.save_generated(category_id, &questions).await {
            Ok(n) => tracing::info!(%category_id, saved = n, "Saved generated questions"),
            Err(e) => tracing::error!(%category_id, error = ?e, "Error saving questions to database"),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(correct_answer: &str, option_d: &str) -> StoredQuestionRow {
        StoredQuestionRow {
            id: Uuid::nil(),
            question: "What does CAP stand for?".into(),
            option_a: "Consistency, Availability, Partition tolerance".into(),
            option_b: "Cache, API, Proxy".into(),
            option_c: "Compute, Access, Persistence".into(),
            option_d: option_d.into(),
            correct_answer: correct_answer.into(),
            difficulty: None,
        }
    }

    #[test]
    fn stored_row_becomes_question() {
        let q = row("a", "None of these").into_question().unwrap();
        assert_eq!(q.id, Uuid::nil().to_string());
        assert_eq!(q.correct_answer, AnswerOption::A);
        assert_eq!(q.difficulty, DEFAULT_DIFFICULTY);
    }

    #[test]
    fn malformed_rows_are_skipped() {
        assert!(row("E", "None of these").into_question().is_none());
        assert!(row("B", "  ").into_question().is_none());
    }
}
