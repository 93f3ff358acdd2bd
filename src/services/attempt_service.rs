use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::quiz_dto::{SubmitAttemptRequest, SubmitAttemptResponse};
use crate::error::{Error, Result};
use crate::models::quiz_attempt::{QuizAnswer, QuizAttempt};

pub const PASSING_SCORE: i32 = 70;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grade {
    pub correct: usize,
    pub total: usize,
    pub score: i32,
}

/// Percentage of correct answers, rounded half away from zero.
pub fn grade(answers: &[QuizAnswer]) -> Result<Grade> {
    if answers.is_empty() {
        return Err(Error::BadRequest("Quiz attempt has no answers".to_string()));
    }
    let correct = answers.iter().filter(|a| a.is_correct).count();
    let total = answers.len();
    let score = ((correct as f64 / total as f64) * 100.0).round() as i32;
    Ok(Grade {
        correct,
        total,
        score,
    })
}

#[derive(Clone)]
pub struct AttemptService {
    pool: Option<PgPool>,
}

impl AttemptService {
    pub fn new(pool: Option<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn submit(&self, req: SubmitAttemptRequest) -> Result<SubmitAttemptResponse> {
        let answers: Vec<QuizAnswer> = req
            .answers
            .iter()
            .map(|a| QuizAnswer {
                question_id: a.question_id.clone(),
                user_answer: a.user_answer,
                is_correct: a.user_answer == a.correct_answer,
            })
            .collect();
        let grade = grade(&answers)?;

        let attempt_id = match &self.pool {
            Some(pool) => {
                let attempt =
                    record_attempt(pool, req.user_id, req.category_id, &grade, req.time_taken_seconds, &answers)
                        .await?;
                tracing::info!(attempt_id = %attempt.id, score = attempt.score, "Quiz attempt saved");
                Some(attempt.id)
            }
            None => {
                tracing::debug!("No database configured, quiz attempt not persisted");
                None
            }
        };

        Ok(SubmitAttemptResponse {
            attempt_id,
            score: grade.score,
            correct_answers: grade.correct,
            total_questions: grade.total,
            time_taken_seconds: req.time_taken_seconds,
            passed: grade.score >= PASSING_SCORE,
            message: format!("You scored {}% on this quiz.", grade.score),
        })
    }
}

async fn record_attempt(
    pool: &PgPool,
    user_id: Uuid,
    category_id: Option<Uuid>,
    grade: &Grade,
    time_taken: Option<i32>,
    answers: &[QuizAnswer],
) -> Result<QuizAttempt> {
    let mut tx = pool.begin().await?;

    let attempt = sqlx::query_as::<_, QuizAttempt>(
        r#"
        INSERT INTO quiz_attempts (user_id, category_id, score, total_questions, time_taken)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, category_id, score, total_questions, time_taken, completed_at
        "#,
    )
    .bind(user_id)
    .bind(category_id)
    .bind(grade.score)
    .bind(grade.total as i32)
    .bind(time_taken)
    .fetch_one(&mut *tx)
    .await?;

    for answer in answers {
        sqlx::query(
            r#"
            INSERT INTO quiz_answers (attempt_id, question_id, user_answer, is_correct)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(attempt.id)
        .bind(&answer.question_id)
        .bind(answer.user_answer.as_str())
        .bind(answer.is_correct)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;
    Ok(attempt)
}
