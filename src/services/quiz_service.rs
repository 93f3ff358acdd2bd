use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::question::{FallbackReason, QuestionSource, QuizQuestion};
use crate::models::quiz_category::QuizCategory;
use crate::services::ai_service::{GenerationRequest, QuestionGenerator};
use crate::services::fallback_bank::{FallbackBank, MIN_QUESTIONS_PER_KEY};
use crate::services::question_store::{spawn_save, QuizRepository};
use crate::utils::validation::sanitize_questions;

pub const MAX_QUIZ_QUESTIONS: usize = 15;
pub const MAX_LABEL_CHARS: usize = 120;
pub const STORED_POOL_LIMIT: i64 = 50;
pub const GENERIC_LABEL: &str = "General";
pub const OFFLINE_NOTICE: &str = "Using offline questions";

#[derive(Debug, Clone)]
pub struct QuizOutcome {
    pub questions: Vec<QuizQuestion>,
    pub source: QuestionSource,
    pub fallback_reason: Option<FallbackReason>,
    pub notice: Option<String>,
}

#[derive(Clone)]
pub struct QuizService {
    generator: Arc<dyn QuestionGenerator>,
    bank: Arc<FallbackBank>,
    repository: Option<Arc<dyn QuizRepository>>,
    timeout: Duration,
}

impl QuizService {
    pub fn new(
        generator: Arc<dyn QuestionGenerator>,
        bank: Arc<FallbackBank>,
        repository: Option<Arc<dyn QuizRepository>>,
        timeout: Duration,
    ) -> Self {
        Self {
            generator,
            bank,
            repository,
            timeout,
        }
    }

    pub fn bank(&self) -> &FallbackBank {
        &self.bank
    }

    /// Categories ordered by company then role. Empty without a database.
    pub async fn list_categories(&self, company: Option<&str>) -> Result<Vec<QuizCategory>> {
        match &self.repository {
            Some(repository) => {
                repository
                    .list_categories(non_blank(company).map(str::to_string))
                    .await
            }
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_category(&self, id: Uuid) -> Result<QuizCategory> {
        let not_found = || Error::NotFound(format!("Quiz category {} not found", id));
        let repository = self.repository.as_ref().ok_or_else(not_found)?;
        repository.get_category(id).await?.ok_or_else(not_found)
    }

    /// A category with the questions previously saved under it, newest first.
    pub async fn stored_questions(&self, category_id: Uuid) -> Result<(QuizCategory, Vec<QuizQuestion>)> {
        let category = self.get_category(category_id).await?;
        let questions = match &self.repository {
            Some(repository) => {
                repository
                    .load_for_category(category.id, STORED_POOL_LIMIT)
                    .await?
            }
            None => Vec::new(),
        };
        Ok((category, questions))
    }

    pub async fn serve_quiz(
        &self,
        company: Option<&str>,
        role: Option<&str>,
        category_id: Option<Uuid>,
    ) -> QuizOutcome {
        let mut rng = StdRng::from_entropy();
        self.serve_quiz_with_rng(company, role, category_id, &mut rng)
            .await
    }

    /// Entry point for a quiz request. A category fills in whichever of
    /// company and role the caller left out, and its stored questions are
    /// reused when at least ten exist. Otherwise runs the generation pipeline.
    pub async fn serve_quiz_with_rng<R>(
        &self,
        company: Option<&str>,
        role: Option<&str>,
        category_id: Option<Uuid>,
        rng: &mut R,
    ) -> QuizOutcome
    where
        R: Rng + Send + ?Sized,
    {
        let category = self.category_for_labels(company, role, category_id).await;
        let company = non_blank(company).or_else(|| category.as_ref().and_then(QuizCategory::company_label));
        let role = non_blank(role).or_else(|| category.as_ref().and_then(QuizCategory::role_label));

        if let Some(questions) = self.reuse_stored(category_id, rng).await {
            tracing::info!(?category_id, count = questions.len(), "Serving stored quiz");
            return QuizOutcome {
                questions,
                source: QuestionSource::Stored,
                fallback_reason: None,
                notice: None,
            };
        }

        self.generate_quiz_questions_with_rng(company, role, category_id, rng)
            .await
    }

    pub async fn generate_quiz_questions(
        &self,
        company: Option<&str>,
        role: Option<&str>,
        category_id: Option<Uuid>,
    ) -> QuizOutcome {
        let mut rng = StdRng::from_entropy();
        self.generate_quiz_questions_with_rng(company, role, category_id, &mut rng)
            .await
    }

    /// Generated questions when at least ten valid ones come back, otherwise a
    /// shuffled selection from the fallback bank. The category id only tags
    /// persisted results. Never fails.
    pub async fn generate_quiz_questions_with_rng<R>(
        &self,
        company: Option<&str>,
        role: Option<&str>,
        category_id: Option<Uuid>,
        rng: &mut R,
    ) -> QuizOutcome
    where
        R: Rng + Send + ?Sized,
    {
        let company = label_or_generic(company);
        let role = label_or_generic(role);

        let request = GenerationRequest {
            company: company.to_string(),
            role: role.to_string(),
            category_id,
        };

        let reason = match tokio::time::timeout(self.timeout, self.generator.generate(&request)).await {
            Ok(Ok(raw)) => {
                let questions = sanitize_questions(&raw, company, role, MAX_QUIZ_QUESTIONS);
                if let (Some(repository), Some(category_id)) = (&self.repository, category_id) {
                    if !questions.is_empty() {
                        spawn_save(repository.clone(), category_id, questions.clone());
                    }
                }
                if questions.len() >= MIN_QUESTIONS_PER_KEY {
                    tracing::info!(company, role, count = questions.len(), "Serving generated quiz");
                    return QuizOutcome {
                        questions,
                        source: QuestionSource::Generated,
                        fallback_reason: None,
                        notice: None,
                    };
                }
                tracing::warn!(
                    company,
                    role,
                    received = raw.len(),
                    valid = questions.len(),
                    "Insufficient generated questions, using fallback"
                );
                FallbackReason::InsufficientQuestions
            }
            Ok(Err(e)) => {
                tracing::warn!(company, role, error = %e, "AI generation failed, using fallback questions");
                FallbackReason::GenerationFailed
            }
            Err(_) => {
                tracing::warn!(company, role, timeout = ?self.timeout, "AI generation timed out, using fallback questions");
                FallbackReason::TimedOut
            }
        };

        QuizOutcome {
            questions: self.fallback_questions(company, role, rng),
            source: QuestionSource::Fallback,
            fallback_reason: Some(reason),
            notice: Some(OFFLINE_NOTICE.to_string()),
        }
    }

    /// Looks the category up only when the caller left company or role out.
    async fn category_for_labels(
        &self,
        company: Option<&str>,
        role: Option<&str>,
        category_id: Option<Uuid>,
    ) -> Option<QuizCategory> {
        if non_blank(company).is_some() && non_blank(role).is_some() {
            return None;
        }
        let (repository, category_id) = (self.repository.as_ref()?, category_id?);
        match repository.get_category(category_id).await {
            Ok(category) => category,
            Err(e) => {
                tracing::warn!(%category_id, error = ?e, "Category lookup failed");
                None
            }
        }
    }

    async fn reuse_stored<R>(&self, category_id: Option<Uuid>, rng: &mut R) -> Option<Vec<QuizQuestion>>
    where
        R: Rng + Send + ?Sized,
    {
        let (repository, category_id) = (self.repository.as_ref()?, category_id?);
        let mut questions = match repository.load_for_category(category_id, STORED_POOL_LIMIT).await {
            Ok(questions) => questions,
            Err(e) => {
                tracing::warn!(%category_id, error = ?e, "Loading stored questions failed");
                return None;
            }
        };
        if questions.len() < MIN_QUESTIONS_PER_KEY {
            return None;
        }
        questions.shuffle(rng);
        questions.truncate(MAX_QUIZ_QUESTIONS);
        Some(questions)
    }

    fn fallback_questions<R>(&self, company: &str, role: &str, rng: &mut R) -> Vec<QuizQuestion>
    where
        R: Rng + ?Sized,
    {
        let resolved = self.bank.resolve(company, role);
        let mut pool: Vec<QuizQuestion> = resolved.questions.to_vec();

        if pool.len() < MIN_QUESTIONS_PER_KEY {
            for other in self.bank.other_roles(resolved.company, resolved.role) {
                if pool.len() >= MIN_QUESTIONS_PER_KEY {
                    break;
                }
                let needed = MIN_QUESTIONS_PER_KEY - pool.len();
                pool.extend(other.iter().take(needed).cloned());
            }
        }

        pool.shuffle(rng);
        let take = MAX_QUIZ_QUESTIONS.min(pool.len().max(MIN_QUESTIONS_PER_KEY));
        pool.truncate(take);
        pool
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Trimmed label capped at `MAX_LABEL_CHARS`, or `GENERIC_LABEL` when blank.
fn label_or_generic(value: Option<&str>) -> &str {
    let label = non_blank(value).unwrap_or(GENERIC_LABEL);
    match label.char_indices().nth(MAX_LABEL_CHARS) {
        Some((end, _)) => label[..end].trim_end(),
        None => label,
    }
}
