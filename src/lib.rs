pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::services::{
    ai_service::{GeminiService, QuestionGenerator},
    attempt_service::AttemptService,
    fallback_bank::FallbackBank,
    question_store::{QuestionStore, QuizRepository},
    quiz_service::QuizService,
};
use reqwest::Client;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: Option<PgPool>,
    pub quiz_service: QuizService,
    pub attempt_service: AttemptService,
}

impl AppState {
    pub fn new(config: &Config, pool: Option<PgPool>) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.generation_timeout() + Duration::from_secs(2))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        let generator = GeminiService::new(
            http_client,
            config.gemini_api_key.clone(),
            config.gemini_api_base.clone(),
            config.gemini_model.clone(),
            config.questions_per_generation,
        );
        let bank = FallbackBank::shared(&config.fallback_default_company)?;

        Ok(Self::from_parts(
            Arc::new(generator),
            bank,
            pool,
            config.generation_timeout(),
        ))
    }

    pub fn from_parts(
        generator: Arc<dyn QuestionGenerator>,
        bank: Arc<FallbackBank>,
        pool: Option<PgPool>,
        generation_timeout: Duration,
    ) -> Self {
        let repository = pool
            .clone()
            .map(|pool| Arc::new(QuestionStore::new(pool)) as Arc<dyn QuizRepository>);
        Self::with_repository(generator, bank, repository, pool, generation_timeout)
    }

    pub fn with_repository(
        generator: Arc<dyn QuestionGenerator>,
        bank: Arc<FallbackBank>,
        repository: Option<Arc<dyn QuizRepository>>,
        pool: Option<PgPool>,
        generation_timeout: Duration,
    ) -> Self {
        let quiz_service = QuizService::new(generator, bank, repository, generation_timeout);
        let attempt_service = AttemptService::new(pool.clone());

        Self {
            pool,
            quiz_service,
            attempt_service,
        }
    }
}
