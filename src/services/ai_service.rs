use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;
use uuid::Uuid;

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub company: String,
    pub role: String,
    pub category_id: Option<Uuid>,
}

/// Source of freshly generated quiz questions.
///
/// Implementations return the raw question objects as received, untruncated;
/// callers must validate every item before use and cap only what survives.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<JsonValue>>;
}

#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: Option<String>,
    api_base: String,
    model: String,
    questions_per_request: usize,
}

impl GeminiService {
    pub fn new(
        client: Client,
        api_key: Option<String>,
        api_base: String,
        model: String,
        questions_per_request: usize,
    ) -> Self {
        Self {
            client,
            api_key,
            api_base,
            model,
            questions_per_request,
        }
    }

    fn endpoint(&self, api_key: &str) -> Result<Url> {
        let base = self.api_base.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}/models/{}:generateContent", base, self.model))
            .map_err(|e| Error::Config(format!("Invalid Gemini endpoint: {}", e)))?;
        url.query_pairs_mut().append_pair("key", api_key);
        Ok(url)
    }

    fn build_prompt(&self, company: &str, role: &str) -> String {
        format!(
            r#"Generate {count} multiple choice interview questions for {company} {role} position.
Format as JSON array with objects containing:
- question: string (the interview question)
- option_a: string (first option)
- option_b: string (second option)
- option_c: string (third option)
- option_d: string (fourth option)
- correct_answer: string (A, B, C, or D - the correct option letter)
- difficulty: string (easy, medium, or hard)

Make questions relevant to {company} company culture, values, and {role} specific skills.
Include a mix of technical, behavioral, and company-specific questions.
Ensure only one answer is clearly correct for each question.
Vary the position of the correct answer across A, B, C and D."#,
            count = self.questions_per_request,
            company = company,
            role = role,
        )
    }

    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Config("GEMINI_API_KEY is not configured".to_string()))?;

        let payload = serde_json::json!({
            "contents": [{
                "parts": [{ "text": prompt }]
            }]
        });

        let res = self
            .client
            .post(self.endpoint(api_key)?)
            .json(&payload)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(Error::Generation(format!("Gemini API error {}: {}", status, text)));
        }

        let body: JsonValue = res.json().await?;
        body.get("candidates")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("content"))
            .and_then(|c| c.get("parts"))
            .and_then(|p| p.get(0))
            .and_then(|p| p.get("text"))
            .and_then(|t| t.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::Generation("Invalid Gemini response format".to_string()))
    }
}

#[async_trait]
impl QuestionGenerator for GeminiService {
    async fn generate(&self, request: &GenerationRequest) -> Result<Vec<JsonValue>> {
        tracing::info!(company = %request.company, role = %request.role, "Generating quiz");

        let prompt = self.build_prompt(&request.company, &request.role);
        let text = self.generate_content(&prompt).await?;
        tracing::debug!(chars = text.len(), "Generated text received");

        parse_questions(&text)
    }
}

/// Pulls the question array out of free-form model output.
///
/// Tries a fenced ```json block, then the outermost `[...]` span, then the
/// whole text. An object with a `questions` array is accepted as well.
pub fn parse_questions(text: &str) -> Result<Vec<JsonValue>> {
    let candidates = [
        fenced_block(text),
        bracket_span(text),
        Some(text.trim()),
    ];

    for candidate in candidates.into_iter().flatten() {
        if let Ok(value) = serde_json::from_str::<JsonValue>(candidate) {
            match value {
                JsonValue::Array(items) => return Ok(items),
                JsonValue::Object(mut obj) => {
                    if let Some(JsonValue::Array(items)) = obj.remove("questions") {
                        return Ok(items);
                    }
                }
                _ => {}
            }
        }
    }

    Err(Error::Generation(
        "Could not parse questions from generated text".to_string(),
    ))
}

fn fenced_block(text: &str) -> Option<&str> {
    let start = text.find("```")?;
    let after = &text[start + 3..];
    let body_start = after.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after[body_start..];
    let end = body.find("```")?;
    Some(body[..end].trim())
}

fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (end > start).then(|| &text[start..=end])
}
