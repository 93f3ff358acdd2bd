use std::collections::HashSet;

use serde_json::Value as JsonValue;
use validator::Validate;

use crate::models::question::{AnswerOption, QuizQuestion, DEFAULT_DIFFICULTY};

pub fn validate<T: Validate>(val: &T) -> Result<(), validator::ValidationErrors> {
    val.validate()
}

/// Keeps only well-formed questions from an untrusted generator response.
///
/// Indexes used for synthetic ids are 1-based positions in `raw`, so a dropped
/// item leaves a gap rather than shifting its neighbours. Ids in the returned
/// batch are always distinct, even when a remote id looks like a synthetic one.
pub fn sanitize_questions(
    raw: &[JsonValue],
    company: &str,
    role: &str,
    limit: usize,
) -> Vec<QuizQuestion> {
    let mut questions: Vec<QuizQuestion> = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for (idx, val) in raw.iter().enumerate() {
        if questions.len() >= limit {
            break;
        }
        let Some(mut q) = coerce_question(val) else {
            tracing::debug!(index = idx, "Dropping malformed generated question");
            continue;
        };
        if q.id.is_empty() || used.contains(&q.id) {
            q.id = unused_id(&used, ai_question_id(company, role, idx + 1));
        }
        used.insert(q.id.clone());
        questions.push(q);
    }

    questions
}

pub fn ai_question_id(company: &str, role: &str, index: usize) -> String {
    format!("{}-{}-ai-{}", company.to_lowercase(), role, index)
}

fn unused_id(used: &HashSet<String>, base: String) -> String {
    if !used.contains(&base) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{base}-{n}");
        if !used.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

fn coerce_question(v: &JsonValue) -> Option<QuizQuestion> {
    let text = |field: &str| {
        v.get(field)
            .and_then(|s| s.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    let question = text("question")?;
    let option_a = text("option_a")?;
    let option_b = text("option_b")?;
    let option_c = text("option_c")?;
    let option_d = text("option_d")?;
    let correct_answer = v.get("correct_answer").and_then(parse_correct_answer)?;

    let id = match v.get("id") {
        Some(JsonValue::String(s)) => s.trim().to_string(),
        Some(JsonValue::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    Some(QuizQuestion {
        id,
        question,
        option_a,
        option_b,
        option_c,
        option_d,
        correct_answer,
        difficulty: text("difficulty")
            .map(|d| d.to_lowercase())
            .unwrap_or_else(|| DEFAULT_DIFFICULTY.to_string()),
    })
}

fn parse_correct_answer(v: &JsonValue) -> Option<AnswerOption> {
    match v {
        JsonValue::String(s) => AnswerOption::parse_label(s),
        JsonValue::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .and_then(AnswerOption::from_index),
        _ => None,
    }
}
