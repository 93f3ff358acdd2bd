use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_DIFFICULTY: &str = "medium";

/// A single multiple-choice quiz item with four labelled options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub id: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: AnswerOption,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    DEFAULT_DIFFICULTY.to_string()
}

impl QuizQuestion {
    pub fn options(&self) -> [&str; 4] {
        [
            &self.option_a,
            &self.option_b,
            &self.option_c,
            &self.option_d,
        ]
    }

    pub fn is_well_formed(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.question.trim().is_empty()
            && self.options().iter().all(|o| !o.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerOption {
    A,
    B,
    C,
    D,
}

impl AnswerOption {
    pub const ALL: [AnswerOption; 4] = [
        AnswerOption::A,
        AnswerOption::B,
        AnswerOption::C,
        AnswerOption::D,
    ];

    pub fn index(self) -> usize {
        match self {
            AnswerOption::A => 0,
            AnswerOption::B => 1,
            AnswerOption::C => 2,
            AnswerOption::D => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Accepts `"b"`, `" B "`, `"B)"` and `"Option B"` style labels.
    pub fn parse_label(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        let label = trimmed
            .strip_prefix("Option ")
            .or_else(|| trimmed.strip_prefix("option "))
            .unwrap_or(trimmed)
            .trim_end_matches([')', '.', ':']);
        let mut chars = label.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        match c.to_ascii_uppercase() {
            'A' => Some(AnswerOption::A),
            'B' => Some(AnswerOption::B),
            'C' => Some(AnswerOption::C),
            'D' => Some(AnswerOption::D),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AnswerOption::A => "A",
            AnswerOption::B => "B",
            AnswerOption::C => "C",
            AnswerOption::D => "D",
        }
    }
}

impl fmt::Display for AnswerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the questions of a quiz came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Stored,
    Generated,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    GenerationFailed,
    TimedOut,
    InsufficientQuestions,
}
