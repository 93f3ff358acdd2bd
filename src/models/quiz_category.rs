use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A browsable quiz, optionally tied to a company and role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct QuizCategory {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub category_type: String,
    pub company: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl QuizCategory {
    pub fn company_label(&self) -> Option<&str> {
        non_blank(self.company.as_deref())
    }

    /// The category's role, or its type when no role is set.
    pub fn role_label(&self) -> Option<&str> {
        non_blank(self.role.as_deref()).or_else(|| non_blank(Some(&self.category_type)))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
