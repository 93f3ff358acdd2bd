pub mod question;
pub mod quiz_attempt;
pub mod quiz_category;
