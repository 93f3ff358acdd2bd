pub mod ai_service;
pub mod attempt_service;
pub mod fallback_bank;
pub mod fallback_data;
pub mod question_store;
pub mod quiz_service;
pub mod tips_service;
