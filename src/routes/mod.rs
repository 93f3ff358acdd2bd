pub mod health;
pub mod quiz;
pub mod tips;
