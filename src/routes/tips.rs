use axum::{response::IntoResponse, Json};

use crate::dto::quiz_dto::{TipsRequest, TipsResponse};
use crate::error::Result;
use crate::services::tips_service::tips_for_role;
use crate::utils::validation::validate;

#[axum::debug_handler]
pub async fn get_tips(Json(payload): Json<TipsRequest>) -> Result<impl IntoResponse> {
    validate(&payload)?;
    Ok(Json(TipsResponse {
        tips: tips_for_role(&payload.role),
    }))
}
