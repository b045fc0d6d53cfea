use crate::dto::ApiResponse;
use axum::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::success(json!({ "status": "healthy" })))
}
