use axum::{Json, response::IntoResponse};
use serde_json::json;

pub async fn page() -> impl IntoResponse {
    Json(json!({ "message": "mealgrid API is running" }))
}
