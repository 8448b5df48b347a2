use axum::{http::StatusCode, Json};

use crate::ErrorBody;

pub(super) async fn get_404() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "not found".to_string(),
        }),
    )
}
