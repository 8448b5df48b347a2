use axum::{
    extract::{multipart::MultipartRejection, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use entity::prelude::Language;
use planner::PlannerError;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

pub enum ApiError {
    ClientError(String),
    ServerError(String),
}

/// Failure body of every endpoint.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status_code, message) = match self {
            ApiError::ClientError(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::ServerError(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status_code, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        error!(task = "read json body", error = rejection.body_text());
        ApiError::ClientError(rejection.body_text())
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        error!(task = "read multipart", error = rejection.body_text());
        ApiError::ClientError(rejection.body_text())
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;

pub trait IntoApiResponse<T> {
    fn into_response(self, language: Language) -> ApiResponse<T>;
}

impl<T> IntoApiResponse<T> for Result<T, PlannerError> {
    fn into_response(self, language: Language) -> ApiResponse<T> {
        self.map_err(|e| {
            error!("{:?}", e);

            let message = e.user_message(language);
            if e.is_client_error() {
                ApiError::ClientError(message)
            } else {
                ApiError::ServerError(message)
            }
        })
    }
}
