use axum::{
    body::Bytes,
    extract::{multipart::MultipartRejection, Multipart, Query, State},
    Json,
};
use entity::prelude::*;
use planner::language::profile;
use tracing::{error, info};

pub mod request;

use crate::response::{ApiError, ApiResponse};
use crate::{ApiState, ErrorBody};

use self::request::{RecognizeObjectForm, RecognizeObjectParam};

/// Identify the object in a photo
///
/// "Not recognized" and upstream failures are regular results with
/// `recognized = false`; only a missing image is rejected.
#[utoipa::path(
    post,
    path = "/api/recognize-object",
    request_body(content = RecognizeObjectForm, content_type = "multipart/form-data"),
    params(RecognizeObjectParam),
    responses(
        (status = 200, description = "Identification finished", body = IdentificationResult),
        (status = 400, description = "No image was uploaded or the form is malformed", body = ErrorBody)
    )
)]
pub async fn recognize_object(
    State(state): State<ApiState>,
    Query(params): Query<RecognizeObjectParam>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResponse<Json<IdentificationResult>> {
    let mut multipart = multipart?;
    let mut language = params.language;
    let mut image: Option<Bytes> = None;

    loop {
        let field = multipart.next_field().await.map_err(|e| {
            error!(task = "read multipart", error = e.to_string());
            ApiError::ClientError(e.body_text())
        })?;
        let Some(field) = field else {
            break;
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => {
                let bytes = field.bytes().await.map_err(|e| {
                    error!(task = "read image", error = e.to_string());
                    ApiError::ClientError(e.body_text())
                })?;
                image = Some(bytes);
            }
            "language" => {
                if let Ok(code) = field.text().await {
                    language = Language::from_code(&code);
                }
            }
            _ => {}
        }
    }

    let Some(image) = image.filter(|image| !image.is_empty()) else {
        return Err(ApiError::ClientError(
            profile(language).messages.image_required.to_string(),
        ));
    };

    info!(
        task = "recognize object",
        bytes = image.len(),
        language = language.to_string()
    );

    let result = state.identifier.identify(image, language).await;

    Ok(Json(result))
}
