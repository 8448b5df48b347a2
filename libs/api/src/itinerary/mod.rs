use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use entity::prelude::*;

use crate::response::{ApiResponse, IntoApiResponse};
use crate::{ApiState, ErrorBody};

/// Generate an itinerary for a city
#[utoipa::path(
    post,
    path = "/api/generate-route",
    request_body = GenerationRequest,
    responses(
        (status = 200, description = "Generated an itinerary successfully", body = Itinerary),
        (status = 400, description = "Malformed body, empty city or days out of range", body = ErrorBody),
        (status = 500, description = "The model failed or returned an unusable answer", body = ErrorBody)
    )
)]
pub async fn generate_route(
    State(state): State<ApiState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> ApiResponse<Json<Itinerary>> {
    let Json(body) = payload?;
    let itinerary = state
        .itinerary
        .generate_itinerary(&body)
        .await
        .into_response(body.language)?;

    Ok(Json(itinerary))
}

/// Replace one day of an itinerary following the traveller's comment
#[utoipa::path(
    post,
    path = "/api/refine-day",
    request_body = RefineRequest,
    responses(
        (status = 200, description = "Refined the day successfully", body = DayPlan),
        (status = 400, description = "Malformed body or required fields are missing", body = ErrorBody),
        (status = 500, description = "The model failed or returned an unusable answer", body = ErrorBody)
    )
)]
pub async fn refine_day(
    State(state): State<ApiState>,
    payload: Result<Json<RefineRequest>, JsonRejection>,
) -> ApiResponse<Json<DayPlan>> {
    let Json(body) = payload?;
    let day = state
        .itinerary
        .refine_day(&body)
        .await
        .into_response(body.language)?;

    Ok(Json(day))
}
