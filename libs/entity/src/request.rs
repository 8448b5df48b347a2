use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use utoipa::ToSchema;

use crate::{itinerary::DayPlan, language::Language, lenient::LenientDays};

fn default_days() -> i64 {
    1
}

/// Body of a full itinerary generation.
///
/// `days` accepts a number or a numeric string; anything unreadable is 1.
#[serde_as]
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    #[serde(default)]
    pub city: String,
    #[serde_as(deserialize_as = "LenientDays")]
    #[serde(default = "default_days")]
    #[schema(value_type = i64, minimum = 1, maximum = 14)]
    pub days: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub language: Language,
}

/// Body of a single-day refinement. Presence of every field is checked by
/// the planner so the caller gets a localized message instead of a
/// deserialization error.
#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RefineRequest {
    pub city: String,
    pub total_days: Option<i64>,
    pub day_index: Option<i64>,
    pub original_day_plan: Option<DayPlan>,
    pub user_comment: Option<String>,
    pub language: Language,
}
