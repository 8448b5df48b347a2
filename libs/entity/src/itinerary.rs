use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lenient::Code;

#[derive(
    Debug,
    Default,
    PartialEq,
    Eq,
    Clone,
    Copy,
    Serialize,
    Deserialize,
    ToSchema,
    strum::Display,
    strum::EnumString,
)]
#[serde(from = "Code", into = "String")]
#[strum(serialize_all = "lowercase")]
pub enum RouteItemType {
    /// Sights, museums, monuments
    #[default]
    Sight,
    /// Cafes, restaurants
    Food,
    /// Parks, promenades, squares
    Walk,
}

impl RouteItemType {
    /// Exact match only; anything else is a sight.
    pub fn coerce(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }
}

impl From<Code> for RouteItemType {
    fn from(value: Code) -> Self {
        value.as_str().map(RouteItemType::coerce).unwrap_or_default()
    }
}

impl From<RouteItemType> for String {
    fn from(value: RouteItemType) -> Self {
        value.to_string()
    }
}

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteItem {
    #[serde(rename = "type")]
    pub kind: RouteItemType,
    pub title: String,
    pub time: String,
    pub description: String,
    pub address: String,
    pub website_url: String,
}

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct DayPlan {
    pub label: String,
    pub items: Vec<RouteItem>,
}

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize, ToSchema)]
pub struct Itinerary {
    pub city: String,
    pub days: Vec<DayPlan>,
}
