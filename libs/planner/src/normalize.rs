//! Repairs loosely structured model output into the itinerary model.
//!
//! Items never fail: every missing or malformed field degrades to a safe
//! default. The only hard failure is an itinerary without days.

use entity::prelude::{DayPlan, Itinerary, Language, RouteItem, RouteItemType};
use serde_json::Value;
use tracing::{info, warn};

use crate::{error::PlannerError, language::profile};

/// Non-empty strings are kept, non-zero numbers are stringified, everything
/// else counts as missing.
pub(crate) fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn normalize_item(raw: &Value, language: Language) -> RouteItem {
    let kind = raw
        .get("type")
        .and_then(Value::as_str)
        .map(RouteItemType::coerce)
        .unwrap_or_default();

    RouteItem {
        kind,
        title: text_field(raw.get("title"))
            .unwrap_or_else(|| profile(language).untitled.to_string()),
        time: text_field(raw.get("time")).unwrap_or_default(),
        description: text_field(raw.get("description")).unwrap_or_default(),
        address: text_field(raw.get("address")).unwrap_or_default(),
        website_url: text_field(raw.get("websiteUrl")).unwrap_or_default(),
    }
}

fn normalize_day(raw: &Value, day_index: usize, language: Language) -> DayPlan {
    let label = text_field(raw.get("label"))
        .unwrap_or_else(|| profile(language).day_title(day_index + 1));

    let items = match raw.get("items") {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| normalize_item(item, language))
            .collect(),
        _ => vec![],
    };

    DayPlan { label, items }
}

pub fn normalize_itinerary(
    raw: &Value,
    expected_city: &str,
    expected_days: usize,
    language: Language,
) -> Result<Itinerary, PlannerError> {
    let days = match raw.get("days") {
        Some(Value::Array(days)) if !days.is_empty() => days,
        _ => return Err(PlannerError::EmptyItinerary),
    };

    let city = raw
        .get("city")
        .and_then(Value::as_str)
        .filter(|city| !city.trim().is_empty())
        .unwrap_or(expected_city)
        .to_string();

    if days.len() != expected_days {
        warn!(
            task = "normalize itinerary",
            expected_days = expected_days,
            produced_days = days.len(),
        );
    }

    // Extra days are dropped; missing days are not invented.
    let days: Vec<DayPlan> = days
        .iter()
        .take(expected_days.max(1))
        .enumerate()
        .map(|(index, day)| normalize_day(day, index, language))
        .collect();

    let empty_days = days.iter().filter(|day| day.items.is_empty()).count();
    if empty_days > 0 {
        warn!(task = "normalize itinerary", empty_days = empty_days);
    }

    info!(
        task = "normalize itinerary",
        city = city.as_str(),
        days = days.len()
    );

    Ok(Itinerary { city, days })
}

/// Models sometimes answer a single-day request with a whole itinerary or
/// wrap the day under a key; take the day object out first.
fn unwrap_day(raw: &Value) -> &Value {
    if raw.get("items").is_some() {
        return raw;
    }
    if let Some(Value::Array(days)) = raw.get("days") {
        if let Some(first) = days.first() {
            return first;
        }
    }
    match raw.get("day") {
        Some(day @ Value::Object(_)) => day,
        _ => raw,
    }
}

pub fn normalize_day_plan(
    raw: &Value,
    day_index: usize,
    language: Language,
) -> DayPlan {
    normalize_day(unwrap_day(raw), day_index, language)
}
