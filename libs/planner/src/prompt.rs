//! Prompt text for itinerary generation and single-day refinement.

use entity::prelude::{DayPlan, Language};
use serde_json::json;

use crate::language::{days_phrase, profile};

#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const PLACE_TYPES: &str = r#"Place types:
- "sight" - landmarks, museums, monuments
- "food" - cafes, restaurants, places to eat
- "walk" - parks, promenades, squares"#;

fn system_prompt(language: Language) -> String {
    format!(
        r#"You are a professional tour guide and travel planner.
Your task is to create detailed routes for tourists.

IMPORTANT RULES:
1. Reply ONLY with valid JSON and no other text
2. Do not add comments or explanations before or after the JSON
3. Use only real places that can be verified
4. Every day must contain its own places, without repeats between days
5. Mind the logistics: places within one day must be close to each other
6. Include meal times (lunch and dinner) at suitable hours
7. {}"#,
        profile(language).instruction
    )
}

fn item_examples() -> serde_json::Value {
    json!([
        {
            "type": "sight",
            "title": "Name of the sight",
            "time": "10:00–12:00",
            "description": "What is interesting there (2-3 sentences)",
            "address": "Exact address",
            "websiteUrl": "https://official.site or empty string if unknown"
        },
        {
            "type": "food",
            "title": "Name of the cafe or restaurant",
            "time": "12:30–13:30",
            "description": "About the place and recommended dishes",
            "address": "Address",
            "websiteUrl": ""
        }
    ])
}

fn wishes_block(comment: &str, language: Language) -> String {
    let comment = comment.trim();
    if comment.is_empty() {
        return String::new();
    }

    let profile = profile(language);
    format!(
        "\n\n{}: {}\n{}",
        profile.wishes_label, comment, profile.wishes_note
    )
}

pub fn build_generation_prompt(
    city: &str,
    days: i64,
    comment: &str,
    language: Language,
) -> Prompt {
    let schema = json!({
        "city": city,
        "days": [
            {
                "label": profile(language).day_title(1),
                "items": item_examples()
            }
        ]
    });
    let schema = serde_json::to_string_pretty(&schema).unwrap_or_default();

    let user = format!(
        r#"Create a tourist route for the city "{city}" for {days}.{wishes}

Reply STRICTLY in this JSON format:
{schema}

{PLACE_TYPES}

Every day must contain 5-7 places (including lunch and dinner).
Plan different places for every day!
Return exactly {count} objects in "days", labelled like "{label}".
Fill "websiteUrl" only with an official site you are sure of, otherwise leave it as an empty string."#,
        days = days_phrase(language, days),
        wishes = wishes_block(comment, language),
        count = days,
        label = profile(language).day_title(1),
    );

    Prompt {
        system: system_prompt(language),
        user,
    }
}

pub fn build_refine_prompt(
    city: &str,
    day_index: usize,
    original_day_plan: &DayPlan,
    user_comment: &str,
    language: Language,
) -> Prompt {
    let day_title = profile(language).day_title(day_index + 1);
    let original =
        serde_json::to_string_pretty(original_day_plan).unwrap_or_default();
    let schema = json!({
        "label": day_title,
        "items": item_examples()
    });
    let schema = serde_json::to_string_pretty(&schema).unwrap_or_default();

    let user = format!(
        r#"Here is the current plan of "{day_title}" of a route in the city "{city}":
{original}

The traveller asks to change this day: {comment}
{note}

Rewrite ONLY this one day taking the request into account. Keep the places that the request does not touch.
Reply STRICTLY with a single day object (not the whole route) in this JSON format:
{schema}

{PLACE_TYPES}

Fill "websiteUrl" only with an official site you are sure of, otherwise leave it as an empty string."#,
        comment = user_comment.trim(),
        note = profile(language).wishes_note,
    );

    Prompt {
        system: system_prompt(language),
        user,
    }
}

#[cfg(test)]
mod test {
    use entity::prelude::{DayPlan, Language, RouteItem, RouteItemType};

    use super::{build_generation_prompt, build_refine_prompt};

    #[test]
    fn test_generation_prompt_localizes_schema() {
        // Act
        let prompt = build_generation_prompt("Kazan", 3, "", Language::Ru);

        // Assert
        assert!(prompt.user.contains(r#""label": "День 1""#));
        assert!(prompt.user.contains(r#""city": "Kazan""#));
        assert!(prompt.user.contains("3 дня"));
        assert!(prompt.user.contains("websiteUrl"));
        assert!(prompt.system.contains("Отвечай только на русском языке."));
    }

    #[test]
    fn test_generation_prompt_wishes_only_when_present() {
        let without = build_generation_prompt("Rome", 2, "  ", Language::En);
        let with =
            build_generation_prompt("Rome", 2, "with kids", Language::En);

        assert!(!without.user.contains("Traveller's wishes"));
        assert!(with.user.contains("Traveller's wishes: with kids"));
        assert!(with.user.contains("strictly in English"));
    }

    #[test]
    fn test_generation_prompt_chinese_day_label() {
        let prompt = build_generation_prompt("Beijing", 1, "", Language::Zh);

        assert!(prompt.user.contains("第1天"));
        assert!(prompt.user.contains("1天"));
    }

    #[test]
    fn test_refine_prompt_embeds_original_day() {
        // Arrange
        let day = DayPlan {
            label: "Day 3".to_string(),
            items: vec![RouteItem {
                kind: RouteItemType::Food,
                title: "Trattoria da Enzo".to_string(),
                ..Default::default()
            }],
        };

        // Act
        let prompt = build_refine_prompt(
            "Rome",
            2,
            &day,
            " fewer museums ",
            Language::En,
        );

        // Assert
        assert!(prompt.user.contains("Trattoria da Enzo"));
        assert!(prompt.user.contains("change this day: fewer museums"));
        assert!(prompt.user.contains(r#""label": "Day 3""#));
        assert!(prompt.user.contains("not the whole route"));
        assert_eq!(day.label, "Day 3");
    }
}
