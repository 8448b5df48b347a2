//! Two-tier object identification: classifier tags first, language-model
//! guess for ambiguous tags.

use bytes::Bytes;
use entity::prelude::{IdentificationMode, IdentificationResult, Language};
use serde_json::Value;
use tracing::{error, info};

use crate::{
    client::{Classification, ImageClassifier, TextCompletion},
    completion::parse_json_from_completion,
    config::IdentificationSettings,
    language::profile,
    normalize::text_field,
    service::with_timeout,
};

/// Top score at which the classifier label is shown as-is.
pub const GOOD_THRESHOLD: f32 = 0.65;
/// Top score below which tags are too weak to escalate.
pub const MIN_THRESHOLD: f32 = 0.35;
/// Number of labels kept as `raw_tags`.
pub const TOP_TAGS: usize = 10;
/// Labels included in a synthesized description.
pub const DESCRIPTION_TAGS: usize = 5;
/// Labels too broad to count as an identification.
pub const GENERIC_TAGS: &[&str] = &[
    "building",
    "tower",
    "city",
    "tree",
    "sky",
    "outdoor",
    "indoor",
    "object",
    "architecture",
    "structure",
    "landscape",
];

/// A label is generic when every word in it is a generic term or its
/// plural, so "Outdoor Buildings" is generic but "Eiffel Tower" and
/// "skyscraper" are not.
pub fn is_generic_label(label: &str) -> bool {
    let label = label.to_lowercase();
    let mut words = label
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .peekable();

    if words.peek().is_none() {
        return true;
    }

    words.all(|word| {
        let singular = word.strip_suffix('s').unwrap_or(word);
        GENERIC_TAGS
            .iter()
            .any(|generic| word == *generic || singular == *generic)
    })
}

#[derive(Debug, Clone, PartialEq)]
struct Ranked {
    best_label: String,
    best_score: f32,
    tags: Vec<String>,
}

fn rank(mut classes: Vec<Classification>) -> Ranked {
    classes.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    let (best_label, best_score) = classes
        .first()
        .map(|class| (class.label.clone(), class.confidence))
        .unwrap_or_default();
    let tags = classes
        .into_iter()
        .map(|class| class.label)
        .filter(|label| !label.trim().is_empty())
        .take(TOP_TAGS)
        .collect();

    Ranked {
        best_label,
        best_score,
        tags,
    }
}

/// The fallback model's answer. Fields are read one by one so a loosely
/// typed field is dropped instead of discarding the whole guess.
#[derive(Debug)]
struct Guess {
    can_guess: bool,
    title: Option<String>,
    description: Option<String>,
    confidence: Option<f32>,
}

impl Guess {
    fn read(raw: &Value) -> Self {
        Self {
            can_guess: flag(raw.get("canGuess")),
            title: trimmed(raw.get("title")),
            description: trimmed(raw.get("description")),
            confidence: number(raw.get("confidence")),
        }
    }
}

fn flag(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => text.trim().eq_ignore_ascii_case("true"),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => false,
    }
}

fn trimmed(value: Option<&Value>) -> Option<String> {
    text_field(value)
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}

fn number(value: Option<&Value>) -> Option<f32> {
    let number = match value? {
        Value::Number(n) => n.as_f64()? as f32,
        Value::String(text) => text.trim().parse::<f32>().ok()?,
        _ => return None,
    };

    number.is_finite().then_some(number)
}

fn guess_prompt(tags: &[String], language: Language) -> (String, String) {
    let system = format!(
        r#"You help tourists identify what they are looking at.
An image classifier looked at a photo and returned tags ordered by confidence.
Guess which specific landmark, monument, building or object it is.
Reply ONLY with JSON of the form:
{{"canGuess": true, "title": "Name", "description": "1-2 sentences about it", "confidence": 0.7}}
If the tags are not enough to name a specific object, reply with "canGuess": false, an empty title and a short hint in "description".
{}"#,
        profile(language).instruction
    );
    let user = format!("Tags: {}", tags.join(", "));

    (system, user)
}

fn clamp_confidence(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

pub struct Identifier<V, C> {
    classifier: V,
    completion: C,
    settings: IdentificationSettings,
}

impl<V, C> Identifier<V, C>
where
    V: ImageClassifier + Sync,
    C: TextCompletion + Sync,
{
    pub fn new(
        classifier: V,
        completion: C,
        settings: IdentificationSettings,
    ) -> Self {
        Self {
            classifier,
            completion,
            settings,
        }
    }

    /// Never fails: upstream errors come back as `mode = error`.
    pub async fn identify(
        &self,
        image: Bytes,
        language: Language,
    ) -> IdentificationResult {
        let classes = with_timeout(
            self.settings.timeout(),
            self.classifier.classify_image(image),
        )
        .await;
        let classes = match classes {
            Ok(classes) => classes,
            Err(e) => {
                error!(task = "classify image", error = format!("{:#}", e));
                return failed(language);
            }
        };

        let ranked = rank(classes);
        info!(
            task = "classify image",
            best_label = ranked.best_label.as_str(),
            best_score = ranked.best_score,
            tags = ranked.tags.len(),
        );

        if ranked.best_score >= self.settings.good_threshold
            && !is_generic_label(&ranked.best_label)
        {
            return confident(ranked, language);
        }

        if ranked.best_score >= self.settings.min_threshold
            && !ranked.tags.is_empty()
        {
            return self.escalate(ranked, language).await;
        }

        not_recognized(ranked, language)
    }

    async fn escalate(
        &self,
        ranked: Ranked,
        language: Language,
    ) -> IdentificationResult {
        let (system, user) = guess_prompt(&ranked.tags, language);

        let text = with_timeout(
            self.settings.timeout(),
            self.completion.complete_text(
                &system,
                &user,
                self.settings.max_tokens,
                self.settings.temperature,
            ),
        )
        .await;
        let text = match text {
            Ok(text) => text,
            Err(e) => {
                error!(task = "guess object", error = format!("{:#}", e));
                return failed(language);
            }
        };

        let guess = match parse_json_from_completion(&text) {
            Ok(raw) => Guess::read(&raw),
            Err(e) => {
                error!(task = "guess object", error = e.to_string());
                return failed(language);
            }
        };
        let Guess {
            can_guess,
            title,
            description,
            confidence,
        } = guess;

        info!(
            task = "guess object",
            can_guess = can_guess,
            title = title.as_deref().unwrap_or_default(),
        );

        match title {
            Some(title) if can_guess => IdentificationResult {
                success: true,
                recognized: true,
                mode: IdentificationMode::VisionGpt,
                title,
                description: description
                    .unwrap_or_else(|| describe_tags(&ranked.tags, language)),
                confidence: clamp_confidence(
                    confidence.unwrap_or(ranked.best_score),
                ),
                raw_tags: ranked.tags,
            },
            _ => {
                let messages = &profile(language).messages;
                let description = match description {
                    Some(hint) => format!("{}: {}", messages.possibly, hint),
                    None => messages.not_recognized.to_string(),
                };
                IdentificationResult {
                    success: true,
                    recognized: false,
                    mode: IdentificationMode::Unknown,
                    title: messages.not_recognized_title.to_string(),
                    description,
                    confidence: clamp_confidence(ranked.best_score),
                    raw_tags: ranked.tags,
                }
            }
        }
    }
}

fn describe_tags(tags: &[String], language: Language) -> String {
    format!(
        "{}: {}.",
        profile(language).messages.looks_like,
        tags.iter()
            .take(DESCRIPTION_TAGS)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    )
}

fn confident(ranked: Ranked, language: Language) -> IdentificationResult {
    IdentificationResult {
        success: true,
        recognized: true,
        mode: IdentificationMode::Vision,
        description: describe_tags(&ranked.tags, language),
        title: ranked.best_label,
        confidence: clamp_confidence(ranked.best_score),
        raw_tags: ranked.tags,
    }
}

fn not_recognized(ranked: Ranked, language: Language) -> IdentificationResult {
    let messages = &profile(language).messages;

    IdentificationResult {
        success: true,
        recognized: false,
        mode: IdentificationMode::Unknown,
        title: messages.not_recognized_title.to_string(),
        description: messages.not_recognized.to_string(),
        confidence: clamp_confidence(ranked.best_score),
        raw_tags: ranked.tags,
    }
}

fn failed(language: Language) -> IdentificationResult {
    let messages = &profile(language).messages;

    IdentificationResult {
        success: false,
        recognized: false,
        mode: IdentificationMode::Error,
        title: messages.identify_failed_title.to_string(),
        description: messages.identify_failed.to_string(),
        confidence: 0.0,
        raw_tags: vec![],
    }
}
