use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::lenient::Code;

/// Output language of generated content and user-facing copy.
///
/// Unknown or missing codes resolve to [`Language::Ru`].
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
    strum::EnumIter,
)]
#[serde(from = "Code", into = "String")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Language {
    #[default]
    Ru,
    En,
    Zh,
}

impl Language {
    pub fn from_code(code: &str) -> Self {
        code.trim().parse().unwrap_or_default()
    }
}

impl From<Code> for Language {
    fn from(value: Code) -> Self {
        value.as_str().map(Language::from_code).unwrap_or_default()
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod test {
    use super::Language;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code(" ZH "), Language::Zh);
        assert_eq!(Language::from_code("de"), Language::Ru);
        assert_eq!(Language::from_code(""), Language::Ru);
    }

    #[test]
    fn test_deserialize_falls_back_to_ru() {
        // Arrange
        let text = r#"[null, "fr", 5, "en"]"#;

        // Act
        let languages = serde_json::from_str::<Vec<Language>>(text).unwrap();

        // Assert
        assert_eq!(languages, vec![Language::Ru, Language::Ru, Language::Ru, Language::En]);
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&Language::Zh).unwrap();

        assert_eq!(json, r#""zh""#);
    }
}
