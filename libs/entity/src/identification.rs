use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Default, PartialEq, Eq, Clone, Copy, Serialize, Deserialize, ToSchema,
)]
pub enum IdentificationMode {
    /// Classifier alone was confident enough.
    #[serde(rename = "vision")]
    Vision,
    /// Classifier tags were resolved by the language model.
    #[serde(rename = "vision+gpt")]
    VisionGpt,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Default, PartialEq, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdentificationResult {
    pub success: bool,
    pub recognized: bool,
    pub mode: IdentificationMode,
    pub title: String,
    pub description: String,
    pub confidence: f32,
    pub raw_tags: Vec<String>,
}

#[cfg(test)]
mod test {
    use super::{IdentificationMode, IdentificationResult};

    #[test]
    fn test_serialize_mode() {
        // Arrange
        let result = IdentificationResult {
            success: true,
            recognized: true,
            mode: IdentificationMode::VisionGpt,
            title: "Bronze Horseman".to_string(),
            raw_tags: vec!["statue".to_string()],
            ..Default::default()
        };

        // Act
        let json = serde_json::to_value(&result).unwrap();

        // Assert
        assert_eq!(json["mode"], "vision+gpt");
        assert_eq!(json["rawTags"][0], "statue");
    }
}
