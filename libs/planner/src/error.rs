use entity::prelude::Language;

use crate::language::profile;

/// Terminal failures of a generation or refine call. None of them are
/// retried inside the planner.
#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    /// Bad caller input; the message is already localized.
    #[error("validation error: {0}")]
    Validation(String),
    #[error("upstream error: {0:#}")]
    Upstream(anyhow::Error),
    #[error("could not parse completion: {snippet}")]
    Parse { snippet: String },
    #[error("completion contained no days")]
    EmptyItinerary,
}

impl PlannerError {
    /// Text safe to show the user. Upstream details stay in the logs.
    pub fn user_message(&self, language: Language) -> String {
        let messages = &profile(language).messages;

        match self {
            PlannerError::Validation(message) => message.clone(),
            PlannerError::Upstream(_) => messages.upstream_failed.to_string(),
            PlannerError::Parse { .. } => messages.parse_failed.to_string(),
            PlannerError::EmptyItinerary => {
                messages.empty_itinerary.to_string()
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, PlannerError::Validation(_))
    }
}

#[cfg(test)]
mod test {
    use anyhow::anyhow;
    use entity::prelude::Language;

    use super::PlannerError;

    #[test]
    fn test_user_message_hides_upstream_detail() {
        // Arrange
        let error = PlannerError::Upstream(anyhow!("status code: 401"));

        // Act
        let message = error.user_message(Language::En);

        // Assert
        assert!(!message.contains("401"));
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_validation_is_verbatim() {
        let error = PlannerError::Validation("City is required".to_string());

        assert_eq!(error.user_message(Language::Zh), "City is required");
        assert!(error.is_client_error());
    }
}
