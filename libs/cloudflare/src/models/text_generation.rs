pub mod implementation;

use reqwest::Body;
use serde::{Deserialize, Serialize};

static LLAMA_3_1_8B_INSTRUCT: &str = "@cf/meta/llama-3.1-8b-instruct";

pub trait TextGeneration {
    fn llama_3_1_8b_instruct(
        &self,
        request: TextGenerationRequest,
    ) -> impl std::future::Future<Output = anyhow::Result<TextGenerationResponse>>
           + Send;
}

/// Chat-style request: a system and a user message.
#[derive(Debug, Serialize, Default)]
pub struct TextGenerationRequest {
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TextGenerationResponse {
    pub result: TextGenerationJsonResult,
}

#[derive(Debug, Deserialize)]
pub struct TextGenerationJsonResult {
    // Absent when the model produced nothing.
    #[serde(default)]
    pub response: Option<String>,
}

impl From<TextGenerationRequest> for Body {
    fn from(val: TextGenerationRequest) -> Self {
        // Plain structs of strings and numbers always serialize.
        let body = serde_json::to_string(&val).unwrap_or_default();
        Body::from(body)
    }
}
