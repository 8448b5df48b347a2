use anyhow::{ensure, Context};
use bytes::Bytes;
use cloudflare::models::{
    image_classification::{ImageClassification, ImageClassificationRequest},
    text_generation::{Message, TextGeneration, TextGenerationRequest},
    Models,
};

/// Text-generation model behind the planner.
pub trait TextCompletion {
    /// Fails when the service errors or the completion text is blank.
    fn complete_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> impl std::future::Future<Output = anyhow::Result<String>> + Send;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
}

/// Image classifier behind the identification pipeline.
pub trait ImageClassifier {
    /// Ranked classes, not necessarily sorted.
    fn classify_image(
        &self,
        image: Bytes,
    ) -> impl std::future::Future<Output = anyhow::Result<Vec<Classification>>>
           + Send;
}

impl TextCompletion for Models {
    async fn complete_text(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> anyhow::Result<String> {
        let response = self
            .llama_3_1_8b_instruct(TextGenerationRequest {
                messages: vec![
                    Message::system(system_prompt),
                    Message::user(user_prompt),
                ],
                max_tokens: Some(max_tokens),
                temperature: Some(temperature),
            })
            .await?;

        let text = response
            .result
            .response
            .context("completion has no response text")?;
        ensure!(!text.trim().is_empty(), "completion text is empty");

        Ok(text)
    }
}

impl ImageClassifier for Models {
    async fn classify_image(
        &self,
        image: Bytes,
    ) -> anyhow::Result<Vec<Classification>> {
        let response = self
            .resnet_50(ImageClassificationRequest { image })
            .await?;

        Ok(response
            .result
            .into_iter()
            .map(|class| Classification {
                label: class.label,
                confidence: class.score,
            })
            .collect())
    }
}
