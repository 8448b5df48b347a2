use anyhow::Context;
use tracing::debug;

use crate::models::{text_generation::LLAMA_3_1_8B_INSTRUCT, Models};

use super::{TextGeneration, TextGenerationRequest, TextGenerationResponse};

impl TextGeneration for Models {
    async fn llama_3_1_8b_instruct(
        &self,
        request: TextGenerationRequest,
    ) -> anyhow::Result<TextGenerationResponse> {
        let text = self
            .string_response(request, LLAMA_3_1_8B_INSTRUCT, "application/json")
            .await?;

        debug!(model = LLAMA_3_1_8B_INSTRUCT, length = text.len());

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }
}
