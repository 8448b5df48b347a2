use anyhow::Context;
use tracing::debug;

use crate::models::Models;

use super::{
    ImageClassification, ImageClassificationRequest,
    ImageClassificationResponse, RESNET_50,
};

impl ImageClassification for Models {
    async fn resnet_50(
        &self,
        request: ImageClassificationRequest,
    ) -> anyhow::Result<ImageClassificationResponse> {
        debug!(model = RESNET_50, bytes = request.image.len());

        let text = self
            .string_response(request, RESNET_50, "application/octet-stream")
            .await?;

        let response =
            serde_json::from_str(&text).context("failed to parse response")?;

        Ok(response)
    }
}
