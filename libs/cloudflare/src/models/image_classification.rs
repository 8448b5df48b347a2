pub mod implementation;

use bytes::Bytes;
use reqwest::Body;
use serde::Deserialize;

static RESNET_50: &str = "@cf/microsoft/resnet-50";

pub trait ImageClassification {
    fn resnet_50(
        &self,
        request: ImageClassificationRequest,
    ) -> impl std::future::Future<
        Output = anyhow::Result<ImageClassificationResponse>,
    > + Send;
}

/// Raw encoded image (jpeg, png, ...), sent as the binary request body.
#[derive(Debug, Clone)]
pub struct ImageClassificationRequest {
    pub image: Bytes,
}

#[derive(Debug, Deserialize)]
pub struct ImageClassificationResponse {
    #[serde(default)]
    pub result: Vec<ImageClassificationResult>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ImageClassificationResult {
    pub label: String,
    pub score: f32,
}

impl From<ImageClassificationRequest> for Body {
    fn from(val: ImageClassificationRequest) -> Self {
        Body::from(val.image)
    }
}
