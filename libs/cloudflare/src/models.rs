use std::time::Duration;

use anyhow::{ensure, Context};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Body, Client,
};

pub mod image_classification;
pub mod text_generation;

pub static DEFAULT_BASE_URL: &str = "https://api.cloudflare.com";

/// Workers AI REST client. One method per hosted model lives on the
/// per-task traits.
#[derive(Debug, Clone)]
pub struct Models {
    base_url: String,
    client: Client,
}

impl Models {
    pub fn new(
        account_id: &str,
        token: &str,
        base_url: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let base_url = format!(
            "{}/client/v4/accounts/{}/ai/run",
            base_url.trim_end_matches('/'),
            account_id
        );
        let mut headers = HeaderMap::new();
        headers.insert("Accept", HeaderValue::from_static("*/*"));
        headers.insert(
            "Authorization",
            HeaderValue::from_str(format!("Bearer {}", token).as_str())
                .context("token is not a valid header value")?,
        );

        let client = reqwest::ClientBuilder::new()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .context("failed to build http client")?;

        Ok(Self { base_url, client })
    }

    pub fn endpoint(&self, model: &str) -> String {
        format!("{}/{}", self.base_url, model)
    }

    async fn string_response<R: Into<Body>>(
        &self,
        request: R,
        model: &str,
        content_type: &str,
    ) -> anyhow::Result<String> {
        let response = self
            .client
            .post(self.endpoint(model))
            .header("Content-Type", content_type)
            .body(request)
            .send()
            .await
            .with_context(|| format!("failed to call {}", model))?;

        let status_code = response.status();
        let text = response.text().await;

        ensure!(
            status_code.is_success(),
            "status code: {}, response: {:?}",
            status_code,
            text
        );

        Ok(text?)
    }
}
