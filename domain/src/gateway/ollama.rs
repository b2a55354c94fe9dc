use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use log::*;
use serde::{Deserialize, Serialize};
use service::config::Config;
use std::time::Duration;

/// HTTP client for a local Ollama server.
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.ollama_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.ollama_url().to_owned(),
            model: config.ollama_model().to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends `prompt` for a single, non-streamed completion and returns the model's text.
    pub async fn generate(&self, prompt: &str) -> Result<String, Error> {
        let url = format!("{}/api/generate", self.base_url);
        debug!("Sending {} byte prompt to {url} ({})", prompt.len(), self.model);

        let response = self
            .client
            .post(&url)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await
            .map_err(|err| {
                warn!("Failed to reach Ollama at {url}: {err}");
                Error::from(err)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("Ollama returned status {status}: {body}");
            return Err(Error::new(DomainErrorKind::External(ExternalErrorKind::Other(
                format!("ollama returned status {}: {body}", status.as_u16()),
            ))));
        }

        let generated: GenerateResponse = response.json().await?;
        Ok(generated.response)
    }

    /// Succeeds when the server lists its models.
    pub async fn health_check(&self) -> Result<(), Error> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Error::new(DomainErrorKind::External(ExternalErrorKind::Other(
                format!("ollama health check failed with status {}", status.as_u16()),
            ))))
        }
    }
}
