use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::error::AppError;
use crate::tts::{AudioFormat, ProviderVoice, SpeechProvider, SynthesisRequest, SynthesisResult};

/// Provider reached over HTTP: `POST /synthesize` returns raw audio,
/// `GET /voices` returns the voice list.
pub struct HttpProvider {
    client: Client,
    base_url: String,
    format: AudioFormat,
}

#[derive(Serialize)]
struct SynthesizeBody<'a> {
    #[serde(flatten)]
    request: &'a SynthesisRequest,
    format: &'static str,
}

impl HttpProvider {
    pub fn new(
        base_url: &str,
        format: AudioFormat,
        timeout: Option<Duration>,
    ) -> Result<Self, AppError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            format,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl SpeechProvider for HttpProvider {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesisResult, AppError> {
        let url = format!("{}/synthesize", self.base_url);
        tracing::debug!("POST {} voice={}", url, request.voice);

        let response = self
            .client
            .post(&url)
            .json(&SynthesizeBody {
                request,
                format: self.format.extension(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::SynthesisFailed(format!(
                "Provider returned {}: {}",
                status,
                body.trim()
            )));
        }

        let audio = response.bytes().await?.to_vec();
        if audio.is_empty() {
            return Err(AppError::SynthesisFailed(
                "Provider returned no audio".into(),
            ));
        }

        Ok(SynthesisResult {
            audio,
            format: self.format,
        })
    }

    async fn list_voices(&self) -> Result<Vec<ProviderVoice>, AppError> {
        let url = format!("{}/voices", self.base_url);
        let response = self.client.get(&url).send().await?.error_for_status()?;
        let voices = response.json::<Vec<ProviderVoice>>().await?;
        Ok(voices)
    }
}
