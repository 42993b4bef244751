use async_trait::async_trait;
use reqwest::{multipart, Client};
use serde::Deserialize;

use super::traits::{SttError, Transcriber};
use crate::audio::AudioClip;

/// OpenAI Whisper 语音识别客户端
pub struct WhisperClient {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl WhisperClient {
    pub fn new(api_key: String, model: String, endpoint: String) -> Self {
        Self {
            api_key,
            model,
            endpoint,
            client: Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct WhisperResponse {
    text: String,
}

#[derive(Deserialize)]
struct WhisperError {
    error: WhisperErrorDetail,
}

#[derive(Deserialize)]
struct WhisperErrorDetail {
    message: String,
}

#[async_trait]
impl Transcriber for WhisperClient {
    async fn transcribe(&self, clip: &AudioClip) -> Result<String, SttError> {
        let file_part = multipart::Part::bytes(clip.wav.clone())
            .file_name("recording.wav")
            .mime_str("audio/wav")
            .map_err(|e| SttError::Api(e.to_string()))?;

        let form = multipart::Form::new()
            .part("file", file_part)
            .text("model", self.model.clone());

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SttError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SttError::Network(e.to_string()))?;

        if !status.is_success() {
            if let Ok(error) = serde_json::from_str::<WhisperError>(&body) {
                return Err(SttError::Api(error.error.message));
            }
            return Err(SttError::Api(format!("HTTP {}: {}", status, body)));
        }

        let result: WhisperResponse =
            serde_json::from_str(&body).map_err(|e| SttError::Api(e.to_string()))?;

        tracing::info!(
            "Transcribed {:.1}s of audio into {} chars",
            clip.duration_secs,
            result.text.len()
        );

        Ok(result.text)
    }
}
