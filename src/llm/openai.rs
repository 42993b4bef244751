use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::traits::{ChatCompletion, ChatError, PERSONA_PROMPT};

/// OpenAI 对话补全客户端
pub struct ChatGptClient {
    api_key: String,
    model: String,
    endpoint: String,
    client: Client,
}

impl ChatGptClient {
    pub fn new(api_key: String, model: String, endpoint: String) -> Self {
        Self {
            api_key,
            model,
            endpoint,
            client: Client::new(),
        }
    }
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Option<Vec<Choice>>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiError {
    message: String,
}

#[async_trait]
impl ChatCompletion for ChatGptClient {
    async fn complete(&self, text: &str) -> Result<String, ChatError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: PERSONA_PROMPT.to_string(),
                },
                Message {
                    role: "user".to_string(),
                    content: text.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ChatError::Network(e.to_string()))?;

        if !status.is_success() {
            return Err(ChatError::Api(format!("HTTP {}: {}", status, body)));
        }

        let result: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ChatError::Api(e.to_string()))?;

        if let Some(error) = result.error {
            return Err(ChatError::Api(error.message));
        }

        result
            .choices
            .and_then(|c| c.into_iter().next().map(|choice| choice.message.content))
            .ok_or_else(|| ChatError::Api("Response contained no choices".to_string()))
    }
}
