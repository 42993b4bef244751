mod openai;
mod traits;

pub use openai::ChatGptClient;
pub use traits::{ChatCompletion, ChatError, PERSONA_PROMPT};

use crate::config::ChatConfig;

/// 根据配置创建对话补全服务
pub fn create_chat_service(config: &ChatConfig) -> Result<Box<dyn ChatCompletion>, ChatError> {
    if config.api_key.is_empty() {
        return Err(ChatError::Config("Completion API key missing".to_string()));
    }
    Ok(Box::new(ChatGptClient::new(
        config.api_key.clone(),
        config.model.clone(),
        config.endpoint.clone(),
    )))
}
