use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

/// 对话补全服务 trait
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    /// One stateless turn: the fixed persona plus a single user message.
    /// No history is carried between calls.
    async fn complete(&self, text: &str) -> Result<String, ChatError>;
}

/// Niz 的固定人设提示词。回复语言固定为土耳其语，与输入语言无关。
pub const PERSONA_PROMPT: &str = "You are Niz, a friendly AI assistant who responds naturally and referes to yourself as Niz when asked for your name. You are a helpful assistant who can answer questions and help with tasks. You must always respond in Turkish, no matter the input language, and provide helpful, clear answers.";
