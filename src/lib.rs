pub mod audio;
pub mod config;
pub mod conversation;
pub mod llm;
pub mod onboarding;
pub mod permissions;
pub mod speech;
pub mod stt;

pub use audio::{encode_to_wav, AudioClip, AudioError, AudioRecorder, CaptureDevice, MicCapture};
pub use config::{load_config, save_config, AppConfig, ConfigError, ConfigStore};
pub use conversation::{
    Alert, ConversationController, ConversationSnapshot, ConversationState, PipelineError,
};
pub use llm::{create_chat_service, ChatCompletion, ChatError, ChatGptClient, PERSONA_PROMPT};
pub use onboarding::{AdvanceOutcome, OnboardingFlow, OnboardingStore, ONBOARDING_PAGES};
pub use speech::{create_speech_player, SpeechError, SpeechPlayer, SystemSpeech};
pub use stt::{create_transcriber, SttError, Transcriber, WhisperClient};
