use async_trait::async_trait;
use tokio::process::Command;

use super::traits::{SpeechError, SpeechPlayer};
use crate::config::VoiceConfig;

/// Baseline words-per-minute that a rate multiplier of 1.0 maps onto.
const BASE_RATE_WPM: f32 = 180.0;

/// System text-to-speech backend.
///
/// Drives the platform synthesizer as a child process: `say` on macOS,
/// `espeak` elsewhere. The voice, language, pitch and rate are fixed by
/// config; playback is finished when the process exits.
pub struct SystemSpeech {
    voice: VoiceConfig,
}

impl SystemSpeech {
    pub fn new(voice: VoiceConfig) -> Self {
        Self { voice }
    }

    fn build_command(&self, text: &str) -> Command {
        if cfg!(target_os = "macos") {
            let mut cmd = Command::new("say");
            // `say` wants a short voice name, not the full bundle identifier.
            if let Some(name) = short_voice_name(&self.voice.voice) {
                cmd.arg("-v").arg(name);
            }
            cmd.arg("-r")
                .arg(format!("{:.0}", BASE_RATE_WPM * self.voice.rate));
            cmd.arg(text);
            cmd
        } else {
            let mut cmd = Command::new("espeak");
            if let Some(lang) = self.voice.language.split('-').next() {
                cmd.arg("-v").arg(lang);
            }
            // espeak pitch runs 0-99 around a default of 50.
            cmd.arg("-p")
                .arg(format!("{:.0}", (self.voice.pitch * 50.0).clamp(0.0, 99.0)));
            cmd.arg("-s")
                .arg(format!("{:.0}", BASE_RATE_WPM * self.voice.rate));
            cmd.arg(text);
            cmd
        }
    }
}

/// Extract the voice name from an identifier like
/// `com.apple.ttsbundle.Yelda-compact`.
fn short_voice_name(identifier: &str) -> Option<&str> {
    let last = identifier.rsplit('.').next()?;
    let name = last.split('-').next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[async_trait]
impl SpeechPlayer for SystemSpeech {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        if text.trim().is_empty() {
            return Err(SpeechError::EmptyText);
        }

        tracing::info!("Speaking {} chars", text.len());

        let output = self
            .build_command(text)
            .output()
            .await
            .map_err(|e| SpeechError::Synthesizer(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(SpeechError::Synthesizer(format!(
                "synthesizer exited with {}: {}",
                output.status, stderr
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn voice_name_from_bundle_identifier() {
        assert_eq!(
            short_voice_name("com.apple.ttsbundle.Yelda-compact"),
            Some("Yelda")
        );
        assert_eq!(short_voice_name("Samantha"), Some("Samantha"));
        assert_eq!(short_voice_name(""), None);
    }

    #[tokio::test]
    async fn empty_text_is_rejected() {
        let player = SystemSpeech::new(VoiceConfig::default());
        assert!(matches!(
            player.speak("   ").await,
            Err(SpeechError::EmptyText)
        ));
    }
}
