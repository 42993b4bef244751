use async_trait::async_trait;

use super::{AudioClip, AudioError, AudioRecorder};
use crate::permissions;

/// Microphone capture seam for the conversation pipeline.
///
/// The pipeline only ever needs three things from the device: a permission
/// answer, a running session, and a finalized clip. Keeping this behind a
/// trait lets the state machine be driven without audio hardware.
#[async_trait]
pub trait CaptureDevice: Send {
    /// Ask the platform for microphone access. `false` means denied.
    async fn request_permission(&self) -> bool;

    /// Begin a capture session. No-op if one is already active.
    fn start(&mut self) -> Result<(), AudioError>;

    /// Finalize the active session and return the captured clip.
    ///
    /// The session handle is cleared regardless of outcome, so a second
    /// stop reports `NotRecording` instead of producing a second asset.
    fn stop(&mut self) -> Result<AudioClip, AudioError>;
}

/// Real microphone capture over the cpal recorder.
pub struct MicCapture {
    recorder: AudioRecorder,
    active: bool,
}

impl MicCapture {
    pub fn new() -> Self {
        Self {
            recorder: AudioRecorder::new(),
            active: false,
        }
    }
}

impl Default for MicCapture {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CaptureDevice for MicCapture {
    async fn request_permission(&self) -> bool {
        permissions::request_microphone().await
    }

    fn start(&mut self) -> Result<(), AudioError> {
        if self.active {
            return Ok(());
        }
        self.recorder.start()?;
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<AudioClip, AudioError> {
        if !self.active {
            return Err(AudioError::NotRecording);
        }
        self.active = false;

        let samples = self.recorder.stop()?;
        if samples.is_empty() {
            return Err(AudioError::EmptyRecording);
        }

        AudioClip::from_samples(&samples, self.recorder.sample_rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_without_start_reports_no_session() {
        let mut capture = MicCapture::new();
        assert!(matches!(capture.stop(), Err(AudioError::NotRecording)));
        // Still no session; a second stop behaves the same.
        assert!(matches!(capture.stop(), Err(AudioError::NotRecording)));
    }
}
