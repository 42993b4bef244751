use std::sync::Mutex;

use tokio::sync::Mutex as TokioMutex;

use super::state::{Alert, ConversationSnapshot, ConversationState};
use super::PipelineError;
use crate::audio::{CaptureDevice, MicCapture};
use crate::config::AppConfig;
use crate::llm::{create_chat_service, ChatCompletion};
use crate::speech::{create_speech_player, SpeechPlayer};
use crate::stt::{create_transcriber, Transcriber};

/// Mutable conversation state. Held behind a short-lived lock; never
/// locked across an await.
struct Inner {
    state: ConversationState,
    text: String,
    transcript: Option<String>,
    reply: Option<String>,
    alert: Option<Alert>,
    generation: u64,
}

impl Inner {
    fn new() -> Self {
        Self {
            state: ConversationState::Idle,
            text: String::new(),
            transcript: None,
            reply: None,
            alert: None,
            generation: 0,
        }
    }
}

/// 会话状态机
///
/// Drives the recording → transcription → completion → speech sequence and
/// owns the one place UI state may change. All remote calls are awaited in
/// strict order on the caller's task; nothing here runs concurrently with
/// itself. A reset while a call is in flight does not abort the request,
/// it bumps the generation counter so the late result is dropped instead
/// of being rendered.
pub struct ConversationController {
    capture: TokioMutex<Box<dyn CaptureDevice>>,
    transcriber: Box<dyn Transcriber>,
    chat: Box<dyn ChatCompletion>,
    speech: Box<dyn SpeechPlayer>,
    inner: Mutex<Inner>,
}

impl ConversationController {
    /// Build a controller over the real services described by the config.
    pub fn new(config: &AppConfig) -> Result<Self, PipelineError> {
        let transcriber = create_transcriber(&config.stt)?;
        let chat = create_chat_service(&config.chat)?;
        let speech = create_speech_player(&config.voice);

        Ok(Self::with_services(
            Box::new(MicCapture::new()),
            transcriber,
            chat,
            speech,
        ))
    }

    /// Build a controller over explicit service implementations.
    pub fn with_services(
        capture: Box<dyn CaptureDevice>,
        transcriber: Box<dyn Transcriber>,
        chat: Box<dyn ChatCompletion>,
        speech: Box<dyn SpeechPlayer>,
    ) -> Self {
        Self {
            capture: TokioMutex::new(capture),
            transcriber,
            chat,
            speech,
            inner: Mutex::new(Inner::new()),
        }
    }

    /// Transition 1: Idle → Recording.
    ///
    /// A denied permission or a recorder that cannot initialize surfaces an
    /// alert and leaves the state untouched.
    pub async fn start_recording(&self) {
        let generation = {
            let Ok(inner) = self.inner.lock() else { return };
            if inner.state != ConversationState::Idle {
                return;
            }
            inner.generation
        };

        let granted = self.capture.lock().await.request_permission().await;
        if !granted {
            self.set_alert(Alert::new(
                "Permission required",
                "Please allow microphone permission to continue.",
            ));
            return;
        }

        let started = self.capture.lock().await.start();
        if let Err(e) = started {
            tracing::error!("Failed to start recording: {}", e);
            self.set_alert(Alert::new("Error", "Failed to start recording."));
            return;
        }

        let entered = self.if_current(generation, |inner| {
            if inner.state == ConversationState::Idle {
                inner.state = ConversationState::Recording;
            }
        });

        // Reset raced the permission dialog; release the session again.
        if entered.is_none() {
            self.capture.lock().await.stop().ok();
        }
    }

    /// Transitions 2-4: Recording → Loading → Speaking → ReplyReady.
    ///
    /// Stops the capture session, then runs transcription, completion and
    /// speech strictly in sequence, each step feeding the next. Any failure
    /// halts the pipeline at that step with an alert; nothing is retried.
    pub async fn stop_and_respond(&self) {
        let generation = {
            let Ok(mut inner) = self.inner.lock() else { return };
            if inner.state != ConversationState::Recording {
                return;
            }
            inner.state = ConversationState::Loading;
            inner.generation
        };

        // Recording handle is cleared here; a second stop finds nothing.
        let clip = match self.capture.lock().await.stop() {
            Ok(clip) => clip,
            Err(e) => {
                tracing::error!("Failed to stop recording: {}", e);
                self.set_alert(Alert::new("Error", "Failed to stop recording."));
                self.if_current(generation, |inner| {
                    inner.state = ConversationState::Idle;
                });
                return;
            }
        };

        let transcript = match self.transcriber.transcribe(&clip).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Transcription failed: {}", e);
                self.set_alert(Alert::new("Error", "Failed to transcribe recording."));
                self.if_current(generation, |inner| {
                    inner.state = ConversationState::Idle;
                });
                return;
            }
        };

        if transcript.trim().is_empty() {
            tracing::warn!("Transcription returned no text");
            self.if_current(generation, |inner| {
                inner.state = ConversationState::Idle;
            });
            return;
        }

        let stored = self.if_current(generation, |inner| {
            inner.transcript = Some(transcript.clone());
            inner.text = transcript.clone();
        });
        if stored.is_none() {
            return; // stale: reset happened mid-flight
        }

        self.complete_and_speak(generation, &transcript).await;
    }

    /// Transition 5: ReplyReady → Loading, re-running completion on the
    /// stored transcript. Transcription is never re-invoked.
    pub async fn regenerate(&self) {
        let (generation, transcript) = {
            let Ok(mut inner) = self.inner.lock() else { return };
            if inner.state != ConversationState::ReplyReady {
                return;
            }
            let Some(transcript) = inner.transcript.clone() else {
                return;
            };
            inner.state = ConversationState::Loading;
            (inner.generation, transcript)
        };

        self.complete_and_speak(generation, &transcript).await;
    }

    /// Transition 6: ReplyReady → Speaking, re-using the stored reply.
    /// No remote service is touched.
    pub async fn replay(&self) {
        let (generation, reply) = {
            let Ok(mut inner) = self.inner.lock() else { return };
            if inner.state != ConversationState::ReplyReady {
                return;
            }
            let Some(reply) = inner.reply.clone() else { return };
            inner.state = ConversationState::Speaking;
            (inner.generation, reply)
        };

        self.speak_reply(generation, &reply).await;
    }

    /// Transition 7: any state → Idle.
    ///
    /// Clears the displayed text and stored turn data and bumps the
    /// generation counter. A live microphone session is stopped and its
    /// audio discarded; in-flight network requests are not aborted, their
    /// results arrive tagged with a stale generation and are dropped.
    pub async fn reset(&self) {
        let was_recording = {
            let Ok(mut inner) = self.inner.lock() else { return };
            let was_recording = inner.state == ConversationState::Recording;
            inner.state = ConversationState::Idle;
            inner.text.clear();
            inner.transcript = None;
            inner.reply = None;
            inner.alert = None;
            inner.generation += 1;
            tracing::debug!("Conversation reset, generation {}", inner.generation);
            was_recording
        };

        // The mic is single-owner; an abandoned session must not leak
        // into the next turn's clip.
        if was_recording {
            self.capture.lock().await.stop().ok();
        }
    }

    /// Current state and displayed text, for rendering.
    pub fn snapshot(&self) -> ConversationSnapshot {
        let inner = match self.inner.lock() {
            Ok(inner) => inner,
            Err(poisoned) => poisoned.into_inner(),
        };
        ConversationSnapshot {
            state: inner.state,
            text: inner.text.clone(),
        }
    }

    /// Take the pending modal alert, if any.
    pub fn take_alert(&self) -> Option<Alert> {
        self.inner.lock().ok().and_then(|mut inner| inner.alert.take())
    }

    /// Shared tail of transitions 2 and 5: completion, then speech.
    async fn complete_and_speak(&self, generation: u64, transcript: &str) {
        let reply = match self.chat.complete(transcript).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::error!("Completion failed: {}", e);
                self.set_alert(Alert::new("Error", "Failed to get a reply."));
                self.if_current(generation, |inner| {
                    // Keep the reply screen if an earlier turn produced one.
                    inner.state = if inner.reply.is_some() {
                        ConversationState::ReplyReady
                    } else {
                        ConversationState::Idle
                    };
                });
                return;
            }
        };

        let stored = self.if_current(generation, |inner| {
            inner.reply = Some(reply.clone());
            inner.text = reply.clone();
            inner.state = ConversationState::Speaking;
        });
        if stored.is_none() {
            return;
        }

        self.speak_reply(generation, &reply).await;
    }

    async fn speak_reply(&self, generation: u64, reply: &str) {
        if let Err(e) = self.speech.speak(reply).await {
            tracing::error!("Speech synthesis failed: {}", e);
        }

        // The reply stays on screen whether or not playback succeeded.
        self.if_current(generation, |inner| {
            inner.state = ConversationState::ReplyReady;
        });
    }

    fn set_alert(&self, alert: Alert) {
        if let Ok(mut inner) = self.inner.lock() {
            inner.alert = Some(alert);
        }
    }

    /// Apply a state mutation only if no reset happened since `generation`
    /// was read. Returns `None` when the result was stale and dropped.
    fn if_current<T>(&self, generation: u64, f: impl FnOnce(&mut Inner) -> T) -> Option<T> {
        let Ok(mut inner) = self.inner.lock() else {
            return None;
        };
        if inner.generation != generation {
            tracing::debug!("Dropping stale result from generation {}", generation);
            return None;
        }
        Some(f(&mut inner))
    }
}
