//! First-run onboarding: intro carousel paging plus the persisted
//! "seen it" flag that gates entry into the conversation screen.
//!
//! The flag has exactly two operations, set and check. It is never
//! cleared; once onboarding completes it stays completed.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use crate::config::ConfigError;

/// One slide of the intro carousel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnboardingPage {
    pub title: &'static str,
    pub subtitle: &'static str,
}

pub const ONBOARDING_PAGES: &[OnboardingPage] = &[
    OnboardingPage {
        title: "Meet Niz",
        subtitle: "Your friendly voice assistant, always ready to help.",
    },
    OnboardingPage {
        title: "Just talk",
        subtitle: "Press the microphone, ask anything, and hear the answer spoken back.",
    },
    OnboardingPage {
        title: "Replay or regenerate",
        subtitle: "Not happy with the reply? Ask again or listen once more.",
    },
];

/// Result of pressing Skip/Next on a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the slide at this index
    Moved(usize),
    /// Past the last slide; onboarding is done
    Completed,
}

/// Paging state of the intro carousel.
#[derive(Debug, Default)]
pub struct OnboardingFlow {
    active_index: usize,
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn page(&self) -> OnboardingPage {
        ONBOARDING_PAGES[self.active_index]
    }

    /// The Skip/Next button: advance one slide, or report completion past
    /// the last one.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let next = self.active_index + 1;
        if next < ONBOARDING_PAGES.len() {
            self.active_index = next;
            AdvanceOutcome::Moved(next)
        } else {
            AdvanceOutcome::Completed
        }
    }

    /// Swipe paging: jump straight to a slide.
    pub fn select(&mut self, index: usize) {
        if index < ONBOARDING_PAGES.len() {
            self.active_index = index;
        }
    }
}

const ONBOARDING_KEY: &str = "onboarding";

/// Persisted key-value store holding the onboarding flag.
pub struct OnboardingStore {
    dir: PathBuf,
}

impl OnboardingStore {
    /// Store under the app config directory.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            dir: crate::config::storage::default_app_dir()?,
        })
    }

    /// Store under an explicit directory.
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn state_path(&self) -> PathBuf {
        self.dir.join("state.json")
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        let path = self.state_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Read once at app entry to decide routing.
    pub fn is_complete(&self) -> Result<bool, ConfigError> {
        let entries = self.read_entries()?;
        Ok(entries.get(ONBOARDING_KEY).map(String::as_str) == Some("true"))
    }

    /// Set once, when the user finishes the last slide.
    pub fn mark_complete(&self) -> Result<(), ConfigError> {
        let mut entries = self.read_entries()?;
        entries.insert(ONBOARDING_KEY.to_string(), "true".to_string());

        fs::create_dir_all(&self.dir)?;
        let content = serde_json::to_string_pretty(&entries)?;
        fs::write(self.state_path(), content)?;
        tracing::info!("Onboarding marked complete");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_walks_pages_then_completes() {
        let mut flow = OnboardingFlow::new();
        assert_eq!(flow.active_index(), 0);
        assert_eq!(flow.advance(), AdvanceOutcome::Moved(1));
        assert_eq!(flow.advance(), AdvanceOutcome::Moved(2));
        assert_eq!(flow.advance(), AdvanceOutcome::Completed);
        // Still on the last page after completion is reported.
        assert_eq!(flow.active_index(), ONBOARDING_PAGES.len() - 1);
    }

    #[test]
    fn select_ignores_out_of_range() {
        let mut flow = OnboardingFlow::new();
        flow.select(2);
        assert_eq!(flow.active_index(), 2);
        flow.select(99);
        assert_eq!(flow.active_index(), 2);
    }

    #[test]
    fn flag_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = OnboardingStore::with_dir(dir.path());

        assert!(!store.is_complete().unwrap());
        store.mark_complete().unwrap();
        assert!(store.is_complete().unwrap());

        // Marking again is harmless.
        store.mark_complete().unwrap();
        assert!(store.is_complete().unwrap());
    }

    #[test]
    fn foreign_keys_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"theme": "dark"}"#).unwrap();

        let store = OnboardingStore::with_dir(dir.path());
        store.mark_complete().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let entries: BTreeMap<String, String> = serde_json::from_str(&content).unwrap();
        assert_eq!(entries.get("theme").map(String::as_str), Some("dark"));
        assert_eq!(entries.get("onboarding").map(String::as_str), Some("true"));
    }
}
