//! Achievement reporting
//!
//! Gameplay emits [`AchievementUnlocked`] on the event hub. The relay
//! forwards each unlock to a platform backend and logs failures.

use std::cell::RefCell;
use std::rc::Rc;

use thiserror::Error;

use crate::events::{listener, AchievementUnlocked, Events, Listener};

/// Backend errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AchievementError {
    /// Backend is not connected
    #[error("Achievement backend unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected the id
    #[error("Unknown achievement: {0}")]
    UnknownId(String),
}

/// Platform achievement service
pub trait AchievementBackend {
    /// Unlock `id`. Unlocking twice is not an error.
    fn unlock(&mut self, id: &str) -> Result<(), AchievementError>;
}

/// Forwards unlock events to a backend
pub struct AchievementRelay;

impl AchievementRelay {
    /// Subscribe `backend` to the achievement channel
    pub fn attach(backend: Rc<RefCell<dyn AchievementBackend>>, events: &Events) -> Listener<AchievementUnlocked> {
        let relay = listener(move |event: &AchievementUnlocked| {
            match backend.borrow_mut().unlock(&event.id) {
                Ok(()) => log::info!("Achievement unlocked: {}", event.id),
                Err(e) => log::warn!("Failed to unlock achievement '{}': {}", event.id, e),
            }
        });
        events.achievement_unlocked.subscribe(Rc::clone(&relay));
        relay
    }
}

/// In-memory backend that records unlock order
#[derive(Debug, Default)]
pub struct RecordingAchievements {
    unlocked: Vec<String>,
    known: Option<Vec<String>>,
}

impl RecordingAchievements {
    /// Accept any id
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept only the listed ids
    pub fn with_known<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            unlocked: Vec::new(),
            known: Some(ids.into_iter().map(Into::into).collect()),
        }
    }

    /// Ids unlocked so far, first unlock first
    pub fn unlocked(&self) -> &[String] {
        &self.unlocked
    }

    /// Whether `id` has been unlocked
    pub fn is_unlocked(&self, id: &str) -> bool {
        self.unlocked.iter().any(|u| u == id)
    }
}

impl AchievementBackend for RecordingAchievements {
    fn unlock(&mut self, id: &str) -> Result<(), AchievementError> {
        if let Some(known) = &self.known {
            if !known.iter().any(|k| k == id) {
                return Err(AchievementError::UnknownId(id.to_string()));
            }
        }
        if !self.is_unlocked(id) {
            self.unlocked.push(id.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relay_forwards_unlocks_once() {
        let events = Events::new();
        let backend = Rc::new(RefCell::new(RecordingAchievements::new()));
        AchievementRelay::attach(backend.clone(), &events);

        let unlock = AchievementUnlocked { id: "CREDITS".to_string() };
        events.achievement_unlocked.emit(&unlock);
        events.achievement_unlocked.emit(&unlock);

        assert_eq!(backend.borrow().unlocked(), ["CREDITS".to_string()]);
    }

    #[test]
    fn test_unknown_id_is_reported_not_recorded() {
        let mut backend = RecordingAchievements::with_known(["CREDITS"]);
        assert_eq!(
            backend.unlock("NOPE"),
            Err(AchievementError::UnknownId("NOPE".to_string()))
        );
        assert!(backend.unlock("CREDITS").is_ok());
        assert!(!backend.is_unlocked("NOPE"));
    }

    #[test]
    fn test_relay_survives_backend_errors() {
        let events = Events::new();
        let backend = Rc::new(RefCell::new(RecordingAchievements::with_known(["A"])));
        AchievementRelay::attach(backend.clone(), &events);

        events.achievement_unlocked.emit(&AchievementUnlocked { id: "B".to_string() });
        events.achievement_unlocked.emit(&AchievementUnlocked { id: "A".to_string() });
        assert_eq!(backend.borrow().unlocked(), ["A".to_string()]);
    }
}
