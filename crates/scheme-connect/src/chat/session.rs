//! In-memory conversational sessions bounded by an inactivity window.
//!
//! The store exclusively owns every `Session`; callers only observe turn
//! snapshots. Expiry is lazy: each turn sweeps the whole table before the
//! current session is resolved, so there is no background task to manage.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use super::extract::extract_profile;
use super::profile::{ChatTurn, ProfileStatus, Role, UserProfile};
use crate::eligibility::EligibilityProfile;

/// Client-visible failures of the conversational surface.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Invalid session_id format. Must be a valid UUID.")]
    InvalidSessionId,
}

struct Session {
    profile: UserProfile,
    history: Vec<ChatTurn>,
    last_accessed: DateTime<Utc>,
    /// Reserved for a future per-session authorization handshake.
    #[allow(dead_code)]
    session_token: Uuid,
}

impl Session {
    fn new(now: DateTime<Utc>) -> Self {
        Self {
            profile: UserProfile::default(),
            history: Vec::new(),
            last_accessed: now,
            session_token: Uuid::new_v4(),
        }
    }
}

/// Where a turn left the conversation.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnState {
    /// Profile still incomplete; `prompt` was appended as the assistant turn.
    NeedMore { prompt: String },
    /// Profile complete; the caller owns reply generation from here.
    Ready {
        profile: EligibilityProfile,
        history: Vec<ChatTurn>,
    },
}

pub struct SessionStore {
    timeout: Duration,
    sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Session ids must arrive in canonical hyphenated UUID form; anything
    /// else is rejected outright rather than coerced, so callers cannot fix
    /// a session onto an attacker-chosen key.
    pub fn validate_session_id(session_id: &str) -> Result<(), ChatError> {
        if session_id.len() == 36 && Uuid::try_parse(session_id).is_ok() {
            Ok(())
        } else {
            Err(ChatError::InvalidSessionId)
        }
    }

    /// Applies one inbound turn: sweep expired sessions, get-or-create and
    /// touch this one, merge explicit overrides, run extraction once, and
    /// append the user turn. All of it happens under a single lock so
    /// concurrent turns on the same session never interleave partially.
    pub fn begin_turn(
        &self,
        session_id: &str,
        overrides: &UserProfile,
        message: &str,
    ) -> Result<TurnState, ChatError> {
        self.begin_turn_at(session_id, overrides, message, Utc::now())
    }

    fn begin_turn_at(
        &self,
        session_id: &str,
        overrides: &UserProfile,
        message: &str,
        now: DateTime<Utc>,
    ) -> Result<TurnState, ChatError> {
        Self::validate_session_id(session_id)?;

        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        guard.retain(|_, session| now - session.last_accessed <= self.timeout);

        let session = guard
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(now));
        session.last_accessed = now;

        session.profile.merge_overrides(overrides);
        extract_profile(message, &mut session.profile);
        session.history.push(ChatTurn {
            role: Role::User,
            content: message.to_string(),
        });

        match session.profile.status() {
            ProfileStatus::Complete(profile) => Ok(TurnState::Ready {
                profile,
                history: session.history.clone(),
            }),
            ProfileStatus::Missing(prompt) => {
                session.history.push(ChatTurn {
                    role: Role::Assistant,
                    content: prompt.to_string(),
                });
                Ok(TurnState::NeedMore {
                    prompt: prompt.to_string(),
                })
            }
        }
    }

    /// Appends the assistant reply produced after the lock was released.
    /// A session swept in the meantime is simply gone; the reply still
    /// reaches the caller.
    pub fn record_reply(&self, session_id: &str, reply: &str) {
        let mut guard = self.sessions.lock().expect("session mutex poisoned");
        if let Some(session) = guard.get_mut(session_id) {
            session.history.push(ChatTurn {
                role: Role::Assistant,
                content: reply.to_string(),
            });
        }
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.lock().expect("session mutex poisoned").len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::profile::prompts;

    const SESSION_A: &str = "6f9619ff-8b86-4d01-b42d-00cf4fc964ff";
    const SESSION_B: &str = "0b2587d1-7a31-4f63-9d2c-5f0d27b4a001";

    fn store() -> SessionStore {
        SessionStore::new(Duration::minutes(30))
    }

    #[test]
    fn malformed_ids_are_rejected_without_creating_state() {
        let store = store();
        let result = store.begin_turn("not-a-uuid", &UserProfile::default(), "Hello");
        assert!(matches!(result, Err(ChatError::InvalidSessionId)));
        assert_eq!(store.session_count(), 0);
    }

    #[test]
    fn first_turn_asks_for_age() {
        let store = store();
        let state = store
            .begin_turn(SESSION_A, &UserProfile::default(), "Hello")
            .expect("valid turn");
        assert_eq!(
            state,
            TurnState::NeedMore {
                prompt: prompts::AGE.to_string()
            }
        );
    }

    #[test]
    fn collected_fields_persist_across_turns() {
        let store = store();
        let overrides = UserProfile {
            age: Some(20),
            ..UserProfile::default()
        };
        store
            .begin_turn(SESSION_A, &overrides, "here are my details")
            .expect("valid turn");

        // No override this time; the stored age keeps the income prompt next.
        let state = store
            .begin_turn(SESSION_A, &UserProfile::default(), "what now?")
            .expect("valid turn");
        assert_eq!(
            state,
            TurnState::NeedMore {
                prompt: prompts::INCOME.to_string()
            }
        );
    }

    #[test]
    fn sessions_do_not_share_profiles() {
        let store = store();
        let overrides = UserProfile {
            age: Some(20),
            ..UserProfile::default()
        };
        store
            .begin_turn(SESSION_A, &overrides, "hi")
            .expect("valid turn");

        let state = store
            .begin_turn(SESSION_B, &UserProfile::default(), "hi")
            .expect("valid turn");
        assert_eq!(
            state,
            TurnState::NeedMore {
                prompt: prompts::AGE.to_string()
            }
        );
    }

    #[test]
    fn completion_returns_profile_and_full_history() {
        let store = store();
        let overrides = UserProfile {
            age: Some(20),
            income: Some(200_000),
            state: Some("Maharashtra".to_string()),
            category: Some("General".to_string()),
        };
        let state = store
            .begin_turn(SESSION_A, &overrides, "what am I eligible for?")
            .expect("valid turn");

        match state {
            TurnState::Ready { profile, history } => {
                assert_eq!(profile.age, 20);
                assert_eq!(history.len(), 1);
                assert_eq!(history[0].role, Role::User);
            }
            other => panic!("expected ready turn, got {other:?}"),
        }
    }

    #[test]
    fn stale_sessions_are_swept_on_the_next_turn() {
        let store = SessionStore::new(Duration::minutes(30));
        let start = Utc::now();
        store
            .begin_turn_at(SESSION_A, &UserProfile::default(), "hi", start)
            .expect("valid turn");
        assert_eq!(store.session_count(), 1);

        // A different session arriving after the window sweeps the stale one.
        let later = start + Duration::minutes(31);
        store
            .begin_turn_at(SESSION_B, &UserProfile::default(), "hi", later)
            .expect("valid turn");
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn activity_inside_the_window_keeps_a_session_alive() {
        let store = SessionStore::new(Duration::minutes(30));
        let start = Utc::now();
        let overrides = UserProfile {
            age: Some(20),
            ..UserProfile::default()
        };
        store
            .begin_turn_at(SESSION_A, &overrides, "hi", start)
            .expect("valid turn");

        let touched = start + Duration::minutes(20);
        store
            .begin_turn_at(SESSION_A, &UserProfile::default(), "still here", touched)
            .expect("valid turn");

        // 31 minutes after the first turn but only 11 after the touch.
        let later = start + Duration::minutes(31);
        let state = store
            .begin_turn_at(SESSION_A, &UserProfile::default(), "and now?", later)
            .expect("valid turn");
        assert_eq!(
            state,
            TurnState::NeedMore {
                prompt: prompts::INCOME.to_string()
            }
        );
    }

    #[test]
    fn record_reply_appends_assistant_turn() {
        let store = store();
        let overrides = UserProfile {
            age: Some(20),
            income: Some(200_000),
            state: Some("Maharashtra".to_string()),
            category: Some("General".to_string()),
        };
        store
            .begin_turn(SESSION_A, &overrides, "list my schemes")
            .expect("valid turn");
        store.record_reply(SESSION_A, "you qualify for several schemes");

        match store
            .begin_turn(SESSION_A, &UserProfile::default(), "thanks")
            .expect("valid turn")
        {
            TurnState::Ready { history, .. } => {
                assert_eq!(history.len(), 3);
                assert_eq!(history[1].role, Role::Assistant);
                assert_eq!(history[1].content, "you qualify for several schemes");
            }
            other => panic!("expected ready turn, got {other:?}"),
        }
    }
}
