//! Multi-turn profile collection and scheme recommendation.

pub mod extract;
pub mod profile;
pub mod sanitize;
pub mod service;
pub mod session;

pub use profile::{ChatTurn, Role, UserProfile};
pub use sanitize::sanitize_reply;
pub use service::{ChatOutcome, ChatService};
pub use session::{ChatError, SessionStore, TurnState};
