//! Core types and error definitions for doctalk.
//!
//! This crate provides the foundational types shared across all doctalk
//! crates, including error handling, conversation messages, and extracted
//! document fragments.
//!
//! # Main types
//!
//! - [`DoctalkError`] — Unified error enum for all doctalk subsystems.
//! - [`DoctalkResult`] — Convenience alias for `Result<T, DoctalkError>`.
//! - [`Role`] — Message role (user, assistant).
//! - [`Message`] — A single message within a conversation session.
//! - [`Fragment`] — One unit of text extracted from an uploaded document.

/// Extracted document fragments.
pub mod document;

pub use document::{DocumentFragments, Fragment};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// --- Error types ---

/// Top-level error type for doctalk.
///
/// Each variant corresponds to a subsystem that can produce errors.
#[derive(Debug, thiserror::Error)]
pub enum DoctalkError {
    /// Input rejected before any work was attempted (non-PDF upload,
    /// blank prompt, unusable file name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Document text extraction failed (unreadable bytes, no extractable
    /// documents, inaccessible staging area).
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// The inference endpoint was unreachable, returned a failure status,
    /// or produced a malformed payload.
    #[error("Inference error: {0}")]
    Inference(String),

    /// An error related to session persistence or lookup.
    #[error("Session error: {0}")]
    Session(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`DoctalkError`].
pub type DoctalkResult<T> = Result<T, DoctalkError>;

// --- Message types ---

/// The role of the participant that authored a [`Message`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A human end-user.
    User,
    /// The AI assistant.
    Assistant,
}

/// A single message exchanged within a conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Unique identifier for this message.
    pub id: Uuid,
    /// The role of the message author.
    pub role: Role,
    /// The textual content of the message.
    pub content: String,
    /// The session this message belongs to.
    pub session_id: Uuid,
    /// UTC timestamp of when the message was created.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Creates a new message with the given role, content, and session ID.
    pub fn new(role: Role, content: impl Into<String>, session_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            session_id,
            timestamp: Utc::now(),
        }
    }

    /// Creates a new message with [`Role::User`].
    pub fn user(content: impl Into<String>, session_id: Uuid) -> Self {
        Self::new(Role::User, content, session_id)
    }

    /// Creates a new message with [`Role::Assistant`].
    pub fn assistant(content: impl Into<String>, session_id: Uuid) -> Self {
        Self::new(Role::Assistant, content, session_id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_message_constructors_set_role() {
        let session_id = Uuid::new_v4();
        let user = Message::user("hello", session_id);
        let assistant = Message::assistant("hi there", session_id);

        assert_eq!(user.role, Role::User);
        assert_eq!(assistant.role, Role::Assistant);
        assert_eq!(user.session_id, session_id);
        assert_ne!(user.id, assistant.id);
    }

    #[test]
    fn test_message_serializes_role_lowercase() {
        let msg = Message::user("hello", Uuid::new_v4());
        let json = serde_json::to_value(&msg).unwrap();

        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "hello");
    }

    #[test]
    fn test_message_round_trips_through_json() {
        let msg = Message::assistant("Error: something went wrong", Uuid::new_v4());
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();

        assert_eq!(back.id, msg.id);
        assert_eq!(back.role, Role::Assistant);
        assert_eq!(back.content, msg.content);
    }
}
