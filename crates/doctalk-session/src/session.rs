use chrono::{DateTime, Utc};
use doctalk_core::Message;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: Uuid,
    pub messages: Vec<Message>,
    /// File name of the most recently uploaded document, used as chat
    /// context. `None` until the first upload and after a reset.
    pub active_document: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            active_document: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn add_message(&mut self, message: Message) {
        self.updated_at = Utc::now();
        self.messages.push(message);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Marks `file_name` as the active chat context. The last upload wins.
    pub fn set_active_document(&mut self, file_name: impl Into<String>) {
        self.updated_at = Utc::now();
        self.active_document = Some(file_name.into());
    }

    /// Clears the conversation history and the active document reference.
    ///
    /// Cached extractions are owned by the [`crate::DocumentCache`] and are
    /// not touched; re-uploading the same document after a reset is a cache
    /// hit.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.active_document = None;
        self.updated_at = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
