use crate::backends::InferenceBackend;
use doctalk_core::{DoctalkResult, DocumentFragments, Message};
use doctalk_extract::DocumentExtractor;
use doctalk_session::{DocumentCache, Session};
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// The chat orchestrator: runs one discrete user action against the
/// collaborators. Uploads go through the document cache, prompts go to the
/// inference backend with the session's active document as context.
pub struct ChatOrchestrator {
    inference: Arc<dyn InferenceBackend>,
    extractor: Arc<dyn DocumentExtractor>,
    cache: Arc<DocumentCache>,
}

/// Outcome of attaching an uploaded document to a session.
#[derive(Debug, Clone)]
pub struct AttachedDocument {
    /// File name as sent by the client.
    pub file_name: String,
    /// Number of fragments available as chat context.
    pub fragment_count: usize,
    /// Whether the fragments came from the cache instead of a fresh
    /// extraction.
    pub cached: bool,
}

impl ChatOrchestrator {
    pub fn new(
        inference: Arc<dyn InferenceBackend>,
        extractor: Arc<dyn DocumentExtractor>,
        cache: Arc<DocumentCache>,
    ) -> Self {
        Self {
            inference,
            extractor,
            cache,
        }
    }

    /// Attaches an uploaded document to the session and makes it the active
    /// chat context. Extraction runs only if `(session, file name)` has not
    /// been seen before.
    pub async fn attach_document(
        &self,
        session: &mut Session,
        file_name: &str,
        bytes: &[u8],
    ) -> DoctalkResult<AttachedDocument> {
        let cached = self.cache.contains(session.id, file_name).await;

        let fragments = self
            .cache
            .get_or_extract(session.id, file_name, bytes, self.extractor.as_ref())
            .await?;

        session.set_active_document(file_name);

        info!(
            session_id = %session.id,
            file = %file_name,
            fragments = fragments.len(),
            cached = cached,
            "Document attached"
        );

        Ok(AttachedDocument {
            file_name: file_name.to_string(),
            fragment_count: fragments.len(),
            cached,
        })
    }

    /// Drops the session's cached extractions. Deleting a session cascades
    /// here; a reset never does.
    pub async fn discard_documents(&self, session_id: Uuid) {
        self.cache.remove_session(session_id).await;
    }

    /// Runs one conversation turn. Returns the assistant's reply message.
    ///
    /// The user message is recorded before the inference call, so a failed
    /// turn still keeps the user's prompt in the history. On failure the
    /// error is also appended as an assistant message ("Error: ...") and
    /// then returned to the caller.
    pub async fn handle_turn(
        &self,
        session: &mut Session,
        prompt: &str,
    ) -> DoctalkResult<Message> {
        let session_id = session.id;

        // Add user message
        session.add_message(Message::user(prompt, session_id));

        let context = self.context_for(session).await;

        info!(
            session_id = %session_id,
            context_fragments = context.len(),
            "Running chat turn"
        );

        match self.inference.complete(prompt, &context).await {
            Ok(reply) => {
                let assistant_msg = Message::assistant(reply, session_id);
                session.add_message(assistant_msg.clone());

                info!(
                    session_id = %session_id,
                    history_len = session.message_count(),
                    "Chat turn completed"
                );
                Ok(assistant_msg)
            }
            Err(e) => {
                warn!(session_id = %session_id, error = %e, "Inference failed");
                session.add_message(Message::assistant(format!("Error: {e}"), session_id));
                Err(e)
            }
        }
    }

    /// Fragments of the session's active document, or no context at all when
    /// nothing has been uploaded yet.
    async fn context_for(&self, session: &Session) -> DocumentFragments {
        match &session.active_document {
            Some(file_name) => match self.cache.get(session.id, file_name).await {
                Some(fragments) => fragments,
                None => {
                    warn!(
                        session_id = %session.id,
                        file = %file_name,
                        "Active document missing from cache"
                    );
                    Arc::new(Vec::new())
                }
            },
            None => Arc::new(Vec::new()),
        }
    }
}
