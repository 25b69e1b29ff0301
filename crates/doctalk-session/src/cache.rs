use doctalk_core::{DoctalkError, DoctalkResult, DocumentFragments};
use doctalk_extract::DocumentExtractor;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

/// Cache key for one upload: the session plus the file name the client sent.
///
/// Keyed by name, not content. Re-uploading different bytes under a name the
/// session has already used returns the original extraction; the only way to
/// get fresh fragments is a new name or a new session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub session_id: Uuid,
    pub file_name: String,
}

/// Session-scoped cache of extracted document fragments.
///
/// [`DocumentCache::get_or_extract`] is the single write path: a miss stages
/// the upload in a temporary directory, runs the extractor over it, and
/// stores the fragments under `(session, file name)`. Entries are immutable,
/// survive a conversation reset, and are dropped when their session is torn
/// down via [`DocumentCache::remove_session`].
pub struct DocumentCache {
    entries: RwLock<HashMap<CacheKey, DocumentFragments>>,
}

impl DocumentCache {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the cached fragments for `(session_id, file_name)`, if any.
    pub async fn get(&self, session_id: Uuid, file_name: &str) -> Option<DocumentFragments> {
        let key = CacheKey {
            session_id,
            file_name: file_name.to_string(),
        };
        self.entries.read().await.get(&key).cloned()
    }

    /// Whether an entry exists for `(session_id, file_name)`.
    pub async fn contains(&self, session_id: Uuid, file_name: &str) -> bool {
        self.get(session_id, file_name).await.is_some()
    }

    /// Number of cached extractions across all sessions.
    pub async fn entry_count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Drops every cached extraction belonging to `session_id`.
    ///
    /// Session teardown calls this; a conversation reset does not, so
    /// re-uploads after a reset stay cache hits.
    pub async fn remove_session(&self, session_id: Uuid) {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|key, _| key.session_id != session_id);
        let removed = before - entries.len();
        if removed > 0 {
            debug!(session_id = %session_id, entries = removed, "session cache entries removed");
        }
    }

    /// Returns the fragments for this upload, extracting them on first sight.
    ///
    /// On a hit `bytes` is ignored entirely and the extractor never runs. On
    /// a miss the bytes are staged on disk for the duration of the extractor
    /// call; the staging directory is removed on success and on every failure
    /// path. A failed extraction leaves no cache entry, so the upload can be
    /// retried.
    pub async fn get_or_extract(
        &self,
        session_id: Uuid,
        file_name: &str,
        bytes: &[u8],
        extractor: &dyn DocumentExtractor,
    ) -> DoctalkResult<DocumentFragments> {
        let key = CacheKey {
            session_id,
            file_name: file_name.to_string(),
        };

        if let Some(found) = self.entries.read().await.get(&key) {
            debug!(session_id = %session_id, file = %file_name, "document cache hit");
            return Ok(found.clone());
        }

        let staged = StagedUpload::write(file_name, bytes).await?;
        let fragments = Arc::new(extractor.extract(staged.dir()).await?);

        info!(
            session_id = %session_id,
            file = %file_name,
            fragments = fragments.len(),
            "document extracted and cached"
        );

        let mut entries = self.entries.write().await;
        // If a concurrent upload raced us here, the first insert wins and
        // both callers see the same fragments.
        let entry = entries.entry(key).or_insert(fragments);
        Ok(entry.clone())
    }
}

impl Default for DocumentCache {
    fn default() -> Self {
        Self::new()
    }
}

/// One upload staged on disk for an extractor run.
///
/// The backing temporary directory is removed when this value drops.
struct StagedUpload {
    dir: tempfile::TempDir,
}

impl StagedUpload {
    async fn write(file_name: &str, bytes: &[u8]) -> DoctalkResult<Self> {
        // Reduce the client-supplied name to its final component so uploads
        // cannot escape the staging directory.
        let base = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or_else(|| {
                DoctalkError::Validation(format!("unusable upload file name: {file_name:?}"))
            })?;

        let dir = tempfile::tempdir().map_err(|e| {
            DoctalkError::Extraction(format!("cannot create staging directory: {e}"))
        })?;

        tokio::fs::write(dir.path().join(&base), bytes)
            .await
            .map_err(|e| DoctalkError::Extraction(format!("cannot stage upload {base}: {e}")))?;

        Ok(Self { dir })
    }

    fn dir(&self) -> &Path {
        self.dir.path()
    }
}
