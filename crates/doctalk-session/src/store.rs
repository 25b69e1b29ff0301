use crate::session::Session;
use async_trait::async_trait;
use doctalk_core::DoctalkResult;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, session: &Session) -> DoctalkResult<()>;
    async fn get(&self, id: Uuid) -> DoctalkResult<Option<Session>>;
    async fn update(&self, session: &Session) -> DoctalkResult<()>;
    async fn delete(&self, id: Uuid) -> DoctalkResult<()>;
    async fn list(&self) -> DoctalkResult<Vec<Uuid>>;
}

/// In-memory session store. Sessions live for the process lifetime only.
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn create(&self, session: &Session) -> DoctalkResult<()> {
        self.sessions
            .write()
            .await
            .insert(session.id, session.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> DoctalkResult<Option<Session>> {
        Ok(self.sessions.read().await.get(&id).cloned())
    }

    async fn update(&self, session: &Session) -> DoctalkResult<()> {
        self.create(session).await
    }

    async fn delete(&self, id: Uuid) -> DoctalkResult<()> {
        self.sessions.write().await.remove(&id);
        Ok(())
    }

    async fn list(&self) -> DoctalkResult<Vec<Uuid>> {
        Ok(self.sessions.read().await.keys().copied().collect())
    }
}
