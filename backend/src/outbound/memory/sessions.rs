//! Admin session tokens with a fixed lifetime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;

use crate::domain::access::Credential;
use crate::domain::ports::{AdminSessionStore, SessionStoreError};

/// Session lifetime used by the server.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(2 * 60 * 60);

#[derive(Debug, Clone)]
pub struct MemoryAdminSessionStore {
    issued: Arc<RwLock<HashMap<String, Instant>>>,
    ttl: Duration,
}

impl Default for MemoryAdminSessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl MemoryAdminSessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            issued: Arc::default(),
            ttl,
        }
    }
}

#[async_trait]
impl AdminSessionStore for MemoryAdminSessionStore {
    async fn issue(&self) -> Result<Credential, SessionStoreError> {
        let raw = Uuid::new_v4().simple().to_string();
        let mut issued = self.issued.write().await;
        // Drop expired entries while holding the write lock anyway.
        let ttl = self.ttl;
        issued.retain(|_, at| at.elapsed() < ttl);
        issued.insert(raw.clone(), Instant::now());
        Credential::new(raw).ok_or_else(|| SessionStoreError::unavailable("minted an empty token"))
    }

    async fn is_active(&self, token: &Credential) -> Result<bool, SessionStoreError> {
        let issued = self.issued.read().await;
        Ok(issued
            .get(token.as_str())
            .is_some_and(|at| at.elapsed() < self.ttl))
    }

    async fn revoke(&self, token: &Credential) -> Result<(), SessionStoreError> {
        self.issued.write().await.remove(token.as_str());
        Ok(())
    }
}
