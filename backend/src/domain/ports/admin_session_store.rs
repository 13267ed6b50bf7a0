//! Port for admin session tokens.
//!
//! The access gate only checks that a token is present. Handlers that act on
//! behalf of an administrator ask this store whether the token is genuine.

use async_trait::async_trait;

use crate::domain::access::Credential;

use super::define_port_error;

define_port_error! {
    /// Errors raised by session store adapters.
    pub enum SessionStoreError {
        Unavailable { message: String } => "session store unavailable: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminSessionStore: Send + Sync {
    /// Mint and remember a fresh token for the administrator.
    async fn issue(&self) -> Result<Credential, SessionStoreError>;

    /// Whether `token` was issued and has not been revoked or expired.
    async fn is_active(&self, token: &Credential) -> Result<bool, SessionStoreError>;

    /// Forget `token`. Unknown tokens are ignored.
    async fn revoke(&self, token: &Credential) -> Result<(), SessionStoreError>;
}
