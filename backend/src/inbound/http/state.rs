//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::AdminAccount;
use crate::domain::ports::{AdminSessionStore, ApplicationRepository, EnquiryRepository};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub applications: Arc<dyn ApplicationRepository>,
    pub enquiries: Arc<dyn EnquiryRepository>,
    pub sessions: Arc<dyn AdminSessionStore>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub applications: Arc<dyn ApplicationRepository>,
    pub enquiries: Arc<dyn EnquiryRepository>,
    pub sessions: Arc<dyn AdminSessionStore>,
    pub admin: AdminAccount,
    /// Whether the `token` cookie carries the `Secure` attribute.
    pub cookie_secure: bool,
}

impl HttpState {
    /// Construct state from a ports bundle and the configured administrator.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use site_backend::domain::AdminAccount;
    /// use site_backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use site_backend::outbound::memory::{
    ///     MemoryAdminSessionStore, MemoryApplicationRepository, MemoryEnquiryRepository,
    /// };
    ///
    /// let ports = HttpStatePorts {
    ///     applications: Arc::new(MemoryApplicationRepository::default()),
    ///     enquiries: Arc::new(MemoryEnquiryRepository::default()),
    ///     sessions: Arc::new(MemoryAdminSessionStore::default()),
    /// };
    /// let state = HttpState::new(ports, AdminAccount::new("admin@example.com", "changeme1"));
    /// assert!(state.cookie_secure);
    /// ```
    pub fn new(ports: HttpStatePorts, admin: AdminAccount) -> Self {
        let HttpStatePorts {
            applications,
            enquiries,
            sessions,
        } = ports;
        Self {
            applications,
            enquiries,
            sessions,
            admin,
            cookie_secure: true,
        }
    }

    /// Toggle the `Secure` cookie attribute, e.g. for plain-HTTP development.
    #[must_use]
    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }
}
