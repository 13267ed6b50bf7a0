//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::AdminAccount;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::{
    MemoryAdminSessionStore, MemoryApplicationRepository, MemoryEnquiryRepository,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery";

pub fn admin_account() -> AdminAccount {
    AdminAccount::new(ADMIN_EMAIL, ADMIN_PASSWORD)
}

/// Fresh in-memory adapters for every port.
pub fn memory_ports() -> HttpStatePorts {
    HttpStatePorts {
        applications: Arc::new(MemoryApplicationRepository::new()),
        enquiries: Arc::new(MemoryEnquiryRepository::new()),
        sessions: Arc::new(MemoryAdminSessionStore::default()),
    }
}

/// State backed by in-memory adapters, with the `Secure` cookie flag off for
/// plain-HTTP test requests.
pub fn test_state() -> HttpState {
    HttpState::new(memory_ports(), admin_account()).with_cookie_secure(false)
}
