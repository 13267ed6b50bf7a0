//! Domain ports for the hexagonal boundary.
//!
//! The document database behind the site is an external collaborator; these
//! traits are all the handlers know about it.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_session_store;
mod application_repository;
mod enquiry_repository;

#[cfg(test)]
pub use admin_session_store::MockAdminSessionStore;
pub use admin_session_store::{AdminSessionStore, SessionStoreError};
#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationRepository, ApplicationRepositoryError};
#[cfg(test)]
pub use enquiry_repository::MockEnquiryRepository;
pub use enquiry_repository::{EnquiryRepository, EnquiryRepositoryError};
