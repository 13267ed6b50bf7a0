//! Port for storing and querying job applications.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Application, ApplicationQuery, ApplicationStatus, Page};

use super::define_port_error;

define_port_error! {
    /// Errors raised by application repository adapters.
    pub enum ApplicationRepositoryError {
        /// The document store could not be reached.
        Connection { message: String } =>
            "application repository connection failed: {message}",
        /// A read or write failed during execution.
        Query { message: String } =>
            "application repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new application.
    async fn insert(&self, application: &Application) -> Result<(), ApplicationRepositoryError>;

    /// Fetch one application by id.
    async fn find(&self, id: &Uuid) -> Result<Option<Application>, ApplicationRepositoryError>;

    /// List applications newest first, optionally filtered by status.
    async fn list(
        &self,
        query: &ApplicationQuery,
    ) -> Result<Page<Application>, ApplicationRepositoryError>;

    /// Replace a stored application. Returns `false` when it does not exist.
    async fn update(&self, application: &Application) -> Result<bool, ApplicationRepositoryError>;

    /// Remove an application. Returns `false` when it did not exist.
    async fn delete(&self, id: &Uuid) -> Result<bool, ApplicationRepositoryError>;

    /// Count stored applications per status.
    async fn count_by_status(
        &self,
    ) -> Result<Vec<(ApplicationStatus, usize)>, ApplicationRepositoryError>;
}
