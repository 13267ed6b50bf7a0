//! Port for contact-page enquiries.

use async_trait::async_trait;

use crate::domain::{Enquiry, Page, PageRequest};

use super::define_port_error;

define_port_error! {
    /// Errors raised by enquiry repository adapters.
    pub enum EnquiryRepositoryError {
        Connection { message: String } =>
            "enquiry repository connection failed: {message}",
        Query { message: String } =>
            "enquiry repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EnquiryRepository: Send + Sync {
    async fn insert(&self, enquiry: &Enquiry) -> Result<(), EnquiryRepositoryError>;

    /// Newest first.
    async fn list(&self, page: &PageRequest) -> Result<Page<Enquiry>, EnquiryRepositoryError>;

    async fn count(&self) -> Result<usize, EnquiryRepositoryError>;
}
