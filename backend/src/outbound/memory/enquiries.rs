//! Enquiry collection.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ports::{EnquiryRepository, EnquiryRepositoryError};
use crate::domain::{Enquiry, Page, PageRequest};

/// Enquiries kept in arrival order.
#[derive(Debug, Default, Clone)]
pub struct MemoryEnquiryRepository {
    documents: Arc<RwLock<Vec<Enquiry>>>,
}

impl MemoryEnquiryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EnquiryRepository for MemoryEnquiryRepository {
    async fn insert(&self, enquiry: &Enquiry) -> Result<(), EnquiryRepositoryError> {
        self.documents.write().await.push(enquiry.clone());
        Ok(())
    }

    async fn list(&self, page: &PageRequest) -> Result<Page<Enquiry>, EnquiryRepositoryError> {
        let documents = self.documents.read().await;
        let items = documents
            .iter()
            .rev()
            .skip(page.offset())
            .take(page.limit as usize)
            .cloned()
            .collect();
        Ok(Page {
            items,
            total: documents.len(),
            request: *page,
        })
    }

    async fn count(&self) -> Result<usize, EnquiryRepositoryError> {
        Ok(self.documents.read().await.len())
    }
}
