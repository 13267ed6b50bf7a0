//! In-memory document store adapters.
//!
//! Each collection is a map guarded by a `tokio` read/write lock and shared
//! through `Arc`, so one store can back every Actix worker.

mod applications;
mod enquiries;
mod sessions;

pub use applications::MemoryApplicationRepository;
pub use enquiries::MemoryEnquiryRepository;
pub use sessions::MemoryAdminSessionStore;
