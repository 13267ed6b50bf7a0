//! Success envelopes shared by the JSON endpoints.
//!
//! Every successful body carries `success: true`; failures use either the
//! validation body or the domain [`Error`](crate::domain::Error) payload.

use serde::{Deserialize, Serialize};

use crate::domain::Page;

/// `{ "success": true }` with no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
}

impl Acknowledgement {
    pub const OK: Self = Self { success: true };
}

/// `{ "success": true, "data": ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// A page of records plus the window that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagedEnvelope<T> {
    pub success: bool,
    pub data: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: usize,
}

impl<T> From<Page<T>> for PagedEnvelope<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            success: true,
            data: page.items,
            page: page.request.page,
            limit: page.request.limit,
            total: page.total,
        }
    }
}
