//! Outbound adapters implementing domain ports.
//!
//! - **memory**: in-process document-store adapters. The production document
//!   database sits behind the same ports and is not part of this crate.
//!
//! Adapters are thin translators that contain no business logic.

pub mod memory;
