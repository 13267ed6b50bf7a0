//! HTTP inbound adapter exposing the JSON API and the admin pages.

pub mod access_gate;
pub mod admin_pages;
pub mod app;
pub mod applications;
pub mod auth;
pub mod contact;
pub mod credential;
pub mod envelope;
pub mod error;
pub mod health;
pub mod payloads;
pub mod schemas;
pub mod session;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validate;

pub use error::ApiResult;
