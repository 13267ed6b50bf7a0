//! Domain primitives for the site backend.
//!
//! Purpose: keep request gating rules and the careers/contact records free of
//! HTTP and storage concerns. Inbound adapters translate requests into these
//! types; outbound adapters persist them.
//!
//! Public surface:
//! - `access`: admin route decision table and credential capability.
//! - `validation`: declarative payload schemas and their interpreter.
//! - Error / ErrorCode: API error payload.
//! - Application, Enquiry: records collected by the public forms.

pub mod access;
mod application;
mod auth;
mod contact;
mod error;
pub mod ports;
mod trace_id;
pub mod validation;

pub use self::application::{
    Address, Application, ApplicationQuery, ApplicationStatus, NewApplication, Page, PageRequest,
    UnknownStatus,
};
pub use self::auth::{AdminAccount, LoginCredentials, LoginValidationError};
pub use self::contact::{Enquiry, NewEnquiry};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::TraceId;

/// Header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use site_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
