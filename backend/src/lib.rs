//! Backend for the marketing and recruitment site.
//!
//! Two request interceptors sit in front of the handlers: a schema validator
//! that reports every violated constraint in one `400` response, and an access
//! gate that steers `/admin` page requests by token presence.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
