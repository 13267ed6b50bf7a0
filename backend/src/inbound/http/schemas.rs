//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their wire shape and live in the inbound adapter,
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing store could not be reached.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "application not found")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::validation::FieldViolation`].
#[derive(ToSchema)]
#[schema(as = crate::domain::validation::FieldViolation)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FieldViolationSchema {
    /// Dot-joined path of the offending field.
    #[schema(example = "address.zip")]
    field: String,
    #[schema(example = "\"address.zip\" is required")]
    message: String,
}

/// Body of a `400` produced by request validation.
#[derive(ToSchema)]
#[schema(as = crate::inbound::http::validate::ValidationErrorBody)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ValidationErrorSchema {
    /// Always `false`.
    success: bool,
    #[schema(example = "Validation Error")]
    message: String,
    /// Every violated constraint, in schema order.
    errors: Vec<FieldViolationSchema>,
}

/// OpenAPI schema for [`crate::domain::ApplicationStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ApplicationStatus)]
pub enum ApplicationStatusSchema {
    #[schema(rename = "new")]
    New,
    #[schema(rename = "reviewing")]
    Reviewing,
    #[schema(rename = "interview")]
    Interview,
    #[schema(rename = "hired")]
    Hired,
    #[schema(rename = "rejected")]
    Rejected,
}

/// OpenAPI schema for [`crate::domain::Address`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Address)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AddressSchema {
    city: String,
    zip: String,
}

/// OpenAPI schema for [`crate::domain::Application`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Application, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApplicationSchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    full_name: String,
    email: String,
    phone: Option<String>,
    position: String,
    experience_years: Option<u8>,
    portfolio_url: Option<String>,
    cover_letter: Option<String>,
    skills: Vec<String>,
    address: Option<AddressSchema>,
    status: ApplicationStatusSchema,
    #[schema(value_type = String, format = DateTime)]
    submitted_at: String,
    #[schema(value_type = String, format = DateTime)]
    updated_at: String,
}

/// `{ success, data }` wrapping one application.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApplicationResponseSchema {
    success: bool,
    data: ApplicationSchema,
}

/// One page of applications.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ApplicationPageSchema {
    success: bool,
    data: Vec<ApplicationSchema>,
    page: u32,
    limit: u32,
    total: u64,
}

/// OpenAPI schema for [`crate::domain::Enquiry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Enquiry, rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnquirySchema {
    #[schema(value_type = String, format = Uuid)]
    id: String,
    name: String,
    email: String,
    company: Option<String>,
    subject: Option<String>,
    message: String,
    #[schema(value_type = String, format = DateTime)]
    received_at: String,
}

/// `{ success, data }` wrapping one enquiry.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnquiryResponseSchema {
    success: bool,
    data: EnquirySchema,
}

/// One page of enquiries.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct EnquiryPageSchema {
    success: bool,
    data: Vec<EnquirySchema>,
    page: u32,
    limit: u32,
    total: u64,
}
