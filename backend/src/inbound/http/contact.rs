//! Contact page enquiries.
//!
//! ```text
//! POST /api/contact {"name":"Ada","email":"ada@example.com","message":"..."}
//! GET  /api/contact?page=1&limit=20
//! ```

use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::EnquiryRepositoryError;
use crate::domain::{Enquiry, Error, NewEnquiry, PageRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, PagedEnvelope};
use crate::inbound::http::payloads::{CONTACT, PAGE_QUERY};
use crate::inbound::http::schemas::{
    EnquiryPageSchema, EnquiryResponseSchema, ErrorSchema, ValidationErrorSchema,
};
use crate::inbound::http::session::AdminSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validate::Validate;

/// Request body for `POST /api/contact`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ContactRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    pub company: Option<String>,
    pub subject: Option<String>,
    #[schema(example = "We would like a quote for a landing page.")]
    pub message: String,
}

impl From<ContactRequest> for NewEnquiry {
    fn from(value: ContactRequest) -> Self {
        Self {
            name: value.name,
            email: value.email,
            company: value.company,
            subject: value.subject,
            message: value.message,
        }
    }
}

/// Paging query for admin listings.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    #[param(minimum = 1)]
    pub page: Option<u32>,
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<u32>,
}

impl From<PageQuery> for PageRequest {
    fn from(value: PageQuery) -> Self {
        Self::new(value.page, value.limit)
    }
}

pub(crate) fn map_repository_error(error: EnquiryRepositoryError) -> Error {
    match error {
        EnquiryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("enquiry store unavailable: {message}"))
        }
        EnquiryRepositoryError::Query { message } => {
            Error::internal(format!("enquiry store error: {message}"))
        }
    }
}

/// Store a contact form enquiry.
#[utoipa::path(
    post,
    path = "/api/contact",
    request_body = ContactRequest,
    responses(
        (status = 201, description = "Enquiry stored", body = EnquiryResponseSchema),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "submitEnquiry",
    security([])
)]
#[post("/contact", wrap = "Validate::body(&CONTACT)")]
pub async fn submit_enquiry(
    state: web::Data<HttpState>,
    payload: web::Json<ContactRequest>,
) -> ApiResult<HttpResponse> {
    let enquiry = Enquiry::receive(payload.into_inner().into(), Utc::now());
    state
        .enquiries
        .insert(&enquiry)
        .await
        .map_err(map_repository_error)?;
    info!(id = %enquiry.id, "enquiry received");
    Ok(HttpResponse::Created().json(Envelope::ok(enquiry)))
}

/// List enquiries newest first.
#[utoipa::path(
    get,
    path = "/api/contact",
    params(PageQuery),
    responses(
        (status = 200, description = "One page of enquiries", body = EnquiryPageSchema),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "listEnquiries"
)]
#[get("/contact", wrap = "Validate::query(&PAGE_QUERY)")]
pub async fn list_enquiries(
    _session: AdminSession,
    state: web::Data<HttpState>,
    query: web::Query<PageQuery>,
) -> ApiResult<HttpResponse> {
    let page = state
        .enquiries
        .list(&query.into_inner().into())
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::Ok().json(PagedEnvelope::from(page)))
}
