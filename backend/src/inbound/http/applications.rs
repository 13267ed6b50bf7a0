//! Careers form submissions and the admin applicant tracker.
//!
//! ```text
//! POST   /api/applications
//! GET    /api/applications?status=new&page=1&limit=20
//! GET    /api/applications/{id}
//! PATCH  /api/applications/{id}/status {"status":"interview"}
//! DELETE /api/applications/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::ApplicationRepositoryError;
use crate::domain::{
    Address, Application, ApplicationQuery, ApplicationStatus, Error, NewApplication, PageRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::envelope::{Envelope, PagedEnvelope};
use crate::inbound::http::payloads::{
    APPLICATION, APPLICATION_ID_PARAMS, APPLICATION_LIST_QUERY, STATUS_UPDATE,
};
use crate::inbound::http::schemas::{
    ApplicationPageSchema, ApplicationResponseSchema, ErrorSchema, ValidationErrorSchema,
};
use crate::inbound::http::session::AdminSession;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validate::Validate;

/// Postal address block of the careers form.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct AddressRequest {
    #[schema(example = "Berlin")]
    pub city: String,
    #[schema(example = "10115")]
    pub zip: String,
}

/// Request body for `POST /api/applications`.
///
/// Keys not listed here are ignored.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRequest {
    #[schema(example = "Grace Hopper")]
    pub full_name: String,
    #[schema(example = "grace@example.com")]
    pub email: String,
    pub phone: Option<String>,
    #[schema(example = "Backend Engineer")]
    pub position: String,
    #[schema(minimum = 0, maximum = 60)]
    pub experience_years: Option<u8>,
    pub portfolio_url: Option<String>,
    pub cover_letter: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub address: Option<AddressRequest>,
}

impl From<ApplicationRequest> for NewApplication {
    fn from(value: ApplicationRequest) -> Self {
        Self {
            full_name: value.full_name,
            email: value.email,
            phone: value.phone,
            position: value.position,
            experience_years: value.experience_years,
            portfolio_url: value.portfolio_url,
            cover_letter: value.cover_letter,
            skills: value.skills,
            address: value.address.map(|address| Address {
                city: address.city,
                zip: address.zip,
            }),
        }
    }
}

/// Query string for `GET /api/applications`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ApplicationListQuery {
    /// Only return applications in this stage.
    #[param(value_type = Option<String>, example = "new")]
    pub status: Option<ApplicationStatus>,
    /// One-based page number.
    #[param(minimum = 1)]
    pub page: Option<u32>,
    /// Page size, at most 100.
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<u32>,
}

impl From<ApplicationListQuery> for ApplicationQuery {
    fn from(value: ApplicationListQuery) -> Self {
        Self {
            status: value.status,
            page: PageRequest::new(value.page, value.limit),
        }
    }
}

/// Request body for `PATCH /api/applications/{id}/status`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[schema(value_type = String, example = "interview")]
    pub status: ApplicationStatus,
}

pub(crate) fn map_repository_error(error: ApplicationRepositoryError) -> Error {
    match error {
        ApplicationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("application store unavailable: {message}"))
        }
        ApplicationRepositoryError::Query { message } => {
            Error::internal(format!("application store error: {message}"))
        }
    }
}

fn not_found(id: Uuid) -> Error {
    Error::not_found(format!("application {id} not found"))
}

/// Accept a careers form submission.
#[utoipa::path(
    post,
    path = "/api/applications",
    request_body = ApplicationRequest,
    responses(
        (status = 201, description = "Application stored", body = ApplicationResponseSchema),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "submitApplication",
    security([])
)]
#[post("/applications", wrap = "Validate::body(&APPLICATION)")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    payload: web::Json<ApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let application = Application::submit(payload.into_inner().into(), Utc::now());
    state
        .applications
        .insert(&application)
        .await
        .map_err(map_repository_error)?;
    info!(id = %application.id, position = %application.details.position, "application received");
    Ok(HttpResponse::Created().json(Envelope::ok(application)))
}

/// List applications newest first.
#[utoipa::path(
    get,
    path = "/api/applications",
    params(ApplicationListQuery),
    responses(
        (status = 200, description = "One page of applications", body = ApplicationPageSchema),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listApplications"
)]
#[get("/applications", wrap = "Validate::query(&APPLICATION_LIST_QUERY)")]
pub async fn list_applications(
    _session: AdminSession,
    state: web::Data<HttpState>,
    query: web::Query<ApplicationListQuery>,
) -> ApiResult<HttpResponse> {
    let query = ApplicationQuery::from(query.into_inner());
    let page = state
        .applications
        .list(&query)
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::Ok().json(PagedEnvelope::from(page)))
}

/// Fetch a single application.
#[utoipa::path(
    get,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    responses(
        (status = 200, description = "The application", body = ApplicationResponseSchema),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown application", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "getApplication"
)]
#[get("/applications/{id}", wrap = "Validate::params(&APPLICATION_ID_PARAMS)")]
pub async fn get_application(
    _session: AdminSession,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let application = state
        .applications
        .find(&id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| not_found(id))?;
    Ok(HttpResponse::Ok().json(Envelope::ok(application)))
}

/// Move an application to another review stage.
#[utoipa::path(
    patch,
    path = "/api/applications/{id}/status",
    params(("id" = Uuid, Path, description = "Application identifier")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated application", body = ApplicationResponseSchema),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown application", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "updateApplicationStatus"
)]
#[patch(
    "/applications/{id}/status",
    wrap = "Validate::body(&STATUS_UPDATE)",
    wrap = "Validate::params(&APPLICATION_ID_PARAMS)"
)]
pub async fn update_application_status(
    _session: AdminSession,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let mut application = state
        .applications
        .find(&id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| not_found(id))?;

    let previous = application.status;
    application.transition(payload.into_inner().status, Utc::now());
    let stored = state
        .applications
        .update(&application)
        .await
        .map_err(map_repository_error)?;
    if !stored {
        return Err(not_found(id));
    }
    info!(%id, from = previous.as_str(), to = application.status.as_str(), "application status changed");
    Ok(HttpResponse::Ok().json(Envelope::ok(application)))
}

/// Remove an application.
#[utoipa::path(
    delete,
    path = "/api/applications/{id}",
    params(("id" = Uuid, Path, description = "Application identifier")),
    responses(
        (status = 204, description = "Application removed"),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Unknown application", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "deleteApplication"
)]
#[delete("/applications/{id}", wrap = "Validate::params(&APPLICATION_ID_PARAMS)")]
pub async fn delete_application(
    _session: AdminSession,
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state
        .applications
        .delete(&id)
        .await
        .map_err(map_repository_error)?;
    if !removed {
        return Err(not_found(id));
    }
    info!(%id, "application deleted");
    Ok(HttpResponse::NoContent().finish())
}
