//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint, the schema wrappers from
//! [`crate::inbound::http::schemas`], and the `token` cookie security scheme.
//! Swagger UI serves it in debug builds.

use crate::inbound::http::schemas::{
    AddressSchema, ApplicationPageSchema, ApplicationResponseSchema, ApplicationSchema,
    ApplicationStatusSchema, EnquiryPageSchema, EnquiryResponseSchema, EnquirySchema,
    ErrorCodeSchema, ErrorSchema, FieldViolationSchema, ValidationErrorSchema,
};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the admin token cookie scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "TokenCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "token",
                "Admin token issued by POST /api/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Site backend API",
        description = "Careers and contact forms, admin applicant tracking and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("TokenCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::applications::list_applications,
        crate::inbound::http::applications::get_application,
        crate::inbound::http::applications::update_application_status,
        crate::inbound::http::applications::delete_application,
        crate::inbound::http::contact::submit_enquiry,
        crate::inbound::http::contact::list_enquiries,
        crate::inbound::http::admin_pages::login_page,
        crate::inbound::http::admin_pages::dashboard,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        FieldViolationSchema,
        ValidationErrorSchema,
        AddressSchema,
        ApplicationStatusSchema,
        ApplicationSchema,
        ApplicationResponseSchema,
        ApplicationPageSchema,
        EnquirySchema,
        EnquiryResponseSchema,
        EnquiryPageSchema,
    )),
    tags(
        (name = "auth", description = "Admin login and logout"),
        (name = "applications", description = "Careers form and applicant tracking"),
        (name = "contact", description = "Contact form enquiries"),
        (name = "admin", description = "Server-rendered admin pages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
