//! Application composition shared by the server binary and integration tests.
//!
//! Request flow:
//!
//! ```text
//! Trace -> AccessGate (/admin/*) -> route -> Validate (per route) -> handler
//! ```

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpResponse, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::Error;
use crate::domain::access::ADMIN_PREFIX;
use crate::inbound::http::access_gate::AccessGate;
use crate::inbound::http::admin_pages::{dashboard, login_page};
use crate::inbound::http::applications::{
    delete_application, get_application, list_applications, submit_application,
    update_application_status,
};
use crate::inbound::http::auth::{login, logout};
use crate::inbound::http::contact::{list_enquiries, submit_enquiry};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;

/// Shared state handed to every worker's `App`.
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
}

async fn not_found() -> Result<HttpResponse, Error> {
    Err(Error::not_found("no such route"))
}

/// Assemble routes, middleware and JSON settings.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    // Bodies are validated before extraction, so a failure here means the
    // payload was not JSON at all (wrong content type, truncated stream).
    let json_config = web::JsonConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into());
    // Same for query strings that passed the schema but not the typed extractor.
    let query_config = web::QueryConfig::default()
        .error_handler(|err, _req| Error::invalid_request(err.to_string()).into());

    let api = web::scope("/api")
        .service(login)
        .service(logout)
        .service(submit_application)
        .service(list_applications)
        .service(get_application)
        .service(update_application_status)
        .service(delete_application)
        .service(submit_enquiry)
        .service(list_enquiries);

    let admin = web::scope(ADMIN_PREFIX)
        .service(login_page)
        .service(dashboard);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config)
        .app_data(query_config)
        .wrap(AccessGate::admin())
        .wrap(Trace)
        .service(api)
        .service(admin)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}
