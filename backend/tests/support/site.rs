//! Full-application fixtures shared by the integration tests.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::json;
use site_backend::domain::AdminAccount;
use site_backend::inbound::http::app::AppDependencies;
use site_backend::inbound::http::credential::TOKEN_COOKIE;
use site_backend::inbound::http::health::HealthState;
use site_backend::inbound::http::state::{HttpState, HttpStatePorts};
use site_backend::outbound::memory::{
    MemoryAdminSessionStore, MemoryApplicationRepository, MemoryEnquiryRepository,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct horse battery";

/// Dependencies backed by fresh in-memory stores.
pub fn dependencies() -> AppDependencies {
    let ports = HttpStatePorts {
        applications: Arc::new(MemoryApplicationRepository::new()),
        enquiries: Arc::new(MemoryEnquiryRepository::new()),
        sessions: Arc::new(MemoryAdminSessionStore::default()),
    };
    let state = HttpState::new(ports, AdminAccount::new(ADMIN_EMAIL, ADMIN_PASSWORD))
        .with_cookie_secure(false);
    AppDependencies {
        health_state: web::Data::new(HealthState::new()),
        http_state: web::Data::new(state),
    }
}

/// Log in through the API and return the issued `token` cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
        .to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::OK, "login should succeed");
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == TOKEN_COOKIE)
        .map(|cookie| Cookie::new(TOKEN_COOKIE, cookie.value().to_owned()))
        .expect("token cookie issued")
}
