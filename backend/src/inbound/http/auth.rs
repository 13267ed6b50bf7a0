//! Admin login and logout.
//!
//! ```text
//! POST /api/auth/login {"email":"admin@example.com","password":"********"}
//! POST /api/auth/logout
//! ```

use actix_web::{HttpRequest, HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::credential::{expired_token_cookie, request_credential, token_cookie};
use crate::inbound::http::envelope::Acknowledgement;
use crate::inbound::http::payloads::LOGIN;
use crate::inbound::http::schemas::{ErrorSchema, ValidationErrorSchema};
use crate::inbound::http::session::map_session_error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validate::Validate;

/// Login request body for `POST /api/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@example.com")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyEmail => Error::invalid_request("email must not be empty")
            .with_details(json!({ "field": "email", "code": "empty_email" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
    }
}

/// Authenticate the administrator and issue the `token` cookie.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Admin token cookie"))),
        (status = 400, description = "Validation error", body = ValidationErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Session store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login", wrap = "Validate::body(&LOGIN)")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    if !state.admin.verify(&credentials) {
        warn!(email = %credentials.email(), "admin login rejected");
        return Err(Error::unauthorized("invalid email or password"));
    }

    let token = state.sessions.issue().await.map_err(map_session_error)?;
    info!(email = %credentials.email(), "admin logged in");
    Ok(HttpResponse::Ok()
        .cookie(token_cookie(token.as_str().to_owned(), state.cookie_secure))
        .json(Acknowledgement::OK))
}

/// Revoke the presented token and clear the cookie.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Logged out"),
        (status = 503, description = "Session store unavailable", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "logout"
)]
#[post("/auth/logout")]
pub async fn logout(state: web::Data<HttpState>, req: HttpRequest) -> ApiResult<HttpResponse> {
    if let Some(token) = request_credential(&req) {
        state.sessions.revoke(&token).await.map_err(map_session_error)?;
    }
    Ok(HttpResponse::Ok()
        .cookie(expired_token_cookie(state.cookie_secure))
        .json(Acknowledgement::OK))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::cookie::{Cookie, SameSite};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;

    use crate::domain::access::Credential;
    use crate::domain::ErrorCode;
    use crate::inbound::http::credential::TOKEN_COOKIE;
    use crate::inbound::http::test_utils::{ADMIN_EMAIL, ADMIN_PASSWORD, test_state};
    use crate::inbound::http::validate::ValidationErrorBody;

    macro_rules! app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(web::scope("/api").service(login).service(logout)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn login_sets_http_only_token_cookie() {
        let state = test_state();
        let sessions = state.sessions.clone();
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);

        let cookie = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == TOKEN_COOKIE)
            .expect("token cookie set");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        let token = Credential::new(cookie.value()).expect("non-empty token");
        assert!(sessions.is_active(&token).await.expect("lookup"));

        let body: Acknowledgement = test::read_body_json(res).await;
        assert!(body.success);
    }

    #[actix_web::test]
    async fn wrong_password_is_unauthorised() {
        let app = app!(test_state());
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(json!({ "email": ADMIN_EMAIL, "password": "not the password" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.response().cookies().next().is_none());
        let body: Error = test::read_body_json(res).await;
        assert_eq!(body.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[case(json!({ "email": "nope", "password": "short" }), &["email", "password"])]
    #[case(json!({ "email": ADMIN_EMAIL, "password": ADMIN_PASSWORD, "remember": true }), &["remember"])]
    #[actix_web::test]
    async fn malformed_login_is_a_validation_error(
        #[case] payload: serde_json::Value,
        #[case] expected_fields: &[&str],
    ) {
        let app = app!(test_state());
        let req = test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ValidationErrorBody = test::read_body_json(res).await;
        let fields: Vec<&str> = body.errors.iter().map(|error| error.field()).collect();
        assert_eq!(fields, expected_fields);
    }

    #[actix_web::test]
    async fn logout_revokes_token_and_expires_cookie() {
        let state = test_state();
        let sessions = state.sessions.clone();
        let token = sessions.issue().await.expect("issue");
        let app = app!(state);

        let req = test::TestRequest::post()
            .uri("/api/auth/logout")
            .cookie(Cookie::new(TOKEN_COOKIE, token.as_str().to_owned()))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let cleared = res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == TOKEN_COOKIE)
            .expect("removal cookie");
        assert_eq!(cleared.value(), "");
        assert!(!sessions.is_active(&token).await.expect("lookup"));
    }
}
