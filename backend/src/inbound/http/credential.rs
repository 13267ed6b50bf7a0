//! Reading the admin credential from live requests.
//!
//! The token travels in the `token` cookie set at login. API clients that
//! cannot hold cookies may send it as `Authorization: Bearer <token>`
//! instead; the cookie wins when both are present.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::dev::ServiceRequest;
use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::HttpRequest;

use crate::domain::access::{Credential, CredentialSource};

/// Cookie holding the admin token.
pub const TOKEN_COOKIE: &str = "token";

const BEARER_PREFIX: &str = "Bearer ";

/// `HttpOnly`, `SameSite=Lax` cookie carrying `value`.
pub fn token_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(TOKEN_COOKIE, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

/// Cookie instructing the browser to drop its token.
pub fn expired_token_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = token_cookie(String::new(), secure);
    cookie.make_removal();
    cookie
}

fn credential_from(cookie: Option<Cookie<'_>>, headers: &HeaderMap) -> Option<Credential> {
    cookie
        .and_then(|cookie| Credential::new(cookie.value()))
        .or_else(|| {
            headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.strip_prefix(BEARER_PREFIX))
                .and_then(Credential::new)
        })
}

/// Credential presented with `req`, if any.
pub fn request_credential(req: &HttpRequest) -> Option<Credential> {
    credential_from(req.cookie(TOKEN_COOKIE), req.headers())
}

impl CredentialSource for ServiceRequest {
    fn path(&self) -> &str {
        ServiceRequest::path(self)
    }

    fn credential(&self) -> Option<Credential> {
        credential_from(self.cookie(TOKEN_COOKIE), self.headers())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use rstest::rstest;

    #[rstest]
    fn token_cookie_is_http_only_and_lax() {
        let cookie = token_cookie("abc".to_owned(), true);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        let expired = expired_token_cookie(false);
        assert_eq!(expired.value(), "");
        assert_eq!(expired.max_age(), Some(actix_web::cookie::time::Duration::ZERO));
    }

    #[rstest]
    fn reads_cookie() {
        let req = TestRequest::get()
            .uri("/admin/reports")
            .cookie(Cookie::new(TOKEN_COOKIE, "from-cookie"))
            .to_srv_request();
        assert_eq!(CredentialSource::path(&req), "/admin/reports");
        let credential = CredentialSource::credential(&req).expect("credential");
        assert_eq!(credential.as_str(), "from-cookie");
    }

    #[rstest]
    fn falls_back_to_bearer_header() {
        let req = TestRequest::get()
            .insert_header((AUTHORIZATION, "Bearer from-header"))
            .to_http_request();
        let credential = request_credential(&req).expect("credential");
        assert_eq!(credential.as_str(), "from-header");
    }

    #[rstest]
    fn cookie_wins_over_header() {
        let req = TestRequest::get()
            .cookie(Cookie::new(TOKEN_COOKIE, "from-cookie"))
            .insert_header((AUTHORIZATION, "Bearer from-header"))
            .to_http_request();
        assert_eq!(
            request_credential(&req).map(|c| c.as_str().to_owned()).as_deref(),
            Some("from-cookie")
        );
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(None, Some("Basic dXNlcjpwdw=="))]
    #[case(None, Some("Bearer "))]
    fn blank_or_foreign_values_are_absent(
        #[case] cookie: Option<&str>,
        #[case] authorization: Option<&str>,
    ) {
        let mut builder = TestRequest::get();
        if let Some(value) = cookie {
            builder = builder.cookie(Cookie::new(TOKEN_COOKIE, value.to_owned()));
        }
        if let Some(value) = authorization {
            builder = builder.insert_header((AUTHORIZATION, value.to_owned()));
        }
        assert!(request_credential(&builder.to_http_request()).is_none());
    }
}
