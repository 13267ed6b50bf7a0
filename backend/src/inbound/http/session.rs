//! Admin session extractor.
//!
//! The access gate lets any request carrying a token through to `/admin`
//! pages. Handlers that act for the administrator take an [`AdminSession`]
//! argument instead, which only resolves when the presented token is known to
//! the session store.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use tracing::debug;

use crate::domain::Error;
use crate::domain::access::Credential;
use crate::domain::ports::SessionStoreError;
use crate::inbound::http::credential::request_credential;
use crate::inbound::http::state::HttpState;

/// Proof that the request belongs to a logged-in administrator.
#[derive(Debug, Clone)]
pub struct AdminSession {
    token: Credential,
}

impl AdminSession {
    /// Token the session was established with.
    pub fn token(&self) -> &Credential {
        &self.token
    }
}

pub(crate) fn map_session_error(error: SessionStoreError) -> Error {
    match error {
        SessionStoreError::Unavailable { message } => {
            Error::service_unavailable(format!("session store unavailable: {message}"))
        }
    }
}

impl FromRequest for AdminSession {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let credential = request_credential(req);
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
            let token = credential.ok_or_else(|| Error::unauthorized("login required"))?;
            let active = state
                .sessions
                .is_active(&token)
                .await
                .map_err(map_session_error)?;
            if !active {
                debug!("rejected unknown or expired admin token");
                return Err(Error::unauthorized("session is invalid or has expired"));
            }
            Ok(Self { token })
        })
    }
}
