//! Route access gate for the admin pages.
//!
//! Wrap the app (or any scope) with [`AccessGate`]; requests outside the
//! policy prefix pass straight through. Inside the prefix the gate redirects
//! per [`AccessPolicy::decide`] and never looks at token validity.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::LOCATION;
use actix_web::{Error, HttpResponse};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::access::{AccessDecision, AccessPolicy};

/// Middleware factory holding the policy fixed at composition time.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use site_backend::inbound::http::access_gate::AccessGate;
///
/// let app = App::new().wrap(AccessGate::admin());
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AccessGate {
    policy: AccessPolicy,
}

impl AccessGate {
    pub fn new(policy: AccessPolicy) -> Self {
        Self { policy }
    }

    /// Gate for the `/admin` tree.
    pub fn admin() -> Self {
        Self::new(AccessPolicy::admin())
    }
}

impl<S, B> Transform<S, ServiceRequest> for AccessGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AccessGateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AccessGateMiddleware {
            service,
            policy: self.policy,
        }))
    }
}

/// Service wrapper produced by [`AccessGate`].
pub struct AccessGateMiddleware<S> {
    service: S,
    policy: AccessPolicy,
}

impl<S, B> Service<ServiceRequest> for AccessGateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match self.policy.evaluate(&req) {
            AccessDecision::Forward => {
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            AccessDecision::Redirect(location) => {
                debug!(path = %req.path(), location, "admin gate redirect");
                let response = HttpResponse::TemporaryRedirect()
                    .insert_header((LOCATION, location))
                    .finish();
                Box::pin(ready(Ok(req.into_response(response).map_into_right_body())))
            }
        }
    }
}
