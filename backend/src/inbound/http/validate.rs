//! Schema validation middleware.
//!
//! [`Validate`] checks one request slice against a process-wide [`Schema`]
//! before the handler runs. Valid requests continue untouched, including the
//! exact body bytes. Invalid ones are answered here with `400` and a
//! `{ success, message, errors }` envelope listing every violation.
//!
//! ```text
//! web::resource("/api/applications")
//!     .wrap(Validate::body(&schemas::APPLICATION))
//!     .route(web::post().to(submit_application))
//! ```

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{self, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{Error, HttpResponse, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::validation::{FieldViolation, Schema, Slice};

/// Fixed `message` of the failure envelope.
pub const VALIDATION_ERROR_MESSAGE: &str = "Validation Error";

/// Body of a `400` produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrorBody {
    pub success: bool,
    pub message: String,
    pub errors: Vec<FieldViolation>,
}

impl ValidationErrorBody {
    pub fn new(errors: Vec<FieldViolation>) -> Self {
        Self {
            success: false,
            message: VALIDATION_ERROR_MESSAGE.to_owned(),
            errors,
        }
    }
}

/// Build a validator for `schema` over `slice`.
pub fn validate(schema: &'static Schema, slice: Slice) -> Validate {
    Validate { schema, slice }
}

/// Middleware factory binding a schema to a request slice.
#[derive(Clone, Copy, Debug)]
pub struct Validate {
    schema: &'static Schema,
    slice: Slice,
}

impl Validate {
    /// Validate the JSON body.
    pub fn body(schema: &'static Schema) -> Self {
        validate(schema, Slice::Body)
    }

    /// Validate the query string.
    pub fn query(schema: &'static Schema) -> Self {
        validate(schema, Slice::Query)
    }

    /// Validate matched path parameters.
    pub fn params(schema: &'static Schema) -> Self {
        validate(schema, Slice::Params)
    }
}

impl<S, B> Transform<S, ServiceRequest> for Validate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ValidateMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ValidateMiddleware {
            service: Rc::new(service),
            schema: self.schema,
            slice: self.slice,
        }))
    }
}

/// Service wrapper produced by [`Validate`].
pub struct ValidateMiddleware<S> {
    service: Rc<S>,
    schema: &'static Schema,
    slice: Slice,
}

impl<S, B> Service<ServiceRequest> for ValidateMiddleware<S>
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

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let schema = self.schema;
        let slice = self.slice;

        Box::pin(async move {
            let violations = match read_slice(&mut req, slice).await {
                Ok(payload) => schema.evaluate_slice(&payload, slice),
                Err(unreadable) => vec![unreadable],
            };
            if violations.is_empty() {
                return service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body);
            }

            debug!(
                path = %req.path(),
                slice = %slice,
                violations = violations.len(),
                "request failed validation"
            );
            let response = HttpResponse::BadRequest().json(ValidationErrorBody::new(violations));
            Ok(req.into_response(response).map_into_right_body())
        })
    }
}

/// Read `slice` as a JSON object without consuming it for later stages.
async fn read_slice(req: &mut ServiceRequest, slice: Slice) -> Result<Value, FieldViolation> {
    match slice {
        Slice::Body => read_body(req).await,
        Slice::Query => read_query(req),
        Slice::Params => Ok(Value::Object(
            req.match_info()
                .iter()
                .map(|(name, value)| (name.to_owned(), Value::String(value.to_owned())))
                .collect(),
        )),
    }
}

async fn read_body(req: &mut ServiceRequest) -> Result<Value, FieldViolation> {
    let bytes = req.extract::<web::Bytes>().await.map_err(|err| {
        debug!(error = %err, "request body could not be read");
        FieldViolation::new("body", "\"body\" could not be read")
    })?;
    req.set_payload(replay(bytes.clone()));

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(&bytes)
        .map_err(|_| FieldViolation::new("body", "\"body\" must be valid JSON"))
}

fn read_query(req: &ServiceRequest) -> Result<Value, FieldViolation> {
    let pairs = web::Query::<Vec<(String, String)>>::from_query(req.query_string())
        .map_err(|_| FieldViolation::new("query", "\"query\" could not be parsed"))?
        .into_inner();

    let mut map = Map::new();
    for (key, value) in pairs {
        let value = Value::String(value);
        match map.get_mut(&key) {
            Some(Value::Array(values)) => values.push(value),
            Some(existing) => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
            None => {
                map.insert(key, value);
            }
        }
    }
    Ok(Value::Object(map))
}

fn replay(bytes: web::Bytes) -> dev::Payload {
    let (_, mut payload) = actix_http::h1::Payload::create(true);
    payload.unread_data(bytes);
    dev::Payload::from(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::{Rule, StringFormat};
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::LazyLock;

    static CONTACT: LazyLock<Schema> = LazyLock::new(|| {
        Schema::strict()
            .required("name", Rule::string().min_len(2))
            .required("email", Rule::string().format(StringFormat::Email))
            .optional(
                "address",
                Schema::strict().required("zip", Rule::string().max_len(5)),
            )
    });

    static SEARCH: LazyLock<Schema> = LazyLock::new(|| {
        Schema::strict()
            .optional("page", Rule::integer().min(1.0))
            .optional("tag", Rule::array(Rule::string()).max_items(2))
    });

    static ITEM: LazyLock<Schema> =
        LazyLock::new(|| Schema::strict().required("id", Rule::string().format(StringFormat::Uuid)));

    async fn echo(body: web::Bytes) -> HttpResponse {
        HttpResponse::Ok().body(body)
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .service(
                        web::resource("/contact")
                            .wrap(Validate::body(&CONTACT))
                            .route(web::post().to(echo)),
                    )
                    .service(
                        web::resource("/search")
                            .wrap(Validate::query(&SEARCH))
                            .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
                    )
                    .service(
                        web::resource("/items/{id}")
                            .wrap(Validate::params(&ITEM))
                            .route(web::get().to(|| async { HttpResponse::Ok().finish() })),
                    ),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn valid_body_reaches_handler_byte_for_byte() {
        let app = app!();
        let raw = r#"{ "name": "Ada",  "email": "ada@example.com" }"#;
        let req = test::TestRequest::post()
            .uri("/contact")
            .insert_header(("content-type", "application/json"))
            .set_payload(raw)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, raw.as_bytes());
    }

    #[rstest]
    #[case(json!({ "name": "Ada" }), &["email"])]
    #[case(json!({ "name": "A", "email": "x" }), &["name", "email"])]
    #[case(json!({ "name": "Ada", "email": "ada@example.com", "address": { "zip": "1234567" } }), &["address.zip"])]
    #[case(json!({ "name": "Ada", "email": "ada@example.com", "admin": true }), &["admin"])]
    #[actix_web::test]
    async fn invalid_body_is_answered_with_every_violation(
        #[case] payload: Value,
        #[case] expected_fields: &[&str],
    ) {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/contact")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ValidationErrorBody = test::read_body_json(res).await;
        assert!(!body.success);
        assert_eq!(body.message, "Validation Error");
        let fields: Vec<_> = body.errors.iter().map(FieldViolation::field).collect();
        assert_eq!(fields, expected_fields);
    }

    #[rstest]
    #[case("not json", "\"body\" must be valid JSON")]
    #[case("[1, 2]", "\"body\" must be of type object")]
    #[actix_web::test]
    async fn unusable_bodies_use_the_same_envelope(#[case] raw: &'static str, #[case] message: &str) {
        let app = app!();
        let req = test::TestRequest::post()
            .uri("/contact")
            .set_payload(raw)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: ValidationErrorBody = test::read_body_json(res).await;
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].field(), "body");
        assert_eq!(body.errors[0].message(), message);
    }

    #[actix_web::test]
    async fn empty_body_is_an_empty_object() {
        let app = app!();
        let req = test::TestRequest::post().uri("/contact").to_request();
        let body: ValidationErrorBody =
            test::read_body_json(test::call_service(&app, req).await).await;
        let fields: Vec<_> = body.errors.iter().map(FieldViolation::field).collect();
        assert_eq!(fields, ["name", "email"]);
    }

    #[rstest]
    #[case("/search", StatusCode::OK)]
    #[case("/search?page=3&tag=rust", StatusCode::OK)]
    #[case("/search?tag=rust&tag=sql", StatusCode::OK)]
    #[case("/search?page=0", StatusCode::BAD_REQUEST)]
    #[case("/search?tag=a&tag=b&tag=c", StatusCode::BAD_REQUEST)]
    #[case("/search?sort=desc", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn query_slice(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), expected);
    }

    #[rstest]
    #[case("/items/3fa85f64-5717-4562-b3fc-2c963f66afa6", StatusCode::OK)]
    #[case("/items/42", StatusCode::BAD_REQUEST)]
    #[actix_web::test]
    async fn params_slice(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = app!();
        let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(res.status(), expected);
    }

    #[actix_web::test]
    async fn params_violation_names_the_parameter() {
        let app = app!();
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/items/42").to_request()).await;
        let body: ValidationErrorBody = test::read_body_json(res).await;
        assert_eq!(body.errors.len(), 1);
        assert_eq!(body.errors[0].field(), "id");
        assert_eq!(body.errors[0].message(), "\"id\" must be a valid GUID");
    }
}
