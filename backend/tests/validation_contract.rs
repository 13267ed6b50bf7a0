//! Shape of validation failures returned by the composed application.

#[path = "support/site.rs"]
mod site;

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::rstest;
use serde_json::{Value, json};
use site_backend::inbound::http::app::build_app;

fn fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|violation| {
            violation["field"]
                .as_str()
                .expect("field is a string")
                .to_owned()
        })
        .collect()
}

#[actix_web::test]
async fn failure_envelope_has_the_documented_shape() {
    let app = test::init_service(build_app(site::dependencies())).await;
    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({ "name": "A", "email": "nope", "message": "hi" }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["message"], json!("Validation Error"));
    assert_eq!(fields(&body), ["name", "email", "message"]);
    for violation in body["errors"].as_array().expect("errors array") {
        let message = violation["message"].as_str().expect("message is a string");
        assert!(!message.is_empty());
        assert_eq!(violation.as_object().map(|obj| obj.len()), Some(2));
    }
}

#[actix_web::test]
async fn nested_fields_are_reported_with_dotted_paths() {
    let app = test::init_service(build_app(site::dependencies())).await;
    let req = test::TestRequest::post()
        .uri("/api/applications")
        .set_json(json!({
            "fullName": "Grace Hopper",
            "email": "grace@example.com",
            "position": "Backend Engineer",
            "skills": ["rust", 7],
            "address": { "city": "B", "zip": "10115" }
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(fields(&body), ["skills.1", "address.city"]);
}

#[rstest]
#[case(json!({ "email": "admin@example.com" }), &["password"])]
#[case(json!({ "email": "admin@example.com", "password": "long enough", "remember": true }), &["remember"])]
#[case(json!([1, 2, 3]), &["body"])]
#[actix_web::test]
async fn login_payload_is_checked_strictly(#[case] payload: Value, #[case] expected: &[&str]) {
    let app = test::init_service(build_app(site::dependencies())).await;
    let req = test::TestRequest::post()
        .uri("/api/auth/login")
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(fields(&body), expected);
}

#[actix_web::test]
async fn valid_request_reaches_the_handler_unchanged() {
    let app = test::init_service(build_app(site::dependencies())).await;
    let req = test::TestRequest::post()
        .uri("/api/contact")
        .set_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "subject": "Partnership",
            "message": "We would like to talk about analytical engines.",
            "utm_source": "newsletter"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["name"], json!("Ada Lovelace"));
    assert_eq!(
        body["data"]["message"],
        json!("We would like to talk about analytical engines.")
    );
}

#[actix_web::test]
async fn query_violations_precede_the_session_check() {
    let app = test::init_service(build_app(site::dependencies())).await;
    let req = test::TestRequest::get()
        .uri("/api/contact?page=0")
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(fields(&body), ["page"]);
}

#[rstest]
#[case("/api/applications?page=2.0", &["page"])]
#[case("/api/applications?page=4294967296", &["page"])]
#[case("/api/contact?limit=5.0", &["limit"])]
#[actix_web::test]
async fn non_integral_page_values_get_the_validation_envelope(
    #[case] uri: &str,
    #[case] expected: &[&str],
) {
    let app = test::init_service(build_app(site::dependencies())).await;
    let cookie = site::login_cookie(&app).await;
    let req = test::TestRequest::get()
        .uri(uri)
        .cookie(cookie)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], json!("Validation Error"));
    assert_eq!(fields(&body), expected);
}
