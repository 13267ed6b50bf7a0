//! Request schemas for every route that accepts input.
//!
//! Each schema is built once on first use and lives for the whole process,
//! so the [`Validate`](super::validate::Validate) middleware can borrow it
//! as `&'static`.
//!
//! Login and admin-only payloads are strict and reject undeclared keys.
//! Public forms are lenient: visitors' browsers and form builders tend to send
//! extra fields, which are ignored rather than refused.

use std::sync::LazyLock;

use crate::domain::ApplicationStatus;
use crate::domain::validation::{Rule, Schema, StringFormat};

const ZIP_PATTERN: &str = r"^[A-Za-z0-9][A-Za-z0-9 -]{2,9}$";

fn page_fields(schema: Schema) -> Schema {
    schema
        .optional("page", Rule::integer().min(1.0).max(f64::from(u32::MAX)))
        .optional("limit", Rule::integer().min(1.0).max(100.0))
}

/// `POST /api/auth/login` body.
pub static LOGIN: LazyLock<Schema> = LazyLock::new(|| {
    Schema::strict()
        .required("email", Rule::string().format(StringFormat::Email))
        .required("password", Rule::string().min_len(8).max_len(128))
});

/// `POST /api/applications` body.
pub static APPLICATION: LazyLock<Schema> = LazyLock::new(|| {
    let address = Schema::lenient()
        .required("city", Rule::string().min_len(2).max_len(100))
        .required(
            "zip",
            Rule::string().format(StringFormat::pattern("zip code", ZIP_PATTERN)),
        );

    Schema::lenient()
        .required("fullName", Rule::string().min_len(2).max_len(100))
        .required("email", Rule::string().format(StringFormat::Email))
        .optional("phone", Rule::string().format(StringFormat::Phone))
        .required("position", Rule::string().min_len(2).max_len(120))
        .optional("experienceYears", Rule::integer().min(0.0).max(60.0))
        .optional("portfolioUrl", Rule::string().format(StringFormat::Url))
        .optional("coverLetter", Rule::string().max_len(5000))
        .optional(
            "skills",
            Rule::array(Rule::string().max_len(50)).max_items(20),
        )
        .optional("address", address)
});

/// `GET /api/applications` query.
pub static APPLICATION_LIST_QUERY: LazyLock<Schema> = LazyLock::new(|| {
    page_fields(Schema::strict().optional("status", Rule::one_of(&ApplicationStatus::NAMES)))
});

/// `{id}` segment of `/api/applications/{id}` routes.
pub static APPLICATION_ID_PARAMS: LazyLock<Schema> = LazyLock::new(|| {
    Schema::strict().required("id", Rule::string().format(StringFormat::Uuid))
});

/// `PATCH /api/applications/{id}/status` body.
pub static STATUS_UPDATE: LazyLock<Schema> = LazyLock::new(|| {
    Schema::strict().required("status", Rule::one_of(&ApplicationStatus::NAMES))
});

/// `POST /api/contact` body.
pub static CONTACT: LazyLock<Schema> = LazyLock::new(|| {
    Schema::lenient()
        .required("name", Rule::string().min_len(2).max_len(100))
        .required("email", Rule::string().format(StringFormat::Email))
        .optional("company", Rule::string().max_len(100))
        .optional("subject", Rule::string().max_len(150))
        .required("message", Rule::string().min_len(10).max_len(2000))
});

/// Paging query shared by admin listings.
pub static PAGE_QUERY: LazyLock<Schema> = LazyLock::new(|| page_fields(Schema::strict()));
