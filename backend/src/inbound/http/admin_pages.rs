//! Server-rendered admin pages.
//!
//! Both pages sit under the access gate. The gate only knows whether a token
//! is present, so the dashboard still resolves an [`AdminSession`] and sends
//! visitors holding a stale or forged token back to the login page.

use std::fmt::Write as _;

use actix_web::http::header::{CACHE_CONTROL, ContentType, LOCATION};
use actix_web::{HttpResponse, get, web};
use tracing::debug;

use crate::domain::access::ADMIN_LOGIN_PATH;
use crate::domain::{ApplicationStatus, Error, ErrorCode};
use crate::inbound::http::ApiResult;
use crate::inbound::http::credential::expired_token_cookie;
use crate::inbound::http::{applications, contact};
use crate::inbound::http::session::AdminSession;
use crate::inbound::http::state::HttpState;

const LOGIN_PAGE: &str = r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Admin login</title></head>
<body>
<main>
<h1>Admin login</h1>
<form id="login">
<label>E-mail <input name="email" type="email" autocomplete="username" required></label>
<label>Password <input name="password" type="password" autocomplete="current-password" minlength="8" required></label>
<button type="submit">Sign in</button>
</form>
<p id="status" role="alert"></p>
</main>
<script>
document.getElementById("login").addEventListener("submit", async (event) => {
  event.preventDefault();
  const form = new FormData(event.target);
  const res = await fetch("/api/auth/login", {
    method: "POST",
    headers: { "Content-Type": "application/json" },
    body: JSON.stringify({ email: form.get("email"), password: form.get("password") }),
  });
  if (res.ok) { window.location.assign("/admin/dashboard"); return; }
  const body = await res.json().catch(() => ({}));
  document.getElementById("status").textContent =
    body.errors ? body.errors.map((e) => e.message).join("; ") : (body.message || "Login failed");
});
</script>
</body>
</html>
"#;

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .insert_header((CACHE_CONTROL, "no-store"))
        .body(body)
}

/// Admin login entry point.
#[utoipa::path(
    get,
    path = "/admin/login",
    responses(
        (status = 200, description = "Login form", content_type = "text/html"),
        (status = 307, description = "Already holding a token; sent to the dashboard")
    ),
    tags = ["admin"],
    security([])
)]
#[get("/login")]
pub async fn login_page() -> HttpResponse {
    html(LOGIN_PAGE.to_owned())
}

/// Admin landing page with collection counts.
#[utoipa::path(
    get,
    path = "/admin/dashboard",
    responses(
        (status = 200, description = "Dashboard", content_type = "text/html"),
        (status = 307, description = "No valid session; sent to the login page")
    ),
    tags = ["admin"]
)]
#[get("/dashboard")]
pub async fn dashboard(
    session: Result<AdminSession, Error>,
    state: web::Data<HttpState>,
) -> ApiResult<HttpResponse> {
    match session {
        Ok(_) => {}
        Err(error) if error.code() == ErrorCode::Unauthorized => {
            debug!("dashboard requested without a live session");
            // Drop the dead token, otherwise the gate bounces the login page
            // straight back here.
            return Ok(HttpResponse::TemporaryRedirect()
                .insert_header((LOCATION, ADMIN_LOGIN_PATH))
                .cookie(expired_token_cookie(state.cookie_secure))
                .finish());
        }
        Err(error) => return Err(error),
    }

    let counts = state
        .applications
        .count_by_status()
        .await
        .map_err(applications::map_repository_error)?;
    let enquiries = state
        .enquiries
        .count()
        .await
        .map_err(contact::map_repository_error)?;

    Ok(html(render_dashboard(&counts, enquiries)))
}

fn render_dashboard(counts: &[(ApplicationStatus, usize)], enquiries: usize) -> String {
    let total: usize = counts.iter().map(|(_, count)| count).sum();
    let mut rows = String::new();
    for (status, count) in counts {
        // Writing to a String cannot fail.
        let _ = writeln!(rows, "<tr><th>{}</th><td>{count}</td></tr>", status.as_str());
    }
    format!(
        r#"<!doctype html>
<html lang="en">
<head><meta charset="utf-8"><title>Admin dashboard</title></head>
<body>
<main>
<h1>Dashboard</h1>
<section>
<h2>Applications ({total})</h2>
<table>
{rows}</table>
</section>
<section>
<h2>Enquiries</h2>
<p>{enquiries} received</p>
</section>
<form method="post" action="/api/auth/logout"><button type="submit">Sign out</button></form>
</main>
</body>
</html>
"#
    )
}
