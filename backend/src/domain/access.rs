//! Admin route access decisions.
//!
//! The gate in front of the admin pages only asks two questions: is this the
//! login page, and did the caller present a credential at all. Whether the
//! credential is genuine is decided later by the handlers that need it.

use std::fmt;

/// Admin tree prefix guarded by the gate.
pub const ADMIN_PREFIX: &str = "/admin";
/// Login entry point inside the admin tree.
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";
/// Landing page for callers that already hold a credential.
pub const ADMIN_LANDING_PATH: &str = "/admin/dashboard";

/// Opaque authentication token read from a request.
///
/// ## Invariants
/// - never empty; blank cookies or headers count as absent.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token, returning `None` when it is blank.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Raw token text, for handlers that verify it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Anything the gate can read a path and a credential from.
///
/// The HTTP adapter implements this for live requests; tests use plain
/// structs.
pub trait CredentialSource {
    /// Request path without the query string.
    fn path(&self) -> &str;
    /// Token presented with the request, if any.
    fn credential(&self) -> Option<Credential>;
}

/// Outcome of the gate for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Hand the request to the next stage unchanged.
    Forward,
    /// Send the caller to the given path.
    Redirect(&'static str),
}

/// Prefix, login page and landing page fixed when the app is composed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessPolicy {
    prefix: &'static str,
    login_path: &'static str,
    landing_path: &'static str,
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::admin()
    }
}

impl AccessPolicy {
    /// Policy for the `/admin` tree.
    pub const fn admin() -> Self {
        Self::new(ADMIN_PREFIX, ADMIN_LOGIN_PATH, ADMIN_LANDING_PATH)
    }

    /// Policy for an arbitrary tree. `login_path` and `landing_path` should
    /// lie under `prefix`.
    pub const fn new(
        prefix: &'static str,
        login_path: &'static str,
        landing_path: &'static str,
    ) -> Self {
        Self {
            prefix,
            login_path,
            landing_path,
        }
    }

    /// Root of the guarded tree.
    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    /// Page anonymous callers are sent to.
    pub const fn login_path(&self) -> &'static str {
        self.login_path
    }

    /// Page signed-in callers land on when they open the login page.
    pub const fn landing_path(&self) -> &'static str {
        self.landing_path
    }

    /// Whether `path` lies in the guarded tree.
    ///
    /// Matching is per segment: `/admin` and `/admin/...` are covered,
    /// `/administrator` is not.
    pub fn covers(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }

    /// Apply the decision table to a request.
    ///
    /// # Examples
    /// ```
    /// use site_backend::domain::access::{AccessDecision, AccessPolicy, Credential, CredentialSource};
    ///
    /// struct Visit(&'static str, Option<&'static str>);
    ///
    /// impl CredentialSource for Visit {
    ///     fn path(&self) -> &str { self.0 }
    ///     fn credential(&self) -> Option<Credential> { self.1.and_then(Credential::new) }
    /// }
    ///
    /// let policy = AccessPolicy::admin();
    /// assert_eq!(
    ///     policy.evaluate(&Visit("/admin/reports", None)),
    ///     AccessDecision::Redirect("/admin/login"),
    /// );
    /// assert_eq!(policy.evaluate(&Visit("/careers", None)), AccessDecision::Forward);
    /// ```
    pub fn evaluate<R: CredentialSource + ?Sized>(&self, request: &R) -> AccessDecision {
        let path = request.path();
        if !self.covers(path) {
            return AccessDecision::Forward;
        }
        self.decide(path == self.login_path, request.credential().is_some())
    }

    /// The bare decision table.
    pub const fn decide(&self, is_login_page: bool, has_token: bool) -> AccessDecision {
        match (is_login_page, has_token) {
            (true, true) => AccessDecision::Redirect(self.landing_path),
            (true, false) | (false, true) => AccessDecision::Forward,
            (false, false) => AccessDecision::Redirect(self.login_path),
        }
    }
}
