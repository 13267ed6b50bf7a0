//! Admin authentication primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// E-mail was missing or blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased and non-empty.
/// - `password` is non-empty and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use site_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Admin@Example.com ", "hunter22").unwrap();
/// assert_eq!(creds.email(), "admin@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw e-mail/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = email.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyEmail);
        }
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email: normalized.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// The single configured administrator.
///
/// Only a digest of the password is retained after construction.
#[derive(Clone)]
pub struct AdminAccount {
    email: String,
    password_digest: [u8; 32],
}

impl AdminAccount {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_digest: digest(password),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Compare supplied credentials with the configured account.
    ///
    /// Both sides are reduced to fixed-length digests and every byte is
    /// compared, so timing does not depend on where the inputs differ.
    pub fn verify(&self, credentials: &LoginCredentials) -> bool {
        let email_matches = digest(credentials.email()) == digest(&self.email);
        let candidate = digest(credentials.password());
        let password_matches = candidate
            .iter()
            .zip(self.password_digest.iter())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0;
        email_matches & password_matches
    }
}

impl std::fmt::Debug for AdminAccount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminAccount")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

fn digest(value: &str) -> [u8; 32] {
    Sha256::digest(value.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn account() -> AdminAccount {
        AdminAccount::new("admin@example.com", "correct horse")
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyEmail)]
    #[case("   ", "pw", LoginValidationError::EmptyEmail)]
    #[case("admin@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("admin@example.com", "correct horse", true)]
    #[case("ADMIN@example.com ", "correct horse", true)]
    #[case("admin@example.com", "correct horse ", false)]
    #[case("other@example.com", "correct horse", false)]
    fn verify_matches_configured_account(
        account: AdminAccount,
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: bool,
    ) {
        let creds = LoginCredentials::try_from_parts(email, password).expect("well-formed");
        assert_eq!(account.verify(&creds), expected);
    }

    #[rstest]
    fn debug_omits_password_digest(account: AdminAccount) {
        let rendered = format!("{account:?}");
        assert!(rendered.contains("admin@example.com"));
        assert!(!rendered.contains("password_digest"));
    }
}
