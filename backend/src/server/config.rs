//! Site configuration loaded via OrthoConfig, and the server configuration
//! derived from it.
//!
//! Values layer CLI flags over `SITE_*` environment variables over the
//! optional configuration file.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use site_backend::domain::AdminAccount;
use thiserror::Error;
use zeroize::Zeroizing;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_TTL_MINUTES: u64 = 120;
const MIN_ADMIN_PASSWORD_LEN: usize = 8;

/// Raw configuration values.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SITE")]
pub struct SiteSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// E-mail address of the administrator.
    pub admin_email: Option<String>,
    /// Password of the administrator.
    pub admin_password: Option<String>,
    /// Mark the admin token cookie `Secure`. Defaults to `true`.
    pub cookie_secure: Option<bool>,
    /// Admin session lifetime in minutes.
    pub session_ttl_minutes: Option<u64>,
}

/// Configuration values that cannot start a server.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid bind address {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("SITE_ADMIN_EMAIL must be set")]
    MissingAdminEmail,
    #[error("SITE_ADMIN_PASSWORD must be set")]
    MissingAdminPassword,
    #[error("admin password must be at least {MIN_ADMIN_PASSWORD_LEN} characters")]
    WeakAdminPassword,
    #[error("session lifetime must be greater than zero")]
    ZeroSessionTtl,
}

impl SiteSettings {
    /// Configured bind address, falling back to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|source| ConfigError::InvalidBindAddr {
            value: raw.to_owned(),
            source,
        })
    }

    pub fn cookie_secure(&self) -> bool {
        self.cookie_secure.unwrap_or(true)
    }

    pub fn session_ttl(&self) -> Result<Duration, ConfigError> {
        match self.session_ttl_minutes.unwrap_or(DEFAULT_SESSION_TTL_MINUTES) {
            0 => Err(ConfigError::ZeroSessionTtl),
            minutes => Ok(Duration::from_secs(minutes.saturating_mul(60))),
        }
    }

    /// Build the administrator account. The plain password is wiped once
    /// its digest has been taken.
    pub fn admin_account(&self) -> Result<AdminAccount, ConfigError> {
        let email = self
            .admin_email
            .as_deref()
            .map(str::trim)
            .filter(|email| !email.is_empty())
            .ok_or(ConfigError::MissingAdminEmail)?;
        let password = self
            .admin_password
            .clone()
            .map(Zeroizing::new)
            .filter(|password| !password.is_empty())
            .ok_or(ConfigError::MissingAdminPassword)?;
        if password.chars().count() < MIN_ADMIN_PASSWORD_LEN {
            return Err(ConfigError::WeakAdminPassword);
        }
        Ok(AdminAccount::new(email, &password))
    }
}

/// Everything [`super::create_server`] needs.
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) admin: AdminAccount,
    pub(crate) cookie_secure: bool,
    pub(crate) session_ttl: Duration,
}

impl ServerConfig {
    /// Validate settings into a server configuration.
    pub fn from_settings(settings: &SiteSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            admin: settings.admin_account()?,
            cookie_secure: settings.cookie_secure(),
            session_ttl: settings.session_ttl()?,
        })
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;
    use site_backend::domain::LoginCredentials;

    const VARS: [&str; 5] = [
        "SITE_BIND_ADDR",
        "SITE_ADMIN_EMAIL",
        "SITE_ADMIN_PASSWORD",
        "SITE_COOKIE_SECURE",
        "SITE_SESSION_TTL_MINUTES",
    ];

    fn load_from_empty_args() -> SiteSettings {
        SiteSettings::load_from_iter([OsString::from("site-backend")])
            .expect("config should load")
    }

    fn env_with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| (*value).to_owned());
                (*name, value)
            })
            .collect()
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(env_with(&[]));

        let settings = load_from_empty_args();
        assert_eq!(
            settings.bind_addr().expect("default address"),
            DEFAULT_BIND_ADDR.parse::<SocketAddr>().expect("literal")
        );
        assert!(settings.cookie_secure());
        assert_eq!(
            settings.session_ttl().expect("default ttl"),
            Duration::from_secs(DEFAULT_SESSION_TTL_MINUTES * 60)
        );
        assert!(matches!(
            settings.admin_account(),
            Err(ConfigError::MissingAdminEmail)
        ));
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(env_with(&[
            ("SITE_BIND_ADDR", "127.0.0.1:9000"),
            ("SITE_ADMIN_EMAIL", "Owner@Example.com"),
            ("SITE_ADMIN_PASSWORD", "s3cret-enough"),
            ("SITE_COOKIE_SECURE", "false"),
            ("SITE_SESSION_TTL_MINUTES", "15"),
        ]));

        let config = ServerConfig::from_settings(&load_from_empty_args()).expect("valid config");
        assert_eq!(config.bind_addr().port(), 9000);
        assert!(!config.cookie_secure);
        assert_eq!(config.session_ttl, Duration::from_secs(15 * 60));
        assert_eq!(config.admin.email(), "owner@example.com");
        let creds =
            LoginCredentials::try_from_parts("owner@example.com", "s3cret-enough").expect("creds");
        assert!(config.admin.verify(&creds));
    }

    #[rstest]
    #[case(&[("SITE_BIND_ADDR", "not-an-address")], "invalid bind address")]
    #[case(&[("SITE_ADMIN_EMAIL", "a@b.c")], "SITE_ADMIN_PASSWORD must be set")]
    #[case(&[("SITE_ADMIN_EMAIL", "a@b.c"), ("SITE_ADMIN_PASSWORD", "short")], "at least 8")]
    #[case(
        &[("SITE_ADMIN_EMAIL", "a@b.c"), ("SITE_ADMIN_PASSWORD", "long enough"), ("SITE_SESSION_TTL_MINUTES", "0")],
        "greater than zero"
    )]
    fn invalid_settings_are_reported(
        #[case] overrides: &[(&'static str, &str)],
        #[case] fragment: &str,
    ) {
        let _guard = lock_env(env_with(overrides));

        let err = ServerConfig::from_settings(&load_from_empty_args())
            .err()
            .expect("configuration should be rejected");
        assert!(
            err.to_string().contains(fragment),
            "{err} should mention {fragment}"
        );
    }
}
