//! Authentication configuration: token signing, password hashing and the
//! optional first administrator.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

const MIN_SECRET_BYTES: usize = 32;
const MIN_TOKEN_TTL_SECS: u64 = 60;
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;
const MIN_PRODUCTION_ITERATIONS: u32 = 100_000;

#[derive(Debug, Deserialize)]
pub struct AuthConfig {
    /// HS256 signing key for session tokens
    pub jwt_secret: SecretString,

    /// Session token lifetime in seconds
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,

    /// PBKDF2 rounds for new password hashes
    #[serde(default = "default_password_iterations")]
    pub password_iterations: u32,

    /// Created at startup when no administrator exists yet.
    pub admin_username: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<SecretString>,
}

/// The configured first administrator.
#[derive(Debug)]
pub struct BootstrapAdmin<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a SecretString,
}

impl AuthConfig {
    /// Returns the bootstrap admin when all three fields are set.
    pub fn bootstrap_admin(&self) -> Option<BootstrapAdmin<'_>> {
        match (&self.admin_username, &self.admin_email, &self.admin_password) {
            (Some(username), Some(email), Some(password)) => Some(BootstrapAdmin {
                username,
                email,
                password,
            }),
            _ => None,
        }
    }

    /// The secret length and hashing cost apply in every environment; the
    /// iteration floor only in production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if secret.len() < MIN_SECRET_BYTES {
            return Err(ValidationError::JwtSecretTooShort(MIN_SECRET_BYTES));
        }
        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(ValidationError::InvalidTokenTtl);
        }
        if *environment == Environment::Production
            && self.password_iterations < MIN_PRODUCTION_ITERATIONS
        {
            return Err(ValidationError::TooFewIterations(MIN_PRODUCTION_ITERATIONS));
        }

        let given = [
            self.admin_username.is_some(),
            self.admin_email.is_some(),
            self.admin_password.is_some(),
        ];
        if given.iter().any(|g| *g) && !given.iter().all(|g| *g) {
            return Err(ValidationError::IncompleteBootstrapAdmin);
        }
        Ok(())
    }
}

fn default_token_ttl() -> u64 {
    8 * 60 * 60
}

fn default_password_iterations() -> u32 {
    600_000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig {
            jwt_secret: SecretString::new(secret.to_string()),
            token_ttl_secs: default_token_ttl(),
            password_iterations: default_password_iterations(),
            admin_username: None,
            admin_email: None,
            admin_password: None,
        }
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn valid_secret_passes() {
        assert!(config(SECRET).validate(&Environment::Production).is_ok());
    }

    #[test]
    fn short_secret_is_rejected() {
        assert_eq!(
            config("short").validate(&Environment::Development),
            Err(ValidationError::JwtSecretTooShort(32))
        );
        assert_eq!(
            config("").validate(&Environment::Development),
            Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"))
        );
    }

    #[test]
    fn token_ttl_must_be_sane() {
        let mut c = config(SECRET);
        c.token_ttl_secs = 5;
        assert_eq!(c.validate(&Environment::Development), Err(ValidationError::InvalidTokenTtl));
    }

    #[test]
    fn cheap_hashing_is_only_allowed_outside_production() {
        let mut c = config(SECRET);
        c.password_iterations = 1_000;
        assert!(c.validate(&Environment::Development).is_ok());
        assert_eq!(
            c.validate(&Environment::Production),
            Err(ValidationError::TooFewIterations(100_000))
        );
    }

    #[test]
    fn bootstrap_admin_needs_every_field() {
        let mut c = config(SECRET);
        assert!(c.bootstrap_admin().is_none());

        c.admin_username = Some("admin".to_string());
        assert_eq!(
            c.validate(&Environment::Development),
            Err(ValidationError::IncompleteBootstrapAdmin)
        );

        c.admin_email = Some("admin@example.com".to_string());
        c.admin_password = Some(SecretString::new("admin123".to_string()));
        assert!(c.validate(&Environment::Development).is_ok());
        assert_eq!(c.bootstrap_admin().map(|a| a.username), Some("admin"));
    }
}
