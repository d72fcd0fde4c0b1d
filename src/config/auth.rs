//! Authentication configuration: session-token verification and the
//! service key guarding `/service` routes.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HS256 secret shared with the session issuer
    pub jwt_secret: SecretString,

    /// Expected `aud` claim
    #[serde(default = "default_audience")]
    pub audience: String,

    /// Expected `iss` claim; unchecked when absent
    #[serde(default)]
    pub issuer: Option<String>,

    /// Shared secret for the identity hook and admin routes
    pub service_key: SecretString,
}

impl AuthConfig {
    /// Validate authentication configuration
    ///
    /// Secrets must be at least `MIN_SECRET_BYTES` long outside development.
    /// In production the issuer, when set, must be an HTTPS URL.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.service_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SERVICE_KEY"));
        }
        if self.audience.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUDIENCE"));
        }

        if *environment != Environment::Development {
            if self.jwt_secret.expose_secret().len() < MIN_SECRET_BYTES {
                return Err(ValidationError::JwtSecretTooShort(MIN_SECRET_BYTES));
            }
            if self.service_key.expose_secret().len() < MIN_SECRET_BYTES {
                return Err(ValidationError::ServiceKeyTooShort(MIN_SECRET_BYTES));
            }
        }

        if *environment == Environment::Production {
            if let Some(issuer) = &self.issuer {
                if !issuer.starts_with("https://") {
                    return Err(ValidationError::IssuerMustBeHttps);
                }
            }
        }

        Ok(())
    }
}

fn default_audience() -> String {
    "authenticated".to_string()
}
