//! External authentication service client.
//!
//! The storefront never stores credentials or sessions locally; the login and
//! signup screens delegate truth to a remote auth service over JSON. Failures
//! come back as user-visible form errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

/// Errors returned by the auth service client.
#[derive(Debug, Error)]
pub enum AuthError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Wrong email or password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The service rejected the signup (duplicate email, weak password, ...).
    #[error("registration rejected: {0}")]
    Rejected(String),

    /// Any other non-success status.
    #[error("auth service returned status {0}")]
    Status(reqwest::StatusCode),
}

/// An authenticated session as returned by the auth service.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub token: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RegisterRequest<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct RejectionBody {
    #[serde(default)]
    message: Option<String>,
}

/// Client for the external authentication service.
#[derive(Debug, Clone)]
pub struct AuthClient {
    client: reqwest::Client,
    base_url: String,
}

impl AuthClient {
    /// Create a new auth client against `base_url` (no trailing slash).
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Authenticate with email and password.
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on a 401/403, `Status` on any other non-success
    /// response, `Http` on transport failure.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::Status(status));
        }
        Ok(response.json().await?)
    }

    /// Create a new account.
    ///
    /// # Errors
    ///
    /// `Rejected` with the service's message on a 4xx, `Status` on other
    /// non-success responses, `Http` on transport failure.
    #[instrument(skip(self, password))]
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, AuthError> {
        let response = self
            .client
            .post(format!("{}/register", self.base_url))
            .json(&RegisterRequest {
                name,
                email,
                password,
            })
            .send()
            .await?;

        let status = response.status();
        if status.is_client_error() {
            let message = response
                .json::<RejectionBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "registration was rejected".to_string());
            return Err(AuthError::Rejected(message));
        }
        if !status.is_success() {
            return Err(AuthError::Status(status));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "invalid credentials"
        );
        assert_eq!(
            AuthError::Rejected("email already in use".to_string()).to_string(),
            "registration rejected: email already in use"
        );
    }
}
