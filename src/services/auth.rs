//! Credential verification for mutating endpoints

use subtle::ConstantTimeEq;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
};

#[derive(Clone)]
pub struct AuthService {
    config: AuthConfig,
}

impl AuthService {
    pub fn new(config: AuthConfig) -> Self {
        Self { config }
    }

    /// Check a username/password pair against the configured one.
    ///
    /// Both halves are compared in constant time and both comparisons always
    /// run, so the response time does not reveal which half was wrong.
    pub fn verify(&self, username: &str, password: &str) -> AppResult<()> {
        let username_ok = username.as_bytes().ct_eq(self.config.username.as_bytes());
        let password_ok = password.as_bytes().ct_eq(self.config.password.as_bytes());

        if bool::from(username_ok & password_ok) {
            Ok(())
        } else {
            tracing::warn!(username, "Rejected credentials");
            Err(AppError::Authentication(
                "Incorrect username or password".to_string(),
            ))
        }
    }
}
