//! Auth endpoints

use crate::http::{HttpClient, NetworkHttpClient};
use crate::token::TokenStore;
use crate::{ClientConfig, ClientResult};
use serde::de::IgnoredAny;
use shared::client::{CurrentUserResponse, LoginRequest, LoginResponse};
use std::sync::Arc;

/// Local login/logout; keeps the token store in sync with the session
pub struct AuthRepository<H: HttpClient = NetworkHttpClient> {
    http: Arc<H>,
    token_store: Arc<dyn TokenStore>,
    config: ClientConfig,
}

impl<H: HttpClient> AuthRepository<H> {
    pub fn new(http: Arc<H>, token_store: Arc<dyn TokenStore>, config: ClientConfig) -> Self {
        Self {
            http,
            token_store,
            config,
        }
    }

    /// `POST /auth/login`; the returned token is persisted
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: self.config.login_password(password),
        };
        let response: LoginResponse = self.http.post("auth/login", &request).await?;
        self.token_store.write(&response.access_token)?;
        tracing::info!(email, "Logged in");
        Ok(response)
    }

    /// `GET /auth/me`
    pub async fn me(&self) -> ClientResult<CurrentUserResponse> {
        self.http.get("auth/me").await
    }

    /// `POST /auth/logout`; the local token is cleared even if the call fails
    pub async fn logout(&self) -> ClientResult<()> {
        let result = self.http.post_empty::<IgnoredAny>("auth/logout").await;
        self.token_store.clear()?;
        tracing::info!("Logged out");
        result.map(|_| ())
    }

    pub fn is_logged_in(&self) -> bool {
        self.http.token().is_some()
    }
}
