//! Client configuration

use crate::{ClientError, ClientResult};
use std::path::PathBuf;

/// Default page size of in-memory entity lists
pub const DEFAULT_LIST_PAGE_SIZE: usize = 10;

/// Default page size of server-paginated listings
pub const DEFAULT_SERVER_PAGE_SIZE: u32 = 50;

/// Client configuration for connecting to the SICME API
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g., "http://localhost:3000/api")
    pub base_url: String,

    /// Bearer token used before any login (overrides the token store)
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Prefix prepended to passwords on local login
    pub local_password_prefix: Option<String>,

    /// File holding the persisted access token; in-memory when unset
    pub token_path: Option<PathBuf>,

    /// Page size of in-memory entity lists
    pub list_page_size: usize,

    /// Page size of server-paginated listings
    pub server_page_size: u32,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
            local_password_prefix: None,
            token_path: None,
            list_page_size: DEFAULT_LIST_PAGE_SIZE,
            server_page_size: DEFAULT_SERVER_PAGE_SIZE,
        }
    }

    /// Load configuration from environment variables
    ///
    /// * `SICME_API_BASE_URL` (required)
    /// * `SICME_LOCAL_PASSWORD_PREFIX`
    /// * `SICME_TOKEN_PATH`
    /// * `SICME_TIMEOUT_SECS` (default 30)
    pub fn from_env() -> ClientResult<Self> {
        let base_url = std::env::var("SICME_API_BASE_URL")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| ClientError::Config("SICME_API_BASE_URL must be set".into()))?;

        let mut config = Self::new(base_url);
        config.local_password_prefix = std::env::var("SICME_LOCAL_PASSWORD_PREFIX")
            .ok()
            .filter(|s| !s.is_empty());
        config.token_path = std::env::var("SICME_TOKEN_PATH")
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        if let Some(timeout) = std::env::var("SICME_TIMEOUT_SECS")
            .ok()
            .and_then(|t| t.parse().ok())
        {
            config.timeout = timeout;
        }
        Ok(config)
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the local login password prefix
    pub fn with_local_password_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.local_password_prefix = Some(prefix.into());
        self
    }

    /// Persist the access token at the given path
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = Some(path.into());
        self
    }

    /// Set list page sizes (in-memory, server-side)
    pub fn with_page_sizes(mut self, list: usize, server: u32) -> Self {
        self.list_page_size = list.max(1);
        self.server_page_size = server.max(1);
        self
    }

    /// Apply the configured prefix to a login password
    pub fn login_password(&self, password: &str) -> String {
        match &self.local_password_prefix {
            Some(prefix) if !password.starts_with(prefix.as_str()) => {
                format!("{prefix}{password}")
            }
            _ => password.to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000/api")
    }
}
