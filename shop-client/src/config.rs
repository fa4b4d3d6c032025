//! Client configuration

/// Configuration for [`crate::HttpClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL, e.g. "http://localhost:3000"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// Shared admin secret for management calls
    pub admin_password: Option<String>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            admin_password: None,
        }
    }

    pub fn with_admin_password(mut self, password: impl Into<String>) -> Self {
        self.admin_password = Some(password.into());
        self
    }
}
