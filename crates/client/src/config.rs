//! Backend connection configuration loaded from environment variables.

/// Connection settings for the detection/violation backend.
///
/// All fields have defaults suitable for local development against a
/// backend on the loopback interface.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base HTTP URL of the backend (default: `http://127.0.0.1:8000`).
    pub base_url: String,
    /// Client-side request timeout in seconds (default: `30`). A hung
    /// backend call fails instead of leaving the caller waiting
    /// indefinitely.
    pub request_timeout_secs: u64,
}

impl BackendConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                 |
    /// |------------------------|-------------------------|
    /// | `BACKEND_URL`          | `http://127.0.0.1:8000` |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("BACKEND_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".into());

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            request_timeout_secs,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".into(),
            request_timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_loopback_backend() {
        let config = BackendConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.request_timeout_secs, 30);
    }
}
