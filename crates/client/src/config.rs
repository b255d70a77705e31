use std::time::Duration;

/// Default API origin for local development.
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the API lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                 |
    /// |------------------------------|-------------------------|
    /// | `VITALFLOW_API_URL`          | `http://localhost:5000` |
    /// | `VITALFLOW_API_TIMEOUT_SECS` | `30`                    |
    ///
    /// An unparseable timeout falls back to the default.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("VITALFLOW_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        let timeout = std::env::var("VITALFLOW_API_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_TIMEOUT);

        Self {
            timeout,
            ..Self::new(base_url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        assert_eq!(
            ClientConfig::new("http://api.example/").base_url,
            "http://api.example"
        );
    }
}
