use std::env;
use url::Url;

/// Harness configuration, resolved once at startup and passed explicitly.
/// Nothing in the harness reads or mutates process env after this.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the API under test (default: "http://127.0.0.1:3000")
    pub base_url: String,

    /// Per-request timeout in seconds (default: 10)
    pub request_timeout_secs: u64,

    /// Whole-run timeout in seconds, 0 disables (default: 120)
    pub run_timeout_secs: u64,

    /// Password for the disposable identity (default: "P@ssw0rd1!")
    pub password: String,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            request_timeout_secs: 10,
            run_timeout_secs: 120,
            password: "P@ssw0rd1!".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            base_url: env::var("SMOKE_BASE_URL").unwrap_or(default.base_url),

            request_timeout_secs: env::var("SMOKE_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.request_timeout_secs),

            run_timeout_secs: env::var("SMOKE_RUN_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.run_timeout_secs),

            password: env::var("SMOKE_PASSWORD").unwrap_or(default.password),
        }
    }

    /// Validate and normalize the base URL. A trailing slash is enforced
    /// so path joining never clips the last URL segment.
    pub fn base_url(&self) -> Result<Url, url::ParseError> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Url::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HarnessConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.request_timeout_secs, 10);
        assert_eq!(config.run_timeout_secs, 120);
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let config = HarnessConfig {
            base_url: "http://localhost:8080".to_string(),
            ..Default::default()
        };
        assert_eq!(config.base_url().unwrap().as_str(), "http://localhost:8080/");
    }

    #[test]
    fn test_base_url_rejects_garbage() {
        let config = HarnessConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.base_url().is_err());
    }

    #[test]
    fn test_from_env_falls_back_to_defaults() {
        unsafe { env::remove_var("SMOKE_REQUEST_TIMEOUT_SECS") };
        let config = HarnessConfig::from_env();
        assert_eq!(
            config.request_timeout_secs,
            HarnessConfig::default().request_timeout_secs
        );
    }
}
