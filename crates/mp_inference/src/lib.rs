use std::fmt;

use mp_core::{Error, Result};
use url::Url;

pub mod imaging;
pub mod models;
pub mod structuring;
pub mod wire;
pub mod writer;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini";

#[derive(Clone, Default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_deref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl Config {
    /// Reads `GEMINI_API_KEY` (or `API_KEY`), `MPFMT_MODEL` and `MPFMT_BASE_URL`.
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            api_key: non_empty("GEMINI_API_KEY").or_else(|| non_empty("API_KEY")),
            model_name: non_empty("MPFMT_MODEL"),
            base_url: non_empty("MPFMT_BASE_URL"),
        }
    }

    pub fn model_name(&self) -> &str {
        self.model_name.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    /// The service root without a trailing slash.
    pub fn base_url(&self) -> Result<String> {
        let raw = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let url = Url::parse(raw)
            .map_err(|e| Error::InvalidInput(format!("invalid base URL '{}': {}", raw, e)))?;
        Ok(url.as_str().trim_end_matches('/').to_string())
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::Config;
    pub use mp_core::{Error, ImageRequest, InferenceModel, Result, WriteRequest};
}

pub use models::create_model;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.model_name(), "gemini");
        assert_eq!(config.base_url().unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_is_validated() {
        let config = Config {
            base_url: Some("http://127.0.0.1:9000/v1/".to_string()),
            ..Default::default()
        };
        assert_eq!(config.base_url().unwrap(), "http://127.0.0.1:9000/v1");

        let config = Config {
            base_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.base_url(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = Config {
            api_key: Some("secret".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", config).contains("secret"));
    }
}
