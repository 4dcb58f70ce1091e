use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_minimum, validate_non_empty_string, validate_required_field, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lookup address of the service; the canonical number is appended to it.
pub const DEFAULT_BASE_URL: &str = "https://lrnlookup.telnyx.com/v1/LRNLookup/";

/// The service's documented sustainable rate is 40 requests per second, so
/// calls must be spaced at least 25ms apart.
pub const MIN_RATE_LIMIT_MS: u64 = 25;

pub const DEFAULT_RATE_LIMIT_MS: u64 = MIN_RATE_LIMIT_MS;

/// Service credentials and tuning, loaded from a TOML file. Only the token
/// is required; its absence is a fatal startup error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub token: Option<String>,
    pub base_url: Option<String>,
    pub rate_limit_ms: Option<u64>,
}

impl ServiceConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    // Replaces ${VAR_NAME} with the environment value, so tokens can stay
    // out of files checked into version control
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    pub fn token(&self) -> Result<&str> {
        validate_required_field("token", &self.token).map(String::as_str)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    pub fn rate_limit_ms(&self) -> u64 {
        self.rate_limit_ms.unwrap_or(DEFAULT_RATE_LIMIT_MS)
    }
}

impl Validate for ServiceConfig {
    fn validate(&self) -> Result<()> {
        let token = validate_required_field("token", &self.token)?;
        validate_non_empty_string("token", token)?;
        validate_url("base_url", self.base_url())?;
        validate_minimum("rate_limit_ms", self.rate_limit_ms(), MIN_RATE_LIMIT_MS)?;
        Ok(())
    }
}
