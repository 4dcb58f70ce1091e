#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::ports::LookupConfig;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_minimum, validate_non_empty_string, validate_path,
    validate_url, Validate,
};
use std::time::Duration;

/// Fully resolved fetch configuration: command-line arguments merged with
/// the service TOML. Built once at startup and passed into the pipeline;
/// nothing downstream reads ambient state.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub token: String,
    pub input_file: String,
    pub field_name: String,
    pub output_dir: String,
    pub rate_limit_ms: u64,
}

#[cfg(feature = "cli")]
impl FetchConfig {
    pub fn resolve(args: &cli::FetchArgs, service: &toml_config::ServiceConfig) -> Result<Self> {
        service.validate()?;
        Ok(Self {
            base_url: service.base_url().to_string(),
            token: service.token()?.to_string(),
            input_file: args.input_file.clone(),
            field_name: args.field_name.clone(),
            output_dir: args.output_dir.clone(),
            rate_limit_ms: service.rate_limit_ms(),
        })
    }
}

impl LookupConfig for FetchConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn token(&self) -> &str {
        &self.token
    }

    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn number_field(&self) -> &str {
        &self.field_name
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn request_interval(&self) -> Duration {
        Duration::from_millis(self.rate_limit_ms)
    }
}

impl Validate for FetchConfig {
    fn validate(&self) -> Result<()> {
        validate_url("base_url", &self.base_url)?;
        validate_non_empty_string("token", &self.token)?;
        validate_file_extension("input_file", &self.input_file, &["csv"])?;
        validate_non_empty_string("field_name", &self.field_name)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_minimum(
            "rate_limit_ms",
            self.rate_limit_ms,
            toml_config::MIN_RATE_LIMIT_MS,
        )?;
        Ok(())
    }
}
