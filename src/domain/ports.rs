use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// File-oriented persistence backend. Paths are relative to the backend's
/// base directory; `list_files` walks it recursively and returns an empty
/// listing when the base directory does not exist yet.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn list_files(&self) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

/// Resolved configuration for the fetch pipeline. Credential, base URL, and
/// pacing are explicit values here, never ambient state.
pub trait LookupConfig: Send + Sync {
    fn base_url(&self) -> &str;
    fn token(&self) -> &str;
    fn input_file(&self) -> &str;
    fn number_field(&self) -> &str;
    fn output_dir(&self) -> &str;
    fn request_interval(&self) -> Duration;
}

/// A three-phase extract/transform/load pipeline. The data flowing between
/// phases is pipeline-specific.
#[async_trait]
pub trait Pipeline: Send + Sync {
    type Extracted: Send;
    type Prepared: Send;

    async fn extract(&self) -> Result<Self::Extracted>;
    async fn transform(&self, data: Self::Extracted) -> Result<Self::Prepared>;
    async fn load(&self, data: Self::Prepared) -> Result<String>;
}
