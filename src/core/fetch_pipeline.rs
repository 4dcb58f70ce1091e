use crate::core::dedup::remove_existing;
use crate::core::lookup::LookupClient;
use crate::core::store::write_response;
use crate::domain::ports::{LookupConfig, Pipeline, Storage};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;

/// The fetch-and-persist pipeline: read phone numbers from the input CSV,
/// drop the ones already on disk, then look up and persist the rest one at
/// a time. Strictly sequential; the persistence directory is the checkpoint
/// that makes a rerun resume after any failure.
pub struct FetchPipeline<S: Storage, C: LookupConfig> {
    storage: S,
    config: C,
    client: LookupClient,
}

impl<S: Storage, C: LookupConfig> FetchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let client = LookupClient::new(
            config.base_url().to_string(),
            config.token().to_string(),
            config.request_interval(),
        );
        Self {
            storage,
            config,
            client,
        }
    }
}

#[async_trait]
impl<S: Storage, C: LookupConfig> Pipeline for FetchPipeline<S, C> {
    /// Raw phone numbers from the input file, in file order.
    type Extracted = Vec<String>;
    /// Numbers that still need a lookup after dedup.
    type Prepared = Vec<String>;

    async fn extract(&self) -> Result<Vec<String>> {
        let numbers = read_numbers(self.config.input_file(), self.config.number_field())?;
        tracing::info!(
            "Received {} phone numbers from [{}]",
            numbers.len(),
            self.config.input_file()
        );
        Ok(numbers)
    }

    async fn transform(&self, numbers: Vec<String>) -> Result<Vec<String>> {
        let requested = numbers.len();
        let remaining = remove_existing(numbers, &self.storage).await?;
        tracing::info!(
            "{} of {} numbers still need a lookup ({} already fetched)",
            remaining.len(),
            requested,
            requested - remaining.len()
        );
        Ok(remaining)
    }

    async fn load(&self, numbers: Vec<String>) -> Result<String> {
        let total = numbers.len();
        for (no, number) in numbers.iter().enumerate() {
            let record = self.client.lookup(number).await?;
            write_response(&self.storage, &record).await?;

            if (no + 1) % 100 == 0 {
                tracing::info!("Fetched {} of {} numbers", no + 1, total);
            }
        }

        tracing::info!("Fetched {} numbers", total);
        Ok(self.config.output_dir().to_string())
    }
}

/// Reads the named column out of a CSV file, entirely into memory. Empty
/// cells are skipped; everything else is kept verbatim for later
/// normalization.
fn read_numbers(path: &str, field: &str) -> Result<Vec<String>> {
    tracing::info!("Opening CSV file [{}]", path);
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.clone();
    let index = headers
        .iter()
        .position(|header| header == field)
        .ok_or_else(|| EtlError::ProcessingError {
            message: format!("column '{}' not found in {}", field, path),
        })?;

    let mut numbers = Vec::new();
    for row in reader.records() {
        let row = row?;
        if let Some(value) = row.get(index) {
            let value = value.trim();
            if !value.is_empty() {
                numbers.push(value.to_string());
            }
        }
    }
    Ok(numbers)
}
