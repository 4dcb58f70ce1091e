use crate::core::store::RECORD_EXT;
use crate::domain::model::{LookupRecord, EXPORT_HEADERS};
use crate::domain::ports::{Pipeline, Storage};
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use std::path::Path;

/// How often the record reader logs progress.
const PROGRESS_INTERVAL: usize = 1000;

/// The export pipeline: walk a directory of persisted lookup responses,
/// map each onto the fixed column schema, and write a single CSV. Rows are
/// emitted in directory-walk order; the row set is exactly the set of
/// record files found, never more or less.
pub struct ConvertPipeline<S: Storage, K: Storage> {
    source: S,
    sink: K,
    output_name: String,
}

impl<S: Storage, K: Storage> ConvertPipeline<S, K> {
    pub fn new(source: S, sink: K, output_name: impl Into<String>) -> Self {
        Self {
            source,
            sink,
            output_name: output_name.into(),
        }
    }
}

#[async_trait]
impl<S: Storage, K: Storage> Pipeline for ConvertPipeline<S, K> {
    type Extracted = Vec<LookupRecord>;
    type Prepared = Vec<Vec<String>>;

    async fn extract(&self) -> Result<Vec<LookupRecord>> {
        let files: Vec<String> = self
            .source
            .list_files()
            .await?
            .into_iter()
            .filter(|path| {
                Path::new(path)
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext == RECORD_EXT)
                    .unwrap_or(false)
            })
            .collect();

        let count = files.len();
        let mut records = Vec::with_capacity(count);
        for (no, path) in files.iter().enumerate() {
            let bytes = self.source.read_file(path).await?;
            let record: LookupRecord =
                serde_json::from_slice(&bytes).map_err(|e| EtlError::ProcessingError {
                    message: format!("failed to parse record file '{}': {}", path, e),
                })?;
            records.push(record);

            if (no + 1) % PROGRESS_INTERVAL == 0 {
                tracing::info!(
                    "Reading... {:.1}% ({} of {})",
                    (no + 1) as f64 / count as f64 * 100.0,
                    no + 1,
                    count
                );
            }
        }

        tracing::info!("Read {} record files", count);
        Ok(records)
    }

    async fn transform(&self, records: Vec<LookupRecord>) -> Result<Vec<Vec<String>>> {
        Ok(records.iter().map(LookupRecord::export_row).collect())
    }

    async fn load(&self, rows: Vec<Vec<String>>) -> Result<String> {
        let row_count = rows.len();
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(EXPORT_HEADERS)?;
        for row in &rows {
            writer.write_record(row)?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| EtlError::ProcessingError {
                message: format!("failed to flush CSV output: {}", e),
            })?;
        self.sink.write_file(&self.output_name, &data).await?;

        tracing::info!("Wrote {} rows to [{}]", row_count, self.output_name);
        Ok(self.output_name.clone())
    }
}
