use crate::core::normalize::normalize;
use crate::domain::model::LookupRecord;
use crate::domain::ports::Storage;
use crate::utils::error::{EtlError, Result};

/// Extension of persisted record files.
pub const RECORD_EXT: &str = "json";

/// Persists one lookup response as `<canonical tn>.json`, pretty-printed.
/// Writing the same number again overwrites the previous file, so the store
/// holds at most one record per canonical number.
pub async fn write_response<S: Storage>(storage: &S, record: &LookupRecord) -> Result<String> {
    let tn = record
        .tn()
        .map(normalize)
        .filter(|tn| !tn.is_empty())
        .ok_or_else(|| EtlError::ProcessingError {
            message: "lookup response has no usable 'tn' field".to_string(),
        })?;

    let filename = format!("{}.{}", tn, RECORD_EXT);
    let body = serde_json::to_vec_pretty(record)?;
    storage.write_file(&filename, &body).await?;

    tracing::debug!("Persisted lookup for [{}] to {}", tn, filename);
    Ok(filename)
}
