use crate::core::normalize::normalize;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::collections::HashSet;
use std::path::Path;

/// Returns the requested numbers that have no persisted record yet, in the
/// original order with duplicates preserved. A number is considered fetched
/// when a file whose stem normalizes to the same canonical form exists in
/// the storage. Read-only.
pub async fn remove_existing<S: Storage>(numbers: Vec<String>, storage: &S) -> Result<Vec<String>> {
    let existing: HashSet<String> = storage
        .list_files()
        .await?
        .iter()
        .filter_map(|path| {
            Path::new(path)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .map(normalize)
        })
        .collect();

    if existing.is_empty() {
        return Ok(numbers);
    }

    Ok(numbers
        .into_iter()
        .filter(|number| !existing.contains(&normalize(number)))
        .collect())
}
