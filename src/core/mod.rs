pub mod convert_pipeline;
pub mod dedup;
pub mod etl;
pub mod fetch_pipeline;
pub mod lookup;
pub mod normalize;
pub mod store;
pub mod throttle;

pub use crate::domain::model::{LineType, LookupRecord, EXPORT_HEADERS};
pub use crate::domain::ports::{LookupConfig, Pipeline, Storage};
pub use crate::utils::error::Result;
