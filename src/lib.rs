pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::LocalStorage;
pub use config::FetchConfig;
pub use crate::core::convert_pipeline::ConvertPipeline;
pub use crate::core::etl::EtlEngine;
pub use crate::core::fetch_pipeline::FetchPipeline;
pub use utils::error::{EtlError, Result};
