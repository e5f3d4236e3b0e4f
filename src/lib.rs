pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, RunConfig};
pub use crate::core::{etl::EtlEngine, pipeline::ResultsPipeline};
pub use domain::model::{HtmlSource, LoadReport, Record, SubjectGrade};
pub use utils::error::{NectaError, Result};
