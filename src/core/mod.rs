pub mod aggregate;
pub mod etl;
pub mod pipeline;
pub mod report;
pub mod scores;
pub mod star_codes;
pub mod subjects;
pub mod table;
pub mod validator;

pub use crate::domain::model::{Analysis, LoadReport, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
