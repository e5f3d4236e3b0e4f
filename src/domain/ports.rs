use crate::domain::model::{Analysis, HtmlSource, LoadReport, OutputFiles, Record};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Creates `path` if absent; fails when it exists and is not a directory.
    fn ensure_dir(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source(&self) -> &HtmlSource;
    /// Where the two CSV summaries go; `None` skips them.
    fn output_dir(&self) -> Option<&Path>;
    fn output_files(&self) -> &OutputFiles;
    fn request_timeout(&self) -> Option<Duration>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<Record>>;
    async fn transform(&self, records: Vec<Record>) -> Result<Analysis>;
    async fn load(&self, analysis: Analysis) -> Result<LoadReport>;
}
