use crate::core::{LoadReport, Pipeline};
use crate::utils::error::Result;

#[derive(Debug, Clone)]
pub struct RunReport {
    pub console_summary: String,
    pub load: LoadReport,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load once, in order. An extract failure
    /// aborts before anything is written.
    pub async fn run(&self) -> Result<RunReport> {
        tracing::info!("Extracting results table...");
        let records = self.pipeline.extract().await?;
        tracing::info!("Extracted {} records", records.len());

        tracing::info!("Analysing grades...");
        let analysis = self.pipeline.transform(records).await?;
        tracing::info!(
            "Summarised {} subjects and {} divisions",
            analysis.summary_table.rows.len(),
            analysis.division_table.rows.len()
        );
        let console_summary = analysis.console_summary.clone();

        tracing::info!("Saving outputs...");
        let load = self.pipeline.load(analysis).await?;
        if !load.is_complete() {
            tracing::warn!("{} output file(s) could not be written", load.failed.len());
        }

        Ok(RunReport {
            console_summary,
            load,
        })
    }
}
