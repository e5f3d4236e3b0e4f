use crate::core::aggregate::{count_divisions, count_subject_grades};
use crate::core::report::{self, SummaryInputs};
use crate::core::scores::score_stats;
use crate::core::star_codes::summarize_star_codes;
use crate::core::{subjects, table, validator};
use crate::core::{Analysis, ConfigProvider, LoadReport, Pipeline, Record, Storage};
use crate::domain::model::{ArtifactFailure, HtmlSource};
use crate::utils::error::{NectaError, Result};
use reqwest::Client;
use std::path::Path;

pub struct ResultsPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    client: Client,
}

impl<S: Storage, C: ConfigProvider> ResultsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            storage,
            config,
            client: builder.build()?,
        })
    }

    async fn fetch_html(&self) -> Result<String> {
        match self.config.source() {
            HtmlSource::Url(url) => {
                tracing::debug!("Requesting {}", url);
                let response = self.client.get(url).send().await?;
                let status = response.status();
                tracing::debug!("Response status: {}", status);

                if !status.is_success() {
                    return Err(NectaError::HttpStatusError {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                Ok(response.text().await?)
            }
            HtmlSource::File(path) => {
                tracing::debug!("Reading saved page {}", path.display());
                let bytes = self.storage.read_file(&path.to_string_lossy()).await?;
                Ok(String::from_utf8_lossy(&bytes).into_owned())
            }
        }
    }

    async fn persist(&self, path: &Path, bytes: Result<Vec<u8>>, saved: &mut LoadReport) {
        let label = path.display().to_string();
        let outcome = match bytes {
            Ok(data) => self.storage.write_file(&label, &data).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(()) => {
                tracing::info!("Saved {}", label);
                saved.written.push(label);
            }
            Err(e) => {
                tracing::error!("Error saving {}: {}", label, e);
                saved.failed.push(ArtifactFailure {
                    artifact: label,
                    message: e.to_string(),
                });
            }
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for ResultsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<Record>> {
        let html = self.fetch_html().await?;
        tracing::debug!("Fetched {} bytes from {}", html.len(), self.config.source());

        let records = table::extract_records(&html)?;
        Ok(subjects::enrich(records))
    }

    async fn transform(&self, records: Vec<Record>) -> Result<Analysis> {
        let invalid_grades = validator::find_invalid_grades(&records);
        validator::report_invalid_grades(&invalid_grades);

        let subject_counts = count_subject_grades(&records);
        if subject_counts.unspecified_sex > 0 {
            tracing::warn!(
                "{} record(s) have no F/M sex and are left out of the sex columns",
                subject_counts.unspecified_sex
            );
        }

        let division_counts = count_divisions(&records);
        if division_counts.missing_division > 0 {
            tracing::warn!(
                "{} record(s) have no division and are left out of the division summary",
                division_counts.missing_division
            );
        }
        if division_counts.missing_sex > 0 {
            tracing::warn!(
                "{} record(s) have no sex and are left out of the division summary",
                division_counts.missing_sex
            );
        }

        let scores = score_stats(&records);
        if !scores.non_numeric.is_empty() {
            tracing::warn!("Non-numeric AGGT values: {:?}", scores.non_numeric);
        }
        let star_codes = summarize_star_codes(&records);

        let summary_table = report::subject_grade_table(&subject_counts);
        let division_table = report::division_table(&division_counts);
        let console_summary = report::console_summary(&SummaryInputs {
            records: &records,
            subjects: &subject_counts,
            scores: &scores,
            star_codes: &star_codes,
            division_table: &division_table,
        });

        Ok(Analysis {
            records,
            invalid_grades,
            summary_table,
            division_table,
            console_summary,
        })
    }

    async fn load(&self, analysis: Analysis) -> Result<LoadReport> {
        let files = self.config.output_files();
        let mut saved = LoadReport::default();

        let records_json = serde_json::to_vec_pretty(&analysis.records)
            .map_err(NectaError::SerializationError);
        self.persist(Path::new(&files.records), records_json, &mut saved)
            .await;

        let Some(dir) = self.config.output_dir() else {
            tracing::debug!("No output directory given, skipping CSV summaries");
            return Ok(saved);
        };

        let summary_path = dir.join(&files.summary);
        let division_path = dir.join(&files.divisions);

        if let Err(e) = self.storage.ensure_dir(&dir.to_string_lossy()).await {
            tracing::error!("{}", e);
            for path in [summary_path, division_path] {
                saved.failed.push(ArtifactFailure {
                    artifact: path.display().to_string(),
                    message: e.to_string(),
                });
            }
            return Ok(saved);
        }

        let summary_csv = report::to_csv_bytes(&analysis.summary_table);
        self.persist(&summary_path, summary_csv, &mut saved).await;

        let division_csv = report::to_csv_bytes(&analysis.division_table);
        self.persist(&division_path, division_csv, &mut saved).await;

        Ok(saved)
    }
}
