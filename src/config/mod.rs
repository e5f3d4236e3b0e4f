pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::domain::model::{HtmlSource, OutputFiles};
use crate::utils::error::{NectaError, Result};
use crate::utils::validation::{validate_centre, validate_path, validate_url, validate_url_template};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_URL_TEMPLATE: &str =
    "https://matokeo.necta.go.tz/results/2025/dsee/results/{centre}.htm";

/// Picks the page to analyse. Exactly one of the three inputs must be given.
pub fn resolve_source(
    centre: Option<&str>,
    url: Option<&str>,
    html_file: Option<&Path>,
    url_template: &str,
) -> Result<HtmlSource> {
    match (centre, url, html_file) {
        (Some(centre), None, None) => {
            validate_centre("centre", centre)?;
            validate_url_template("url_template", url_template)?;
            Ok(HtmlSource::Url(url_template.replace("{centre}", centre)))
        }
        (None, Some(url), None) => {
            validate_url("url", url)?;
            Ok(HtmlSource::Url(url.to_string()))
        }
        (None, None, Some(path)) => {
            validate_path("html_file", &path.to_string_lossy())?;
            Ok(HtmlSource::File(path.to_path_buf()))
        }
        (None, None, None) => Err(NectaError::MissingConfigError {
            field: "--centre, --url or --html-file".to_string(),
        }),
        _ => Err(NectaError::ConfigError {
            message: "Provide only one of --centre, --url or --html-file".to_string(),
        }),
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub source: HtmlSource,
    pub output_dir: Option<PathBuf>,
    pub files: OutputFiles,
    pub request_timeout: Option<Duration>,
}

impl RunConfig {
    pub fn new(source: HtmlSource) -> Self {
        Self {
            source,
            output_dir: None,
            files: OutputFiles::default(),
            request_timeout: None,
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }
}

impl ConfigProvider for RunConfig {
    fn source(&self) -> &HtmlSource {
        &self.source
    }

    fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    fn output_files(&self) -> &OutputFiles {
        &self.files
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }
}

#[cfg(feature = "cli")]
pub use cli_args::CliConfig;

#[cfg(feature = "cli")]
mod cli_args {
    use super::toml_config::FileConfig;
    use super::{resolve_source, RunConfig, DEFAULT_URL_TEMPLATE};
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::Parser;
    use std::path::PathBuf;
    use std::time::Duration;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "necta-results")]
    #[command(about = "Summarise NECTA examination results for one centre")]
    pub struct CliConfig {
        /// Centre number, substituted into the results URL template (e.g. 507)
        #[arg(long)]
        pub centre: Option<String>,

        /// Full results page URL
        #[arg(long)]
        pub url: Option<String>,

        /// Saved results page to analyse instead of fetching one
        #[arg(long)]
        pub html_file: Option<PathBuf>,

        /// Directory for the CSV summaries; created when missing
        #[arg(long)]
        pub directory: Option<PathBuf>,

        /// Optional TOML file with URL template, timeout and output names
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Overrides the URL template; must contain {centre}
        #[arg(long)]
        pub url_template: Option<String>,

        /// HTTP request timeout in seconds
        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub log_json: bool,
    }

    impl CliConfig {
        /// Merges the optional TOML file with the flags; flags win.
        pub fn resolve(&self) -> Result<RunConfig> {
            self.validate()?;

            let file = match &self.config {
                Some(path) => FileConfig::from_file(path)?,
                None => FileConfig::default(),
            };

            let template = self
                .url_template
                .clone()
                .or_else(|| file.url_template())
                .unwrap_or_else(|| DEFAULT_URL_TEMPLATE.to_string());

            let source = resolve_source(
                self.centre.as_deref(),
                self.url.as_deref(),
                self.html_file.as_deref(),
                &template,
            )?;

            Ok(RunConfig {
                source,
                output_dir: self.directory.clone(),
                files: file.output_files(),
                request_timeout: self
                    .timeout_seconds
                    .or_else(|| file.timeout_seconds())
                    .map(Duration::from_secs),
            })
        }
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(dir) = &self.directory {
                validate_path("directory", &dir.to_string_lossy())?;
            }
            if let Some(config) = &self.config {
                validate_path("config", &config.to_string_lossy())?;
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::domain::model::HtmlSource;
        use crate::utils::error::NectaError;

        fn parse(args: &[&str]) -> CliConfig {
            CliConfig::parse_from(std::iter::once("necta-results").chain(args.iter().copied()))
        }

        #[test]
        fn test_centre_uses_default_template() {
            let config = parse(&["--centre", "507"]).resolve().unwrap();
            assert_eq!(
                config.source,
                HtmlSource::Url(
                    "https://matokeo.necta.go.tz/results/2025/dsee/results/507.htm".to_string()
                )
            );
            assert!(config.output_dir.is_none());
        }

        #[test]
        fn test_both_centre_and_url_rejected() {
            let err = parse(&["--centre", "507", "--url", "https://x.tz/507.htm"])
                .resolve()
                .unwrap_err();
            assert!(matches!(err, NectaError::ConfigError { .. }));
        }

        #[test]
        fn test_no_source_rejected() {
            let err = parse(&["--directory", "out"]).resolve().unwrap_err();
            assert!(matches!(err, NectaError::MissingConfigError { .. }));
        }

        #[test]
        fn test_validate_leaves_source_choice_to_resolve() {
            let cli = parse(&["--centre", "507", "--html-file", "507.htm"]);
            assert!(cli.validate().is_ok());
            assert!(matches!(
                cli.resolve().unwrap_err(),
                NectaError::ConfigError { .. }
            ));
        }

        #[test]
        fn test_flags_override_template_and_timeout() {
            let config = parse(&[
                "--centre",
                "S0101",
                "--url-template",
                "https://mirror.example/{centre}.htm",
                "--timeout-seconds",
                "9",
                "--directory",
                "out",
            ])
            .resolve()
            .unwrap();

            assert_eq!(
                config.source,
                HtmlSource::Url("https://mirror.example/S0101.htm".to_string())
            );
            assert_eq!(config.request_timeout, Some(Duration::from_secs(9)));
            assert_eq!(config.output_dir, Some(PathBuf::from("out")));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_source_from_url() {
        let source = resolve_source(None, Some("https://x.tz/507.htm"), None, DEFAULT_URL_TEMPLATE)
            .unwrap();
        assert_eq!(source, HtmlSource::Url("https://x.tz/507.htm".to_string()));
    }

    #[test]
    fn test_resolve_source_from_file() {
        let source =
            resolve_source(None, None, Some(Path::new("507.htm")), DEFAULT_URL_TEMPLATE).unwrap();
        assert_eq!(source, HtmlSource::File(PathBuf::from("507.htm")));
    }

    #[test]
    fn test_resolve_source_rejects_bad_values() {
        assert!(resolve_source(Some("5 07"), None, None, DEFAULT_URL_TEMPLATE).is_err());
        assert!(resolve_source(None, Some("not a url"), None, DEFAULT_URL_TEMPLATE).is_err());
        assert!(resolve_source(Some("507"), None, None, "https://x.tz/fixed.htm").is_err());
        assert!(resolve_source(
            Some("507"),
            Some("https://x.tz/507.htm"),
            None,
            DEFAULT_URL_TEMPLATE
        )
        .is_err());
    }
}
