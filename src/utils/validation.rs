use crate::utils::error::{NectaError, Result};
use std::path::Path;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(NectaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(NectaError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(NectaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(NectaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(NectaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Centre identifiers are short codes such as `507` or `S0101`.
pub fn validate_centre(field_name: &str, centre: &str) -> Result<()> {
    if centre.trim().is_empty() || !centre.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(NectaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: centre.to_string(),
            reason: "Centre must be a non-empty alphanumeric code".to_string(),
        });
    }
    Ok(())
}

pub fn validate_url_template(field_name: &str, template: &str) -> Result<()> {
    if !template.contains("{centre}") {
        return Err(NectaError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: "Template must contain the {centre} placeholder".to_string(),
        });
    }
    validate_url(field_name, &template.replace("{centre}", "0000"))
}

/// An output directory may be absent (it is created later) but must not be a file.
pub fn validate_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(NectaError::PersistError {
            artifact: dir.display().to_string(),
            message: "path exists and is not a directory".to_string(),
        });
    }
    Ok(())
}
