use crate::core::Storage;
use crate::utils::error::Result;
use crate::utils::validation::validate_output_dir;
use std::fs;
use std::path::Path;

/// Files relative to `base_path`; absolute paths are used as given.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Default for LocalStorage {
    fn default() -> Self {
        Self::new(".".to_string())
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        // The handle is closed when `fs::write` returns, on success or error.
        fs::write(full_path, data)?;
        Ok(())
    }

    async fn ensure_dir(&self, path: &str) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);
        validate_output_dir(&full_path)?;
        fs::create_dir_all(full_path)?;
        Ok(())
    }
}
