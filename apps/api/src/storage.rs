use std::path::{Path, PathBuf};

use chrono::Utc;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

/// Public URL prefix under which stored uploads are served.
pub const UPLOADS_ROUTE: &str = "/uploads";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to prepare upload directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write upload {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub file_name: String,
    /// e.g. `/uploads/1718000000000-<uuid>.pdf`
    pub public_path: String,
}

/// Writes uploaded résumés to a local directory under generated names.
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    /// Creates the store, making the directory if it does not exist yet.
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|source| StorageError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        info!("Upload directory ready at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn save(
        &self,
        original_name: Option<&str>,
        bytes: &[u8],
    ) -> Result<StoredUpload, StorageError> {
        let file_name = stored_file_name(original_name);
        let path = self.dir.join(&file_name);

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StorageError::Write {
                path: path.clone(),
                source,
            })?;

        Ok(StoredUpload {
            public_path: format!("{UPLOADS_ROUTE}/{file_name}"),
            file_name,
        })
    }
}

/// `<unix millis>-<uuid><.ext>`. Only a short alphanumeric extension from the
/// client name is kept; the rest of the client name is discarded.
fn stored_file_name(original_name: Option<&str>) -> String {
    let stem = format!(
        "{}-{}",
        Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    );
    match original_name.and_then(safe_extension) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

fn safe_extension(name: &str) -> Option<String> {
    let ext = Path::new(name).extension()?.to_str()?;
    let valid = (1..=8).contains(&ext.len()) && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| ext.to_ascii_lowercase())
}
