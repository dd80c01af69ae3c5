//! Single-file JSON store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use uuid::Uuid;

use cars_core::models::record::AssessmentRecord;

use crate::error::StorageError;
use crate::repository::{AssessmentRepository, RecordFilter};

/// Keeps all records as a pretty-printed JSON array in one file.
///
/// A missing file is an empty store. Every write replaces the whole file
/// through a temp file and rename; writers are serialized by a mutex.
#[derive(Debug)]
pub struct LocalStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<AssessmentRecord>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn write_all(&self, records: &[AssessmentRecord]) -> Result<(), StorageError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_vec_pretty(records)?;

        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        tokio::fs::write(&tmp_path, &json).await?;

        // Set restrictive permissions on Unix before renaming
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600)).await?;
        }

        tokio::fs::rename(&tmp_path, &self.path).await?;
        tracing::debug!(path = %self.path.display(), count = records.len(), "store written");
        Ok(())
    }
}

impl AssessmentRepository for LocalStore {
    async fn save(&self, record: &AssessmentRecord) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read_all().await?;
        match records.iter_mut().find(|r| r.id == record.id) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        self.write_all(&records).await
    }

    async fn get(&self, id: Uuid) -> Result<AssessmentRecord, StorageError> {
        self.read_all()
            .await?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| StorageError::NotFound { key: id.to_string() })
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<AssessmentRecord>, StorageError> {
        Ok(filter.apply(self.read_all().await?))
    }

    async fn delete_all(&self) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;
        let count = self.read_all().await?.len();
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        tracing::info!(path = %self.path.display(), count, "store cleared");
        Ok(count)
    }

    async fn replace_all(&self, records: &[AssessmentRecord]) -> Result<usize, StorageError> {
        let _guard = self.write_lock.lock().await;
        self.write_all(records).await?;
        tracing::info!(path = %self.path.display(), count = records.len(), "store replaced");
        Ok(records.len())
    }
}
