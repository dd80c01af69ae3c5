use uuid::Uuid;

use cars_core::models::record::AssessmentRecord;
use cars_storage::error::StorageError;
use cars_storage::local::LocalStore;
use cars_storage::repository::{AssessmentRepository, RecordFilter};
use cars_storage::s3::S3Store;

use crate::config::StoreConfig;

/// The backend selected by configuration.
pub enum Store {
    Local(LocalStore),
    S3(S3Store),
}

impl Store {
    pub async fn open(config: &StoreConfig) -> Self {
        match config {
            StoreConfig::Local { path } => {
                tracing::debug!(path = %path.display(), "using local store");
                Store::Local(LocalStore::new(path.clone()))
            }
            StoreConfig::S3 { bucket, region } => {
                tracing::debug!(bucket = %bucket, "using S3 store");
                Store::S3(S3Store::connect(bucket.clone(), region.as_deref()).await)
            }
        }
    }
}

impl AssessmentRepository for Store {
    async fn save(&self, record: &AssessmentRecord) -> Result<(), StorageError> {
        match self {
            Store::Local(s) => s.save(record).await,
            Store::S3(s) => s.save(record).await,
        }
    }

    async fn get(&self, id: Uuid) -> Result<AssessmentRecord, StorageError> {
        match self {
            Store::Local(s) => s.get(id).await,
            Store::S3(s) => s.get(id).await,
        }
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<AssessmentRecord>, StorageError> {
        match self {
            Store::Local(s) => s.list(filter).await,
            Store::S3(s) => s.list(filter).await,
        }
    }

    async fn delete_all(&self) -> Result<usize, StorageError> {
        match self {
            Store::Local(s) => s.delete_all().await,
            Store::S3(s) => s.delete_all().await,
        }
    }

    async fn replace_all(&self, records: &[AssessmentRecord]) -> Result<usize, StorageError> {
        match self {
            Store::Local(s) => s.replace_all(records).await,
            Store::S3(s) => s.replace_all(records).await,
        }
    }
}
