//! S3-backed store: one JSON object per record under `assessments/`.

use aws_sdk_s3::Client;
use uuid::Uuid;

use cars_core::keys;
use cars_core::models::record::AssessmentRecord;

use crate::error::StorageError;
use crate::objects;
use crate::repository::{AssessmentRepository, RecordFilter};

#[derive(Debug, Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
}

impl S3Store {
    pub fn new(client: Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Build a client from the default credential chain.
    pub async fn connect(bucket: impl Into<String>, region: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = region {
            loader = loader.region(aws_config::Region::new(region.to_string()));
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), bucket)
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn record_keys(&self) -> Result<Vec<String>, StorageError> {
        let found =
            objects::list_objects(&self.client, &self.bucket, keys::ASSESSMENTS_PREFIX).await?;
        Ok(found
            .into_iter()
            .filter(|key| keys::assessment_id(key).is_ok())
            .collect())
    }
}

impl AssessmentRepository for S3Store {
    async fn save(&self, record: &AssessmentRecord) -> Result<(), StorageError> {
        let key = keys::assessment(record.id);
        objects::put_json(&self.client, &self.bucket, &key, record).await?;
        tracing::debug!(bucket = %self.bucket, key = %key, "assessment stored");
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<AssessmentRecord, StorageError> {
        objects::get_json(&self.client, &self.bucket, &keys::assessment(id)).await
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<AssessmentRecord>, StorageError> {
        let mut records = Vec::new();
        for key in self.record_keys().await? {
            records.push(objects::get_json(&self.client, &self.bucket, &key).await?);
        }
        Ok(filter.apply(records))
    }

    async fn delete_all(&self) -> Result<usize, StorageError> {
        let count =
            objects::delete_objects_by_prefix(&self.client, &self.bucket, keys::ASSESSMENTS_PREFIX)
                .await?;
        tracing::info!(bucket = %self.bucket, count, "assessments deleted");
        Ok(count)
    }

    async fn replace_all(&self, records: &[AssessmentRecord]) -> Result<usize, StorageError> {
        self.delete_all().await?;
        for record in records {
            self.save(record).await?;
        }
        tracing::info!(bucket = %self.bucket, count = records.len(), "assessments replaced");
        Ok(records.len())
    }
}
