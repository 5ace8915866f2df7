use actix_web::web::Bytes;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::multimedia::application::ports::outgoing::{
    AssetStorage, AssetStorageError, StoredAsset,
};

/// google-cloud-storage uses a bucket resource name format:
/// `projects/_/buckets/{bucket}`
fn bucket_resource(bucket: &str) -> String {
    format!("projects/_/buckets/{}", bucket)
}

fn map_write_error(msg: &str) -> AssetStorageError {
    let m = msg.to_lowercase();

    if m.contains("permission") || m.contains("forbidden") || m.contains("denied") {
        AssetStorageError::AccessDenied(msg.to_string())
    } else if m.contains("bucket") && (m.contains("not found") || m.contains("404")) {
        AssetStorageError::Configuration(msg.to_string())
    } else {
        AssetStorageError::Network(msg.to_string())
    }
}

/// Seam over the google-cloud-storage client so the adapter can be tested without GCP.
#[async_trait]
trait GcsClient: Send + Sync {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<(), String>;
}

/// Uploads to a Google Cloud Storage bucket whose objects are publicly readable.
#[derive(Clone)]
pub struct GcsAssetStorage {
    client: Arc<OnceCell<Box<dyn GcsClient>>>,
    bucket: String,
    public_base_url: String,
}

impl GcsAssetStorage {
    /// The client is built lazily on the first upload.
    pub fn new(bucket: impl Into<String>, public_base_url: Option<String>) -> Self {
        let bucket = bucket.into();
        let public_base_url = public_base_url
            .unwrap_or_else(|| format!("https://storage.googleapis.com/{bucket}"))
            .trim_end_matches('/')
            .to_string();

        Self {
            client: Arc::new(OnceCell::new()),
            bucket,
            public_base_url,
        }
    }

    #[cfg(test)]
    fn with_client(client: Box<dyn GcsClient>, bucket: &str, public_base_url: &str) -> Self {
        let storage = Self::new(bucket, Some(public_base_url.to_string()));
        let _ = storage.client.set(client);
        storage
    }

    async fn get_client(&self) -> Result<&dyn GcsClient, AssetStorageError> {
        self.client
            .get_or_try_init(|| async {
                let real_client = RealGcsClient::new().await?;
                Ok::<_, AssetStorageError>(Box::new(real_client) as Box<dyn GcsClient>)
            })
            .await
            .map(|boxed| &**boxed)
    }
}

#[async_trait]
impl AssetStorage for GcsAssetStorage {
    fn name(&self) -> &'static str {
        "gcs"
    }

    async fn store(
        &self,
        object_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, AssetStorageError> {
        let client = self.get_client().await?;

        client
            .write_object(
                &bucket_resource(&self.bucket),
                object_name,
                content_type,
                Bytes::from(bytes),
            )
            .await
            .map_err(|e| map_write_error(&e))?;

        Ok(format!("{}/{}", self.public_base_url, object_name))
    }

    /// Served straight from the bucket.
    async fn fetch(&self, _file_name: &str) -> Result<Option<StoredAsset>, AssetStorageError> {
        Ok(None)
    }
}

// ============================================================================
// Real Google Cloud Storage client (google-cloud-storage)
// ============================================================================

struct RealGcsClient {
    storage: google_cloud_storage::client::Storage,
}

impl RealGcsClient {
    async fn new() -> Result<Self, AssetStorageError> {
        tracing::info!("Initializing GCS client...");

        let storage = google_cloud_storage::client::Storage::builder()
            .build()
            .await
            .map_err(|e| {
                tracing::error!("Failed to build GCS storage client: {:?}", e);
                AssetStorageError::Configuration(e.to_string())
            })?;

        Ok(Self { storage })
    }
}

#[async_trait]
impl GcsClient for RealGcsClient {
    async fn write_object(
        &self,
        bucket_resource: &str,
        object_name: &str,
        content_type: &str,
        bytes: Bytes,
    ) -> Result<(), String> {
        self.storage
            .write_object(bucket_resource.to_string(), object_name.to_string(), bytes)
            .set_content_type(content_type.to_string())
            .send_buffered()
            .await
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
