use async_trait::async_trait;
use aws_sdk_s3 as s3;
use s3::primitives::ByteStream;
use std::sync::{Arc, Mutex};

// 1. StorageService Contract
/// StorageService
///
/// Defines the abstract contract for all interactions with the object storage layer.
/// This trait allows us to swap the concrete implementation—from the real S3 client
/// (S3StorageClient) in production to the in-memory Mock (MockStorageService) during
/// testing—without affecting the calling handlers.
#[async_trait]
pub trait StorageService: Send + Sync {
    /// Ensures the configured bucket exists. Used primarily in the `Env::Local` setup
    /// to automatically provision the required bucket in MinIO. No-op in production.
    async fn ensure_bucket_exists(&self);

    /// Stores one object under `key`. Called by the upload workflow with the raw
    /// bytes of a single portfolio image. Every implementation sanitizes the key
    /// identically (see `sanitize_key`), so test and production keys match.
    async fn put_object(&self, key: &str, bytes: Vec<u8>, content_type: &str)
    -> Result<(), String>;

    /// Removes one object. Project deletion calls this per stored file,
    /// best-effort: a failure is logged by the caller and not retried.
    async fn remove_object(&self, key: &str) -> Result<(), String>;

    /// Resolves the public-access URL for a stored object key.
    fn public_url(&self, key: &str) -> String;
}

// 2. The Real Implementation (S3/MinIO/Supabase)
/// S3StorageClient
///
/// The concrete implementation using the AWS SDK for S3. Due to S3 compatibility,
/// this client transparently handles connections to:
/// - **Local:** Dockerized MinIO instance.
/// - **Production:** Supabase Storage endpoint.
///
/// The `force_path_style(true)` is critical for MinIO and Supabase compatibility.
#[derive(Clone)]
pub struct S3StorageClient {
    client: s3::Client,
    bucket_name: String,
    public_base: String,
}

impl S3StorageClient {
    /// new
    ///
    /// Constructs the S3 client using credentials and configuration from AppConfig.
    pub async fn new(
        endpoint: &str,
        region: &str,
        access_key: &str,
        secret_key: &str,
        bucket: &str,
        public_base: &str,
    ) -> Self {
        let credentials =
            s3::config::Credentials::new(access_key, secret_key, None, None, "static");

        let config = s3::Config::builder()
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .region(s3::config::Region::new(region.to_string()))
            .behavior_version_latest()
            // CRITICAL: Forces the client to use path-style addressing (e.g.,
            // http://endpoint/bucket/key) which is required for MinIO and the
            // Supabase Storage API gateway.
            .force_path_style(true)
            .build();

        let client = s3::Client::from_conf(config);

        Self {
            client,
            bucket_name: bucket.to_string(),
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageService for S3StorageClient {
    /// ensure_bucket_exists
    ///
    /// Calls the S3 CreateBucket API. Since S3 APIs are idempotent, this only creates
    /// the bucket if it does not already exist. It's safe to call at startup.
    async fn ensure_bucket_exists(&self) {
        let _ = self
            .client
            .create_bucket()
            .bucket(&self.bucket_name)
            .send()
            .await;
    }

    async fn put_object(
        &self,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(sanitize_key(key))
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    async fn remove_object(&self, key: &str) -> Result<(), String> {
        self.client
            .delete_object()
            .bucket(&self.bucket_name)
            .key(sanitize_key(key))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        format!(
            "{}/{}/{}",
            self.public_base,
            self.bucket_name,
            sanitize_key(key)
        )
    }
}

/// sanitize_key
///
/// Utility function to prevent path traversal attacks by removing directory
/// navigation components (e.g., `..`, `.`) from a user-provided key segment.
pub fn sanitize_key(key: &str) -> String {
    key.split('/')
        .filter(|segment| !segment.is_empty() && *segment != ".." && *segment != ".")
        .collect::<Vec<_>>()
        .join("/")
}

// 3. The Mock Implementation (For Unit Tests)
/// MockStorageService
///
/// A mock implementation of `StorageService` used exclusively for unit and
/// integration testing. Uploaded keys and removals are recorded so tests can
/// assert on the workflow's storage interactions without a network connection.
pub struct MockStorageService {
    /// When true, `put_object` and `remove_object` return a simulated failure.
    pub should_fail: bool,
    /// Every (key, content_type) pair passed to `put_object`.
    pub uploads: Mutex<Vec<(String, String)>>,
    /// Every key passed to `remove_object`.
    pub removals: Mutex<Vec<String>>,
}

impl MockStorageService {
    pub fn new() -> Self {
        Self {
            should_fail: false,
            uploads: Mutex::new(Vec::new()),
            removals: Mutex::new(Vec::new()),
        }
    }

    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            uploads: Mutex::new(Vec::new()),
            removals: Mutex::new(Vec::new()),
        }
    }

    pub fn uploaded_keys(&self) -> Vec<String> {
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn removed_keys(&self) -> Vec<String> {
        self.removals.lock().unwrap().clone()
    }
}

impl Default for MockStorageService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageService for MockStorageService {
    async fn ensure_bucket_exists(&self) {
        // No-op in mock environment.
    }

    async fn put_object(
        &self,
        key: &str,
        _bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), String> {
        if self.should_fail {
            return Err("Mock Storage Error: Simulation requested".to_string());
        }
        let sanitized = sanitize_key(key);
        self.uploads
            .lock()
            .unwrap()
            .push((sanitized, content_type.to_string()));
        Ok(())
    }

    async fn remove_object(&self, key: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("Mock Storage Error: Simulation requested".to_string());
        }
        self.removals.lock().unwrap().push(sanitize_key(key));
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        // Deterministic, local-style URL for mock assertions.
        format!("http://localhost:9000/mock-bucket/{}", sanitize_key(key))
    }
}

/// StorageState
///
/// The concrete type used to share the storage service access across the application state.
pub type StorageState = Arc<dyn StorageService>;
