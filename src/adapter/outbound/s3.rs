//! S3-compatible object storage adapter built on `aws-sdk-s3`.

use std::time::Duration;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::{ByteStream, DateTime as SmithyDateTime};
use aws_sdk_s3::Client;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{Listing, ObjectInfo, ObjectSummary, StoredObject, Upload};
use crate::error::{Error, Result, StorageError};
use crate::infrastructure::config::s3::S3Settings;
use crate::port::ObjectStore;

/// Error codes reported as a missing or forbidden bucket.
const BUCKET_ERROR_CODES: &[&str] = &["NoSuchBucket", "AccessDenied"];

/// A client bound to one bucket.
pub struct S3Bucket {
    client: Client,
    bucket: String,
}

impl S3Bucket {
    /// Build a client with static credentials and path-style addressing.
    pub async fn connect(settings: &S3Settings) -> Result<Self> {
        let credentials = Credentials::new(
            &settings.access_key_id,
            &settings.secret_access_key,
            None,
            None,
            "addon-cli",
        );
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(settings.region.clone()))
            .endpoint_url(&settings.endpoint)
            .credentials_provider(credentials)
            .load()
            .await;
        let config = aws_sdk_s3::config::Builder::from(&shared)
            .force_path_style(true)
            .build();

        info!(
            endpoint = %settings.endpoint,
            bucket = %settings.bucket,
            "configured object storage client"
        );
        Ok(Self {
            client: Client::from_conf(config),
            bucket: settings.bucket.clone(),
        })
    }

    fn classify<E, R>(&self, operation: &'static str, err: SdkError<E, R>) -> Error
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
        R: std::fmt::Debug + Send + Sync + 'static,
    {
        let bucket_error = err
            .code()
            .is_some_and(|code| BUCKET_ERROR_CODES.contains(&code));
        if bucket_error {
            return StorageError::NoSuchBucket {
                bucket: self.bucket.clone(),
            }
            .into();
        }
        StorageError::Request {
            operation,
            message: DisplayErrorContext(err).to_string(),
        }
        .into()
    }
}

fn to_chrono(ts: &SmithyDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(ts.secs(), ts.subsec_nanos())
}

fn to_size(len: Option<i64>) -> u64 {
    len.and_then(|n| u64::try_from(n).ok()).unwrap_or_default()
}

#[async_trait]
impl ObjectStore for S3Bucket {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    async fn list(&self) -> Result<Listing> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| self.classify("list", e))?;

        let objects: Vec<ObjectSummary> = output
            .contents()
            .iter()
            .map(|obj| ObjectSummary {
                key: obj.key().unwrap_or_default().to_string(),
                size: to_size(obj.size()),
                last_modified: obj.last_modified().and_then(to_chrono),
            })
            .collect();
        let key_count = output
            .key_count()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(objects.len());

        Ok(Listing { key_count, objects })
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let result = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await;

        match result {
            Ok(_) => Ok(true),
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_not_found() => {
                debug!(bucket = %self.bucket, key, "object not found");
                Ok(false)
            }
            Err(e) => Err(self.classify("head", e)),
        }
    }

    async fn put(&self, upload: Upload) -> Result<()> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&upload.key)
            .content_type(&upload.content_type)
            .body(ByteStream::from(upload.body))
            .send()
            .await
            .map_err(|e| self.classify("upload", e))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredObject> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| self.classify("download", e))?;

        let content_type = output.content_type().map(str::to_string);
        let body = output
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Request {
                operation: "download",
                message: e.to_string(),
            })?
            .into_bytes()
            .to_vec();

        Ok(StoredObject { content_type, body })
    }

    async fn head(&self, key: &str) -> Result<ObjectInfo> {
        let output = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| self.classify("head", e))?;

        Ok(ObjectInfo {
            key: key.to_string(),
            size: to_size(output.content_length()),
            content_type: output.content_type().map(str::to_string),
            etag: output.e_tag().map(str::to_string),
            last_modified: output.last_modified().and_then(to_chrono),
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| self.classify("delete", e))?;
        Ok(())
    }

    async fn presign(&self, key: &str, expires_in: Duration) -> Result<String> {
        let config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| StorageError::Presign(e.to_string()))?;
        let request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .presigned(config)
            .await
            .map_err(|e| self.classify("presign", e))?;
        Ok(request.uri().to_string())
    }
}
