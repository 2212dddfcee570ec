//! Object storage use cases.

use std::time::Duration;

use tracing::{debug, info};

use crate::domain::object::validate_expiry;
use crate::domain::{Listing, ObjectInfo, StoredObject, Upload};
use crate::error::{Result, StorageError};
use crate::port::ObjectStore;

/// Bucket operations with an existence check in front of every keyed read.
pub struct ObjectService<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: ObjectStore + ?Sized> ObjectService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn bucket(&self) -> &str {
        self.store.bucket()
    }

    /// Fail with [`StorageError::ObjectNotFound`] unless `key` exists.
    pub async fn require(&self, key: &str) -> Result<()> {
        if self.store.exists(key).await? {
            return Ok(());
        }
        Err(StorageError::ObjectNotFound {
            key: key.to_string(),
            bucket: self.bucket().to_string(),
        }
        .into())
    }

    pub async fn list(&self) -> Result<Listing> {
        let listing = self.store.list().await?;
        debug!(bucket = %self.bucket(), keys = listing.key_count, "listed bucket");
        Ok(listing)
    }

    pub async fn upload(&self, upload: Upload) -> Result<()> {
        let key = upload.key.clone();
        let size = upload.body.len();
        self.store.put(upload).await?;
        info!(bucket = %self.bucket(), key = %key, size, "uploaded object");
        Ok(())
    }

    pub async fn read(&self, key: &str) -> Result<StoredObject> {
        self.require(key).await?;
        self.store.get(key).await
    }

    pub async fn info(&self, key: &str) -> Result<ObjectInfo> {
        self.require(key).await?;
        self.store.head(key).await
    }

    /// Delete `key`. The caller confirms with the operator first.
    pub async fn delete(&self, key: &str) -> Result<()> {
        self.require(key).await?;
        self.store.delete(key).await?;
        info!(bucket = %self.bucket(), key = %key, "deleted object");
        Ok(())
    }

    pub async fn presign(&self, key: &str, expires_secs: u64) -> Result<String> {
        let expires_secs = validate_expiry(expires_secs)?;
        self.require(key).await?;
        self.store
            .presign(key, Duration::from_secs(expires_secs))
            .await
    }
}
