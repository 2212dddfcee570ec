//! Object storage port, scoped to a single bucket.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Listing, ObjectInfo, StoredObject, Upload};
use crate::error::Result;

/// Operations on one bucket.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Name of the bucket this store is bound to.
    fn bucket(&self) -> &str;

    /// List the first page of objects.
    async fn list(&self) -> Result<Listing>;

    /// Whether `key` exists.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Store an object, replacing any existing one.
    async fn put(&self, upload: Upload) -> Result<()>;

    /// Fetch an object body.
    async fn get(&self, key: &str) -> Result<StoredObject>;

    /// Fetch object metadata without the body.
    async fn head(&self, key: &str) -> Result<ObjectInfo>;

    async fn delete(&self, key: &str) -> Result<()>;

    /// Build a presigned GET URL valid for `expires_in`.
    async fn presign(&self, key: &str, expires_in: Duration) -> Result<String>;
}
