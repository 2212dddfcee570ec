//! In-memory object store bound to one bucket.

use std::collections::BTreeMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Listing, ObjectInfo, ObjectSummary, StoredObject, Upload};
use crate::error::{Error, Result, StorageError};
use crate::port::ObjectStore;

#[derive(Debug, Clone)]
struct Entry {
    body: Vec<u8>,
    content_type: String,
    modified: DateTime<Utc>,
}

/// A bucket kept in a `BTreeMap`, so listings come back sorted by key.
///
/// With `missing_bucket` every call fails like a bucket that does not exist.
pub struct MemoryBucket {
    name: String,
    objects: Mutex<BTreeMap<String, Entry>>,
    missing_bucket: bool,
}

impl MemoryBucket {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Mutex::new(BTreeMap::new()),
            missing_bucket: false,
        }
    }

    /// A store whose bucket does not exist.
    pub fn missing(name: impl Into<String>) -> Self {
        Self {
            missing_bucket: true,
            ..Self::new(name)
        }
    }

    /// Seed an object directly.
    pub fn with_object(self, key: &str, body: &[u8], content_type: &str) -> Self {
        if let Ok(mut objects) = self.objects.lock() {
            objects.insert(
                key.to_string(),
                Entry {
                    body: body.to_vec(),
                    content_type: content_type.to_string(),
                    modified: Utc::now(),
                },
            );
        }
        self
    }

    /// Keys currently stored.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .map(|o| o.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn check_bucket(&self) -> Result<()> {
        if self.missing_bucket {
            return Err(StorageError::NoSuchBucket {
                bucket: self.name.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        self.check_bucket()?;
        self.objects
            .lock()
            .ok()
            .and_then(|o| o.get(key).cloned())
            .ok_or_else(|| {
                StorageError::ObjectNotFound {
                    key: key.to_string(),
                    bucket: self.name.clone(),
                }
                .into()
            })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, Entry>>> {
        self.objects
            .lock()
            .map_err(|_| Error::Validation("bucket poisoned".into()))
    }
}

#[async_trait]
impl ObjectStore for MemoryBucket {
    fn bucket(&self) -> &str {
        &self.name
    }

    async fn list(&self) -> Result<Listing> {
        self.check_bucket()?;
        let objects: Vec<ObjectSummary> = self
            .lock()?
            .iter()
            .map(|(key, entry)| ObjectSummary {
                key: key.clone(),
                size: entry.body.len() as u64,
                last_modified: Some(entry.modified),
            })
            .collect();
        Ok(Listing {
            key_count: objects.len(),
            objects,
        })
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        self.check_bucket()?;
        Ok(self.lock()?.contains_key(key))
    }

    async fn put(&self, upload: Upload) -> Result<()> {
        self.check_bucket()?;
        self.lock()?.insert(
            upload.key,
            Entry {
                body: upload.body,
                content_type: upload.content_type,
                modified: Utc::now(),
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<StoredObject> {
        let entry = self.entry(key)?;
        Ok(StoredObject {
            content_type: Some(entry.content_type),
            body: entry.body,
        })
    }

    async fn head(&self, key: &str) -> Result<ObjectInfo> {
        let entry = self.entry(key)?;
        Ok(ObjectInfo {
            key: key.to_string(),
            size: entry.body.len() as u64,
            content_type: Some(entry.content_type),
            etag: Some(format!("\"{:016x}\"", fnv1a(&entry.body))),
            last_modified: Some(entry.modified),
        })
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.check_bucket()?;
        self.lock()?.remove(key);
        Ok(())
    }

    async fn presign(&self, key: &str, expires_in: Duration) -> Result<String> {
        self.entry(key)?;
        Ok(format!(
            "memory://{}/{}?X-Amz-Expires={}",
            self.name,
            key,
            expires_in.as_secs()
        ))
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}
