use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;

use crate::storage::Error;

// Definition of future types for async use
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, Error>> + Send + 'a>>;

/// Read-only access to raw messages held in object storage.
pub trait ObjectStore: Send + Sync {
    /// Fetch the full object at `bucket`/`key`.
    fn fetch<'a>(&'a self, bucket: &'a str, key: &'a str) -> StoreFuture<'a, Bytes>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    fn fetch<'a>(&'a self, bucket: &'a str, key: &'a str) -> StoreFuture<'a, Bytes> {
        (**self).fetch(bucket, key)
    }
}
