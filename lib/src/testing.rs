//! Test doubles for the adapter's collaborators.
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use bytes::Bytes;

use crate::confirm::{ConfirmFuture, Confirmer};
use crate::sns::{NotificationEnvelope, Verifier, VerifyFuture};
use crate::storage::{self, ObjectStore, StoreFuture};

pub fn resource(name: &str) -> String {
    format!("{}/resources/{}", env!("CARGO_MANIFEST_DIR"), name)
}

pub fn envelope(name: &str) -> NotificationEnvelope {
    let body = std::fs::read(resource(name)).unwrap();
    NotificationEnvelope::from_json(&body).unwrap()
}

/// Answers every envelope the same way
pub struct StaticVerifier(pub bool);

impl Verifier for StaticVerifier {
    fn is_authentic<'a>(&'a self, _envelope: &'a NotificationEnvelope) -> VerifyFuture<'a> {
        let authentic = self.0;
        Box::pin(async move { authentic })
    }
}

/// In-memory object store, keyed by "bucket/key"
#[derive(Default)]
pub struct MemoryStore {
    objects: HashMap<String, Bytes>,
    pub fetches: AtomicUsize,
    pub error: Option<storage::Error>,
}

impl MemoryStore {
    pub fn with_object(bucket: &str, key: &str, data: impl Into<Bytes>) -> Self {
        let mut store = Self::default();
        store.objects.insert(format!("{}/{}", bucket, key), data.into());
        store
    }

    pub fn failing(error: storage::Error) -> Self {
        Self {
            error: Some(error),
            ..Default::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl ObjectStore for MemoryStore {
    fn fetch<'a>(&'a self, bucket: &'a str, key: &'a str) -> StoreFuture<'a, Bytes> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let result = match self.error {
            Some(ref e) => Err(e.clone()),
            None => self
                .objects
                .get(&format!("{}/{}", bucket, key))
                .cloned()
                .ok_or_else(|| storage::Error::NotFound(format!("{}/{}", bucket, key))),
        };

        Box::pin(async move { result })
    }
}

/// Records every URL it is asked to confirm
#[derive(Default)]
pub struct RecordingConfirmer {
    pub urls: Mutex<Vec<String>>,
}

impl RecordingConfirmer {
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

impl Confirmer for RecordingConfirmer {
    fn confirm<'a>(&'a self, subscribe_url: &'a str) -> ConfirmFuture<'a> {
        self.urls.lock().unwrap().push(subscribe_url.to_string());
        Box::pin(async {})
    }
}
