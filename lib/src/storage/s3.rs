use std::time::Duration;

use aws_config::timeout::TimeoutConfig;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use bytes::Bytes;

use crate::storage::client::{ObjectStore, StoreFuture};
use crate::storage::Error;

/// Object store backed by S3, where the receipt rule drops raw messages.
#[derive(Clone, Debug)]
pub struct S3Store {
    client: aws_sdk_s3::Client,
}

impl S3Store {
    /// Build a client for `region` using the default credential chain.
    ///
    /// Every operation is bounded by `timeout`; hitting it surfaces as
    /// `Error::RequestTimeout`.
    pub async fn new(region: &str, timeout: Duration) -> Self {
        let timeouts = TimeoutConfig::builder().operation_timeout(timeout).build();

        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .timeout_config(timeouts)
            .load()
            .await;

        Self::from_client(aws_sdk_s3::Client::new(&config))
    }

    pub fn from_client(client: aws_sdk_s3::Client) -> Self {
        Self { client }
    }
}

impl ObjectStore for S3Store {
    fn fetch<'a>(&'a self, bucket: &'a str, key: &'a str) -> StoreFuture<'a, Bytes> {
        Box::pin(async move {
            let resp = self
                .client
                .get_object()
                .bucket(bucket)
                .key(key)
                .send()
                .await?;

            let data = resp
                .body
                .collect()
                .await
                .map_err(|e| Error::RequestError(e.to_string()))?
                .into_bytes();

            log::debug!("Fetched s3://{}/{} ({} bytes)", bucket, key, data.len());

            Ok(data)
        })
    }
}
