mod client;
mod error;
mod s3;

pub use client::{ObjectStore, StoreFuture};
pub use error::Error;
pub use s3::S3Store;
