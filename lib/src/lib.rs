//! Normalizes SES inbound mail, delivered as SNS notifications, into
//! `CanonicalEmail` records.
//!
//! The flow for one envelope is: verify it came from SNS on the expected
//! topic, dispatch on its type, fetch the raw message from S3, decompose
//! the MIME tree and assemble the email.

pub mod adapter;
pub mod api;
pub mod config;
pub mod confirm;
pub mod email;
pub mod error;
pub mod mime;
pub mod sanitize;
pub mod ses;
pub mod sns;
pub mod storage;

#[cfg(test)]
pub(crate) mod testing;

pub use adapter::{Adapter, Normalized};
pub use config::Config;
pub use email::{Attachment, CanonicalEmail};
pub use error::Error;
