use std::sync::Arc;

use warp::{Rejection, Reply};

use sesmail::api::{EmailSummary, ServerResult};
use sesmail::confirm::Confirmer;
use sesmail::sns::{NotificationEnvelope, Verifier};
use sesmail::storage::ObjectStore;
use sesmail::{Adapter, Normalized};

use super::error::Error;

/// Handles one SNS delivery.
///
/// Attachment temp files live until the email is dropped at the end of
/// this handler.
pub async fn envelope<V, S, C>(
    body: bytes::Bytes,
    adapter: Arc<Adapter<V, S, C>>,
) -> Result<impl Reply, Rejection>
where
    V: Verifier,
    S: ObjectStore,
    C: Confirmer,
{
    let envelope = NotificationEnvelope::from_json(&body).map_err(|e| {
        log::error!("Could not decode envelope: {}", e);
        warp::reject::custom(Error(e.into()))
    })?;

    let normalized = adapter.normalize(envelope).await.map_err(|e| {
        log::error!("{}", e);
        warp::reject::custom(Error(e))
    })?;

    let resp = match normalized {
        Normalized::Empty => ServerResult {
            success: true,
            message: Some("No email in envelope".to_string()),
            ..Default::default()
        },
        Normalized::Email(email) => {
            log::info!(
                "Email from {} to {:?}: {:?}, {} attachment(s)",
                email.from,
                email.to,
                email.subject,
                email.attachments.len()
            );

            ServerResult {
                success: true,
                email: Some(EmailSummary::from(&email)),
                ..Default::default()
            }
        }
    };

    Ok(warp::reply::json(&resp))
}
