use std::path::Path;
use std::sync::Arc;

use crate::config::Config;
use crate::confirm::Confirmer;
use crate::email::{Attachment, CanonicalEmail};
use crate::mime::ParsedMessage;
use crate::ses::{self, InnerNotification};
use crate::sns::{EnvelopeType, NotificationEnvelope, Verifier};
use crate::storage::ObjectStore;
use crate::{sanitize, Error};

/// Outcome of normalizing one envelope.
#[derive(Debug)]
pub enum Normalized {
    /// Valid envelope that carries no email (confirmations, SES test pings)
    Empty,
    Email(CanonicalEmail),
}

impl Normalized {
    pub fn is_empty(&self) -> bool {
        matches!(self, Normalized::Empty)
    }

    pub fn into_email(self) -> Option<CanonicalEmail> {
        match self {
            Normalized::Email(email) => Some(email),
            Normalized::Empty => None,
        }
    }
}

/// Turns SNS envelopes describing SES inbound mail into `CanonicalEmail`s.
///
/// Holds no per-request state; a single adapter can serve any number of
/// envelopes concurrently.
pub struct Adapter<V, S, C> {
    config: Arc<Config>,
    verifier: V,
    store: S,
    confirmer: C,
}

impl<V, S, C> Adapter<V, S, C>
where
    V: Verifier,
    S: ObjectStore,
    C: Confirmer,
{
    pub fn new(config: Arc<Config>, verifier: V, store: S, confirmer: C) -> Self {
        Self {
            config,
            verifier,
            store,
            confirmer,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub async fn normalize(&self, envelope: NotificationEnvelope) -> Result<Normalized, Error> {
        log::debug!("Envelope {} of type {}", envelope.message_id, envelope.type_);

        // Nothing from an unverified envelope is looked at past this point
        self.authenticate(&envelope).await?;

        match envelope.type_.clone() {
            EnvelopeType::SubscriptionConfirmation => {
                match envelope.subscribe_url {
                    Some(ref url) => self.confirmer.confirm(url).await,
                    None => log::error!(
                        "Subscription confirmation {} has no SubscribeURL",
                        envelope.message_id
                    ),
                }
                Ok(Normalized::Empty)
            }
            EnvelopeType::Notification => self.email(envelope).await,
            EnvelopeType::Other(t) => Err(Error::UnknownEnvelopeType(t)),
        }
    }

    async fn authenticate(&self, envelope: &NotificationEnvelope) -> Result<(), Error> {
        if !envelope.topic_arn().ends_with(&self.config.topic_suffix) {
            log::warn!("Rejecting envelope from topic {}", envelope.topic_arn());
            return Err(Error::Authenticity(format!(
                "unexpected topic {}",
                envelope.topic_arn()
            )));
        }

        if !self.verifier.is_authentic(envelope).await {
            log::warn!("Rejecting unverified envelope {}", envelope.message_id);
            return Err(Error::Authenticity(format!(
                "signature check failed for {}",
                envelope.message_id
            )));
        }

        Ok(())
    }

    async fn email(&self, envelope: NotificationEnvelope) -> Result<Normalized, Error> {
        let inner = InnerNotification::from_json(&envelope.message)?;

        if !inner.is_received() {
            return Err(Error::InvalidNotificationType(inner.notification_type));
        }

        // SES test notifications look like this
        let common = match inner.mail.common_headers {
            Some(ref common) => common,
            None => {
                log::info!("Ignoring envelope {} without commonHeaders", envelope.message_id);
                return Ok(Normalized::Empty);
            }
        };

        let to = common
            .to
            .clone()
            .unwrap_or_else(|| inner.receipt.recipients.clone());

        let from = common
            .from
            .as_ref()
            .and_then(|from| from.first())
            .cloned()
            .ok_or_else(|| Error::MalformedNotification("commonHeaders.from is empty".into()))?;

        let cc = common.cc.clone().unwrap_or_default();
        let bcc = common.bcc.clone().unwrap_or_default();
        let subject = common.subject.clone().unwrap_or_default();
        let headers = ses::raw_headers(&inner.mail.headers);

        let (bucket, key) = inner.locator()?;
        let raw = self.store.fetch(bucket, key).await?;
        let message = ParsedMessage::parse(&raw)?;

        let (text, html) = bodies(&message);

        let dir = self.config.attachment_dir.as_deref().map(Path::new);
        let attachments = message
            .attachments
            .into_iter()
            .map(|part| Attachment::materialize(part, dir))
            .collect::<Result<Vec<_>, _>>()?;

        log::info!(
            "Normalized email {} for {} recipient(s), {} attachment(s)",
            inner.mail.message_id,
            to.len(),
            attachments.len()
        );

        Ok(Normalized::Email(CanonicalEmail {
            to,
            from,
            cc,
            bcc,
            subject,
            text,
            html,
            headers,
            attachments,
            envelope,
        }))
    }
}

/// Pick the text and HTML bodies.
///
/// Multipart messages have dedicated parts. A single-part body may be
/// anything, so it is stripped of markup and used as text only.
fn bodies(message: &ParsedMessage) -> (String, String) {
    if message.is_multipart {
        (
            message.text_part.clone().unwrap_or_default(),
            message.html_part.clone().unwrap_or_default(),
        )
    } else {
        (sanitize::clean(&message.body), String::new())
    }
}
