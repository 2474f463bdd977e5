use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use base64::Engine;
use lazy_static::lazy_static;
use regex::Regex;
use ring::signature;
use url::Url;

use super::envelope::{EnvelopeType, NotificationEnvelope};
use crate::Error;

pub type VerifyFuture<'a> = Pin<Box<dyn Future<Output = bool> + Send + 'a>>;

lazy_static! {
    static ref SIGNING_CERT_HOST: Regex =
        Regex::new(r"^sns\.[a-z0-9-]+\.amazonaws\.com(\.cn)?$").unwrap();
}

/// Decides whether an envelope really came from SNS.
///
/// Implementations answer with a plain bool: a failure to verify is
/// never an error, only "not authentic".
pub trait Verifier: Send + Sync {
    fn is_authentic<'a>(&'a self, envelope: &'a NotificationEnvelope) -> VerifyFuture<'a>;
}

impl<T: Verifier + ?Sized> Verifier for std::sync::Arc<T> {
    fn is_authentic<'a>(&'a self, envelope: &'a NotificationEnvelope) -> VerifyFuture<'a> {
        (**self).is_authentic(envelope)
    }
}

/// Verifies SNS message signatures against the certificate SNS links to.
pub struct SnsVerifier {
    client: reqwest::Client,
}

impl SnsVerifier {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(e.to_string()))?;

        Ok(Self { client })
    }

    async fn fetch_certificate(&self, url: Url) -> Result<Vec<u8>, String> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| e.to_string())?;

        let body = resp.bytes().await.map_err(|e| e.to_string())?;

        Ok(body.to_vec())
    }
}

impl Verifier for SnsVerifier {
    fn is_authentic<'a>(&'a self, envelope: &'a NotificationEnvelope) -> VerifyFuture<'a> {
        Box::pin(async move {
            // Reject anything we could never verify before touching the network
            let url = match signing_cert_url(envelope).and_then(|url| {
                string_to_sign(envelope)
                    .map(|_| url)
                    .ok_or_else(|| format!("cannot build string to sign for {}", envelope.type_))
            }) {
                Ok(url) => url,
                Err(reason) => {
                    log::warn!("Envelope {} is not authentic: {}", envelope.message_id, reason);
                    return false;
                }
            };

            let pem = match self.fetch_certificate(url).await {
                Ok(pem) => pem,
                Err(reason) => {
                    log::warn!(
                        "Failed to fetch signing certificate {}: {}",
                        envelope.signing_cert_url,
                        reason
                    );
                    return false;
                }
            };

            match verify_signature(envelope, &pem) {
                Ok(()) => true,
                Err(reason) => {
                    log::warn!("Envelope {} is not authentic: {}", envelope.message_id, reason);
                    false
                }
            }
        })
    }
}

/// Validate `SigningCertURL`: it must be HTTPS and hosted by SNS itself.
pub fn signing_cert_url(envelope: &NotificationEnvelope) -> Result<Url, String> {
    let url = Url::parse(&envelope.signing_cert_url).map_err(|e| e.to_string())?;

    if url.scheme() != "https" {
        return Err(format!("signing certificate not served over https: {}", url));
    }

    match url.host_str() {
        Some(host) if SIGNING_CERT_HOST.is_match(host) => Ok(url),
        _ => Err(format!("unexpected signing certificate host: {}", url)),
    }
}

/// Canonical string SNS signs, built from a fixed list of keys per envelope type.
///
/// Returns `None` when the type is unknown or a required key is missing.
pub fn string_to_sign(envelope: &NotificationEnvelope) -> Option<String> {
    let confirmation = match envelope.type_ {
        EnvelopeType::Notification => false,
        EnvelopeType::SubscriptionConfirmation => true,
        EnvelopeType::Other(ref t) if t == "UnsubscribeConfirmation" => true,
        EnvelopeType::Other(_) => return None,
    };

    let mut fields: Vec<(&str, &str)> = Vec::with_capacity(7);

    fields.push(("Message", envelope.message.as_str()));
    fields.push(("MessageId", envelope.message_id.as_str()));

    if confirmation {
        fields.push(("SubscribeURL", envelope.subscribe_url.as_deref()?));
        fields.push(("Timestamp", envelope.timestamp.as_str()));
        fields.push(("Token", envelope.token.as_deref()?));
    } else {
        if let Some(ref subject) = envelope.subject {
            fields.push(("Subject", subject.as_str()));
        }
        fields.push(("Timestamp", envelope.timestamp.as_str()));
    }

    fields.push(("TopicArn", envelope.topic_arn.as_str()));
    fields.push(("Type", envelope.type_.as_str()));

    let mut out = String::new();
    for (key, value) in fields {
        out.push_str(key);
        out.push('\n');
        out.push_str(value);
        out.push('\n');
    }

    Some(out)
}

/// Check the envelope signature against a PEM encoded signing certificate.
pub fn verify_signature(envelope: &NotificationEnvelope, cert_pem: &[u8]) -> Result<(), String> {
    let algorithm: &'static dyn signature::VerificationAlgorithm =
        match envelope.signature_version.as_str() {
            "1" => &signature::RSA_PKCS1_2048_8192_SHA1_FOR_LEGACY_USE_ONLY,
            "2" => &signature::RSA_PKCS1_2048_8192_SHA256,
            v => return Err(format!("unsupported SignatureVersion {:?}", v)),
        };

    let message = string_to_sign(envelope)
        .ok_or_else(|| format!("cannot build string to sign for {}", envelope.type_))?;

    let sig = base64::engine::general_purpose::STANDARD
        .decode(envelope.signature.as_bytes())
        .map_err(|e| format!("bad signature encoding: {}", e))?;

    let (_, pem) = x509_parser::pem::parse_x509_pem(cert_pem)
        .map_err(|e| format!("bad signing certificate: {:?}", e))?;
    let cert = pem
        .parse_x509()
        .map_err(|e| format!("bad signing certificate: {:?}", e))?;

    let key: &[u8] = cert.public_key().subject_public_key.data.as_ref();

    signature::UnparsedPublicKey::new(algorithm, key)
        .verify(message.as_bytes(), &sig)
        .map_err(|_| "signature mismatch".to_string())
}
