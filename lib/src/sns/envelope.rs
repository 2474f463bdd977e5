use serde::{Deserialize, Serialize};

/// `Type` of an SNS envelope.
///
/// Anything other than the two kinds we act on is kept verbatim so it can
/// be reported back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EnvelopeType {
    SubscriptionConfirmation,
    Notification,
    Other(String),
}

impl From<String> for EnvelopeType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "SubscriptionConfirmation" => Self::SubscriptionConfirmation,
            "Notification" => Self::Notification,
            _ => Self::Other(s),
        }
    }
}

impl From<EnvelopeType> for String {
    fn from(t: EnvelopeType) -> String {
        t.as_str().to_string()
    }
}

impl EnvelopeType {
    pub fn as_str(&self) -> &str {
        match *self {
            Self::SubscriptionConfirmation => "SubscriptionConfirmation",
            Self::Notification => "Notification",
            Self::Other(ref s) => s,
        }
    }
}

impl std::fmt::Display for EnvelopeType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outer message as POSTed by SNS to an HTTP(S) subscription.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NotificationEnvelope {
    #[serde(rename = "Type")]
    pub type_: EnvelopeType,

    #[serde(rename = "MessageId", default)]
    pub message_id: String,

    #[serde(rename = "TopicArn")]
    pub topic_arn: String,

    #[serde(rename = "Subject", default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,

    /// Nested JSON document, kept opaque here
    #[serde(rename = "Message")]
    pub message: String,

    #[serde(rename = "Timestamp", default)]
    pub timestamp: String,

    /// Only set on subscription (and unsubscribe) confirmations
    #[serde(rename = "Token", default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    #[serde(rename = "SubscribeURL", default, skip_serializing_if = "Option::is_none")]
    pub subscribe_url: Option<String>,

    #[serde(rename = "UnsubscribeURL", default, skip_serializing_if = "Option::is_none")]
    pub unsubscribe_url: Option<String>,

    #[serde(rename = "SignatureVersion", default)]
    pub signature_version: String,

    #[serde(rename = "Signature", default)]
    pub signature: String,

    #[serde(rename = "SigningCertURL", default)]
    pub signing_cert_url: String,
}

impl NotificationEnvelope {
    pub fn from_json(body: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(body)
    }

    pub fn topic_arn(&self) -> &str {
        &self.topic_arn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_notification() {
        let body = std::fs::read(crate::testing::resource("notification.json")).unwrap();
        let envelope = NotificationEnvelope::from_json(&body).unwrap();

        assert_eq!(envelope.type_, EnvelopeType::Notification);
        assert!(envelope.topic_arn().ends_with("sesmail"));
        assert_eq!(envelope.signature_version, "1");
        assert!(envelope.subscribe_url.is_none());
        assert!(envelope.message.starts_with('{'));
    }

    #[test]
    fn parse_subscription_confirmation() {
        let body =
            std::fs::read(crate::testing::resource("subscription_confirmation.json")).unwrap();
        let envelope = NotificationEnvelope::from_json(&body).unwrap();

        assert_eq!(envelope.type_, EnvelopeType::SubscriptionConfirmation);
        assert!(envelope.token.is_some());
        assert!(envelope
            .subscribe_url
            .as_deref()
            .unwrap()
            .contains("Action=ConfirmSubscription"));
    }

    #[test]
    fn unknown_type_is_kept() {
        let body = r#"{"Type": "UnsubscribeConfirmation", "TopicArn": "arn", "Message": ""}"#;
        let envelope = NotificationEnvelope::from_json(body.as_bytes()).unwrap();

        assert_eq!(
            envelope.type_,
            EnvelopeType::Other("UnsubscribeConfirmation".to_string())
        );

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["Type"], "UnsubscribeConfirmation");
    }
}
