//! Types for the SES receipt event carried in an SNS `Message`.
//!
//! Only the fields needed to rebuild an email are modelled; unknown
//! fields are ignored.
use serde::Deserialize;

use crate::Error;

pub const RECEIVED: &str = "Received";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InnerNotification {
    pub notification_type: String,
    #[serde(default)]
    pub mail: Mail,
    #[serde(default)]
    pub receipt: Receipt,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mail {
    #[serde(default)]
    pub message_id: String,
    #[serde(default)]
    pub headers: Vec<Header>,
    /// Absent on SES test notifications
    pub common_headers: Option<CommonHeaders>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Header {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommonHeaders {
    pub to: Option<Vec<String>>,
    pub from: Option<Vec<String>>,
    pub cc: Option<Vec<String>>,
    pub bcc: Option<Vec<String>>,
    pub subject: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    #[serde(default)]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub action: Action,
}

/// Receipt rule action. For S3 actions, points at the stored raw message.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    #[serde(rename = "type", default)]
    pub type_: String,
    pub bucket_name: Option<String>,
    pub object_key: Option<String>,
}

impl InnerNotification {
    pub fn from_json(message: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(message)?)
    }

    pub fn is_received(&self) -> bool {
        self.notification_type == RECEIVED
    }

    /// Bucket and key of the raw message
    pub fn locator(&self) -> Result<(&str, &str), Error> {
        let action = &self.receipt.action;

        match (action.bucket_name.as_deref(), action.object_key.as_deref()) {
            (Some(bucket), Some(key)) => Ok((bucket, key)),
            _ => Err(Error::MalformedNotification(format!(
                "receipt action {:?} has no bucketName/objectKey",
                action.type_
            ))),
        }
    }
}

/// Rebuild a raw header block from the name/value pairs SES flattens
/// headers into. Order is preserved.
pub fn raw_headers(headers: &[Header]) -> String {
    headers
        .iter()
        .map(|h| format!("{}: {}", h.name, h.value))
        .collect::<Vec<_>>()
        .join("\r\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_received() {
        let envelope = crate::testing::envelope("notification.json");
        let inner = InnerNotification::from_json(&envelope.message).unwrap();

        assert!(inner.is_received());
        assert_eq!(inner.mail.headers.len(), 4);
        assert_eq!(inner.receipt.recipients, vec!["inbox@example.com"]);

        let common = inner.mail.common_headers.as_ref().unwrap();
        assert_eq!(common.subject.as_deref(), Some("Quarterly report"));
        assert!(common.bcc.is_none());

        let (bucket, key) = inner.locator().unwrap();
        assert_eq!(bucket, "inbound-mail");
        assert!(key.starts_with("incoming/"));
    }

    #[test]
    fn missing_common_headers() {
        let inner = InnerNotification::from_json(
            r#"{"notificationType": "Received", "mail": {"headers": []}}"#,
        )
        .unwrap();

        assert!(inner.mail.common_headers.is_none());
        assert!(inner.locator().is_err());
    }

    #[test]
    fn raw_header_block() {
        let headers = vec![
            Header { name: "Subject".into(), value: "Hi".into() },
            Header { name: "X-Test".into(), value: "1".into() },
        ];

        assert_eq!(raw_headers(&headers), "Subject: Hi\r\nX-Test: 1");
        assert_eq!(raw_headers(&[]), "");
    }

    #[test]
    fn garbage_message() {
        let err = InnerNotification::from_json("not json").unwrap_err();
        assert!(matches!(err, Error::MalformedNotification(_)));
    }
}
