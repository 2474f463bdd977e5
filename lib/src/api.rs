/// Contains API-related struct definitions that are shared between server
/// and client.
use serde::{Deserialize, Serialize};

use crate::email::CanonicalEmail;

/// JSON API response from the server.
///
/// Indicates if the envelope was accepted and, when it carried an email,
/// what was extracted from it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerResult {
    pub success: bool,
    pub message: Option<String>,
    pub email: Option<EmailSummary>,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailSummary {
    pub to: Vec<String>,
    pub from: String,
    pub subject: String,
    pub attachments: Vec<AttachmentSummary>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttachmentSummary {
    pub filename: String,
    pub mime_type: String,
    pub size: usize,
}

impl From<&CanonicalEmail> for EmailSummary {
    fn from(email: &CanonicalEmail) -> Self {
        Self {
            to: email.to.clone(),
            from: email.from.clone(),
            subject: email.subject.clone(),
            attachments: email
                .attachments
                .iter()
                .map(|a| AttachmentSummary {
                    filename: a.filename.clone(),
                    mime_type: a.mime_type.clone(),
                    size: a.size,
                })
                .collect(),
        }
    }
}
