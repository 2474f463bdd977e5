use mailparse::{DispositionType, MailHeaderMap, ParsedMail};

use crate::Error;

/// Structured view of a raw MIME message.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedMessage {
    /// First text/plain part that is not an attachment
    pub text_part: Option<String>,

    /// First text/html part that is not an attachment
    pub html_part: Option<String>,

    /// Decoded body of the top-level part. Only meaningful when the
    /// message is not multipart.
    pub body: String,

    pub is_multipart: bool,

    pub attachments: Vec<AttachmentPart>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttachmentPart {
    /// MIME type of attachment (e.g., image/png)
    pub mime_type: String,

    pub inline: bool,

    /// Content-ID without the surrounding angle brackets.
    /// This ID is used to map the attachment to the image in HTML.
    /// For example: <img src="cid:abcd">
    pub content_id: Option<String>,

    /// Declared filename, if any
    pub filename: Option<String>,

    /// Transfer-decoded content
    pub content: Vec<u8>,
}

impl ParsedMessage {
    /// Convert a raw MIME email into structured format
    pub fn parse(raw: &[u8]) -> Result<ParsedMessage, Error> {
        let parsed = mailparse::parse_mail(raw)?;

        let mut message = ParsedMessage {
            body: body_text(&parsed),
            is_multipart: !parsed.subparts.is_empty(),
            ..Default::default()
        };

        message.parse_recursive(&parsed);

        Ok(message)
    }

    /// Walk the MIME tree depth-first and extract the following:
    ///
    /// 1. Body (text and/or html)
    /// 2. Inline attachments
    /// 3. Regular attachments
    ///
    fn parse_recursive(&mut self, part: &ParsedMail) {
        let mimetype = &part.ctype.mimetype;

        if mimetype.starts_with("multipart/") {
            for subpart in part.subparts.iter() {
                self.parse_recursive(subpart);
            }
            return;
        }

        // If this is an attachment, append to Vec and return
        if let Some(attachment) = AttachmentPart::from_mime(part) {
            self.attachments.push(attachment);
            return;
        }

        if mimetype == "text/plain" && self.text_part.is_none() {
            self.text_part = Some(body_text(part));
        } else if mimetype == "text/html" && self.html_part.is_none() {
            self.html_part = Some(body_text(part));
        }
    }
}

impl AttachmentPart {
    /// Inspect part headers to determine if this is an attachment.
    /// If it is, build the AttachmentPart and return it.
    fn from_mime(part: &ParsedMail) -> Option<AttachmentPart> {
        let mimetype = &part.ctype.mimetype;
        let disposition = part.get_content_disposition();

        let filename = disposition
            .params
            .get("filename")
            .or_else(|| part.ctype.params.get("name"))
            .cloned();

        let is_text = mimetype.starts_with("text/");

        // mailparse reports a missing Content-Disposition as inline, so only
        // trust "inline" when the header is actually there
        let declared = part.headers.get_first_value("Content-Disposition").is_some();

        let inline = match disposition.disposition {
            DispositionType::Attachment => false,
            DispositionType::Inline if declared => {
                // Inline text is body content, not an attachment
                if is_text && filename.is_none() {
                    return None;
                }
                true
            }
            _ => {
                // A named non-text leaf is still an attachment
                if is_text || filename.is_none() {
                    return None;
                }
                false
            }
        };

        let content = match part.get_body_raw() {
            Ok(body) => body,
            Err(e) => {
                log::error!("Attachment body could not be decoded: {}", e);
                return None;
            }
        };

        let content_id = part
            .headers
            .get_first_value("Content-ID")
            .map(|id| id.trim().trim_start_matches('<').trim_end_matches('>').to_string())
            .filter(|id| !id.is_empty());

        Some(AttachmentPart {
            mime_type: mimetype.to_string(),
            inline,
            content_id,
            filename,
            content,
        })
    }
}

/// Charset-decoded body of a part. Falls back to lossy UTF-8 on the raw
/// bytes, and to an empty string when even that is unavailable.
fn body_text(part: &ParsedMail) -> String {
    match part.get_body() {
        Ok(body) => body,
        Err(e) => {
            log::warn!("Falling back to lossy body decoding: {}", e);
            part.get_body_raw()
                .map(|raw| String::from_utf8_lossy(&raw).into_owned())
                .unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_mail(name: &str) -> ParsedMessage {
        let content = std::fs::read(crate::testing::resource(name)).unwrap();
        ParsedMessage::parse(&content).unwrap()
    }

    #[test]
    fn parse_multipart_body() {
        let mail = get_mail("multipart.eml");

        assert!(mail.is_multipart);
        assert_eq!(
            mail.text_part.as_deref().map(str::trim_end),
            Some("Numbers are up \u{2014} see attached.")
        );
        assert_eq!(
            mail.html_part.as_deref().map(str::trim_end),
            Some(r#"<p>Numbers are up. <img src="cid:img1"></p>"#)
        );
    }

    #[test]
    fn parse_attachments() {
        let mail = get_mail("multipart.eml");

        assert_eq!(mail.attachments.len(), 2);

        let image = &mail.attachments[0];
        assert!(image.inline);
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.content_id.as_deref(), Some("img1"));
        assert_eq!(image.filename, None);
        assert_eq!(image.content, b"\x89PNG\r\n\x1a\n");

        let report = &mail.attachments[1];
        assert!(!report.inline);
        assert_eq!(report.mime_type, "text/plain");
        assert_eq!(report.filename.as_deref(), Some("a/b.txt"));
        assert_eq!(report.content, b"report data\n");
    }

    #[test]
    fn parse_single_part() {
        let mail = get_mail("single_part_html.eml");

        assert!(!mail.is_multipart);
        assert!(mail.attachments.is_empty());
        assert!(mail.body.contains("<b>there</b>"));
    }
}
