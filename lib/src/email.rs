use std::io::{Read, Seek, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::mime::AttachmentPart;
use crate::sns::NotificationEnvelope;
use crate::Error;

/// Normalized inbound email, ready for downstream processing.
///
/// `text` and `html` are always present; a missing body is an empty string.
#[derive(Debug)]
pub struct CanonicalEmail {
    pub to: Vec<String>,
    pub from: String,
    pub cc: Vec<String>,
    pub bcc: Vec<String>,
    pub subject: String,

    /// Plaintext body
    pub text: String,

    /// HTML body
    pub html: String,

    /// Raw header block, CRLF separated
    pub headers: String,

    pub attachments: Vec<Attachment>,

    /// The envelope this email was built from, passed through untouched
    pub envelope: NotificationEnvelope,
}

/// Attachment content materialized into a temporary file.
///
/// The file is deleted when the attachment is dropped.
#[derive(Debug)]
pub struct Attachment {
    pub mime_type: String,
    pub filename: String,
    pub size: usize,
    file: NamedTempFile,
}

impl Attachment {
    /// Write `part` out to a fresh temp file in `dir` (the OS temp dir when `None`).
    pub fn materialize(part: AttachmentPart, dir: Option<&Path>) -> Result<Attachment, Error> {
        let filename = filename_for(&part);

        let mut file = {
            let mut builder = tempfile::Builder::new();
            builder.prefix(prefix_for(&filename));

            match dir {
                Some(dir) => builder.tempfile_in(dir)?,
                None => builder.tempfile()?,
            }
        };

        file.write_all(&part.content)?;
        file.flush()?;
        file.rewind()?;

        Ok(Attachment {
            mime_type: part.mime_type,
            filename,
            size: part.content.len(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the full attachment content back from disk
    pub fn read(&self) -> Result<Vec<u8>, Error> {
        let mut data = Vec::with_capacity(self.size);
        self.file.reopen()?.read_to_end(&mut data)?;
        Ok(data)
    }
}

/// Inline parts are named after their Content-ID, everything else after the
/// declared filename. Path separators are replaced so the name is always a
/// single path component.
pub fn filename_for(part: &AttachmentPart) -> String {
    let name = if part.inline {
        part.content_id.as_ref().or(part.filename.as_ref())
    } else {
        part.filename.as_ref().or(part.content_id.as_ref())
    };

    sanitize_filename(name.map(String::as_str).unwrap_or("attachment"))
}

pub fn sanitize_filename(name: &str) -> String {
    name.replace(&['/', '\\'][..], "_")
}

/// Longest temp file prefix, in bytes. The full name stays in `Attachment::filename`.
const MAX_PREFIX_LEN: usize = 64;

fn prefix_for(filename: &str) -> &str {
    if filename.len() <= MAX_PREFIX_LEN {
        return filename;
    }

    let mut end = MAX_PREFIX_LEN;
    while !filename.is_char_boundary(end) {
        end -= 1;
    }
    &filename[..end]
}
