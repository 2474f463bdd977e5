use super::storage;

/// All possible errors raised while normalizing a notification
#[derive(Debug)]
pub enum Error {
    /// Signature did not verify, or the topic is not ours
    Authenticity(String),
    UnknownEnvelopeType(String),
    InvalidNotificationType(String),
    StorageFetch(storage::Error),
    MalformedNotification(String),
    Mime(String),
    Attachment(String),
    Config(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Error::Authenticity(ref msg) => write!(f, "Authenticity: {}", msg),
            Error::UnknownEnvelopeType(ref t) => write!(f, "UnknownEnvelopeType: {}", t),
            Error::InvalidNotificationType(ref t) => write!(
                f,
                "InvalidNotificationType: \"{}\", expecting Received",
                t
            ),
            Error::StorageFetch(ref e) => write!(f, "StorageFetch: {}", e),
            Error::MalformedNotification(ref msg) => write!(f, "MalformedNotification: {}", msg),
            Error::Mime(ref msg) => write!(f, "Mime: {}", msg),
            Error::Attachment(ref msg) => write!(f, "Attachment: {}", msg),
            Error::Config(ref msg) => write!(f, "Config: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::StorageFetch(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<storage::Error> for Error {
    fn from(err: storage::Error) -> Self {
        Error::StorageFetch(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::MalformedNotification(err.to_string())
    }
}

impl From<mailparse::MailParseError> for Error {
    fn from(err: mailparse::MailParseError) -> Self {
        Error::Mime(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Attachment(err.to_string())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Error::Config(err.to_string())
    }
}
