mod envelope;
mod verifier;

pub use envelope::{EnvelopeType, NotificationEnvelope};
pub use verifier::{
    signing_cert_url, string_to_sign, verify_signature, SnsVerifier, Verifier, VerifyFuture,
};
