use thiserror::Error;

/// Failure modes of token handling.
///
/// `Malformed` is structural: the input is not three decodable segments with
/// a supported header and a parseable payload. Every other variant describes
/// a well-formed token that must not be trusted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signature is invalid")]
    SignatureInvalid,

    #[error("Token has expired")]
    Expired,

    #[error("Token claim `{0}` does not match")]
    InvalidClaim(&'static str),

    #[error("Token subject does not match")]
    SubjectMismatch,

    #[error("Token subject must not be empty")]
    EmptySubject,

    #[error("Signing key must not be empty")]
    InvalidKey,

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

impl TokenError {
    /// Short machine-readable name, suitable as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::Malformed(_) => "malformed",
            TokenError::SignatureInvalid => "signature_invalid",
            TokenError::Expired => "expired",
            TokenError::InvalidClaim(_) => "invalid_claim",
            TokenError::SubjectMismatch => "subject_mismatch",
            TokenError::EmptySubject => "empty_subject",
            TokenError::InvalidKey => "invalid_key",
            TokenError::Encoding(_) => "encoding",
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        TokenError::Malformed(reason.into())
    }
}
