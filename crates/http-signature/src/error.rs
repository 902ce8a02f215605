#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("Signing primitive failed: {0}")]
    Primitive(String),
    #[error("Failed to encode signing input: {0}")]
    Encoding(String),
    #[error("Unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

impl SignatureError {
    pub(crate) fn primitive(error: anyhow::Error) -> Self {
        Self::Primitive(format!("{error:#}"))
    }
}

pub type Result<T> = std::result::Result<T, SignatureError>;
