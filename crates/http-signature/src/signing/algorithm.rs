use std::fmt;

use crate::error::{Result, SignatureError};

use super::hmac::{HmacDigest, HmacSigner};
use super::rsa::{RsaDigest, RsaSigner};
use super::signer::MessageSigner;

/// Signature algorithm together with the key material it signs with.
///
/// HMAC variants carry the shared secret, RSA variants a PEM-encoded
/// private key. `Debug` prints the algorithm name only.
#[derive(Clone, PartialEq, Eq)]
pub enum Algorithm {
    HmacSha1 { key: String },
    HmacSha256 { key: String },
    HmacSha512 { key: String },
    RsaSha256 { pem: String },
    RsaSha512 { pem: String },
}

impl Algorithm {
    pub const NAMES: [&'static str; 5] = [
        "hmac-sha1",
        "hmac-sha256",
        "hmac-sha512",
        "rsa-sha256",
        "rsa-sha512",
    ];

    /// Canonical name written to the `algorithm=` field.
    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::HmacSha1 { .. } => HmacDigest::Sha1.algorithm_name(),
            Algorithm::HmacSha256 { .. } => HmacDigest::Sha256.algorithm_name(),
            Algorithm::HmacSha512 { .. } => HmacDigest::Sha512.algorithm_name(),
            Algorithm::RsaSha256 { .. } => RsaDigest::Sha256.algorithm_name(),
            Algorithm::RsaSha512 { .. } => RsaDigest::Sha512.algorithm_name(),
        }
    }

    /// Builds a variant from its canonical name and raw key material.
    pub fn from_name(name: &str, key_material: impl Into<Vec<u8>>) -> Result<Self> {
        let material = String::from_utf8(key_material.into()).map_err(|e| {
            SignatureError::Encoding(format!("key material for {name} is not UTF-8: {e}"))
        })?;
        let algorithm = match name {
            "hmac-sha1" => Algorithm::HmacSha1 { key: material },
            "hmac-sha256" => Algorithm::HmacSha256 { key: material },
            "hmac-sha512" => Algorithm::HmacSha512 { key: material },
            "rsa-sha256" => Algorithm::RsaSha256 { pem: material },
            "rsa-sha512" => Algorithm::RsaSha512 { pem: material },
            other => return Err(SignatureError::UnsupportedAlgorithm(other.to_owned())),
        };
        Ok(algorithm)
    }

    /// Materialises the signing primitive. RSA keys are parsed here.
    pub fn signer(&self) -> Result<Box<dyn MessageSigner>> {
        let signer: Box<dyn MessageSigner> = match self {
            Algorithm::HmacSha1 { key } => Box::new(HmacSigner::new(key, HmacDigest::Sha1)),
            Algorithm::HmacSha256 { key } => Box::new(HmacSigner::new(key, HmacDigest::Sha256)),
            Algorithm::HmacSha512 { key } => Box::new(HmacSigner::new(key, HmacDigest::Sha512)),
            Algorithm::RsaSha256 { pem } => Box::new(
                RsaSigner::from_pem(pem, RsaDigest::Sha256).map_err(SignatureError::primitive)?,
            ),
            Algorithm::RsaSha512 { pem } => Box::new(
                RsaSigner::from_pem(pem, RsaDigest::Sha512).map_err(SignatureError::primitive)?,
            ),
        };
        Ok(signer)
    }
}

impl fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Algorithm").field(&self.name()).finish()
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
