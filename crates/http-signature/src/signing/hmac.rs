use std::fmt;

use anyhow::Result;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use sha2::{Sha256, Sha512};

use super::signer::MessageSigner;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HmacDigest {
    Sha1,
    Sha256,
    Sha512,
}

impl HmacDigest {
    pub fn algorithm_name(self) -> &'static str {
        match self {
            HmacDigest::Sha1 => "hmac-sha1",
            HmacDigest::Sha256 => "hmac-sha256",
            HmacDigest::Sha512 => "hmac-sha512",
        }
    }
}

/// HMAC signer over a shared secret.
///
/// The secret is used as raw bytes of the supplied string.
#[derive(Clone)]
pub struct HmacSigner {
    key: Vec<u8>,
    digest: HmacDigest,
}

impl HmacSigner {
    pub fn new(key: impl AsRef<[u8]>, digest: HmacDigest) -> Self {
        Self {
            key: key.as_ref().to_vec(),
            digest,
        }
    }

    pub fn digest(&self) -> HmacDigest {
        self.digest
    }
}

fn authenticate<M: Mac>(mut mac: M, data: &[u8]) -> Vec<u8> {
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

impl MessageSigner for HmacSigner {
    fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        let invalid_key = |e: hmac::digest::InvalidLength| {
            anyhow::anyhow!("invalid {} key: {e}", self.digest.algorithm_name())
        };
        let tag = match self.digest {
            HmacDigest::Sha1 => authenticate(
                Hmac::<Sha1>::new_from_slice(&self.key).map_err(invalid_key)?,
                data,
            ),
            HmacDigest::Sha256 => authenticate(
                Hmac::<Sha256>::new_from_slice(&self.key).map_err(invalid_key)?,
                data,
            ),
            HmacDigest::Sha512 => authenticate(
                Hmac::<Sha512>::new_from_slice(&self.key).map_err(invalid_key)?,
                data,
            ),
        };
        Ok(tag)
    }

    fn algorithm(&self) -> &str {
        self.digest.algorithm_name()
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("digest", &self.digest)
            .finish_non_exhaustive()
    }
}
