mod algorithm;
mod hmac;
mod rsa;
mod signer;

pub use algorithm::Algorithm;
pub use signer::MessageSigner;
pub use self::hmac::{HmacDigest, HmacSigner};
pub use self::rsa::{RsaDigest, RsaSigner};
