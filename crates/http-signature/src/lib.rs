pub mod error;
pub mod headers;
pub mod signature;
pub mod signing;

pub use error::{Result, SignatureError};
pub use headers::Headers;
pub use signature::{Signature, Signer, SigningContext, signing_string};
pub use signing::{Algorithm, HmacDigest, HmacSigner, MessageSigner, RsaDigest, RsaSigner};
