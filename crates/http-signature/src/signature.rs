//! Signature construction for the `Signature` / `Authorization` headers.
//!
//! See <https://tools.ietf.org/html/draft-cavage-http-signatures-10#section-2.1>.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use http::Uri;
use serde::Serialize;

use crate::error::{Result, SignatureError};
use crate::headers::Headers;
use crate::signing::{Algorithm, MessageSigner};

const REQUEST_TARGET: &str = "(request-target)";

/// Builds the string that gets signed:
/// `(request-target): {method} {path}` followed by the canonical header block.
///
/// `path` is used verbatim and should already carry the query string.
pub fn signing_string(method: &str, path: &str, headers: &Headers) -> String {
    format!(
        "{REQUEST_TARGET}: {} {path}\n{}",
        method.to_lowercase(),
        headers.canonical_block()
    )
}

/// A computed request signature. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    signing_string: String,
    signature: String,
    header_value: String,
    authorization_header_value: String,
}

impl Signature {
    pub fn new(
        algorithm: &Algorithm,
        key_id: &str,
        path: &str,
        method: &str,
        headers: &Headers,
    ) -> Result<Self> {
        let signer = algorithm.signer()?;
        Self::with_signer(signer.as_ref(), key_id, path, method, headers)
    }

    /// Builds a signature with a caller-supplied primitive. The `algorithm=`
    /// field carries whatever name the signer reports.
    pub fn with_signer(
        signer: &dyn MessageSigner,
        key_id: &str,
        path: &str,
        method: &str,
        headers: &Headers,
    ) -> Result<Self> {
        let signing_string = signing_string(method, path, headers);
        let raw = signer
            .sign(signing_string.as_bytes())
            .map_err(SignatureError::primitive)?;
        let signature = BASE64.encode(raw);

        let header_value = [
            format!("keyId=\"{key_id}\""),
            format!("algorithm=\"{}\"", signer.algorithm()),
            format!("headers=\"{REQUEST_TARGET} {}\"", headers.header_list()),
            format!("signature=\"{signature}\""),
        ]
        .join(",");
        let authorization_header_value = format!("Signature {header_value}");

        Ok(Self {
            signing_string,
            signature,
            header_value,
            authorization_header_value,
        })
    }

    /// The exact string that was signed.
    pub fn signing_string(&self) -> &str {
        &self.signing_string
    }

    /// Base64 of the raw signature bytes.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Value for the HTTP `Signature` header.
    pub fn header_value(&self) -> &str {
        &self.header_value
    }

    /// Value for the HTTP `Authorization` header.
    pub fn authorization_header_value(&self) -> &str {
        &self.authorization_header_value
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.header_value)
    }
}

/// Everything a single signature is derived from. Read-only once built.
#[derive(Debug, Clone)]
pub struct SigningContext {
    algorithm: Algorithm,
    key_id: String,
    method: String,
    path: String,
    headers: Headers,
}

impl SigningContext {
    pub fn new(
        algorithm: Algorithm,
        key_id: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        headers: Headers,
    ) -> Self {
        Self {
            algorithm,
            key_id: key_id.into(),
            method: method.into(),
            path: path.into(),
            headers,
        }
    }

    /// Context whose request target is the URI's path and query.
    pub fn from_uri(
        algorithm: Algorithm,
        key_id: impl Into<String>,
        method: impl Into<String>,
        uri: &Uri,
        headers: Headers,
    ) -> Self {
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .filter(|pq| !pq.is_empty())
            .unwrap_or("/");
        Self::new(algorithm, key_id, method, path, headers)
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request target path, query included.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn sign(&self) -> Result<Signature> {
        Signature::new(
            &self.algorithm,
            &self.key_id,
            &self.path,
            &self.method,
            &self.headers,
        )
    }
}

/// Reusable signer bound to one algorithm and key id.
///
/// Every call recomputes from scratch; nothing is cached between requests.
#[derive(Debug, Clone)]
pub struct Signer {
    algorithm: Algorithm,
    key_id: String,
}

impl Signer {
    pub fn new(algorithm: Algorithm, key_id: impl Into<String>) -> Self {
        Self {
            algorithm,
            key_id: key_id.into(),
        }
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn algorithm(&self) -> &Algorithm {
        &self.algorithm
    }

    pub fn sign(&self, path: &str, method: &str, headers: &Headers) -> Result<Signature> {
        Signature::new(&self.algorithm, &self.key_id, path, method, headers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedSigner;

    impl MessageSigner for FixedSigner {
        fn sign(&self, _data: &[u8]) -> anyhow::Result<Vec<u8>> {
            Ok(b"fixed".to_vec())
        }

        fn algorithm(&self) -> &str {
            "fake-alg"
        }
    }

    struct FailingSigner;

    impl MessageSigner for FailingSigner {
        fn sign(&self, _data: &[u8]) -> anyhow::Result<Vec<u8>> {
            anyhow::bail!("device unavailable")
        }

        fn algorithm(&self) -> &str {
            "fake-alg"
        }
    }

    #[test]
    fn signing_string_with_date_header() {
        let headers = Headers::new([("Date", "Tue, 07 Jun 2014 20:51:35 GMT")]);
        assert_eq!(
            signing_string("GET", "/foo?bar=1", &headers),
            "(request-target): get /foo?bar=1\ndate: Tue, 07 Jun 2014 20:51:35 GMT"
        );
    }

    #[test]
    fn signing_string_without_headers_ends_with_newline() {
        assert_eq!(
            signing_string("POST", "/", &Headers::default()),
            "(request-target): post /\n"
        );
    }

    #[test]
    fn header_value_layout_with_injected_signer() {
        let headers = Headers::new([("Host", "example.com"), ("Date", "today")]);
        let signature =
            Signature::with_signer(&FixedSigner, "key-1", "/", "GET", &headers).unwrap();

        assert_eq!(signature.signature(), "Zml4ZWQ=");
        assert_eq!(
            signature.header_value(),
            "keyId=\"key-1\",algorithm=\"fake-alg\",headers=\"(request-target) host date\",signature=\"Zml4ZWQ=\""
        );
        assert_eq!(
            signature.authorization_header_value(),
            format!("Signature {}", signature.header_value())
        );
        assert_eq!(signature.to_string(), signature.header_value());
    }

    #[test]
    fn primitive_failure_is_surfaced() {
        let error = Signature::with_signer(&FailingSigner, "key-1", "/", "GET", &Headers::default())
            .unwrap_err();
        match error {
            SignatureError::Primitive(message) => assert_eq!(message, "device unavailable"),
            other => panic!("expected Primitive, got {other:?}"),
        }
    }

    #[test]
    fn context_from_uri_keeps_query() {
        let uri: Uri = "https://example.com/foo?bar=1".parse().unwrap();
        let context = SigningContext::from_uri(
            Algorithm::HmacSha256 { key: "secret".into() },
            "key-1",
            "GET",
            &uri,
            Headers::default(),
        );
        assert_eq!(context.path(), "/foo?bar=1");
    }

    #[test]
    fn context_from_authority_only_uri_targets_root() {
        let uri: Uri = "https://example.com".parse().unwrap();
        let context = SigningContext::from_uri(
            Algorithm::HmacSha1 { key: "secret".into() },
            "key-1",
            "GET",
            &uri,
            Headers::default(),
        );
        assert_eq!(context.path(), "/");
    }

    #[test]
    fn context_exposes_its_inputs_and_signs_them() {
        let headers = Headers::new([("Date", "today")]);
        let context = SigningContext::new(
            Algorithm::HmacSha256 { key: "secret".into() },
            "key-1",
            "GET",
            "/foo",
            headers.clone(),
        );
        assert_eq!(context.algorithm().name(), "hmac-sha256");
        assert_eq!(context.key_id(), "key-1");
        assert_eq!(context.method(), "GET");
        assert_eq!(context.headers(), &headers);

        let direct = Signature::new(context.algorithm(), "key-1", "/foo", "GET", &headers).unwrap();
        assert_eq!(context.sign().unwrap(), direct);
    }

    #[test]
    fn serializes_all_fields() {
        let signature =
            Signature::with_signer(&FixedSigner, "k", "/", "GET", &Headers::default()).unwrap();
        let value = serde_json::to_value(&signature).unwrap();
        assert_eq!(value["signature"], "Zml4ZWQ=");
        assert_eq!(value["signing_string"], "(request-target): get /\n");
        assert_eq!(value["authorization_header_value"], signature.authorization_header_value());
    }
}
