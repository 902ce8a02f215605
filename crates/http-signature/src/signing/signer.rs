/// Keyed signing primitive behind a signature algorithm.
///
/// Implementations are sync; signing is CPU-bound and side-effect free.
pub trait MessageSigner: Send + Sync {
    /// Sign the signing-string bytes. Returns raw signature bytes.
    fn sign(&self, data: &[u8]) -> anyhow::Result<Vec<u8>>;

    /// Algorithm name written to the `algorithm=` field (e.g. "hmac-sha256").
    fn algorithm(&self) -> &str;
}
