use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use http_signature::{Algorithm, Headers, Signer};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SigningAlgorithm {
    #[value(name = "hmac-sha1")]
    HmacSha1,
    #[value(name = "hmac-sha256")]
    HmacSha256,
    #[value(name = "hmac-sha512")]
    HmacSha512,
    #[value(name = "rsa-sha256")]
    RsaSha256,
    #[value(name = "rsa-sha512")]
    RsaSha512,
}

impl SigningAlgorithm {
    fn name(self) -> &'static str {
        match self {
            SigningAlgorithm::HmacSha1 => "hmac-sha1",
            SigningAlgorithm::HmacSha256 => "hmac-sha256",
            SigningAlgorithm::HmacSha512 => "hmac-sha512",
            SigningAlgorithm::RsaSha256 => "rsa-sha256",
            SigningAlgorithm::RsaSha512 => "rsa-sha512",
        }
    }

    fn is_rsa(self) -> bool {
        matches!(self, SigningAlgorithm::RsaSha256 | SigningAlgorithm::RsaSha512)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Output {
    /// Value for the `Signature` header
    Signature,
    /// Value for the `Authorization` header
    Authorization,
    /// The canonical string that was signed
    SigningString,
    /// All of the above as JSON
    Json,
}

#[derive(Parser)]
#[command(about = "Compute an HTTP request signature header")]
struct Args {
    #[clap(long, env = "SIGNATURE_KEY_ID")]
    key_id: String,
    #[clap(long, env = "SIGNATURE_ALGORITHM", default_value = "hmac-sha256")]
    algorithm: SigningAlgorithm,
    /// Shared secret for the hmac-* algorithms
    #[clap(long, env = "SIGNATURE_SECRET", hide_env_values = true)]
    secret: Option<String>,
    /// PEM private key for the rsa-* algorithms
    #[clap(long, env = "SIGNATURE_KEY_FILE")]
    key_file: Option<PathBuf>,
    #[clap(long, default_value = "GET")]
    method: String,
    /// Request path, including any query string
    #[clap(long, default_value = "/")]
    path: String,
    /// Header to sign as "Name: value"; repeat to sign several
    #[clap(short = 'H', long = "header", value_parser = parse_header)]
    headers: Vec<(String, String)>,
    #[clap(long, value_enum, default_value = "signature")]
    output: Output,
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let Some((name, value)) = raw.split_once(':') else {
        bail!("expected \"Name: value\", got {raw:?}");
    };
    if name.trim().is_empty() {
        bail!("header name is empty in {raw:?}");
    }
    Ok((name.to_owned(), value.trim().to_owned()))
}

fn key_material(args: &Args) -> Result<Vec<u8>> {
    if args.algorithm.is_rsa() {
        let path = args
            .key_file
            .as_ref()
            .context("--key-file is required for rsa-* algorithms")?;
        std::fs::read(path).with_context(|| format!("reading private key {}", path.display()))
    } else {
        let secret = args
            .secret
            .as_ref()
            .context("--secret is required for hmac-* algorithms")?;
        Ok(secret.clone().into_bytes())
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let algorithm = Algorithm::from_name(args.algorithm.name(), key_material(&args)?)?;
    let headers: Headers = args.headers.iter().cloned().collect();
    tracing::debug!(
        key_id = %args.key_id,
        algorithm = %algorithm,
        headers = %headers.header_list(),
        "signing request"
    );

    let signer = Signer::new(algorithm, args.key_id.as_str());
    let signature = signer
        .sign(&args.path, &args.method, &headers)
        .context("computing request signature")?;

    match args.output {
        Output::Signature => println!("{}", signature.header_value()),
        Output::Authorization => println!("{}", signature.authorization_header_value()),
        Output::SigningString => println!("{}", signature.signing_string()),
        Output::Json => println!("{}", serde_json::to_string_pretty(&signature)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_argument_splits_on_first_colon() {
        let (name, value) = parse_header("Date: Tue, 07 Jun 2014 20:51:35 GMT").unwrap();
        assert_eq!(name, "Date");
        assert_eq!(value, "Tue, 07 Jun 2014 20:51:35 GMT");

        let (name, value) = parse_header("Host:example.com:8080").unwrap();
        assert_eq!(name, "Host");
        assert_eq!(value, "example.com:8080");
    }

    #[test]
    fn header_argument_needs_colon_and_name() {
        assert!(parse_header("Date").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn value_names_match_algorithm_registry() {
        for algorithm in SigningAlgorithm::value_variants() {
            let value = algorithm.to_possible_value().unwrap();
            assert_eq!(value.get_name(), algorithm.name());
            assert!(Algorithm::NAMES.contains(&algorithm.name()));
        }
    }

    #[test]
    fn rsa_without_key_file_is_rejected() {
        let args = Args::parse_from(["http-sign", "--key-id", "k", "--algorithm", "rsa-sha256"]);
        let error = key_material(&args).unwrap_err();
        assert!(error.to_string().contains("--key-file"));
    }

    #[test]
    fn cli_parses_repeated_headers() {
        let args = Args::parse_from([
            "http-sign",
            "--key-id",
            "k",
            "--secret",
            "s",
            "-H",
            "X-A: 1",
            "-H",
            "X-A: 2",
        ]);
        assert_eq!(args.headers.len(), 2);
        assert_eq!(key_material(&args).unwrap(), b"s");
    }
}
