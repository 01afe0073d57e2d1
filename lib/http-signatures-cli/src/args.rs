use clap::{Args, Parser, Subcommand};
use http::Method;
use http_signatures::crypto::Algorithm;
use std::path::PathBuf;

#[derive(Args)]
pub struct ParseHeaderArgs {
    /// The header to parse, with or without the leading `Signature` scheme
    pub header: String,
}

#[derive(Args)]
pub struct RequestArgs {
    /// HTTP method of the request
    #[arg(default_value_t = Method::GET, long, short = 'X')]
    pub method: Method,

    /// Path and query of the request
    pub path: String,

    /// Header of the request, in the form `name: value`
    #[arg(long = "header", short = 'H')]
    pub headers: Vec<String>,
}

#[derive(Args)]
pub struct SignArgs {
    /// PEM file containing the private key (PKCS#8 or PKCS#1)
    #[arg(long)]
    pub private_key: PathBuf,

    /// Key ID announced in the signature
    #[arg(long)]
    pub key_id: String,

    /// Signature algorithm
    #[arg(default_value_t = Algorithm::RsaSha256, long, short)]
    pub algorithm: Algorithm,

    /// Space-separated list of headers to sign, in order
    #[arg(default_value = "(request-target) date", long)]
    pub sign_headers: String,

    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Args)]
pub struct VerifyArgs {
    /// PEM file containing the public key of the signer
    #[arg(long)]
    pub public_key: PathBuf,

    /// Only accept signatures made with this key ID
    #[arg(long)]
    pub key_id: Option<String>,

    /// TOML file with the strategy configuration
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub request: RequestArgs,
}

#[derive(Args)]
pub struct PublicKeyArgs {
    /// PEM file containing the private key (PKCS#8 or PKCS#1)
    #[arg(long)]
    pub private_key: PathBuf,
}

#[derive(Subcommand)]
pub enum ToolSubcommand {
    /// Parse the HTTP Signature header and report any format errors
    ParseHeader(ParseHeaderArgs),

    /// Sign a request and print the resulting headers
    Sign(SignArgs),

    /// Verify a signed request the way a server would
    ///
    /// Set `RUST_LOG=debug` to see why a request got rejected
    Verify(VerifyArgs),

    /// Print the public key belonging to a private key
    PublicKey(PublicKeyArgs),
}

#[derive(Parser)]
#[command(about, version)]
pub struct ToolArgs {
    #[clap(subcommand)]
    pub subcommand: ToolSubcommand,
}
