use miette::Diagnostic;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Algorithm name that isn't supported
#[derive(Debug, Diagnostic, Error, PartialEq, Eq)]
#[error("Unsupported algorithm: {0}")]
#[diagnostic(help("supported algorithms are rsa-sha1, rsa-sha256, rsa-sha384, rsa-sha512, ecdsa-sha256, ecdsa-sha384 and ed25519"))]
pub struct UnsupportedAlgorithm(pub String);

/// Signature algorithms accepted in the `algorithm` parameter
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Algorithm {
    /// RSASSA-PKCS1-v1_5 with SHA-1 (verification only)
    RsaSha1,
    /// RSASSA-PKCS1-v1_5 with SHA-256
    RsaSha256,
    /// RSASSA-PKCS1-v1_5 with SHA-384
    RsaSha384,
    /// RSASSA-PKCS1-v1_5 with SHA-512
    RsaSha512,
    /// ECDSA over P-256 with SHA-256, ASN.1 DER encoded signatures
    EcdsaSha256,
    /// ECDSA over P-384 with SHA-384, ASN.1 DER encoded signatures
    EcdsaSha384,
    /// Ed25519
    Ed25519,
}

impl Algorithm {
    /// All supported algorithms
    pub const ALL: [Self; 7] = [
        Self::RsaSha1,
        Self::RsaSha256,
        Self::RsaSha384,
        Self::RsaSha512,
        Self::EcdsaSha256,
        Self::EcdsaSha384,
        Self::Ed25519,
    ];

    /// Canonical lowercase name, as it appears in the `algorithm` parameter
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RsaSha1 => "rsa-sha1",
            Self::RsaSha256 => "rsa-sha256",
            Self::RsaSha384 => "rsa-sha384",
            Self::RsaSha512 => "rsa-sha512",
            Self::EcdsaSha256 => "ecdsa-sha256",
            Self::EcdsaSha384 => "ecdsa-sha384",
            Self::Ed25519 => "ed25519",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = UnsupportedAlgorithm;

    /// Names are matched case-insensitively
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnsupportedAlgorithm(s.to_string()))
    }
}
