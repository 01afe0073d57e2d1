use super::{Algorithm, KeyKind, SigningKey};
use miette::Diagnostic;
use ring::{
    rand::SystemRandom,
    signature::{RsaEncoding, RSA_PKCS1_SHA256, RSA_PKCS1_SHA384, RSA_PKCS1_SHA512},
};
use thiserror::Error;

/// Signing error
#[derive(Debug, Diagnostic, Error)]
pub enum SignError {
    /// Algorithm can't be used with this type of key
    #[error("Algorithm {algorithm} can't be used with a {key} key")]
    KeyMismatch { algorithm: Algorithm, key: KeyKind },

    /// Signing primitive failed
    #[error("Failed to sign message")]
    Signing,

    /// Algorithm is only accepted for verification
    #[error("Algorithm {0} isn't available for signing")]
    #[diagnostic(help("use rsa-sha256 or stronger"))]
    VerificationOnly(Algorithm),
}

fn rsa_encoding(algorithm: Algorithm) -> Result<&'static dyn RsaEncoding, SignError> {
    let encoding: &'static dyn RsaEncoding = match algorithm {
        Algorithm::RsaSha256 => &RSA_PKCS1_SHA256,
        Algorithm::RsaSha384 => &RSA_PKCS1_SHA384,
        Algorithm::RsaSha512 => &RSA_PKCS1_SHA512,
        Algorithm::RsaSha1 => return Err(SignError::VerificationOnly(algorithm)),
        algorithm => {
            return Err(SignError::KeyMismatch {
                algorithm,
                key: KeyKind::Rsa,
            })
        }
    };

    Ok(encoding)
}

/// Sign a message with the provided signing key and encode the returned signature in Base64
#[inline]
pub fn sign(payload: &[u8], algorithm: Algorithm, key: &SigningKey) -> Result<String, SignError> {
    let rng = SystemRandom::new();
    let signature = match (algorithm, key) {
        (Algorithm::EcdsaSha256, SigningKey::EcdsaP256(key))
        | (Algorithm::EcdsaSha384, SigningKey::EcdsaP384(key)) => key
            .sign(&rng, payload)
            .map_err(|_| SignError::Signing)?
            .as_ref()
            .to_vec(),
        (Algorithm::Ed25519, SigningKey::Ed25519(key)) => key.sign(payload).as_ref().to_vec(),
        (algorithm, SigningKey::Rsa(key)) => {
            let mut buf = vec![0; key.public().modulus_len()];
            key.sign(rsa_encoding(algorithm)?, &rng, payload, &mut buf)
                .map_err(|_| SignError::Signing)?;
            buf
        }
        (algorithm, key) => {
            return Err(SignError::KeyMismatch {
                algorithm,
                key: key.kind(),
            })
        }
    };

    Ok(base64_simd::STANDARD.encode_to_string(signature))
}
