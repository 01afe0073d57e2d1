use super::{
    parse::{self, KeyKind, PublicKey},
    Algorithm, UnsupportedAlgorithm,
};
use miette::Diagnostic;
use ring::signature::{
    UnparsedPublicKey, VerificationAlgorithm, ECDSA_P256_SHA256_ASN1, ECDSA_P384_SHA384_ASN1,
    ED25519, RSA_PKCS1_1024_8192_SHA1_FOR_LEGACY_USE_ONLY,
    RSA_PKCS1_1024_8192_SHA256_FOR_LEGACY_USE_ONLY, RSA_PKCS1_1024_8192_SHA512_FOR_LEGACY_USE_ONLY,
    RSA_PKCS1_2048_8192_SHA384,
};
use thiserror::Error;

/// Verification error
#[derive(Debug, Diagnostic, Error)]
pub enum VerifyError {
    /// Failed to decode the Base64 payload
    #[error(transparent)]
    Base64(#[from] base64_simd::Error),

    /// Public key couldn't be parsed
    #[error(transparent)]
    InvalidKey(#[from] parse::Error),

    /// Algorithm can't be used with this type of key
    #[error("Algorithm {algorithm} can't be used with a {key} key")]
    KeyMismatch { algorithm: Algorithm, key: KeyKind },

    /// Algorithm isn't supported
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),

    /// Verification failed
    #[error("Verification failed")]
    Verification,
}

/// Select the verification primitive for the algorithm and key type
///
/// RSA keys down to 1024 bits are accepted where the primitive allows it, since that's what
/// the test vectors of the draft use. SHA-384 has no such legacy variant.
fn verification_algorithm(
    algorithm: Algorithm,
    key: KeyKind,
) -> Result<&'static dyn VerificationAlgorithm, VerifyError> {
    let verification_algorithm: &'static dyn VerificationAlgorithm = match (algorithm, key) {
        (Algorithm::RsaSha1, KeyKind::Rsa) => &RSA_PKCS1_1024_8192_SHA1_FOR_LEGACY_USE_ONLY,
        (Algorithm::RsaSha256, KeyKind::Rsa) => &RSA_PKCS1_1024_8192_SHA256_FOR_LEGACY_USE_ONLY,
        (Algorithm::RsaSha384, KeyKind::Rsa) => &RSA_PKCS1_2048_8192_SHA384,
        (Algorithm::RsaSha512, KeyKind::Rsa) => &RSA_PKCS1_1024_8192_SHA512_FOR_LEGACY_USE_ONLY,
        (Algorithm::EcdsaSha256, KeyKind::EcdsaP256) => &ECDSA_P256_SHA256_ASN1,
        (Algorithm::EcdsaSha384, KeyKind::EcdsaP384) => &ECDSA_P384_SHA384_ASN1,
        (Algorithm::Ed25519, KeyKind::Ed25519) => &ED25519,
        (algorithm, key) => return Err(VerifyError::KeyMismatch { algorithm, key }),
    };

    Ok(verification_algorithm)
}

/// Verify that the message corresponds with the signature using the provided public key
#[inline]
pub fn verify_with(
    algorithm: Algorithm,
    msg: &[u8],
    encoded_signature: &str,
    key: &PublicKey,
) -> Result<(), VerifyError> {
    let verification_algorithm = verification_algorithm(algorithm, key.kind())?;
    let signature = base64_simd::STANDARD.decode_to_vec(encoded_signature)?;

    UnparsedPublicKey::new(verification_algorithm, key.as_bytes())
        .verify(msg, &signature)
        .map_err(|_| VerifyError::Verification)
}

/// Verify a signature given the algorithm name from the `algorithm` parameter and a PEM encoded public key
///
/// The algorithm name is matched case-insensitively. Every failure mode is reported as an error,
/// callers only interested in validity can use `.is_ok()`.
#[inline]
pub fn verify(
    algorithm: &str,
    msg: &[u8],
    encoded_signature: &str,
    public_key_pem: &str,
) -> Result<(), VerifyError> {
    let algorithm: Algorithm = algorithm.parse()?;
    let public_key = parse::public_key(public_key_pem)?;

    verify_with(algorithm, msg, encoded_signature, &public_key)
}
