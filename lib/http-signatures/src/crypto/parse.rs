//!
//! Parse cryptographic keys for use in the HTTP signature implementations
//!

use const_oid::{
    db::{
        rfc5912::{ID_EC_PUBLIC_KEY, RSA_ENCRYPTION, SECP_256_R_1, SECP_384_R_1},
        rfc8410::ID_ED_25519,
    },
    ObjectIdentifier,
};
use miette::Diagnostic;
use pkcs8::{
    der::{
        asn1::{AnyRef, BitStringRef},
        EncodePem,
    },
    spki::{AlgorithmIdentifierRef, SubjectPublicKeyInfoRef},
    Document, LineEnding, PrivateKeyInfo, SecretDocument,
};
use ring::{
    rand::SystemRandom,
    signature::{
        EcdsaKeyPair, Ed25519KeyPair, KeyPair, RsaKeyPair, ECDSA_P256_SHA256_ASN1_SIGNING,
        ECDSA_P384_SHA384_ASN1_SIGNING,
    },
};
use std::fmt;
use thiserror::Error;

const PKCS1_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";
const PKCS1_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";

/// Key parsing error
#[derive(Debug, Diagnostic, Error)]
pub enum Error {
    /// Malformed DER structure
    #[error(transparent)]
    Der(#[from] pkcs8::der::Error),

    /// Key rejected
    #[error(transparent)]
    KeyRejected(#[from] ring::error::KeyRejected),

    /// Malformed key
    #[error("Malformed key")]
    MalformedKey,

    /// Malformed algorithm identifier
    #[error(transparent)]
    Spki(#[from] pkcs8::spki::Error),

    /// Unknown key type
    #[error("Unknown key type")]
    #[diagnostic(help("supported key types are RSA, EC P-256, EC P-384 and Ed25519"))]
    UnknownKeyType,
}

/// Type of a key, which decides the algorithms it can be used with
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum KeyKind {
    /// RSA of any supported modulus length
    Rsa,

    /// ECDSA over NIST P-256
    EcdsaP256,

    /// ECDSA over NIST P-384
    EcdsaP384,

    /// Ed25519
    Ed25519,
}

impl KeyKind {
    fn from_oids(algorithm: &AlgorithmIdentifierRef<'_>) -> Result<Self, Error> {
        if algorithm.oid == RSA_ENCRYPTION {
            Ok(Self::Rsa)
        } else if algorithm.oid == ID_ED_25519 {
            Ok(Self::Ed25519)
        } else if algorithm.oid == ID_EC_PUBLIC_KEY {
            let curve = algorithm.parameters_oid()?;
            if curve == SECP_256_R_1 {
                Ok(Self::EcdsaP256)
            } else if curve == SECP_384_R_1 {
                Ok(Self::EcdsaP384)
            } else {
                Err(Error::UnknownKeyType)
            }
        } else {
            Err(Error::UnknownKeyType)
        }
    }

    fn algorithm_identifier(self) -> AlgorithmIdentifierRef<'static> {
        let (oid, parameters): (ObjectIdentifier, Option<AnyRef<'static>>) = match self {
            Self::Rsa => (RSA_ENCRYPTION, Some(AnyRef::NULL)),
            Self::EcdsaP256 => (ID_EC_PUBLIC_KEY, Some(AnyRef::from(&SECP_256_R_1))),
            Self::EcdsaP384 => (ID_EC_PUBLIC_KEY, Some(AnyRef::from(&SECP_384_R_1))),
            Self::Ed25519 => (ID_ED_25519, None),
        };

        AlgorithmIdentifierRef { oid, parameters }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rsa => "RSA",
            Self::EcdsaP256 => "EC P-256",
            Self::EcdsaP384 => "EC P-384",
            Self::Ed25519 => "Ed25519",
        };

        f.write_str(name)
    }
}

/// Public key in the raw form the verification primitives expect
///
/// For RSA that's the PKCS#1 `RSAPublicKey` structure, for EC keys the uncompressed point
/// and for Ed25519 the 32 raw bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    kind: KeyKind,
    bytes: Vec<u8>,
}

impl PublicKey {
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        self.kind
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Parse a public key from its PEM form
///
/// Accepts SPKI (`PUBLIC KEY`) documents and PKCS#1 (`RSA PUBLIC KEY`) documents.
///
/// Currently supported algorithms:
///
/// - RSA
/// - ECDSA (P-256 and P-384)
/// - Ed25519
#[inline]
pub fn public_key(pem: &str) -> Result<PublicKey, Error> {
    let (label, document) = Document::from_pem(pem.trim())?;
    if label == PKCS1_PUBLIC_KEY_LABEL {
        return Ok(PublicKey {
            kind: KeyKind::Rsa,
            bytes: document.as_bytes().to_vec(),
        });
    }

    let spki: SubjectPublicKeyInfoRef<'_> = document.decode_msg()?;
    let kind = KeyKind::from_oids(&spki.algorithm)?;
    let bytes = spki
        .subject_public_key
        .as_bytes()
        .ok_or(Error::MalformedKey)?
        .to_vec();

    Ok(PublicKey { kind, bytes })
}

/// Enum dispatch over various signing keys
#[non_exhaustive]
pub enum SigningKey {
    /// ECDSA over P-256
    EcdsaP256(EcdsaKeyPair),

    /// ECDSA over P-384
    EcdsaP384(EcdsaKeyPair),

    /// Ed25519
    Ed25519(Ed25519KeyPair),

    /// RSA
    Rsa(RsaKeyPair),
}

impl SigningKey {
    /// Type of the key
    #[must_use]
    pub fn kind(&self) -> KeyKind {
        match self {
            Self::EcdsaP256(..) => KeyKind::EcdsaP256,
            Self::EcdsaP384(..) => KeyKind::EcdsaP384,
            Self::Ed25519(..) => KeyKind::Ed25519,
            Self::Rsa(..) => KeyKind::Rsa,
        }
    }

    /// Public half of the key
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        let bytes = match self {
            Self::EcdsaP256(key) | Self::EcdsaP384(key) => key.public_key().as_ref().to_vec(),
            Self::Ed25519(key) => key.public_key().as_ref().to_vec(),
            Self::Rsa(key) => key.public_key().as_ref().to_vec(),
        };

        PublicKey {
            kind: self.kind(),
            bytes,
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&self.kind()).finish()
    }
}

/// Parse a private key from its PEM form.
/// This function uses constant-time PEM decoding and zeroizes any temporary allocations.
///
/// Accepts PKCS#8 (`PRIVATE KEY`) documents and PKCS#1 (`RSA PRIVATE KEY`) documents.
///
/// Currently supported algorithms:
///
/// - RSA
/// - ECDSA (P-256 and P-384)
/// - Ed25519
#[inline]
pub fn private_key(pem: &str) -> Result<SigningKey, Error> {
    let (label, document) = SecretDocument::from_pem(pem.trim())?;
    if label == PKCS1_PRIVATE_KEY_LABEL {
        return Ok(SigningKey::Rsa(RsaKeyPair::from_der(document.as_bytes())?));
    }

    let private_key_info: PrivateKeyInfo<'_> = document.decode_msg()?;
    let signing_key = match KeyKind::from_oids(&private_key_info.algorithm)? {
        KeyKind::Rsa => SigningKey::Rsa(RsaKeyPair::from_pkcs8(document.as_bytes())?),
        KeyKind::Ed25519 => SigningKey::Ed25519(Ed25519KeyPair::from_pkcs8_maybe_unchecked(
            document.as_bytes(),
        )?),
        KeyKind::EcdsaP256 => SigningKey::EcdsaP256(EcdsaKeyPair::from_pkcs8(
            &ECDSA_P256_SHA256_ASN1_SIGNING,
            document.as_bytes(),
            &SystemRandom::new(),
        )?),
        KeyKind::EcdsaP384 => SigningKey::EcdsaP384(EcdsaKeyPair::from_pkcs8(
            &ECDSA_P384_SHA384_ASN1_SIGNING,
            document.as_bytes(),
            &SystemRandom::new(),
        )?),
    };

    Ok(signing_key)
}

/// Encode the public half of a signing key as an SPKI (`PUBLIC KEY`) PEM document
#[inline]
pub fn public_key_pem(key: &SigningKey) -> Result<String, Error> {
    let public_key = key.public_key();
    let spki = SubjectPublicKeyInfoRef {
        algorithm: public_key.kind().algorithm_identifier(),
        subject_public_key: BitStringRef::from_bytes(public_key.as_bytes())?,
    };

    Ok(spki.to_pem(LineEnding::LF)?)
}
