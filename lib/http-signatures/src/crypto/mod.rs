//!
//! Common cryptographic operations
//!

mod algorithm;
mod sign;
mod verify;

pub mod parse;

pub use self::algorithm::{Algorithm, UnsupportedAlgorithm};
pub use self::parse::{KeyKind, PublicKey, SigningKey};
pub use self::sign::{sign, SignError};
pub use self::verify::{verify, verify_with, VerifyError};
