mod parse;
mod serialise;
mod sign;

pub mod signature_string;

pub use self::parse::{parse, Params, ParseError};
pub use self::serialise::serialise;
pub use self::sign::{sign, SignError};

/// Authentication scheme used in the `Authorization` header
pub const SCHEME: &str = "Signature";

/// Validated parameters of a cavage signature header
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureHeader<'a> {
    pub key_id: &'a str,
    pub algorithm: &'a str,
    pub headers: Vec<&'a str>,
    pub signature: &'a str,
}

/// Split an `Authorization` header value into its scheme and the remaining parameter string
///
/// Splits on the first space. Returns `None` if the value contains no space at all.
#[inline]
#[must_use]
pub fn split_authorization(value: &str) -> Option<(&str, &str)> {
    value.split_once(' ')
}

/// Check whether the scheme names the cavage signature scheme (case-insensitive)
#[inline]
#[must_use]
pub fn is_signature_scheme(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case(SCHEME)
}
