use crate::BoxError;
use http::header::InvalidHeaderValue;
use http_signatures::crypto::UnsupportedAlgorithm;
use thiserror::Error;

/// Strategy error
///
/// Rejected requests are not errors, they result in a challenge.
#[derive(Debug, Error)]
pub enum Error {
    /// Realm or header names can't be represented in a header value
    #[error("Invalid challenge")]
    InvalidChallenge(#[source] InvalidHeaderValue),

    /// Credential lookup failed
    #[error(transparent)]
    Lookup(BoxError),

    /// Allow-list names an algorithm that isn't supported
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),
}
