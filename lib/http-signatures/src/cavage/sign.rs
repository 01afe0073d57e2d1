//!
//! Client side of the scheme: sign a request and attach the `Authorization` header
//!

use super::{serialise, signature_string, SignatureHeader, SCHEME};
use crate::crypto::{self, Algorithm, SigningKey};
use http::{
    header::{AUTHORIZATION, DATE},
    HeaderValue,
};
use miette::Diagnostic;
use std::time::SystemTime;
use thiserror::Error;
use tracing::{debug, instrument};

/// Request signing error
#[derive(Debug, Diagnostic, Error)]
pub enum SignError {
    /// Signing primitive failure
    #[error(transparent)]
    #[diagnostic(transparent)]
    Crypto(#[from] crypto::SignError),

    /// Serialised header isn't a valid HTTP header value
    #[error(transparent)]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

/// Sign an HTTP request over the given headers, in the given order
///
/// Inserts a `Date` header if the request doesn't carry one yet, then sets the `Authorization` header.
#[inline]
#[instrument(skip_all, fields(%key_id, %algorithm))]
pub fn sign<B>(
    req: &mut http::Request<B>,
    key_id: &str,
    algorithm: Algorithm,
    headers: &[&str],
    key: &SigningKey,
) -> Result<(), SignError> {
    if !req.headers().contains_key(DATE) {
        let date_header_value = HeaderValue::from_str(&httpdate::fmt_http_date(SystemTime::now()))?;
        req.headers_mut().insert(DATE, date_header_value);
    }

    let signature_string = signature_string::construct(&*req, headers.iter().copied());
    debug!(?signature_string, "signing");

    let signature = crypto::sign(signature_string.as_bytes(), algorithm, key)?;
    let signature_header = SignatureHeader {
        key_id,
        algorithm: algorithm.as_str(),
        headers: headers.to_vec(),
        signature: &signature,
    };

    let authorization = format!("{SCHEME} {}", serialise(&signature_header));
    req.headers_mut()
        .insert(AUTHORIZATION, HeaderValue::from_str(&authorization)?);

    Ok(())
}
