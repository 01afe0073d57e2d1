//!
//! Implementation of the cavage "Signing HTTP Messages" draft
//!
//! Covers the `Authorization: Signature ...` flavour: parsing the parameter list,
//! reconstructing the signing string and checking the signature against a PEM encoded public key.
//!

use http::{request::Parts, HeaderMap, Method, Uri};

pub mod cavage;
pub mod crypto;

/// Name of the pseudo-header representing the lowercased method and the request path
pub const REQUEST_TARGET: &str = "(request-target)";

/// Minimal view of an HTTP request needed to reconstruct a signing string
pub trait HttpRequest {
    /// HTTP method of the request
    fn method(&self) -> &Method;

    /// Request URI (only the path and query are used)
    fn uri(&self) -> &Uri;

    /// Headers of the request
    fn headers(&self) -> &HeaderMap;
}

impl<B> HttpRequest for http::Request<B> {
    #[inline]
    fn method(&self) -> &Method {
        http::Request::method(self)
    }

    #[inline]
    fn uri(&self) -> &Uri {
        http::Request::uri(self)
    }

    #[inline]
    fn headers(&self) -> &HeaderMap {
        http::Request::headers(self)
    }
}

impl HttpRequest for Parts {
    #[inline]
    fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    fn uri(&self) -> &Uri {
        &self.uri
    }

    #[inline]
    fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}
