use http::{header::WWW_AUTHENTICATE, HeaderValue, Response, StatusCode};

/// Authentication challenge
///
/// Always carries the same value for a given strategy, regardless of what was wrong with the request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Challenge {
    value: HeaderValue,
}

impl Challenge {
    pub(crate) fn new(value: HeaderValue) -> Self {
        Self { value }
    }

    /// Value for the `WWW-Authenticate` header
    #[must_use]
    pub fn header_value(&self) -> &HeaderValue {
        &self.value
    }

    /// Challenge as a string, `Signature realm="..",headers=".."`
    #[must_use]
    pub fn as_str(&self) -> &str {
        // Constructed from a string, so this can't fail
        self.value.to_str().unwrap_or_default()
    }

    /// Build a `401 Unauthorized` response carrying the challenge
    #[must_use]
    pub fn into_response<B>(self) -> Response<B>
    where
        B: Default,
    {
        let mut response = Response::new(B::default());
        *response.status_mut() = StatusCode::UNAUTHORIZED;
        response.headers_mut().insert(WWW_AUTHENTICATE, self.value);
        response
    }
}

/// Result of an authentication attempt
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum Outcome<I> {
    /// Signature checked out, contains the identity returned by the lookup
    Success(I),

    /// Request is rejected
    Challenge(Challenge),
}

impl<I> Outcome<I> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(..))
    }

    #[must_use]
    pub fn is_challenge(&self) -> bool {
        matches!(self, Self::Challenge(..))
    }

    /// Identity, if authentication succeeded
    #[must_use]
    pub fn success(self) -> Option<I> {
        match self {
            Self::Success(identity) => Some(identity),
            Self::Challenge(..) => None,
        }
    }

    /// Challenge, if authentication failed
    #[must_use]
    pub fn challenge(&self) -> Option<&Challenge> {
        match self {
            Self::Success(..) => None,
            Self::Challenge(challenge) => Some(challenge),
        }
    }
}
