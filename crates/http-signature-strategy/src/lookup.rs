use crate::BoxError;
use std::future::Future;

/// Identity and public key resolved for a key ID
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credential<I> {
    /// Identity handed back on successful authentication
    pub identity: I,

    /// Public key in its PEM form
    pub public_key: String,
}

/// Resolve the credential belonging to a key ID
///
/// - `Ok(Some(..))`: the key is known, its signature will be checked
/// - `Ok(None)`: the key is unknown, the request gets challenged
/// - `Err(..)`: the lookup itself failed, the error is propagated to the caller
///
/// The strategy doesn't impose a deadline on the returned future.
pub trait CredentialLookup: Send + Sync {
    /// Identity associated with a key
    type Identity: Send;

    /// Error returned by the lookup
    type Error: Into<BoxError>;

    /// Look up the credential for the key ID
    fn lookup(
        &self,
        key_id: &str,
    ) -> impl Future<Output = Result<Option<Credential<Self::Identity>>, Self::Error>> + Send;
}

/// Credential lookup backed by an async function
#[derive(Clone, Copy, Debug)]
pub struct LookupFn<F>(F);

/// Turn an async function into a credential lookup
///
/// The function receives an owned copy of the key ID.
#[must_use]
pub fn lookup_fn<F>(func: F) -> LookupFn<F> {
    LookupFn(func)
}

impl<F, Fut, I, E> CredentialLookup for LookupFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<Credential<I>>, E>> + Send,
    I: Send,
    E: Into<BoxError>,
{
    type Identity = I;
    type Error = E;

    fn lookup(
        &self,
        key_id: &str,
    ) -> impl Future<Output = Result<Option<Credential<Self::Identity>>, Self::Error>> + Send {
        (self.0)(key_id.to_owned())
    }
}
