//!
//! Authentication strategy for requests signed with cavage HTTP signatures
//!
//! Reads the `Authorization: Signature ...` header, rebuilds the signing string, resolves the
//! public key through a [`CredentialLookup`] and checks the signature.
//!
//! Every rejection results in the same [`Challenge`]. Only failures of the lookup itself surface as errors.
//!

use http::{header::AUTHORIZATION, HeaderValue};
use http_signatures::{
    cavage::{self, signature_string, SignatureHeader},
    crypto::{self, Algorithm},
    HttpRequest, REQUEST_TARGET,
};
use smol_str::SmolStr;
use std::error::Error as StdError;
use tracing::{debug, instrument};

pub use self::config::Configuration;
pub use self::error::Error;
pub use self::lookup::{lookup_fn, Credential, CredentialLookup, LookupFn};
pub use self::outcome::{Challenge, Outcome};

mod config;
mod error;
mod lookup;
mod outcome;

pub type BoxError = Box<dyn StdError + Send + Sync>;
type Result<T, E = Error> = std::result::Result<T, E>;

const DATE: &str = "date";

/// HTTP signature authentication strategy
///
/// Immutable after construction, can be shared between concurrent requests.
#[derive(Clone, Debug)]
pub struct Strategy<L> {
    allowed_algorithms: Option<Vec<Algorithm>>,
    challenge: Challenge,
    lookup: L,
    mandatory_headers: Vec<SmolStr>,
    realm: SmolStr,
}

impl<L> Strategy<L>
where
    L: CredentialLookup,
{
    /// Name of the strategy
    pub const NAME: &'static str = "http-signature";

    /// Build the strategy, computing the mandatory headers and the challenge
    pub fn new(config: Configuration, lookup: L) -> Result<Self> {
        let fixed_headers = [
            SmolStr::new_inline(REQUEST_TARGET),
            SmolStr::new_inline(DATE),
        ];
        let mandatory_headers: Vec<SmolStr> = fixed_headers
            .into_iter()
            .chain(
                config
                    .headers
                    .iter()
                    .map(|header| header.to_lowercase().into()),
            )
            .collect();

        let challenge = format!(
            "{} realm=\"{}\",headers=\"{}\"",
            cavage::SCHEME,
            config.realm,
            mandatory_headers.join(" ")
        );
        let challenge = HeaderValue::from_str(&challenge).map_err(Error::InvalidChallenge)?;

        let allowed_algorithms = config
            .allowed_algorithms
            .map(|algorithms| {
                algorithms
                    .iter()
                    .map(|algorithm| algorithm.parse())
                    .collect::<Result<Vec<Algorithm>, _>>()
            })
            .transpose()?;

        Ok(Self {
            allowed_algorithms,
            challenge: Challenge::new(challenge),
            lookup,
            mandatory_headers,
            realm: config.realm,
        })
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Headers every request has to sign, starting with `(request-target)` and `date`
    #[must_use]
    pub fn mandatory_headers(&self) -> &[SmolStr] {
        &self.mandatory_headers
    }

    #[must_use]
    pub fn realm(&self) -> &str {
        &self.realm
    }

    #[must_use]
    pub fn challenge(&self) -> &Challenge {
        &self.challenge
    }

    fn reject<I>(&self) -> Result<Outcome<I>> {
        Ok(Outcome::Challenge(self.challenge.clone()))
    }

    /// Authenticate a request
    ///
    /// Resolves to [`Outcome::Success`] with the identity from the lookup if the signature is valid,
    /// to [`Outcome::Challenge`] for every kind of rejection, and to an error only if the lookup failed.
    #[instrument(skip_all)]
    pub async fn authenticate<R>(&self, request: &R) -> Result<Outcome<L::Identity>>
    where
        R: HttpRequest + ?Sized,
    {
        let Some(header) = request.headers().get(AUTHORIZATION) else {
            debug!("missing authorization header");
            return self.reject();
        };

        let Ok(header) = header.to_str() else {
            debug!("authorization header isn't valid ASCII");
            return self.reject();
        };

        if header.is_empty() {
            debug!("empty authorization header");
            return self.reject();
        }

        let Some((scheme, params)) = cavage::split_authorization(header) else {
            debug!("authorization header without parameters");
            return self.reject();
        };

        if !cavage::is_signature_scheme(scheme) {
            debug!(%scheme, "unsupported authorization scheme");
            return self.reject();
        }

        let params = cavage::parse(params);
        let signature_header = match SignatureHeader::try_from(&params) {
            Ok(signature_header) => signature_header,
            Err(error) => {
                debug!(?error, "invalid signature parameters");
                return self.reject();
            }
        };

        if let Some(missing) = self
            .mandatory_headers
            .iter()
            .find(|mandatory| !signature_header.headers.contains(&mandatory.as_str()))
        {
            debug!(%missing, "mandatory header isn't signed");
            return self.reject();
        }

        if let Some(ref allowed_algorithms) = self.allowed_algorithms {
            let allowed = signature_header
                .algorithm
                .parse::<Algorithm>()
                .is_ok_and(|algorithm| allowed_algorithms.contains(&algorithm));

            if !allowed {
                debug!(algorithm = signature_header.algorithm, "algorithm isn't allowed");
                return self.reject();
            }
        }

        let signature_string =
            signature_string::construct(request, signature_header.headers.iter().copied());

        let credential = self
            .lookup
            .lookup(signature_header.key_id)
            .await
            .map_err(|error| Error::Lookup(error.into()))?;

        let Some(credential) = credential else {
            debug!(key_id = signature_header.key_id, "unknown key");
            return self.reject();
        };

        match crypto::verify(
            signature_header.algorithm,
            signature_string.as_bytes(),
            signature_header.signature,
            &credential.public_key,
        ) {
            Ok(()) => Ok(Outcome::Success(credential.identity)),
            Err(error) => {
                debug!(?error, key_id = signature_header.key_id, "signature verification failed");
                self.reject()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{lookup_fn, BoxError, Configuration, Credential, Strategy};
    use proptest::{collection::vec, prop_assert_eq, proptest};
    use smol_str::SmolStr;
    use std::future;

    fn strategy(
        config: Configuration,
    ) -> Strategy<impl crate::CredentialLookup<Identity = (), Error = BoxError>> {
        Strategy::new(
            config,
            lookup_fn(|_key_id: String| future::ready(Ok::<Option<Credential<()>>, BoxError>(None))),
        )
        .unwrap()
    }

    #[test]
    fn default_challenge() {
        let strategy = strategy(Configuration::default());
        assert_eq!(
            strategy.challenge().as_str(),
            r#"Signature realm="Users",headers="(request-target) date""#
        );
        assert_eq!(strategy.realm(), "Users");
    }

    #[test]
    fn configured_headers_are_lowercased() {
        let strategy = strategy(
            Configuration::builder()
                .realm("Admins")
                .headers(vec![SmolStr::new("Content-Length"), SmolStr::new("Digest")])
                .build(),
        );

        assert_eq!(
            strategy.mandatory_headers(),
            ["(request-target)", "date", "content-length", "digest"]
        );
        assert_eq!(
            strategy.challenge().as_str(),
            r#"Signature realm="Admins",headers="(request-target) date content-length digest""#
        );
    }

    #[test]
    fn invalid_realm() {
        let result = Strategy::new(
            Configuration::builder().realm("line\nbreak").build(),
            lookup_fn(|_key_id: String| future::ready(Ok::<Option<Credential<()>>, BoxError>(None))),
        );
        assert!(matches!(result, Err(crate::Error::InvalidChallenge(..))));
    }

    #[test]
    fn unknown_allowed_algorithm() {
        let result = Strategy::new(
            Configuration::builder()
                .allowed_algorithms(vec![SmolStr::new("rsa-sha255")])
                .build(),
            lookup_fn(|_key_id: String| future::ready(Ok::<Option<Credential<()>>, BoxError>(None))),
        );
        assert!(matches!(result, Err(crate::Error::UnsupportedAlgorithm(..))));
    }

    proptest! {
        #[test]
        fn challenge_starts_with_fixed_headers(headers in vec("[A-Za-z0-9-]{1,16}", 0..6)) {
            let strategy = strategy(
                Configuration::builder()
                    .headers(headers.iter().map(SmolStr::new).collect())
                    .build(),
            );

            prop_assert_eq!(&strategy.mandatory_headers()[..2], ["(request-target)", "date"]);
            prop_assert_eq!(strategy.mandatory_headers().len(), headers.len() + 2);
            assert!(strategy
                .challenge()
                .as_str()
                .starts_with(r#"Signature realm="Users",headers="(request-target) date"#));
        }
    }
}
