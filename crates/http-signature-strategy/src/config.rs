use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use typed_builder::TypedBuilder;

/// Strategy configuration
///
/// Every key is optional when deserialising.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq, TypedBuilder)]
#[serde(default, rename_all = "kebab-case")]
pub struct Configuration {
    /// Realm announced in the challenge
    #[builder(default = SmolStr::new_inline("Users"), setter(into))]
    pub realm: SmolStr,

    /// Headers every request has to sign in addition to `(request-target)` and `date`
    #[builder(default)]
    pub headers: Vec<SmolStr>,

    /// Restrict the accepted algorithms
    ///
    /// Unset means every algorithm the cryptographic backend supports is accepted.
    #[builder(default, setter(strip_option))]
    pub allowed_algorithms: Option<Vec<SmolStr>>,
}

impl Default for Configuration {
    fn default() -> Self {
        Self::builder().build()
    }
}
