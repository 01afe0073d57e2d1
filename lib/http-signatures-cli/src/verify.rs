use crate::{
    args::VerifyArgs,
    config,
    util::{self, error_kaomoji, success_kaomoji},
};
use http_signature_strategy::{lookup_fn, BoxError, Credential, Outcome, Strategy};
use miette::IntoDiagnostic;
use std::future;

pub async fn do_it(args: VerifyArgs) -> miette::Result<()> {
    let config = config::load(args.config.as_deref()).await?;
    let public_key = util::read_pem(&args.public_key).await?;
    let expected_key_id = args.key_id;

    let lookup = lookup_fn(move |key_id: String| {
        let credential = expected_key_id
            .as_ref()
            .map_or(true, |expected| *expected == key_id)
            .then(|| Credential {
                identity: key_id,
                public_key: public_key.clone(),
            });

        future::ready(Ok::<_, BoxError>(credential))
    });

    let strategy = Strategy::new(config, lookup).into_diagnostic()?;
    let request = util::build_request(args.request)?;

    match strategy
        .authenticate(&request)
        .await
        .into_diagnostic()?
    {
        Outcome::Success(key_id) => {
            println!("✅ Signature is valid! Signed by {key_id:?} {}", success_kaomoji());
            Ok(())
        }
        Outcome::Challenge(challenge) => {
            miette::bail!(
                "Request rejected, WWW-Authenticate: {} {}",
                challenge.as_str(),
                error_kaomoji()
            );
        }
    }
}
