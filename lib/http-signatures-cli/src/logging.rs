use miette::{Context, IntoDiagnostic};
use std::{env, io};
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    Layer, Registry,
};

/// Install the global subscriber, filtered through `RUST_LOG`
pub fn initialise() -> miette::Result<()> {
    let env_filter = env::var("RUST_LOG")
        .into_diagnostic()
        .and_then(|targets| {
            targets
                .parse::<Targets>()
                .into_diagnostic()
                .wrap_err("Failed to parse RUST_LOG value")
        })
        .unwrap_or_else(|_| Targets::default().with_default(LevelFilter::INFO));

    let subscriber = Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_writer(io::stderr)
            .with_filter(env_filter),
    );

    tracing::subscriber::set_global_default(subscriber)
        .into_diagnostic()
        .wrap_err("Couldn't install the global tracing subscriber")?;

    Ok(())
}
