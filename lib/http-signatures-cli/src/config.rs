use http_signature_strategy::Configuration;
use miette::{Context, IntoDiagnostic};
use std::path::Path;
use tokio::fs;

/// Load the strategy configuration, falling back to the defaults if no file is given
pub async fn load(path: Option<&Path>) -> miette::Result<Configuration> {
    let Some(path) = path else {
        return Ok(Configuration::default());
    };

    let content = fs::read_to_string(path)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

    toml::from_str(&content)
        .into_diagnostic()
        .wrap_err("Invalid configuration")
}
