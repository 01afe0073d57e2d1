use crate::args::RequestArgs;
use http::{HeaderName, HeaderValue, Request};
use miette::{Context, IntoDiagnostic};
use owo_colors::{OwoColorize, Stream};
use std::{fmt::Display, path::Path};
use tokio::fs;

#[inline]
pub fn error_kaomoji() -> impl Display {
    "(┬┬﹏┬┬)".if_supports_color(Stream::Stdout, |text| text.red())
}

#[inline]
pub fn success_kaomoji() -> impl Display {
    "(^///^)".if_supports_color(Stream::Stdout, |text| text.green())
}

/// Read a PEM file
pub async fn read_pem(path: &Path) -> miette::Result<String> {
    fs::read_to_string(path)
        .await
        .into_diagnostic()
        .wrap_err_with(|| format!("Failed to read {}", path.display()))
}

/// Parse a `name: value` header line
pub fn parse_header(raw: &str) -> miette::Result<(HeaderName, HeaderValue)> {
    let Some((name, value)) = raw.split_once(':') else {
        miette::bail!("Header {raw:?} isn't in the form `name: value`");
    };

    let name = HeaderName::try_from(name.trim()).into_diagnostic()?;
    let value = HeaderValue::try_from(value.trim_start()).into_diagnostic()?;

    Ok((name, value))
}

/// Build the request described on the command line
pub fn build_request(args: RequestArgs) -> miette::Result<Request<()>> {
    let mut builder = Request::builder().method(args.method).uri(args.path);
    for header in &args.headers {
        let (name, value) = parse_header(header)?;
        builder = builder.header(name, value);
    }

    builder.body(()).into_diagnostic()
}
