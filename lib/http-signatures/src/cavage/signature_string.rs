//!
//! Utilities for handling signature strings
//!

use crate::{HttpRequest, REQUEST_TARGET};
use std::fmt::Write;

/// Construct the signing string for the given header names in the given order
///
/// - `(request-target)` expands to the lowercased method followed by the path and query
/// - every other name expands to the value of that header, or to an empty value if the request doesn't carry it
///
/// Header names are matched in their lowercase form only. A name with uppercase characters
/// resolves to an empty value, just like a lookup in a lowercase-keyed header map would.
///
/// This function is total. Whether the signer covered a header that actually exists is not its concern.
#[inline]
pub fn construct<'a, R, I>(request: &R, headers: I) -> String
where
    R: HttpRequest + ?Sized,
    I: IntoIterator<Item = &'a str>,
{
    let mut signature_string = String::new();
    for name in headers {
        if name == REQUEST_TARGET {
            let method = request.method().as_str().to_lowercase();
            let uri = request.uri();
            let path_and_query = uri
                .path_and_query()
                .map_or_else(|| uri.path(), |path_and_query| path_and_query.as_str());

            let _ = writeln!(signature_string, "{name}: {method} {path_and_query}");
        } else {
            let value = header_value(request, name);
            let _ = writeln!(signature_string, "{name}: {value}");
        }
    }

    // Remove the last new-line
    signature_string.pop();

    signature_string
}

fn header_value<R>(request: &R, name: &str) -> String
where
    R: HttpRequest + ?Sized,
{
    if name.bytes().any(|byte| byte.is_ascii_uppercase()) {
        return String::new();
    }

    let mut value = String::new();
    for (idx, item) in request.headers().get_all(name).iter().enumerate() {
        if idx > 0 {
            value.push_str(", ");
        }
        value.push_str(&String::from_utf8_lossy(item.as_bytes()));
    }

    value
}
