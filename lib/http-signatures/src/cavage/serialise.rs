use super::SignatureHeader;
use std::fmt::Write;

/// Serialise a signature header into the parameter form expected after the `Signature` scheme
#[inline]
#[must_use]
pub fn serialise(header: &SignatureHeader<'_>) -> String {
    let mut buffer = String::new();

    let _ = write!(buffer, "keyId=\"{}\"", header.key_id);
    let _ = write!(buffer, ",algorithm=\"{}\"", header.algorithm);

    buffer.push_str(",headers=\"");
    for item in itertools::intersperse(header.headers.iter().copied(), " ") {
        buffer.push_str(item);
    }
    buffer.push('"');

    let _ = write!(buffer, ",signature=\"{}\"", header.signature);

    buffer
}
