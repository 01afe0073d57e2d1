use super::SignatureHeader;
use miette::Diagnostic;
use regex::Regex;
use std::{collections::HashMap, sync::LazyLock};
use thiserror::Error;

/// `key="value"` followed by either a comma or the end of the input
///
/// Keys are restricted to ASCII word characters. Values can't contain quotes, there is no escaping.
static PARAM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([A-Za-z0-9_]+)="([^"]*)"(?:,|$)"#).expect("[Bug] Invalid parameter regex")
});

/// Error returned when the parameters don't form a usable signature header
#[derive(Debug, Diagnostic, Error, PartialEq, Eq)]
pub enum ParseError {
    /// `algorithm` parameter missing or empty
    #[error("Missing algorithm")]
    #[diagnostic(help("add an `algorithm=\"rsa-sha256\"` parameter"))]
    MissingAlgorithm,

    /// `headers` parameter missing or empty
    #[error("Missing headers")]
    #[diagnostic(help("list the signed headers, e.g. `headers=\"(request-target) date\"`"))]
    MissingHeaders,

    /// `keyId` parameter missing or empty
    #[error("Missing key ID")]
    MissingKeyId,

    /// `signature` parameter missing or empty
    #[error("Missing signature")]
    MissingSignature,
}

/// Key/value pairs extracted from the parameter part of an `Authorization` header
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Params<'a> {
    inner: HashMap<&'a str, &'a str>,
}

impl<'a> Params<'a> {
    /// Get the raw value of a parameter
    #[inline]
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.inner.get(key).copied()
    }

    /// Number of distinct parameters
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Iterate over all parameters in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.inner.iter().map(|(key, value)| (*key, *value))
    }

    #[inline]
    #[must_use]
    pub fn key_id(&self) -> Option<&'a str> {
        self.get("keyId")
    }

    #[inline]
    #[must_use]
    pub fn algorithm(&self) -> Option<&'a str> {
        self.get("algorithm")
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> Option<&'a str> {
        self.get("headers")
    }

    #[inline]
    #[must_use]
    pub fn signature(&self) -> Option<&'a str> {
        self.get("signature")
    }
}

/// Parse the parameter part of a cavage `Authorization` header
///
/// This never fails. Segments that don't match the `key="value"` shape are skipped,
/// and if a key appears multiple times, the last occurrence wins.
#[inline]
#[must_use]
pub fn parse(input: &str) -> Params<'_> {
    let inner = PARAM_REGEX
        .captures_iter(input)
        .map(|captures| {
            let (_, [key, value]) = captures.extract();
            (key, value)
        })
        .collect();

    Params { inner }
}

fn required(value: Option<&str>, error: ParseError) -> Result<&str, ParseError> {
    value.filter(|value| !value.is_empty()).ok_or(error)
}

impl<'a> TryFrom<&Params<'a>> for SignatureHeader<'a> {
    type Error = ParseError;

    fn try_from(params: &Params<'a>) -> Result<Self, Self::Error> {
        let key_id = required(params.key_id(), ParseError::MissingKeyId)?;
        let algorithm = required(params.algorithm(), ParseError::MissingAlgorithm)?;
        let headers = required(params.headers(), ParseError::MissingHeaders)?;
        let signature = required(params.signature(), ParseError::MissingSignature)?;

        Ok(Self {
            key_id,
            algorithm,
            headers: headers.split(' ').collect(),
            signature,
        })
    }
}

#[cfg(test)]
mod test {
    use super::{parse, ParseError};
    use crate::cavage::SignatureHeader;
    use proptest::{collection::hash_map, prop_assert_eq, proptest};

    const HEADER: &str = r#"keyId="Test",algorithm="rsa-sha256",headers="(request-target) host date",signature="qdx+H7PHHDZgy4y/Ahn9Tny9V3GP6YgBPyUXMmoxWtLbHpUnXS2mg2+SbrQDMCJypxBLSPQR2aAjn7ndmw2iicw3HMbe8VfEdKFYRqzic+efkb3nndiv/x1xSHDJWeSWkx3ButlYSuBskLu6kd9Fswtemr3lgdDEmn04swr2Os0=""#;

    #[test]
    fn parse_header() {
        let params = parse(HEADER);
        let header = SignatureHeader::try_from(&params).unwrap();

        assert_eq!(header.key_id, "Test");
        assert_eq!(header.algorithm, "rsa-sha256");
        assert_eq!(header.signature, "qdx+H7PHHDZgy4y/Ahn9Tny9V3GP6YgBPyUXMmoxWtLbHpUnXS2mg2+SbrQDMCJypxBLSPQR2aAjn7ndmw2iicw3HMbe8VfEdKFYRqzic+efkb3nndiv/x1xSHDJWeSWkx3ButlYSuBskLu6kd9Fswtemr3lgdDEmn04swr2Os0=");
        assert_eq!(header.headers, ["(request-target)", "host", "date"]);
    }

    #[test]
    fn exactly_four_entries() {
        let params =
            parse(r#"keyId="abc",algorithm="rsa-sha256",headers="(request-target) date",signature="xyz""#);

        assert_eq!(params.len(), 4);
        assert_eq!(params.key_id(), Some("abc"));
        assert_eq!(params.algorithm(), Some("rsa-sha256"));
        assert_eq!(params.headers(), Some("(request-target) date"));
        assert_eq!(params.signature(), Some("xyz"));
    }

    #[test]
    fn last_duplicate_wins() {
        let params = parse(r#"keyId="first",keyId="second""#);
        assert_eq!(params.len(), 1);
        assert_eq!(params.key_id(), Some("second"));
    }

    #[test]
    fn unknown_keys_are_kept() {
        let params = parse(r#"keyId="a",created="1402170695""#);
        assert_eq!(params.get("created"), Some("1402170695"));
    }

    #[test]
    fn malformed_segments_are_skipped() {
        // Unterminated quote swallows the following key, the scan picks up again afterwards
        let params = parse(r#"keyId="abc,algorithm="rsa-sha256""#);
        assert_eq!(params.key_id(), None);
        assert_eq!(params.algorithm(), Some("rsa-sha256"));

        // Trailing garbage after a value invalidates that pair only
        let params = parse(r#"keyId="abc"garbage,signature="xyz""#);
        assert_eq!(params.key_id(), None);
        assert_eq!(params.signature(), Some("xyz"));

        // Non-word characters in a key: only the word suffix is picked up
        let params = parse(r#"key-id="abc""#);
        assert_eq!(params.get("key-id"), None);
        assert_eq!(params.get("id"), Some("abc"));

        // Unquoted values are ignored altogether
        let params = parse("keyId=abc,algorithm=rsa-sha256");
        assert!(params.is_empty());
    }

    #[test]
    fn whitespace_after_comma_is_tolerated() {
        let params = parse(r#"keyId="abc", algorithm="rsa-sha256""#);
        assert_eq!(params.key_id(), Some("abc"));
        assert_eq!(params.algorithm(), Some("rsa-sha256"));
    }

    #[test]
    fn keys_are_ascii_word_characters() {
        let params = parse(r#"kéy="value""#);
        assert_eq!(params.get("kéy"), None);
        assert_eq!(params.get("y"), Some("value"));
    }

    #[test]
    fn missing_or_empty_required_parameters() {
        let cases = [
            (r#"algorithm="a",headers="date",signature="s""#, ParseError::MissingKeyId),
            (r#"keyId="",algorithm="a",headers="date",signature="s""#, ParseError::MissingKeyId),
            (r#"keyId="k",headers="date",signature="s""#, ParseError::MissingAlgorithm),
            (r#"keyId="k",algorithm="",headers="date",signature="s""#, ParseError::MissingAlgorithm),
            (r#"keyId="k",algorithm="a",signature="s""#, ParseError::MissingHeaders),
            (r#"keyId="k",algorithm="a",headers="",signature="s""#, ParseError::MissingHeaders),
            (r#"keyId="k",algorithm="a",headers="date""#, ParseError::MissingSignature),
            (r#"keyId="k",algorithm="a",headers="date",signature="""#, ParseError::MissingSignature),
        ];

        for (input, expected) in cases {
            let params = parse(input);
            assert_eq!(SignatureHeader::try_from(&params), Err(expected), "{input}");
        }
    }

    #[test]
    fn headers_split_on_single_spaces() {
        let params = parse(r#"keyId="k",algorithm="a",headers="date  host",signature="s""#);
        let header = SignatureHeader::try_from(&params).unwrap();
        assert_eq!(header.headers, ["date", "", "host"]);
    }

    proptest! {
        #[test]
        fn never_panics(input: String) {
            let _ = parse(&input);
        }

        #[test]
        fn well_formed_lists_parse_completely(
            pairs in hash_map("[A-Za-z0-9_]{1,12}", "[^\"]{0,24}", 0..8)
        ) {
            let input = pairs
                .iter()
                .map(|(key, value)| format!("{key}=\"{value}\""))
                .collect::<Vec<_>>()
                .join(",");

            let params = parse(&input);
            prop_assert_eq!(params.len(), pairs.len());
            for (key, value) in &pairs {
                prop_assert_eq!(params.get(key), Some(value.as_str()));
            }
        }
    }
}
