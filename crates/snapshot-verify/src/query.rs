//! Strict parsing of recorded query strings.

use thiserror::Error;
use url::form_urlencoded;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("invalid percent escape in {0:?}")]
    InvalidEscape(String),

    #[error("invalid semicolon separator in query")]
    Semicolon,
}

/// Parse a raw `application/x-www-form-urlencoded` query into ordered pairs.
///
/// Unlike [`form_urlencoded::parse`], malformed escapes and `;` separators
/// are rejected instead of passed through, so a damaged snapshot is caught
/// before it reaches the live system.
pub fn parse_query(raw: &str) -> Result<Vec<(String, String)>, QueryError> {
    if raw.contains(';') {
        return Err(QueryError::Semicolon);
    }
    for segment in raw.split('&').filter(|s| !s.is_empty()) {
        validate_escapes(segment)?;
    }
    Ok(form_urlencoded::parse(raw.as_bytes())
        .into_owned()
        .collect())
}

fn validate_escapes(segment: &str) -> Result<(), QueryError> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(QueryError::InvalidEscape(segment.to_string()));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(k: &str, v: &str) -> (String, String) {
        (k.to_string(), v.to_string())
    }

    #[test]
    fn test_parse_query() {
        let pairs = parse_query("priceRangeId=2&kind=%E3%82%A2&features=a+b&page=0").unwrap();
        assert_eq!(
            pairs,
            vec![
                pair("priceRangeId", "2"),
                pair("kind", "ア"),
                pair("features", "a b"),
                pair("page", "0"),
            ]
        );
    }

    #[test]
    fn test_parse_empty_and_bare_keys() {
        assert!(parse_query("").unwrap().is_empty());
        assert_eq!(
            parse_query("a&&b=").unwrap(),
            vec![pair("a", ""), pair("b", "")]
        );
    }

    #[test]
    fn test_reject_bad_escape() {
        assert_eq!(
            parse_query("a=1&b=%zz"),
            Err(QueryError::InvalidEscape("b=%zz".to_string()))
        );
        assert!(parse_query("b=50%").is_err());
    }

    #[test]
    fn test_reject_semicolon() {
        assert_eq!(parse_query("a=1;b=2"), Err(QueryError::Semicolon));
    }
}
