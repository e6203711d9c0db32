//! Credential token extraction from request headers

use http::HeaderMap;
use http::header::{AUTHORIZATION, COOKIE};
use std::borrow::Cow;

/// Prefix of a bearer `Authorization` header
pub const BEARER_PREFIX: &str = "Bearer ";

/// Find the token for a credential class.
///
/// A non-empty cookie named `cookie_name` wins; otherwise the bearer header
/// is consulted. Sources are never merged and an empty token is treated as
/// no token at all.
pub fn extract_token<'a>(headers: &'a HeaderMap, cookie_name: &str) -> Option<Cow<'a, str>> {
    match cookie_value(headers, cookie_name) {
        Some(value) if !value.is_empty() => Some(value),
        _ => bearer_token(headers).map(Cow::Borrowed),
    }
}

/// Value of the first cookie called `name` across all `Cookie` headers.
///
/// Pairs are split on raw bytes, so a non-ASCII sibling cookie cannot hide
/// this one. Only the matched value has to be UTF-8. Surrounding double
/// quotes are stripped and percent-escapes decoded; a value that does not
/// decode is returned as sent.
pub fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<Cow<'a, str>> {
    let raw = headers
        .get_all(COOKIE)
        .iter()
        .flat_map(|value| value.as_bytes().split(|&b| b == b';'))
        .filter_map(|pair| {
            let eq = pair.iter().position(|&b| b == b'=')?;
            Some((&pair[..eq], &pair[eq + 1..]))
        })
        .find(|(key, _)| key.trim_ascii() == name.as_bytes())
        .map(|(_, value)| value.trim_ascii())?;

    let value = unquote(std::str::from_utf8(raw).ok()?);
    Some(percent_decode(value))
}

/// Token carried by an `Authorization: Bearer <token>` header.
///
/// The token ends at the next space. `Bearer ` with nothing after it
/// yields `None`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let rest = header.strip_prefix(BEARER_PREFIX)?;

    rest.split(' ').next().filter(|token| !token.is_empty())
}

fn percent_decode(value: &str) -> Cow<'_, str> {
    if !value.contains('%') {
        return Cow::Borrowed(value);
    }
    urlencoding::decode(value).unwrap_or(Cow::Borrowed(value))
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn headers(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(
                http::HeaderName::from_bytes(name.as_bytes()).unwrap(),
                HeaderValue::from_str(value).unwrap(),
            );
        }
        map
    }

    #[test]
    fn test_cookie_lookup() {
        let map = headers(&[("cookie", "theme=dark; admin-token=ABC; user-token=DEF")]);

        assert_eq!(cookie_value(&map, "admin-token").as_deref(), Some("ABC"));
        assert_eq!(cookie_value(&map, "user-token").as_deref(), Some("DEF"));
        assert_eq!(cookie_value(&map, "other").as_deref(), None);
    }

    #[test]
    fn test_cookie_across_multiple_headers() {
        let map = headers(&[("cookie", "theme=dark"), ("cookie", "user-token=XYZ")]);
        assert_eq!(cookie_value(&map, "user-token").as_deref(), Some("XYZ"));
    }

    #[test]
    fn test_non_ascii_sibling_cookie() {
        let mut map = HeaderMap::new();
        map.insert(
            COOKIE,
            HeaderValue::from_bytes("pref=caf\u{e9}; admin-token=ABC".as_bytes()).unwrap(),
        );

        assert_eq!(extract_token(&map, "admin-token").as_deref(), Some("ABC"));
        assert_eq!(cookie_value(&map, "pref").as_deref(), Some("caf\u{e9}"));
    }

    #[test]
    fn test_cookie_percent_decoding() {
        let map = headers(&[("cookie", "admin-token=A%2EB; user-token=100%zz")]);

        assert_eq!(cookie_value(&map, "admin-token").as_deref(), Some("A.B"));
        // Malformed escapes are kept as sent
        assert_eq!(cookie_value(&map, "user-token").as_deref(), Some("100%zz"));
    }

    #[test]
    fn test_cookie_first_occurrence_and_quotes() {
        let map = headers(&[("cookie", "admin-token=\"ABC\"; admin-token=LATER")]);
        assert_eq!(cookie_value(&map, "admin-token").as_deref(), Some("ABC"));
    }

    #[test]
    fn test_cookie_name_must_match_exactly() {
        let map = headers(&[("cookie", "xadmin-token=ABC")]);
        assert_eq!(cookie_value(&map, "admin-token").as_deref(), None);
    }

    #[test]
    fn test_bearer_token() {
        let map = headers(&[("authorization", "Bearer XYZ")]);
        assert_eq!(bearer_token(&map), Some("XYZ"));

        // Header lookup is case-insensitive
        let map = headers(&[("Authorization", "Bearer XYZ")]);
        assert_eq!(bearer_token(&map), Some("XYZ"));
    }

    #[test]
    fn test_bearer_empty_is_missing() {
        let map = headers(&[("authorization", "Bearer ")]);
        assert_eq!(bearer_token(&map), None);

        let map = headers(&[("authorization", "Bearer")]);
        assert_eq!(bearer_token(&map), None);
    }

    #[test]
    fn test_bearer_requires_exact_prefix() {
        assert_eq!(bearer_token(&headers(&[("authorization", "bearer XYZ")])), None);
        assert_eq!(bearer_token(&headers(&[("authorization", "Basic dXNlcjpwYXNz")])), None);
    }

    #[test]
    fn test_bearer_token_stops_at_space() {
        let map = headers(&[("authorization", "Bearer XYZ trailing")]);
        assert_eq!(bearer_token(&map), Some("XYZ"));
    }

    #[test]
    fn test_cookie_takes_priority_over_header() {
        let map = headers(&[
            ("cookie", "admin-token=FROM_COOKIE"),
            ("authorization", "Bearer FROM_HEADER"),
        ]);
        assert_eq!(extract_token(&map, "admin-token").as_deref(), Some("FROM_COOKIE"));
    }

    #[test]
    fn test_empty_cookie_falls_back_to_header() {
        let map = headers(&[
            ("cookie", "admin-token="),
            ("authorization", "Bearer FROM_HEADER"),
        ]);
        assert_eq!(extract_token(&map, "admin-token").as_deref(), Some("FROM_HEADER"));
    }

    #[test]
    fn test_other_class_cookie_is_ignored() {
        let map = headers(&[("cookie", "user-token=DEF")]);
        assert_eq!(extract_token(&map, "admin-token").as_deref(), None);
    }

    #[test]
    fn test_no_sources() {
        assert_eq!(extract_token(&HeaderMap::new(), "user-token").as_deref(), None);
    }
}
