//! Session tokens and cookie helpers.
//!
//! The browser holds an opaque random token; the database only ever sees
//! its SHA-256 digest.

use std::fmt::Write as _;

use axum::http::{header::COOKIE, HeaderMap};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

pub const SESSION_COOKIE: &str = "depotgen_session";
pub const OAUTH_STATE_COOKIE: &str = "depotgen_oauth_state";

/// Lifetime of the OAuth `state` cookie.
pub const OAUTH_STATE_MAX_AGE_SECS: u64 = 600;

/// Returns 32 random bytes as lowercase hex.
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::random();
    bytes.iter().fold(String::with_capacity(64), |mut out, b| {
        let _ = write!(out, "{b:02x}");
        out
    })
}

/// SHA-256 digest of `token` as lowercase hex. This is the stored key.
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

/// Constant-time comparison of the OAuth `state` echoed by the provider.
pub fn state_matches(expected: &str, received: &str) -> bool {
    expected.as_bytes().ct_eq(received.as_bytes()).into()
}

/// Value of cookie `name` across all `Cookie` headers, if present and non-empty.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for an `HttpOnly`, `SameSite=Lax` cookie.
pub fn build_cookie(name: &str, value: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={value}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_secs}");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires cookie `name` immediately.
pub fn clear_cookie(name: &str, secure: bool) -> String {
    build_cookie(name, "", 0, secure)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn generated_tokens_are_hex_and_unique() {
        let a = generate_token();
        let b = generate_token();
        assert_eq!(a.len(), 64);
        assert!(a.bytes().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn hash_token_is_stable_sha256_hex() {
        assert_eq!(
            hash_token("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn state_matches_requires_exact_value() {
        assert!(state_matches("s3cr3t", "s3cr3t"));
        assert!(!state_matches("s3cr3t", "s3cr3u"));
        assert!(!state_matches("s3cr3t", "s3cr3"));
    }

    #[test]
    fn read_cookie_finds_named_pair() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; depotgen_session=tok123; other=1"),
        );
        assert_eq!(
            read_cookie(&headers, SESSION_COOKIE).as_deref(),
            Some("tok123")
        );
        assert_eq!(read_cookie(&headers, OAUTH_STATE_COOKIE), None);
    }

    #[test]
    fn read_cookie_scans_multiple_headers_and_skips_empty() {
        let mut headers = HeaderMap::new();
        headers.append(COOKIE, HeaderValue::from_static("depotgen_session="));
        headers.append(COOKIE, HeaderValue::from_static("depotgen_oauth_state=xyz"));
        assert_eq!(read_cookie(&headers, SESSION_COOKIE), None);
        assert_eq!(
            read_cookie(&headers, OAUTH_STATE_COOKIE).as_deref(),
            Some("xyz")
        );
    }

    #[test]
    fn build_cookie_sets_secure_only_when_asked() {
        let plain = build_cookie(SESSION_COOKIE, "v", 60, false);
        assert_eq!(
            plain,
            "depotgen_session=v; Path=/; HttpOnly; SameSite=Lax; Max-Age=60"
        );
        assert!(build_cookie(SESSION_COOKIE, "v", 60, true).ends_with("; Secure"));
        assert!(clear_cookie(SESSION_COOKIE, false).contains("Max-Age=0"));
    }
}
