//! Minimal `Cookie` / `Set-Cookie` helpers for the session cookie.

use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

/// Extracts the value of cookie `name` from the request headers.
///
/// Handles several `Cookie` headers and several cookies per header;
/// unrelated cookies are ignored.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|cookie_header| cookie_header.to_str().ok())
        .find_map(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(key), Some(value)) if key == name && !value.is_empty() => {
                        Some(value.to_string())
                    }
                    _ => None,
                }
            })
        })
}

/// Attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookie {
    pub name: String,
    pub max_age_seconds: u64,
    pub secure: bool,
}

impl SessionCookie {
    /// `Set-Cookie` value that stores `token`.
    pub fn issue(&self, token: &str) -> HeaderValue {
        self.build(token, self.max_age_seconds)
    }

    /// `Set-Cookie` value that makes the browser drop the cookie.
    pub fn clear(&self) -> HeaderValue {
        self.build("", 0)
    }

    fn build(&self, value: &str, max_age: u64) -> HeaderValue {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.name, value, max_age
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        // Name comes from validated config and the token is alphanumeric.
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }
}
