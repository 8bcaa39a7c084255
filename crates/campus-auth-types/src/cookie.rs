//! Session cookie carrying the identity token for browser clients.
//!
//! The cookie mirrors the token returned in the login body; the API itself only
//! reads the `Authorization` header.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Cookie name for the identity token.
pub const CAMPUS_TOKEN: &str = "campus_token";

/// Set the identity-token cookie, expiring together with the token.
///
/// With `secure` set, browsers only store and send the cookie over https; pass
/// `false` for a plain-http origin such as a local frontend.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use campus_auth_types::cookie::{set_token_cookie, CAMPUS_TOKEN};
///
/// let jar = set_token_cookie(CookieJar::new(), "token_value".to_string(), 86400, true);
/// let cookie = jar.get(CAMPUS_TOKEN).unwrap();
/// assert_eq!(cookie.value(), "token_value");
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(86400)));
/// assert!(cookie.http_only().unwrap_or(false));
/// ```
pub fn set_token_cookie(
    jar: CookieJar,
    value: String,
    max_age_secs: u64,
    secure: bool,
) -> CookieJar {
    let max_age = i64::try_from(max_age_secs).unwrap_or(i64::MAX);
    let cookie = Cookie::build((CAMPUS_TOKEN, value))
        .path("/")
        .max_age(Duration::seconds(max_age))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
