//! Token transport over HttpOnly cookies.
//!
//! Login and refresh set both `access_token` and `refresh_token` cookies;
//! logout clears them with the same domain and path so browsers drop them.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::HttpResponseBuilder;

use dl_core::domain::entities::TokenPair;
use dl_shared::config::CookieConfig;

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Resolved cookie attributes
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub domain: Option<String>,
    pub secure: bool,
    pub same_site: SameSite,
    /// `Max-Age` of the access token cookie, in seconds
    pub access_max_age: i64,
    /// `Max-Age` of the refresh token cookie, in seconds
    pub refresh_max_age: i64,
}

impl CookieSettings {
    pub fn new(config: &CookieConfig, access_max_age: i64, refresh_max_age: i64) -> Self {
        Self {
            domain: config.domain.clone(),
            secure: config.secure,
            same_site: parse_same_site(&config.same_site),
            access_max_age,
            refresh_max_age,
        }
    }

    fn build(&self, name: &'static str, value: String, max_age: i64) -> Cookie<'static> {
        let mut builder = Cookie::build(name, value)
            .path("/")
            .http_only(true)
            .secure(self.secure)
            .same_site(self.same_site)
            .max_age(Duration::seconds(max_age));
        if let Some(domain) = &self.domain {
            builder = builder.domain(domain.clone());
        }
        builder.finish()
    }
}

/// Maps the configured SameSite value; anything unrecognized is `Lax`
pub fn parse_same_site(value: &str) -> SameSite {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => SameSite::Strict,
        "none" => SameSite::None,
        _ => SameSite::Lax,
    }
}

/// Adds both token cookies to the response
pub fn set_auth_cookies(response: &mut HttpResponseBuilder, tokens: &TokenPair, settings: &CookieSettings) {
    response.cookie(settings.build(
        ACCESS_TOKEN_COOKIE,
        tokens.access_token.clone(),
        settings.access_max_age,
    ));
    response.cookie(settings.build(
        REFRESH_TOKEN_COOKIE,
        tokens.refresh_token.clone(),
        settings.refresh_max_age,
    ));
}

/// Adds removal cookies for both tokens
pub fn clear_auth_cookies(response: &mut HttpResponseBuilder, settings: &CookieSettings) {
    for name in [ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE] {
        let mut cookie = settings.build(name, String::new(), 0);
        cookie.make_removal();
        response.cookie(cookie);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::HttpResponse;

    fn settings(domain: Option<&str>) -> CookieSettings {
        CookieSettings::new(
            &CookieConfig {
                domain: domain.map(str::to_string),
                secure: true,
                same_site: "strict".to_string(),
            },
            1800,
            604_800,
        )
    }

    #[test]
    fn test_parse_same_site() {
        assert_eq!(parse_same_site("lax"), SameSite::Lax);
        assert_eq!(parse_same_site("Strict"), SameSite::Strict);
        assert_eq!(parse_same_site("none"), SameSite::None);
        assert_eq!(parse_same_site("bogus"), SameSite::Lax);
    }

    #[test]
    fn test_set_auth_cookies_attributes() {
        let tokens = TokenPair::new("access".to_string(), "refresh".to_string());
        let mut builder = HttpResponse::Ok();
        set_auth_cookies(&mut builder, &tokens, &settings(Some("example.com")));
        let response = builder.finish();

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);

        let access = cookies.iter().find(|c| c.name() == ACCESS_TOKEN_COOKIE).unwrap();
        assert_eq!(access.value(), "access");
        assert_eq!(access.path(), Some("/"));
        assert_eq!(access.http_only(), Some(true));
        assert_eq!(access.secure(), Some(true));
        assert_eq!(access.same_site(), Some(SameSite::Strict));
        assert_eq!(access.domain(), Some("example.com"));
        assert_eq!(access.max_age(), Some(Duration::seconds(1800)));

        let refresh = cookies.iter().find(|c| c.name() == REFRESH_TOKEN_COOKIE).unwrap();
        assert_eq!(refresh.value(), "refresh");
        assert_eq!(refresh.max_age(), Some(Duration::seconds(604_800)));
    }

    #[test]
    fn test_clear_auth_cookies() {
        let mut builder = HttpResponse::Ok();
        clear_auth_cookies(&mut builder, &settings(None));
        let response = builder.finish();

        let cookies: Vec<_> = response.cookies().collect();
        assert_eq!(cookies.len(), 2);
        for cookie in cookies {
            assert_eq!(cookie.value(), "");
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.max_age(), Some(Duration::ZERO));
            assert!(cookie.domain().is_none());
        }
    }
}
