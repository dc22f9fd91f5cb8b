use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use rocket::{
    http::{Cookie, CookieJar, SameSite, Status},
    request::{FromRequest, Outcome},
    response::status::Custom,
};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Cookie carrying the signed session token
pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("no session cookie")]
    Missing,
    #[error("invalid session token: {0}")]
    Decoding(String),
    #[error("session token expired")]
    Expired,
    #[error("session is not logged in")]
    LoggedOut,
    #[error("could not sign session token: {0}")]
    Encoding(String),
    #[error("application config is not loaded")]
    Unconfigured,
    #[error("session lifetime of {0} days is out of range")]
    Lifetime(i64),
}

impl From<AuthenticationError> for Custom<String> {
    fn from(e: AuthenticationError) -> Self {
        Custom(Status::InternalServerError, e.to_string())
    }
}

// Only `exp` is validated by `jsonwebtoken`; `logged_in` is checked by the guard.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    pub logged_in: bool,
    exp: usize,
}

impl SessionClaims {
    pub fn logged_in() -> Self {
        Self { logged_in: true, exp: 0 }
    }

    pub fn from_token(token: &str, secret: &str) -> Result<Self, AuthenticationError> {
        let token = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthenticationError::Expired,
            _ => AuthenticationError::Decoding(e.to_string()),
        })?;

        Ok(token.claims)
    }

    /// Signs these claims, expiring `lifetime` from now.
    pub fn to_token(mut self, secret: &str, lifetime: Duration) -> Result<String, AuthenticationError> {
        let expiration = Utc::now()
            .checked_add_signed(lifetime)
            .ok_or_else(|| AuthenticationError::Encoding("expiration out of range".to_string()))?
            .timestamp();

        self.exp = expiration as usize;

        encode(&Header::default(), &self, &EncodingKey::from_secret(secret.as_ref()))
            .map_err(|e| AuthenticationError::Encoding(e.to_string()))
    }
}

/// Request guard for every page behind the login form. Failing it produces a
/// 401, which the `unauthorized` catcher turns into a redirect to the login page.
#[derive(Debug)]
pub struct LoggedIn;

impl LoggedIn {
    fn from_cookies(cookies: &CookieJar<'_>, config: &AppConfig) -> Result<Self, AuthenticationError> {
        let cookie = cookies.get(SESSION_COOKIE).ok_or(AuthenticationError::Missing)?;
        let claims = SessionClaims::from_token(cookie.value(), &config.session_secret)?;
        if !claims.logged_in {
            return Err(AuthenticationError::LoggedOut);
        }
        Ok(LoggedIn)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for LoggedIn {
    type Error = AuthenticationError;

    async fn from_request(request: &'r rocket::Request<'_>) -> Outcome<Self, Self::Error> {
        let config = match request.rocket().state::<AppConfig>() {
            Some(config) => config,
            None => return Outcome::Error((Status::InternalServerError, AuthenticationError::Unconfigured)),
        };

        match LoggedIn::from_cookies(request.cookies(), config) {
            Ok(session) => Outcome::Success(session),
            Err(e) => Outcome::Error((Status::Unauthorized, e)),
        }
    }
}

#[derive(FromForm)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl LoginRequest {
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Exact match against the configured pair. No hashing, no lockout.
    pub fn matches(&self, config: &AppConfig) -> bool {
        self.username == config.username && self.password == config.password
    }
}

fn session_lifetime(config: &AppConfig) -> Result<Duration, AuthenticationError> {
    Duration::try_days(config.session_days).ok_or(AuthenticationError::Lifetime(config.session_days))
}

/// Stores a freshly signed, long-lived session in the cookie jar.
pub fn start_session(cookies: &CookieJar<'_>, config: &AppConfig) -> Result<(), AuthenticationError> {
    let lifetime = session_lifetime(config)?;
    let token = SessionClaims::logged_in().to_token(&config.session_secret, lifetime)?;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(rocket::time::Duration::seconds(lifetime.num_seconds()));
    cookies.add(cookie);
    Ok(())
}

pub fn end_session(cookies: &CookieJar<'_>) {
    cookies.remove(SESSION_COOKIE);
}
