use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Validation, decode, encode, errors::ErrorKind};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use vigil_core::{AccountId, RevokedSessionStore};

#[derive(Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub secret: Secret<String>,
    /// Window a "remember me" session slides forward on each validated use.
    pub remember_ttl_seconds: i64,
    /// Hard ceiling counted from first issuance; renewal never slides past it.
    pub absolute_cap_seconds: i64,
    /// Token backstop for non-remember sessions; the cookie itself dies with
    /// the browser session.
    pub session_ttl_seconds: i64,
}

impl SessionConfig {
    fn secret_bytes(&self) -> &[u8] {
        self.secret.expose_secret().as_bytes()
    }
}

/// Claims carried by the session token.
///
/// `sub` is the account id — the only thing the token is authoritative for.
/// Account status is deliberately absent: it is re-read from the store on
/// every guarded request. `auth_time` is the first issuance and stays fixed
/// across renewals so the absolute cap has an anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub auth_time: i64,
    pub remember: bool,
}

impl SessionClaims {
    pub fn account_id(&self) -> Result<AccountId, SessionError> {
        self.sub.parse().map_err(|_| SessionError::InvalidToken)
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("missing session token")]
    MissingToken,
    #[error("invalid session token")]
    InvalidToken,
    #[error("session expired")]
    Expired,
    #[error("session revoked")]
    Revoked,
    #[error("unexpected session error: {0}")]
    Unexpected(String),
}

/// Issues, validates, renews and revokes signed session tokens.
#[derive(Clone)]
pub struct SessionManager<R> {
    revocations: R,
    config: SessionConfig,
}

impl<R> SessionManager<R> {
    pub fn new(revocations: R, config: SessionConfig) -> Self {
        Self {
            revocations,
            config,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.config.cookie_name
    }

    pub fn revocations(&self) -> &R {
        &self.revocations
    }

    pub fn extract_token<'a>(&self, jar: &'a CookieJar) -> Result<&'a str, SessionError> {
        match jar.get(&self.config.cookie_name) {
            Some(cookie) => Ok(cookie.value()),
            None => Err(SessionError::MissingToken),
        }
    }

    /// Cookie that instructs the client to drop the session cookie.
    pub fn removal_cookie(&self) -> Cookie<'static> {
        let mut cookie = build_session_cookie(self.config.cookie_name.clone(), String::new());
        cookie.make_removal();
        cookie
    }

    fn cookie_for(&self, claims: &SessionClaims) -> Result<Cookie<'static>, SessionError> {
        let token = encode_token(claims, self.config.secret_bytes())?;
        let mut cookie = build_session_cookie(self.config.cookie_name.clone(), token);
        if claims.remember {
            // Persistent cookie, aligned with the token's own expiry. Without
            // `remember` no Max-Age is set and the client discards the cookie
            // when its session ends.
            cookie.set_max_age(time::Duration::seconds(claims.exp - Utc::now().timestamp()));
        }
        Ok(cookie)
    }
}

impl<R: RevokedSessionStore> SessionManager<R> {
    /// Issue a fresh session for a just-authenticated account.
    pub fn issue(
        &self,
        account_id: AccountId,
        remember: bool,
    ) -> Result<Cookie<'static>, SessionError> {
        let now = Utc::now().timestamp();
        let ttl = if remember {
            self.config.remember_ttl_seconds
        } else {
            self.config.session_ttl_seconds
        };

        let claims = SessionClaims {
            sub: account_id.to_string(),
            iat: now,
            exp: now + ttl,
            auth_time: now,
            remember,
        };

        self.cookie_for(&claims)
    }

    /// Check the token's signature and expiry, then its revocation status.
    pub async fn validate(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let claims = decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => SessionError::Expired,
            _ => SessionError::InvalidToken,
        })?;

        let revoked = self
            .revocations
            .contains(token)
            .await
            .map_err(|e| SessionError::Unexpected(e.to_string()))?;
        if revoked {
            return Err(SessionError::Revoked);
        }

        Ok(claims)
    }

    pub async fn revoke(&self, token: String) -> Result<(), SessionError> {
        self.revocations
            .revoke(token)
            .await
            .map_err(|e| SessionError::Unexpected(e.to_string()))
    }

    /// Sliding renewal for "remember me" sessions.
    ///
    /// Returns a re-issued cookie whose expiry is pushed back to a full
    /// window from now, clamped to `auth_time + absolute_cap`. Non-remember
    /// sessions and sessions past the cap yield `None`.
    pub fn renewal_cookie(
        &self,
        claims: &SessionClaims,
    ) -> Result<Option<Cookie<'static>>, SessionError> {
        if !claims.remember {
            return Ok(None);
        }

        let now = Utc::now().timestamp();
        let cap = claims.auth_time + self.config.absolute_cap_seconds;
        let exp = (now + self.config.remember_ttl_seconds).min(cap);
        if exp <= now {
            return Ok(None);
        }

        let renewed = SessionClaims {
            sub: claims.sub.clone(),
            iat: now,
            exp,
            auth_time: claims.auth_time,
            remember: true,
        };

        self.cookie_for(&renewed).map(Some)
    }
}

fn build_session_cookie(cookie_name: String, token: String) -> Cookie<'static> {
    Cookie::build((cookie_name, token))
        .path("/") // apply cookie to all URLs on the server
        .http_only(true) // prevent JavaScript from accessing the cookie
        .secure(true)
        .same_site(SameSite::Lax)
        .build()
}

fn encode_token(claims: &SessionClaims, secret: &[u8]) -> Result<String, SessionError> {
    encode(
        &jsonwebtoken::Header::default(),
        claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|e| SessionError::Unexpected(e.to_string()))
}
