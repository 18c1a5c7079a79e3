//! Signed session tokens.
//!
//! The session strategy is stateless: after sign-in the user is encoded into an HS256
//! JWT signed with `AUTH_SECRET`, and every later request decodes and verifies it.

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthConfig;
use crate::error::AuthError;
use crate::models::SessionUser;

/// JWT claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    /// Subject — the user ID.
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    /// Issued-at timestamp (seconds since epoch).
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
    pub jti: String,
}

impl SessionClaims {
    fn new(user: &SessionUser, issued_at: DateTime<Utc>, config: &AuthConfig) -> Self {
        let max_age = i64::try_from(config.session_max_age.as_secs()).unwrap_or(i64::MAX);
        Self {
            sub: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            picture: user.image.clone(),
            iat: issued_at.timestamp(),
            exp: issued_at.timestamp().saturating_add(max_age),
            jti: Uuid::new_v4().to_string(),
        }
    }

    pub fn user(&self) -> SessionUser {
        SessionUser {
            id: self.sub.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.picture.clone(),
        }
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MAX_UTC)
    }
}

/// Sign a token for `user`, valid for the configured session max age.
pub fn encode_session_token(
    config: &AuthConfig,
    user: &SessionUser,
) -> Result<(String, SessionClaims), AuthError> {
    let claims = SessionClaims::new(user, Utc::now(), config);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok((token, claims))
}

/// Verify signature and expiry, returning the claims.
pub fn decode_session_token(config: &AuthConfig, token: &str) -> Result<SessionClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<SessionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig::from_lookup(|key| (key == "AUTH_SECRET").then(|| secret.to_string()))
            .unwrap()
    }

    fn user() -> SessionUser {
        SessionUser {
            id: "42".into(),
            name: Some("Ada".into()),
            email: Some("ada@example.com".into()),
            image: None,
        }
    }

    #[test]
    fn token_carries_the_user() {
        let config = config("secret-a");
        let (token, claims) = encode_session_token(&config, &user()).unwrap();

        let decoded = decode_session_token(&config, &token).unwrap();
        assert_eq!(decoded, claims);
        assert_eq!(decoded.user(), user());
        assert_eq!(
            decoded.exp - decoded.iat,
            config.session_max_age.as_secs() as i64
        );
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let (token, _) = encode_session_token(&config("secret-a"), &user()).unwrap();
        assert!(decode_session_token(&config("secret-b"), &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = config("secret-a");
        let issued = Utc::now() - chrono::Duration::hours(2);
        let mut claims = SessionClaims::new(&user(), issued, &config);
        claims.exp = issued.timestamp() + Duration::from_secs(60).as_secs() as i64;

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();

        let err = decode_session_token(&config, &token).unwrap_err();
        match err {
            AuthError::Token(e) => assert!(matches!(
                e.kind(),
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
            )),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(decode_session_token(&config("secret-a"), "not.a.token").is_err());
    }
}
