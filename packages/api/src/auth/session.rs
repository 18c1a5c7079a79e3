//! Session state kept in the `tower_sessions` session.
//!
//! Two keys are used:
//!
//! - [`SESSION_TOKEN_KEY`] — the signed session token issued after sign-in.
//! - [`OAUTH_STATE_KEY`] — the CSRF state and PKCE verifier of an OAuth sign-in that is
//!   waiting for the provider to redirect back. It is single use and expires after
//!   [`OAUTH_STATE_TTL_SECS`].

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use super::token::{decode_session_token, encode_session_token};
use super::{AuthConfig, Provider};
use crate::error::AuthError;
use crate::models::{self, SessionUser};

/// Key for storing the session token.
pub const SESSION_TOKEN_KEY: &str = "session_token";

/// Key for storing an OAuth sign-in in progress.
pub const OAUTH_STATE_KEY: &str = "oauth_state";

/// How long a provider has to redirect back.
pub const OAUTH_STATE_TTL_SECS: i64 = 10 * 60;

/// Sign `user` in on this session.
pub async fn issue_session(
    session: &Session,
    config: &AuthConfig,
    user: SessionUser,
) -> Result<models::Session, AuthError> {
    let (token, claims) = encode_session_token(config, &user)?;

    // New id on privilege change.
    session.cycle_id().await?;
    session.insert(SESSION_TOKEN_KEY, token).await?;

    tracing::info!(user_id = %claims.sub, "session issued");

    Ok(models::Session {
        user,
        expires: claims
            .expires_at()
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

/// Read and verify the session token, if any.
///
/// A token that no longer verifies is dropped from the session.
pub async fn current_session(
    session: &Session,
    config: &AuthConfig,
) -> Result<Option<models::Session>, AuthError> {
    let Some(token) = session.get::<String>(SESSION_TOKEN_KEY).await? else {
        return Ok(None);
    };

    match decode_session_token(config, &token) {
        Ok(claims) => Ok(Some(models::Session {
            user: claims.user(),
            expires: claims
                .expires_at()
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        })),
        Err(e) => {
            tracing::debug!("discarding session token: {}", e);
            session.remove::<String>(SESSION_TOKEN_KEY).await?;
            Ok(None)
        }
    }
}

/// Sign out: drop everything stored in the session.
pub async fn end_session(session: &Session) -> Result<(), AuthError> {
    session.flush().await?;
    Ok(())
}

/// An OAuth sign-in waiting for the provider's redirect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PendingAuthorization {
    pub provider: Provider,
    pub csrf_state: String,
    pub pkce_verifier: String,
    /// Seconds since epoch.
    pub created_at: i64,
}

impl PendingAuthorization {
    pub fn new(provider: Provider, csrf_state: String, pkce_verifier: String) -> Self {
        Self {
            provider,
            csrf_state,
            pkce_verifier,
            created_at: Utc::now().timestamp(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() - self.created_at > OAUTH_STATE_TTL_SECS
    }

    /// Check a callback against this pending sign-in.
    pub fn verify(&self, provider: Provider, state: &str) -> Result<(), AuthError> {
        if self.provider != provider || self.csrf_state != state || self.is_expired() {
            return Err(AuthError::InvalidState);
        }
        Ok(())
    }

    /// Remember this sign-in, replacing any earlier one.
    pub async fn store(&self, session: &Session) -> Result<(), AuthError> {
        session.insert(OAUTH_STATE_KEY, self).await?;
        Ok(())
    }

    /// Take the pending sign-in out of the session.
    pub async fn take(session: &Session) -> Result<Option<Self>, AuthError> {
        Ok(session.remove::<Self>(OAUTH_STATE_KEY).await?)
    }
}
