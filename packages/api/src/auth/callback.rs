//! OAuth redirect handling.
//!
//! The provider sends the browser back to `/api/auth/callback/{provider}` with either
//! `code` and `state`, or an `error`. Every failure maps onto a [`SignInError`] so the
//! route can send the visitor to `/login?error=<code>`.

use std::collections::HashMap;

use tower_sessions::Session;

use super::{issue_session, AuthConfig, OAuthClient, PendingAuthorization, Provider, SignInError};

/// Finish an OAuth sign-in: check the callback, exchange the code and issue the session.
pub async fn complete_oauth_sign_in(
    config: &AuthConfig,
    provider: &str,
    params: &HashMap<String, String>,
    session: &Session,
) -> Result<(), SignInError> {
    if let Some(error) = params.get("error") {
        tracing::warn!(%provider, %error, "Provider returned an error");
        return Err(match error.as_str() {
            "access_denied" => SignInError::AccessDenied,
            _ => SignInError::OAuthError,
        });
    }

    let provider: Provider = provider.parse().map_err(|e| {
        tracing::error!("OAuth callback for {}", e);
        SignInError::ConfigError
    })?;

    let Some(code) = params.get("code") else {
        tracing::error!(%provider, "OAuth callback missing code");
        return Err(SignInError::MissingCode);
    };
    let Some(state) = params.get("state") else {
        tracing::error!(%provider, "OAuth callback missing state");
        return Err(SignInError::MissingState);
    };

    let pending = PendingAuthorization::take(session)
        .await
        .map_err(|e| {
            tracing::error!("Failed to read OAuth state: {}", e);
            e.sign_in_error()
        })?
        .ok_or_else(|| {
            tracing::error!(%provider, "OAuth callback without a pending sign-in");
            SignInError::OAuthState
        })?;

    let oauth = OAuthClient::new(config, provider).map_err(|e| {
        tracing::error!("Failed to create {} OAuth client: {}", provider, e);
        e.sign_in_error()
    })?;

    let user = oauth
        .exchange_code(code, state, &pending)
        .await
        .map_err(|e| {
            tracing::error!("{} OAuth error: {}", provider, e);
            e.sign_in_error()
        })?;

    issue_session(session, config, user).await.map_err(|e| {
        tracing::error!("Failed to set session: {}", e);
        e.sign_in_error()
    })?;

    Ok(())
}
