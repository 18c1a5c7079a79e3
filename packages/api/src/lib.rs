//! # API crate — authentication server functions
//!
//! Defines every Dioxus server function the web frontend calls, along with the
//! authentication modules behind them.
//!
//! ## Modules
//!
//! | Module | Feature gate | Purpose |
//! |--------|-------------|---------|
//! | [`auth`] | partly `server` | Providers and form validation (shared); config, credentials check, OAuth, session tokens (server) |
//! | [`models`] | — | `SessionUser` and `Session`, the client-safe session shape |
//! | `error` | `server` | `AuthError`, the server-side error type |
//!
//! ## Server functions exposed here
//!
//! Every public `async fn` in this file is a Dioxus server function, annotated with
//! `#[get(...)]` or `#[post(...)]` and compiled twice: once with full server logic
//! (behind `#[cfg(feature = "server")]`) and once as a thin client stub that simply
//! forwards the call over HTTP.
//!
//! - `get_session`, `list_providers`, `get_login_url`, `login_credentials`, `logout`
//!
//! The OAuth redirect target (`/api/auth/callback/{provider}`) is a plain axum route in
//! the `web` crate since it answers a browser redirect rather than a client call; it
//! hands off to [`auth::complete_oauth_sign_in`].

use dioxus::prelude::*;

pub mod auth;
#[cfg(feature = "server")]
mod error;
pub mod models;

#[cfg(feature = "server")]
pub use error::AuthError;
pub use models::{Session, SessionUser};

pub use auth::{Provider, ProviderInfo};

/// Get the current session, if signed in.
#[cfg(feature = "server")]
#[get("/api/auth/session", session: tower_sessions::Session)]
pub async fn get_session() -> Result<Option<Session>, ServerFnError> {
    let config = auth::config().map_err(|e| ServerFnError::new(e.to_string()))?;

    auth::current_session(&session, config)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/session")]
pub async fn get_session() -> Result<Option<Session>, ServerFnError> {
    Ok(None)
}

/// List the providers that can be used to sign in.
#[cfg(feature = "server")]
#[get("/api/auth/providers")]
pub async fn list_providers() -> Result<Vec<ProviderInfo>, ServerFnError> {
    let config = auth::config().map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(config
        .enabled_providers()
        .into_iter()
        .map(|p| ProviderInfo::for_provider(p, &config.base_url))
        .collect())
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/providers")]
pub async fn list_providers() -> Result<Vec<ProviderInfo>, ServerFnError> {
    Ok(Vec::new())
}

/// Start an OAuth sign-in and return the provider's authorization URL.
#[cfg(feature = "server")]
#[get("/api/auth/signin/:provider", session: tower_sessions::Session)]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    let provider: Provider = provider
        .parse()
        .map_err(|e: auth::UnknownProvider| ServerFnError::new(e.to_string()))?;

    let config = auth::config().map_err(|e| ServerFnError::new(e.to_string()))?;
    let oauth = auth::OAuthClient::new(config, provider).map_err(|e| {
        tracing::warn!(%provider, "cannot start sign-in: {}", e);
        ServerFnError::new(e.to_string())
    })?;

    let (url, pending) = oauth.authorize_url();
    pending
        .store(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))?;

    Ok(url)
}

#[cfg(not(feature = "server"))]
#[get("/api/auth/signin/:provider")]
pub async fn get_login_url(provider: String) -> Result<String, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign in with email and password.
///
/// Every failure, malformed input included, is reported as the same
/// "Invalid username or password" message.
#[cfg(feature = "server")]
#[post("/api/auth/callback/credentials", session: tower_sessions::Session)]
pub async fn login_credentials(email: String, password: String) -> Result<Session, ServerFnError> {
    let invalid = || ServerFnError::new(AuthError::InvalidCredentials.to_string());

    if auth::validate_login_form(&email, &password).is_err() {
        return Err(invalid());
    }

    let Some(user) = auth::authorize(&auth::Credentials { email, password }) else {
        return Err(invalid());
    };

    let config = auth::config().map_err(|e| ServerFnError::new(e.to_string()))?;
    auth::issue_session(&session, config, user)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/callback/credentials")]
pub async fn login_credentials(email: String, password: String) -> Result<Session, ServerFnError> {
    Err(ServerFnError::new("Server only"))
}

/// Sign out the current user by clearing the session.
#[cfg(feature = "server")]
#[post("/api/auth/signout", session: tower_sessions::Session)]
pub async fn logout() -> Result<(), ServerFnError> {
    auth::end_session(&session)
        .await
        .map_err(|e| ServerFnError::new(e.to_string()))
}

#[cfg(not(feature = "server"))]
#[post("/api/auth/signout")]
pub async fn logout() -> Result<(), ServerFnError> {
    Ok(())
}
