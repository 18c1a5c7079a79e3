//! Server-side authentication errors.

use crate::auth::{Provider, SignInError};

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("{0} not set")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {reason}")]
    InvalidEnv { name: &'static str, reason: String },

    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("{} sign-in is not configured", .0.name())]
    ProviderNotConfigured(Provider),

    #[error("Invalid or expired OAuth state")]
    InvalidState,

    #[error("Token exchange failed: {0}")]
    TokenExchange(String),

    #[error("Failed to fetch profile: {0}")]
    Profile(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("session store error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("session token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

impl AuthError {
    /// Code the login page shows for this failure.
    pub fn sign_in_error(&self) -> SignInError {
        match self {
            AuthError::MissingEnv(_)
            | AuthError::InvalidEnv { .. }
            | AuthError::UnknownProvider(_)
            | AuthError::ProviderNotConfigured(_) => SignInError::ConfigError,
            AuthError::InvalidState => SignInError::OAuthState,
            AuthError::TokenExchange(_) | AuthError::Profile(_) | AuthError::Http(_) => {
                SignInError::OAuthError
            }
            AuthError::InvalidCredentials => SignInError::Credentials,
            AuthError::Session(_) | AuthError::Token(_) => SignInError::SessionError,
        }
    }
}
