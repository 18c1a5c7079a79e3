//! Authentication: providers, form validation, credentials and OAuth sign-in, sessions.
//!
//! [`provider`], [`validation`] and [`errors`] are shared with the client so the sign-in
//! page can validate and render without a round trip. Everything else is server only.

mod errors;
mod provider;
mod validation;

#[cfg(feature = "server")]
mod callback;
#[cfg(feature = "server")]
mod config;
#[cfg(feature = "server")]
mod credentials;
#[cfg(feature = "server")]
mod github;
#[cfg(feature = "server")]
mod google;
#[cfg(feature = "server")]
mod oauth;
#[cfg(feature = "server")]
mod session;
#[cfg(feature = "server")]
mod spotify;
#[cfg(feature = "server")]
mod token;

pub use errors::SignInError;
pub use provider::{Provider, ProviderInfo, UnknownProvider};
pub use validation::{validate_email, validate_login_form, LoginField, LoginFormError};

#[cfg(feature = "server")]
pub use callback::complete_oauth_sign_in;
#[cfg(feature = "server")]
pub use config::{config, AuthConfig, OAuthConfig, OAuthCredentials};
#[cfg(feature = "server")]
pub use credentials::{authorize, Credentials};
#[cfg(feature = "server")]
pub use oauth::OAuthClient;
#[cfg(feature = "server")]
pub use session::{
    current_session, end_session, issue_session, PendingAuthorization, OAUTH_STATE_KEY,
    SESSION_TOKEN_KEY,
};
#[cfg(feature = "server")]
pub use token::{decode_session_token, encode_session_token, SessionClaims};
