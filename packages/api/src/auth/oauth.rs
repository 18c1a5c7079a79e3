//! # OAuth 2.0 authorization code flow
//!
//! One client drives every OAuth provider; only the endpoints, scopes and the profile
//! request differ (see [`super::google`], [`super::github`], [`super::spotify`]).
//!
//! ## Flow
//!
//! 1. **[`authorize_url`](OAuthClient::authorize_url)** — builds the provider's
//!    authorization URL with a random CSRF state and a PKCE S256 challenge. The state and
//!    verifier come back as a [`PendingAuthorization`] which the caller stores in the
//!    session.
//!
//! 2. **[`exchange_code`](OAuthClient::exchange_code)** — called from the
//!    `/api/auth/callback/{provider}` route with the pending sign-in taken out of the
//!    session. It checks provider, state and age, exchanges the code plus verifier for an
//!    access token, then fetches the user's profile and maps it onto a [`SessionUser`].

use oauth2::basic::BasicClient;
use oauth2::{
    AuthorizationCode, CsrfToken, EndpointNotSet, EndpointSet, PkceCodeChallenge,
    PkceCodeVerifier, TokenResponse,
};

use super::config::OAuthConfig;
use super::session::PendingAuthorization;
use super::{github, google, spotify, AuthConfig, Provider};
use crate::error::AuthError;
use crate::models::SessionUser;

/// Sent with profile requests; GitHub rejects requests without one.
pub(crate) const USER_AGENT: &str = concat!("login-demo/", env!("CARGO_PKG_VERSION"));

/// OAuth client type with auth URL and token URL set.
type ConfiguredClient = oauth2::Client<
    oauth2::basic::BasicErrorResponse,
    oauth2::basic::BasicTokenResponse,
    oauth2::basic::BasicTokenIntrospectionResponse,
    oauth2::StandardRevocableToken,
    oauth2::basic::BasicRevocationErrorResponse,
    EndpointSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointNotSet,
    EndpointSet,
>;

/// OAuth handler for one provider.
pub struct OAuthClient {
    config: OAuthConfig,
}

impl OAuthClient {
    pub fn new(config: &AuthConfig, provider: Provider) -> Result<Self, AuthError> {
        let config = OAuthConfig::for_provider(config, provider)?;
        Ok(Self { config })
    }

    fn create_client(&self) -> ConfiguredClient {
        BasicClient::new(self.config.client_id.clone())
            .set_client_secret(self.config.client_secret.clone())
            .set_auth_uri(self.config.auth_url.clone())
            .set_token_uri(self.config.token_url.clone())
            .set_redirect_uri(self.config.redirect_url.clone())
    }

    /// Generate authorization URL with PKCE.
    pub fn authorize_url(&self) -> (String, PendingAuthorization) {
        let client = self.create_client();
        let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();

        let (auth_url, csrf_state) = client
            .authorize_url(CsrfToken::new_random)
            .add_scopes(self.config.scopes.iter().cloned())
            .set_pkce_challenge(pkce_challenge)
            .url();

        let pending = PendingAuthorization::new(
            self.config.provider,
            csrf_state.secret().clone(),
            pkce_verifier.secret().clone(),
        );

        (auth_url.to_string(), pending)
    }

    /// Exchange authorization code for tokens and get user info.
    pub async fn exchange_code(
        &self,
        code: &str,
        state: &str,
        pending: &PendingAuthorization,
    ) -> Result<SessionUser, AuthError> {
        pending.verify(self.config.provider, state)?;

        // Create HTTP client for token exchange
        let http_client = reqwest::ClientBuilder::new()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let client = self.create_client();

        let token_result = client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .set_pkce_verifier(PkceCodeVerifier::new(pending.pkce_verifier.clone()))
            .request_async(&http_client)
            .await
            .map_err(|e| AuthError::TokenExchange(e.to_string()))?;

        let access_token = token_result.access_token().secret();

        let api_client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        let user = match self.config.provider {
            Provider::Google => google::fetch_user(&api_client, access_token).await?,
            Provider::GitHub => github::fetch_user(&api_client, access_token).await?,
            Provider::Spotify => spotify::fetch_user(&api_client, access_token).await?,
            Provider::Credentials => {
                return Err(AuthError::UnknownProvider(Provider::Credentials.to_string()))
            }
        };

        tracing::info!(provider = %self.config.provider, user_id = %user.id, "oauth sign-in");

        Ok(user)
    }
}

/// GET a JSON profile document with a bearer token.
pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
    client: &reqwest::Client,
    url: &str,
    access_token: &str,
) -> Result<T, AuthError> {
    let response = client
        .get(url)
        .bearer_auth(access_token)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AuthError::Profile(format!("{url} returned {status}")));
    }

    Ok(response.json().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig::from_lookup(|key| {
            let value = match key {
                "AUTH_SECRET" => "s",
                "GITHUB_CLIENT_ID" => "gh-id",
                "GITHUB_CLIENT_SECRET" => "gh-secret",
                _ => return None,
            };
            Some(value.to_string())
        })
        .unwrap()
    }

    #[test]
    fn authorize_url_carries_state_challenge_and_redirect() {
        let client = OAuthClient::new(&config(), Provider::GitHub).unwrap();
        let (url, pending) = client.authorize_url();

        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("client_id=gh-id"));
        assert!(url.contains("code_challenge_method=S256"));
        assert!(url.contains(&format!("state={}", pending.csrf_state)));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A8080%2Fapi%2Fauth%2Fcallback%2Fgithub"
        ));
        assert_eq!(pending.provider, Provider::GitHub);
        assert!(!pending.pkce_verifier.is_empty());
    }

    #[test]
    fn each_authorization_gets_fresh_state() {
        let client = OAuthClient::new(&config(), Provider::GitHub).unwrap();
        let (_, first) = client.authorize_url();
        let (_, second) = client.authorize_url();
        assert_ne!(first.csrf_state, second.csrf_state);
        assert_ne!(first.pkce_verifier, second.pkce_verifier);
    }

    #[test]
    fn unconfigured_provider_cannot_build_client() {
        assert!(matches!(
            OAuthClient::new(&config(), Provider::Spotify),
            Err(AuthError::ProviderNotConfigured(Provider::Spotify))
        ));
    }

    #[tokio::test]
    async fn mismatched_state_is_rejected_before_any_request() {
        let client = OAuthClient::new(&config(), Provider::GitHub).unwrap();
        let (_, pending) = client.authorize_url();

        let err = client
            .exchange_code("code", "not-the-state", &pending)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidState));
    }
}
