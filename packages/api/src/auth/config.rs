//! Authentication configuration from environment variables.
//!
//! [`AuthConfig`] holds the signing secret, the public base URL and the client
//! credentials of every OAuth provider that has them. [`OAuthConfig`] is the per-provider
//! view handed to the `oauth2` client: endpoints, scopes and the redirect URL.

use std::sync::OnceLock;
use std::time::Duration;

use oauth2::{AuthUrl, ClientId, ClientSecret, RedirectUrl, Scope, TokenUrl};

use super::Provider;
use crate::error::AuthError;

/// Base URL used when `AUTH_URL` is not set.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Thirty days.
pub const DEFAULT_SESSION_MAX_AGE: Duration = Duration::from_secs(30 * 24 * 60 * 60);

static CONFIG: OnceLock<AuthConfig> = OnceLock::new();

/// Get or load the process-wide configuration.
pub fn config() -> Result<&'static AuthConfig, AuthError> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = AuthConfig::from_env()?;
    Ok(CONFIG.get_or_init(|| loaded))
}

/// Client id and secret of one OAuth app.
#[derive(Debug, Clone)]
pub struct OAuthCredentials {
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub base_url: String,
    pub session_max_age: Duration,
    pub google: Option<OAuthCredentials>,
    pub github: Option<OAuthCredentials>,
    pub spotify: Option<OAuthCredentials>,
}

impl AuthConfig {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self, AuthError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let secret = non_empty("AUTH_SECRET").ok_or(AuthError::MissingEnv("AUTH_SECRET"))?;
        let base_url = non_empty("AUTH_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let session_max_age = match non_empty("AUTH_SESSION_MAX_AGE") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|e| AuthError::InvalidEnv {
                    name: "AUTH_SESSION_MAX_AGE",
                    reason: format!("{e}"),
                })?;
                if secs == 0 {
                    return Err(AuthError::InvalidEnv {
                        name: "AUTH_SESSION_MAX_AGE",
                        reason: "must be greater than zero".to_string(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_SESSION_MAX_AGE,
        };

        let credentials = |id_key: &str, secret_key: &str| {
            Some(OAuthCredentials {
                client_id: ClientId::new(non_empty(id_key)?),
                client_secret: ClientSecret::new(non_empty(secret_key)?),
            })
        };

        Ok(Self {
            secret,
            base_url,
            session_max_age,
            google: credentials("GOOGLE_CLIENT_ID", "GOOGLE_CLIENT_SECRET"),
            github: credentials("GITHUB_CLIENT_ID", "GITHUB_CLIENT_SECRET"),
            spotify: credentials("SPOTIFY_CLIENT_ID", "SPOTIFY_CLIENT_SECRET"),
        })
    }

    /// Client credentials for an OAuth provider, if configured.
    pub fn oauth_credentials(&self, provider: Provider) -> Option<&OAuthCredentials> {
        match provider {
            Provider::Credentials => None,
            Provider::Google => self.google.as_ref(),
            Provider::GitHub => self.github.as_ref(),
            Provider::Spotify => self.spotify.as_ref(),
        }
    }

    /// Whether `provider` can be used to sign in.
    pub fn is_enabled(&self, provider: Provider) -> bool {
        !provider.is_oauth() || self.oauth_credentials(provider).is_some()
    }

    /// Credentials first, then every configured OAuth provider.
    pub fn enabled_providers(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }

    /// Where `provider` sends the browser back to.
    pub fn callback_url(&self, provider: Provider) -> String {
        format!("{}/api/auth/callback/{}", self.base_url, provider.id())
    }
}

/// OAuth provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub provider: Provider,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub auth_url: AuthUrl,
    pub token_url: TokenUrl,
    pub redirect_url: RedirectUrl,
    pub scopes: Vec<Scope>,
}

impl OAuthConfig {
    pub fn for_provider(config: &AuthConfig, provider: Provider) -> Result<Self, AuthError> {
        let (auth_url, token_url, scopes): (&str, &str, &[&str]) = match provider {
            Provider::Credentials => {
                return Err(AuthError::UnknownProvider(provider.id().to_string()))
            }
            Provider::Google => (
                "https://accounts.google.com/o/oauth2/v2/auth",
                "https://oauth2.googleapis.com/token",
                &["openid", "email", "profile"],
            ),
            Provider::GitHub => (
                "https://github.com/login/oauth/authorize",
                "https://github.com/login/oauth/access_token",
                &["read:user", "user:email"],
            ),
            Provider::Spotify => (
                "https://accounts.spotify.com/authorize",
                "https://accounts.spotify.com/api/token",
                &["user-read-email"],
            ),
        };

        let credentials = config
            .oauth_credentials(provider)
            .ok_or(AuthError::ProviderNotConfigured(provider))?;

        let invalid_url = |e: oauth2::url::ParseError| AuthError::InvalidEnv {
            name: "AUTH_URL",
            reason: e.to_string(),
        };

        Ok(Self {
            provider,
            client_id: credentials.client_id.clone(),
            client_secret: credentials.client_secret.clone(),
            auth_url: AuthUrl::new(auth_url.to_string()).map_err(invalid_url)?,
            token_url: TokenUrl::new(token_url.to_string()).map_err(invalid_url)?,
            redirect_url: RedirectUrl::new(config.callback_url(provider)).map_err(invalid_url)?,
            scopes: scopes.iter().map(|s| Scope::new(s.to_string())).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AuthConfig, AuthError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AuthConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn secret_is_required() {
        let err = load(&[]).unwrap_err();
        assert!(matches!(err, AuthError::MissingEnv("AUTH_SECRET")));

        let err = load(&[("AUTH_SECRET", "  ")]).unwrap_err();
        assert!(matches!(err, AuthError::MissingEnv("AUTH_SECRET")));
    }

    #[test]
    fn defaults_apply() {
        let config = load(&[("AUTH_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session_max_age, DEFAULT_SESSION_MAX_AGE);
        assert_eq!(config.enabled_providers(), vec![Provider::Credentials]);
    }

    #[test]
    fn oauth_provider_needs_id_and_secret() {
        let config = load(&[
            ("AUTH_SECRET", "s3cret"),
            ("GOOGLE_CLIENT_ID", "gid"),
            ("GOOGLE_CLIENT_SECRET", "gsecret"),
            ("GITHUB_CLIENT_ID", "only-id"),
            ("SPOTIFY_CLIENT_ID", "sid"),
            ("SPOTIFY_CLIENT_SECRET", "ssecret"),
        ])
        .unwrap();

        assert_eq!(
            config.enabled_providers(),
            vec![Provider::Credentials, Provider::Google, Provider::Spotify]
        );
        assert!(!config.is_enabled(Provider::GitHub));
    }

    #[test]
    fn rejects_bad_max_age() {
        let err = load(&[("AUTH_SECRET", "s"), ("AUTH_SESSION_MAX_AGE", "soon")]).unwrap_err();
        assert!(matches!(
            err,
            AuthError::InvalidEnv { name: "AUTH_SESSION_MAX_AGE", .. }
        ));

        let err = load(&[("AUTH_SECRET", "s"), ("AUTH_SESSION_MAX_AGE", "0")]).unwrap_err();
        assert!(matches!(err, AuthError::InvalidEnv { .. }));

        let config = load(&[("AUTH_SECRET", "s"), ("AUTH_SESSION_MAX_AGE", "3600")]).unwrap();
        assert_eq!(config.session_max_age, Duration::from_secs(3600));
    }

    #[test]
    fn redirect_url_uses_base_url() {
        let config = load(&[
            ("AUTH_SECRET", "s"),
            ("AUTH_URL", "https://login.example.com/"),
            ("SPOTIFY_CLIENT_ID", "sid"),
            ("SPOTIFY_CLIENT_SECRET", "ssecret"),
        ])
        .unwrap();

        let oauth = OAuthConfig::for_provider(&config, Provider::Spotify).unwrap();
        assert_eq!(
            oauth.redirect_url.as_str(),
            "https://login.example.com/api/auth/callback/spotify"
        );
        assert_eq!(
            oauth.auth_url.as_str(),
            "https://accounts.spotify.com/authorize"
        );
        assert_eq!(oauth.scopes, vec![Scope::new("user-read-email".to_string())]);
    }

    #[test]
    fn unconfigured_and_credentials_have_no_oauth_config() {
        let config = load(&[("AUTH_SECRET", "s")]).unwrap();
        assert!(matches!(
            OAuthConfig::for_provider(&config, Provider::Google),
            Err(AuthError::ProviderNotConfigured(Provider::Google))
        ));
        assert!(matches!(
            OAuthConfig::for_provider(&config, Provider::Credentials),
            Err(AuthError::UnknownProvider(_))
        ));
    }
}
