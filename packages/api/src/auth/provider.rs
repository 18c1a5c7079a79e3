//! Sign-in providers known to the application.
//!
//! [`Provider`] is shared between the client and the server: the sign-in page uses it to
//! render buttons and the server uses it to pick the matching OAuth endpoints or the
//! credentials check. [`ProviderInfo`] is the client-safe descriptor returned by
//! `list_providers`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A pluggable identity source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Credentials,
    Google,
    GitHub,
    Spotify,
}

impl Provider {
    /// Every provider, in the order they are offered on the sign-in page.
    pub const ALL: [Provider; 4] = [
        Provider::Credentials,
        Provider::Google,
        Provider::GitHub,
        Provider::Spotify,
    ];

    /// Stable lowercase identifier used in URLs and session state.
    pub fn id(self) -> &'static str {
        match self {
            Provider::Credentials => "credentials",
            Provider::Google => "google",
            Provider::GitHub => "github",
            Provider::Spotify => "spotify",
        }
    }

    /// Human readable name.
    pub fn name(self) -> &'static str {
        match self {
            Provider::Credentials => "Credentials",
            Provider::Google => "Google",
            Provider::GitHub => "GitHub",
            Provider::Spotify => "Spotify",
        }
    }

    pub fn is_oauth(self) -> bool {
        !matches!(self, Provider::Credentials)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Returned when a string does not name a known provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProvider(pub String);

impl fmt::Display for UnknownProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown provider: {}", self.0)
    }
}

impl std::error::Error for UnknownProvider {}

impl FromStr for Provider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Provider::ALL
            .into_iter()
            .find(|p| p.id().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownProvider(s.to_string()))
    }
}

/// Provider descriptor safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderInfo {
    pub id: Provider,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub signin_url: String,
    pub callback_url: String,
}

impl ProviderInfo {
    /// Build the descriptor for `provider` relative to the public base URL.
    pub fn for_provider(provider: Provider, base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            id: provider,
            name: provider.name().to_string(),
            kind: if provider.is_oauth() { "oauth" } else { "credentials" }.to_string(),
            signin_url: format!("{base}/api/auth/signin/{}", provider.id()),
            callback_url: format!("{base}/api/auth/callback/{}", provider.id()),
        }
    }
}
