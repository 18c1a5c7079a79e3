//! Spotify profile lookup.

use serde::Deserialize;

use super::oauth::get_json;
use crate::error::AuthError;
use crate::models::SessionUser;

const ME_URL: &str = "https://api.spotify.com/v1/me";

#[derive(Debug, Deserialize)]
struct SpotifyImage {
    url: String,
}

/// Spotify current-user profile.
#[derive(Debug, Deserialize)]
struct SpotifyUser {
    id: String,
    display_name: Option<String>,
    email: Option<String>,
    #[serde(default)]
    images: Vec<SpotifyImage>,
}

impl From<SpotifyUser> for SessionUser {
    fn from(user: SpotifyUser) -> Self {
        SessionUser {
            id: user.id,
            name: user.display_name,
            email: user.email,
            image: user.images.into_iter().next().map(|i| i.url),
        }
    }
}

pub(crate) async fn fetch_user(
    client: &reqwest::Client,
    access_token: &str,
) -> Result<SessionUser, AuthError> {
    let user: SpotifyUser = get_json(client, ME_URL, access_token).await?;
    Ok(user.into())
}
