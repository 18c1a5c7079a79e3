//! Google profile lookup.

use serde::Deserialize;

use super::oauth::get_json;
use crate::error::AuthError;
use crate::models::SessionUser;

const USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google user info from API.
#[derive(Debug, Deserialize)]
struct GoogleUser {
    id: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

impl From<GoogleUser> for SessionUser {
    fn from(user: GoogleUser) -> Self {
        SessionUser {
            id: user.id,
            name: user.name,
            email: user.email,
            image: user.picture,
        }
    }
}

pub(crate) async fn fetch_user(
    client: &reqwest::Client,
    access_token: &str,
) -> Result<SessionUser, AuthError> {
    let user: GoogleUser = get_json(client, USERINFO_URL, access_token).await?;
    Ok(user.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_userinfo_response() {
        let user: GoogleUser = serde_json::from_str(
            r#"{
                "id": "1234567890",
                "email": "ada@gmail.com",
                "verified_email": true,
                "name": "Ada Lovelace",
                "picture": "https://lh3.googleusercontent.com/a/abc"
            }"#,
        )
        .unwrap();

        let user = SessionUser::from(user);
        assert_eq!(user.id, "1234567890");
        assert_eq!(user.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(user.email.as_deref(), Some("ada@gmail.com"));
        assert_eq!(user.avatar(), Some("https://lh3.googleusercontent.com/a/abc"));
    }
}
