//! GitHub profile lookup.
//!
//! `/user` only includes an email when the user made one public; otherwise the primary
//! verified address is taken from `/user/emails`. A missing display name falls back to
//! the login.

use serde::Deserialize;

use super::oauth::get_json;
use crate::error::AuthError;
use crate::models::SessionUser;

const USER_URL: &str = "https://api.github.com/user";
const EMAILS_URL: &str = "https://api.github.com/user/emails";

/// GitHub user info from API.
#[derive(Debug, Deserialize)]
struct GitHubUser {
    id: i64,
    login: String,
    email: Option<String>,
    name: Option<String>,
    avatar_url: Option<String>,
}

/// GitHub email info from API.
#[derive(Debug, Deserialize)]
struct GitHubEmail {
    email: String,
    primary: bool,
    verified: bool,
}

fn primary_email(emails: Vec<GitHubEmail>) -> Option<String> {
    emails
        .into_iter()
        .find(|e| e.primary && e.verified)
        .map(|e| e.email)
}

/// Email from the `/user/emails` lookup. A failed lookup still lets the sign-in through.
fn fallback_email(login: &str, lookup: Result<Vec<GitHubEmail>, AuthError>) -> Option<String> {
    match lookup {
        Ok(emails) => {
            let email = primary_email(emails);
            if email.is_none() {
                tracing::warn!(%login, "no verified primary email on GitHub account");
            }
            email
        }
        Err(e) => {
            tracing::warn!(%login, "GitHub email lookup failed: {}", e);
            None
        }
    }
}

fn to_session_user(user: GitHubUser, email: Option<String>) -> SessionUser {
    SessionUser {
        id: user.id.to_string(),
        name: user.name.filter(|n| !n.trim().is_empty()).or(Some(user.login)),
        email,
        image: user.avatar_url,
    }
}

pub(crate) async fn fetch_user(
    client: &reqwest::Client,
    access_token: &str,
) -> Result<SessionUser, AuthError> {
    let user: GitHubUser = get_json(client, USER_URL, access_token).await?;

    let email = match user.email.clone() {
        Some(email) => Some(email),
        None => {
            let lookup = get_json(client, EMAILS_URL, access_token).await;
            fallback_email(&user.login, lookup)
        }
    };

    Ok(to_session_user(user, email))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(json: &str) -> GitHubUser {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn name_falls_back_to_login() {
        let u = user(r#"{"id": 583231, "login": "octocat", "email": null, "name": null,
                         "avatar_url": "https://avatars.githubusercontent.com/u/583231?v=4"}"#);
        let session_user = to_session_user(u, Some("octocat@github.com".into()));
        assert_eq!(session_user.id, "583231");
        assert_eq!(session_user.name.as_deref(), Some("octocat"));
        assert_eq!(session_user.email.as_deref(), Some("octocat@github.com"));
        assert!(session_user.avatar().is_some());
    }

    #[test]
    fn picks_primary_verified_email() {
        let emails: Vec<GitHubEmail> = serde_json::from_str(
            r#"[
                {"email": "old@example.com", "primary": false, "verified": true, "visibility": null},
                {"email": "unverified@example.com", "primary": true, "verified": false, "visibility": null},
                {"email": "main@example.com", "primary": true, "verified": true, "visibility": "public"}
            ]"#,
        )
        .unwrap();
        assert_eq!(primary_email(emails), Some("main@example.com".to_string()));
    }

    #[test]
    fn no_primary_verified_email_yields_none() {
        let emails: Vec<GitHubEmail> = serde_json::from_str(
            r#"[{"email": "a@example.com", "primary": false, "verified": true}]"#,
        )
        .unwrap();
        assert_eq!(primary_email(emails), None);
    }

    #[test]
    fn failed_email_lookup_does_not_block_sign_in() {
        let lookup = Err(AuthError::Profile(format!("{EMAILS_URL} returned 403 Forbidden")));
        assert_eq!(fallback_email("octocat", lookup), None);

        let lookup = Ok(vec![GitHubEmail {
            email: "main@example.com".into(),
            primary: true,
            verified: true,
        }]);
        assert_eq!(fallback_email("octocat", lookup), Some("main@example.com".into()));
    }
}
