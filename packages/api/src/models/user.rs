//! # Signed-in user projection
//!
//! [`SessionUser`] is what a provider hands back after a successful sign-in and what the
//! landing page renders: `id`, `name`, `email` and `image`. Only `id` is guaranteed;
//! OAuth providers may omit the rest. It never carries a password.
//!
//! [`avatar_src`] decides whether an image URL may be rendered. Local paths are always
//! allowed; remote images must be served over HTTPS from one of the
//! [`ALLOWED_IMAGE_HOSTS`], which are the avatar CDNs of the configured OAuth providers.

use serde::{Deserialize, Serialize};
use url::Url;

/// Remote hosts avatars may be loaded from.
pub const ALLOWED_IMAGE_HOSTS: [&str; 3] = [
    "lh3.googleusercontent.com",
    "avatars.githubusercontent.com",
    "i.scdn.co",
];

/// User information stored in a session and safe to send to the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionUser {
    pub id: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl SessionUser {
    /// Get display name, falling back to email if name is not set.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .or(self.email.as_deref())
            .unwrap_or("there")
    }

    /// The avatar to render, if the image is from an allowed source.
    pub fn avatar(&self) -> Option<&str> {
        self.image.as_deref().and_then(avatar_src)
    }
}

/// Returns `image` back if it may be rendered as an avatar.
pub fn avatar_src(image: &str) -> Option<&str> {
    let image = image.trim();
    // Browsers read `\` as `/`, so `/\host` would leave the origin.
    if image.contains('\\') {
        return None;
    }
    if image.starts_with('/') && !image.starts_with("//") {
        return Some(image);
    }

    let url = Url::parse(image).ok()?;
    if url.scheme() != "https" || !url.username().is_empty() || url.password().is_some() {
        return None;
    }
    let host = url.host_str()?;

    ALLOWED_IMAGE_HOSTS
        .iter()
        .any(|allowed| host.eq_ignore_ascii_case(allowed))
        .then_some(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: Option<&str>, email: Option<&str>) -> SessionUser {
        SessionUser {
            id: "1".into(),
            name: name.map(Into::into),
            email: email.map(Into::into),
            image: None,
        }
    }

    #[test]
    fn display_name_falls_back_to_email() {
        assert_eq!(user(Some("Ada"), Some("ada@x.io")).display_name(), "Ada");
        assert_eq!(user(None, Some("ada@x.io")).display_name(), "ada@x.io");
        assert_eq!(user(Some("  "), Some("ada@x.io")).display_name(), "ada@x.io");
        assert_eq!(user(None, None).display_name(), "there");
    }

    #[test]
    fn local_avatars_are_allowed() {
        assert_eq!(avatar_src("/avatar.svg"), Some("/avatar.svg"));
        assert_eq!(avatar_src("//evil.example/a.png"), None);
    }

    #[test]
    fn provider_cdn_avatars_are_allowed() {
        let google = "https://lh3.googleusercontent.com/a/abc=s96-c";
        let github = "https://avatars.githubusercontent.com/u/1?v=4";
        let spotify = "https://i.scdn.co/image/ab6775700000ee85";
        assert_eq!(avatar_src(google), Some(google));
        assert_eq!(avatar_src(github), Some(github));
        assert_eq!(avatar_src(spotify), Some(spotify));
    }

    #[test]
    fn other_hosts_and_schemes_are_rejected() {
        assert_eq!(avatar_src("http://i.scdn.co/image/x"), None);
        assert_eq!(avatar_src("https://example.com/a.png"), None);
        assert_eq!(avatar_src("https://i.scdn.co.evil.com/a.png"), None);
        assert_eq!(avatar_src("https://i.scdn.co@evil.com/a.png"), None);
        assert_eq!(avatar_src("javascript:alert(1)"), None);
        assert_eq!(avatar_src("https://evil.example\\@i.scdn.co/x.png"), None);
        assert_eq!(avatar_src("https://user:pw@i.scdn.co/x.png"), None);
        assert_eq!(avatar_src("/\\evil.example/a.png"), None);
    }
}
