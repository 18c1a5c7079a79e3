//! Email and password sign-in against a hardcoded demo account.

use serde::Deserialize;

use crate::models::SessionUser;

/// Submitted sign-in form.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

struct MockUser {
    id: &'static str,
    name: &'static str,
    email: &'static str,
    password: &'static str,
    image: &'static str,
}

// Stands in for a user table.
const MOCK_USER: MockUser = MockUser {
    id: "1",
    name: "Mohit Virli",
    email: "test@gmail.com",
    password: "password",
    image: "/avatar.svg",
};

/// Check credentials against the demo account.
///
/// Comparison is exact: no trimming, no case folding.
pub fn authorize(credentials: &Credentials) -> Option<SessionUser> {
    if credentials.email != MOCK_USER.email || credentials.password != MOCK_USER.password {
        tracing::debug!("credentials rejected");
        return None;
    }

    Some(SessionUser {
        id: MOCK_USER.id.to_string(),
        name: Some(MOCK_USER.name.to_string()),
        email: Some(MOCK_USER.email.to_string()),
        image: Some(MOCK_USER.image.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn matching_credentials_return_user_without_password() {
        let user = authorize(&creds("test@gmail.com", "password")).unwrap();
        assert_eq!(user.id, "1");
        assert_eq!(user.name.as_deref(), Some("Mohit Virli"));
        assert_eq!(user.email.as_deref(), Some("test@gmail.com"));
        assert_eq!(user.image.as_deref(), Some("/avatar.svg"));
    }

    #[test]
    fn anything_else_returns_none() {
        for (email, password) in [
            ("test@gmail.com", "wrong"),
            ("other@gmail.com", "password"),
            ("TEST@gmail.com", "password"),
            ("test@gmail.com ", "password"),
            ("test@gmail.com", "Password"),
            ("test@gmail.com", "password "),
            ("", ""),
        ] {
            assert!(
                authorize(&creds(email, password)).is_none(),
                "{email:?}/{password:?} should not authorize"
            );
        }
    }
}
