//! Sign-in failure codes passed to the login page as `?error=<code>`.

/// Reason a sign-in attempt was sent back to the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignInError {
    MissingCode,
    MissingState,
    OAuthState,
    OAuthError,
    AccessDenied,
    ConfigError,
    SessionError,
    Credentials,
    Unknown,
}

impl SignInError {
    pub fn code(self) -> &'static str {
        match self {
            SignInError::MissingCode => "missing_code",
            SignInError::MissingState => "missing_state",
            SignInError::OAuthState => "oauth_state",
            SignInError::OAuthError => "oauth_error",
            SignInError::AccessDenied => "access_denied",
            SignInError::ConfigError => "config_error",
            SignInError::SessionError => "session_error",
            SignInError::Credentials => "credentials",
            SignInError::Unknown => "unknown",
        }
    }

    /// Parse a query-string code. Empty means no error; anything unrecognised is
    /// [`SignInError::Unknown`].
    pub fn from_code(code: &str) -> Option<Self> {
        let err = match code.trim() {
            "" => return None,
            "missing_code" => SignInError::MissingCode,
            "missing_state" => SignInError::MissingState,
            "oauth_state" => SignInError::OAuthState,
            "oauth_error" => SignInError::OAuthError,
            "access_denied" => SignInError::AccessDenied,
            "config_error" => SignInError::ConfigError,
            "session_error" => SignInError::SessionError,
            "credentials" => SignInError::Credentials,
            _ => SignInError::Unknown,
        };
        Some(err)
    }

    /// Message shown to the user.
    pub fn message(self) -> &'static str {
        match self {
            SignInError::MissingCode | SignInError::MissingState | SignInError::OAuthState => {
                "The sign-in request expired or was tampered with. Please try again."
            }
            SignInError::OAuthError => "Could not sign in with that provider. Please try again.",
            SignInError::AccessDenied => "Sign-in was cancelled.",
            SignInError::ConfigError => "That sign-in provider is not configured.",
            SignInError::SessionError => "Could not start your session. Please try again.",
            SignInError::Credentials => "Invalid username or password",
            SignInError::Unknown => "Unable to sign in. Please try again.",
        }
    }

    /// Path on the login page that displays this error.
    pub fn login_path(self) -> String {
        format!("/login?error={}", self.code())
    }
}
