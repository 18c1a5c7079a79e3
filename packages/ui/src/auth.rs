//! Authentication context and hooks for the UI.

use api::{Provider, Session};
use dioxus::prelude::*;

/// Where the session lookup stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Authenticated,
    Unauthenticated,
}

/// Authentication state for the application.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub session: Option<Session>,
    pub status: AuthStatus,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            status: AuthStatus::Loading,
        }
    }
}

impl AuthState {
    pub fn from_session(session: Option<Session>) -> Self {
        let status = if session.is_some() {
            AuthStatus::Authenticated
        } else {
            AuthStatus::Unauthenticated
        };
        Self { session, status }
    }

    pub fn signed_out() -> Self {
        Self::from_session(None)
    }
}

/// Which visitors a page is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Signed-in users only; others go to the sign-in page.
    Protected,
    /// Signed-out visitors only; signed-in users go to the landing page.
    GuestOnly,
}

/// Path to send the visitor to, if they don't belong on a page with this gate.
///
/// Nothing redirects while the session is still loading.
pub fn redirect_target(status: AuthStatus, gate: Gate) -> Option<&'static str> {
    match (gate, status) {
        (Gate::Protected, AuthStatus::Unauthenticated) => Some("/login"),
        (Gate::GuestOnly, AuthStatus::Authenticated) => Some("/"),
        _ => None,
    }
}

/// Get the current authentication state.
/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Provider component that manages authentication state.
/// Wrap your app with this component to enable authentication.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let mut auth_state = use_signal(AuthState::default);

    // Fetch the session on mount
    let _ = use_resource(move || async move {
        match api::get_session().await {
            Ok(session) => auth_state.set(AuthState::from_session(session)),
            Err(e) => {
                tracing::warn!("Failed to load session: {}", e);
                auth_state.set(AuthState::signed_out());
            }
        }
    });

    use_context_provider(|| auth_state);

    rsx! {
        {children}
    }
}

/// Send the browser to a URL outside the app router.
pub fn redirect_browser(url: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(url) {
                tracing::error!("Failed to redirect to {}: {:?}", url, e);
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("Open {} to continue", url);
    }
}

/// Show a blocking notice to the user.
pub fn notify(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("{}", message);
    }
}

/// Button to initiate login with a specific OAuth provider.
#[component]
pub fn LoginButton(
    provider: Provider,
    on_error: EventHandler<String>,
    #[props(default = "".to_string())] class: String,
    children: Element,
) -> Element {
    let mut loading = use_signal(|| false);
    let name = provider.name();

    let onclick = move |_| async move {
        loading.set(true);
        match api::get_login_url(provider.id().to_string()).await {
            Ok(url) => redirect_browser(&url),
            Err(e) => {
                tracing::error!("Failed to get {} login URL: {}", provider, e);
                loading.set(false);
                on_error.call(format!("{name} sign-in is not available right now."));
            }
        }
    };

    rsx! {
        button {
            r#type: "button",
            class: "{class}",
            title: "Sign in with {name}",
            aria_label: "Sign in with {name}",
            disabled: loading(),
            onclick: onclick,
            {children}
        }
    }
}

/// Button to log out the current user.
#[component]
pub fn LogoutButton(
    #[props(default = "Sign out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let mut auth_state = use_auth();
    let nav = use_navigator();

    let onclick = move |_| async move {
        match api::logout().await {
            Ok(()) => {
                auth_state.set(AuthState::signed_out());
                nav.replace("/login");
            }
            Err(e) => tracing::error!("Failed to sign out: {}", e),
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
