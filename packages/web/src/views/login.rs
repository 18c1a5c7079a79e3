//! Sign-in page: credentials form plus social providers.

use api::auth::SignInError;
use api::Session;
use dioxus::prelude::*;
use ui::{notify, redirect_target, use_auth, AuthState, Gate, LoginForm, SocialButtons};

use crate::Route;

/// Login page component. `error` is the code a failed OAuth sign-in came back with.
#[component]
pub fn Login(error: String) -> Element {
    let mut auth = use_auth();
    let nav = use_navigator();

    // If already logged in, go to the landing page
    use_effect(move || {
        if let Some(target) = redirect_target(auth().status, Gate::GuestOnly) {
            nav.replace(target);
        }
    });

    let on_success = move |session: Session| {
        auth.set(AuthState::from_session(Some(session)));
    };

    let callback_error = SignInError::from_code(&error).map(SignInError::message);

    rsx! {
        div {
            class: "login-page",
            div { class: "login-overlay" }
            div {
                class: "login-title",
                aria_hidden: "true",
                div { "LOGIN" }
            }

            div {
                class: "login-card",

                if let Some(message) = callback_error {
                    p { class: "login-error", role: "alert", "{message}" }
                }

                LoginForm {
                    on_success,
                    SocialButtons {}
                }

                div {
                    class: "login-links",
                    button {
                        r#type: "button",
                        class: "link-btn",
                        onclick: move |_| notify("Password reset not implemented."),
                        "Forgot password?"
                    }
                    Link { to: Route::Signup {}, class: "link-btn", "Create an account" }
                }
            }
        }
    }
}
