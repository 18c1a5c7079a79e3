//! Protected landing page.

use dioxus::prelude::*;
use ui::{redirect_target, use_auth, AuthStatus, Gate, LogoutButton, UserCard};

/// Landing page; visitors without a session are sent to the sign-in page.
#[component]
pub fn Home() -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        if let Some(target) = redirect_target(auth().status, Gate::Protected) {
            nav.replace(target);
        }
    });

    let state = auth();
    match (state.status, state.session) {
        (AuthStatus::Loading, _) => rsx! {
            div { class: "page-center", "Loading..." }
        },
        (AuthStatus::Authenticated, Some(session)) => rsx! {
            div {
                class: "page-center",
                main {
                    class: "home-card",
                    UserCard { user: session.user }
                    LogoutButton { class: "btn-primary" }
                }
            }
        },
        _ => rsx! {},
    }
}
