//! Signed-in user summary for the landing page.

use api::SessionUser;
use dioxus::prelude::*;

#[component]
pub fn UserCard(user: SessionUser) -> Element {
    let name = user.display_name().to_string();
    let email = user.email.clone().unwrap_or_default();

    rsx! {
        if let Some(src) = user.avatar() {
            img {
                class: "user-avatar",
                src: "{src}",
                alt: "User Avatar",
                width: 100,
                height: 100,
            }
        }

        p { class: "user-welcome", "Welcome! {name}" }
        if !email.is_empty() {
            p { "Signed in as {email}" }
        }
    }
}
