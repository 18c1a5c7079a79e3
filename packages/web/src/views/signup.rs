use dioxus::prelude::*;

use crate::Route;

/// Registration is not available yet.
#[component]
pub fn Signup() -> Element {
    let nav = use_navigator();

    rsx! {
        div {
            class: "page-center",
            div {
                h1 { class: "signup-title", "Signup yet to be implemented!" }
                p { "Need to handle user registration and add a DB to store user credentials." }
                button {
                    class: "btn-primary signup-back",
                    onclick: move |_| {
                        nav.push(Route::Login { error: String::new() });
                    },
                    "Go to Login"
                }
            }
        }
    }
}
