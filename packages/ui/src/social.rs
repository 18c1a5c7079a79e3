//! Social sign-in buttons.

use api::Provider;
use dioxus::prelude::*;

use crate::auth::{notify, LoginButton};
use crate::icons::{FaApple, FaGithub, FaGoogle, FaSpotify};
use crate::Icon;

const SOCIAL_BUTTON_CLASS: &str = "social-btn";

/// One button per configured OAuth provider, plus Apple, which is not available yet.
#[component]
pub fn SocialButtons() -> Element {
    let mut message = use_signal(|| Option::<String>::None);
    let providers = use_resource(|| async move {
        match api::list_providers().await {
            Ok(providers) => providers,
            Err(e) => {
                tracing::warn!("Failed to load providers: {}", e);
                Vec::new()
            }
        }
    });

    let oauth: Vec<Provider> = providers
        .read()
        .as_ref()
        .map(|list| list.iter().map(|p| p.id).filter(|p| p.is_oauth()).collect())
        .unwrap_or_default();

    rsx! {
        div {
            class: "social-buttons",
            role: "group",
            aria_label: "Sign in with social accounts",

            for provider in oauth {
                LoginButton {
                    key: "{provider}",
                    provider,
                    class: SOCIAL_BUTTON_CLASS,
                    on_error: move |msg: String| message.set(Some(msg)),
                    ProviderIcon { provider }
                }
            }

            button {
                r#type: "button",
                class: SOCIAL_BUTTON_CLASS,
                title: "Sign in with Apple",
                aria_label: "Sign in with Apple",
                onclick: move |_| notify("Apple sign-in not implemented."),
                Icon { icon: FaApple, width: 20, height: 20 }
            }
        }

        if let Some(msg) = message() {
            p { class: "login-error", role: "alert", "{msg}" }
        }
    }
}

#[component]
fn ProviderIcon(provider: Provider) -> Element {
    match provider {
        Provider::Google => rsx! { Icon { icon: FaGoogle, width: 20, height: 20 } },
        Provider::GitHub => rsx! { Icon { icon: FaGithub, width: 20, height: 20 } },
        Provider::Spotify => rsx! { Icon { icon: FaSpotify, width: 20, height: 20 } },
        Provider::Credentials => rsx! {},
    }
}
