//! This crate contains all shared UI for the workspace.

pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_brands_icons::*;
}

mod auth;
pub use auth::{
    notify, redirect_browser, redirect_target, use_auth, AuthProvider, AuthState, AuthStatus,
    Gate, LoginButton, LogoutButton,
};

mod login_form;
pub use login_form::LoginForm;

mod social;
pub use social::SocialButtons;

mod user_card;
pub use user_card::UserCard;
