//! Email and password sign-in form.

use api::auth::{validate_login_form, LoginField, SignInError};
use api::Session;
use dioxus::prelude::*;

/// Id of the error message the inputs point at; no attribute while there is none.
fn described_by(error: Option<&str>) -> Option<&'static str> {
    error.map(|_| "form-error")
}

/// Controlled sign-in form.
///
/// Fields are validated in the browser first; the server is only called once they pass.
/// A rejected sign-in always shows the same generic message.
#[component]
pub fn LoginForm(on_success: EventHandler<Session>, children: Element) -> Element {
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut loading = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut invalid_field = use_signal(|| Option::<LoginField>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        error.set(None);
        invalid_field.set(None);

        let e = email();
        let p = password();

        if let Err(err) = validate_login_form(&e, &p) {
            invalid_field.set(Some(err.field()));
            error.set(Some(err.message().to_string()));
            return;
        }

        loading.set(true);
        spawn(async move {
            match api::login_credentials(e, p).await {
                Ok(session) => {
                    loading.set(false);
                    on_success.call(session);
                }
                Err(err) => {
                    tracing::debug!("Credentials sign-in failed: {}", err);
                    loading.set(false);
                    error.set(Some(SignInError::Credentials.message().to_string()));
                }
            }
        });
    };

    let email_invalid = error().is_some() && invalid_field() == Some(LoginField::Email);
    let password_invalid = error().is_some() && invalid_field() == Some(LoginField::Password);
    let describedby = described_by(error().as_deref());

    rsx! {
        form {
            class: "login-form",
            aria_labelledby: "login-heading",
            novalidate: true,
            onsubmit: handle_submit,

            h2 { id: "login-heading", class: "sr-only", "Sign in to your account" }

            div {
                class: "login-field",
                label { r#for: "email", class: "sr-only", "Email" }
                input {
                    id: "email",
                    name: "email",
                    r#type: "email",
                    placeholder: "Email",
                    autocomplete: "email",
                    class: "login-input",
                    value: email(),
                    aria_invalid: email_invalid,
                    aria_describedby: describedby,
                    oninput: move |evt: FormEvent| email.set(evt.value()),
                }
            }

            div {
                class: "login-field",
                label { r#for: "password", class: "sr-only", "Password" }
                input {
                    id: "password",
                    name: "password",
                    r#type: "password",
                    placeholder: "Password",
                    autocomplete: "current-password",
                    class: "login-input",
                    value: password(),
                    aria_invalid: password_invalid,
                    aria_describedby: describedby,
                    oninput: move |evt: FormEvent| password.set(evt.value()),
                }
            }

            button {
                r#type: "submit",
                class: "login-submit",
                disabled: loading(),
                if loading() { "Signing in..." } else { "Sign in" }
            }

            {children}

            if let Some(err) = error() {
                p {
                    id: "form-error",
                    class: "login-error",
                    role: "alert",
                    "{err}"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_reference_the_error_only_when_shown() {
        assert_eq!(described_by(None), None);
        assert_eq!(
            described_by(Some("Please enter your email.")),
            Some("form-error")
        );
    }
}
