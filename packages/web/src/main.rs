use dioxus::prelude::*;

use ui::AuthProvider;
use views::{Home, Login, Signup};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Home {},
    #[route("/login?:error")]
    Login { error: String },
    #[route("/signup")]
    Signup {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    #[cfg(feature = "server")]
    {
        tokio::runtime::Runtime::new()
            .expect("Failed to start tokio runtime")
            .block_on(launch_server());
    }

    #[cfg(not(feature = "server"))]
    {
        dioxus::launch(App);
    }
}

#[cfg(feature = "server")]
async fn launch_server() {
    use axum::routing::get;
    use dioxus::server::{DioxusRouterExt, ServeConfig};
    use tower_sessions::cookie::SameSite;
    use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
    use tracing_subscriber::EnvFilter;

    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Fail at startup rather than on the first sign-in
    let config = api::auth::config().expect("Invalid auth configuration");
    tracing::info!(
        base_url = %config.base_url,
        providers = ?config.enabled_providers(),
        "Auth configured"
    );

    // Session layer configuration
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.base_url.starts_with("https://"))
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(
            config
                .session_max_age
                .try_into()
                .expect("Session max age out of range"),
        ));

    // Build the Dioxus app with custom routes
    let router = axum::Router::new()
        // OAuth providers redirect here
        .route("/api/auth/callback/{provider}", get(oauth_callback))
        .route("/api/auth/signin", get(sign_in_page))
        .route("/avatar.svg", get(avatar))
        // Then serve the Dioxus application
        .serve_dioxus_application(ServeConfig::new(), App)
        // Add session layer to all routes
        .layer(session_layer);

    // Use the address from dx serve or default to localhost:8080
    let addr = dioxus::cli_config::fullstack_address_or_localhost();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind listener");
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router.into_make_service())
        .await
        .expect("Server error");
}

#[cfg(feature = "server")]
const AVATAR_SVG: &str = include_str!("../assets/avatar.svg");

#[cfg(feature = "server")]
async fn avatar() -> impl axum::response::IntoResponse {
    (
        [(axum::http::header::CONTENT_TYPE, "image/svg+xml")],
        AVATAR_SVG,
    )
}

/// The sign-in page lives in the app router.
#[cfg(feature = "server")]
async fn sign_in_page() -> axum::response::Redirect {
    axum::response::Redirect::to("/login")
}

#[cfg(feature = "server")]
async fn oauth_callback(
    axum::extract::Path(provider): axum::extract::Path<String>,
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
    session: tower_sessions::Session,
) -> axum::response::Redirect {
    use api::auth;
    use axum::response::Redirect;

    let config = match auth::config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load auth config: {}", e);
            return Redirect::to(&e.sign_in_error().login_path());
        }
    };

    match auth::complete_oauth_sign_in(config, &provider, &params, &session).await {
        Ok(()) => Redirect::to("/"),
        Err(err) => Redirect::to(&err.login_path()),
    }
}

#[component]
fn App() -> Element {
    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AuthProvider {
            Router::<Route> {}
        }
    }
}
