use crate::api::ApiClient;
use crate::auth::{self, HandshakeOutcome};
use crate::browser;
use crate::ui::Route;
use dioxus::prelude::*;
use tracing::error;

/// Landing screen for the provider redirect. One effect drives the code
/// exchange; the handshake guard absorbs double-fired mounts, so at most one
/// exchange call and one navigation happen per page load.
#[component]
pub fn AuthCallbackPage() -> Element {
    let nav = use_navigator();

    use_effect(move || {
        spawn(async move {
            let api = match ApiClient::from_env() {
                Ok(api) => api,
                Err(err) => {
                    error!("backend client unavailable: {err}");
                    nav.replace(Route::Login {});
                    return;
                }
            };

            let outcome = auth::run_handshake(
                auth::handshake(),
                &api,
                &browser::fragment(),
                &browser::query(),
            )
            .await;

            match outcome {
                Some(HandshakeOutcome::ToChat) => {
                    // Replace the callback entry so back-navigation never
                    // lands on a spent code.
                    nav.replace(Route::Chat {});
                }
                Some(HandshakeOutcome::ToLogin) => {
                    nav.replace(Route::Login {});
                }
                // Another invocation owns the handshake and will navigate.
                None => {}
            }
        });
    });

    rsx! {
        div { class: "auth-screen",
            div { class: "auth-card",
                div { class: "spinner" }
                p { class: "auth-subtitle", "Authenticating..." }
            }
        }
    }
}
