use crate::auth;
use crate::browser;
use crate::ui::Route;
use dioxus::prelude::*;

/// Login entry point. The button hands the browser to the external identity
/// provider with a callback URL computed from the live page origin; nothing
/// renders after that redirect fires.
#[component]
pub fn LoginPage() -> Element {
    let start_login = move |_| {
        browser::redirect(&auth::login_redirect_url());
    };

    rsx! {
        div { class: "auth-screen",
            div { class: "auth-card",
                div { class: "auth-logo", "🌪️" }
                h1 { class: "auth-title", "Welcome to AtmosAether" }
                p { class: "auth-subtitle",
                    "Sign in to chat with our AI agent and explore atmospheric purification technology"
                }
                button { class: "btn btn-login", onclick: start_login,
                    "Continue with Google"
                }
                ul { class: "auth-feature-list",
                    li { "Ask questions about AtmosAether technology" }
                    li { "Choose from multiple AI models" }
                    li { "Access your chat history anytime" }
                }
            }
            Link { class: "auth-back-link", to: Route::Home {}, "← Back to Home" }
        }
    }
}
