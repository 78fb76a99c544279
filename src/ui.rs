use crate::session;
use crate::views::{AuthCallbackPage, ChatPage, HomePage, LoginPage};
use dioxus::prelude::*;

const MAIN_CSS: Asset = asset!("/assets/main.css");

#[derive(Clone, Debug, PartialEq, Routable)]
pub enum Route {
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/auth/callback")]
    AuthCallback {},
    #[route("/chat")]
    Chat {},
}

#[component]
pub fn App() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }
        Router::<Route> {}
    }
}

#[component]
fn Home() -> Element {
    rsx! {
        HomePage {}
    }
}

#[component]
fn Login() -> Element {
    rsx! {
        LoginPage {}
    }
}

#[component]
fn AuthCallback() -> Element {
    rsx! {
        AuthCallbackPage {}
    }
}

#[component]
fn Chat() -> Element {
    rsx! {
        RequireSession {
            ChatPage {}
        }
    }
}

/// Gate around protected routes. Renders nothing until the session store
/// holds an identity; unauthenticated visitors are sent to the login entry
/// point without any protected content flashing first.
#[component]
fn RequireSession(children: Element) -> Element {
    let nav = use_navigator();
    let authed = session::is_authenticated();

    use_effect(move || {
        if !session::is_authenticated() {
            nav.replace(Route::Login {});
        }
    });

    if authed {
        rsx! {
            {children}
        }
    } else {
        rsx! {}
    }
}
