use crate::api::{ApiClient, ApiError};
use crate::auth;
use crate::chat::ChatState;
use crate::session;
use crate::types::{ChatModel, Role, UserProfile};
use crate::ui::Route;
use dioxus::events::Key;
use dioxus::prelude::*;
use tracing::{error, warn};

fn backend() -> Result<ApiClient, ApiError> {
    ApiClient::from_env().map_err(|err| ApiError::Transport(err.to_string()))
}

#[component]
pub fn ChatPage() -> Element {
    let nav = use_navigator();
    let mut state = use_signal(ChatState::new);
    let profile = use_memo(session::current);

    // Hydrate the transcript and load suggestions on mount. The two loads
    // are independent; neither blocks the other, and either failing leaves
    // the chat usable.
    use_effect(move || {
        spawn(async move {
            let entries = match backend() {
                Ok(api) => api.fetch_history().await.unwrap_or_else(|err| {
                    warn!("failed to load history: {err}");
                    Vec::new()
                }),
                Err(err) => {
                    error!("backend client unavailable: {err}");
                    Vec::new()
                }
            };
            state.with_mut(|s| s.hydrate(entries));
        });
        spawn(async move {
            if let Ok(api) = backend() {
                match api.fetch_suggestions().await {
                    Ok(list) => state.with_mut(|s| s.suggestions_loaded(list)),
                    Err(err) => warn!("failed to load suggestions: {err}"),
                }
            }
        });
    });

    let mut send_message = move |text: String| {
        // begin_send enforces the blank-input and single-pending gates; a
        // rejected send issues no call and touches nothing.
        let Some(wire) = state.with_mut(|s| s.begin_send(&text)) else {
            return;
        };
        let model = state.with(|s| s.model);
        spawn(async move {
            let reply = match backend() {
                Ok(api) => api.send_message(&wire, model).await,
                Err(err) => Err(err),
            };
            state.with_mut(|s| s.complete_send(reply));
        });
    };

    let confirm_clear = move |_| {
        spawn(async move {
            let cleared = match backend() {
                Ok(api) => api.clear_history().await,
                Err(err) => Err(err),
            };
            match cleared {
                Ok(()) => state.with_mut(|s| s.history_cleared()),
                Err(err) => {
                    warn!("failed to clear history: {err}");
                    state.with_mut(|s| s.clear_failed());
                }
            }
        });
    };

    let logout = move |_| {
        spawn(async move {
            // Best-effort server call; local state always ends cleared and
            // the user always lands on the login screen.
            match backend() {
                Ok(api) => auth::sign_out(&api).await,
                Err(err) => {
                    warn!("backend client unavailable during logout: {err}");
                    session::clear();
                }
            }
            nav.push(Route::Login {});
        });
    };

    let snapshot = state();

    rsx! {
        div { class: "chat-page",
            ChatHeader {
                profile: profile(),
                model: snapshot.model,
                on_model_change: move |model| state.with_mut(|s| s.select_model(model)),
                on_logout: logout,
            }

            div { class: "chat-body",
                div { class: "chat-list",
                    if snapshot.is_empty() && snapshot.show_suggestions {
                        WelcomePanel {
                            suggestions: snapshot.suggestions.clone(),
                            on_pick: move |text: String| send_message(text),
                        }
                    }

                    for msg in snapshot.messages.iter() {
                        div { class: format_args!(
                                "message-row {}",
                                match msg.role { Role::User => "user", Role::Assistant => "assistant" },
                            ),
                            div { class: format_args!(
                                    "bubble {}",
                                    match msg.role { Role::User => "user", Role::Assistant => "assistant" },
                                ),
                                if matches!(msg.role, Role::Assistant) {
                                    div { class: "bubble-label", "🤖 AtmosAether AI" }
                                }
                                p { class: "bubble-content", "{msg.content}" }
                            }
                        }
                    }

                    if snapshot.pending {
                        div { class: "message-row assistant",
                            div { class: "bubble assistant thinking", "Thinking..." }
                        }
                    }
                }

                div { class: "composer",
                    if !snapshot.is_empty() {
                        if snapshot.confirm_clear {
                            div { class: "clear-confirm",
                                span { "Clear your chat history?" }
                                button { class: "btn btn-danger",
                                    onclick: confirm_clear,
                                    "Yes, clear"
                                }
                                button { class: "btn",
                                    onclick: move |_| state.with_mut(|s| s.cancel_clear()),
                                    "Cancel"
                                }
                            }
                        } else {
                            button { class: "clear-history-link",
                                onclick: move |_| state.with_mut(|s| s.request_clear()),
                                "🗑️ Clear History"
                            }
                        }
                    }

                    div { class: "composer-row",
                        input {
                            class: "chat-input",
                            r#type: "text",
                            placeholder: "Ask me about AtmosAether technology...",
                            value: "{snapshot.input}",
                            disabled: snapshot.pending,
                            oninput: move |ev| state.with_mut(|s| s.input = ev.value()),
                            onkeydown: move |ev| {
                                if ev.key() == Key::Enter {
                                    let text = state.with(|s| s.input.clone());
                                    send_message(text);
                                }
                            },
                        }
                        button { class: "btn btn-primary",
                            disabled: snapshot.pending || snapshot.input.trim().is_empty(),
                            onclick: move |_| {
                                let text = state.with(|s| s.input.clone());
                                send_message(text);
                            },
                            "Send"
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ChatHeader(
    profile: Option<UserProfile>,
    model: ChatModel,
    on_model_change: EventHandler<ChatModel>,
    on_logout: EventHandler<MouseEvent>,
) -> Element {
    rsx! {
        header { class: "chat-header",
            div { class: "chat-header-brand",
                Link { class: "brand-link", to: Route::Home {}, "🌪️ AtmosAether" }
                span { class: "brand-divider", "|" }
                span { class: "brand-caption", "AI Assistant" }
            }
            div { class: "chat-header-controls",
                select { class: "model-select",
                    value: model.id(),
                    onchange: move |ev| {
                        if let Some(picked) = ChatModel::from_id(&ev.value()) {
                            on_model_change.call(picked);
                        }
                    },
                    for option in ChatModel::ALL {
                        option { value: option.id(), selected: option == model, "{option.label()}" }
                    }
                }
                if let Some(user) = profile {
                    div { class: "user-menu",
                        img { class: "user-avatar", src: user.avatar_url(), alt: "{user.name}" }
                        div { class: "user-ident",
                            p { class: "user-name", "{user.name}" }
                            p { class: "user-email", "{user.email}" }
                        }
                    }
                }
                button { class: "btn btn-logout", title: "Logout",
                    onclick: move |ev| on_logout.call(ev),
                    "Logout"
                }
            }
        }
    }
}

#[component]
fn SuggestionCard(text: String, on_pick: EventHandler<String>) -> Element {
    let payload = text.clone();
    rsx! {
        button { class: "suggestion-card",
            onclick: move |_| on_pick.call(payload.clone()),
            span { class: "suggestion-prefix", "Q: " }
            "{text}"
        }
    }
}

#[component]
fn WelcomePanel(suggestions: Vec<String>, on_pick: EventHandler<String>) -> Element {
    rsx! {
        div { class: "welcome-panel",
            div { class: "welcome-icon", "🤖" }
            h2 { class: "welcome-title", "Welcome to AtmosAether AI Assistant" }
            p { class: "welcome-subtitle",
                "Ask me anything about our atmospheric purification technology!"
            }
            div { class: "suggestion-grid",
                for suggestion in suggestions.iter() {
                    SuggestionCard { text: suggestion.clone(), on_pick }
                }
            }
        }
    }
}
