use crate::api::ApiClient;
use crate::types::ContactForm;
use crate::ui::Route;
use dioxus::prelude::*;
use tracing::warn;

const CONTACT_FAILURE_NOTICE: &str = "Failed to submit. Please try again.";

#[derive(Clone, Debug, PartialEq)]
enum FormStatus {
    Idle,
    Success(String),
    Error(String),
}

#[component]
pub fn HomePage() -> Element {
    rsx! {
        div { class: "home-page",
            nav { class: "home-nav",
                span { class: "brand-link", "🌪️ AtmosAether" }
                Link { class: "btn btn-primary", to: Route::Login {}, "Sign In" }
            }

            section { class: "hero",
                h1 { class: "hero-title", "Breathe the City Back to Life" }
                p { class: "hero-subtitle",
                    "AtmosAether turns urban towers into atmospheric purification engines, "
                    "pulling particulates and CO₂ from the air your city breathes."
                }
            }

            section { class: "home-section",
                h2 { "The Technology" }
                p {
                    "Vortex-driven intake columns feed a cascade of electrostatic and "
                    "catalytic stages, returning clean air at street level while captured "
                    "carbon is mineralized on site."
                }
            }

            section { class: "home-section",
                h2 { "Impact" }
                p {
                    "A single AtmosAether installation services forty city blocks, and "
                    "every unit reports live air-quality telemetry to the municipal grid."
                }
            }

            ContactSection {}
            FloatingChatButton {}
        }
    }
}

/// Fire-and-forget inquiry form. Required fields are checked client-side;
/// one backend call per submit, success banner from the backend, fixed
/// failure banner otherwise.
#[component]
fn ContactSection() -> Element {
    let mut form = use_signal(ContactForm::default);
    let mut status = use_signal(|| FormStatus::Idle);
    let mut submitting = use_signal(|| false);

    let submit = move |_| {
        if submitting() {
            return;
        }
        let current = form();
        if !current.is_valid() {
            status.set(FormStatus::Error(
                "Please fill in your name, email, and message.".to_string(),
            ));
            return;
        }

        submitting.set(true);
        status.set(FormStatus::Idle);
        spawn(async move {
            let outcome = match ApiClient::from_env() {
                Ok(api) => api.submit_contact(&current).await,
                Err(err) => {
                    warn!("backend client unavailable: {err}");
                    Err(crate::api::ApiError::Transport(err.to_string()))
                }
            };
            match outcome {
                Ok(message) => {
                    form.set(ContactForm::default());
                    status.set(FormStatus::Success(message));
                }
                Err(err) => {
                    warn!("contact submission failed: {err}");
                    status.set(FormStatus::Error(CONTACT_FAILURE_NOTICE.to_string()));
                }
            }
            submitting.set(false);
        });
    };

    rsx! {
        section { class: "home-section contact-section",
            h2 { "Get In Touch" }
            p {
                "Whether you're an investor, researcher, or municipal leader, we'd "
                "love to hear from you."
            }

            {match status() {
                FormStatus::Success(message) => rsx! {
                    div { class: "banner banner-success", "{message}" }
                },
                FormStatus::Error(message) => rsx! {
                    div { class: "banner banner-error", "{message}" }
                },
                FormStatus::Idle => rsx! {},
            }}

            div { class: "contact-form",
                input {
                    class: "form-field",
                    placeholder: "Your full name",
                    value: "{form().name}",
                    oninput: move |ev| form.with_mut(|f| f.name = ev.value()),
                }
                input {
                    class: "form-field",
                    r#type: "email",
                    placeholder: "your.email@example.com",
                    value: "{form().email}",
                    oninput: move |ev| form.with_mut(|f| f.email = ev.value()),
                }
                input {
                    class: "form-field",
                    placeholder: "Organization (optional)",
                    value: "{form().organization}",
                    oninput: move |ev| form.with_mut(|f| f.organization = ev.value()),
                }
                textarea {
                    class: "form-field",
                    rows: "4",
                    placeholder: "Your message",
                    value: "{form().message}",
                    oninput: move |ev| form.with_mut(|f| f.message = ev.value()),
                }
                button { class: "btn btn-primary",
                    disabled: submitting(),
                    onclick: submit,
                    if submitting() { "Sending..." } else { "Send Message" }
                }
            }
        }
    }
}

#[component]
fn FloatingChatButton() -> Element {
    let nav = use_navigator();
    rsx! {
        button { class: "floating-chat-button", title: "Chat with AI Assistant",
            onclick: move |_| { nav.push(Route::Login {}); },
            "💬"
        }
    }
}
