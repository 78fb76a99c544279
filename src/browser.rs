//! Access to the live page environment.
//!
//! On wasm this talks to `window.location`; on native targets a
//! process-local stand-in keeps the same surface so the auth flow stays
//! exercisable from ordinary tests.

#[cfg(not(target_arch = "wasm32"))]
use once_cell::sync::Lazy;
#[cfg(not(target_arch = "wasm32"))]
use std::sync::Mutex;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct PageState {
    origin: String,
    fragment: String,
    query: String,
    last_redirect: Option<String>,
}

#[cfg(not(target_arch = "wasm32"))]
static PAGE: Lazy<Mutex<PageState>> = Lazy::new(|| {
    Mutex::new(PageState {
        origin: "http://localhost:3000".to_string(),
        ..PageState::default()
    })
});

/// Scheme + host + port of the current page. Never hard-coded at call sites;
/// the auth callback URL is derived from this value at call time.
#[cfg(target_arch = "wasm32")]
pub fn origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn origin() -> String {
    PAGE.lock().expect("page state poisoned").origin.clone()
}

/// URL fragment without the leading `#`.
#[cfg(target_arch = "wasm32")]
pub fn fragment() -> String {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .map(|hash| hash.trim_start_matches('#').to_string())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn fragment() -> String {
    PAGE.lock().expect("page state poisoned").fragment.clone()
}

/// Query string without the leading `?`.
#[cfg(target_arch = "wasm32")]
pub fn query() -> String {
    web_sys::window()
        .and_then(|w| w.location().search().ok())
        .map(|search| search.trim_start_matches('?').to_string())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn query() -> String {
    PAGE.lock().expect("page state poisoned").query.clone()
}

/// Full-page navigation, leaving the application entirely. Terminal for the
/// current page.
#[cfg(target_arch = "wasm32")]
pub fn redirect(url: &str) {
    if let Some(window) = web_sys::window() {
        let _ = window.location().set_href(url);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn redirect(url: &str) {
    let mut page = PAGE.lock().expect("page state poisoned");
    page.last_redirect = Some(url.to_string());
}

#[cfg(not(target_arch = "wasm32"))]
pub fn set_location(origin: &str, fragment: &str, query: &str) {
    let mut page = PAGE.lock().expect("page state poisoned");
    page.origin = origin.to_string();
    page.fragment = fragment.to_string();
    page.query = query.to_string();
    page.last_redirect = None;
}

#[cfg(not(target_arch = "wasm32"))]
pub fn last_redirect() -> Option<String> {
    PAGE.lock().expect("page state poisoned").last_redirect.clone()
}
