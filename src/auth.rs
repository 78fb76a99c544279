//! Redirect-based login handshake.
//!
//! The external provider sends the browser back to the callback URL with a
//! one-time code under `session_id`, in the URL fragment or the query
//! string. The handler exchanges that code for a server-side session exactly
//! once, even when the hosting environment fires the callback effect twice.

use crate::api::ApiClient;
use crate::browser;
use crate::config;
use crate::session;
use once_cell::sync::Lazy;
use std::sync::Mutex;
use tracing::{error, info, warn};

/// Where the callback screen navigates once the handshake settles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeOutcome {
    ToChat,
    ToLogin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakePhase {
    Idle,
    Exchanging,
    Success,
    Failure,
}

/// One-shot guard for the exchange. The only legal entry is
/// `Idle -> Exchanging`; every later attempt is rejected, which is what
/// makes duplicate callback invocations harmless.
pub struct Handshake {
    phase: Mutex<HandshakePhase>,
}

impl Handshake {
    pub const fn new() -> Self {
        Self {
            phase: Mutex::new(HandshakePhase::Idle),
        }
    }

    /// Attempt the `Idle -> Exchanging` transition. Returns false when the
    /// handshake already started or settled.
    pub fn try_begin(&self) -> bool {
        let mut phase = self.phase.lock().expect("handshake state poisoned");
        if *phase == HandshakePhase::Idle {
            *phase = HandshakePhase::Exchanging;
            true
        } else {
            false
        }
    }

    fn settle(&self, terminal: HandshakePhase) {
        let mut phase = self.phase.lock().expect("handshake state poisoned");
        *phase = terminal;
    }

    pub fn phase(&self) -> HandshakePhase {
        *self.phase.lock().expect("handshake state poisoned")
    }

    /// Return to `Idle`. A real handshake lifetime ends with the page, so
    /// this only matters to tests.
    pub fn reset(&self) {
        self.settle(HandshakePhase::Idle);
    }
}

impl Default for Handshake {
    fn default() -> Self {
        Self::new()
    }
}

static HANDSHAKE: Lazy<Handshake> = Lazy::new(Handshake::new);

pub fn handshake() -> &'static Handshake {
    &HANDSHAKE
}

/// Pull the one-time code out of the redirect URL. The fragment is checked
/// first; the query string is a fallback and never overrides a fragment
/// value.
pub fn extract_session_code(fragment: &str, query: &str) -> Option<String> {
    find_param(fragment, config::SESSION_CODE_PARAM)
        .or_else(|| find_param(query, config::SESSION_CODE_PARAM))
}

fn find_param(pairs: &str, name: &str) -> Option<String> {
    pairs.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        if key != name || value.is_empty() {
            return None;
        }
        let decoded = urlencoding::decode(value)
            .map(|v| v.into_owned())
            .unwrap_or_else(|_| value.to_string());
        Some(decoded)
    })
}

/// Outbound redirect to the identity provider, with the callback URL derived
/// from the live page origin. Never substitutes a fallback origin.
pub fn login_redirect_url() -> String {
    let callback = format!("{}{}", browser::origin(), config::CALLBACK_PATH);
    format!(
        "{}/?redirect={}",
        config::auth_origin(),
        urlencoding::encode(&callback)
    )
}

/// Drive one handshake on the given guard: extract the code, exchange it,
/// populate the session store, and report where to navigate. Returns `None`
/// when the guard rejects the invocation, in which case the caller must do
/// nothing; the invocation that won the guard performs the single terminal
/// navigation.
pub async fn run_handshake(
    guard: &Handshake,
    api: &ApiClient,
    fragment: &str,
    query: &str,
) -> Option<HandshakeOutcome> {
    if !guard.try_begin() {
        return None;
    }

    let code = match extract_session_code(fragment, query) {
        Some(code) => code,
        None => {
            warn!("no session code in callback URL");
            guard.settle(HandshakePhase::Failure);
            return Some(HandshakeOutcome::ToLogin);
        }
    };

    match api.exchange_session(&code).await {
        Ok(profile) => {
            info!(user = %profile.email, "session established");
            session::establish(profile);
            guard.settle(HandshakePhase::Success);
            Some(HandshakeOutcome::ToChat)
        }
        Err(err) => {
            error!("session exchange failed: {err}");
            session::clear();
            guard.settle(HandshakePhase::Failure);
            Some(HandshakeOutcome::ToLogin)
        }
    }
}

/// End the session. The backend call is best-effort: a failed logout still
/// clears the local identity so the user is never stranded signed-in.
pub async fn sign_out(api: &ApiClient) {
    if let Err(err) = api.logout().await {
        warn!("logout call failed: {err}");
    }
    session::clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_from_fragment() {
        assert_eq!(
            extract_session_code("session_id=abc123", ""),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn code_falls_back_to_query() {
        assert_eq!(
            extract_session_code("", "foo=1&session_id=xyz"),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn fragment_wins_over_query() {
        assert_eq!(
            extract_session_code("session_id=frag", "session_id=query"),
            Some("frag".to_string())
        );
    }

    #[test]
    fn missing_or_empty_code_is_none() {
        assert_eq!(extract_session_code("", ""), None);
        assert_eq!(extract_session_code("session_id=", "session_id="), None);
        assert_eq!(extract_session_code("other=1", "foo=bar"), None);
    }

    #[test]
    fn code_is_percent_decoded() {
        assert_eq!(
            extract_session_code("session_id=a%2Bb", ""),
            Some("a+b".to_string())
        );
    }

    #[test]
    fn guard_admits_exactly_once() {
        let guard = Handshake::new();
        assert!(guard.try_begin());
        assert!(!guard.try_begin());
        assert_eq!(guard.phase(), HandshakePhase::Exchanging);

        guard.settle(HandshakePhase::Failure);
        assert!(!guard.try_begin());

        guard.reset();
        assert!(guard.try_begin());
    }
}
