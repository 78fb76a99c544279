//! Process-wide session store.
//!
//! The identity of the signed-in visitor must be visible to the route guard,
//! the chat header, and the logout path at once. Writes are restricted to
//! two call sites: the auth handshake (`establish`) and logout / handshake
//! failure (`clear`).

use crate::types::UserProfile;
use once_cell::sync::Lazy;
use std::sync::RwLock;

static SESSION: Lazy<RwLock<Option<UserProfile>>> = Lazy::new(|| RwLock::new(None));

/// Record a freshly exchanged identity. Called only by the auth handshake on
/// a successful code exchange.
pub fn establish(profile: UserProfile) {
    let mut guard = SESSION.write().expect("session store poisoned");
    *guard = Some(profile);
}

/// Drop the local identity. Called by logout and by handshake failure.
pub fn clear() {
    let mut guard = SESSION.write().expect("session store poisoned");
    *guard = None;
}

pub fn current() -> Option<UserProfile> {
    SESSION.read().expect("session store poisoned").clone()
}

pub fn is_authenticated() -> bool {
    SESSION.read().expect("session store poisoned").is_some()
}
