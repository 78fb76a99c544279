//! AtmosAether marketing site and AI assistant client.
//!
//! Domain logic (session store, auth handshake, chat controller state,
//! backend API client) lives in flat modules and is exercised directly by
//! tests; `ui` and `views` put a Dioxus front on top of it.

pub mod api;
pub mod auth;
pub mod browser;
pub mod chat;
pub mod config;
pub mod session;
pub mod types;
pub mod ui;
pub mod views;
