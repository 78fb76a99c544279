use std::env;

/// Path the external identity provider redirects back to. The full callback
/// URL is always `browser::origin()` + this path, computed at call time.
pub const CALLBACK_PATH: &str = "/auth/callback";

/// Parameter name carrying the one-time code on the inbound redirect.
pub const SESSION_CODE_PARAM: &str = "session_id";

const DEFAULT_AUTH_ORIGIN: &str = "https://auth.emergentagent.com";

/// Backend origin all `/api/*` calls are issued against. Empty means
/// same-origin relative requests.
pub fn backend_url() -> String {
    env::var("BACKEND_URL").unwrap_or_default()
}

/// Origin of the external identity provider handling the login redirect.
pub fn auth_origin() -> String {
    env::var("AUTH_ORIGIN").unwrap_or_else(|_| DEFAULT_AUTH_ORIGIN.to_string())
}
