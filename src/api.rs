use crate::config;
use crate::types::{ChatModel, ContactForm, HistoryEntry, UserProfile};
use anyhow::Result;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("backend rejected the request")]
    Rejected,
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Malformed(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Client for the AtmosAether backend. Session-bearing endpoints rely on the
/// HTTP-only cookie set by the exchange call; on web builds every request
/// opts into sending credentials.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    /// Client pointed at the configured backend origin, falling back to the
    /// page origin when `BACKEND_URL` is unset.
    pub fn from_env() -> Result<Self> {
        let mut base = config::backend_url();
        if base.is_empty() {
            base = crate::browser::origin();
        }
        if base.is_empty() {
            anyhow::bail!("BACKEND_URL is not set and the page origin is unavailable");
        }
        Ok(Self::new(base))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Exchange a one-time session code for an identity payload. The backend
    /// sets the durable session cookie on success.
    pub async fn exchange_session(&self, code: &str) -> ApiResult<UserProfile> {
        #[derive(Serialize)]
        struct ExchangeRequest<'a> {
            session_id: &'a str,
        }

        #[derive(Deserialize)]
        struct ExchangeResponse {
            success: bool,
            #[serde(default)]
            user: Option<UserProfile>,
        }

        let req = self
            .http
            .post(self.url("/api/auth/session"))
            .json(&ExchangeRequest { session_id: code });
        let body = send_checked(req).await?;

        let parsed: ExchangeResponse = serde_json::from_str(&body)?;
        match parsed {
            ExchangeResponse {
                success: true,
                user: Some(user),
            } => Ok(user),
            ExchangeResponse { success: true, .. } => {
                Err(ApiError::Malformed("exchange succeeded without a user".into()))
            }
            _ => Err(ApiError::Rejected),
        }
    }

    /// Prior (user, assistant) pairs for the current session, oldest first.
    pub async fn fetch_history(&self) -> ApiResult<Vec<HistoryEntry>> {
        #[derive(Deserialize)]
        struct HistoryResponse {
            success: bool,
            #[serde(default)]
            history: Vec<HistoryEntry>,
        }

        let body = send_checked(self.http.get(self.url("/api/chat/history"))).await?;
        let parsed: HistoryResponse = serde_json::from_str(&body)?;
        if parsed.success {
            Ok(parsed.history)
        } else {
            Err(ApiError::Rejected)
        }
    }

    /// First-time guidance prompts. No auth required.
    pub async fn fetch_suggestions(&self) -> ApiResult<Vec<String>> {
        #[derive(Deserialize)]
        struct SuggestionsResponse {
            success: bool,
            #[serde(default)]
            suggestions: Vec<String>,
        }

        let body = send_checked(self.http.get(self.url("/api/suggested-questions"))).await?;
        let parsed: SuggestionsResponse = serde_json::from_str(&body)?;
        if parsed.success {
            Ok(parsed.suggestions)
        } else {
            Err(ApiError::Rejected)
        }
    }

    /// One chat turn against the selected model; returns the assistant reply.
    pub async fn send_message(&self, message: &str, model: ChatModel) -> ApiResult<String> {
        #[derive(Serialize)]
        struct ChatRequest<'a> {
            message: &'a str,
            model: &'a str,
        }

        #[derive(Deserialize)]
        struct ChatResponse {
            success: bool,
            #[serde(default)]
            message: String,
        }

        let req = self.http.post(self.url("/api/chat")).json(&ChatRequest {
            message,
            model: model.id(),
        });
        let body = send_checked(req).await?;

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        if parsed.success {
            Ok(parsed.message)
        } else {
            Err(ApiError::Rejected)
        }
    }

    pub async fn clear_history(&self) -> ApiResult<()> {
        send_checked(self.http.delete(self.url("/api/chat/history"))).await?;
        Ok(())
    }

    /// Ends the server-side session. Callers treat failure the same as
    /// success; local state is cleared either way.
    pub async fn logout(&self) -> ApiResult<()> {
        let req = self
            .http
            .post(self.url("/api/auth/logout"))
            .json(&serde_json::json!({}));
        send_checked(req).await?;
        Ok(())
    }

    /// Fire-and-forget contact inquiry; returns the backend's banner message.
    pub async fn submit_contact(&self, form: &ContactForm) -> ApiResult<String> {
        #[derive(Deserialize)]
        struct ContactResponse {
            message: String,
        }

        let req = self.http.post(self.url("/api/contact")).json(form);
        let body = send_checked(req).await?;
        let parsed: ContactResponse = serde_json::from_str(&body)?;
        Ok(parsed.message)
    }
}

/// Issue a request and collapse transport and HTTP-status failures into
/// `ApiError`, returning the raw body for the caller to parse.
async fn send_checked(req: reqwest::RequestBuilder) -> ApiResult<String> {
    let req = with_credentials(req);
    let res = req.send().await.map_err(ApiError::from)?;
    let status = res.status();
    let body = res.text().await.map_err(ApiError::from)?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(target_arch = "wasm32")]
fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    req.fetch_credentials_include()
}

#[cfg(not(target_arch = "wasm32"))]
fn with_credentials(req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    req
}
