use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Identity of the signed-in visitor, mirrored client-side. The durable
/// session lives server-side behind an HTTP-only cookie.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub picture: Option<String>,
}

impl UserProfile {
    /// Avatar URL with a placeholder when the provider returned none.
    pub fn avatar_url(&self) -> String {
        self.picture
            .clone()
            .unwrap_or_else(|| "https://via.placeholder.com/40".to_string())
    }
}

/// One (user, assistant) turn pair as stored by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user_message: String,
    pub assistant_message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub organization: String,
    pub message: String,
}

impl ContactForm {
    /// Required fields must be non-empty after trimming; organization is
    /// optional.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.message.trim().is_empty()
    }
}

/// Backend language model answering the next message. The backend is the
/// authority on supported identifiers; this enum only covers the ones the
/// selector offers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatModel {
    #[default]
    Gpt4o,
    ClaudeSonnet,
    GeminiFlash,
}

impl ChatModel {
    pub const ALL: [ChatModel; 3] = [
        ChatModel::Gpt4o,
        ChatModel::ClaudeSonnet,
        ChatModel::GeminiFlash,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ChatModel::Gpt4o => "gpt-4o",
            ChatModel::ClaudeSonnet => "claude-3-5-sonnet-20241022",
            ChatModel::GeminiFlash => "gemini-2.0-flash-exp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChatModel::Gpt4o => "GPT-4o",
            ChatModel::ClaudeSonnet => "Claude Sonnet",
            ChatModel::GeminiFlash => "Gemini Flash",
        }
    }

    pub fn from_id(id: &str) -> Option<ChatModel> {
        Self::ALL.iter().copied().find(|model| model.id() == id)
    }
}
