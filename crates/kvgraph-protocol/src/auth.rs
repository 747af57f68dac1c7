use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// How requests authenticate against the API.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMethod {
    /// HTTP Basic with the API key as user name and an empty password.
    ApiKey(String),
    Bearer(String),
    #[default]
    Anonymous,
}

impl AuthMethod {
    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::ApiKey(_) => "api-key",
            Self::Bearer(_) => "bearer-token",
            Self::Anonymous => "anonymous",
        }
    }

    /// Value for the `Authorization` header, if any.
    pub fn authorization_header(&self) -> Option<String> {
        match self {
            Self::ApiKey(key) => Some(format!("Basic {}", STANDARD.encode(format!("{key}:")))),
            Self::Bearer(token) => Some(format!("Bearer {token}")),
            Self::Anonymous => None,
        }
    }
}
