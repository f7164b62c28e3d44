use serde::{Deserialize, Serialize};

/// Body of `POST /simplify`. A missing or `null` `text` counts as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SimplifyRequest {
    #[serde(default)]
    pub text: Option<String>,
}

impl SimplifyRequest {
    pub fn medical_text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimplifyResponse {
    pub simplified_text: String,
}
