//! Client for the hosted generative-language service.
//!
//! Two storefront features sit on this API: marketing-description
//! generation for the admin panel, and the "SoleBot" shopping-assistant
//! chat. Both resolve to a plain string in every case — a fallback when no
//! key is configured or the call fails — so no error ever escapes to the
//! caller. The assistant persona is fixed here, at configuration time.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Model used for both description generation and chat.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

pub const DESCRIPTION_KEY_MISSING: &str = "AI description unavailable (Missing API Key).";
pub const DESCRIPTION_FAILED: &str = "Error generating description.";
pub const CHAT_KEY_MISSING: &str = "Chat unavailable (Missing API Key).";
pub const CHAT_FAILED: &str =
    "Sorry, I'm having trouble connecting to the sneaker verse right now.";

const STYLIST_PERSONA: &str = "You are 'SoleBot', a helpful and trendy sneaker stylist \
for Walkin.it. You help users find the perfect shoes based on their outfit, occasion, \
or weather. Keep answers short, fun, and use emojis.";

/// Internal failure modes; callers only ever see fallback strings.
#[derive(Debug, Error)]
pub enum StylistError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("generation API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("unusable generation response: {0}")]
    Parse(String),

    #[error("invalid assistant configuration: {0}")]
    Config(String),
}

/// One turn of assistant conversation history.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// Client for the generative-language API.
///
/// Built with `api_key: None` the client is a stub that answers with the
/// fixed unavailability strings, mirroring a deployment without the key.
#[derive(Clone)]
pub struct StylistClient {
    client: Client,
    base_url: Url,
    model: String,
    api_key: Option<String>,
}

impl StylistClient {
    /// Creates a client against the production endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`StylistError::Http`] if the HTTP client cannot be built.
    pub fn new(api_key: Option<String>, model: impl Into<String>) -> Result<Self, StylistError> {
        Self::with_base_url(api_key, model, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`StylistError::Config`] for an unparseable base URL,
    /// [`StylistError::Http`] if the HTTP client cannot be built.
    pub fn with_base_url(
        api_key: Option<String>,
        model: impl Into<String>,
        base_url: &str,
    ) -> Result<Self, StylistError> {
        let client = Client::builder().build()?;
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| StylistError::Config(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            base_url,
            model: model.into(),
            api_key,
        })
    }

    /// Short marketing description for a product, from its name and a
    /// free-text feature list. Always resolves to a usable string.
    pub async fn generate_description(&self, name: &str, features: &str) -> String {
        let Some(key) = self.api_key.clone() else {
            return DESCRIPTION_KEY_MISSING.to_string();
        };
        let prompt = format!(
            "Write a punchy, 2-sentence marketing description for a sneaker named \
\"{name}\". Key features: {features}. Tone: Urban, energetic."
        );
        let request = GenerateRequest {
            system_instruction: None,
            contents: vec![Content::user(prompt)],
        };
        match self.generate(&key, &request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, product = name, "description generation failed");
                DESCRIPTION_FAILED.to_string()
            }
        }
    }

    /// Assistant reply to `message`, given the prior conversation in order.
    /// Always resolves to a usable string.
    pub async fn chat(&self, history: &[ChatTurn], message: &str) -> String {
        let Some(key) = self.api_key.clone() else {
            return CHAT_KEY_MISSING.to_string();
        };
        let mut contents: Vec<Content> = history.iter().map(Content::from_turn).collect();
        contents.push(Content::user(message.to_string()));
        let request = GenerateRequest {
            system_instruction: Some(Content::system(STYLIST_PERSONA)),
            contents,
        };
        match self.generate(&key, &request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(error = %e, "assistant chat failed");
                CHAT_FAILED.to_string()
            }
        }
    }

    async fn generate(
        &self,
        api_key: &str,
        request: &GenerateRequest,
    ) -> Result<String, StylistError> {
        let mut url = self
            .base_url
            .join(&format!("v1beta/models/{}:generateContent", self.model))
            .map_err(|e| StylistError::Config(format!("invalid model path: {e}")))?;
        url.query_pairs_mut().append_pair("key", api_key);

        let response = self.client.post(url).json(request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StylistError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await?;
        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .and_then(|p| p.text)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| StylistError::Parse("response carried no text".to_string()))
    }
}

// generateContent request/response envelope

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    parts: Vec<Part>,
}

impl Content {
    fn user(text: String) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text }],
        }
    }

    fn system(text: &str) -> Self {
        Self {
            role: None,
            parts: vec![Part {
                text: text.to_string(),
            }],
        }
    }

    fn from_turn(turn: &ChatTurn) -> Self {
        let role = match turn.role {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        };
        Self {
            role: Some(role.to_string()),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}
