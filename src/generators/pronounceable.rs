//! Pronounceable password generation through a generative-language service.
//!
//! The service is asked for a password of a given length built from common
//! syllables. `PronounceableSource` is the request/response contract;
//! `GeminiClient` binds it to Google's Generative Language API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::config::Config;
use crate::models::CharacterClasses;

#[derive(Debug, Error)]
pub enum PronounceableError {
    #[error("Pronounceable generation is not configured (set GEMINI_API_KEY)")]
    NotConfigured,

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Service returned an empty password")]
    EmptyPassword,
}

pub type Result<T> = std::result::Result<T, PronounceableError>;

/// Wire request: the length plus the four class flags as selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounceableRequest {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
}

impl PronounceableRequest {
    pub fn new(length: usize, classes: CharacterClasses) -> Self {
        Self {
            length,
            uppercase: classes.uppercase,
            lowercase: classes.lowercase,
            numbers: classes.numbers,
            symbols: classes.symbols,
        }
    }

    /// The flags are carried as given, but the service is always asked for
    /// every class.
    pub fn effective_classes(&self) -> CharacterClasses {
        CharacterClasses::all()
    }

    pub fn prompt(&self) -> String {
        let classes = self.effective_classes();
        let yes_no = |enabled: bool| if enabled { "Yes" } else { "No" };

        format!(
            "You are a password generator that creates pronounceable passwords.\n\
             \n\
             Generate a password that is easy to say out loud and to remember, \
             matching these criteria:\n\
             \n\
             Password Length: {}\n\
             Include Uppercase Letters: {}\n\
             Include Lowercase Letters: {}\n\
             Include Numbers: {}\n\
             Include Symbols: {}\n\
             \n\
             Build it from common syllables and avoid awkward letter clusters.\n\
             Return only the password, with no explanation.",
            self.length,
            yes_no(classes.uppercase),
            yes_no(classes.lowercase),
            yes_no(classes.numbers),
            yes_no(classes.symbols),
        )
    }
}

/// Wire response: exactly one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PronounceableResponse {
    pub password: String,
}

#[async_trait]
pub trait PronounceableSource: Send + Sync {
    async fn request(&self, request: &PronounceableRequest) -> Result<String>;
}

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
    client: Client,
}

impl GeminiClient {
    pub fn new(
        api_key: String,
        model: String,
        base_url: String,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            api_key: api_key.trim().to_string(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config
            .gemini_api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or(PronounceableError::NotConfigured)?;

        Self::new(
            api_key,
            config.gemini_model.clone(),
            config.gemini_base_url.clone(),
            config.ai_timeout,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    fn build_body(&self, request: &PronounceableRequest) -> serde_json::Value {
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt() }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "password": { "type": "STRING" }
                    },
                    "required": ["password"]
                }
            }
        })
    }

    fn parse_response(json: &serde_json::Value) -> Result<String> {
        let text = json["candidates"]
            .as_array()
            .and_then(|arr| arr.first())
            .and_then(|c| c["content"]["parts"].as_array())
            .and_then(|parts| parts.first())
            .and_then(|p| p["text"].as_str())
            .ok_or_else(|| PronounceableError::InvalidResponse("Missing content".to_string()))?;

        let response: PronounceableResponse = serde_json::from_str(text.trim())
            .map_err(|e| PronounceableError::InvalidResponse(e.to_string()))?;

        if response.password.trim().is_empty() {
            return Err(PronounceableError::EmptyPassword);
        }

        Ok(response.password)
    }
}

#[async_trait]
impl PronounceableSource for GeminiClient {
    async fn request(&self, request: &PronounceableRequest) -> Result<String> {
        log::debug!("Requesting pronounceable password from {} (length {})", self.model, request.length);

        let resp = self
            .client
            .post(self.endpoint())
            .header("content-type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&self.build_body(request))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(PronounceableError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = resp.json().await?;
        let password = Self::parse_response(&json)?;

        let returned = password.chars().count();
        if returned != request.length {
            log::warn!("Requested {} characters, service returned {}", request.length, returned);
        }

        Ok(password)
    }
}
