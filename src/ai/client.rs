use http::StatusCode;
use reqwest::Client;
use serde_json::{json, Value};
use url::Url;
use std::fmt;
use std::time::Duration;

use crate::error::ApiError;

/// Model identifiers tried in order for every credential, newest first.
pub const GEMINI_MODELS: [&str; 4] = [
    "gemini-2.0-flash-exp",
    "gemini-1.5-flash",
    "gemini-1.5-pro",
    "gemini-pro",
];

/// Sampling options sent with every generateContent call.
#[derive(Debug, Clone, Copy)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub top_p: f32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        GenerationOptions {
            temperature: 0.8,
            max_output_tokens: 1024,
            top_p: 0.9,
        }
    }
}

/// One failed generation attempt. Never reaches an HTTP caller; the
/// resolver retries the next model or key, then falls back.
#[derive(Debug)]
pub enum GenerationError {
    Unreachable(String),
    Api { status: StatusCode, body: String },
    EmptyResponse,
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::Unreachable(e) => write!(f, "Gemini unreachable: {}", e),
            GenerationError::Api { status, body } => {
                write!(f, "Gemini API error {}: {}", status, body)
            }
            GenerationError::EmptyResponse => write!(f, "Gemini returned an empty response"),
        }
    }
}

impl std::error::Error for GenerationError {}

const REVOKED_MARKERS: [&str; 4] = [
    "permission",
    "leaked",
    "unauthorized",
    "api key not valid",
];

impl GenerationError {
    /// Best-effort guess that the key itself was rejected. Only used to
    /// skip the slot for the rest of the process; the rotation advances on
    /// any failure either way, so a wrong guess costs nothing.
    pub fn looks_revoked(&self) -> bool {
        match self {
            GenerationError::Api { status, body } => {
                if *status == StatusCode::UNAUTHORIZED || *status == StatusCode::FORBIDDEN {
                    return true;
                }
                let lowered = body.to_lowercase();
                REVOKED_MARKERS.iter().any(|marker| lowered.contains(marker))
            }
            _ => false,
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
}

impl GeminiClient {
    pub fn new(http: Client, base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ApiError::Internal("Invalid Gemini base URL".into()))?;
        Ok(GeminiClient {
            http,
            base_url,
            timeout,
        })
    }

    pub async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, GenerationError> {
        let mut url = self.base_url.clone();
        let action = format!("{}:generateContent", model);
        url.path_segments_mut()
            .map_err(|_| GenerationError::Unreachable("Gemini base URL cannot take a path".into()))?
            .pop_if_empty()
            .extend(["v1beta", "models", action.as_str()]);

        let body = json!({
            "contents": [ { "parts": [ { "text": prompt } ] } ],
            "generationConfig": {
                "temperature": options.temperature,
                "maxOutputTokens": options.max_output_tokens,
                "topP": options.top_p,
            }
        });

        let resp = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Unreachable(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| GenerationError::Unreachable(e.to_string()))?;

        if !status.is_success() {
            return Err(GenerationError::Api { status, body: text });
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|e| GenerationError::Unreachable(format!("Invalid Gemini response: {}", e)))?;

        let reply = extract_text(&payload);
        if reply.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(reply)
    }
}

/// Concatenates `candidates[0].content.parts[*].text`.
fn extract_text(payload: &Value) -> String {
    let mut out = String::new();
    if let Some(parts) = payload
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
    {
        for part in parts {
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                out.push_str(text);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_candidate_parts() {
        let payload = json!({
            "candidates": [
                { "content": { "parts": [ { "text": "Привет" }, { "text": ", друг!" } ] } }
            ]
        });
        assert_eq!(extract_text(&payload), "Привет, друг!");
    }

    #[test]
    fn missing_candidates_yield_empty_text() {
        assert_eq!(extract_text(&json!({})), "");
        assert_eq!(extract_text(&json!({ "candidates": [] })), "");
        assert_eq!(
            extract_text(&json!({ "candidates": [ { "content": {} } ] })),
            ""
        );
    }

    #[test]
    fn unauthorized_statuses_look_revoked() {
        let err = GenerationError::Api {
            status: StatusCode::FORBIDDEN,
            body: "{}".to_string(),
        };
        assert!(err.looks_revoked());

        let err = GenerationError::Api {
            status: StatusCode::UNAUTHORIZED,
            body: "{}".to_string(),
        };
        assert!(err.looks_revoked());
    }

    #[test]
    fn revocation_markers_in_body_look_revoked() {
        let err = GenerationError::Api {
            status: StatusCode::BAD_REQUEST,
            body: "API key not valid. Please pass a valid API key.".to_string(),
        };
        assert!(err.looks_revoked());

        let err = GenerationError::Api {
            status: StatusCode::TOO_MANY_REQUESTS,
            body: "quota exceeded".to_string(),
        };
        assert!(!err.looks_revoked());
    }

    #[test]
    fn transport_errors_do_not_look_revoked() {
        let err = GenerationError::Unreachable("connection refused".to_string());
        assert!(!err.looks_revoked());
        assert!(!GenerationError::EmptyResponse.looks_revoked());
    }
}
