use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::ai::client::{GeminiClient, GenerationOptions, GEMINI_MODELS};
use crate::ai::fallback::{fallback_reply, mood_fallback_insight};
use crate::ai::prompt::{build_chat_prompt, build_mood_prompt, cap_context};
use crate::ai::rotation::KeyRotation;
use crate::models::models::ContextMessage;

/// Where the reply text came from. Callers persist generated and fallback
/// replies alike, but tests and logs care about the difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Generated,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub text: String,
    pub source: ResolutionSource,
}

/// Best-effort reply pipeline: one pass over the credential slots, every
/// model under each slot, then the deterministic fallback. Never errors;
/// every input resolves to a non-empty reply.
#[derive(Clone)]
pub struct LunaResolver {
    client: GeminiClient,
    rotation: Arc<KeyRotation>,
    enabled: bool,
    options: GenerationOptions,
}

impl LunaResolver {
    pub fn new(client: GeminiClient, rotation: Arc<KeyRotation>, enabled: bool) -> Self {
        LunaResolver {
            client,
            rotation,
            enabled,
            options: GenerationOptions::default(),
        }
    }

    /// False when disabled at startup or every slot is blank or revoked.
    pub fn is_enabled(&self) -> bool {
        self.enabled && self.rotation.has_usable_key()
    }

    /// Chat reply. `context` is oldest-first; `window` caps how many of the
    /// most recent turns enter the prompt (15 authenticated, 6 guest).
    pub async fn resolve_chat(
        &self,
        message: &str,
        context: &[ContextMessage],
        window: usize,
    ) -> Resolution {
        let prompt = build_chat_prompt(cap_context(context, window), message);
        self.resolve(&prompt, || fallback_reply(message).to_string())
            .await
    }

    /// Mood-diary insight. No chat history enters the prompt and nothing is
    /// persisted here; the entry row carries the result.
    pub async fn resolve_mood_insight(&self, mood: i32, note: Option<&str>) -> Resolution {
        let prompt = build_mood_prompt(mood, note);
        self.resolve(&prompt, || mood_fallback_insight(mood).to_string())
            .await
    }

    async fn resolve(&self, prompt: &str, fallback: impl Fn() -> String) -> Resolution {
        if !self.enabled {
            return Resolution {
                text: fallback(),
                source: ResolutionSource::Fallback,
            };
        }

        // One pass over the slots. Blank and revoked slots consume an
        // iteration without a network call, like the attempt budget they are.
        for _ in 0..self.rotation.slot_count() {
            let credential = self.rotation.current();
            if credential.key.is_empty() || self.rotation.is_revoked(credential.index) {
                self.rotation.advance();
                continue;
            }

            let mut last_error = None;
            for model in GEMINI_MODELS {
                match self
                    .client
                    .generate(&credential.key, model, prompt, &self.options)
                    .await
                {
                    Ok(text) => {
                        debug!(model, key_index = credential.index, "Gemini reply received");
                        return Resolution {
                            text: text.trim().to_string(),
                            source: ResolutionSource::Generated,
                        };
                    }
                    Err(e) => {
                        debug!(model, key_index = credential.index, "Model failed: {}", e);
                        last_error = Some(e);
                    }
                }
            }

            if let Some(error) = last_error {
                if error.looks_revoked() {
                    warn!(
                        key_index = credential.index,
                        "API key looks revoked, skipping it for this process: {}", error
                    );
                    self.rotation.mark_revoked(credential.index);
                } else {
                    warn!(
                        key_index = credential.index,
                        "All models failed under this key: {}", error
                    );
                }
            }
            self.rotation.advance();
        }

        info!("Remote generation exhausted, answering from the fallback table");
        Resolution {
            text: fallback(),
            source: ResolutionSource::Fallback,
        }
    }
}
