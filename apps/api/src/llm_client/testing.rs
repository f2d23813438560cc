//! Scripted in-memory inference service for tests.
//!
//! Replies are matched by substring against the prompt; the first matching rule
//! wins. Unmatched prompts fail like an unreachable service. Every call is
//! recorded so tests can assert how many external calls were issued.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{InferenceRequest, InferenceService, LlmError, ModelTier};

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub system: Option<String>,
    pub had_schema: bool,
    pub temperature: f32,
    pub tier: ModelTier,
}

#[derive(Default)]
pub struct ScriptedInference {
    rules: Vec<(String, Reply)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedInference {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn reply(mut self, prompt_contains: &str, response: impl Into<String>) -> Self {
        self.rules
            .push((prompt_contains.to_string(), Reply::Text(response.into())));
        self
    }

    pub fn fail_on(mut self, prompt_contains: &str) -> Self {
        self.rules.push((prompt_contains.to_string(), Reply::Fail));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl InferenceService for ScriptedInference {
    async fn generate(&self, request: &InferenceRequest<'_>) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: request.prompt.to_string(),
            system: request.system.map(String::from),
            had_schema: request.schema.is_some(),
            temperature: request.temperature,
            tier: request.tier,
        });

        let reply = self
            .rules
            .iter()
            .find(|(needle, _)| request.prompt.contains(needle.as_str()))
            .map(|(_, reply)| reply.clone());

        match reply {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail) | None => Err(LlmError::Api {
                status: 503,
                message: "scripted inference failure".to_string(),
            }),
        }
    }
}
