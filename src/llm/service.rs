//! Question answering business function.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::sync::Arc;

use super::client::{ChatCompletion, ChatMessage};
use super::prompt::{load_system_prompt, DEFAULT_SYSTEM};
use crate::envelope::Envelope;
use crate::Result;

/// Message returned with a successful answer.
pub const ANSWERED_MESSAGE: &str = "Successfully answered question!";

/// Payload of a successful answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerData {
    pub answer: String,
}

/// Answers a question with a language model.
///
/// A failing model call comes back as an `err` envelope; only problems
/// preparing the call are returned as `Err`.
#[async_trait]
pub trait QuestionService: Send + Sync {
    async fn answer_question(
        &self,
        question: &str,
        params: &Map<String, Value>,
    ) -> Result<Envelope<AnswerData>>;
}

/// [`QuestionService`] that prefixes the question with the default system prompt.
pub struct LlmService {
    chat: Arc<dyn ChatCompletion>,
    prompts_dir: PathBuf,
}

impl LlmService {
    pub fn new(chat: Arc<dyn ChatCompletion>, prompts_dir: impl Into<PathBuf>) -> Self {
        Self {
            chat,
            prompts_dir: prompts_dir.into(),
        }
    }
}

#[async_trait]
impl QuestionService for LlmService {
    async fn answer_question(
        &self,
        question: &str,
        params: &Map<String, Value>,
    ) -> Result<Envelope<AnswerData>> {
        let system_prompt = load_system_prompt(&self.prompts_dir, DEFAULT_SYSTEM).await?;

        let messages = [ChatMessage::system(system_prompt), ChatMessage::user(question)];

        match self.chat.complete(&messages, params).await {
            Ok(answer) => Ok(Envelope::ok(ANSWERED_MESSAGE, AnswerData { answer })),
            Err(e) => Ok(Envelope::err(format!(
                "Failed to answer question with error: {}",
                e
            ))),
        }
    }
}
