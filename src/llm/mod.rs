//! Language model module for Newsdesk.

pub mod client;
pub mod prompt;
pub mod service;

pub use client::{ChatCompletion, ChatMessage, OpenAiCompatibleClient, Role, DEFAULT_TEMPERATURE};
pub use prompt::{load_system_prompt, DEFAULT_SYSTEM};
pub use service::{AnswerData, LlmService, QuestionService, ANSWERED_MESSAGE};
