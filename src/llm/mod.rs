pub mod openai;

pub use openai::{ChatMessage, LlmClient};
