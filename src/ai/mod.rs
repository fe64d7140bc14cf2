//! AI Integration Layer
//!
//! Prompt construction, the collaborator abstraction and extraction of quiz
//! data from collaborator text.

pub mod prompt;
pub mod provider;
pub mod timeout;
pub mod validation;

pub use prompt::{PromptBuilder, PromptSection, quiz_prompt};
pub use provider::{
    GeminiProvider, LlmProvider, LlmResponse, ResponseMetadata, ResponseTiming, SharedProvider,
    TokenUsage, create_provider,
};
pub use timeout::with_timeout;
pub use validation::{ElementCheck, QuestionValidator, extract_quiz, extract_quiz_with_policy};
