//! Collaborator Output Validation
//!
//! Two stages turn free-form collaborator text into a quiz set:
//! - extraction: fences and prose are stripped and a JSON array is parsed
//! - validation: each element is checked and the configured policy decides
//!   whether bad elements reject the set or are filtered out

mod extract;
mod question;

pub use extract::extract_json_array;
pub use question::{ElementCheck, QuestionValidator};

use tracing::debug;

use crate::config::ValidationPolicy;
use crate::types::{ExtractionError, QuizSet};

/// Extract a quiz set using the default (`filter`) policy
pub fn extract_quiz(raw: &str) -> Result<QuizSet, ExtractionError> {
    extract_quiz_with_policy(raw, ValidationPolicy::default())
}

/// Extract a quiz set from collaborator text
pub fn extract_quiz_with_policy(
    raw: &str,
    policy: ValidationPolicy,
) -> Result<QuizSet, ExtractionError> {
    let elements = extract_json_array(raw)?;
    let validator = QuestionValidator::new(policy);
    debug!(
        "Validating {} elements ({} policy)",
        elements.len(),
        validator.policy()
    );
    validator.validate_set(&elements, raw)
}
