//! Per-question validation
//!
//! Turns the raw elements of the extracted array into `QuizQuestion`s,
//! tagging each as valid or invalid, then applies the configured policy.

use serde_json::Value;
use std::collections::HashSet;
use tracing::warn;

use crate::config::ValidationPolicy;
use crate::constants::quiz::OPTION_COUNT;
use crate::types::{ExtractionError, QuizQuestion, QuizSet};

/// Outcome of checking one array element
#[derive(Debug, Clone, PartialEq)]
pub enum ElementCheck {
    Valid(QuizQuestion),
    Invalid(String),
}

/// Validates extracted elements under a policy
#[derive(Debug, Clone, Copy, Default)]
pub struct QuestionValidator {
    policy: ValidationPolicy,
}

impl QuestionValidator {
    pub fn new(policy: ValidationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    /// Check a single element
    ///
    /// Lenient mode only requires the three fields with the right types;
    /// strict and filter modes also enforce four distinct options and
    /// `answer ∈ options`.
    pub fn check(&self, element: &Value) -> ElementCheck {
        let question = match read_question(element) {
            Ok(q) => q,
            Err(reason) => return ElementCheck::Invalid(reason),
        };

        if self.policy == ValidationPolicy::Lenient {
            return ElementCheck::Valid(question);
        }

        match check_contract(&question) {
            Ok(()) => ElementCheck::Valid(question),
            Err(reason) => ElementCheck::Invalid(reason),
        }
    }

    /// Validate every element and apply the policy
    ///
    /// `raw` is the collaborator text, kept on the error for diagnostics.
    pub fn validate_set(&self, elements: &[Value], raw: &str) -> Result<QuizSet, ExtractionError> {
        let mut questions = Vec::with_capacity(elements.len());
        let mut first_failure: Option<(usize, String)> = None;

        for (index, element) in elements.iter().enumerate() {
            match self.check(element) {
                ElementCheck::Valid(question) => questions.push(question),
                ElementCheck::Invalid(reason) => {
                    if self.policy == ValidationPolicy::Strict {
                        return Err(ExtractionError::MalformedElement {
                            index,
                            reason,
                            raw: raw.to_string(),
                        });
                    }
                    warn!("Dropping question {}: {}", index, reason);
                    first_failure.get_or_insert((index, reason));
                }
            }
        }

        if questions.is_empty()
            && let Some((index, reason)) = first_failure
        {
            return Err(ExtractionError::MalformedElement {
                index,
                reason,
                raw: raw.to_string(),
            });
        }

        Ok(questions)
    }
}

fn read_question(element: &Value) -> Result<QuizQuestion, String> {
    let object = element
        .as_object()
        .ok_or_else(|| "element is not an object".to_string())?;

    let question = object
        .get("question")
        .and_then(Value::as_str)
        .filter(|q| !q.trim().is_empty())
        .ok_or_else(|| "missing or empty \"question\"".to_string())?;

    let options = object
        .get("options")
        .and_then(Value::as_array)
        .ok_or_else(|| "missing \"options\" array".to_string())?
        .iter()
        .map(|option| option.as_str().map(String::from))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| "\"options\" must contain only strings".to_string())?;

    let answer = object
        .get("answer")
        .and_then(Value::as_str)
        .ok_or_else(|| "missing \"answer\"".to_string())?;

    Ok(QuizQuestion::new(question, options, answer))
}

fn check_contract(question: &QuizQuestion) -> Result<(), String> {
    if question.options.len() != OPTION_COUNT {
        return Err(format!(
            "expected {} options, found {}",
            OPTION_COUNT,
            question.options.len()
        ));
    }

    let distinct: HashSet<&str> = question.options.iter().map(String::as_str).collect();
    if distinct.len() != question.options.len() {
        return Err("options are not distinct".to_string());
    }

    if !question.options.contains(&question.answer) {
        return Err(format!(
            "answer \"{}\" is not one of the options",
            question.answer
        ));
    }

    Ok(())
}
