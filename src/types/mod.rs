pub mod error;

pub use error::{
    ErrorCategory, ErrorClassifier, ExtractionError, LlmError, QuizError, Result,
};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::QuizConfig;

// =============================================================================
// Quiz Data
// =============================================================================

/// A single multiple-choice question
///
/// Produced by the extractor from collaborator output (or deserialized from
/// the server's response on the client) and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
}

impl QuizQuestion {
    pub fn new(question: impl Into<String>, options: Vec<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            options,
            answer: answer.into(),
        }
    }

    /// Whether `selected` is the stored answer
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }
}

/// Ordered questions for one play-through
pub type QuizSet = Vec<QuizQuestion>;

// =============================================================================
// Requests
// =============================================================================

/// Wire body of `POST /api/quiz/generate`
///
/// Fields are kept loosely typed so that a wrong type surfaces as an
/// `InvalidRequest` rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_questions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Value>,
}

impl GenerateRequest {
    pub fn new(topic: &str, num_questions: Option<usize>, language: Option<&str>) -> Self {
        Self {
            topic: Some(Value::from(topic)),
            num_questions: num_questions.map(Value::from),
            language: language.map(Value::from),
        }
    }
}

/// Validated generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizRequest {
    pub topic: String,
    pub count: usize,
    pub language: String,
}

impl QuizRequest {
    /// Validate a wire request, filling defaults from config
    pub fn from_generate_request(raw: &GenerateRequest, config: &QuizConfig) -> Result<Self> {
        let topic = match &raw.topic {
            Some(Value::String(t)) if !t.trim().is_empty() => t.clone(),
            _ => return Err(QuizError::invalid_request("Missing or invalid topic")),
        };

        let count = match &raw.num_questions {
            None | Some(Value::Null) => config.default_questions,
            Some(value) => match value.as_u64() {
                Some(n) if n >= 1 && n as usize <= config.max_questions => n as usize,
                _ => {
                    return Err(QuizError::invalid_request(format!(
                        "numQuestions must be an integer between 1 and {}",
                        config.max_questions
                    )));
                }
            },
        };

        let language = match &raw.language {
            None | Some(Value::Null) => config.default_language.clone(),
            Some(Value::String(l)) if !l.trim().is_empty() => l.clone(),
            Some(_) => return Err(QuizError::invalid_request("Invalid language")),
        };

        Ok(Self {
            topic,
            count,
            language,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(body: Value) -> Result<QuizRequest> {
        let raw: GenerateRequest = serde_json::from_value(body).unwrap();
        QuizRequest::from_generate_request(&raw, &QuizConfig::default())
    }

    #[test]
    fn test_defaults_applied() {
        let req = request(json!({"topic": "History"})).unwrap();
        assert_eq!(req.topic, "History");
        assert_eq!(req.count, 15);
        assert_eq!(req.language, "English");
    }

    #[test]
    fn test_explicit_values() {
        let req = request(json!({"topic": "Physics", "numQuestions": 2, "language": "French"}))
            .unwrap();
        assert_eq!(req.count, 2);
        assert_eq!(req.language, "French");
    }

    #[test]
    fn test_topic_validation() {
        for body in [
            json!({}),
            json!({"topic": ""}),
            json!({"topic": "   "}),
            json!({"topic": 42}),
            json!({"topic": ["Physics"]}),
            json!({"topic": null}),
        ] {
            let err = request(body.clone()).unwrap_err();
            assert!(
                matches!(err, QuizError::InvalidRequest(ref m) if m == "Missing or invalid topic"),
                "body {} gave {:?}",
                body,
                err
            );
        }
    }

    #[test]
    fn test_count_validation() {
        assert!(request(json!({"topic": "x", "numQuestions": 0})).is_err());
        assert!(request(json!({"topic": "x", "numQuestions": -3})).is_err());
        assert!(request(json!({"topic": "x", "numQuestions": 2.5})).is_err());
        assert!(request(json!({"topic": "x", "numQuestions": "5"})).is_err());
        assert!(request(json!({"topic": "x", "numQuestions": 51})).is_err());
        assert_eq!(
            request(json!({"topic": "x", "numQuestions": 50})).unwrap().count,
            50
        );
    }

    #[test]
    fn test_language_validation() {
        assert!(request(json!({"topic": "x", "language": 7})).is_err());
        assert_eq!(
            request(json!({"topic": "x", "language": null})).unwrap().language,
            "English"
        );
    }

    #[test]
    fn test_is_correct() {
        let q = QuizQuestion::new(
            "2+2?",
            vec!["3".into(), "4".into(), "5".into(), "6".into()],
            "4",
        );
        assert!(q.is_correct("4"));
        assert!(!q.is_correct("5"));
    }
}
