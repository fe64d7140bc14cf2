//! Prompt Builder System
//!
//! Section-based prompt construction for collaborator requests.
//! The quiz prompt pins the output contract (a bare JSON array of
//! `{question, options, answer}` objects) so the extractor has a stable
//! target.

use crate::constants::quiz::OPTION_COUNT;
use crate::types::QuizRequest;

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Role definition with task
    Role { expertise: String, task: String },
    /// Numbered rules the output must follow
    Rules(Vec<String>),
    /// Ordered key-value context
    Context(Vec<(String, String)>),
    /// Code block with language
    Code { language: String, content: String },
    /// Good/bad output examples
    AntiPatterns { bad: Vec<String>, good: Vec<String> },
    /// Raw text
    Custom(String),
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a role definition section
    pub fn role(mut self, expertise: &str, task: &str) -> Self {
        self.sections.push(PromptSection::Role {
            expertise: expertise.to_string(),
            task: task.to_string(),
        });
        self
    }

    /// Add a rules section
    pub fn rules<S: Into<String>>(mut self, rules: impl IntoIterator<Item = S>) -> Self {
        self.sections.push(PromptSection::Rules(
            rules.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Add a context item, appending to the existing context section if any
    pub fn context_item(mut self, key: &str, value: &str) -> Self {
        let item = (key.to_string(), value.to_string());
        match self
            .sections
            .iter_mut()
            .find_map(|section| match section {
                PromptSection::Context(items) => Some(items),
                _ => None,
            }) {
            Some(items) => items.push(item),
            None => self.sections.push(PromptSection::Context(vec![item])),
        }
        self
    }

    /// Add code block
    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add anti-patterns section
    pub fn anti_patterns(mut self, bad: Vec<&str>, good: Vec<&str>) -> Self {
        self.sections.push(PromptSection::AntiPatterns {
            bad: bad.into_iter().map(String::from).collect(),
            good: good.into_iter().map(String::from).collect(),
        });
        self
    }

    /// Add custom section
    pub fn custom(mut self, content: &str) -> Self {
        self.sections
            .push(PromptSection::Custom(content.to_string()));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Role { expertise, task } => {
                    prompt.push_str(&format!("You are a {} {}.\n\n", expertise, task));
                }
                PromptSection::Rules(rules) => {
                    prompt.push_str("Rules:\n");
                    for (i, rule) in rules.iter().enumerate() {
                        prompt.push_str(&format!("{}. {}\n", i + 1, rule));
                    }
                    prompt.push('\n');
                }
                PromptSection::Context(items) => {
                    for (key, value) in items {
                        prompt.push_str(&format!("{}: {}\n", key, value));
                    }
                    prompt.push('\n');
                }
                PromptSection::Code { language, content } => {
                    prompt.push_str(&format!("```{}\n", language));
                    prompt.push_str(&content);
                    prompt.push_str("\n```\n\n");
                }
                PromptSection::AntiPatterns { bad, good } => {
                    for example in bad {
                        prompt.push_str(&format!("WRONG: {}\n", example));
                    }
                    for example in good {
                        prompt.push_str(&format!("CORRECT: {}\n", example));
                    }
                    prompt.push('\n');
                }
                PromptSection::Custom(content) => {
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

const QUESTION_SHAPE: &str = r#"{
  "question": "...",
  "options": ["option1", "option2", "option3", "option4"],
  "answer": "option1"
}"#;

/// Build the quiz generation prompt
///
/// The topic is embedded verbatim.
pub fn quiz_prompt(request: &QuizRequest) -> String {
    PromptBuilder::new()
        .role("strict quiz generator", "that answers with JSON only")
        .context_item("Topic", &format!("\"{}\"", request.topic))
        .context_item("Number of questions", &request.count.to_string())
        .context_item("Language", &request.language)
        .custom(&format!(
            "Produce exactly {} multiple-choice questions about the topic: \"{}\".",
            request.count, request.topic
        ))
        .rules([
            "Output MUST be a valid JSON array only. No explanations, no comments.".to_string(),
            "Each item must have exactly this shape:".to_string(),
        ])
        .code("json", QUESTION_SHAPE)
        .rules([
            format!(
                "\"options\" holds exactly {} distinct strings.",
                OPTION_COUNT
            ),
            "\"answer\" is copied verbatim from one of the options.".to_string(),
            format!("Write every question and option in {}.", request.language),
            "Questions: concise (1 sentence max).".to_string(),
            "Answers: 1 sentence max.".to_string(),
            "Do not include newlines inside values unless properly escaped.".to_string(),
            "Absolutely NO extra text before or after the JSON array.".to_string(),
        ])
        .anti_patterns(
            vec!["Here is your quiz: [ ... ]", "```json [ ... ] ```"],
            vec!["[ { \"question\": ... }, ... ]"],
        )
        .build()
}
