//! Response composition.
//!
//! Templated intents run a stricter extraction pattern against the original
//! (un-lowered) message and fill a template with the captures. Everything
//! else is a verbatim Knowledge Base lookup.

use super::intent::ClassificationResult;
use super::knowledge::KnowledgeBase;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};

/// Captures a stated name and, optionally, whatever follows it.
static USER_NAME_EXTRACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:my name is|my name's|call me|i am called|i'm called)\s+(\p{L}[\p{L}'\-]*)(?:[\s,.!;:]+(.+))?",
    )
    .expect("Invalid regex: user name extraction")
});

/// Extraction pattern plus template for one intent.
struct ExtractionRule {
    intent: &'static str,
    pattern: fn() -> &'static Regex,
    /// Lower-cased captures that are never accepted as the first group.
    rejected: &'static [&'static str],
    render: fn(&[String]) -> String,
}

const EXTRACTION_RULES: &[ExtractionRule] = &[ExtractionRule {
    intent: "user_name",
    pattern: user_name_pattern,
    rejected: NOT_A_NAME,
    render: render_user_name,
}];

/// Words that follow "call me" or "my name is" in ordinary sentences.
const NOT_A_NAME: &[&str] = &[
    "a", "again", "an", "anytime", "back", "later", "maybe", "not", "now", "please", "soon",
    "sometime", "that", "the", "this", "today", "tomorrow", "tonight", "when", "whenever",
    "if", "it", "what", "whatever", "you",
];

fn rule(intent: &str) -> Option<&'static ExtractionRule> {
    EXTRACTION_RULES.iter().find(|r| r.intent == intent)
}

fn user_name_pattern() -> &'static Regex {
    &USER_NAME_EXTRACTION
}

fn render_user_name(groups: &[String]) -> String {
    let name = groups.first().map(String::as_str).unwrap_or_default();
    match groups.get(1) {
        Some(rest) => format!(
            "Nice to meet you, {}! 🍀 You also said: \"{}\". Tell me more, or ask me about pet care, school subjects or study tips.",
            name, rest
        ),
        None => format!(
            "Nice to meet you, {}! 🍀 It's a pleasure to chat with you. What would you like to explore today: pet care, school subjects or study tips?",
            name
        ),
    }
}

/// Upper-cases the first character, leaves the rest alone.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Where a composed response came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "source", content = "value")]
pub enum ComposedResponse {
    /// Template filled with extracted groups
    Templated(String),
    /// Knowledge Base entry returned verbatim
    Knowledge(String),
    /// No intent matched
    Default(String),
    /// An intent matched but its Knowledge Base entry is missing
    Missing(String),
}

/// Turns a classification into response text.
pub struct ResponseComposer {
    knowledge: Arc<KnowledgeBase>,
    default_response: String,
}

impl ResponseComposer {
    pub fn new(knowledge: Arc<KnowledgeBase>, default_response: impl Into<String>) -> Self {
        Self {
            knowledge,
            default_response: default_response.into(),
        }
    }

    /// True when `intent` has a template and extraction pattern.
    pub fn has_extraction(intent: &str) -> bool {
        rule(intent).is_some()
    }

    /// Runs the extraction pattern for `intent` against the original input.
    ///
    /// Returns `None` when the intent has no rule or no acceptable capture.
    /// A rejected word is skipped and the search resumes after it. Names are
    /// capitalized; an empty trailing capture is dropped.
    pub fn extract(&self, intent: &str, input: &str) -> Option<Vec<String>> {
        let rule = rule(intent)?;
        let input = input.trim();

        let mut start = 0;
        while let Some(captures) = (rule.pattern)().captures_at(input, start) {
            let name = captures.get(1)?;
            if rule.rejected.contains(&name.as_str().to_lowercase().as_str()) {
                start = name.end();
                continue;
            }

            let mut groups = vec![capitalize(name.as_str())];
            if let Some(rest) = captures.get(2) {
                let rest = rest.as_str().trim();
                if !rest.is_empty() {
                    groups.push(rest.to_string());
                }
            }
            return Some(groups);
        }
        None
    }

    /// Produces the response for a classification.
    pub fn compose(&self, result: &ClassificationResult) -> ComposedResponse {
        let Some(intent) = result.intent.as_deref() else {
            return ComposedResponse::Default(self.default_response.clone());
        };

        if let (Some(groups), Some(rule)) = (&result.extracted_groups, rule(intent)) {
            return ComposedResponse::Templated((rule.render)(groups));
        }

        match self.knowledge.get(intent) {
            Some(text) => ComposedResponse::Knowledge(text),
            None => ComposedResponse::Missing(intent.to_string()),
        }
    }
}
