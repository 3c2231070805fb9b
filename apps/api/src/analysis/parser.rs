use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::rules::{default_rules, FieldRule, FieldValue, ProfileField};

/// Placeholder for a single-value field no rule could fill.
pub const NOT_FOUND: &str = "Not found";

/// Structured applicant profile recovered from résumé text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: Vec<String>,
    pub experience: Vec<String>,
    /// Trimmed and lower-cased.
    pub skills: Vec<String>,
}

impl Default for ParsedProfile {
    fn default() -> Self {
        Self {
            name: NOT_FOUND.to_string(),
            email: NOT_FOUND.to_string(),
            phone: NOT_FOUND.to_string(),
            education: vec![],
            experience: vec![],
            skills: vec![],
        }
    }
}

impl ParsedProfile {
    /// Stores `value` in `field`. Returns false when the value shape does not
    /// fit the field (text into a list field or the other way round).
    fn set(&mut self, field: ProfileField, value: FieldValue) -> bool {
        match (field, value) {
            (ProfileField::Name, FieldValue::Text(v)) => self.name = v,
            (ProfileField::Email, FieldValue::Text(v)) => self.email = v,
            (ProfileField::Phone, FieldValue::Text(v)) => self.phone = v,
            (ProfileField::Education, FieldValue::List(v)) => self.education = v,
            (ProfileField::Experience, FieldValue::List(v)) => self.experience = v,
            (ProfileField::Skills, FieldValue::List(v)) => self.skills = v,
            _ => return false,
        }
        true
    }
}

/// Runs a battery of independent `FieldRule`s over the whole text.
pub struct ProfileParser {
    rules: Vec<Box<dyn FieldRule>>,
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new(default_rules())
    }
}

impl ProfileParser {
    pub fn new(rules: Vec<Box<dyn FieldRule>>) -> Self {
        Self { rules }
    }

    pub fn parse(&self, text: &str) -> ParsedProfile {
        let mut profile = ParsedProfile::default();

        for rule in &self.rules {
            let field = rule.field();
            match rule.apply(text) {
                Some(value) => {
                    if !profile.set(field, value) {
                        debug!(field = field.as_str(), "Rule produced a value of the wrong shape");
                    }
                }
                None => debug!(field = field.as_str(), "No match"),
            }
        }

        profile
    }
}
