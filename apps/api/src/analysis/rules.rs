//! Field rules: one pattern matcher per profile field.
//!
//! Each rule looks at the whole extracted text and either yields a value or
//! nothing. Rules never see each other's output, so a malformed section only
//! ever costs its own field.
//!
//! Patterns run in CRLF mode (`R`) so `.` stops at both `\r` and `\n`.

use std::sync::LazyLock;

use regex::Regex;

use crate::analysis::normalize_skill;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?iR)Name[:\-]?\s*(.+)").expect("invalid name regex"));

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("invalid email regex")
});

static PHONE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\+?[0-9]{1,3}[-.\s]?)?\(?[0-9]{3,5}\)?[-.\s]?[0-9]{3,4}[-.\s]?[0-9]{3,4}")
        .expect("invalid phone regex")
});

static EDUCATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?iR)(?:Bachelor|Master|B\.Sc|M\.Sc|B\.Tech|M\.Tech|Ph\.D).+")
        .expect("invalid education regex")
});

static EXPERIENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?iR)(?:[0-9]{4}|[0-9]+\s+years?).*?(?:experience|worked|at)")
        .expect("invalid experience regex")
});

static SKILLS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?iR)Skills[:\-]?\s*(.+)").expect("invalid skills regex"));

/// `Â·` is a middle dot decoded as Latin-1; it must win over the bare `·`.
static SKILL_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Â·|·|,|\n").expect("invalid skill separator regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Email,
    Phone,
    Education,
    Experience,
    Skills,
}

impl ProfileField {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProfileField::Name => "name",
            ProfileField::Email => "email",
            ProfileField::Phone => "phone",
            ProfileField::Education => "education",
            ProfileField::Experience => "experience",
            ProfileField::Skills => "skills",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    List(Vec<String>),
}

/// A single extraction rule. `apply` returns `None` when the field is absent.
pub trait FieldRule: Send + Sync {
    fn field(&self) -> ProfileField;
    fn apply(&self, text: &str) -> Option<FieldValue>;
}

// ────────────────────────────────────────────────────────────────────────────
// Rule shapes
// ────────────────────────────────────────────────────────────────────────────

/// Rest of the line after a label such as `Name:`, trimmed.
pub struct LabelledLineRule {
    field: ProfileField,
    pattern: &'static LazyLock<Regex>,
}

impl FieldRule for LabelledLineRule {
    fn field(&self) -> ProfileField {
        self.field
    }

    fn apply(&self, text: &str) -> Option<FieldValue> {
        let value = self.pattern.captures(text)?.get(1)?.as_str().trim();
        if value.is_empty() {
            return None;
        }
        Some(FieldValue::Text(value.to_string()))
    }
}

/// First match in document order, verbatim.
pub struct FirstMatchRule {
    field: ProfileField,
    pattern: &'static LazyLock<Regex>,
}

impl FieldRule for FirstMatchRule {
    fn field(&self) -> ProfileField {
        self.field
    }

    fn apply(&self, text: &str) -> Option<FieldValue> {
        self.pattern
            .find(text)
            .map(|m| FieldValue::Text(m.as_str().to_string()))
    }
}

/// Every non-overlapping match, in document order.
pub struct AllMatchesRule {
    field: ProfileField,
    pattern: &'static LazyLock<Regex>,
}

impl FieldRule for AllMatchesRule {
    fn field(&self) -> ProfileField {
        self.field
    }

    fn apply(&self, text: &str) -> Option<FieldValue> {
        let matches: Vec<String> = self
            .pattern
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect();
        if matches.is_empty() {
            return None;
        }
        Some(FieldValue::List(matches))
    }
}

/// The `Skills:` line split into normalized entries.
pub struct SkillListRule;

impl FieldRule for SkillListRule {
    fn field(&self) -> ProfileField {
        ProfileField::Skills
    }

    fn apply(&self, text: &str) -> Option<FieldValue> {
        let line = SKILLS_PATTERN.captures(text)?.get(1)?.as_str();
        let skills = SKILL_SEPARATOR
            .split(line)
            .map(normalize_skill)
            .filter(|s| !s.is_empty())
            .collect();
        Some(FieldValue::List(skills))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Built-in battery
// ────────────────────────────────────────────────────────────────────────────

pub fn name_rule() -> LabelledLineRule {
    LabelledLineRule {
        field: ProfileField::Name,
        pattern: &NAME_PATTERN,
    }
}

pub fn email_rule() -> FirstMatchRule {
    FirstMatchRule {
        field: ProfileField::Email,
        pattern: &EMAIL_PATTERN,
    }
}

pub fn phone_rule() -> FirstMatchRule {
    FirstMatchRule {
        field: ProfileField::Phone,
        pattern: &PHONE_PATTERN,
    }
}

pub fn education_rule() -> AllMatchesRule {
    AllMatchesRule {
        field: ProfileField::Education,
        pattern: &EDUCATION_PATTERN,
    }
}

pub fn experience_rule() -> AllMatchesRule {
    AllMatchesRule {
        field: ProfileField::Experience,
        pattern: &EXPERIENCE_PATTERN,
    }
}

/// The full rule set, in profile field order.
pub fn default_rules() -> Vec<Box<dyn FieldRule>> {
    vec![
        Box::new(name_rule()),
        Box::new(email_rule()),
        Box::new(phone_rule()),
        Box::new(education_rule()),
        Box::new(experience_rule()),
        Box::new(SkillListRule),
    ]
}
