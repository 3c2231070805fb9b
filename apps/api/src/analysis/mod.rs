// Résumé analysis pipeline.
// Extraction → field parsing → skill matching → scoring → recommendations.
// Every stage is a pure transform over its input plus the shared taxonomy.

pub mod extraction;
pub mod handlers;
pub mod matching;
pub mod parser;
pub mod recommendation;
pub mod rules;
pub mod scoring;
pub mod taxonomy;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::extraction::{RawDocument, TextExtractor};
use crate::analysis::matching::match_skills;
use crate::analysis::parser::{ParsedProfile, ProfileParser};
use crate::analysis::recommendation::{recommend, Recommendation};
use crate::analysis::scoring::{compute_match_score, FeedbackTier};
use crate::analysis::taxonomy::SkillTaxonomy;

/// Trim + lower-case. The single key used for both matching and resource lookup.
pub fn normalize_skill(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// Skill-gap assessment of one profile against the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub score: u32,
    pub tier: FeedbackTier,
    pub recommendations: Vec<Recommendation>,
}

/// The aggregate returned to callers of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    pub extracted_text: String,
    pub parsed_data: ParsedProfile,
    pub extracted_skills: Vec<String>,
    pub matched_skills: Vec<String>,
    pub match_score: u32,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub recommended_resources: Vec<Recommendation>,
}

pub struct ResumeAnalyzer {
    extractor: TextExtractor,
    parser: ProfileParser,
    taxonomy: Arc<SkillTaxonomy>,
}

impl ResumeAnalyzer {
    pub fn new(extractor: TextExtractor, taxonomy: Arc<SkillTaxonomy>) -> Self {
        Self {
            extractor,
            parser: ProfileParser::default(),
            taxonomy,
        }
    }

    pub fn taxonomy(&self) -> &SkillTaxonomy {
        &self.taxonomy
    }

    /// Runs the full pipeline on an uploaded document. Never fails: an
    /// unreadable document yields a report built from empty text.
    pub async fn analyze(&self, document: &RawDocument) -> AnalysisReport {
        let extracted = self.extractor.extract(document).await;
        if !extracted.extracted {
            debug!("No text recovered, continuing with an empty profile");
        }
        self.analyze_text(&extracted.text)
    }

    /// Parsing, matching, scoring and recommendations over already-extracted text.
    pub fn analyze_text(&self, text: &str) -> AnalysisReport {
        let profile = self.parser.parse(text);
        let result = self.assess(&profile.skills);

        info!(
            score = result.score,
            matched = result.matched_skills.len(),
            taxonomy = self.taxonomy.len(),
            "Resume analyzed"
        );

        AnalysisReport {
            extracted_text: text.to_string(),
            extracted_skills: profile.skills.clone(),
            parsed_data: profile,
            matched_skills: result.matched_skills,
            match_score: result.score,
            feedback: result.tier.message().to_string(),
            suggestions: result.missing_skills,
            recommended_resources: result.recommendations,
        }
    }

    pub fn assess(&self, skills: &[String]) -> MatchResult {
        let split = match_skills(skills, &self.taxonomy);
        let score = compute_match_score(split.matched.len(), self.taxonomy.len());
        let recommendations = recommend(&split.missing, &self.taxonomy);

        MatchResult {
            matched_skills: split.matched,
            missing_skills: split.missing,
            score,
            tier: FeedbackTier::for_score(score),
            recommendations,
        }
    }
}
