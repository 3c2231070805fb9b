//! Skill taxonomy: the ordered target skill set plus its learning resources.
//!
//! Built once at startup and shared read-only (`Arc<SkillTaxonomy>`) by every
//! analysis. Skills are stored normalized so lookups and matching use the
//! same key.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::analysis::normalize_skill;

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("taxonomy must contain at least one skill")]
    Empty,

    #[error("skill name must not be blank")]
    BlankSkill,

    #[error("duplicate skill in taxonomy: {0}")]
    Duplicate(String),

    #[error("invalid taxonomy JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Course + video links for a single skill. Either may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

/// One row of a taxonomy definition, as read from a deployment JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyEntry {
    pub skill: String,
    #[serde(flatten)]
    pub resource: LearningResource,
}

#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    skills: Vec<String>,
    resources: HashMap<String, LearningResource>,
}

impl SkillTaxonomy {
    /// Builds a taxonomy from ordered entries. Rejects an empty set, blank
    /// names and duplicates after normalization.
    pub fn new(entries: Vec<TaxonomyEntry>) -> Result<Self, TaxonomyError> {
        if entries.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        let mut seen = HashSet::new();
        let mut skills = Vec::with_capacity(entries.len());
        let mut resources = HashMap::new();

        for entry in entries {
            let skill = normalize_skill(&entry.skill);
            if skill.is_empty() {
                return Err(TaxonomyError::BlankSkill);
            }
            if !seen.insert(skill.clone()) {
                return Err(TaxonomyError::Duplicate(skill));
            }
            if entry.resource.course.is_some() || entry.resource.video.is_some() {
                resources.insert(skill.clone(), entry.resource);
            }
            skills.push(skill);
        }

        Ok(Self { skills, resources })
    }

    /// Parses a JSON array of `{skill, course?, video?}` objects.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let entries: Vec<TaxonomyEntry> = serde_json::from_str(json)?;
        Self::new(entries)
    }

    /// Canonical skills in taxonomy order.
    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn resource(&self, skill: &str) -> Option<&LearningResource> {
        self.resources.get(skill)
    }

    /// Ordered view used by the `/api/v1/skills` endpoint.
    pub fn entries(&self) -> Vec<TaxonomyEntry> {
        self.skills
            .iter()
            .map(|skill| TaxonomyEntry {
                skill: skill.clone(),
                resource: self.resource(skill).cloned().unwrap_or_default(),
            })
            .collect()
    }
}

impl Default for SkillTaxonomy {
    /// The fifteen-skill web development taxonomy shipped with the service.
    fn default() -> Self {
        // DEFAULT_SKILLS is already normalized, non-empty and duplicate-free.
        let skills = DEFAULT_SKILLS
            .iter()
            .map(|(skill, _, _)| skill.to_string())
            .collect();
        let resources = DEFAULT_SKILLS
            .iter()
            .map(|(skill, course, video)| {
                (
                    skill.to_string(),
                    LearningResource {
                        course: Some(course.to_string()),
                        video: Some(video.to_string()),
                    },
                )
            })
            .collect();

        Self { skills, resources }
    }
}

const DEFAULT_SKILLS: &[(&str, &str, &str)] = &[
    (
        "javascript",
        "https://www.freecodecamp.org/learn/javascript-algorithms-and-data-structures/",
        "https://www.youtube.com/watch?v=PkZNo7MFNFg",
    ),
    (
        "react",
        "https://reactjs.org/learn",
        "https://www.youtube.com/watch?v=bMknfKXIFA8",
    ),
    (
        "node.js",
        "https://www.codecademy.com/learn/learn-node-js",
        "https://www.youtube.com/watch?v=TlB_eWDSMt4",
    ),
    (
        "express",
        "https://developer.mozilla.org/en-US/docs/Learn/Server-side/Express_Nodejs",
        "https://www.youtube.com/watch?v=L72fhGm1tfE",
    ),
    (
        "mongodb",
        "https://learn.mongodb.com/",
        "https://www.youtube.com/watch?v=Of1JrZbY4TQ",
    ),
    (
        "html",
        "https://www.w3schools.com/html/",
        "https://www.youtube.com/watch?v=UB1O30fR-EE",
    ),
    (
        "css",
        "https://www.w3schools.com/css/",
        "https://www.youtube.com/watch?v=yfoY53QXEnI",
    ),
    (
        "python",
        "https://www.learnpython.org/",
        "https://www.youtube.com/watch?v=rfscVS0vtbw",
    ),
    (
        "django",
        "https://developer.mozilla.org/en-US/docs/Learn/Server-side/Django",
        "https://www.youtube.com/watch?v=F5mRW0jo-U4",
    ),
    (
        "machine learning",
        "https://www.coursera.org/learn/machine-learning",
        "https://www.youtube.com/watch?v=Gv9_4yMHFhI",
    ),
    (
        "data structures",
        "https://www.geeksforgeeks.org/data-structures/",
        "https://www.youtube.com/watch?v=RBSGKlAvoiM",
    ),
    (
        "algorithms",
        "https://www.khanacademy.org/computing/computer-science/algorithms",
        "https://www.youtube.com/watch?v=rL8X2mlNHPM",
    ),
    (
        "typescript",
        "https://www.typescriptlang.org/docs/",
        "https://www.youtube.com/watch?v=d56mG7DezGs",
    ),
    (
        "docker",
        "https://www.docker.com/101-tutorial/",
        "https://www.youtube.com/watch?v=fqMOX6JJhGo",
    ),
    (
        "aws",
        "https://aws.amazon.com/training/",
        "https://www.youtube.com/watch?v=ulprqHHWlng",
    ),
];
