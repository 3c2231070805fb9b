use serde::{Deserialize, Serialize};

use crate::analysis::taxonomy::SkillTaxonomy;

/// Learning links for one missing skill. Links without a configured
/// resource are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub skill: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
}

/// One recommendation per missing skill, same order.
pub fn recommend(missing: &[String], taxonomy: &SkillTaxonomy) -> Vec<Recommendation> {
    missing
        .iter()
        .map(|skill| {
            let resource = taxonomy.resource(skill);
            Recommendation {
                skill: skill.clone(),
                course: resource.and_then(|r| r.course.clone()),
                video: resource.and_then(|r| r.video.clone()),
            }
        })
        .collect()
}
