use std::collections::HashSet;

use crate::analysis::normalize_skill;
use crate::analysis::taxonomy::SkillTaxonomy;

/// Taxonomy split into the skills a profile covers and the ones it lacks.
/// Both lists follow taxonomy order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
}

/// Exact-string intersection of profile skills with the taxonomy.
pub fn match_skills(profile_skills: &[String], taxonomy: &SkillTaxonomy) -> SkillMatch {
    let have: HashSet<String> = profile_skills.iter().map(|s| normalize_skill(s)).collect();

    let (matched, missing): (Vec<String>, Vec<String>) = taxonomy
        .skills()
        .iter()
        .cloned()
        .partition(|skill| have.contains(skill));

    SkillMatch { matched, missing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::taxonomy::{LearningResource, TaxonomyEntry};

    fn skills(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn taxonomy(list: &[&str]) -> SkillTaxonomy {
        SkillTaxonomy::new(
            list.iter()
                .map(|s| TaxonomyEntry {
                    skill: s.to_string(),
                    resource: LearningResource::default(),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_matched_follow_taxonomy_order() {
        let result = match_skills(
            &skills(&["docker", "javascript", "react"]),
            &SkillTaxonomy::default(),
        );
        assert_eq!(result.matched, ["javascript", "react", "docker"]);
        assert_eq!(result.missing.len(), 12);
        assert_eq!(result.missing[0], "node.js");
        assert_eq!(result.missing[11], "aws");
    }

    #[test]
    fn test_matching_ignores_case_and_padding() {
        let result = match_skills(&skills(&[" JavaScript "]), &taxonomy(&["javascript", "go"]));
        assert_eq!(result.matched, ["javascript"]);
        assert_eq!(result.missing, ["go"]);
    }

    #[test]
    fn test_no_substring_or_fuzzy_matching() {
        let result = match_skills(
            &skills(&["java", "reactjs", "node"]),
            &taxonomy(&["javascript", "react", "node.js"]),
        );
        assert!(result.matched.is_empty());
        assert_eq!(result.missing, ["javascript", "react", "node.js"]);
    }

    #[test]
    fn test_duplicate_profile_skills_match_once() {
        let result = match_skills(&skills(&["go", "go", "GO"]), &taxonomy(&["go", "rust"]));
        assert_eq!(result.matched, ["go"]);
    }

    #[test]
    fn test_partition_is_exact() {
        let tax = SkillTaxonomy::default();
        let inputs = [
            skills(&[]),
            skills(&["aws", "css", "unknown", "html"]),
            tax.skills().to_vec(),
        ];
        for input in &inputs {
            let result = match_skills(input, &tax);
            let matched: HashSet<_> = result.matched.iter().collect();
            let missing: HashSet<_> = result.missing.iter().collect();
            assert!(matched.is_disjoint(&missing));
            assert_eq!(matched.len() + missing.len(), tax.len());
            let union: HashSet<_> = matched.union(&missing).copied().collect();
            assert_eq!(union, tax.skills().iter().collect::<HashSet<_>>());
        }
    }
}
