use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    Strong,
    Moderate,
    Low,
}

impl FeedbackTier {
    /// Thresholds checked high to low: ≥80 strong, ≥50 moderate, else low.
    pub fn for_score(score: u32) -> Self {
        if score >= 80 {
            FeedbackTier::Strong
        } else if score >= 50 {
            FeedbackTier::Moderate
        } else {
            FeedbackTier::Low
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FeedbackTier::Strong => "Great job! Your resume matches the job requirements well.",
            FeedbackTier::Moderate => {
                "Good effort! You might improve your resume by adding or highlighting more relevant skills."
            }
            FeedbackTier::Low => {
                "Your resume has low relevance to the job role. Consider adding more relevant skills and projects."
            }
        }
    }
}

/// `round(100 * matched / total)` with halves rounded up, in integer math.
/// `total` is the taxonomy size and is never zero for a built taxonomy.
pub fn compute_match_score(matched: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let matched = matched.min(total);
    ((200 * matched + total) / (2 * total)) as u32
}
