use serde::{Deserialize, Serialize};

use super::domain::{Complexity, ScoreBreakdown, WorkItem};

pub const DEFAULT_MIN_SKILL_OVERLAP: usize = 2;

/// Hard-constraint check applied to ranked results before truncation.
pub trait CandidateFilter {
    fn admit(&self, work: &WorkItem, breakdown: &ScoreBreakdown<'_>) -> Result<(), Exclusion>;
}

/// Reason a ranked candidate was removed from the final list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Exclusion {
    RateOutsideBudget { rate: f64, min: f64, max: f64 },
    UnavailableForHighComplexity,
    InsufficientSkillOverlap { overlap: usize, required: usize },
}

impl Exclusion {
    pub fn summary(&self) -> String {
        match self {
            Exclusion::RateOutsideBudget { rate, min, max } => {
                format!("rate {rate:.2} outside budget {min:.2}-{max:.2}")
            }
            Exclusion::UnavailableForHighComplexity => {
                "unavailable for high complexity work".to_string()
            }
            Exclusion::InsufficientSkillOverlap { overlap, required } => {
                format!("skill overlap {overlap} below minimum {required}")
            }
        }
    }
}

/// Default hard constraints: budget window, availability for high complexity
/// work and a minimum raw skill overlap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintPolicy {
    pub enforce_budget: bool,
    pub require_availability_for_high_complexity: bool,
    pub min_skill_overlap: usize,
}

impl Default for ConstraintPolicy {
    fn default() -> Self {
        Self {
            enforce_budget: true,
            require_availability_for_high_complexity: true,
            min_skill_overlap: DEFAULT_MIN_SKILL_OVERLAP,
        }
    }
}

impl ConstraintPolicy {
    /// Policy that admits every candidate.
    pub fn permissive() -> Self {
        Self {
            enforce_budget: false,
            require_availability_for_high_complexity: false,
            min_skill_overlap: 0,
        }
    }

    pub fn with_min_skill_overlap(mut self, min_skill_overlap: usize) -> Self {
        self.min_skill_overlap = min_skill_overlap;
        self
    }
}

impl CandidateFilter for ConstraintPolicy {
    fn admit(&self, work: &WorkItem, breakdown: &ScoreBreakdown<'_>) -> Result<(), Exclusion> {
        let candidate = breakdown.candidate;

        if self.enforce_budget && !work.budget.contains(candidate.rate) {
            return Err(Exclusion::RateOutsideBudget {
                rate: candidate.rate,
                min: work.budget.min,
                max: work.budget.max,
            });
        }

        if self.require_availability_for_high_complexity
            && work.complexity == Complexity::High
            && !candidate.available
        {
            return Err(Exclusion::UnavailableForHighComplexity);
        }

        if breakdown.skill_overlap < self.min_skill_overlap {
            return Err(Exclusion::InsufficientSkillOverlap {
                overlap: breakdown.skill_overlap,
                required: self.min_skill_overlap,
            });
        }

        Ok(())
    }
}
