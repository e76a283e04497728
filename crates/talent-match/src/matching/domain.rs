use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for roster entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Worker profile eligible for matching. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub username: String,
    pub name: String,
    pub title: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    /// Quality rating on the roster's own scale (see `RosterSource::rating_scale`).
    pub rating: f64,
    pub rate: f64,
    pub profile_url: String,
    pub available: bool,
    pub completed_engagements: u32,
}

impl Candidate {
    /// Text indexed by the content scorer.
    pub fn profile_text(&self) -> String {
        format!(
            "{} - {}. Skills: {}",
            self.name,
            self.title,
            self.skills.join(", ")
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Complexity {
    Low,
    Medium,
    High,
}

impl Complexity {
    pub const fn label(self) -> &'static str {
        match self {
            Complexity::Low => "low",
            Complexity::Medium => "medium",
            Complexity::High => "high",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Complexity {
    type Err = WorkItemError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(WorkItemError::UnknownComplexity(other.to_string())),
        }
    }
}

/// Inclusive hourly-rate window a work item can afford.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetRange {
    pub min: f64,
    pub max: f64,
}

impl BudgetRange {
    pub fn new(min: f64, max: f64) -> Result<Self, WorkItemError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || max < 0.0 {
            return Err(WorkItemError::NegativeBudget { min, max });
        }
        if min > max {
            return Err(WorkItemError::InvertedBudget { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }
}

/// A described piece of work seeking a candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItem {
    pub id: String,
    pub description: String,
    /// May be empty, in which case skills are inferred from the description.
    pub required_skills: Vec<String>,
    pub budget: BudgetRange,
    pub complexity: Complexity,
    pub timeline_days: Option<u32>,
}

impl WorkItem {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        required_skills: Vec<String>,
        budget: BudgetRange,
        complexity: Complexity,
        timeline_days: Option<u32>,
    ) -> Result<Self, WorkItemError> {
        if timeline_days == Some(0) {
            return Err(WorkItemError::ZeroTimeline);
        }

        let mut skills: Vec<String> = Vec::with_capacity(required_skills.len());
        for skill in required_skills {
            let skill = skill.trim();
            if !skill.is_empty() && !skills.iter().any(|s| s.eq_ignore_ascii_case(skill)) {
                skills.push(skill.to_string());
            }
        }

        Ok(Self {
            id: id.into(),
            description: description.into(),
            required_skills: skills,
            budget,
            complexity,
            timeline_days,
        })
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WorkItemError {
    #[error("budget bounds must be finite and non-negative (min {min}, max {max})")]
    NegativeBudget { min: f64, max: f64 },
    #[error("budget minimum {min} exceeds maximum {max}")]
    InvertedBudget { min: f64, max: f64 },
    #[error("timeline must be a positive number of days")]
    ZeroTimeline,
    #[error("unknown complexity '{0}', expected low, medium or high")]
    UnknownComplexity(String),
}

/// Per-candidate result of one ranking call, ordered by `combined`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown<'a> {
    pub candidate: &'a Candidate,
    pub content: f64,
    pub collaborative: f64,
    pub skill_overlap: usize,
    pub combined: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn budget_rejects_inverted_and_negative_bounds() {
        assert_eq!(
            BudgetRange::new(100.0, 20.0),
            Err(WorkItemError::InvertedBudget {
                min: 100.0,
                max: 20.0
            })
        );
        assert!(matches!(
            BudgetRange::new(-1.0, 20.0),
            Err(WorkItemError::NegativeBudget { .. })
        ));
        assert!(BudgetRange::new(20.0, 20.0).expect("equal bounds").contains(20.0));
    }

    #[test]
    fn work_item_dedupes_required_skills_case_insensitively() {
        let budget = BudgetRange::new(10.0, 50.0).expect("budget");
        let work = WorkItem::new(
            "w-1",
            "Landing page",
            vec!["React".into(), " react ".into(), "".into(), "CSS".into()],
            budget,
            Complexity::Low,
            Some(7),
        )
        .expect("valid work item");
        assert_eq!(work.required_skills, vec!["React", "CSS"]);
    }

    #[test]
    fn work_item_rejects_zero_timeline() {
        let budget = BudgetRange::new(10.0, 50.0).expect("budget");
        let err = WorkItem::new("w", "d", Vec::new(), budget, Complexity::Low, Some(0))
            .expect_err("zero timeline");
        assert_eq!(err, WorkItemError::ZeroTimeline);
    }

    #[test]
    fn complexity_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Complexity>(), Ok(Complexity::High));
        assert!(" unknown ".parse::<Complexity>().is_err());
    }

    #[test]
    fn profile_text_joins_name_title_and_skills() {
        let candidate = Candidate {
            id: CandidateId("c-1".into()),
            username: "ada".into(),
            name: "Ada".into(),
            title: "Engineer".into(),
            skills: vec!["Rust".into(), "Go".into()],
            experience_years: 3,
            rating: 4.0,
            rate: 40.0,
            profile_url: String::new(),
            available: true,
            completed_engagements: 2,
        };
        assert_eq!(candidate.profile_text(), "Ada - Engineer. Skills: Rust, Go");
    }
}
