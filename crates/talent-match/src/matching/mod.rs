//! Hybrid candidate matching: skill extraction, content and collaborative
//! scoring, weighted fusion and hard-constraint filtering.

mod collaborative;
mod constraints;
mod content;
mod domain;
mod engine;
mod fuzzy;
mod profile;
mod skills;
mod vocabulary;
mod weights;

#[cfg(test)]
mod tests;

pub use collaborative::{
    CollaborativeScorer, CollaborativeVariant, HeuristicCollaborativeScorer, InteractionSignal,
};
pub use constraints::{CandidateFilter, ConstraintPolicy, Exclusion, DEFAULT_MIN_SKILL_OVERLAP};
pub use content::ContentScorer;
pub use domain::{
    BudgetRange, Candidate, CandidateId, Complexity, ScoreBreakdown, WorkItem, WorkItemError,
};
pub use engine::{MatchingEngine, SKILL_MATCH_BOOST};
pub use fuzzy::{FuzzySkillMatcher, DEFAULT_SIMILARITY_THRESHOLD};
pub use profile::MatchingProfile;
pub use skills::SkillExtractor;
pub use weights::{WeightSet, DEFAULT_WEIGHTS, MARKETPLACE_WEIGHTS};
