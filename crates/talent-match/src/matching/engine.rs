use tracing::{debug, info};

use super::collaborative::{CollaborativeScorer, HeuristicCollaborativeScorer};
use super::constraints::CandidateFilter;
use super::content::ContentScorer;
use super::domain::{Candidate, ScoreBreakdown, WorkItem};
use super::fuzzy::FuzzySkillMatcher;
use super::profile::MatchingProfile;
use super::skills::SkillExtractor;
use super::weights::WeightSet;

/// Fixed boost for the skill match ratio, applied outside the weight set.
pub const SKILL_MATCH_BOOST: f64 = 0.2;

/// Years of experience that map to a full experience term.
const EXPERIENCE_SCALE: f64 = 10.0;

/// Orchestrates extraction, scoring and fusion over one candidate roster.
///
/// The engine owns its trained scorers; ranking is read-only and returns a
/// fresh result on every call.
pub struct MatchingEngine {
    candidates: Vec<Candidate>,
    profile: MatchingProfile,
    extractor: SkillExtractor,
    content: ContentScorer,
    collaborative: Box<dyn CollaborativeScorer>,
    fuzzy: FuzzySkillMatcher,
}

impl MatchingEngine {
    /// Builds an engine and trains its scorers without any work history.
    pub fn new(candidates: Vec<Candidate>, profile: MatchingProfile) -> Self {
        let collaborative =
            HeuristicCollaborativeScorer::new(profile.collaborative, profile.rating_scale);
        let mut engine = Self {
            candidates,
            profile,
            extractor: SkillExtractor::new(),
            content: ContentScorer::new(),
            collaborative: Box::new(collaborative),
            fuzzy: FuzzySkillMatcher::default(),
        };
        engine.train(&[]);
        engine
    }

    pub fn with_extractor(mut self, extractor: SkillExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn with_fuzzy_matcher(mut self, fuzzy: FuzzySkillMatcher) -> Self {
        self.fuzzy = fuzzy;
        self
    }

    /// Swaps in another collaborative scorer, trained on an empty history.
    pub fn with_collaborative_scorer(mut self, mut scorer: Box<dyn CollaborativeScorer>) -> Self {
        scorer.train(&[], &self.candidates);
        self.collaborative = scorer;
        self
    }

    /// Rebuilds both scorers from scratch.
    pub fn train(&mut self, work_history: &[WorkItem]) {
        self.content.train(&self.candidates);
        self.collaborative.train(work_history, &self.candidates);
        info!(
            candidates = self.candidates.len(),
            history = work_history.len(),
            "matching engine trained"
        );
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn profile(&self) -> &MatchingProfile {
        &self.profile
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    /// Declared skills, or skills inferred from the description when none
    /// were declared.
    pub fn required_skills(&self, work: &WorkItem) -> Vec<String> {
        if work.required_skills.is_empty() {
            self.extractor.extract_list(&work.description)
        } else {
            work.required_skills.clone()
        }
    }

    /// Every candidate scored and sorted by descending combined score; ties
    /// keep roster order. `weights` overrides the profile weights.
    pub fn rank(&self, work: &WorkItem, weights: Option<WeightSet>) -> Vec<ScoreBreakdown<'_>> {
        let weights = weights
            .unwrap_or_else(|| self.profile.weights_for(work.complexity))
            .resolve();
        let required = self.required_skills(work);

        let content = self.content.score(&work.description, &self.candidates);
        let collaborative =
            self.collaborative
                .score(&work.description, &required, self.candidates.len());

        let mut ranked: Vec<ScoreBreakdown<'_>> = self
            .candidates
            .iter()
            .zip(content)
            .zip(collaborative)
            .map(|((candidate, content), collaborative)| {
                let skill_overlap = self
                    .fuzzy
                    .overlap(required.as_slice(), candidate.skills.as_slice());
                let combined = fuse(
                    &weights,
                    FusionInputs {
                        content,
                        collaborative,
                        experience_years: candidate.experience_years,
                        rating: candidate.rating,
                        rating_scale: self.profile.rating_scale,
                        skill_overlap,
                        required_count: required.len(),
                    },
                );

                ScoreBreakdown {
                    candidate,
                    content,
                    collaborative,
                    skill_overlap,
                    combined,
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.combined.total_cmp(&a.combined));

        debug!(
            work_id = %work.id,
            required = required.len(),
            ranked = ranked.len(),
            "work item ranked"
        );
        ranked
    }

    /// Ranks, removes candidates the filter rejects, then keeps the first
    /// `top_n`.
    pub fn top_matches(
        &self,
        work: &WorkItem,
        filter: &dyn CandidateFilter,
        top_n: usize,
    ) -> Vec<ScoreBreakdown<'_>> {
        let ranked = self.rank(work, None);
        let total = ranked.len();

        let mut admitted: Vec<ScoreBreakdown<'_>> = ranked
            .into_iter()
            .filter(|breakdown| match filter.admit(work, breakdown) {
                Ok(()) => true,
                Err(exclusion) => {
                    debug!(
                        work_id = %work.id,
                        candidate_id = %breakdown.candidate.id,
                        reason = %exclusion.summary(),
                        "candidate excluded"
                    );
                    false
                }
            })
            .collect();
        admitted.truncate(top_n);

        info!(
            work_id = %work.id,
            ranked = total,
            returned = admitted.len(),
            "top matches selected"
        );
        admitted
    }
}

pub(crate) struct FusionInputs {
    pub content: f64,
    pub collaborative: f64,
    pub experience_years: u32,
    pub rating: f64,
    pub rating_scale: f64,
    pub skill_overlap: usize,
    pub required_count: usize,
}

pub(crate) fn fuse(weights: &WeightSet, inputs: FusionInputs) -> f64 {
    let skill_match_ratio = if inputs.required_count == 0 {
        0.0
    } else {
        inputs.skill_overlap as f64 / inputs.required_count as f64
    };
    let rating = if inputs.rating_scale > 0.0 {
        inputs.rating / inputs.rating_scale
    } else {
        0.0
    };

    weights.content * inputs.content
        + weights.collaborative * inputs.collaborative
        + weights.experience * (f64::from(inputs.experience_years) / EXPERIENCE_SCALE)
        + weights.rating * rating
        + SKILL_MATCH_BOOST * skill_match_ratio
}
