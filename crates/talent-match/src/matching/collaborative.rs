use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::domain::{Candidate, WorkItem};

/// Normalised per-candidate history signals, both in [0, 1] when the
/// inputs are within their declared scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteractionSignal {
    pub volume: f64,
    pub quality: f64,
}

impl InteractionSignal {
    /// Mean of the two signals; a NaN signal counts as zero.
    pub fn mean(&self) -> f64 {
        let clean = |v: f64| if v.is_nan() { 0.0 } else { v };
        (clean(self.volume) + clean(self.quality)) / 2.0
    }
}

/// Capability interface for the collaborative signal. Variants are chosen
/// by configuration when the engine is built.
pub trait CollaborativeScorer: Send + Sync {
    /// Rebuild all signals from scratch for the given roster.
    fn train(&mut self, work_history: &[WorkItem], candidates: &[Candidate]);

    /// One score per candidate; all zeros when untrained or when the roster
    /// is empty. Never fails.
    fn score(&self, description: &str, required_skills: &[String], candidate_count: usize)
        -> Vec<f64>;
}

/// Which history the heuristic scorer requires before producing signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollaborativeVariant {
    /// Signals only when at least one historical work item is known.
    History,
    /// Signals from roster data alone.
    Roster,
}

/// Static heuristic over completed-engagement volume and quality rating.
#[derive(Debug, Clone)]
pub struct HeuristicCollaborativeScorer {
    variant: CollaborativeVariant,
    rating_scale: f64,
    signals: Option<Vec<InteractionSignal>>,
}

impl HeuristicCollaborativeScorer {
    pub fn new(variant: CollaborativeVariant, rating_scale: f64) -> Self {
        Self {
            variant,
            rating_scale,
            signals: None,
        }
    }

    pub fn signals(&self) -> Option<&[InteractionSignal]> {
        self.signals.as_deref()
    }
}

impl CollaborativeScorer for HeuristicCollaborativeScorer {
    fn train(&mut self, work_history: &[WorkItem], candidates: &[Candidate]) {
        let zeroed = || {
            vec![
                InteractionSignal {
                    volume: 0.0,
                    quality: 0.0
                };
                candidates.len()
            ]
        };

        if candidates.is_empty()
            || (self.variant == CollaborativeVariant::History && work_history.is_empty())
        {
            warn!(
                candidates = candidates.len(),
                history = work_history.len(),
                "no candidates or work history available; collaborative signals are zero"
            );
            self.signals = Some(zeroed());
            return;
        }

        let volumes: Vec<f64> = candidates
            .iter()
            .map(|c| f64::from(c.completed_engagements))
            .collect();
        let min = volumes.iter().copied().fold(f64::INFINITY, f64::min);
        let max = volumes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;

        let scale = if self.rating_scale > 0.0 && self.rating_scale.is_finite() {
            self.rating_scale
        } else {
            warn!(scale = self.rating_scale, "invalid rating scale; quality signal is zero");
            f64::INFINITY
        };

        let signals = candidates
            .iter()
            .zip(&volumes)
            .map(|(candidate, volume)| InteractionSignal {
                volume: if span > 0.0 { (volume - min) / span } else { 0.0 },
                quality: candidate.rating / scale,
            })
            .collect::<Vec<_>>();

        debug!(candidates = signals.len(), "collaborative signals trained");
        self.signals = Some(signals);
    }

    fn score(
        &self,
        _description: &str,
        _required_skills: &[String],
        candidate_count: usize,
    ) -> Vec<f64> {
        let Some(signals) = self.signals.as_ref().filter(|s| !s.is_empty()) else {
            if candidate_count > 0 {
                warn!("collaborative signals unavailable; returning zero scores");
            }
            return vec![0.0; candidate_count];
        };

        let mut scores: Vec<f64> = signals.iter().map(InteractionSignal::mean).collect();
        scores.resize(candidate_count, 0.0);
        scores
    }
}
