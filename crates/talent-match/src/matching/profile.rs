use serde::{Deserialize, Serialize};

use super::collaborative::CollaborativeVariant;
use super::domain::Complexity;
use super::weights::{WeightSet, DEFAULT_WEIGHTS, MARKETPLACE_WEIGHTS};
use crate::roster::RosterSource;

/// Scoring configuration chosen per data source when an engine is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchingProfile {
    pub weights: WeightSet,
    /// Upper bound of `Candidate::rating` for this roster.
    pub rating_scale: f64,
    pub collaborative: CollaborativeVariant,
    pub adjust_for_complexity: bool,
}

impl Default for MatchingProfile {
    fn default() -> Self {
        Self::standard()
    }
}

impl MatchingProfile {
    pub fn standard() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            rating_scale: RosterSource::Standard.rating_scale(),
            collaborative: CollaborativeVariant::History,
            adjust_for_complexity: false,
        }
    }

    pub fn marketplace() -> Self {
        Self {
            weights: MARKETPLACE_WEIGHTS,
            rating_scale: RosterSource::Marketplace.rating_scale(),
            collaborative: CollaborativeVariant::Roster,
            adjust_for_complexity: true,
        }
    }

    pub fn for_source(source: RosterSource) -> Self {
        match source {
            RosterSource::Standard => Self::standard(),
            RosterSource::Marketplace => Self::marketplace(),
        }
    }

    pub fn with_weights(mut self, weights: WeightSet) -> Self {
        self.weights = weights;
        self
    }

    /// Weights for a given work item, before sanitising and renormalising.
    pub fn weights_for(&self, complexity: Complexity) -> WeightSet {
        if self.adjust_for_complexity {
            self.weights.adjusted_for(complexity)
        } else {
            self.weights
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_profile_ignores_complexity() {
        let profile = MatchingProfile::standard();
        assert_eq!(profile.weights_for(Complexity::High), DEFAULT_WEIGHTS);
        assert_eq!(profile.rating_scale, 5.0);
    }

    #[test]
    fn marketplace_profile_adjusts_for_complexity() {
        let profile = MatchingProfile::for_source(RosterSource::Marketplace);
        assert_eq!(profile.rating_scale, 100.0);
        assert_eq!(profile.collaborative, CollaborativeVariant::Roster);
        assert_eq!(profile.weights_for(Complexity::Low).hourly_rate, 0.2);
    }
}
