use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::Complexity;

/// Weights used when no profile overrides them.
pub const DEFAULT_WEIGHTS: WeightSet = WeightSet {
    content: 0.3,
    collaborative: 0.4,
    experience: 0.2,
    rating: 0.1,
    top_rated: 0.0,
    hourly_rate: 0.0,
};

/// Base weights for marketplace rosters, before complexity adjustment.
pub const MARKETPLACE_WEIGHTS: WeightSet = WeightSet {
    content: 0.5,
    collaborative: 0.4,
    experience: 0.2,
    rating: 0.1,
    top_rated: 0.3,
    hourly_rate: 0.0,
};

/// Named fusion weights.
///
/// `top_rated` and `hourly_rate` contribute no score term of their own; they
/// only dilute the other weights when the set is renormalised.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightSet {
    pub content: f64,
    pub collaborative: f64,
    pub experience: f64,
    pub rating: f64,
    pub top_rated: f64,
    pub hourly_rate: f64,
}

impl Default for WeightSet {
    fn default() -> Self {
        DEFAULT_WEIGHTS
    }
}

impl WeightSet {
    pub fn sum(&self) -> f64 {
        self.content
            + self.collaborative
            + self.experience
            + self.rating
            + self.top_rated
            + self.hourly_rate
    }

    /// Replaces negative or non-finite weights with zero.
    pub fn sanitized(self) -> Self {
        let clean = |name: &str, value: f64| {
            if value.is_finite() && value >= 0.0 {
                value
            } else {
                warn!(weight = name, value, "invalid weight replaced with 0");
                0.0
            }
        };

        Self {
            content: clean("content", self.content),
            collaborative: clean("collaborative", self.collaborative),
            experience: clean("experience", self.experience),
            rating: clean("rating", self.rating),
            top_rated: clean("top_rated", self.top_rated),
            hourly_rate: clean("hourly_rate", self.hourly_rate),
        }
    }

    /// Divides every weight by the sum when the sum exceeds 1.0.
    pub fn normalized(self) -> Self {
        let sum = self.sum();
        if sum <= 1.0 {
            return self;
        }

        Self {
            content: self.content / sum,
            collaborative: self.collaborative / sum,
            experience: self.experience / sum,
            rating: self.rating / sum,
            top_rated: self.top_rated / sum,
            hourly_rate: self.hourly_rate / sum,
        }
    }

    /// Marketplace complexity tweak: high complexity favours content,
    /// collaborative and top-rated signals; low complexity weights price.
    pub fn adjusted_for(self, complexity: Complexity) -> Self {
        match complexity {
            Complexity::High => Self {
                content: self.content + 0.1,
                collaborative: self.collaborative + 0.1,
                top_rated: self.top_rated + 0.1,
                ..self
            },
            Complexity::Low => Self {
                hourly_rate: 0.2,
                ..self
            },
            Complexity::Medium => self,
        }
    }

    /// Sanitised and, if needed, renormalised weights ready for fusion.
    pub fn resolve(self) -> Self {
        self.sanitized().normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn default_weights_sum_to_one_and_stay_untouched() {
        assert!((DEFAULT_WEIGHTS.sum() - 1.0).abs() < EPS);
        assert_eq!(DEFAULT_WEIGHTS.resolve(), DEFAULT_WEIGHTS);
    }

    #[test]
    fn over_budget_sets_renormalise_to_one() {
        let sets = [
            MARKETPLACE_WEIGHTS,
            MARKETPLACE_WEIGHTS.adjusted_for(Complexity::High),
            WeightSet {
                content: 3.0,
                collaborative: 2.0,
                experience: 0.5,
                rating: 0.5,
                top_rated: 0.0,
                hourly_rate: 0.0,
            },
        ];
        for set in sets {
            assert!(set.sum() > 1.0);
            let resolved = set.resolve();
            assert!((resolved.sum() - 1.0).abs() < EPS, "sum was {}", resolved.sum());
            assert!((resolved.content / resolved.collaborative - set.content / set.collaborative).abs() < EPS);
        }
    }

    #[test]
    fn under_budget_sets_are_not_scaled_up() {
        let set = WeightSet {
            content: 0.2,
            collaborative: 0.2,
            experience: 0.0,
            rating: 0.0,
            top_rated: 0.0,
            hourly_rate: 0.0,
        };
        assert_eq!(set.resolve(), set);
    }

    #[test]
    fn invalid_weights_become_zero() {
        let set = WeightSet {
            content: -1.0,
            collaborative: f64::NAN,
            experience: f64::INFINITY,
            ..DEFAULT_WEIGHTS
        };
        let resolved = set.resolve();
        assert_eq!(resolved.content, 0.0);
        assert_eq!(resolved.collaborative, 0.0);
        assert_eq!(resolved.experience, 0.0);
        assert_eq!(resolved.rating, 0.1);
    }

    #[test]
    fn complexity_adjustments_follow_tier() {
        let high = MARKETPLACE_WEIGHTS.adjusted_for(Complexity::High);
        assert!((high.content - 0.6).abs() < EPS);
        assert!((high.collaborative - 0.5).abs() < EPS);
        assert!((high.top_rated - 0.4).abs() < EPS);

        let low = MARKETPLACE_WEIGHTS.adjusted_for(Complexity::Low);
        assert_eq!(low.hourly_rate, 0.2);
        assert_eq!(low.content, MARKETPLACE_WEIGHTS.content);

        assert_eq!(
            MARKETPLACE_WEIGHTS.adjusted_for(Complexity::Medium),
            MARKETPLACE_WEIGHTS
        );
    }
}
