use strsim::normalized_levenshtein;

/// Similarity ratio a required/possessed pair must exceed to count.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Tolerant overlap count between required and possessed skill sets.
///
/// Every pair above the threshold counts, so one required term can match
/// several possessed terms. Both sets are small, so the comparison is a plain
/// nested loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzySkillMatcher {
    threshold: f64,
}

impl Default for FuzzySkillMatcher {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl FuzzySkillMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Case-insensitive edit-distance ratio in [0, 1].
    pub fn similarity(a: &str, b: &str) -> f64 {
        normalized_levenshtein(&a.trim().to_lowercase(), &b.trim().to_lowercase())
    }

    pub fn overlap<R, P>(&self, required: &[R], possessed: &[P]) -> usize
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        required
            .iter()
            .map(|req| {
                possessed
                    .iter()
                    .filter(|have| Self::similarity(req.as_ref(), have.as_ref()) > self.threshold)
                    .count()
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_matches_ignore_case() {
        let matcher = FuzzySkillMatcher::default();
        assert_eq!(matcher.overlap(&["React", "CSS"], &["react", "css", "cooking"]), 2);
    }

    #[test]
    fn near_spellings_count() {
        let matcher = FuzzySkillMatcher::default();
        assert!(FuzzySkillMatcher::similarity("javascript", "javascrpt") > 0.7);
        assert_eq!(matcher.overlap(&["javascript"], &["JavaScrpt"]), 1);
        assert_eq!(matcher.overlap(&["rust"], &["ruby"]), 0);
    }

    #[test]
    fn multiple_matches_per_term_are_all_counted() {
        let matcher = FuzzySkillMatcher::default();
        assert_eq!(matcher.overlap(&["react"], &["React", "react ", "reactt"]), 3);
    }

    #[test]
    fn swapping_required_and_possessed_keeps_the_count() {
        let matcher = FuzzySkillMatcher::default();
        let required = ["React", "javascrpt", "go"];
        let possessed = ["react ", "JavaScript", "Rust", "golang"];

        let forward = matcher.overlap(&required, &possessed);
        let backward = matcher.overlap(&possessed, &required);
        assert_eq!(forward, 2);
        assert_eq!(forward, backward);
    }

    #[test]
    fn empty_sets_have_no_overlap() {
        let matcher = FuzzySkillMatcher::default();
        let none: [&str; 0] = [];
        assert_eq!(matcher.overlap(&none, &["rust"]), 0);
        assert_eq!(matcher.overlap(&["rust"], &none), 0);
    }
}
