use std::collections::BTreeSet;

use aho_corasick::AhoCorasick;
use tracing::{debug, warn};

use super::vocabulary::SKILL_VOCABULARY;
use crate::text::{rank_phrases, word_tokens, TfidfModel};

const TOP_TFIDF_TERMS: usize = 10;
const MIN_TERM_CHARS: usize = 3;

/// Derives a normalised set of skill terms from free text.
///
/// Four independent passes are unioned:
/// 1. literal, case-insensitive vocabulary matches;
/// 2. RAKE-ranked keyword phrases;
/// 3. stop-word filtered word tokens longer than two characters;
/// 4. the top TF-IDF terms of the text taken as a one-document corpus.
///
/// Terms from passes 2-4 survive only if some vocabulary term occurs inside
/// them. Short vocabulary entries such as `r` or `ai` make that filter
/// permissive; that trade-off is kept as-is. Terms under three characters
/// are dropped and the result is de-duplicated.
#[derive(Debug, Clone)]
pub struct SkillExtractor {
    vocabulary: Vec<String>,
    /// Every vocabulary term as an overlapping substring matcher. `None`
    /// when the automaton could not be built; extraction then yields nothing.
    matcher: Option<AhoCorasick>,
}

impl Default for SkillExtractor {
    fn default() -> Self {
        Self::with_vocabulary(SKILL_VOCABULARY.iter().copied())
    }
}

impl SkillExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vocabulary<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vocabulary: Vec<String> = terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_lowercase())
            .filter(|term| !term.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let matcher = match AhoCorasick::new(&vocabulary) {
            Ok(matcher) => Some(matcher),
            Err(err) => {
                warn!(error = %err, "skill vocabulary matcher unavailable");
                None
            }
        };
        Self {
            vocabulary,
            matcher,
        }
    }

    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let text = text.to_lowercase();

        let literal: Vec<String> = match &self.matcher {
            Some(matcher) => matcher
                .find_overlapping_iter(&text)
                .map(|found| found.pattern().as_usize())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .filter_map(|index| self.vocabulary.get(index).cloned())
                .collect(),
            None => Vec::new(),
        };

        let phrases: Vec<String> = rank_phrases(&text)
            .into_iter()
            .map(|ranked| ranked.phrase)
            .collect();

        let tokens = word_tokens(&text);
        let weighted = self.top_weighted_terms(&text);

        debug!(
            literal = literal.len(),
            phrases = phrases.len(),
            tokens = tokens.len(),
            weighted = weighted.len(),
            "skill extraction passes complete"
        );

        literal
            .into_iter()
            .chain(phrases)
            .chain(tokens)
            .chain(weighted)
            .map(|term| term.trim().to_string())
            .filter(|term| term.chars().count() >= MIN_TERM_CHARS && self.is_grounded(term))
            .collect()
    }

    /// Skills as an ordered list, for callers that need a stable sequence.
    pub fn extract_list(&self, text: &str) -> Vec<String> {
        self.extract(text).into_iter().collect()
    }

    fn is_grounded(&self, term: &str) -> bool {
        self.matcher
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(term))
    }

    fn top_weighted_terms(&self, text: &str) -> Vec<String> {
        let (model, vectors) = match TfidfModel::fit_transform(&[text]) {
            Ok(fitted) => fitted,
            Err(err) => {
                warn!(error = %err, "tf-idf pass skipped");
                return Vec::new();
            }
        };

        let Some(vector) = vectors.into_iter().next() else {
            return Vec::new();
        };

        let mut scored: Vec<(&str, f64)> = vector
            .entries()
            .iter()
            .filter_map(|(idx, weight)| model.term(*idx).map(|term| (term, *weight)))
            .collect();
        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        scored
            .into_iter()
            .take(TOP_TFIDF_TERMS)
            .map(|(term, _)| term.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_literal_and_phrase_terms() {
        let extractor = SkillExtractor::new();
        let skills = extractor.extract("Build a React web app with CSS");
        assert!(skills.contains("react"));
        assert!(skills.contains("css"));
        assert!(skills.contains("react web app"));
    }

    #[test]
    fn drops_terms_without_a_vocabulary_anchor() {
        let extractor = SkillExtractor::with_vocabulary(["kotlin"]);
        let skills = extractor.extract("Kotlin developer needed for banking app");
        assert!(skills.contains("kotlin"));
        assert!(skills.contains("kotlin developer needed"));
        assert!(!skills.contains("banking"));
        assert!(!skills.contains("app"));
    }

    #[test]
    fn empty_or_stop_word_text_degrades_to_empty_set() {
        let extractor = SkillExtractor::new();
        assert!(extractor.extract("").is_empty());
        assert!(extractor.extract("the of and").is_empty());
    }

    #[test]
    fn overlapping_vocabulary_terms_are_all_found() {
        let extractor = SkillExtractor::with_vocabulary(["java", "javascript", "script"]);
        let skills = extractor.extract("JavaScript");
        assert!(skills.contains("java"));
        assert!(skills.contains("javascript"));
        assert!(skills.contains("script"));
    }

    #[test]
    fn short_vocabulary_hits_are_dropped() {
        let extractor = SkillExtractor::with_vocabulary(["go", "ai"]);
        let skills = extractor.extract("go, ai");
        assert!(skills.is_empty());
    }
}
