use tracing::{debug, warn};

use super::domain::Candidate;
use crate::text::{cosine_similarity, SparseVector, TfidfModel};

/// Vector-space similarity between a work description and candidate profiles.
///
/// `train` must be called again whenever the candidate set changes; vectors
/// are aligned to the candidate order seen at training time.
#[derive(Debug, Default)]
pub struct ContentScorer {
    space: Option<TfidfModel>,
    profiles: Vec<SparseVector>,
}

impl ContentScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn train(&mut self, candidates: &[Candidate]) {
        let texts: Vec<String> = candidates.iter().map(Candidate::profile_text).collect();
        match TfidfModel::fit_transform(&texts) {
            Ok((space, profiles)) => {
                debug!(
                    candidates = candidates.len(),
                    vocabulary = space.vocabulary_len(),
                    "content space trained"
                );
                self.space = Some(space);
                self.profiles = profiles;
            }
            Err(err) => {
                warn!(error = %err, "content space unavailable; content scores will be zero");
                self.space = None;
                self.profiles.clear();
            }
        }
    }

    pub fn is_trained(&self) -> bool {
        self.space.is_some()
    }

    /// One cosine similarity in [0, 1] per candidate, in candidate order.
    pub fn score(&self, description: &str, candidates: &[Candidate]) -> Vec<f64> {
        let Some(space) = &self.space else {
            return vec![0.0; candidates.len()];
        };

        let query = space.transform(description);
        (0..candidates.len())
            .map(|idx| {
                self.profiles
                    .get(idx)
                    .map(|profile| cosine_similarity(&query, profile))
                    .unwrap_or(0.0)
            })
            .collect()
    }
}
