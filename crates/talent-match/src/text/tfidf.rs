use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::tokenize::vector_terms;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VectorizeError {
    #[error("no documents supplied to the vectorizer")]
    NoDocuments,
    #[error("empty vocabulary; documents are empty or contain only stop words")]
    EmptyVocabulary,
}

/// L2-normalised sparse vector keyed by vocabulary index, sorted by index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    fn from_counts(counts: BTreeMap<usize, f64>) -> Self {
        let norm = counts.values().map(|v| v * v).sum::<f64>().sqrt();
        if norm == 0.0 {
            return Self::default();
        }
        Self {
            entries: counts.into_iter().map(|(idx, v)| (idx, v / norm)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j, mut acc) = (0, 0, 0.0);
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    acc += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        acc
    }
}

/// Cosine similarity of two vectors from the same space, clamped to [0, 1].
///
/// Both inputs are already unit length, so this is a plain dot product;
/// an empty vector yields 0.
pub fn cosine_similarity(a: &SparseVector, b: &SparseVector) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let sim = a.dot(b);
    if sim.is_finite() {
        sim.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Fitted TF-IDF vector space.
///
/// Term frequency is the raw count, idf is smoothed
/// (`ln((1 + n) / (1 + df)) + 1`) and every vector is L2-normalised.
/// Vocabulary indices follow alphabetical term order.
#[derive(Debug, Clone)]
pub struct TfidfModel {
    vocabulary: HashMap<String, usize>,
    terms: Vec<String>,
    idf: Vec<f64>,
}

impl TfidfModel {
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self, VectorizeError> {
        Self::fit_transform(documents).map(|(model, _)| model)
    }

    /// Fit the space and return each document's vector, aligned to input order.
    pub fn fit_transform<S: AsRef<str>>(
        documents: &[S],
    ) -> Result<(Self, Vec<SparseVector>), VectorizeError> {
        if documents.is_empty() {
            return Err(VectorizeError::NoDocuments);
        }

        let tokenized: Vec<Vec<String>> = documents
            .iter()
            .map(|doc| vector_terms(doc.as_ref()))
            .collect();

        let terms: Vec<String> = tokenized
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if terms.is_empty() {
            return Err(VectorizeError::EmptyVocabulary);
        }

        let vocabulary: HashMap<String, usize> = terms
            .iter()
            .enumerate()
            .map(|(idx, term)| (term.clone(), idx))
            .collect();

        let mut document_frequency = vec![0usize; terms.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<usize> = tokens.iter().map(|t| vocabulary[t]).collect();
            for idx in unique {
                document_frequency[idx] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let model = Self {
            vocabulary,
            terms,
            idf,
        };
        let vectors = tokenized
            .iter()
            .map(|tokens| model.vectorize(tokens))
            .collect();
        Ok((model, vectors))
    }

    /// Project a new document into the fitted space; unknown terms are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        self.vectorize(&vector_terms(document))
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn vocabulary_len(&self) -> usize {
        self.terms.len()
    }

    fn vectorize(&self, tokens: &[String]) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, value) in counts.iter_mut() {
            *value *= self.idf[*idx];
        }
        SparseVector::from_counts(counts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_rejects_stop_word_only_documents() {
        let err = TfidfModel::fit(&["the and of", ""]).expect_err("no vocabulary");
        assert_eq!(err, VectorizeError::EmptyVocabulary);
        assert_eq!(
            TfidfModel::fit::<&str>(&[]).expect_err("no documents"),
            VectorizeError::NoDocuments
        );
    }

    #[test]
    fn identical_documents_have_unit_similarity() {
        let (model, vectors) =
            TfidfModel::fit_transform(&["rust systems programming", "python data science"])
                .expect("fit");
        let query = model.transform("Rust systems programming");
        assert!((cosine_similarity(&query, &vectors[0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&query, &vectors[1]), 0.0);
    }

    #[test]
    fn shared_terms_are_down_weighted() {
        let (model, _) =
            TfidfModel::fit_transform(&["react web", "django web"]).expect("fit");
        let vector = model.transform("react web");
        let weight = |term: &str| {
            vector
                .entries()
                .iter()
                .find(|(idx, _)| model.term(*idx) == Some(term))
                .map(|(_, w)| *w)
                .expect("term present")
        };
        assert!(weight("react") > weight("web"));
    }

    #[test]
    fn unknown_terms_project_to_empty_vector() {
        let model = TfidfModel::fit(&["kotlin android"]).expect("fit");
        assert!(model.transform("gardening").is_empty());
        assert_eq!(model.vocabulary_len(), 2);
    }
}
