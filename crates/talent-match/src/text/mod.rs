//! Small text-analysis toolkit shared by skill extraction and content scoring.
//!
//! Everything here is deterministic and allocation-light: tokenizers that
//! mirror the usual "word tokenizer" and "vectorizer token pattern" behaviour,
//! an English stop-word list, a single-pass RAKE keyword ranker, and a sparse
//! TF-IDF vector space with cosine similarity.

mod rake;
mod stopwords;
mod tfidf;
mod tokenize;

pub use rake::{rank_phrases, RankedPhrase};
pub use stopwords::is_stop_word;
pub use tfidf::{cosine_similarity, SparseVector, TfidfModel, VectorizeError};
pub use tokenize::{vector_terms, word_tokens};
