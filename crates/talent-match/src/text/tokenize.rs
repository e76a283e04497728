use super::stopwords::is_stop_word;

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '/' | '_' | '-' | '\'')
}

/// Lowercased word tokens with stop words removed and tokens of two
/// characters or fewer dropped.
///
/// Technology names keep their punctuation (`node.js`, `c++`, `ci/cd`);
/// sentence punctuation hanging off either end of a token is trimmed.
pub fn word_tokens(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .map(|raw| raw.trim_matches(|c: char| matches!(c, '.' | '/' | '-' | '\'')))
        .filter(|token| token.chars().count() > 2 && !is_stop_word(token))
        .map(str::to_string)
        .collect()
}

/// Terms of the vector space: lowercased runs of two or more word
/// characters (letters, digits, underscore), stop words removed.
pub fn vector_terms(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|term| term.chars().count() >= 2 && !is_stop_word(term))
        .map(str::to_string)
        .collect()
}
