use std::collections::HashMap;

use super::stopwords::is_stop_word;

/// Candidate keyword phrase and its RAKE score (sum of member word scores).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPhrase {
    pub phrase: String,
    pub score: f64,
}

fn is_phrase_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '+' | '#')
}

fn close_word(word: &mut String, phrase: &mut Vec<String>, phrases: &mut Vec<Vec<String>>) {
    if word.is_empty() {
        return;
    }
    if is_stop_word(word) {
        if !phrase.is_empty() {
            phrases.push(std::mem::take(phrase));
        }
    } else {
        phrase.push(std::mem::take(word));
    }
    word.clear();
}

/// Split text into candidate phrases: runs of content words bounded by
/// stop words or punctuation.
fn candidate_phrases(text: &str) -> Vec<Vec<String>> {
    let mut phrases = Vec::new();
    let mut phrase: Vec<String> = Vec::new();
    let mut word = String::new();

    for c in text.to_lowercase().chars() {
        if is_phrase_char(c) || c == '\'' {
            word.push(c);
        } else if c.is_whitespace() {
            close_word(&mut word, &mut phrase, &mut phrases);
        } else {
            close_word(&mut word, &mut phrase, &mut phrases);
            if !phrase.is_empty() {
                phrases.push(std::mem::take(&mut phrase));
            }
        }
    }
    close_word(&mut word, &mut phrase, &mut phrases);
    if !phrase.is_empty() {
        phrases.push(phrase);
    }
    phrases
}

/// Rapid Automatic Keyword Extraction over a single text.
///
/// Word score is degree / frequency, where degree counts co-occurring words
/// within the same phrase (including the word itself). Phrases are returned
/// best first; equal scores keep first-appearance order.
pub fn rank_phrases(text: &str) -> Vec<RankedPhrase> {
    let phrases = candidate_phrases(text);

    let mut frequency: HashMap<&str, f64> = HashMap::new();
    let mut degree: HashMap<&str, f64> = HashMap::new();
    for phrase in &phrases {
        let len = phrase.len() as f64;
        for word in phrase {
            *frequency.entry(word.as_str()).or_insert(0.0) += 1.0;
            *degree.entry(word.as_str()).or_insert(0.0) += len;
        }
    }

    let mut ranked: Vec<RankedPhrase> = phrases
        .iter()
        .map(|phrase| RankedPhrase {
            phrase: phrase.join(" "),
            score: phrase
                .iter()
                .map(|w| degree[w.as_str()] / frequency[w.as_str()])
                .sum(),
        })
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrases_break_on_stop_words_and_punctuation() {
        let ranked = rank_phrases("Build a React web app, with CSS animations");
        let phrases: Vec<&str> = ranked.iter().map(|p| p.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["react web app", "css animations", "build"]);
    }

    #[test]
    fn longer_phrases_score_higher() {
        let ranked = rank_phrases("machine learning pipeline. python");
        assert_eq!(ranked[0].phrase, "machine learning pipeline");
        assert!((ranked[0].score - 9.0).abs() < 1e-9);
        assert!((ranked[1].score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_yields_no_phrases() {
        assert!(rank_phrases("  the a an ").is_empty());
    }
}
