//! Keyword digest extractor.
//!
//! TF-IDF over a one-document corpus: the smoothed IDF of every term is 1, so the
//! score is the L2-normalized term frequency. Terms are lowercased runs of two or
//! more word characters with English stop-words removed.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Default number of keywords kept per answer.
pub const DEFAULT_KEYWORD_COUNT: usize = 5;

static TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("valid regex"));

/// English stop-word list (the common scikit-learn set).
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "across", "after", "afterwards", "again", "against", "all", "almost",
    "alone", "along", "already", "also", "although", "always", "am", "among", "amongst",
    "amoungst", "amount", "an", "and", "another", "any", "anyhow", "anyone", "anything", "anyway",
    "anywhere", "are", "around", "as", "at", "back", "be", "became", "because", "become",
    "becomes", "becoming", "been", "before", "beforehand", "behind", "being", "below", "beside",
    "besides", "between", "beyond", "bill", "both", "bottom", "but", "by", "call", "can",
    "cannot", "cant", "co", "con", "could", "couldnt", "cry", "de", "describe", "detail", "do",
    "done", "down", "due", "during", "each", "eg", "eight", "either", "eleven", "else",
    "elsewhere", "empty", "enough", "etc", "even", "ever", "every", "everyone", "everything",
    "everywhere", "except", "few", "fifteen", "fifty", "fill", "find", "fire", "first", "five",
    "for", "former", "formerly", "forty", "found", "four", "from", "front", "full", "further",
    "get", "give", "go", "had", "has", "hasnt", "have", "he", "hence", "her", "here",
    "hereafter", "hereby", "herein", "hereupon", "hers", "herself", "him", "himself", "his",
    "how", "however", "hundred", "i", "ie", "if", "in", "inc", "indeed", "interest", "into", "is",
    "it", "its", "itself", "keep", "last", "latter", "latterly", "least", "less", "ltd", "made",
    "many", "may", "me", "meanwhile", "might", "mill", "mine", "more", "moreover", "most",
    "mostly", "move", "much", "must", "my", "myself", "name", "namely", "neither", "never",
    "nevertheless", "next", "nine", "no", "nobody", "none", "noone", "nor", "not", "nothing",
    "now", "nowhere", "of", "off", "often", "on", "once", "one", "only", "onto", "or", "other",
    "others", "otherwise", "our", "ours", "ourselves", "out", "over", "own", "part", "per",
    "perhaps", "please", "put", "rather", "re", "same", "see", "seem", "seemed", "seeming",
    "seems", "serious", "several", "she", "should", "show", "side", "since", "sincere", "six",
    "sixty", "so", "some", "somehow", "someone", "something", "sometime", "sometimes",
    "somewhere", "still", "such", "system", "take", "ten", "than", "that", "the", "their",
    "them", "themselves", "then", "thence", "there", "thereafter", "thereby", "therefore",
    "therein", "thereupon", "these", "they", "thick", "thin", "third", "this", "those", "though",
    "three", "through", "throughout", "thru", "thus", "to", "together", "too", "top", "toward",
    "towards", "twelve", "twenty", "two", "un", "under", "until", "up", "upon", "us", "very",
    "via", "was", "we", "well", "were", "what", "whatever", "when", "whence", "whenever",
    "where", "whereafter", "whereas", "whereby", "wherein", "whereupon", "wherever", "whether",
    "which", "while", "whither", "who", "whoever", "whole", "whom", "whose", "why", "will",
    "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

fn is_stop_word(term: &str) -> bool {
    STOP_WORDS.contains(&term)
}

/// A scored keyword candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct TermScore {
    pub term: String,
    pub count: usize,
    pub score: f64,
}

/// Scores every distinct qualifying term, best first.
///
/// Order: score descending, then raw count descending, then first occurrence.
pub fn score_terms(text: &str) -> Vec<TermScore> {
    // term -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (pos, m) in TOKEN.find_iter(text).enumerate() {
        let term = m.as_str().to_lowercase();
        if is_stop_word(&term) {
            continue;
        }
        counts.entry(term).or_insert((0, pos)).0 += 1;
    }
    if counts.is_empty() {
        return Vec::new();
    }

    let norm = counts
        .values()
        .map(|(c, _)| (*c as f64).powi(2))
        .sum::<f64>()
        .sqrt();

    let mut scored: Vec<(TermScore, usize)> = counts
        .into_iter()
        .map(|(term, (count, first))| {
            (
                TermScore {
                    term,
                    count,
                    score: count as f64 / norm,
                },
                first,
            )
        })
        .collect();
    scored.sort_by(|(a, a_first), (b, b_first)| {
        b.score
            .total_cmp(&a.score)
            .then(b.count.cmp(&a.count))
            .then(a_first.cmp(b_first))
    });
    scored.into_iter().map(|(t, _)| t).collect()
}

/// Top `n` keywords of `text`. Empty text or stop-words only yield an empty list.
pub fn extract_keywords(text: &str, n: usize) -> Vec<String> {
    score_terms(text)
        .into_iter()
        .take(n)
        .map(|t| t.term)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(extract_keywords("", DEFAULT_KEYWORD_COUNT).is_empty());
        assert!(extract_keywords("   \n ", DEFAULT_KEYWORD_COUNT).is_empty());
    }

    #[test]
    fn test_stop_words_only_yields_nothing() {
        assert!(extract_keywords("the and of it is a", DEFAULT_KEYWORD_COUNT).is_empty());
    }

    #[test]
    fn test_returns_exactly_n_when_enough_terms() {
        let text = "Photosynthesis converts light energy into chemical energy stored in glucose \
                    using chlorophyll, carbon dioxide and water.";
        let keywords = extract_keywords(text, DEFAULT_KEYWORD_COUNT);
        assert_eq!(keywords.len(), 5);
        assert_eq!(keywords[0], "energy");
    }

    #[test]
    fn test_fewer_terms_than_n_returns_all() {
        assert_eq!(extract_keywords("Osmosis osmosis membrane", 5), vec!["osmosis", "membrane"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let keywords = extract_keywords("zebra apple mango", 3);
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_case_insensitive_and_single_chars_ignored() {
        let keywords = extract_keywords("Cell cell CELL x nucleus", 5);
        assert_eq!(keywords, vec!["cell", "nucleus"]);
    }

    #[test]
    fn test_scores_are_l2_normalized() {
        let scores = score_terms("atom atom atom atom electron electron electron");
        let sum_sq: f64 = scores.iter().map(|t| t.score * t.score).sum();
        assert!((sum_sq - 1.0).abs() < 1e-9);
        assert_eq!(scores[0].term, "atom");
        assert_eq!(scores[0].count, 4);
    }
}
