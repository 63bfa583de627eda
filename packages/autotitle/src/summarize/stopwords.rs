//! English stopword list used by the token normalizer.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Common English function words. Apostrophes are stripped before lookup,
/// so contractions appear without them.
const ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "ain", "all", "am", "an", "and", "any",
    "are", "aren", "arent", "as", "at", "be", "because", "been", "before", "being", "below",
    "between", "both", "but", "by", "can", "couldn", "couldnt", "d", "did", "didn", "didnt", "do",
    "does", "doesn", "doesnt", "doing", "don", "dont", "down", "during", "each", "few", "for",
    "from", "further", "had", "hadn", "hadnt", "has", "hasn", "hasnt", "have", "haven", "havent",
    "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "i", "if",
    "in", "into", "is", "isn", "isnt", "it", "its", "itself", "just", "ll", "m", "ma", "me",
    "mightn", "more", "most", "mustn", "my", "myself", "needn", "no", "nor", "not", "now", "o",
    "of", "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "re", "s", "same", "shan", "she", "shes", "should", "shouldn", "shouldnt", "so",
    "some", "such", "t", "than", "that", "thats", "the", "their", "theirs", "them", "themselves",
    "then", "there", "these", "they", "this", "those", "through", "to", "too", "under", "until",
    "up", "ve", "very", "was", "wasn", "wasnt", "we", "were", "weren", "werent", "what", "when",
    "where", "which", "while", "who", "whom", "why", "will", "with", "won", "wont", "wouldn",
    "wouldnt", "y", "you", "youd", "youll", "your", "youre", "yours", "yourself", "yourselves",
    "youve",
];

static STOPWORDS: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| ENGLISH.iter().copied().collect());

/// Check whether a lowercased token is a stopword.
pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_words_are_stopwords() {
        for word in ["the", "are", "too", "both", "can", "dont"] {
            assert!(is_stopword(word), "{word} should be a stopword");
        }
    }

    #[test]
    fn test_content_words_are_kept() {
        for word in ["cats", "mammals", "popular", "rust"] {
            assert!(!is_stopword(word));
        }
    }
}
