use std::collections::HashSet;

use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use stopwords::{Language, Stopwords, NLTK};
use unicode_segmentation::UnicodeSegmentation;

lazy_static! {
    /// NLTK English stopword list, compiled into the binary. The original
    /// deployment fetched this at runtime; embedding it removes the network
    /// dependency entirely.
    static ref STOPWORDS: HashSet<&'static str> = NLTK::stopwords(Language::English)
        .expect("NLTK English stopword list is compiled in")
        .iter()
        .copied()
        .collect();
}

/// Normalizes raw message text into the bag-of-stems form the vectorizer was
/// trained on.
///
/// Changing any step changes every downstream classification, so the
/// pipeline is a frozen contract:
/// 1. Unicode lowercasing
/// 2. UAX-#29 word segmentation
/// 3. keep only fully-alphanumeric tokens
/// 4. drop NLTK English stopwords
/// 5. Snowball English (Porter2) stemming
/// 6. join with single spaces
///
/// # Example
/// ```rust
/// use mailsift::Normalizer;
///
/// let normalizer = Normalizer::new();
/// assert_eq!(normalizer.normalize("Win a FREE prize now!!!"), "win free prize");
/// assert_eq!(normalizer.normalize("   "), "");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    stemmer: Algorithm,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            stemmer: Algorithm::English,
        }
    }

    /// Reduces `raw` to a single space-joined string of lowercase
    /// alphanumeric stems. Returns an empty string when nothing survives
    /// filtering; never fails on any well-formed input.
    pub fn normalize(&self, raw: &str) -> String {
        let stemmer = Stemmer::create(self.stemmer);
        let lowered = raw.to_lowercase();

        let stems: Vec<String> = lowered
            .unicode_words()
            .filter(|token| token.chars().all(char::is_alphanumeric))
            .filter(|token| !STOPWORDS.contains(*token))
            .map(|token| stemmer.stem(token).into_owned())
            .collect();

        stems.join(" ")
    }

    /// True when `raw` carries no classifiable content, i.e. normalization
    /// would produce an empty string.
    pub fn is_empty_after_normalization(&self, raw: &str) -> bool {
        self.normalize(raw).is_empty()
    }
}
