use std::sync::Arc;

use log::debug;

use super::error::ClassifierError;
use super::model::{Prediction, SpamModel};
use super::vectorizer::TfidfVectorizer;
use crate::normalizer::Normalizer;

/// A thread-safe spam classifier over pre-trained, read-only artifacts.
///
/// Holds the normalizer, vectorizer and model behind `Arc`s; nothing mutates
/// after construction, so a single instance can serve concurrent requests
/// without synchronization. Construction goes through [`ClassifierBuilder`],
/// which is where artifact loading and the dimensionality check live.
///
/// # Example
/// ```rust
/// use std::collections::HashMap;
/// use mailsift::{Classifier, LinearModel, SpamModel, TfidfVectorizer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let vocabulary = HashMap::from([("free".to_string(), 0), ("lunch".to_string(), 1)]);
/// let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0, 1.0])?;
/// let model = SpamModel::Linear(LinearModel::new(vec![2.0, -2.0], 0.0));
///
/// let classifier = Classifier::builder()
///     .with_parts(vectorizer, model)
///     .build()?;
///
/// let prediction = classifier.predict("FREE entry!!")?;
/// assert!(prediction.label.is_spam());
/// # Ok(())
/// # }
/// ```
///
/// [`ClassifierBuilder`]: super::builder::ClassifierBuilder
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Where the vectorizer artifact came from, when loaded from disk.
    pub vectorizer_path: Option<String>,
    /// Where the model artifact came from, when loaded from disk.
    pub model_path: Option<String>,
    pub(crate) normalizer: Normalizer,
    pub(crate) vectorizer: Arc<TfidfVectorizer>,
    pub(crate) model: Arc<SpamModel>,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

/// A snapshot of the classifier's configuration.
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    pub vectorizer_path: Option<String>,
    pub model_path: Option<String>,
    pub vocabulary_size: usize,
    pub feature_dimension: usize,
}

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> ClassifierInfo {
        ClassifierInfo {
            vectorizer_path: self.vectorizer_path.clone(),
            model_path: self.model_path.clone(),
            vocabulary_size: self.vectorizer.vocabulary_size(),
            feature_dimension: self.vectorizer.dimension(),
        }
    }

    /// The normalizer this classifier feeds its vectorizer with.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Classifies a raw message.
    ///
    /// Normalizes the input first; if nothing survives normalization the
    /// vectorizer and model are never invoked and `EmptyInput` is returned,
    /// so callers can render a "please enter a message" state instead of a
    /// verdict. Deterministic: the same artifacts and input always produce
    /// the same prediction.
    ///
    /// # Errors
    /// * `EmptyInput` - the message is empty, whitespace-only, or reduces to
    ///   nothing (only stopwords, punctuation, or symbols)
    pub fn predict(&self, raw: &str) -> Result<Prediction, ClassifierError> {
        let normalized = self.normalizer.normalize(raw);
        if normalized.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let features = self.vectorizer.transform(&normalized);
        let prediction = self.model.predict(&features);
        debug!(
            "Classified {:?} -> {} (confidence: {:?})",
            normalized, prediction.label, prediction.confidence
        );
        Ok(prediction)
    }
}
