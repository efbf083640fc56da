//! A thread-safe spam/not-spam message classifier over pre-trained TF-IDF
//! artifacts.
//!
//! The pipeline is fixed: raw text is normalized (lowercase → UAX-29 word
//! segmentation → alphanumeric filter → NLTK English stopword removal →
//! Porter2 stemming), vectorized against a pre-built vocabulary with IDF
//! weights, and scored by a pre-trained model. Both artifacts are loaded once
//! at startup and are read-only afterwards; there is no training path and no
//! runtime network dependency.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::HashMap;
//! use mailsift::{Classifier, LinearModel, SpamModel, TfidfVectorizer};
//!
//! let vocabulary = HashMap::from([("free".to_string(), 0), ("lunch".to_string(), 1)]);
//! let vectorizer = TfidfVectorizer::new(vocabulary, vec![1.0, 1.0])?;
//! let model = SpamModel::Linear(LinearModel::new(vec![2.0, -2.0], 0.0));
//!
//! let classifier = Classifier::builder()
//!     .with_parts(vectorizer, model)
//!     .build()?;
//!
//! let prediction = classifier.predict("FREE entry! Win now!")?;
//! println!("label: {}", prediction.label);
//! # Ok(())
//! # }
//! ```
//!
//! Production deployments load the artifacts from disk instead:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use mailsift::{ArtifactStore, Classifier};
//!
//! let store = ArtifactStore::new("artifacts");
//! let classifier = Classifier::builder()
//!     .with_artifact_store(&store)?
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is immutable after construction and can be shared across
//! threads using `Arc`; the web front end in this crate does exactly that,
//! one classifier serving every request.

pub mod artifacts;
pub mod classifier;
pub mod normalizer;
pub mod server;

pub use artifacts::{ArtifactError, ArtifactStore};
pub use classifier::{
    Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, Label, LinearModel,
    MultinomialNbModel, Prediction, SpamModel, TfidfVectorizer,
};
pub use normalizer::Normalizer;

pub fn init_logger() {
    env_logger::init();
}
