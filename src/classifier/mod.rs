pub mod builder;
#[allow(clippy::module_inception)]
pub mod classifier;
pub mod error;
pub mod model;
pub mod vectorizer;

pub use builder::ClassifierBuilder;
pub use classifier::{Classifier, ClassifierInfo};
pub use error::ClassifierError;
pub use model::{Label, LinearModel, MultinomialNbModel, Prediction, SpamModel};
pub use vectorizer::TfidfVectorizer;
