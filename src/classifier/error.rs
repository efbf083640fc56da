use crate::artifacts::ArtifactError;

/// Errors surfaced by the classifier and its builder.
#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    /// Error occurred while loading or verifying an artifact
    #[error("Artifact error: {0}")]
    Artifact(#[from] ArtifactError),
    /// Error occurred during the build phase
    #[error("Build error: {0}")]
    BuildError(String),
    /// The vectorizer and model artifacts disagree on feature dimensionality.
    /// This is a configuration error and is always fatal.
    #[error("Dimension mismatch: vectorizer produces {vectorizer} features but the model expects {model}")]
    DimensionMismatch { vectorizer: usize, model: usize },
    /// The input reduced to an empty string after normalization; no inference
    /// was attempted
    #[error("Input contains no classifiable text after normalization")]
    EmptyInput,
    /// Error occurred while making predictions
    #[error("Prediction error: {0}")]
    PredictionError(String),
    /// Error occurred due to invalid input parameters
    #[error("Validation error: {0}")]
    ValidationError(String),
}
