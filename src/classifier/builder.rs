use std::path::Path;
use std::sync::Arc;

use log::info;

use super::classifier::Classifier;
use super::error::ClassifierError;
use super::model::SpamModel;
use super::vectorizer::TfidfVectorizer;
use crate::artifacts::{load_json, ArtifactStore};
use crate::normalizer::Normalizer;

/// A builder for constructing a Classifier with a fluent interface.
///
/// Artifacts are loaded eagerly so configuration problems surface here, at
/// process start, rather than on the first request.
#[derive(Default, Debug)]
pub struct ClassifierBuilder {
    vectorizer_path: Option<String>,
    model_path: Option<String>,
    vectorizer: Option<TfidfVectorizer>,
    model: Option<SpamModel>,
    normalizer: Normalizer,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads both artifacts from an [`ArtifactStore`] directory.
    ///
    /// # Returns
    /// * `Result<Self, ClassifierError>` - The builder instance if successful,
    ///   or an error if:
    ///   - Artifacts were already loaded on this builder
    ///   - Either artifact file is missing, corrupt, or fails its hash check
    ///
    /// # Example
    /// ```no_run
    /// use mailsift::{ArtifactStore, Classifier};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let store = ArtifactStore::new("artifacts");
    /// let classifier = Classifier::builder()
    ///     .with_artifact_store(&store)?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_artifact_store(mut self, store: &ArtifactStore) -> Result<Self, ClassifierError> {
        if self.vectorizer.is_some() || self.model.is_some() {
            return Err(ClassifierError::BuildError(
                "Vectorizer and model already set".to_string(),
            ));
        }

        self.vectorizer = Some(store.load_vectorizer()?);
        self.model = Some(store.load_model()?);
        self.vectorizer_path = Some(store.vectorizer_path().to_string_lossy().to_string());
        self.model_path = Some(store.model_path().to_string_lossy().to_string());
        Ok(self)
    }

    /// Loads the artifacts from two explicit file paths instead of a store
    /// directory.
    pub fn with_artifact_files<P: AsRef<Path>>(
        mut self,
        vectorizer_path: P,
        model_path: P,
    ) -> Result<Self, ClassifierError> {
        let vectorizer_path = vectorizer_path.as_ref();
        let model_path = model_path.as_ref();
        if vectorizer_path.as_os_str().is_empty() || model_path.as_os_str().is_empty() {
            return Err(ClassifierError::BuildError(
                "Vectorizer and model paths cannot be empty".to_string(),
            ));
        }
        if self.vectorizer.is_some() || self.model.is_some() {
            return Err(ClassifierError::BuildError(
                "Vectorizer and model already set".to_string(),
            ));
        }

        let vectorizer: TfidfVectorizer = load_json(vectorizer_path)?;
        info!(
            "Vectorizer loaded: {} terms, {} feature columns",
            vectorizer.vocabulary_size(),
            vectorizer.dimension()
        );
        let model: SpamModel = load_json(model_path)?;
        info!("Model loaded: expects {} features", model.expected_dimension());

        self.vectorizer = Some(vectorizer);
        self.model = Some(model);
        self.vectorizer_path = Some(vectorizer_path.to_string_lossy().to_string());
        self.model_path = Some(model_path.to_string_lossy().to_string());
        Ok(self)
    }

    /// Uses already-constructed artifacts. Mainly useful for tests and for
    /// callers that embed their artifacts instead of shipping files.
    pub fn with_parts(mut self, vectorizer: TfidfVectorizer, model: SpamModel) -> Self {
        self.vectorizer = Some(vectorizer);
        self.model = Some(model);
        self
    }

    /// Builds and returns the final Classifier instance.
    ///
    /// # Returns
    /// * `Result<Classifier, ClassifierError>` - The constructed Classifier if
    ///   successful, or an error if:
    ///   - No vectorizer and model were loaded
    ///   - The vectorizer's output dimension does not match what the model
    ///     expects (`DimensionMismatch`, always fatal, never coerced)
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let vectorizer = self.vectorizer.ok_or_else(|| {
            ClassifierError::BuildError("A vectorizer artifact must be loaded".to_string())
        })?;
        let model = self.model.ok_or_else(|| {
            ClassifierError::BuildError("A model artifact must be loaded".to_string())
        })?;

        if vectorizer.dimension() != model.expected_dimension() {
            return Err(ClassifierError::DimensionMismatch {
                vectorizer: vectorizer.dimension(),
                model: model.expected_dimension(),
            });
        }

        info!(
            "Classifier ready: {} features, artifacts: {:?} / {:?}",
            vectorizer.dimension(),
            self.vectorizer_path,
            self.model_path
        );

        Ok(Classifier {
            vectorizer_path: self.vectorizer_path,
            model_path: self.model_path,
            normalizer: self.normalizer,
            vectorizer: Arc::new(vectorizer),
            model: Arc::new(model),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::model::LinearModel;
    use std::collections::HashMap;

    fn small_vectorizer(dimension: usize) -> TfidfVectorizer {
        let vocabulary: HashMap<String, usize> = (0..dimension)
            .map(|i| (format!("term{i}"), i))
            .collect();
        TfidfVectorizer::new(vocabulary, vec![1.0; dimension]).unwrap()
    }

    #[test]
    fn test_build_without_artifacts_fails() {
        let result = ClassifierBuilder::new().build();
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_empty_paths_rejected() {
        let result = ClassifierBuilder::new().with_artifact_files("", "model.json");
        assert!(matches!(result, Err(ClassifierError::BuildError(_))));
    }

    #[test]
    fn test_missing_files_rejected() {
        let result = ClassifierBuilder::new()
            .with_artifact_files("/nonexistent/vectorizer.json", "/nonexistent/model.json");
        assert!(matches!(result, Err(ClassifierError::Artifact(_))));
    }

    #[test]
    fn test_dimension_mismatch_is_fatal() {
        let result = ClassifierBuilder::new()
            .with_parts(
                small_vectorizer(3),
                SpamModel::Linear(LinearModel::new(vec![1.0, -1.0], 0.0)),
            )
            .build();
        assert!(matches!(
            result,
            Err(ClassifierError::DimensionMismatch {
                vectorizer: 3,
                model: 2
            })
        ));
    }

    #[test]
    fn test_matching_dimensions_build() {
        let classifier = ClassifierBuilder::new()
            .with_parts(
                small_vectorizer(2),
                SpamModel::Linear(LinearModel::new(vec![1.0, -1.0], 0.0)),
            )
            .build();
        assert!(classifier.is_ok());
    }
}
