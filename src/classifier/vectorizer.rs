use std::collections::HashMap;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;

/// Pre-trained TF-IDF vectorizer artifact.
///
/// Built externally at training time and loaded read-only for the process
/// lifetime: a vocabulary mapping each stem to a feature column, and one IDF
/// weight per column. `transform` multiplies raw term counts by the IDF
/// weights and L2-normalizes the result, so feature magnitudes are comparable
/// across messages of different lengths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "VectorizerSpec", into = "VectorizerSpec")]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Array1<f32>,
}

/// On-disk JSON shape of the vectorizer artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VectorizerSpec {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f32>,
}

impl TryFrom<VectorizerSpec> for TfidfVectorizer {
    type Error = String;

    fn try_from(spec: VectorizerSpec) -> Result<Self, Self::Error> {
        TfidfVectorizer::new(spec.vocabulary, spec.idf).map_err(|e| e.to_string())
    }
}

impl From<TfidfVectorizer> for VectorizerSpec {
    fn from(vectorizer: TfidfVectorizer) -> Self {
        VectorizerSpec {
            vocabulary: vectorizer.vocabulary,
            idf: vectorizer.idf.to_vec(),
        }
    }
}

impl TfidfVectorizer {
    /// Creates a vectorizer from a vocabulary and per-column IDF weights.
    ///
    /// # Errors
    /// * `ValidationError` if any vocabulary index falls outside the IDF
    ///   vector, which would make `transform` write out of bounds
    pub fn new(
        vocabulary: HashMap<String, usize>,
        idf: Vec<f32>,
    ) -> Result<Self, ClassifierError> {
        let dimension = idf.len();
        if let Some((term, &index)) = vocabulary.iter().find(|(_, &index)| index >= dimension) {
            return Err(ClassifierError::ValidationError(format!(
                "Vocabulary entry '{}' maps to column {} but the IDF vector has only {} entries",
                term, index, dimension
            )));
        }
        Ok(Self {
            vocabulary,
            idf: Array1::from_vec(idf),
        })
    }

    /// Number of feature columns this vectorizer produces.
    pub fn dimension(&self) -> usize {
        self.idf.len()
    }

    /// Number of known terms.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Converts normalized text (space-joined stems) into an L2-normalized
    /// TF-IDF feature vector. Stems outside the vocabulary contribute
    /// nothing; a message with no known stems maps to the zero vector.
    pub fn transform(&self, normalized: &str) -> Array1<f32> {
        let mut features = Array1::<f32>::zeros(self.dimension());
        for stem in normalized.split_whitespace() {
            if let Some(&index) = self.vocabulary.get(stem) {
                features[index] += 1.0;
            }
        }
        features *= &self.idf;
        l2_normalize(&features)
    }
}

/// Scales a vector to unit L2 norm, leaving (near-)zero vectors untouched.
pub(crate) fn l2_normalize(vec: &Array1<f32>) -> Array1<f32> {
    let norm: f32 = vec.iter().map(|&x| x * x).sum::<f32>().sqrt();
    if norm > 1e-10 {
        vec / norm
    } else {
        vec.clone()
    }
}
