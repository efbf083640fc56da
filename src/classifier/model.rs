use std::fmt;
use std::str::FromStr;

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;

/// Binary verdict for a message. Encoded as 0 (ham) / 1 (spam) in training
/// artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Ham = 0,
    Spam = 1,
}

impl Label {
    pub fn is_spam(self) -> bool {
        matches!(self, Label::Spam)
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Ham => write!(f, "ham"),
            Label::Spam => write!(f, "spam"),
        }
    }
}

impl FromStr for Label {
    type Err = ClassifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ham" => Ok(Label::Ham),
            "spam" => Ok(Label::Spam),
            other => Err(ClassifierError::ValidationError(format!(
                "Unknown label '{}', expected 'ham' or 'spam'",
                other
            ))),
        }
    }
}

/// Outcome of scoring one message. Derived per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub label: Label,
    /// Estimated probability of the predicted class, when the backend has a
    /// probability story. Always within [0, 1] when present.
    pub confidence: Option<f32>,
}

/// Pre-trained model artifact.
///
/// The classifier only relies on the narrow contract exposed here
/// (`expected_dimension` and `predict`), so backends are substitutable: any
/// scorer over the vectorizer's feature space can slot in via a new variant.
/// The artifact JSON is tagged with a `type` field selecting the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpamModel {
    Linear(LinearModel),
    MultinomialNb(MultinomialNbModel),
}

impl SpamModel {
    /// Feature dimensionality this model was trained against. Must match the
    /// vectorizer's output dimension; the builder treats disagreement as a
    /// fatal configuration error.
    pub fn expected_dimension(&self) -> usize {
        match self {
            SpamModel::Linear(model) => model.weights.len(),
            SpamModel::MultinomialNb(model) => model.ham_log_prob.len(),
        }
    }

    /// Scores a feature vector. Deterministic for a fixed (model, features)
    /// pair; there is no randomness at inference time.
    pub fn predict(&self, features: &Array1<f32>) -> Prediction {
        debug_assert_eq!(features.len(), self.expected_dimension());
        match self {
            SpamModel::Linear(model) => model.predict(features),
            SpamModel::MultinomialNb(model) => model.predict(features),
        }
    }
}

/// Logistic-regression style linear scorer: a weight per feature column plus
/// a bias. The sign of the decision value picks the label; the logistic of it
/// doubles as the spam probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "LinearModelSpec", into = "LinearModelSpec")]
pub struct LinearModel {
    weights: Array1<f32>,
    bias: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LinearModelSpec {
    weights: Vec<f32>,
    bias: f32,
}

impl From<LinearModelSpec> for LinearModel {
    fn from(spec: LinearModelSpec) -> Self {
        LinearModel {
            weights: Array1::from_vec(spec.weights),
            bias: spec.bias,
        }
    }
}

impl From<LinearModel> for LinearModelSpec {
    fn from(model: LinearModel) -> Self {
        LinearModelSpec {
            weights: model.weights.to_vec(),
            bias: model.bias,
        }
    }
}

impl LinearModel {
    pub fn new(weights: Vec<f32>, bias: f32) -> Self {
        Self {
            weights: Array1::from_vec(weights),
            bias,
        }
    }

    fn predict(&self, features: &Array1<f32>) -> Prediction {
        let decision = self.weights.dot(features) + self.bias;
        let spam_probability = sigmoid(decision);
        if spam_probability >= 0.5 {
            Prediction {
                label: Label::Spam,
                confidence: Some(spam_probability),
            }
        } else {
            Prediction {
                label: Label::Ham,
                confidence: Some(1.0 - spam_probability),
            }
        }
    }
}

/// Multinomial naive Bayes scorer over non-negative features: per-class
/// log-priors and per-feature log-likelihoods, argmax of the joint
/// log-likelihood picks the label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "MultinomialNbSpec", into = "MultinomialNbSpec")]
pub struct MultinomialNbModel {
    ham_log_prior: f32,
    spam_log_prior: f32,
    ham_log_prob: Array1<f32>,
    spam_log_prob: Array1<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MultinomialNbSpec {
    /// Log-priors for [ham, spam].
    class_log_prior: [f32; 2],
    /// Per-feature log-likelihoods, one row per class in [ham, spam] order.
    feature_log_prob: [Vec<f32>; 2],
}

impl From<MultinomialNbSpec> for MultinomialNbModel {
    fn from(spec: MultinomialNbSpec) -> Self {
        let [ham_log_prior, spam_log_prior] = spec.class_log_prior;
        let [ham, spam] = spec.feature_log_prob;
        MultinomialNbModel {
            ham_log_prior,
            spam_log_prior,
            ham_log_prob: Array1::from_vec(ham),
            spam_log_prob: Array1::from_vec(spam),
        }
    }
}

impl From<MultinomialNbModel> for MultinomialNbSpec {
    fn from(model: MultinomialNbModel) -> Self {
        MultinomialNbSpec {
            class_log_prior: [model.ham_log_prior, model.spam_log_prior],
            feature_log_prob: [model.ham_log_prob.to_vec(), model.spam_log_prob.to_vec()],
        }
    }
}

impl MultinomialNbModel {
    pub fn new(class_log_prior: [f32; 2], feature_log_prob: [Vec<f32>; 2]) -> Self {
        MultinomialNbSpec {
            class_log_prior,
            feature_log_prob,
        }
        .into()
    }

    fn predict(&self, features: &Array1<f32>) -> Prediction {
        let ham_jll = self.ham_log_prior + self.ham_log_prob.dot(features);
        let spam_jll = self.spam_log_prior + self.spam_log_prob.dot(features);

        // Softmax over the two joint log-likelihoods, stabilized against
        // overflow by subtracting the larger one.
        let max_jll = ham_jll.max(spam_jll);
        let ham_exp = (ham_jll - max_jll).exp();
        let spam_exp = (spam_jll - max_jll).exp();
        let spam_probability = spam_exp / (ham_exp + spam_exp);

        if spam_jll > ham_jll {
            Prediction {
                label: Label::Spam,
                confidence: Some(spam_probability),
            }
        } else {
            Prediction {
                label: Label::Ham,
                confidence: Some(1.0 - spam_probability),
            }
        }
    }
}

fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn linear() -> SpamModel {
        SpamModel::Linear(LinearModel::new(vec![2.0, -2.0], 0.0))
    }

    #[test]
    fn test_linear_predicts_by_sign() {
        let model = linear();
        let spam = model.predict(&Array1::from_vec(vec![1.0, 0.0]));
        assert_eq!(spam.label, Label::Spam);
        let ham = model.predict(&Array1::from_vec(vec![0.0, 1.0]));
        assert_eq!(ham.label, Label::Ham);
    }

    #[test]
    fn test_linear_confidence_in_unit_interval() {
        let model = linear();
        for features in [vec![1.0, 0.0], vec![0.0, 1.0], vec![0.5, 0.5]] {
            let prediction = model.predict(&Array1::from_vec(features));
            let confidence = prediction.confidence.unwrap();
            assert!((0.0..=1.0).contains(&confidence));
            // Predicted class always carries the larger probability.
            assert!(confidence >= 0.5);
        }
    }

    #[test]
    fn test_linear_is_deterministic() {
        let model = linear();
        let features = Array1::from_vec(vec![0.3, 0.1]);
        let first = model.predict(&features);
        let second = model.predict(&features);
        assert_eq!(first, second);
    }

    #[test]
    fn test_multinomial_nb_argmax() {
        let model = SpamModel::MultinomialNb(MultinomialNbModel::new(
            [(0.5f32).ln(), (0.5f32).ln()],
            [vec![-0.5, -3.0], vec![-3.0, -0.5]],
        ));
        assert_eq!(model.expected_dimension(), 2);

        let ham = model.predict(&Array1::from_vec(vec![1.0, 0.0]));
        assert_eq!(ham.label, Label::Ham);
        let spam = model.predict(&Array1::from_vec(vec![0.0, 1.0]));
        assert_eq!(spam.label, Label::Spam);

        for prediction in [ham, spam] {
            let confidence = prediction.confidence.unwrap();
            assert!((0.5..=1.0).contains(&confidence));
        }
    }

    #[test]
    fn test_model_artifact_roundtrip() {
        let json = r#"{"type":"linear","weights":[1.0,-1.0],"bias":-0.25}"#;
        let model: SpamModel = serde_json::from_str(json).unwrap();
        assert_eq!(model.expected_dimension(), 2);
        let prediction = model.predict(&Array1::from_vec(vec![1.0, 0.0]));
        assert_eq!(prediction.label, Label::Spam);
    }

    #[test]
    fn test_label_parsing() {
        assert_eq!("spam".parse::<Label>().unwrap(), Label::Spam);
        assert_eq!("ham".parse::<Label>().unwrap(), Label::Ham);
        assert!("other".parse::<Label>().is_err());
    }
}
