use mailsift::{ArtifactStore, Classifier, ClassifierError, Label};
use env_logger::{Builder, Env};

// Initialize test logger
fn init() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn")).try_init();
}

fn classifier_from_bundled_artifacts() -> Classifier {
    let store = ArtifactStore::new("artifacts");
    assert!(store.artifacts_present());
    Classifier::builder()
        .with_artifact_store(&store)
        .expect("bundled artifacts should load")
        .build()
        .expect("bundled artifacts should agree on dimensionality")
}

#[test]
fn test_bundled_artifacts_verify() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let store = ArtifactStore::new("artifacts");
    assert!(store.verify()?);
    Ok(())
}

#[test]
fn test_promotional_message_is_spam() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let classifier = classifier_from_bundled_artifacts();
    let prediction =
        classifier.predict("Congratulations! You won a free lottery ticket, claim now")?;
    assert_eq!(prediction.label, Label::Spam);
    let confidence = prediction.confidence.expect("linear model reports confidence");
    assert!((0.5..=1.0).contains(&confidence));
    Ok(())
}

#[test]
fn test_everyday_message_is_ham() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let classifier = classifier_from_bundled_artifacts();
    let prediction = classifier.predict("Let's meet for lunch tomorrow at noon")?;
    assert_eq!(prediction.label, Label::Ham);
    Ok(())
}

#[test]
fn test_empty_and_symbol_inputs_are_rejected_before_inference() {
    init();
    let classifier = classifier_from_bundled_artifacts();
    for input in ["", "   ", "!!!", "the and of a"] {
        assert!(
            matches!(classifier.predict(input), Err(ClassifierError::EmptyInput)),
            "expected EmptyInput for {input:?}"
        );
    }
}

#[test]
fn test_classification_is_deterministic() -> Result<(), Box<dyn std::error::Error>> {
    init();
    let classifier = classifier_from_bundled_artifacts();
    let input = "URGENT! Claim your free cash prize today";
    let first = classifier.predict(input)?;
    for _ in 0..5 {
        assert_eq!(classifier.predict(input)?, first);
    }
    Ok(())
}

#[test]
fn test_unknown_vocabulary_still_classifies() -> Result<(), Box<dyn std::error::Error>> {
    init();
    // Every stem is out of vocabulary: the feature vector is all zeros and
    // the bias alone decides. That must not be an error.
    let classifier = classifier_from_bundled_artifacts();
    let prediction = classifier.predict("quantum chromodynamics seminar recap")?;
    assert_eq!(prediction.label, Label::Ham);
    Ok(())
}

#[test]
fn test_classifier_info_reports_artifact_paths() {
    init();
    let classifier = classifier_from_bundled_artifacts();
    let info = classifier.info();
    assert!(info.vectorizer_path.unwrap().ends_with("vectorizer.json"));
    assert!(info.model_path.unwrap().ends_with("model.json"));
    assert!(info.vocabulary_size > 0);
    assert_eq!(info.vocabulary_size, info.feature_dimension);
}

#[test]
fn test_mismatched_artifacts_fail_to_build() -> Result<(), Box<dyn std::error::Error>> {
    init();
    use std::fs;
    let dir = tempfile::tempdir()?;
    fs::copy("artifacts/vectorizer.json", dir.path().join("vectorizer.json"))?;
    // A model trained against a different feature space.
    fs::write(
        dir.path().join("model.json"),
        r#"{"type":"linear","weights":[1.0,-1.0],"bias":0.0}"#,
    )?;

    let store = ArtifactStore::new(dir.path());
    let result = Classifier::builder().with_artifact_store(&store)?.build();
    assert!(matches!(
        result,
        Err(ClassifierError::DimensionMismatch { model: 2, .. })
    ));
    Ok(())
}
