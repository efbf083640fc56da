use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::classifier::model::SpamModel;
use crate::classifier::vectorizer::TfidfVectorizer;

/// File name of the vectorizer artifact inside an artifact directory.
pub const VECTORIZER_FILE: &str = "vectorizer.json";
/// File name of the model artifact inside an artifact directory.
pub const MODEL_FILE: &str = "model.json";

#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("Artifact not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Malformed artifact {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Hash mismatch for {path}: expected {expected}, got {actual}")]
    HashMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

/// Locates and loads the two pre-trained artifacts the classifier needs.
///
/// Artifacts are read-only inputs produced by an external training pipeline.
/// The store never writes to the directory and never fetches anything over
/// the network; a missing or corrupt artifact is a fatal startup error for
/// the caller. When a `<name>.sha256` sidecar file is present next to an
/// artifact, the artifact's content hash is checked against it before
/// parsing.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    artifacts_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new<P: AsRef<Path>>(artifacts_dir: P) -> Self {
        Self {
            artifacts_dir: artifacts_dir.as_ref().to_path_buf(),
        }
    }

    pub fn vectorizer_path(&self) -> PathBuf {
        self.artifacts_dir.join(VECTORIZER_FILE)
    }

    pub fn model_path(&self) -> PathBuf {
        self.artifacts_dir.join(MODEL_FILE)
    }

    /// True when both artifact files exist on disk.
    pub fn artifacts_present(&self) -> bool {
        let vectorizer_path = self.vectorizer_path();
        let model_path = self.model_path();
        debug!(
            "Checking artifacts: {:?} (exists: {}), {:?} (exists: {})",
            vectorizer_path,
            vectorizer_path.exists(),
            model_path,
            model_path.exists()
        );
        vectorizer_path.exists() && model_path.exists()
    }

    /// Checks both artifacts against their sha256 sidecars. Returns `false`
    /// if either file is missing or fails its hash check; artifacts without
    /// a sidecar are treated as unverifiable-but-acceptable.
    pub fn verify(&self) -> Result<bool, ArtifactError> {
        if !self.artifacts_present() {
            return Ok(false);
        }
        let vectorizer_ok = verify_sidecar(&self.vectorizer_path()).is_ok();
        let model_ok = verify_sidecar(&self.model_path()).is_ok();
        Ok(vectorizer_ok && model_ok)
    }

    /// Loads and parses the vectorizer artifact.
    pub fn load_vectorizer(&self) -> Result<TfidfVectorizer, ArtifactError> {
        let vectorizer: TfidfVectorizer = load_json(&self.vectorizer_path())?;
        info!(
            "Vectorizer loaded: {} terms, {} feature columns",
            vectorizer.vocabulary_size(),
            vectorizer.dimension()
        );
        Ok(vectorizer)
    }

    /// Loads and parses the model artifact.
    pub fn load_model(&self) -> Result<SpamModel, ArtifactError> {
        let model: SpamModel = load_json(&self.model_path())?;
        info!("Model loaded: expects {} features", model.expected_dimension());
        Ok(model)
    }
}

/// Reads, hash-checks and deserializes one JSON artifact.
pub(crate) fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    if !path.exists() {
        return Err(ArtifactError::NotFound(path.to_path_buf()));
    }
    verify_sidecar(path)?;
    let contents = fs::read_to_string(path)?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Verifies `path` against its `<path>.sha256` sidecar if one exists. The
/// sidecar holds the output of `sha256sum`: the hex digest as the first
/// whitespace-separated token.
fn verify_sidecar(path: &Path) -> Result<(), ArtifactError> {
    let mut sidecar = path.as_os_str().to_os_string();
    sidecar.push(".sha256");
    let sidecar = PathBuf::from(sidecar);

    if !sidecar.exists() {
        debug!("No checksum sidecar for {:?}, skipping verification", path);
        return Ok(());
    }

    let expected = fs::read_to_string(&sidecar)?
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let actual = sha256_hex(path)?;

    if expected != actual {
        return Err(ArtifactError::HashMismatch {
            path: path.to_path_buf(),
            expected,
            actual,
        });
    }
    debug!("Checksum verified for {:?}", path);
    Ok(())
}

fn sha256_hex(path: &Path) -> Result<String, ArtifactError> {
    let bytes = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    Ok(format!("{:x}", hasher.finalize()))
}
