use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

use crate::error::ModelError;
use crate::prediction::classifier::{Classifier, ModelArtifact};
use crate::prediction::disease::Disease;

/// The five classifiers, loaded once and shared read-only.
#[derive(Clone)]
pub struct ModelRegistry {
    models: HashMap<Disease, Arc<dyn Classifier>>,
}

impl std::fmt::Debug for ModelRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.models.keys().map(Disease::name).collect();
        names.sort_unstable();
        f.debug_struct("ModelRegistry").field("models", &names).finish()
    }
}

impl ModelRegistry {
    /// Loads every artifact from `dir`. Any missing, unreadable or invalid
    /// artifact fails the whole load.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ModelError> {
        let dir = dir.as_ref();
        let mut models: HashMap<Disease, Arc<dyn Classifier>> = HashMap::new();

        for disease in Disease::ALL {
            let path = dir.join(disease.artifact_file());
            let model = load_artifact(&path)?;

            let expected = disease.fields().len();
            if model.n_features() != expected {
                return Err(ModelError::Corrupt {
                    path,
                    reason: format!(
                        "declares {} features, the {} form has {}",
                        model.n_features(),
                        disease,
                        expected
                    ),
                });
            }

            info!("Loaded {} model from {}", disease, path.display());
            models.insert(disease, Arc::new(model));
        }

        Ok(Self { models })
    }

    /// Builds a registry from already constructed classifiers.
    pub fn from_models(
        models: impl IntoIterator<Item = (Disease, Arc<dyn Classifier>)>,
    ) -> Self {
        Self { models: models.into_iter().collect() }
    }

    pub fn predict(&self, name: &str, features: &[f64]) -> Result<i64, ModelError> {
        let disease: Disease = name.parse()?;
        self.predict_disease(disease, features)
    }

    pub fn predict_disease(&self, disease: Disease, features: &[f64]) -> Result<i64, ModelError> {
        let model = self
            .models
            .get(&disease)
            .ok_or_else(|| ModelError::UnknownModel(disease.name().to_string()))?;
        model.predict(features)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".sha256");
    PathBuf::from(name)
}

fn load_artifact(path: &Path) -> Result<ModelArtifact, ModelError> {
    let bytes = fs::read(path).map_err(|e| ModelError::Unreadable {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let sidecar = sidecar_path(path);
    if sidecar.exists() {
        let expected = fs::read_to_string(&sidecar).map_err(|e| ModelError::Unreadable {
            path: sidecar.clone(),
            reason: e.to_string(),
        })?;
        // Accept `sha256sum` output: the digest is the first word.
        let expected = expected.split_whitespace().next().unwrap_or_default();
        let actual = format!("{:x}", Sha256::digest(&bytes));
        if !expected.eq_ignore_ascii_case(&actual) {
            return Err(ModelError::ChecksumMismatch { path: path.to_path_buf() });
        }
    }

    ModelArtifact::from_slice(&bytes).map_err(|e| ModelError::Corrupt {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}
