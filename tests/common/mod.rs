#![allow(dead_code)]

use medpredict_server::{AppState, Disease, MemoryStore, ModelRegistry, Settings};
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Writes linear artifacts for every disease into a fresh directory.
///
/// Diabetes is positive when Glucose > 120; every other disease is positive
/// when its first field exceeds 50.
pub fn write_models() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for disease in Disease::ALL {
        let n = disease.fields().len();
        let mut coefficients = vec![0.0; n];
        let intercept = if disease == Disease::Diabetes {
            coefficients[1] = 1.0;
            -120.0
        } else {
            coefficients[0] = 1.0;
            -50.0
        };
        let artifact = json!({
            "kind": "linear",
            "n_features": n,
            "coefficients": coefficients,
            "intercept": intercept,
        });
        fs::write(dir.path().join(disease.artifact_file()), artifact.to_string())
            .expect("write artifact");
    }
    dir
}

pub struct TestContext {
    pub state: AppState,
    pub store: MemoryStore,
    _models: TempDir,
}

pub fn test_state() -> TestContext {
    let models = write_models();
    let mut config = Settings::new_for_test().expect("Failed to load test config");
    config.models.dir = models.path().to_string_lossy().into_owned();

    let registry = ModelRegistry::load(models.path()).expect("load models");
    let store = MemoryStore::new();
    let state = AppState::from_parts(
        config,
        Arc::new(store.clone()),
        Arc::new(store.clone()),
        registry,
    );

    TestContext { state, store, _models: models }
}

pub fn zero_inputs(disease: Disease) -> HashMap<String, f64> {
    disease
        .fields()
        .iter()
        .map(|f| (f.key.to_string(), 0.0))
        .collect()
}
