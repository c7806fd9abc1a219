//! Serialized binary classifiers.
//!
//! Artifacts are JSON documents tagged by `kind`:
//!
//! - `linear`: optional standard scaling followed by a linear decision
//!   function (logistic regression, linear SVM).
//! - `forest`: majority vote over decision trees stored as flat node lists.
//!
//! [`ModelArtifact::validate`] checks the structure once at load time so that
//! prediction never indexes out of bounds and tree walks always terminate.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::ModelError;

/// A loaded model exposing a single prediction capability.
pub trait Classifier: Send + Sync {
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<i64, ModelError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinearModel {
    pub n_features: usize,
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    #[serde(default)]
    pub scaler: Option<Scaler>,
    #[serde(default = "default_classes")]
    pub classes: [i64; 2],
}

fn default_classes() -> [i64; 2] {
    [0, 1]
}

impl LinearModel {
    fn decision(&self, features: &[f64]) -> f64 {
        let mut z = self.intercept;
        for (i, (x, w)) in features.iter().zip(&self.coefficients).enumerate() {
            let x = match &self.scaler {
                Some(s) => {
                    let scale = if s.scale[i] == 0.0 { 1.0 } else { s.scale[i] };
                    (x - s.mean[i]) / scale
                }
                None => *x,
            };
            z += w * x;
        }
        z
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        label: i64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    fn predict(&self, features: &[f64]) -> i64 {
        let mut index = 0;
        loop {
            match &self.nodes[index] {
                TreeNode::Leaf { label } => return *label,
                TreeNode::Split { feature, threshold, left, right } => {
                    index = if features[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ForestModel {
    pub n_features: usize,
    pub trees: Vec<DecisionTree>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ModelArtifact {
    Linear(LinearModel),
    Forest(ForestModel),
}

impl ModelArtifact {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ModelError> {
        let artifact: ModelArtifact = serde_json::from_slice(bytes)
            .map_err(|e| ModelError::InvalidDefinition(e.to_string()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let invalid = |msg: String| Err(ModelError::InvalidDefinition(msg));

        match self {
            ModelArtifact::Linear(m) => {
                if m.n_features == 0 {
                    return invalid("linear model has no features".into());
                }
                if m.coefficients.len() != m.n_features {
                    return invalid(format!(
                        "{} coefficients for {} features",
                        m.coefficients.len(),
                        m.n_features
                    ));
                }
                if !m.intercept.is_finite() || m.coefficients.iter().any(|w| !w.is_finite()) {
                    return invalid("linear model has non-finite weights".into());
                }
                if let Some(s) = &m.scaler {
                    if s.mean.len() != m.n_features || s.scale.len() != m.n_features {
                        return invalid("scaler length does not match feature count".into());
                    }
                    if s.mean.iter().chain(&s.scale).any(|v| !v.is_finite()) {
                        return invalid("scaler has non-finite values".into());
                    }
                }
            }
            ModelArtifact::Forest(m) => {
                if m.n_features == 0 {
                    return invalid("forest has no features".into());
                }
                if m.trees.is_empty() {
                    return invalid("forest has no trees".into());
                }
                for (t, tree) in m.trees.iter().enumerate() {
                    if tree.nodes.is_empty() {
                        return invalid(format!("tree {} is empty", t));
                    }
                    for (i, node) in tree.nodes.iter().enumerate() {
                        if let TreeNode::Split { feature, threshold, left, right } = node {
                            if *feature >= m.n_features {
                                return invalid(format!("tree {} node {} uses feature {}", t, i, feature));
                            }
                            if threshold.is_nan() {
                                return invalid(format!("tree {} node {} has a NaN threshold", t, i));
                            }
                            // Children must point forward, which rules out cycles.
                            for child in [left, right] {
                                if *child <= i || *child >= tree.nodes.len() {
                                    return invalid(format!("tree {} node {} has bad child {}", t, i, child));
                                }
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

impl Classifier for ModelArtifact {
    fn n_features(&self) -> usize {
        match self {
            ModelArtifact::Linear(m) => m.n_features,
            ModelArtifact::Forest(m) => m.n_features,
        }
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ModelError> {
        let expected = self.n_features();
        if features.len() != expected {
            return Err(ModelError::ShapeMismatch { expected, actual: features.len() });
        }
        if let Some(index) = features.iter().position(|x| !x.is_finite()) {
            return Err(ModelError::NonFiniteFeature { index });
        }

        let label = match self {
            ModelArtifact::Linear(m) => {
                if m.decision(features) > 0.0 {
                    m.classes[1]
                } else {
                    m.classes[0]
                }
            }
            ModelArtifact::Forest(m) => {
                let mut votes: BTreeMap<i64, usize> = BTreeMap::new();
                for tree in &m.trees {
                    *votes.entry(tree.predict(features)).or_default() += 1;
                }
                // max_by_key keeps the last maximum; iterate in reverse so ties
                // go to the smaller label.
                votes
                    .into_iter()
                    .rev()
                    .max_by_key(|(_, count)| *count)
                    .map(|(label, _)| label)
                    .unwrap_or_default()
            }
        };
        Ok(label)
    }
}
