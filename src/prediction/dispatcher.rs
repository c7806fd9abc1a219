use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use crate::db::ResultRepository;
use crate::error::AppError;
use crate::prediction::disease::{Disease, FieldSpec};
use crate::prediction::registry::ModelRegistry;
use crate::Result;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Prediction {
    pub disease: Disease,
    pub label: i64,
    pub diagnosis: String,
    pub recorded: bool,
}

/// Validates form input, runs the matching classifier and records the
/// outcome for diseases that keep a history.
#[derive(Clone)]
pub struct FormDispatcher {
    registry: Arc<ModelRegistry>,
    results: Arc<dyn ResultRepository>,
}

impl FormDispatcher {
    pub fn new(registry: Arc<ModelRegistry>, results: Arc<dyn ResultRepository>) -> Self {
        Self { registry, results }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Checks every declared field and returns the values in model order.
    pub fn build_features(disease: Disease, inputs: &HashMap<String, f64>) -> Result<Vec<f64>> {
        let fields = disease.fields();

        if let Some(unknown) = inputs
            .keys()
            .find(|k| !fields.iter().any(|f| f.key == k.as_str()))
        {
            return Err(AppError::ValidationError(format!(
                "unknown field '{}' for {}",
                unknown, disease
            )));
        }

        fields
            .iter()
            .map(|field| -> Result<f64> {
                let value = *inputs.get(field.key).ok_or_else(|| {
                    AppError::ValidationError(format!("missing field '{}'", field.key))
                })?;
                check_bounds(field, value)?;
                Ok(value)
            })
            .collect()
    }

    pub async fn submit(
        &self,
        username: &str,
        disease: Disease,
        inputs: &HashMap<String, f64>,
    ) -> Result<Prediction> {
        let features = Self::build_features(disease, inputs).map_err(|e| {
            warn!("Rejected {} submission from {}: {}", disease, username, e);
            e
        })?;

        let label = self.registry.predict_disease(disease, &features)?;
        let diagnosis = disease.diagnosis(label);

        let recorded = if disease.records_result() {
            self.results
                .append(username, disease.display_name(), diagnosis)
                .await?;
            true
        } else {
            false
        };

        info!("{} prediction for {}: label {} (recorded: {})", disease, username, label, recorded);

        Ok(Prediction {
            disease,
            label,
            diagnosis: diagnosis.to_string(),
            recorded,
        })
    }
}

fn check_bounds(field: &FieldSpec, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AppError::ValidationError(format!(
            "'{}' must be a finite number",
            field.key
        )));
    }
    if value < field.min || value > field.max {
        return Err(AppError::ValidationError(format!(
            "'{}' must be between {} and {}, got {}",
            field.key, field.min, field.max, value
        )));
    }
    if field.is_integer() && value.fract() != 0.0 {
        return Err(AppError::ValidationError(format!(
            "'{}' must be a whole number, got {}",
            field.key, value
        )));
    }
    Ok(())
}
