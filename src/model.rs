use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};
use thiserror::Error;

use crate::types::{numeric_fields, FeatureValue, VehicleSpec, FEATURE_COLUMNS, NUMERIC_COLUMNS};

/// A prediction-local failure: the form stays usable, the caller gets one
/// human-readable message.
#[derive(Debug, Error)]
pub enum PredictError {
    #[error("{field} must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("value '{value}' for {column} is not known to the model")]
    UnknownCategory { column: String, value: String },
    #[error("column {column} does not match the loaded pipeline schema")]
    SchemaMismatch { column: &'static str },
    #[error("model produced a non-finite output")]
    NonFinite,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Column {
    Numeric {
        name: String,
        center: f64,
        scale: f64,
    },
    Categorical {
        name: String,
        categories: Vec<String>,
    },
}

impl Column {
    fn name(&self) -> &str {
        match self {
            Column::Numeric { name, .. } | Column::Categorical { name, .. } => name,
        }
    }

    /// Number of design-matrix slots this column expands to.
    fn width(&self) -> usize {
        match self {
            Column::Numeric { .. } => 1,
            Column::Categorical { categories, .. } => categories.len(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Artifact {
    #[serde(default = "unversioned")]
    version: String,
    target_transform: String,
    columns: Vec<Column>,
    coefficients: Vec<f64>,
    intercept: f64,
}

fn unversioned() -> String {
    "unversioned".to_string()
}

/// The fitted pipeline: robust scaling of numerics, one-hot encoding of
/// categoricals, linear regression on the expanded row. Output is in
/// log1p(price) space; the inverse transform lives in [`crate::pricing`].
#[derive(Debug)]
pub struct PricePipeline {
    version: String,
    columns: Vec<Column>,
    coefficients: Vec<f64>,
    intercept: f64,
}

impl PricePipeline {
    /// Load and validate the artifact. Any failure here is startup-fatal:
    /// the server must not come up with a pipeline it cannot trust.
    pub fn load(path: &Path) -> Result<Self> {
        let txt = fs::read_to_string(path)
            .with_context(|| format!("failed to read model artifact at {}", path.display()))?;
        let artifact: Artifact = serde_json::from_str(&txt)
            .with_context(|| format!("failed to parse model artifact at {}", path.display()))?;

        // The training process emits log1p-space targets. That contract is
        // recorded in the artifact rather than assumed.
        if artifact.target_transform != "log1p" {
            bail!(
                "unsupported target transform '{}' (expected 'log1p')",
                artifact.target_transform
            );
        }

        // Column identity is positional: the trained order is authoritative
        // and must equal the canonical order the record is assembled in.
        if artifact.columns.len() != FEATURE_COLUMNS.len() {
            bail!(
                "artifact has {} columns, expected {}",
                artifact.columns.len(),
                FEATURE_COLUMNS.len()
            );
        }
        for (i, col) in artifact.columns.iter().enumerate() {
            if col.name() != FEATURE_COLUMNS[i] {
                bail!(
                    "unexpected column '{}' at position {} (expected '{}')",
                    col.name(),
                    i,
                    FEATURE_COLUMNS[i]
                );
            }
            let is_numeric = matches!(col, Column::Numeric { .. });
            if is_numeric != (i < NUMERIC_COLUMNS) {
                bail!("column '{}' has the wrong kind", col.name());
            }
            if let Column::Numeric { scale, .. } = col {
                if !scale.is_finite() || *scale == 0.0 {
                    bail!("column '{}' has an unusable scale {}", col.name(), scale);
                }
            }
            if let Column::Categorical { categories, .. } = col {
                if categories.is_empty() {
                    bail!("column '{}' has no categories", col.name());
                }
            }
        }

        let width: usize = artifact.columns.iter().map(Column::width).sum();
        if artifact.coefficients.len() != width {
            bail!(
                "coefficient length mismatch: got {}, expected {}",
                artifact.coefficients.len(),
                width
            );
        }
        if artifact.coefficients.iter().any(|c| !c.is_finite()) || !artifact.intercept.is_finite()
        {
            bail!("artifact contains non-finite weights");
        }

        Ok(Self {
            version: artifact.version,
            columns: artifact.columns,
            coefficients: artifact.coefficients,
            intercept: artifact.intercept,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Width of the expanded design row.
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Evaluate the pipeline on one record. Returns the regression output in
    /// log1p(price) space.
    pub fn predict(&self, spec: &VehicleSpec) -> std::result::Result<f64, PredictError> {
        check_ranges(spec)?;

        let values = spec.feature_values();
        let mut y = self.intercept;
        let mut k = 0usize;
        for (i, (col, value)) in self.columns.iter().zip(values.iter()).enumerate() {
            match (col, value) {
                (Column::Numeric { center, scale, .. }, FeatureValue::Numeric(x)) => {
                    y += self.coefficients[k] * (x - center) / scale;
                    k += 1;
                }
                (Column::Categorical { name, categories }, FeatureValue::Categorical(v)) => {
                    let slot = categories.iter().position(|c| c == v).ok_or_else(|| {
                        PredictError::UnknownCategory {
                            column: name.clone(),
                            value: (*v).to_string(),
                        }
                    })?;
                    y += self.coefficients[k + slot];
                    k += categories.len();
                }
                // load() rejects kind/position mismatches, so this only
                // fires on a pipeline constructed by other means.
                _ => return Err(PredictError::SchemaMismatch {
                    column: FEATURE_COLUMNS[i],
                }),
            }
        }

        if !y.is_finite() {
            return Err(PredictError::NonFinite);
        }
        Ok(y)
    }
}

/// Enforce the numeric widget domains at the API boundary too; the page is
/// not the only possible client.
fn check_ranges(spec: &VehicleSpec) -> std::result::Result<(), PredictError> {
    let values = spec.feature_values();
    for (field, value) in numeric_fields().iter().zip(values.iter()) {
        if let FeatureValue::Numeric(x) = value {
            if *x < field.min || *x > field.max {
                return Err(PredictError::OutOfRange {
                    field: field.name,
                    min: field.min,
                    max: field.max,
                    value: *x,
                });
            }
        }
    }
    Ok(())
}
