use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::ConfigurationError;

pub const FEATURE_LEN: usize = 10;
pub const HIDDEN_LEN: usize = 8;
pub const CLASS_LEN: usize = 3;

/// Hidden-layer nonlinearity recorded in the artifact at training time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Sigmoid,
    Relu,
}

impl Activation {
    pub fn apply(self, z: f64) -> f64 {
        match self {
            Activation::Sigmoid => 1.0 / (1.0 + (-z).exp()),
            Activation::Relu => z.max(0.0),
        }
    }
}

/// Versioned weight artifact for the approval network.
///
/// Injected configuration: the inference code never mutates it, and a missing
/// or shape-mismatched artifact fails pipeline construction outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkWeights {
    pub version: String,
    pub activation: Activation,
    /// Hidden weights, `HIDDEN_LEN` rows of `FEATURE_LEN` columns.
    pub w1: Vec<Vec<f64>>,
    pub b1: Vec<f64>,
    /// Output weights, `CLASS_LEN` rows of `HIDDEN_LEN` columns.
    pub w2: Vec<Vec<f64>>,
    pub b2: Vec<f64>,
}

impl NetworkWeights {
    /// Load an artifact from a JSON export.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, WeightsImportError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, WeightsImportError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Confirm every matrix matches the 10 -> 8 -> 3 topology.
    pub fn validate_shape(&self) -> Result<(), ConfigurationError> {
        check_matrix("w1", &self.w1, HIDDEN_LEN, FEATURE_LEN)?;
        check_vector("b1", &self.b1, HIDDEN_LEN)?;
        check_matrix("w2", &self.w2, CLASS_LEN, HIDDEN_LEN)?;
        check_vector("b2", &self.b2, CLASS_LEN)?;
        Ok(())
    }

    /// The hand-tuned artifact shipped with the engine.
    ///
    /// Hidden units are interpretable detectors rather than trained values:
    /// creditworthiness, risk alarm, stability, overextension, repayment
    /// capacity, risk spike, prime score, thin margin. The output rows score
    /// approval and rejection as mirrored contrasts over those detectors,
    /// with the review row reading overall activation mass.
    pub fn builtin() -> Self {
        Self {
            version: "builtin-2025.1".to_string(),
            activation: Activation::Sigmoid,
            w1: vec![
                // creditworthiness
                vec![0.0, 3.0, 2.0, -2.5, 0.5, 0.5, -1.0, -0.5, -3.0, 1.0],
                // risk alarm
                vec![0.0, -2.0, -1.5, 2.5, 0.0, 0.0, 1.0, 1.0, 3.0, -1.0],
                // stability
                vec![1.0, 0.0, 0.0, 0.0, 1.5, 1.0, -0.5, 0.0, 0.0, 0.0],
                // overextension
                vec![0.0, 0.0, -1.0, 2.0, 0.0, 0.0, 1.5, 1.5, 0.0, 0.0],
                // repayment capacity
                vec![0.0, 0.0, 2.0, -2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.5],
                // risk spike
                vec![0.0, -1.5, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 4.0, 0.0],
                // prime score
                vec![0.0, 2.5, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.5, 0.0],
                // thin margin
                vec![0.0, 0.0, 0.0, 2.0, -1.0, -1.0, 0.0, 0.0, 2.0, 0.0],
            ],
            b1: vec![-2.0, -0.5, -1.5, -1.0, -1.0, -0.5, -1.5, -0.5],
            w2: vec![
                vec![2.0, -2.0, 1.0, -1.0, 1.5, -1.5, 1.5, -1.0],
                vec![0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4, 0.4],
                vec![-2.0, 2.0, -1.0, 1.0, -1.5, 1.5, -1.5, 1.0],
            ],
            b2: vec![-1.0, -0.4, -1.0],
        }
    }
}

fn check_matrix(
    name: &'static str,
    matrix: &[Vec<f64>],
    rows: usize,
    cols: usize,
) -> Result<(), ConfigurationError> {
    if matrix.len() != rows || matrix.iter().any(|row| row.len() != cols) {
        return Err(ConfigurationError::WeightShape {
            matrix: name,
            expected_rows: rows,
            expected_cols: cols,
            found_rows: matrix.len(),
            found_cols: matrix.first().map(|row| row.len()).unwrap_or(0),
        });
    }
    Ok(())
}

fn check_vector(
    name: &'static str,
    vector: &[f64],
    len: usize,
) -> Result<(), ConfigurationError> {
    if vector.len() != len {
        return Err(ConfigurationError::WeightShape {
            matrix: name,
            expected_rows: len,
            expected_cols: 1,
            found_rows: vector.len(),
            found_cols: 1,
        });
    }
    Ok(())
}

#[derive(Debug)]
pub enum WeightsImportError {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for WeightsImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeightsImportError::Io(err) => write!(f, "failed to read weight artifact: {}", err),
            WeightsImportError::Json(err) => write!(f, "invalid weight artifact json: {}", err),
        }
    }
}

impl std::error::Error for WeightsImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WeightsImportError::Io(err) => Some(err),
            WeightsImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for WeightsImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for WeightsImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
