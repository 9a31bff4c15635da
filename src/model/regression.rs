use serde::{Deserialize, Serialize};

use crate::model::PredictError;

/// Linear regression over the vectorizer's feature rows.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LinearRegressor {
    coefficients: Vec<f64>,
    intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> LinearRegressor {
        LinearRegressor {
            coefficients,
            intercept,
        }
    }

    pub fn num_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Predicts one value per input row.
    pub fn predict(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, PredictError> {
        rows.iter()
            .map(|row| {
                if row.len() != self.coefficients.len() {
                    return Err(PredictError::Prediction(format!(
                        "feature row has {} columns, model expects {}",
                        row.len(),
                        self.coefficients.len()
                    )));
                }
                let dot: f64 = row
                    .iter()
                    .zip(&self.coefficients)
                    .map(|(x, w)| x * w)
                    .sum();
                Ok(self.intercept + dot)
            })
            .collect()
    }
}
