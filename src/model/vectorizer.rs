use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::PredictError;

/// A single feature value before vectorization.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Text(String),
    Number(f64),
}

/// Maps a feature mapping to a fixed-length numeric row.
///
/// Vocabulary keys follow the `name=value` convention for categorical
/// features and the bare name for numeric ones, so the one-hot column for a
/// zone pair is keyed as e.g. `PU_DO=10_50`. The vocabulary must be the one
/// the regression weights were fitted against.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FeatureVectorizer {
    vocabulary: BTreeMap<String, usize>,
    reject_unseen: bool,
}

impl FeatureVectorizer {
    pub fn from_vocabulary(names: &[&str], reject_unseen: bool) -> FeatureVectorizer {
        let vocabulary = names
            .iter()
            .enumerate()
            .map(|(column, name)| (name.to_string(), column))
            .collect();
        FeatureVectorizer {
            vocabulary,
            reject_unseen,
        }
    }

    pub fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// Produces a dense row for one feature mapping. Feature keys absent
    /// from the vocabulary are skipped unless the vectorizer was built with
    /// `reject_unseen`.
    pub fn transform(
        &self,
        features: &BTreeMap<String, FeatureValue>,
    ) -> Result<Vec<f64>, PredictError> {
        let mut row = vec![0f64; self.vocabulary.len()];
        for (name, value) in features {
            let (key, weight) = match value {
                FeatureValue::Text(text) => (format!("{name}={text}"), 1f64),
                FeatureValue::Number(number) => (name.clone(), *number),
            };
            match self.vocabulary.get(&key) {
                Some(&column) => row[column] = weight,
                None if self.reject_unseen => {
                    return Err(PredictError::Prediction(format!(
                        "feature {key} is not in the vectorizer vocabulary"
                    )))
                }
                None => {}
            }
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(pu_do: &str, distance: f64) -> BTreeMap<String, FeatureValue> {
        BTreeMap::from([
            ("PU_DO".to_string(), FeatureValue::Text(pu_do.to_string())),
            (
                "trip_distance".to_string(),
                FeatureValue::Number(distance),
            ),
        ])
    }

    #[test]
    fn transform_places_one_hot_and_numeric_columns() {
        let vectorizer =
            FeatureVectorizer::from_vocabulary(&["PU_DO=10_50", "PU_DO=3_7", "trip_distance"], false);

        let row = vectorizer.transform(&features("10_50", 40.0)).unwrap();
        assert_eq!(row, vec![1.0, 0.0, 40.0]);

        let row = vectorizer.transform(&features("3_7", 2.5)).unwrap();
        assert_eq!(row, vec![0.0, 1.0, 2.5]);
    }

    #[test]
    fn unseen_key_is_skipped_by_default() {
        let vectorizer = FeatureVectorizer::from_vocabulary(&["PU_DO=10_50", "trip_distance"], false);

        let row = vectorizer.transform(&features("99_99", 40.0)).unwrap();
        assert_eq!(row, vec![0.0, 40.0]);
    }

    #[test]
    fn unseen_key_is_rejected_in_strict_mode() {
        let vectorizer = FeatureVectorizer::from_vocabulary(&["PU_DO=10_50", "trip_distance"], true);

        let err = vectorizer.transform(&features("99_99", 40.0)).unwrap_err();
        assert!(matches!(err, PredictError::Prediction(_)));
        assert!(err.to_string().contains("PU_DO=99_99"));
    }
}
