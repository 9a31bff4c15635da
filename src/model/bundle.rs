use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::model::features::prepare_features;
use crate::model::regression::LinearRegressor;
use crate::model::task::duration::{DurationHandler, DurationRequest, DurationResponse};
use crate::model::vectorizer::FeatureVectorizer;
use crate::model::PredictError;

/// The pair of artifacts the service runs: a feature vectorizer and the
/// regression model fitted against its columns. Loaded once at startup and
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ModelBundle {
    vectorizer: FeatureVectorizer,
    model: LinearRegressor,
}

impl ModelBundle {
    pub fn new(vectorizer: FeatureVectorizer, model: LinearRegressor) -> ModelBundle {
        ModelBundle { vectorizer, model }
    }

    /// Deserializes the (vectorizer, model) pair from `path`.
    #[tracing::instrument(level = "debug")]
    pub fn load(path: impl AsRef<Path> + std::fmt::Debug) -> Result<ModelBundle, PredictError> {
        let path = path.as_ref();
        let load_err = |source: anyhow::Error| PredictError::Load {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|err| load_err(err.into()))?;
        let (vectorizer, model): (FeatureVectorizer, LinearRegressor) =
            bincode::deserialize_from(BufReader::new(file)).map_err(|err| load_err(err.into()))?;
        Ok(ModelBundle { vectorizer, model })
    }

    /// Serializes the pair to `path` in the same layout `load` reads.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), anyhow::Error> {
        let file = File::create(path)?;
        bincode::serialize_into(BufWriter::new(file), &(&self.vectorizer, &self.model))?;
        Ok(())
    }

    pub fn num_features(&self) -> usize {
        self.vectorizer.num_features()
    }
}

impl DurationHandler for ModelBundle {
    #[tracing::instrument(level = "debug", skip(self))]
    fn run_duration(&self, ride: &DurationRequest) -> Result<DurationResponse, PredictError> {
        let record = prepare_features(ride)?;
        let row = self.vectorizer.transform(&record.to_feature_map())?;
        let preds = self.model.predict(&[row])?;
        let duration = preds
            .first()
            .copied()
            .ok_or_else(|| PredictError::Prediction("model produced no output".to_string()))?;
        Ok(DurationResponse { duration })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn test_bundle() -> ModelBundle {
        ModelBundle::new(
            FeatureVectorizer::from_vocabulary(&["PU_DO=10_50", "trip_distance"], false),
            LinearRegressor::new(vec![12.0, 2.5], 1.0),
        )
    }

    fn ride(pickup: i64, dropoff: i64, distance: f64) -> DurationRequest {
        DurationRequest {
            pickup_zone_id: Some(pickup),
            dropoff_zone_id: Some(dropoff),
            trip_distance: Some(distance),
        }
    }

    #[test]
    fn runs_the_full_pipeline() {
        let response = test_bundle().run_duration(&ride(10, 50, 40.0)).unwrap();

        assert_eq!(response.duration, 1.0 + 12.0 + 2.5 * 40.0);
    }

    #[test]
    fn zero_distance_predicts_a_finite_duration() {
        let response = test_bundle().run_duration(&ride(10, 50, 0.0)).unwrap();

        assert!(response.duration.is_finite());
    }

    #[test]
    fn save_then_load_round_trips_through_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lin_reg.bin");

        test_bundle().save(&path).unwrap();
        let loaded = ModelBundle::load(&path).unwrap();

        assert_eq!(loaded.num_features(), 2);
        let response = loaded.run_duration(&ride(10, 50, 40.0)).unwrap();
        assert_eq!(response.duration, 1.0 + 12.0 + 2.5 * 40.0);
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let err = ModelBundle::load("does-not-exist.bin").unwrap_err();

        match err {
            PredictError::Load { path, .. } => {
                assert_eq!(path, Path::new("does-not-exist.bin"))
            }
            other => panic!("expected load error, got {other}"),
        }
    }

    #[test]
    fn corrupt_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lin_reg.bin");
        File::create(&path)
            .unwrap()
            .write_all(b"not a model bundle")
            .unwrap();

        let err = ModelBundle::load(&path).unwrap_err();
        assert!(matches!(err, PredictError::Load { .. }));
    }
}
