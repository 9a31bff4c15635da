use std::collections::BTreeMap;

use crate::model::task::duration::DurationRequest;
use crate::model::vectorizer::FeatureValue;
use crate::model::PredictError;

/// Features derived from one ride. The pickup and dropoff zones are folded
/// into a single categorical key, which must match the format the vectorizer
/// vocabulary was built with.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    pub pu_do: String,
    pub trip_distance: f64,
}

impl FeatureRecord {
    pub fn to_feature_map(&self) -> BTreeMap<String, FeatureValue> {
        BTreeMap::from([
            (
                "PU_DO".to_string(),
                FeatureValue::Text(self.pu_do.clone()),
            ),
            (
                "trip_distance".to_string(),
                FeatureValue::Number(self.trip_distance),
            ),
        ])
    }
}

pub fn prepare_features(ride: &DurationRequest) -> Result<FeatureRecord, PredictError> {
    let pickup = ride.pickup_zone_id.ok_or(PredictError::Validation {
        field: "PULocationID",
    })?;
    let dropoff = ride.dropoff_zone_id.ok_or(PredictError::Validation {
        field: "DOLocationID",
    })?;
    let trip_distance = ride.trip_distance.ok_or(PredictError::Validation {
        field: "trip_distance",
    })?;

    Ok(FeatureRecord {
        pu_do: format!("{pickup}_{dropoff}"),
        trip_distance,
    })
}
