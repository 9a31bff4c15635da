use serde::{Deserialize, Serialize};

use crate::model::PredictError;

/// One ride as it arrives in the request body. Fields are optional so that
/// an absent field is reported by name instead of failing opaquely at
/// deserialization.
#[derive(Deserialize, Debug)]
pub struct DurationRequest {
    #[serde(rename = "PULocationID")]
    pub pickup_zone_id: Option<i64>,

    #[serde(rename = "DOLocationID")]
    pub dropoff_zone_id: Option<i64>,

    pub trip_distance: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct DurationResponse {
    pub duration: f64,
}

pub trait DurationHandler {
    fn run_duration(&self, ride: &DurationRequest) -> Result<DurationResponse, PredictError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_the_upstream_field_names() {
        let ride: DurationRequest =
            serde_json::from_str(r#"{"PULocationID": 10, "DOLocationID": 50, "trip_distance": 40}"#)
                .unwrap();

        assert_eq!(ride.pickup_zone_id, Some(10));
        assert_eq!(ride.dropoff_zone_id, Some(50));
        assert_eq!(ride.trip_distance, Some(40.0));
    }

    #[test]
    fn absent_fields_deserialize_as_none() {
        let ride: DurationRequest =
            serde_json::from_str(r#"{"PULocationID": 10, "DOLocationID": 50}"#).unwrap();

        assert_eq!(ride.trip_distance, None);
    }
}
