use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use serde_json::{json, Value};

use crate::model::bundle::ModelBundle;
use crate::model::regression::LinearRegressor;
use crate::model::vectorizer::FeatureVectorizer;

#[allow(dead_code)]
#[path = "../model/mod.rs"]
mod model;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Base URL of a running prediction service
    #[arg(short, long, env, default_value = "http://localhost:9696")]
    url: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a ride to the service and print the predicted duration
    Predict {
        /// Pickup zone identifier
        #[clap(long, default_value_t = 10)]
        pickup_zone_id: i64,

        /// Dropoff zone identifier
        #[clap(long, default_value_t = 50)]
        dropoff_zone_id: i64,

        /// Trip distance in miles
        #[clap(long, default_value_t = 40.0)]
        trip_distance: f64,
    },
    /// Write a small demo model bundle to exercise the service locally
    GenerateBundle {
        /// Output path of the bundle
        #[clap(short, long, default_value = "lin_reg.bin")]
        out: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.cmd {
        Commands::Predict {
            pickup_zone_id,
            dropoff_zone_id,
            trip_distance,
        } => {
            let ride = json!({
                "PULocationID": pickup_zone_id,
                "DOLocationID": dropoff_zone_id,
                "trip_distance": trip_distance,
            });
            let response = reqwest::blocking::Client::new()
                .get(format!("{}/predict-duration", args.url))
                .json(&ride)
                .send()?;
            let body: Value = response.json()?;
            println!("{body}");
        }
        Commands::GenerateBundle { out } => {
            let bundle = demo_bundle();
            bundle.save(&out)?;
            println!(
                "Wrote model bundle with {} features to {}",
                bundle.num_features(),
                out
            );
        }
    }
    Ok(())
}

/// A bundle with made-up weights over a few zone pairs. Rides between
/// unknown zones fall back to the distance term alone.
fn demo_bundle() -> ModelBundle {
    let vectorizer = FeatureVectorizer::from_vocabulary(
        &["PU_DO=10_50", "PU_DO=50_10", "PU_DO=3_7", "trip_distance"],
        false,
    );
    let model = LinearRegressor::new(vec![12.0, 9.5, 4.0, 2.5], 7.0);
    ModelBundle::new(vectorizer, model)
}
