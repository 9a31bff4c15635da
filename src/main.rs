use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use clap_serde_derive::ClapSerde;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::error::HttpErrorResponse;
use crate::error::{PredictorResult, RidePredictorError};
use crate::model::bundle::ModelBundle;
use crate::model::task::duration::{DurationHandler, DurationRequest, DurationResponse};
use crate::model::PredictError;

mod config;
mod error;
mod model;
mod telemetry;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, env, default_value = "RidePredictor.toml")]
    config_file: String,

    /// Configuration options
    #[command(flatten)]
    pub opt_config: <Config as ClapSerde>::Opt,
}

#[derive(Clone)]
struct AppState {
    bundle: Arc<ModelBundle>,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry();

    let args = Args::parse();
    let config = match Config::from_toml(&args.config_file) {
        Ok(conf) => conf.merge(args.opt_config),
        Err(err) => {
            if args.config_file == "RidePredictor.toml" {
                Config::default().merge(args.opt_config)
            } else {
                exit_err!(
                    1,
                    "Failed to read configuration file {} with error: {}",
                    args.config_file,
                    err
                )
            }
        }
    };

    // The bundle must be usable before the listener opens, otherwise the
    // process would accept traffic it can only fail.
    let bundle = match ModelBundle::load(&config.model_file) {
        Ok(bundle) => bundle,
        Err(err) => exit_err!(1, "{}", err),
    };
    info!(
        "Loaded model bundle from {} with {} features",
        config.model_file,
        bundle.num_features()
    );

    let state = AppState {
        bundle: Arc::new(bundle),
    };
    let router = router(state);

    let listener = TcpListener::bind(format!("{}:{}", config.address, config.port)).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

fn router(state: AppState) -> Router {
    // The upstream interface is GET with a JSON body; POST is routed too for
    // clients that refuse to send one.
    Router::new()
        .route(
            "/predict-duration",
            get(handle_duration_request).post(handle_duration_request),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutting down..."),
        Err(e) => error!("Failed to listen for shutdown signal: {}", e),
    }
}

#[axum_macros::debug_handler]
async fn handle_duration_request(
    State(state): State<AppState>,
    Json(ride): Json<DurationRequest>,
) -> PredictorResult<(StatusCode, Json<DurationResponse>)> {
    match state.bundle.run_duration(&ride) {
        Ok(response) => Ok((StatusCode::OK, Json(response))),
        Err(err) => {
            let status = match err {
                PredictError::Validation { .. } => StatusCode::BAD_REQUEST,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            bail_predictor!(status, "{}", err)
        }
    }
}
