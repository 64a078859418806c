use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::{Json, Router, routing::post};
use log::{error, info};
use serde::Deserialize;

use crate::config::ServerConfig;
use crate::data::{TimetableInput, TimetableOutput};
use crate::solver::{self, SolverOptions};

#[derive(Clone)]
struct AppState {
    default_seed: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct GenerateParams {
    seed: Option<u64>,
}

async fn generate_handler(
    State(state): State<AppState>,
    Query(params): Query<GenerateParams>,
    Json(input): Json<TimetableInput>,
) -> Result<Json<TimetableOutput>, (StatusCode, String)> {
    let options = SolverOptions {
        seed: params.seed.or(state.default_seed),
    };
    // each run is CPU-bound and owns its grids
    let result = tokio::task::spawn_blocking(move || solver::generate(&input, &options))
        .await
        .map_err(|e| {
            error!("Timetable generation task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        })?;
    match result {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err((StatusCode::BAD_REQUEST, e.to_string())),
    }
}

pub fn router(config: &ServerConfig) -> Router {
    Router::new()
        .route("/v1/timetable/generate", post(generate_handler))
        .with_state(AppState {
            default_seed: config.seed,
        })
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let app = router(&config);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Server running at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
