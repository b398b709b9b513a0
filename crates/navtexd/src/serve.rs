//! HTTP serving layer
//!
//! Two endpoints, computed on demand and never cached:
//!
//! * `GET /` — index of configured source names
//! * `GET /read/{idx}` — FeatureCollection of the idx-th source
//!
//! An upstream HTTP failure (status ≥ 400) is returned as an
//! `{"Error": status}` JSON value at the same endpoint, so a
//! chart-plotter client polling the endpoint sees the failure
//! in-band rather than as transport noise.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use serde_json::json;

use navtexgeo::{Source, SourceError};

type Sources = Arc<Vec<Source>>;

/// Serve the configured sources until the process is stopped
pub async fn run(listen: SocketAddr, sources: Vec<Source>) -> anyhow::Result<()> {
    let state: Sources = Arc::new(sources);

    let app = Router::new()
        .route("/", get(index))
        .route("/read/:idx", get(read_source))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind(listen).await?;
    info!(
        "serving {} sources on http://{}",
        state.len(),
        listener.local_addr()?
    );
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index(State(sources): State<Sources>) -> Json<serde_json::Value> {
    let names: Vec<String> = sources.iter().map(Source::name).collect();
    Json(json!({ "sources": names }))
}

async fn read_source(Path(idx): Path<usize>, State(sources): State<Sources>) -> Response {
    let Some(source) = sources.get(idx).cloned() else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "Error": "no such source" })),
        )
            .into_response();
    };

    // the parsing library is synchronous
    let name = source.name();
    match tokio::task::spawn_blocking(move || source.parse()).await {
        Ok(Ok(fc)) => Json(fc).into_response(),
        Ok(Err(SourceError::Status(status))) => {
            info!("source {}: upstream status {}", name, status);
            Json(json!({ "Error": status })).into_response()
        }
        Ok(Err(err)) => {
            error!("source {}: {}", name, err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "Error": err.to_string() })),
            )
                .into_response()
        }
        Err(err) => {
            error!("source {}: worker failed: {}", name, err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
