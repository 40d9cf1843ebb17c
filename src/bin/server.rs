use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post},
};
use pizza_slicer::grid::Grid;
use pizza_slicer::render;
use pizza_slicer::solver::Solver;
use pizza_slicer::types::Rect;
use serde::{Deserialize, Serialize};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[derive(Deserialize)]
struct SliceRequest {
    pizza: String,
    #[serde(default)]
    diagram: bool,
}

#[derive(Serialize)]
struct SliceResponse {
    slices: Vec<Rect>,
    slice_count: usize,
    used: usize,
    waste: usize,
    surface: usize,
    used_percent: f64,
    submission: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    diagram: Option<String>,
}

/// First line of a pizza description, trimmed. Request logs carry this
/// instead of the whole grid.
fn pizza_header(pizza: &str) -> &str {
    pizza.lines().next().unwrap_or_default().trim()
}

async fn slice(
    Json(req): Json<SliceRequest>,
) -> Result<Json<SliceResponse>, (StatusCode, String)> {
    tracing::info!(
        header = pizza_header(&req.pizza),
        bytes = req.pizza.len(),
        diagram = req.diagram,
        "POST /slice"
    );

    let grid = Grid::parse(&req.pizza).map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;
    let with_diagram = req.diagram;

    let response = tokio::task::spawn_blocking(move || {
        let mut solver = Solver::new(grid);
        let solution = solver.solve();
        let diagram = with_diagram.then(|| render::render_grid(solver.grid()));
        SliceResponse {
            slice_count: solution.slice_count(),
            used: solution.used,
            waste: solution.waste,
            surface: solution.surface,
            used_percent: solution.used_percent(),
            submission: solution.to_submission(),
            slices: solution.slices,
            diagram,
        }
    })
    .await
    .map_err(|e| {
        sentry::capture_error(&e);
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
    })?;

    Ok(Json(response))
}

#[tokio::main]
async fn main() {
    let _sentry = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init(sentry::ClientOptions {
            dsn: dsn.parse().ok(),
            release: sentry::release_name!(),
            ..Default::default()
        })
    });

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open("development.log")
        .expect("failed to open development.log");

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_target(false)
        .with_ansi(false)
        .with_max_level(Level::INFO)
        .init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3001".to_string());
    let addr = format!("0.0.0.0:{port}");

    let app = Router::new()
        .route("/up", get(|| async { "ok" }))
        .route("/slice", post(slice))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        );

    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    eprintln!("Listening on {addr}");
    axum::serve(listener, app).await.unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pizza_header_leaves_out_rows() {
        assert_eq!(pizza_header("3 5 1 6\r\nTTTTT\nTMMMT\nTTTTT\n"), "3 5 1 6");
        assert_eq!(pizza_header(""), "");
    }

    #[test]
    fn test_request_diagram_defaults_off() {
        let req: SliceRequest = serde_json::from_str(r#"{"pizza": "1 1 0 1\nT\n"}"#).unwrap();
        assert!(!req.diagram);
        assert_eq!(pizza_header(&req.pizza), "1 1 0 1");
    }
}
