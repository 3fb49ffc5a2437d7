use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    routing::{get, post},
    Json,
};
use serde_json::json;
use std::sync::Arc;

use ev_price_predictor::config::AppConfig;
use ev_price_predictor::model::{PredictError, PricePipeline};
use ev_price_predictor::pricing;
use ev_price_predictor::types::{form_schema, FormSchema, PredictResponse, VehicleSpec};

// ---------- Server state ----------

#[derive(Clone)]
struct AppState {
    pipeline: Arc<PricePipeline>,
}

// ---------- Handlers ----------

async fn index() -> Html<&'static str> {
    Html(include_str!("../static/index.html"))
}

async fn schema(State(state): State<AppState>) -> Json<FormSchema> {
    Json(form_schema(state.pipeline.version()))
}

async fn predict(
    State(state): State<AppState>,
    Json(spec): Json<VehicleSpec>,
) -> Result<Json<PredictResponse>, (StatusCode, Json<serde_json::Value>)> {
    let y = state.pipeline.predict(&spec).map_err(|e| {
        let status = match e {
            PredictError::OutOfRange { .. } | PredictError::UnknownCategory { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PredictError::SchemaMismatch { .. } | PredictError::NonFinite => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        tracing::warn!("prediction rejected: {e}");
        (status, Json(json!({ "error": e.to_string() })))
    })?;

    let est = pricing::estimate(y);
    tracing::info!(
        price_eur = est.rounded_eur,
        tier = est.tier.label(),
        "prediction served"
    );
    Ok(Json(PredictResponse::new(est, spec)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let cfg = AppConfig::from_env()?;
    let pipeline = PricePipeline::load(&cfg.model_path)?;

    // Warmup through the same call path a live request takes; a pipeline
    // that cannot score the form defaults must not serve.
    let warm = pricing::estimate(pipeline.predict(&VehicleSpec::default())?);
    tracing::info!(
        version = pipeline.version(),
        features = pipeline.n_features(),
        "pipeline loaded from {}; warmup estimate {} ({})",
        cfg.model_path.display(),
        pricing::format_eur(warm.rounded_eur),
        warm.tier.label()
    );

    let state = AppState {
        pipeline: Arc::new(pipeline),
    };

    let app = axum::Router::new()
        .route("/", get(index))
        .route("/schema", get(schema))
        .route("/predict", post(predict))
        .with_state(state);

    let addr = cfg.bind_addr();
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
