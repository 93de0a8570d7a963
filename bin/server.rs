// Calculator Suite - Web Server
// REST API with Axum: evaluate widgets by key, history, sports listings

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use calculator_suite::sports::{self, CountrySummary, EntryFilter, SortKey, SportsEntry};
use calculator_suite::{logging, AppConfig, CalcError, CalculatorKind, HistoryEntry, HistoryStore, Recorded};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;

/// Shared application state
#[derive(Clone)]
struct AppState {
    store: Arc<Mutex<HistoryStore>>,
    sports: Arc<Vec<SportsEntry>>,
}

/// API Response wrapper
#[derive(Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// Offending input field on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Response {
        let body = Self {
            success: true,
            data: Some(data),
            error: None,
            field: None,
        };
        (StatusCode::OK, Json(body)).into_response()
    }
}

fn failure(status: StatusCode, message: impl Into<String>, field: Option<String>) -> Response {
    let body: ApiResponse<()> = ApiResponse {
        success: false,
        data: None,
        error: Some(message.into()),
        field,
    };
    (status, Json(body)).into_response()
}

/// Widget errors are the caller's fault; everything else is ours
fn calc_failure(err: CalcError) -> Response {
    let status = match err {
        CalcError::UnknownCalculator(_) => StatusCode::NOT_FOUND,
        CalcError::MalformedInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let field = err.field().map(str::to_string);
    failure(status, err.to_string(), field)
}

fn internal_failure(context: &str, err: anyhow::Error) -> Response {
    tracing::error!(error = %format!("{:#}", err), "{}", context);
    failure(StatusCode::INTERNAL_SERVER_ERROR, context, None)
}

impl AppState {
    fn store(&self) -> Result<MutexGuard<'_, HistoryStore>, Response> {
        self.store
            .lock()
            .map_err(|_| failure(StatusCode::INTERNAL_SERVER_ERROR, "history store unavailable", None))
    }
}

#[derive(Serialize)]
struct CalculatorInfo {
    key: &'static str,
    title: &'static str,
}

#[derive(Serialize)]
struct EvaluationResponse {
    key: &'static str,
    title: &'static str,
    output: Value,
    summary: Vec<(String, String)>,
    /// Appended history entry; absent when identical to the newest one
    #[serde(skip_serializing_if = "Option::is_none")]
    history_entry: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct SportsQuery {
    /// Comma-separated country list
    country: Option<String>,
    name: Option<String>,
    sport: Option<String>,
    sort: Option<String>,
}

impl SportsQuery {
    fn filter(&self) -> EntryFilter {
        let countries = self
            .country
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let non_blank = |v: &Option<String>| v.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

        EntryFilter {
            countries,
            name: non_blank(&self.name),
            sport: non_blank(&self.sport),
        }
    }

    fn sort_key(&self) -> SortKey {
        match self.sort.as_deref().map(str::to_lowercase).as_deref() {
            Some("name") => SortKey::Name,
            Some("country") => SortKey::Country,
            Some("score") => SortKey::Score,
            _ => SortKey::Rank,
        }
    }
}

fn decode_key(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| raw.to_string())
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/health - Health check
async fn health_check() -> Response {
    ApiResponse::ok(format!("OK (v{})", calculator_suite::VERSION))
}

/// GET /api/calculators - Widget registry
async fn list_calculators() -> Response {
    let list: Vec<CalculatorInfo> = CalculatorKind::ALL
        .iter()
        .map(|k| CalculatorInfo {
            key: k.key(),
            title: k.title(),
        })
        .collect();
    ApiResponse::ok(list)
}

/// POST /api/calculators/:key - Evaluate a widget, remember inputs, record history
async fn evaluate_calculator(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(input): Json<Value>,
) -> Response {
    let key = decode_key(&key);
    let kind = match CalculatorKind::from_key(&key) {
        Ok(kind) => kind,
        Err(e) => return calc_failure(e),
    };

    let evaluation = match kind.evaluate(input) {
        Ok(eval) => eval,
        Err(e) => {
            tracing::debug!(calculator = kind.key(), error = %e, "rejected input");
            return calc_failure(e);
        }
    };

    let store = match state.store() {
        Ok(store) => store,
        Err(resp) => return resp,
    };
    if let Err(e) = store.save_inputs(kind.key(), &evaluation.input) {
        return internal_failure("Failed to save inputs", e);
    }
    let history_entry = match store.record_json(kind.key(), evaluation.input.clone(), evaluation.output.clone()) {
        Ok(Recorded::Appended(id)) => Some(id),
        Ok(Recorded::Duplicate(_)) => None,
        Err(e) => return internal_failure("Failed to record history", e),
    };

    ApiResponse::ok(EvaluationResponse {
        key: evaluation.key,
        title: evaluation.title,
        summary: evaluation.report.summary(),
        output: evaluation.output,
        history_entry,
    })
}

/// GET /api/history/:key - Past calculations, newest first
async fn get_history(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let kind = match CalculatorKind::from_key(&decode_key(&key)) {
        Ok(kind) => kind,
        Err(e) => return calc_failure(e),
    };
    let store = match state.store() {
        Ok(store) => store,
        Err(resp) => return resp,
    };

    match store.history(kind.key()) {
        Ok(entries) => ApiResponse::<Vec<HistoryEntry>>::ok(entries),
        Err(e) => internal_failure("Failed to read history", e),
    }
}

/// GET /api/inputs/:key - Last saved inputs (null when none)
async fn get_inputs(State(state): State<AppState>, Path(key): Path<String>) -> Response {
    let kind = match CalculatorKind::from_key(&decode_key(&key)) {
        Ok(kind) => kind,
        Err(e) => return calc_failure(e),
    };
    let store = match state.store() {
        Ok(store) => store,
        Err(resp) => return resp,
    };

    match store.load_inputs_json(kind.key()) {
        Ok(inputs) => ApiResponse::ok(inputs.unwrap_or(Value::Null)),
        Err(e) => internal_failure("Failed to read saved inputs", e),
    }
}

/// GET /api/sports?country=a,b&name=&sport=&sort= - Filtered roster
async fn get_sports(State(state): State<AppState>, Query(query): Query<SportsQuery>) -> Response {
    let mut entries = sports::filter_entries(&state.sports, &query.filter());
    sports::sort_entries(&mut entries, query.sort_key());
    ApiResponse::ok(entries)
}

/// GET /api/sports/countries - Per-country counts and best rank
async fn get_countries(State(state): State<AppState>) -> Response {
    ApiResponse::<Vec<CountrySummary>>::ok(sports::country_summary(&state.sports))
}

// ============================================================================
// Main Server
// ============================================================================

fn app(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route("/calculators", get(list_calculators))
        .route("/calculators/:key", axum::routing::post(evaluate_calculator))
        .route("/history/:key", get(get_history))
        .route("/inputs/:key", get(get_inputs))
        .route("/sports", get(get_sports))
        .route("/sports/countries", get(get_countries))
        .with_state(state);

    Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive())
}

fn load_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = HistoryStore::open(&config.database_path)?;
    tracing::info!(path = %config.database_path.display(), "history database opened");

    let sports = match &config.sports_data {
        Some(path) => sports::load_entries(path)?,
        None => {
            tracing::warn!("sports_data not configured; sports endpoints will be empty");
            Vec::new()
        }
    };

    Ok(AppState {
        store: Arc::new(Mutex::new(store)),
        sports: Arc::new(sports),
    })
}

#[tokio::main]
async fn main() {
    let config_path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let config = match AppConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };
    logging::init(&logging::level_for(false, &config.log_level));

    println!("🌐 Calculator Suite - Web Server");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let state = match load_state(&config) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("❌ {:#}", e);
            std::process::exit(1);
        }
    };

    let addr = config.server.bind_address();
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("❌ Failed to bind to {}: {}", addr, e);
            std::process::exit(1);
        }
    };

    println!("\n🚀 Server running on http://{}", addr);
    println!("   API: http://{}/api/calculators", addr);
    println!("\n   Press Ctrl+C to stop\n");

    if let Err(e) = axum::serve(listener, app(state)).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
