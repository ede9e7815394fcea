//! HTTP + WebSocket API for ZÉNA
//!
//! Endpoints:
//! - GET /health - Health check
//! - POST /analyze/rps - RPS analysis, persisted, alerts broadcast
//! - POST /analyze/emotional - Conversational analysis + reply
//! - GET /protocols - Active protocol catalog
//! - GET /history/:user_id - Stored analyses of one user
//! - WS /ws/alerts - Live anonymized alerts

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::core::alerts::AlertDispatcher;
use crate::core::emotional::EmotionalAnalyzer;
use crate::core::engine::RpsEngine;
use crate::core::reply::ReplyComposer;
use crate::core::storage::{AnalysisStore, MemoryStore};
use crate::types::{
    AnalysisInput, AnalysisRecord, AnonymizedAlert, EmotionalAnalysis, InterventionProtocol,
    Reply, ReplyRequest, RpsReport, SelfReport, UserProfile,
};

/// Buffered alerts per WebSocket subscriber before it starts lagging
const ALERT_CHANNEL_CAPACITY: usize = 100;

/// App state
pub struct AppState {
    pub engine: RpsEngine,
    pub emotional: EmotionalAnalyzer,
    pub store: Arc<dyn AnalysisStore>,
    pub dispatcher: AlertDispatcher,
    pub composer: ReplyComposer,
    pub alerts_tx: broadcast::Sender<AnonymizedAlert>,
}

impl AppState {
    pub fn new(
        engine: RpsEngine,
        store: Arc<dyn AnalysisStore>,
        dispatcher: AlertDispatcher,
        composer: ReplyComposer,
    ) -> Self {
        let (alerts_tx, _) = broadcast::channel(ALERT_CHANNEL_CAPACITY);
        Self {
            engine,
            emotional: EmotionalAnalyzer::new(),
            store,
            dispatcher,
            composer,
            alerts_tx,
        }
    }

    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Ok(Self::new(
            RpsEngine::with_catalog(config.load_catalog()?),
            config.open_store(),
            AlertDispatcher::new(config.alert_salt.clone()),
            ReplyComposer::new(),
        ))
    }

    /// Built-in catalog, in-memory history, template replies
    pub fn in_memory() -> Self {
        Self::new(
            RpsEngine::new(),
            Arc::new(MemoryStore::new()),
            AlertDispatcher::default(),
            ReplyComposer::new(),
        )
    }
}

/// Conversational analysis request
#[derive(Debug, Deserialize)]
pub struct EmotionalRequest {
    pub text: String,
    #[serde(default)]
    pub scores: Option<SelfReport>,
    #[serde(default)]
    pub profile: Option<UserProfile>,
}

/// Conversational analysis response
#[derive(Debug, Serialize)]
pub struct EmotionalResponse {
    pub analysis: EmotionalAnalysis,
    pub reply: Reply,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub protocols: usize,
}

/// History response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub user_id: String,
    pub records: Vec<AnalysisRecord>,
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/analyze/rps", post(analyze_rps))
        .route("/analyze/emotional", post(analyze_emotional))
        .route("/protocols", get(list_protocols))
        .route("/history/:user_id", get(history))
        .route("/ws/alerts", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        protocols: state.engine.catalog().len(),
    })
}

/// Analyze, persist, then fan out alerts for the selected protocol
async fn analyze_rps(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AnalysisInput>,
) -> Result<Json<RpsReport>, StatusCode> {
    if input.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let report = state.engine.analyze(&input);

    state
        .store
        .append(AnalysisRecord::from_report(&input, &report))
        .map_err(|e| {
            error!(error = %e, "failed to persist analysis");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    for alert in state.dispatcher.dispatch_report(input.user_id.as_deref(), &report) {
        // No subscribers is fine
        if state.alerts_tx.send(alert).is_err() {
            debug!("alert dropped, no subscribers");
        }
    }

    Ok(Json(report))
}

/// Conversational analysis plus composed reply
async fn analyze_emotional(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EmotionalRequest>,
) -> Result<Json<EmotionalResponse>, StatusCode> {
    if req.text.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let analysis = state.emotional.analyze_input(&req.text, req.scores.as_ref());
    let reply = state.composer.compose(&ReplyRequest {
        text: &req.text,
        analysis: &analysis,
        profile: req.profile.as_ref(),
    });

    Ok(Json(EmotionalResponse { analysis, reply }))
}

async fn list_protocols(State(state): State<Arc<AppState>>) -> Json<Vec<InterventionProtocol>> {
    Json(state.engine.catalog().protocols().to_vec())
}

async fn history(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    let records = state.store.history(&user_id).map_err(|e| {
        error!(error = %e, "failed to read history");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(HistoryResponse { user_id, records }))
}

/// WebSocket handler for live alerts
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.alerts_tx.subscribe();
    ws.on_upgrade(move |socket| handle_websocket(socket, rx))
}

/// Forward alerts until either side goes away
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<AnonymizedAlert>) {
    let (mut sender, mut receiver) = socket.split();

    let mut send_task = tokio::spawn(async move {
        loop {
            match rx.recv().await {
                Ok(alert) => {
                    let json = match serde_json::to_string(&alert) {
                        Ok(json) => json,
                        Err(e) => {
                            warn!(error = %e, "cannot serialize alert");
                            continue;
                        }
                    };
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "alert subscriber lagging");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(message)) = receiver.next().await {
            if matches!(message, Message::Close(_)) {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Run the API server
pub async fn run_server(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(config)?);
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(&config.addr).await?;
    info!(addr = %config.addr, "ZÉNA API listening");
    info!("  GET  /health             - Health check");
    info!("  POST /analyze/rps        - RPS analysis");
    info!("  POST /analyze/emotional  - Emotional analysis + reply");
    info!("  GET  /protocols          - Protocol catalog");
    info!("  GET  /history/:user_id   - Analysis history");
    info!("  WS   /ws/alerts          - Live alerts");
    axum::serve(listener, router).await?;
    Ok(())
}
