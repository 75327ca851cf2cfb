//! Config file API Routes
//!
//! Routes:
//! - GET  /api/configs            - List config files
//! - GET  /api/config/:filename   - Parsed DSS keys + SIP account + raw text
//! - POST /api/config/:filename   - Splice edited records into raw text and save

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::Json,
    routing::get,
    Router,
};
use tracing::info;

use crate::error::ApiError;
use crate::model::{ConfigDocument, SaveResponse};
use crate::phone_cfg::{parse_config, render_config};
use crate::storage::ConfigStore;

// ============================================================================
// State
// ============================================================================

#[derive(Clone)]
pub struct ConfigState {
    pub store: Arc<dyn ConfigStore>,
}

impl ConfigState {
    pub fn new(store: Arc<dyn ConfigStore>) -> Self {
        Self { store }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_config_router(state: ConfigState) -> Router {
    Router::new()
        .route("/api/configs", get(list_configs))
        .route("/api/config/:filename", get(get_config).post(save_config))
        .with_state(state)
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/configs
async fn list_configs(State(state): State<ConfigState>) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(state.store.list().await?))
}

/// GET /api/config/:filename
async fn get_config(
    State(state): State<ConfigState>,
    Path(filename): Path<String>,
) -> Result<Json<ConfigDocument>, ApiError> {
    let raw = state.store.read(&filename).await?;
    let parsed = parse_config(&raw);

    Ok(Json(ConfigDocument {
        dss_keys: parsed.dss_keys,
        sip_account: parsed.sip_account,
        raw_config: raw,
    }))
}

/// POST /api/config/:filename
///
/// The submitted key list replaces the whole DSS table; keys left out are
/// removed from the file.
async fn save_config(
    State(state): State<ConfigState>,
    Path(filename): Path<String>,
    Json(doc): Json<ConfigDocument>,
) -> Result<Json<SaveResponse>, ApiError> {
    let text = render_config(&doc.raw_config, &doc.dss_keys, &doc.sip_account);
    state.store.write(&filename, &text).await?;

    info!(
        file = %filename,
        dss_keys = doc.dss_keys.len(),
        "config updated"
    );
    Ok(Json(SaveResponse {
        message: "Config updated".to_string(),
    }))
}
