//! # API Endpoint Handlers
//!
//! Analysis handlers take a read lock on the loaded workforce for the
//! duration of one analysis; `PUT /snapshot` indexes the new snapshot before
//! taking the write lock.

use super::{
    AppState,
    types::{ApiError, CostQuery, HealthResponse, OpenPositionsQuery, UnmetProcessesResponse},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    response::IntoResponse,
};
use skillmatrix_core::{
    CapabilityReport, EmploymentAnalysis, OpenPosition, PositionId, ProcessCapabilityGap,
    ProcessId, RelianceIssue, RelianceReport, Snapshot, SnapshotSummary, Workforce,
    WorkforceError,
};

type ApiResult<T> = Result<Json<T>, ApiError>;

// =============================================================================
// HEALTH & SUMMARY
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

/// Entity counts of the loaded snapshot.
pub async fn summary_handler(State(state): State<AppState>) -> Json<SnapshotSummary> {
    let workforce = state.workforce.read().await;
    Json(workforce.summary())
}

// =============================================================================
// POSITIONS
// =============================================================================

pub async fn open_positions_handler(
    State(state): State<AppState>,
    Query(query): Query<OpenPositionsQuery>,
) -> ApiResult<Vec<OpenPosition>> {
    let workforce = state.workforce.read().await;
    Ok(Json(query.apply(&workforce)?))
}

/// Internal candidates and the external hiring baseline for a position.
pub async fn candidates_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<CostQuery>,
) -> ApiResult<EmploymentAnalysis> {
    let cost_per_level = query.resolve(state.cost_per_level)?;
    let workforce = state.workforce.read().await;
    let analysis = workforce.analyze_candidates(PositionId(id), cost_per_level)?;
    tracing::debug!(
        position = id,
        candidates = analysis.candidates.len(),
        "candidates analysed"
    );
    Ok(Json(analysis))
}

pub async fn unmet_processes_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<UnmetProcessesResponse> {
    let workforce = state.workforce.read().await;
    Ok(Json(UnmetProcessesResponse::for_position(
        &workforce,
        PositionId(id),
    )?))
}

// =============================================================================
// CAPABILITY
// =============================================================================

pub async fn capability_handler(
    State(state): State<AppState>,
    Query(query): Query<CostQuery>,
) -> ApiResult<CapabilityReport> {
    let cost_per_level = query.resolve(state.cost_per_level)?;
    let workforce = state.workforce.read().await;
    Ok(Json(workforce.analyze_capability_gaps(cost_per_level)?))
}

pub async fn process_capability_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<CostQuery>,
) -> ApiResult<ProcessCapabilityGap> {
    let cost_per_level = query.resolve(state.cost_per_level)?;
    let workforce = state.workforce.read().await;
    Ok(Json(
        workforce.analyze_process_gap(ProcessId(id), cost_per_level)?,
    ))
}

// =============================================================================
// RELIANCE
// =============================================================================

pub async fn reliance_handler(
    State(state): State<AppState>,
    Query(query): Query<CostQuery>,
) -> ApiResult<RelianceReport> {
    let cost_per_level = query.resolve(state.cost_per_level)?;
    let workforce = state.workforce.read().await;
    Ok(Json(workforce.analyze_worker_reliance(cost_per_level)?))
}

pub async fn process_reliance_handler(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<CostQuery>,
) -> ApiResult<RelianceIssue> {
    let cost_per_level = query.resolve(state.cost_per_level)?;
    let workforce = state.workforce.read().await;
    Ok(Json(
        workforce.analyze_process_reliance(ProcessId(id), cost_per_level)?,
    ))
}

// =============================================================================
// SNAPSHOT REPLACEMENT
// =============================================================================

/// Replace the loaded snapshot and return the new summary.
pub async fn replace_snapshot_handler(
    State(state): State<AppState>,
    Json(snapshot): Json<Snapshot>,
) -> ApiResult<SnapshotSummary> {
    let workforce = tokio::task::spawn_blocking(move || Workforce::new(snapshot))
        .await
        .map_err(|e| WorkforceError::IoError(format!("Indexing task failed: {}", e)))?;
    let summary = workforce.summary();

    *state.workforce.write().await = workforce;
    tracing::info!(
        employees = summary.employees,
        positions = summary.positions,
        processes = summary.processes,
        "snapshot replaced"
    );
    Ok(Json(summary))
}
