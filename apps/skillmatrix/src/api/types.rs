//! # API Request/Response Types
//!
//! JSON structures of the HTTP API that are not core result types, plus the
//! error-to-status mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use skillmatrix_core::snapshot::Process;
use skillmatrix_core::{
    DepartmentId, Money, OpenPosition, PositionId, ProcessId, Workforce, WorkforceError,
};

use crate::config::resolve_cost_per_level;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// QUERY PARAMETERS
// =============================================================================

/// `?cost_per_level=<major units>` on every analysis endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CostQuery {
    pub cost_per_level: Option<f64>,
}

impl CostQuery {
    /// The requested cost per level, or `default`.
    pub fn resolve(&self, default: Money) -> Result<Money, WorkforceError> {
        match self.cost_per_level {
            Some(major) => resolve_cost_per_level(major),
            None => Ok(default),
        }
    }
}

/// Filters of `GET /positions/open`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct OpenPositionsQuery {
    pub department: Option<u32>,
    pub min_level: Option<u32>,
    pub max_level: Option<u32>,
}

impl OpenPositionsQuery {
    /// Open positions matching every given filter. A single level bound
    /// leaves the other end unbounded.
    pub fn apply(&self, workforce: &Workforce) -> Result<Vec<OpenPosition>, WorkforceError> {
        let positions = if self.min_level.is_some() || self.max_level.is_some() {
            workforce.open_positions_by_level(
                self.min_level.unwrap_or(0),
                self.max_level.unwrap_or(u32::MAX),
            )?
        } else if let Some(department) = self.department {
            return Ok(workforce.open_positions_in_department(DepartmentId(department)));
        } else {
            workforce.open_positions()
        };
        Ok(match self.department {
            Some(department) => positions
                .into_iter()
                .filter(|p| p.department_id == DepartmentId(department))
                .collect(),
            None => positions,
        })
    }
}

// =============================================================================
// UNMET PROCESSES RESPONSE
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetProcess {
    pub process_id: ProcessId,
    pub description: String,
    pub aimed_workers: u32,
}

impl From<&Process> for UnmetProcess {
    fn from(process: &Process) -> Self {
        Self {
            process_id: process.id,
            description: process.description.clone(),
            aimed_workers: process.aimed_workers,
        }
    }
}

/// Processes of a position that none of its active incumbents can perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmetProcessesResponse {
    pub position_id: PositionId,
    pub position_name: String,
    pub processes: Vec<UnmetProcess>,
}

impl UnmetProcessesResponse {
    pub fn for_position(workforce: &Workforce, id: PositionId) -> Result<Self, WorkforceError> {
        let processes = workforce
            .unmet_processes(id)?
            .into_iter()
            .map(UnmetProcess::from)
            .collect();
        Ok(Self {
            position_id: id,
            position_name: workforce.position_name(id).to_string(),
            processes,
        })
    }
}

// =============================================================================
// ERRORS
// =============================================================================

/// Error body of every failed request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// A [`WorkforceError`] rendered as an HTTP response.
#[derive(Debug)]
pub struct ApiError(pub WorkforceError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            e if e.is_not_found() => StatusCode::NOT_FOUND,
            WorkforceError::InvalidParameter(_)
            | WorkforceError::InvalidSkillLevel(_)
            | WorkforceError::DeserializationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WorkforceError> for ApiError {
    fn from(err: WorkforceError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }
        (
            status,
            Json(ErrorResponse {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}
