//! Demonstration endpoints
//!
//! Three routes of increasing cost used to exercise the router under load:
//! a trivial ping, a read with a short simulated delay, and a JSON echo
//! with a longer one.

use crate::error::{AppError, AppResult};
use axum::{Json, body, extract::Request};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Simulated work for `/api/v1/data`
pub const DATA_DELAY: Duration = Duration::from_millis(10);

/// Simulated work for `/api/v1/process`
pub const PROCESS_DELAY: Duration = Duration::from_millis(50);

/// Largest request body `/api/v1/process` will read
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub id: u32,
    pub timestamp: DateTime<Utc>,
    pub data: &'static str,
    pub metadata: DataMetadata,
}

#[derive(Debug, Serialize)]
pub struct DataMetadata {
    pub version: &'static str,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub request_id: String,
    pub processed: Value,
}

/// `GET /ping`
pub async fn ping(_req: Request) -> Json<PingResponse> {
    Json(PingResponse {
        message: "pong",
        time: Utc::now(),
    })
}

/// `GET /api/v1/data`
pub async fn data(_req: Request) -> Json<DataResponse> {
    tokio::time::sleep(DATA_DELAY).await;

    Json(DataResponse {
        id: 123,
        timestamp: Utc::now(),
        data: "Sample data with medium complexity",
        metadata: DataMetadata {
            version: "1.0",
            kind: "test",
        },
    })
}

/// `POST /api/v1/process`
///
/// Echoes the JSON body back under `processed`. A body that is not valid
/// JSON is a 400.
pub async fn process(req: Request) -> AppResult<Json<ProcessResponse>> {
    tokio::time::sleep(PROCESS_DELAY).await;

    let bytes = body::to_bytes(req.into_body(), MAX_BODY_BYTES)
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read request body: {}", e)))?;

    let processed: Value = serde_json::from_slice(&bytes)
        .map_err(|e| AppError::Validation(format!("Invalid request body: {}", e)))?;

    Ok(Json(ProcessResponse {
        status: "processed",
        timestamp: Utc::now(),
        request_id: format!("req_{}", uuid::Uuid::new_v4().simple()),
        processed,
    }))
}
