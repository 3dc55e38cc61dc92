//! HTTP handlers.
//!
//! Handlers only shape input and output: ingestion validates values, the
//! engine computes, and every request outcome is counted by endpoint.

use std::time::Instant;

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::JsonRejection,
        Multipart, State,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde_json::{json, Map, Value};

use hmpi_core::error::{HmpiError, Result};
use hmpi_core::{engine, summary, MetricsReport, ReferenceTables};

use crate::app_state::AppState;
use crate::ingest::{self, FileKind, Sample};

use super::error::ApiError;
use super::response::{timestamp, DirectResponse, SampleResult, UploadResponse};

const FILE_FIELD: &str = "file";

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": "HMPI Calculator API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "active",
        "endpoints": {
            "calculate": "/calculate",
            "calculate_direct": "/calculate-direct",
            "standards": "/standards",
            "health": "/health",
            "metrics": "/metrics"
        }
    }))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy", "timestamp": timestamp() }))
}

pub async fn standards(State(app): State<AppState>) -> Response {
    let tables = app.tables();
    Json(tables.view()).into_response()
}

pub async fn metrics(State(app): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        app.metrics().render(),
    )
        .into_response()
}

pub async fn calculate_direct(
    State(app): State<AppState>,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> std::result::Result<Json<DirectResponse>, ApiError> {
    let res = direct(&app, body);
    finish(&app, "calculate_direct", res)
}

pub async fn calculate_upload(
    State(app): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> std::result::Result<Json<UploadResponse>, ApiError> {
    let res = upload(&app, multipart).await;
    finish(&app, "calculate", res)
}

fn finish<T>(app: &AppState, endpoint: &str, res: Result<T>) -> std::result::Result<Json<T>, ApiError> {
    let outcome = match &res {
        Ok(_) => "ok",
        Err(e) => e.client_code().as_str(),
    };
    app.metrics()
        .requests
        .inc(&[("endpoint", endpoint), ("outcome", outcome)]);

    res.map(Json).map_err(|e| {
        tracing::warn!(%endpoint, error = %e, "request rejected");
        ApiError(e)
    })
}

fn direct(
    app: &AppState,
    body: std::result::Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<DirectResponse> {
    let Json(body) = body.map_err(|e| HmpiError::BadRequest(e.body_text()))?;
    if body.is_empty() {
        return Err(HmpiError::EmptySample);
    }

    let mut sample = Sample::default();
    for (metal, v) in &body {
        sample.push_json(metal, v);
    }
    count_skipped(app, &sample);
    if sample.is_empty() {
        return Err(HmpiError::EmptySample);
    }

    let tables = app.tables();
    Ok(DirectResponse {
        success: true,
        results: compute_timed(app, &tables, &sample),
        timestamp: timestamp(),
    })
}

async fn upload(
    app: &AppState,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<UploadResponse> {
    let mut multipart = multipart.map_err(|e| HmpiError::BadRequest(e.body_text()))?;
    let (filename, kind, content) =
        read_file_field(&mut multipart, app.cfg().server.max_upload_bytes).await?;

    let tables = app.tables();
    let table = match kind {
        FileKind::Csv => ingest::parse_csv(&tables, &content)?,
        FileKind::Excel => ingest::parse_excel(&tables, &content)?,
    };

    let mut samples = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        count_skipped(app, &row.sample);
        if row.sample.is_empty() {
            continue;
        }
        let report = compute_timed(app, &tables, &row.sample);
        samples.push(SampleResult::new(row.index, &table.available_metals, report));
    }

    let overall_statistics =
        summary::summarize(samples.iter().map(|s| &s.report)).ok_or(HmpiError::EmptySample)?;

    tracing::info!(
        %filename,
        rows = table.rows.len(),
        samples = overall_statistics.total_samples,
        average_hmpi = overall_statistics.average_hmpi,
        "upload processed"
    );

    Ok(UploadResponse {
        success: true,
        filename,
        overall_statistics,
        samples,
        analysis_timestamp: timestamp(),
    })
}

/// Find the `file` field; other fields are ignored.
async fn read_file_field(
    multipart: &mut Multipart,
    max_bytes: usize,
) -> Result<(String, FileKind, Bytes)> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let filename = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| HmpiError::BadRequest("file field must carry a filename".into()))?;
        let kind = ingest::detect(&filename)?;

        let content = field.bytes().await.map_err(multipart_error)?;
        if content.len() > max_bytes {
            return Err(HmpiError::PayloadTooLarge);
        }
        return Ok((filename, kind, content));
    }
    Err(HmpiError::BadRequest(format!(
        "multipart field `{FILE_FIELD}` is required"
    )))
}

fn multipart_error(e: MultipartError) -> HmpiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        HmpiError::PayloadTooLarge
    } else {
        HmpiError::BadRequest(e.body_text())
    }
}

fn compute_timed(app: &AppState, tables: &ReferenceTables, sample: &Sample) -> MetricsReport {
    let started = Instant::now();
    let report = engine::compute(tables, &sample.concentrations);

    let metrics = app.metrics();
    metrics.compute_duration.observe(&[], started.elapsed());
    metrics
        .samples
        .inc(&[("risk", report.risk_category.category.as_str())]);
    report
}

fn count_skipped(app: &AppState, sample: &Sample) {
    if sample.skipped.is_empty() {
        return;
    }
    let metrics = app.metrics();
    for s in &sample.skipped {
        metrics.skipped_values.inc(&[("reason", s.reason.as_str())]);
    }
}
