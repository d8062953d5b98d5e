use crate::{ApiError, ApiResult, AppState};
use axum::{
    extract::{Multipart, State},
    Json,
};
use cardiograph_core::{classify, render_risk_table, RiskFactor, RiskLevel};
use cardiograph_quantum::{run_display_circuit, CircuitParams, QuantumSummary};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Everything the pipeline produced for one uploaded row.
#[derive(Serialize)]
pub struct PredictResponse {
    pub risk: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub values: BTreeMap<RiskFactor, Option<f64>>,
    pub abnormal_factors: BTreeMap<RiskFactor, Option<f64>>,
    pub report: String,
    pub risk_table: String,
    pub quantum: QuantumSummary,
}

pub async fn welcome() -> &'static str {
    "Welcome to CardioGraph Server!"
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: option_env!("CARGO_PKG_VERSION")
            .unwrap_or("0.1.0")
            .to_string(),
    })
}

/// Accept a spreadsheet upload and run the full risk pipeline on its first
/// data row. The upload is staged on disk and removed again afterward,
/// whether or not processing succeeded.
pub async fn predict(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Json<PredictResponse>> {
    let mut upload: Option<(String, axum::body::Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(map_multipart_err)? {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().to_string();
        if filename.is_empty() {
            return Err(ApiError::BadRequest("No selected file".to_string()));
        }
        let bytes = field.bytes().await.map_err(map_multipart_err)?;
        upload = Some((filename, bytes));
        break;
    }

    let (filename, bytes) =
        upload.ok_or_else(|| ApiError::BadRequest("No file part".to_string()))?;

    let filepath = stage_upload(&state, &filename, &bytes).await?;
    let result = process_upload(&state, &filepath).await;

    if let Err(e) = tokio::fs::remove_file(&filepath).await {
        warn!(path = %filepath.display(), error = %e, "failed to remove staged upload");
    }

    result.map(Json)
}

fn map_multipart_err(e: axum::extract::multipart::MultipartError) -> ApiError {
    if e.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("Uploaded file is too large".to_string())
    } else {
        ApiError::BadRequest(e.to_string())
    }
}

/// Write the upload under the staging directory with a UUID prefix so
/// concurrent uploads of the same filename cannot collide.
async fn stage_upload(
    state: &AppState,
    filename: &str,
    bytes: &[u8],
) -> ApiResult<PathBuf> {
    let safe_name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    let filepath = state
        .config
        .upload
        .dir
        .join(format!("{}-{}", Uuid::new_v4(), safe_name));

    tokio::fs::write(&filepath, bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to stage upload: {e}")))?;

    Ok(filepath)
}

async fn process_upload(state: &AppState, path: &Path) -> ApiResult<PredictResponse> {
    // File parsing is blocking work
    let vitals = {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || cardiograph_ingest::extract_vitals(&path))
            .await
            .map_err(|e| ApiError::Internal(e.to_string()))??
    };

    let assessment = classify(vitals);
    info!(
        risk = %assessment.level,
        factors = assessment.factors.len(),
        "classified uploaded vitals"
    );

    let report =
        cardiograph_ai::narrative_report(state.report_provider.as_ref(), &assessment).await;

    let quantum = run_display_circuit(
        &CircuitParams::default(),
        state.config.quantum.shots,
        &mut rand::rng(),
    );

    let risk_table = render_risk_table(&assessment.vitals);

    let values: BTreeMap<RiskFactor, Option<f64>> = assessment.values().into_iter().collect();
    let abnormal_factors: BTreeMap<RiskFactor, Option<f64>> =
        assessment.abnormal_values().into_iter().collect();

    Ok(PredictResponse {
        risk: assessment.level,
        risk_factors: assessment.factors,
        values,
        abnormal_factors,
        report,
        risk_table,
        quantum,
    })
}
