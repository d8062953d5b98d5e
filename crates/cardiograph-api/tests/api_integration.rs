use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use cardiograph_api::{create_router, AppState};
use cardiograph_core::{CardiographConfig, ConfigManager};
use std::sync::Arc;

async fn test_server(upload_dir: &std::path::Path) -> TestServer {
    let mut config = CardiographConfig::default();
    config.upload.dir = upload_dir.to_path_buf();
    // Keep tests offline and deterministic
    config.report.provider = "template".to_string();

    let manager = Arc::new(ConfigManager::with_config(config).expect("config"));
    let state = AppState::new(manager).await.expect("app state");
    TestServer::new(create_router(state)).unwrap()
}

fn csv_upload(content: &str, filename: &str) -> MultipartForm {
    MultipartForm::new().add_part(
        "file",
        Part::bytes(content.as_bytes().to_vec())
            .file_name(filename)
            .mime_type("text/csv"),
    )
}

#[tokio::test]
async fn welcome_returns_greeting() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let resp = server.get("/").await;
    assert_eq!(resp.status_code(), 200);
    assert_eq!(resp.text(), "Welcome to CardioGraph Server!");
}

#[tokio::test]
async fn health_endpoint_returns_ok() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let resp = server.get("/health").await;
    assert_eq!(resp.status_code(), 200);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn predict_flags_high_risk_row() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let form = csv_upload(
        "Patient ID,Heart Rate,Blood Pressure,Stress Level\np-1,120,150,7\np-2,70,110,2\n",
        "vitals.csv",
    );
    let resp = server.post("/predict").multipart(form).await;
    assert_eq!(resp.status_code(), 200);

    let body: serde_json::Value = resp.json();
    assert_eq!(body["risk"], "High Risk");
    assert_eq!(
        body["risk_factors"],
        serde_json::json!(["Heart Rate", "Blood Pressure", "Stress Level"])
    );
    assert_eq!(body["values"]["Heart Rate"], 120.0);
    assert_eq!(body["abnormal_factors"]["Stress Level"], 7.0);
    assert!(body["report"].as_str().unwrap().contains("Medical Report"));
    assert!(body["risk_table"]
        .as_str()
        .unwrap()
        .contains("style='color:red;'>Abnormal"));
    // Default circuit parameters always collapse to |000>
    assert_eq!(body["quantum"]["quantum_state"], "000");
    assert_eq!(
        body["quantum"]["quantum_message"],
        "QAOA-inspired optimization simulated successfully."
    );
}

#[tokio::test]
async fn predict_low_risk_row_uses_template_summary() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let form = csv_upload(
        "heart rate,blood pressure,stress level\n72,118,2\n",
        "vitals.csv",
    );
    let resp = server.post("/predict").multipart(form).await;
    assert_eq!(resp.status_code(), 200);

    let body: serde_json::Value = resp.json();
    assert_eq!(body["risk"], "Low Risk");
    assert_eq!(body["risk_factors"], serde_json::json!([]));
    assert_eq!(body["abnormal_factors"], serde_json::json!({}));
    assert!(body["report"]
        .as_str()
        .unwrap()
        .starts_with("Low Risk Summary"));
}

#[tokio::test]
async fn predict_reports_missing_columns_as_null() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let form = csv_upload("heart rate\n130\n", "vitals.csv");
    let resp = server.post("/predict").multipart(form).await;
    assert_eq!(resp.status_code(), 200);

    let body: serde_json::Value = resp.json();
    assert_eq!(body["risk"], "High Risk");
    assert!(body["values"]["Blood Pressure"].is_null());
    assert!(body["risk_table"]
        .as_str()
        .unwrap()
        .contains("Not Provided"));
}

#[tokio::test]
async fn predict_without_file_part_is_bad_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let form = MultipartForm::new().add_part(
        "attachment",
        Part::bytes(b"heart rate\n80\n".to_vec()).file_name("vitals.csv"),
    );
    let resp = server.post("/predict").multipart(form).await;
    assert_eq!(resp.status_code(), 400);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["error"], "No file part");
}

#[tokio::test]
async fn predict_with_empty_filename_is_bad_request() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"heart rate\n80\n".to_vec()).file_name(""),
    );
    let resp = server.post("/predict").multipart(form).await;
    assert_eq!(resp.status_code(), 400);
    let body: serde_json::Value = resp.json();
    assert_eq!(body["error"], "No selected file");
}

#[tokio::test]
async fn predict_over_the_upload_limit_is_payload_too_large() {
    let dir = tempfile::tempdir().expect("tempdir");

    let mut config = CardiographConfig::default();
    config.upload.dir = dir.path().to_path_buf();
    config.upload.max_bytes = 1024;
    config.report.provider = "template".to_string();
    let manager = Arc::new(ConfigManager::with_config(config).expect("config"));
    let state = AppState::new(manager).await.expect("app state");
    let server = TestServer::new(create_router(state)).unwrap();

    let mut body = String::from("heart rate\n");
    while body.len() <= 2048 {
        body.push_str("72\n");
    }
    let resp = server
        .post("/predict")
        .multipart(csv_upload(&body, "vitals.csv"))
        .await;
    assert_eq!(resp.status_code(), 413);
}

#[tokio::test]
async fn predict_with_corrupt_workbook_is_unprocessable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let form = MultipartForm::new().add_part(
        "file",
        Part::bytes(b"not a real workbook".to_vec()).file_name("vitals.xlsx"),
    );
    let resp = server.post("/predict").multipart(form).await;
    assert_eq!(resp.status_code(), 422);
}

#[tokio::test]
async fn staged_upload_is_removed_after_processing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let server = test_server(dir.path()).await;

    let form = csv_upload("heart rate\n70\n", "vitals.csv");
    let resp = server.post("/predict").multipart(form).await;
    assert_eq!(resp.status_code(), 200);

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .expect("read upload dir")
        .collect();
    assert!(leftovers.is_empty(), "staged upload was not cleaned up");
}
