use cardiograph_ai::ReportProvider;
use cardiograph_core::{CardioError, CardiographConfig, ConfigManager};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CardiographConfig>,
    pub report_provider: Arc<dyn ReportProvider>,
}

impl AppState {
    pub async fn new(config: Arc<ConfigManager>) -> cardiograph_core::Result<Self> {
        let config = Arc::new(config.config().clone());

        // The staging directory must exist before the first upload lands
        tokio::fs::create_dir_all(&config.upload.dir).await?;

        let report_provider = cardiograph_ai::create_provider(&config.report)
            .map_err(|e| CardioError::Report(e.to_string()))?;

        Ok(Self {
            config,
            report_provider,
        })
    }
}
