use crate::gemini_provider::{GeminiConfig, GeminiProvider};
use crate::report_provider::{ReportProvider, ReportResult};
use crate::template_provider::TemplateProvider;
use anyhow::anyhow;
use cardiograph_core::ReportConfig;
use std::sync::Arc;
use tracing::info;

/// Build the report provider selected by configuration.
///
/// "gemini" requires an API key, "template" is always local, and "auto"
/// picks Gemini when a key is available and falls back to the template.
pub fn create_provider(config: &ReportConfig) -> ReportResult<Arc<dyn ReportProvider>> {
    let has_key = config
        .api_key
        .as_deref()
        .map(|k| !k.is_empty())
        .unwrap_or(false)
        || std::env::var("GOOGLE_API_KEY").is_ok()
        || std::env::var("GEMINI_API_KEY").is_ok();

    let provider: Arc<dyn ReportProvider> = match config.provider.as_str() {
        "gemini" => Arc::new(GeminiProvider::new(GeminiConfig::from(config))?),
        "template" => Arc::new(TemplateProvider),
        "auto" => {
            if has_key {
                Arc::new(GeminiProvider::new(GeminiConfig::from(config))?)
            } else {
                Arc::new(TemplateProvider)
            }
        }
        other => return Err(anyhow!("unknown report provider: {other}")),
    };

    info!(provider = provider.name(), "report provider selected");
    Ok(provider)
}
