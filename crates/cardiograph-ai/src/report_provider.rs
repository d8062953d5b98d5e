use async_trait::async_trait;

/// Result type for report generation
pub type ReportResult<T> = anyhow::Result<T>;

/// A backend that turns a medical prompt into narrative report text.
#[async_trait]
pub trait ReportProvider: Send + Sync {
    /// Generate the report body for an already-built prompt.
    async fn generate_report(&self, prompt: &str) -> ReportResult<String>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;
}
