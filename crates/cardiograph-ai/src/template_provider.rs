use crate::report_provider::{ReportProvider, ReportResult};
use async_trait::async_trait;

/// Offline provider that renders a deterministic narrative from the prompt.
///
/// Used when no API key is configured and in tests; it lifts the
/// "Risk Factors:" and "Measured Values:" lines out of the prompt so the
/// report still reflects the request.
pub struct TemplateProvider;

impl TemplateProvider {
    fn prompt_line<'a>(prompt: &'a str, prefix: &str) -> &'a str {
        prompt
            .lines()
            .find_map(|line| line.strip_prefix(prefix))
            .map(str::trim)
            .unwrap_or("not specified")
    }
}

#[async_trait]
impl ReportProvider for TemplateProvider {
    async fn generate_report(&self, prompt: &str) -> ReportResult<String> {
        let factors = Self::prompt_line(prompt, "Risk Factors:");
        let values = Self::prompt_line(prompt, "Measured Values:");

        Ok(format!(
            "Medical Report\n\
             ----------------------------------------\n\
             The patient presents with abnormal readings in: {factors}.\n\
             Measured values: {values}.\n\n\
             Values outside the accepted reference ranges can indicate elevated \
             cardiovascular strain. Persistent elevation of these parameters is \
             associated with hypertension, arrhythmia, and stress-related cardiac \
             conditions, and warrants clinical correlation.\n\n\
             Suggested clinical tests: resting ECG, 24-hour ambulatory blood \
             pressure monitoring, lipid panel, and thyroid function tests.\n\n\
             Final recommendation: consult a physician for a full cardiovascular \
             evaluation, reduce modifiable stressors, and repeat these \
             measurements under resting conditions."
        ))
    }

    fn name(&self) -> &'static str {
        "template"
    }
}
