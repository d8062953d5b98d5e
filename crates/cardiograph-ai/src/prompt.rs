use crate::report_provider::ReportProvider;
use cardiograph_core::RiskAssessment;
use tracing::warn;

/// Fixed report returned for low-risk assessments; no provider call is made.
pub fn low_risk_report() -> String {
    "Low Risk Summary\n\
     ----------------------------------------\n\
     The patient's biometric indicators are within acceptable ranges.\n\n\
     Observations:\n\
     - Normal heart rate\n\
     - Normal blood pressure\n\
     - Normal stress level\n\n\
     Recommendation:\n\
     - Continue regular exercise and heart-healthy diet\n\
     - Schedule annual checkups\n\
     - Maintain low stress levels through relaxation techniques\n"
        .to_string()
}

/// Build the medical-assistant prompt for a high-risk assessment.
///
/// Lists the flagged factors and every measured value (missing values render
/// as "N/A") and asks for a formal paragraph-format report.
pub fn build_prompt(assessment: &RiskAssessment) -> String {
    let risk_factors = assessment
        .factors
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ");

    let measured_values = assessment
        .values()
        .into_iter()
        .map(|(factor, value)| match value {
            Some(v) => format!("{} = {}", factor.label(), v),
            None => format!("{} = N/A", factor.label()),
        })
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "You are a medical assistant AI.\n\
         The patient shows the following abnormal vital signs:\n\
         Risk Factors: {risk_factors}\n\
         Measured Values: {measured_values}\n\n\
         Generate a detailed medical report in paragraph format that includes:\n\
         - Explanation of abnormal values\n\
         - Possible underlying conditions\n\
         - Related diseases\n\
         - Suggested clinical tests\n\
         - Final recommendation\n\n\
         Use a formal tone and structure the report with medical insights. \
         Format the text as if it's written by a doctor."
    )
}

/// Full report step of the pipeline.
///
/// Low-risk assessments short-circuit to the template. A provider failure
/// degrades to an error message inside the report text instead of failing the
/// request.
pub async fn narrative_report(
    provider: &dyn ReportProvider,
    assessment: &RiskAssessment,
) -> String {
    if !assessment.is_high() {
        return low_risk_report();
    }

    let prompt = build_prompt(assessment);
    match provider.generate_report(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            warn!(provider = provider.name(), error = %e, "report generation failed");
            format!("Error generating report: {e}")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report_provider::ReportResult;
    use async_trait::async_trait;
    use cardiograph_core::{classify, Vitals};

    struct FailingProvider;

    #[async_trait]
    impl ReportProvider for FailingProvider {
        async fn generate_report(&self, _prompt: &str) -> ReportResult<String> {
            Err(anyhow::anyhow!("connection refused"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn prompt_lists_factors_and_values() {
        let assessment = classify(Vitals {
            heart_rate: Some(120.0),
            blood_pressure: Some(135.0),
            stress_level: None,
        });
        let prompt = build_prompt(&assessment);
        assert!(prompt.contains("Risk Factors: Heart Rate"));
        assert!(prompt.contains("Heart Rate = 120"));
        assert!(prompt.contains("Stress Level = N/A"));
        assert!(prompt.contains("Suggested clinical tests"));
    }

    #[tokio::test]
    async fn low_risk_skips_the_provider() {
        let assessment = classify(Vitals {
            heart_rate: Some(70.0),
            blood_pressure: Some(110.0),
            stress_level: Some(2.0),
        });
        // FailingProvider would error; low risk must never reach it.
        let report = narrative_report(&FailingProvider, &assessment).await;
        assert!(report.starts_with("Low Risk Summary"));
        assert!(report.contains("annual checkups"));
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_error_text() {
        let assessment = classify(Vitals {
            heart_rate: Some(150.0),
            blood_pressure: None,
            stress_level: None,
        });
        let report = narrative_report(&FailingProvider, &assessment).await;
        assert!(report.starts_with("Error generating report:"));
        assert!(report.contains("connection refused"));
    }
}
