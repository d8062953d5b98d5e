use crate::types::{RiskAssessment, RiskFactor, RiskLevel, Vitals};

/// Heart rate above this (bpm) is flagged abnormal.
pub const HEART_RATE_LIMIT: f64 = 100.0;
/// Systolic blood pressure above this (mmHg) is flagged abnormal.
pub const BLOOD_PRESSURE_LIMIT: f64 = 140.0;
/// Self-reported stress above this (0-10 scale) is flagged abnormal.
pub const STRESS_LEVEL_LIMIT: f64 = 6.0;

fn limit_for(factor: RiskFactor) -> f64 {
    match factor {
        RiskFactor::HeartRate => HEART_RATE_LIMIT,
        RiskFactor::BloodPressure => BLOOD_PRESSURE_LIMIT,
        RiskFactor::StressLevel => STRESS_LEVEL_LIMIT,
    }
}

/// Whether a single measured value exceeds its factor's fixed threshold.
/// Missing values are never abnormal.
pub fn is_abnormal(factor: RiskFactor, value: Option<f64>) -> bool {
    match value {
        Some(v) => v > limit_for(factor),
        None => false,
    }
}

/// Classify one row of vitals against the fixed thresholds.
///
/// Any abnormal factor makes the assessment high-risk. Factors are reported
/// in the fixed order heart rate, blood pressure, stress level.
pub fn classify(vitals: Vitals) -> RiskAssessment {
    let factors: Vec<RiskFactor> = RiskFactor::ALL
        .iter()
        .copied()
        .filter(|&f| is_abnormal(f, vitals.get(f)))
        .collect();

    let level = if factors.is_empty() {
        RiskLevel::Low
    } else {
        RiskLevel::High
    };

    RiskAssessment {
        level,
        factors,
        vitals,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_normal_is_low_risk() {
        let assessment = classify(Vitals {
            heart_rate: Some(72.0),
            blood_pressure: Some(120.0),
            stress_level: Some(3.0),
        });
        assert_eq!(assessment.level, RiskLevel::Low);
        assert!(assessment.factors.is_empty());
    }

    #[test]
    fn values_at_the_limit_are_normal() {
        let assessment = classify(Vitals {
            heart_rate: Some(100.0),
            blood_pressure: Some(140.0),
            stress_level: Some(6.0),
        });
        assert_eq!(assessment.level, RiskLevel::Low);
    }

    #[test]
    fn single_abnormal_factor_is_high_risk() {
        let assessment = classify(Vitals {
            heart_rate: Some(101.0),
            blood_pressure: Some(120.0),
            stress_level: Some(2.0),
        });
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.factors, vec![RiskFactor::HeartRate]);
    }

    #[test]
    fn factors_keep_report_order() {
        let assessment = classify(Vitals {
            heart_rate: Some(110.0),
            blood_pressure: Some(150.0),
            stress_level: Some(8.0),
        });
        assert_eq!(
            assessment.factors,
            vec![
                RiskFactor::HeartRate,
                RiskFactor::BloodPressure,
                RiskFactor::StressLevel
            ]
        );
    }

    #[test]
    fn missing_values_are_never_abnormal() {
        let assessment = classify(Vitals {
            heart_rate: None,
            blood_pressure: Some(150.0),
            stress_level: None,
        });
        assert_eq!(assessment.level, RiskLevel::High);
        assert_eq!(assessment.factors, vec![RiskFactor::BloodPressure]);
    }

    #[test]
    fn abnormal_values_subset() {
        let assessment = classify(Vitals {
            heart_rate: Some(110.0),
            blood_pressure: Some(120.0),
            stress_level: Some(7.0),
        });
        let abnormal = assessment.abnormal_values();
        assert_eq!(abnormal.len(), 2);
        assert_eq!(abnormal[0], (RiskFactor::HeartRate, Some(110.0)));
        assert_eq!(abnormal[1], (RiskFactor::StressLevel, Some(7.0)));
    }
}
