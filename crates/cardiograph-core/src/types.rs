use serde::{Deserialize, Serialize};
use std::fmt;

/// Biometric readings extracted from the first data row of an upload.
///
/// A field is `None` when the column is missing or the cell does not coerce
/// to a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    pub heart_rate: Option<f64>,
    pub blood_pressure: Option<f64>,
    pub stress_level: Option<f64>,
}

impl Vitals {
    pub fn get(&self, factor: RiskFactor) -> Option<f64> {
        match factor {
            RiskFactor::HeartRate => self.heart_rate,
            RiskFactor::BloodPressure => self.blood_pressure,
            RiskFactor::StressLevel => self.stress_level,
        }
    }
}

/// The three biometric parameters the classifier inspects, in report order.
/// The derived ordering follows declaration order, so sorted collections keep
/// report order too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskFactor {
    #[serde(rename = "Heart Rate")]
    HeartRate,
    #[serde(rename = "Blood Pressure")]
    BloodPressure,
    #[serde(rename = "Stress Level")]
    StressLevel,
}

impl RiskFactor {
    pub const ALL: [RiskFactor; 3] = [
        RiskFactor::HeartRate,
        RiskFactor::BloodPressure,
        RiskFactor::StressLevel,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            RiskFactor::HeartRate => "Heart Rate",
            RiskFactor::BloodPressure => "Blood Pressure",
            RiskFactor::StressLevel => "Stress Level",
        }
    }
}

impl fmt::Display for RiskFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    #[serde(rename = "High Risk")]
    High,
    #[serde(rename = "Low Risk")]
    Low,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::High => f.write_str("High Risk"),
            RiskLevel::Low => f.write_str("Low Risk"),
        }
    }
}

/// Outcome of threshold classification for one row of vitals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<RiskFactor>,
    pub vitals: Vitals,
}

impl RiskAssessment {
    pub fn is_high(&self) -> bool {
        self.level == RiskLevel::High
    }

    /// All measured values keyed by factor, in report order.
    pub fn values(&self) -> Vec<(RiskFactor, Option<f64>)> {
        RiskFactor::ALL
            .iter()
            .map(|&f| (f, self.vitals.get(f)))
            .collect()
    }

    /// The subset of measured values whose factor was flagged abnormal.
    pub fn abnormal_values(&self) -> Vec<(RiskFactor, Option<f64>)> {
        self.values()
            .into_iter()
            .filter(|(f, _)| self.factors.contains(f))
            .collect()
    }
}
