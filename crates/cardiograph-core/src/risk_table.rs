use crate::classify::is_abnormal;
use crate::types::{RiskFactor, Vitals};
use std::fmt::Write;

/// Render the vitals summary as an inline-styled HTML table.
///
/// One row per factor in report order. Missing values show "Not Provided" in
/// gray, abnormal values "Abnormal" in red, everything else "Normal" in green.
pub fn render_risk_table(vitals: &Vitals) -> String {
    let mut table =
        String::from("<table border='1' style='border-collapse:collapse; padding:8px;'>");
    table.push_str("<tr><th>Parameter</th><th>Value</th><th>Status</th></tr>");

    for factor in RiskFactor::ALL {
        let value = vitals.get(factor);
        let (rendered, status, color) = match value {
            None => ("N/A".to_string(), "Not Provided", "gray"),
            Some(v) => {
                if is_abnormal(factor, Some(v)) {
                    (format_value(v), "Abnormal", "red")
                } else {
                    (format_value(v), "Normal", "green")
                }
            }
        };
        let _ = write!(
            table,
            "<tr><td>{}</td><td>{}</td><td style='color:{};'>{}</td></tr>",
            factor.label(),
            rendered,
            color,
            status
        );
    }

    table.push_str("</table>");
    table
}

/// Print whole numbers without a trailing ".0" so 120.0 renders as "120".
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}
