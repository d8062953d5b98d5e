use crate::statevector::{hadamard, phase, rx, Statevector};
use cardiograph_core::RiskFactor;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// One qubit per risk factor, in report order.
pub const CIRCUIT_QUBITS: usize = 3;

pub const QUANTUM_MESSAGE: &str = "QAOA-inspired optimization simulated successfully.";

/// Cost/mixer angles for the display circuit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircuitParams {
    pub gamma: f64,
    pub beta: f64,
}

impl Default for CircuitParams {
    fn default() -> Self {
        Self {
            gamma: std::f64::consts::FRAC_PI_2,
            beta: std::f64::consts::FRAC_PI_4,
        }
    }
}

/// Per-factor verdict read off the lowest-weight sampled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FactorStatus {
    High,
    Normal,
}

/// What the API returns under the `quantum` key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantumSummary {
    /// Lowest-weight sampled basis state as a 3-character binary string;
    /// qubit 0 is the leftmost character.
    pub quantum_state: String,
    pub optimized_risk_factors: Vec<RiskFactor>,
    pub optimization_report: BTreeMap<RiskFactor, FactorStatus>,
    pub quantum_message: String,
}

/// Run the fixed H / phase(γ) / Rx(2β) circuit, sample `shots` measurements,
/// and summarize the sampled state with the fewest 1-bits.
///
/// Ties on 1-bit count break toward the lower basis-state index. The input
/// data never reaches this function; the result is purely decorative.
pub fn run_display_circuit<R: Rng + ?Sized>(
    params: &CircuitParams,
    shots: u32,
    rng: &mut R,
) -> QuantumSummary {
    let mut sv = Statevector::new(CIRCUIT_QUBITS);

    // Initial superposition
    for q in 0..CIRCUIT_QUBITS {
        sv.apply_single(&hadamard(), q);
    }
    // Cost layer
    for q in 0..CIRCUIT_QUBITS {
        sv.apply_single(&phase(params.gamma), q);
    }
    // Mixer layer
    for q in 0..CIRCUIT_QUBITS {
        sv.apply_single(&rx(2.0 * params.beta), q);
    }

    let counts = sv.sample(shots, rng);
    let best_state = counts
        .iter()
        .enumerate()
        .filter(|(_, &count)| count > 0)
        .min_by_key(|(state, _)| (state.count_ones(), *state))
        .map(|(state, _)| state)
        .unwrap_or(0);

    debug!(best_state, shots, "display circuit sampled");
    summarize(best_state)
}

fn summarize(state: usize) -> QuantumSummary {
    let quantum_state = format!("{:03b}", state);

    let mut optimization_report = BTreeMap::new();
    let mut optimized_risk_factors = Vec::new();
    for (bit, factor) in RiskFactor::ALL.into_iter().enumerate() {
        let high = (state >> (CIRCUIT_QUBITS - 1 - bit)) & 1 == 1;
        optimization_report.insert(
            factor,
            if high {
                FactorStatus::High
            } else {
                FactorStatus::Normal
            },
        );
        if high {
            optimized_risk_factors.push(factor);
        }
    }

    QuantumSummary {
        quantum_state,
        optimized_risk_factors,
        optimization_report,
        quantum_message: QUANTUM_MESSAGE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_parameters_collapse_to_all_zeros() {
        // With γ=π/2 and β=π/4 the Rx layer undoes the superposition exactly,
        // so every shot lands on |000>.
        let mut rng = StdRng::seed_from_u64(42);
        let summary = run_display_circuit(&CircuitParams::default(), 100, &mut rng);
        assert_eq!(summary.quantum_state, "000");
        assert!(summary.optimized_risk_factors.is_empty());
        assert!(summary
            .optimization_report
            .values()
            .all(|&s| s == FactorStatus::Normal));
        assert_eq!(summary.quantum_message, QUANTUM_MESSAGE);
    }

    #[test]
    fn summary_maps_bits_to_factors_in_order() {
        let summary = summarize(0b101);
        assert_eq!(summary.quantum_state, "101");
        assert_eq!(
            summary.optimized_risk_factors,
            vec![RiskFactor::HeartRate, RiskFactor::StressLevel]
        );
        assert_eq!(
            summary.optimization_report[&RiskFactor::BloodPressure],
            FactorStatus::Normal
        );
    }

    #[test]
    fn zero_gamma_keeps_superposition_but_still_summarizes() {
        // γ=0 leaves a non-trivial distribution; whatever is sampled, the
        // lowest-weight state must be consistent with its own bits.
        let params = CircuitParams {
            gamma: 0.0,
            beta: std::f64::consts::FRAC_PI_8,
        };
        let mut rng = StdRng::seed_from_u64(7);
        let summary = run_display_circuit(&params, 200, &mut rng);
        let ones = summary.quantum_state.chars().filter(|&c| c == '1').count();
        assert_eq!(summary.optimized_risk_factors.len(), ones);
    }

    #[test]
    fn report_serializes_with_display_labels() {
        let summary = summarize(0b100);
        let json = serde_json::to_value(&summary).expect("serialize");
        assert_eq!(json["quantum_state"], "100");
        assert_eq!(json["optimization_report"]["Heart Rate"], "High");
        assert_eq!(json["optimization_report"]["Stress Level"], "Normal");
        assert_eq!(json["optimized_risk_factors"][0], "Heart Rate");
    }
}
