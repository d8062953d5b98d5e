use num_complex::Complex64;
use rand::Rng;

/// Numerical tolerance for floating point comparisons
pub const EPSILON: f64 = 1e-10;

/// A 2x2 single-qubit gate in row-major order.
pub type SingleQubitGate = [[Complex64; 2]; 2];

/// Hadamard gate.
pub fn hadamard() -> SingleQubitGate {
    let h = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

/// Phase gate diag(1, e^{i*gamma}), the cost layer of the display circuit.
pub fn phase(gamma: f64) -> SingleQubitGate {
    let zero = Complex64::new(0.0, 0.0);
    [
        [Complex64::new(1.0, 0.0), zero],
        [zero, Complex64::from_polar(1.0, gamma)],
    ]
}

/// Rotation about the X axis by `theta`.
pub fn rx(theta: f64) -> SingleQubitGate {
    let cos = Complex64::new((theta / 2.0).cos(), 0.0);
    let minus_i_sin = Complex64::new(0.0, -(theta / 2.0).sin());
    [[cos, minus_i_sin], [minus_i_sin, cos]]
}

/// Pure-state amplitudes over `n` qubits (2^n complex numbers).
///
/// Basis-state indices are big-endian: qubit 0 is the most significant bit,
/// so index 0b100 means qubit 0 measured as 1 and qubits 1 and 2 as 0.
#[derive(Debug, Clone)]
pub struct Statevector {
    amps: Vec<Complex64>,
    qubits: usize,
}

impl Statevector {
    /// The all-zeros computational basis state |0...0>.
    pub fn new(qubits: usize) -> Self {
        let mut amps = vec![Complex64::new(0.0, 0.0); 1 << qubits];
        amps[0] = Complex64::new(1.0, 0.0);
        Self { amps, qubits }
    }

    pub fn qubits(&self) -> usize {
        self.qubits
    }

    /// Apply a single-qubit gate to `qubit` (0 = most significant).
    pub fn apply_single(&mut self, gate: &SingleQubitGate, qubit: usize) {
        assert!(qubit < self.qubits, "qubit index out of range");
        let mask = 1usize << (self.qubits - 1 - qubit);

        for i in 0..self.amps.len() {
            if i & mask != 0 {
                continue;
            }
            let j = i | mask;
            let a0 = self.amps[i];
            let a1 = self.amps[j];
            self.amps[i] = gate[0][0] * a0 + gate[0][1] * a1;
            self.amps[j] = gate[1][0] * a0 + gate[1][1] * a1;
        }
    }

    /// Measurement probabilities |amp|^2 for every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amps.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of probabilities; stays 1 under unitary gates.
    pub fn norm(&self) -> f64 {
        self.probabilities().iter().sum()
    }

    /// Sample `shots` independent measurements; returns per-state counts.
    pub fn sample<R: Rng + ?Sized>(&self, shots: u32, rng: &mut R) -> Vec<u32> {
        let probs = self.probabilities();
        let mut counts = vec![0u32; probs.len()];

        for _ in 0..shots {
            let mut r: f64 = rng.random();
            let mut picked = probs.len() - 1;
            for (state, p) in probs.iter().enumerate() {
                if r < *p {
                    picked = state;
                    break;
                }
                r -= p;
            }
            counts[picked] += 1;
        }

        counts
    }
}
