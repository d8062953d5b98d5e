//! Classical simulation of the fixed 3-qubit circuit shown alongside each
//! risk assessment.
//!
//! The circuit topology never depends on the uploaded data: Hadamard on every
//! qubit, a phase (cost) layer, an Rx (mixer) layer, then measurement. Its
//! output decorates the response and has no effect on the risk decision.

pub mod circuit;
pub mod statevector;

pub use circuit::*;
pub use statevector::*;
