pub mod classify;
pub mod config_manager;
pub mod error;
pub mod risk_table;
pub mod types;

pub use classify::*;
pub use config_manager::*;
pub use error::*;
pub use risk_table::*;
pub use types::*;
