//! Risk report
//! Externally visible result of one evaluation

pub mod assembler;
pub mod types;

pub use assembler::assemble;
pub use types::{Factor, FactorKind, RiskReport};
