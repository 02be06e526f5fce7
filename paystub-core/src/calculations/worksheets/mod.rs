//! Worksheet implementations.
//!
//! One worksheet per simulated document; currently only the pay stub.

pub mod pay_stub;

pub use pay_stub::{
    AnnualSummary, BracketMode, EstimatorOptions, PayStubError, PayStubInput, PayStubResult,
    PayStubWorksheet, PaycheckBreakdown,
};
