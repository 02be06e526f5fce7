//! Pay stub and tax estimation logic.
//!
//! The entry point is [`worksheets::PayStubWorksheet`]; the submodules
//! hold the pieces it is built from: the marginal bracket engine, the
//! contribution classifier, and shared decimal helpers.

pub mod brackets;
pub mod common;
pub mod deductions;
pub mod worksheets;

pub use brackets::{apply_child_credit, marginal_tax};
pub use deductions::{DeductionPools, PosttaxComponents, PretaxComponents};
pub use worksheets::{
    BracketMode, EstimatorOptions, PayStubError, PayStubInput, PayStubResult, PayStubWorksheet,
};
