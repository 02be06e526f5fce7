pub mod calculations;
pub mod models;

pub use calculations::worksheets::{
    BracketMode, EstimatorOptions, PayStubError, PayStubInput, PayStubResult, PayStubWorksheet,
};
pub use models::*;
