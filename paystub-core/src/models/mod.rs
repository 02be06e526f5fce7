mod filing_status;
mod health_plan;
mod tax_bracket;
mod tax_year_config;

pub use filing_status::FilingStatus;
pub use health_plan::HealthPlan;
pub use tax_bracket::TaxBracket;
pub use tax_year_config::{TaxTableError, TaxYearConfig};
