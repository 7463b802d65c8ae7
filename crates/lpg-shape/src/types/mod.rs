//! The three payload shapes
//!
//! - [`LoanRecord`]: loan service, `SCREAMING_SNAKE_CASE` enums
//! - [`ExternalPricingScenario`]: pricing service, `PascalCase` enums
//! - [`UiPricingScenario`]: loose UI input, read through alias lists

mod custom_values;
mod external;
pub(crate) mod lenient;
mod loan;
mod ui;

pub use custom_values::{CustomValue, CustomValues};
pub use external::{
    ExternalBorrower, ExternalBrokerCompPlan, ExternalLoan, ExternalPricingScenario,
    ExternalProperty, ExternalSearch, ExternalSettings,
};
pub use loan::{
    DerogatoryEvents, LoanBorrower, LoanBrokerCompPlan, LoanOfficer, LoanProperty, LoanRecord,
};
pub use ui::UiPricingScenario;
