//! LPG Shape - payload shape conversion for loan pricing
//!
//! Converts between three JSON shapes describing the same mortgage scenario:
//! - the loose UI / PE3 request
//! - the pricing-scenario request (`PascalCase` enums, decimals omitted
//!   when unknown)
//! - the loan record (`SCREAMING_SNAKE_CASE` enums, decimals `null` when
//!   unknown)
//!
//! Also derives loan-creation form definitions from a sample loan.
//!
//! # Example
//!
//! ```rust,ignore
//! use lpg_shape::{convert_json, Conversion};
//! use serde_json::json;
//!
//! # fn example() -> lpg_shape::Result<()> {
//! let loan = json!({"amount": "350000.0000", "purpose": "PURCHASE"});
//! let scenario = convert_json(Conversion::LoanToExternal, loan)?;
//!
//! assert_eq!(scenario["loan"]["amount"], "350000");
//! assert_eq!(scenario["purpose"], "Purchase");
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod convert;
pub mod decimal;
pub mod enums;
pub mod error;
pub mod fields;
pub mod reader;
pub mod types;

pub use convert::{
    build_pricing_borrower_from_loan, build_pricing_broker_comp_from_loan,
    build_pricing_loan_from_loan, build_pricing_property_from_loan, convert_json,
    external_to_get_loan, external_to_get_loan_at, get_loan_to_external_pricing_scenario,
    ui_to_external_pricing_scenario, Conversion,
};
pub use decimal::{
    parse_decimal, to_decimal_string, to_decimal_string_or_null, to_decimal_string_or_undefined,
    MaybeDecimal,
};
pub use enums::{
    map_enum_normalized, normalize_enum_key, pascal_to_screaming, screaming_to_pascal,
    EnumDomain, EnumField, Fallback, UiCodeTable,
};
pub use error::{Result, ShapeError};
pub use fields::{
    build_payload_from_form, derive_field_definitions, flatten, humanize_label,
    initial_form_state, unflatten, EnumMetadata, FieldDefinition, FieldFormat, FlatMap,
    REQUIRED_TOP_LEVEL,
};
pub use reader::{Aliases, Section};
pub use types::{
    CustomValue, CustomValues, ExternalPricingScenario, LoanRecord, UiPricingScenario,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with LPG Shape
    pub use crate::{
        convert_json, derive_field_definitions, Conversion, EnumMetadata,
        ExternalPricingScenario, FieldDefinition, LoanRecord, MaybeDecimal, ShapeError,
        UiPricingScenario,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
