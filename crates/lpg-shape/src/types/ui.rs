use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::reader::Section;

/// UI / PE3 pricing-scenario input
///
/// Kept as raw JSON: sections and leaves are read through alias lists by
/// the converter, so both `camelCase` and `PascalCase` spellings work and
/// an optional `data` envelope is unwrapped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiPricingScenario(Value);

impl UiPricingScenario {
    /// Wrap a JSON document
    #[inline]
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Root section with any `data` envelope removed
    #[must_use]
    pub fn root(&self) -> Section<'_> {
        Section::root(&self.0)
    }

    /// Underlying document
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for UiPricingScenario {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
