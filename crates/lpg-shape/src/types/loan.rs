//! Loan shape (`ApiLoan`)
//!
//! Flat top-level scalars plus nested borrower, property and loan officer
//! objects. Enums are `SCREAMING_SNAKE_CASE`, money and ratios are decimal
//! strings or `null`. Every field is optional on input; on output every
//! field is written, `null` where unknown.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::custom_values::loan_mapping;
use super::lenient;
use crate::decimal::MaybeDecimal;

/// Loan record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoanRecord {
    /// Borrower
    #[serde(deserialize_with = "lenient::section")]
    pub borrower: LoanBorrower,
    /// Loan officer
    #[serde(rename = "loanofficer", deserialize_with = "lenient::section")]
    pub loan_officer: LoanOfficer,
    /// Subject property
    #[serde(deserialize_with = "lenient::section")]
    pub property: LoanProperty,
    /// Broker compensation plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_comp_plan: Option<LoanBrokerCompPlan>,
    /// Caller-defined attributes
    #[serde(deserialize_with = "loan_mapping")]
    pub custom_values: Option<Map<String, Value>>,

    /// External creation timestamp
    #[serde(deserialize_with = "lenient::string")]
    pub external_created_at: Option<String>,
    /// External modification timestamp
    #[serde(deserialize_with = "lenient::string")]
    pub external_modified_at: Option<String>,
    /// Loan number
    #[serde(deserialize_with = "lenient::string")]
    pub loan_number: Option<String>,
    /// Purpose (`PURCHASE`, `CASH_OUT_REFINANCE`, ...)
    #[serde(deserialize_with = "lenient::string")]
    pub purpose: Option<String>,
    /// Base loan amount
    pub amount: MaybeDecimal,
    /// Note rate
    pub rate: MaybeDecimal,
    /// Product name
    #[serde(deserialize_with = "lenient::string")]
    pub product_name: Option<String>,
    /// Product code
    #[serde(deserialize_with = "lenient::string")]
    pub product_code: Option<String>,
    /// Automated underwriting system
    #[serde(deserialize_with = "lenient::string")]
    pub aus: Option<String>,
    /// Application date
    #[serde(deserialize_with = "lenient::string")]
    pub application_date: Option<String>,
    /// Funding timestamp
    #[serde(deserialize_with = "lenient::string")]
    pub funded_at: Option<String>,
    /// Loan-to-value
    pub ltv: MaybeDecimal,
    /// Combined loan-to-value
    pub cltv: MaybeDecimal,
    /// Home-equity combined loan-to-value
    pub hcltv: MaybeDecimal,
    /// Amortization type
    #[serde(deserialize_with = "lenient::string")]
    pub amortization_type: Option<String>,
    /// Documentation type
    #[serde(deserialize_with = "lenient::string")]
    pub documentation_type: Option<String>,
    /// Cash-out amount
    pub cash_out_amount: MaybeDecimal,

    /// FHA case assignment date
    #[serde(deserialize_with = "lenient::string")]
    pub fha_case_assignment_date: Option<String>,
    /// FHA total loan amount
    pub fha_total_loan_amount: MaybeDecimal,
    /// FHA MIP percentage
    pub fha_mortgage_insurance_premium_percentage: MaybeDecimal,
    /// FHA MIP amount
    pub fha_mortgage_insurance_premium_amount: MaybeDecimal,
    /// FHA financed amount
    pub fha_financed_amount: MaybeDecimal,
    /// FHA financing option
    #[serde(deserialize_with = "lenient::string")]
    pub fha_financing_option: Option<String>,
    /// FHA total LTV
    pub fha_tltv: MaybeDecimal,

    /// USDA total loan amount
    pub usda_total_loan_amount: MaybeDecimal,
    /// USDA guarantee fee amount
    pub usda_guarantee_fee_amount: MaybeDecimal,
    /// USDA guaranteed percentage
    pub usda_guaranteed_percentage: MaybeDecimal,
    /// USDA financed amount
    pub usda_financed_amount: MaybeDecimal,
    /// USDA financing option
    #[serde(deserialize_with = "lenient::string")]
    pub usda_financing_option: Option<String>,
    /// USDA total LTV
    pub usda_tltv: MaybeDecimal,

    /// VA total loan amount
    pub va_total_loan_amount: MaybeDecimal,
    /// VA down payment amount
    pub va_down_payment_amount: MaybeDecimal,
    /// VA down payment percentage
    pub va_down_payment: MaybeDecimal,
    /// VA funding fee amount
    pub va_funding_fee_amount: MaybeDecimal,
    /// VA funding fee percentage
    pub va_funding_fee_percentage: MaybeDecimal,
    /// VA financed amount
    pub va_financed_amount: MaybeDecimal,
    /// VA funding fee paid in cash
    pub va_cash_funding_fee_amount: MaybeDecimal,
    /// VA financing option
    #[serde(deserialize_with = "lenient::string")]
    pub va_financing_option: Option<String>,
    /// VA loan history
    #[serde(deserialize_with = "lenient::string")]
    pub va_loan_history: Option<String>,
    /// VA cash-out LTV
    pub va_cashout_ltv: MaybeDecimal,
    /// VA cash-out CLTV
    pub va_cashout_cltv: MaybeDecimal,
    /// VA cash-out HCLTV
    pub va_cashout_hcltv: MaybeDecimal,
    /// VA funding fee exemption
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_va_funding_fee_exempt: Option<bool>,
    /// VA total LTV
    pub va_tltv: MaybeDecimal,

    /// HELOC draw amount
    pub heloc_draw_amount: MaybeDecimal,
    /// HELOC line amount
    pub heloc_line_amount: MaybeDecimal,
    /// Relocation loan flag
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_relocation_loan: Option<bool>,
    /// Lender fee
    pub lender_fee: MaybeDecimal,
    /// Borrower-paid mortgage insurance
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_mortgage_insurance_paid_by_borrower: Option<bool>,
    /// Prepayment penalty period in months
    #[serde(deserialize_with = "lenient::int")]
    pub prepayment_penalty_period_months: Option<i64>,
    /// Prepayment penalty structure (`PPS_5_4_3_2_1`, ...)
    #[serde(deserialize_with = "lenient::string")]
    pub prepayment_penalty_structure: Option<String>,
    /// Prepayment penalty structure type
    #[serde(deserialize_with = "lenient::string")]
    pub prepayment_penalty_structure_type: Option<String>,
    /// Property value
    pub property_value: MaybeDecimal,
    /// Purchase price
    pub purchase_price: MaybeDecimal,
    /// Refinance purpose
    #[serde(deserialize_with = "lenient::string")]
    pub refinance_purpose: Option<String>,
    /// Subordinate lien amount
    pub second_amount: MaybeDecimal,
    /// Lien position
    #[serde(deserialize_with = "lenient::string")]
    pub position: Option<String>,
    /// Second lien held by the first-lien investor
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_second_investor_same_as_first: Option<bool>,
    /// Community second
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_second_community_loan: Option<bool>,
    /// Piggyback second
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_second_piggyback: Option<bool>,
    /// Servicer name
    #[serde(deserialize_with = "lenient::string")]
    pub servicer_name: Option<String>,
    /// Temporary buydown
    #[serde(deserialize_with = "lenient::string")]
    pub temporary_buydown_type: Option<String>,
    /// Term in months
    #[serde(deserialize_with = "lenient::int")]
    pub loan_term: Option<i64>,
    /// Loan type
    #[serde(deserialize_with = "lenient::string")]
    pub loan_type: Option<String>,
    /// Escrow / impound type
    #[serde(deserialize_with = "lenient::string")]
    pub impound_type: Option<String>,
    /// Roll lender fee into the loan
    #[serde(deserialize_with = "lenient::boolean")]
    pub roll_lender_fee: Option<bool>,
    /// Streamline refinance type
    #[serde(deserialize_with = "lenient::string")]
    pub streamline_refinance_type: Option<String>,
    /// ARM initial fixed term in months
    #[serde(deserialize_with = "lenient::int")]
    pub arm_fixed_term: Option<i64>,
    /// Creation timestamp
    #[serde(deserialize_with = "lenient::string")]
    pub created: Option<String>,
    /// Modification timestamp
    #[serde(deserialize_with = "lenient::string")]
    pub modified: Option<String>,
    /// LOS identifier
    #[serde(deserialize_with = "lenient::string")]
    pub los_loan_id: Option<String>,
}

/// Loan-side borrower
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct LoanBorrower {
    #[serde(deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub fico: Option<i64>,
    pub dti_ratio: MaybeDecimal,
    pub asset_depletion_amount: MaybeDecimal,
    #[serde(deserialize_with = "lenient::string")]
    pub asset_documentation: Option<String>,
    pub asset_qualification_amount: MaybeDecimal,
    #[serde(deserialize_with = "lenient::string")]
    pub bank_statement_expense_method: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub business_bank_statement_months: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub citizenship: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub credit_grade: Option<String>,
    pub debt_service_coverage_ratio: MaybeDecimal,
    #[serde(deserialize_with = "lenient::string")]
    pub employment_verification: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub full_doc_months: Option<i64>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_occupancy_coborrower: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_gift_funds: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub multiple_borrower_pairs: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_traditional_credit: Option<bool>,
    /// Monthly qualifying income
    pub income_monthly: MaybeDecimal,
    #[serde(deserialize_with = "lenient::string")]
    pub income_documentation: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_first_time_home_buyer: Option<bool>,
    /// Non-occupant borrower (pricing side: `isNonOccupancyBorrower`)
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_occupancy_buyer: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_self_employed: Option<bool>,
    #[serde(rename = "months1099", deserialize_with = "lenient::int")]
    pub months_1099: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub cpa_pand_l_months: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub bank_statements_number_of_months_personal: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub properties_owned: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub months_of_reserves: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub verification_method: Option<String>,
    pub verification_of_employment_amount: MaybeDecimal,
    #[serde(deserialize_with = "lenient::section")]
    pub derogatory_events: DerogatoryEvents,
}

/// Credit-event history; counts and months-since values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(missing_docs)]
pub struct DerogatoryEvents {
    #[serde(rename = "deMultEvents", deserialize_with = "lenient::int")]
    pub de_mult_events: Option<i64>,
    #[serde(rename = "deMultBK", deserialize_with = "lenient::int")]
    pub de_mult_bk: Option<i64>,
    #[serde(rename = "latePmt30x12", deserialize_with = "lenient::int")]
    pub late_pmt_30x12: Option<i64>,
    #[serde(rename = "latePmt60x12", deserialize_with = "lenient::int")]
    pub late_pmt_60x12: Option<i64>,
    #[serde(rename = "latePmt90x12", deserialize_with = "lenient::int")]
    pub late_pmt_90x12: Option<i64>,
    #[serde(rename = "latePmt120x12", deserialize_with = "lenient::int")]
    pub late_pmt_120x12: Option<i64>,
    #[serde(rename = "latePmt30x24", deserialize_with = "lenient::int")]
    pub late_pmt_30x24: Option<i64>,
    #[serde(rename = "latePmt60x24", deserialize_with = "lenient::int")]
    pub late_pmt_60x24: Option<i64>,
    #[serde(rename = "latePmt90x24", deserialize_with = "lenient::int")]
    pub late_pmt_90x24: Option<i64>,
    #[serde(rename = "latePmt120x24", deserialize_with = "lenient::int")]
    pub late_pmt_120x24: Option<i64>,
    #[serde(rename = "deMonthsDIL", deserialize_with = "lenient::int")]
    pub de_months_dil: Option<i64>,
    #[serde(rename = "deMonthsShortSale", deserialize_with = "lenient::int")]
    pub de_months_short_sale: Option<i64>,
    #[serde(rename = "deMonthsChargeOff", deserialize_with = "lenient::int")]
    pub de_months_charge_off: Option<i64>,
    #[serde(rename = "deMonthsBKC7", deserialize_with = "lenient::int")]
    pub de_months_bkc7: Option<i64>,
    #[serde(rename = "deMonthsBKC11", deserialize_with = "lenient::int")]
    pub de_months_bkc11: Option<i64>,
    #[serde(rename = "deMonthsBKC13", deserialize_with = "lenient::int")]
    pub de_months_bkc13: Option<i64>,
    #[serde(rename = "deMonthsLoanMod", deserialize_with = "lenient::int")]
    pub de_months_loan_mod: Option<i64>,
    #[serde(rename = "deMonthsNoticeOfDefault", deserialize_with = "lenient::int")]
    pub de_months_notice_of_default: Option<i64>,
    #[serde(rename = "deMonthsForeclosure", deserialize_with = "lenient::int")]
    pub de_months_foreclosure: Option<i64>,
}

/// Loan officer contact
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct LoanOfficer {
    #[serde(deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub assistant_email: Option<String>,
}

/// Loan-side subject property
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct LoanProperty {
    #[serde(deserialize_with = "lenient::string")]
    pub address_line1: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub address_line2: Option<String>,
    pub appraised_value: MaybeDecimal,
    #[serde(deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub county: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub county_fips_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub county_fips_code_only: Option<String>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_high_cost_county: Option<bool>,
    pub estimated_value: MaybeDecimal,
    #[serde(deserialize_with = "lenient::boolean")]
    pub inspection_waiver: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_condotel: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_declining_market: Option<bool>,
    #[serde(deserialize_with = "lenient::boolean")]
    pub is_non_warrantable_project: Option<bool>,
    pub lot_size_in_acres: MaybeDecimal,
    #[serde(deserialize_with = "lenient::string")]
    pub occupancy: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub property_type: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub property_attachment_type: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub state_fips_code: Option<String>,
    #[serde(deserialize_with = "lenient::int")]
    pub stories: Option<i64>,
    #[serde(deserialize_with = "lenient::int")]
    pub units: Option<i64>,
    #[serde(deserialize_with = "lenient::string")]
    pub zip_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub zip_code_plus_four: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub msa_code: Option<String>,
    #[serde(deserialize_with = "lenient::string")]
    pub census_tract: Option<String>,
    pub median_income: MaybeDecimal,
}

/// Loan-side broker compensation plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[allow(missing_docs)]
pub struct LoanBrokerCompPlan {
    pub fixed_amount: MaybeDecimal,
    pub percent: MaybeDecimal,
    pub min_amount: MaybeDecimal,
    pub max_amount: MaybeDecimal,
    pub calculated_adjustment: MaybeDecimal,
    pub calculated_amount: MaybeDecimal,
    #[serde(deserialize_with = "lenient::string")]
    pub paid_by: Option<String>,
}

impl LoanRecord {
    /// Read a loan record from JSON
    ///
    /// # Errors
    ///
    /// Returns [`crate::ShapeError::Malformed`] when a section has the wrong
    /// structure (e.g. `borrower` is a string).
    pub fn from_json(value: Value) -> crate::Result<Self> {
        serde_json::from_value(value).map_err(|e| crate::ShapeError::malformed("loan", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn odd_key_spellings_round_trip() {
        let loan = LoanRecord::from_json(json!({
            "loanofficer": {"name": "Pat"},
            "borrower": {
                "months1099": 12,
                "cpaPandLMonths": 24,
                "derogatoryEvents": {"deMultBK": 1, "deMonthsBKC7": 48, "latePmt30x12": 2}
            },
            "vaCashoutLtv": "90.0"
        }))
        .unwrap();
        assert_eq!(loan.loan_officer.name.as_deref(), Some("Pat"));
        assert_eq!(loan.borrower.months_1099, Some(12));
        assert_eq!(loan.borrower.cpa_pand_l_months, Some(24));
        assert_eq!(loan.borrower.derogatory_events.de_mult_bk, Some(1));
        assert_eq!(loan.borrower.derogatory_events.de_months_bkc7, Some(48));
        assert_eq!(loan.borrower.derogatory_events.late_pmt_30x12, Some(2));
        assert_eq!(loan.va_cashout_ltv.as_str(), Some("90"));

        let out = serde_json::to_value(&loan).unwrap();
        assert_eq!(out["borrower"]["derogatoryEvents"]["deMonthsBKC7"], json!(48));
        assert_eq!(out["borrower"]["months1099"], json!(12));
        assert_eq!(out["loanofficer"]["name"], json!("Pat"));
    }

    #[test]
    fn empty_input_serializes_every_field() {
        let out = serde_json::to_value(LoanRecord::default()).unwrap();
        assert_eq!(out["amount"], Value::Null);
        assert_eq!(out["customValues"], Value::Null);
        assert!(out["borrower"]["derogatoryEvents"].is_object());
        assert!(out.get("brokerCompPlan").is_none());
    }

    #[test]
    fn structural_mismatch_is_malformed() {
        let err = LoanRecord::from_json(json!({"borrower": "Jane"})).unwrap_err();
        assert!(err.to_string().starts_with("malformed loan input"));
    }

    #[test]
    fn null_sections_read_as_empty() {
        let loan = LoanRecord::from_json(json!({"borrower": null, "property": null})).unwrap();
        assert_eq!(loan.borrower, LoanBorrower::default());
    }
}
