use crate::enums::policy::*;
use crate::types::{
    CustomValues, ExternalBorrower, ExternalBrokerCompPlan, ExternalLoan, ExternalPricingScenario,
    ExternalProperty, LoanRecord,
};

use super::{non_empty, or_blank, text};

const AUDIENCE_ID: &str = "Retail";

/// Loan → pricing scenario
///
/// `audienceId` is always `Retail`. The top-level purpose has no fallback:
/// an unknown loan purpose is omitted. `search`, `settings` and
/// `adjustments` are not produced in this direction.
#[must_use]
pub fn get_loan_to_external_pricing_scenario(loan: &LoanRecord) -> ExternalPricingScenario {
    ExternalPricingScenario {
        audience_id: Some(AUDIENCE_ID.to_string()),
        purpose: PURPOSE_FIELD
            .loan_to_pricing(&text(loan.purpose.as_deref()))
            .map(str::to_string),
        search: None,
        borrower: build_pricing_borrower_from_loan(loan),
        loan: build_pricing_loan_from_loan(loan),
        property: build_pricing_property_from_loan(loan),
        broker_comp_plan: build_pricing_broker_comp_from_loan(loan),
        custom_values: loan
            .custom_values
            .as_ref()
            .map(CustomValues::from_map)
            .unwrap_or_default(),
        adjustments: None,
        settings: None,
    }
}

/// Twelve months of income in whole dollars; `0` when it does not fit an `i64`
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn annual_income(monthly: Option<f64>) -> i64 {
    const RANGE: std::ops::Range<f64> = i64::MIN as f64..i64::MAX as f64;
    monthly
        .map(|monthly| (monthly * 12.0).round())
        .filter(|annual| annual.is_finite() && RANGE.contains(annual))
        .map_or(0, |annual| annual as i64)
}

/// Pricing borrower from the loan's borrower
///
/// `annualIncome` is twelve times the monthly income, rounded to whole
/// dollars, or `0` when the monthly income does not parse or overflows.
#[must_use]
pub fn build_pricing_borrower_from_loan(loan: &LoanRecord) -> ExternalBorrower {
    let b = &loan.borrower;
    let annual_income = annual_income(b.income_monthly.to_f64());

    ExternalBorrower {
        first_name: or_blank(b.first_name.as_deref()),
        last_name: or_blank(b.last_name.as_deref()),
        fico: b.fico,
        dti_ratio: b.dti_ratio.clone(),
        months_of_reserves: Some(b.months_of_reserves.unwrap_or(0)),
        is_non_occupancy_borrower: Some(b.is_non_occupancy_buyer.unwrap_or(false)),
        is_non_occupancy_coborrower: Some(b.is_non_occupancy_coborrower.unwrap_or(false)),
        properties_owned: Some(b.properties_owned.unwrap_or(0)),
        is_self_employed: Some(b.is_self_employed.unwrap_or(false)),
        multiple_borrower_pairs: Some(b.multiple_borrower_pairs.unwrap_or(false)),
        verification_method: VERIFICATION_METHOD_FIELD
            .loan_to_pricing(&text(b.verification_method.as_deref()))
            .map(str::to_string),
        credit_grade: CREDIT_GRADE_FIELD
            .loan_to_pricing(&text(b.credit_grade.as_deref()))
            .map(str::to_string),
        citizenship: CITIZENSHIP_FIELD
            .loan_to_pricing(&text(b.citizenship.as_deref()))
            .map(str::to_string),
        employment_documentation_method: None,
        is_non_traditional_credit: Some(b.is_non_traditional_credit.unwrap_or(false)),
        is_gift_funds: Some(b.is_gift_funds.unwrap_or(false)),
        residual_income: None,
        is_first_time_home_buyer: Some(b.is_first_time_home_buyer.unwrap_or(false)),
        investor_experience: None,
        full_doc_months: Some(b.full_doc_months.unwrap_or(0)),
        cpa_pand_l_months: Some(b.cpa_pand_l_months.unwrap_or(0)),
        annual_income: Some(annual_income),
    }
}

/// Pricing loan section from the loan's flat top-level fields
#[must_use]
pub fn build_pricing_loan_from_loan(loan: &LoanRecord) -> ExternalLoan {
    let pick = |field: &crate::enums::EnumField, value: Option<&str>| {
        field.loan_to_pricing(&text(value)).map(str::to_string)
    };

    ExternalLoan {
        purpose: None,
        amount: loan.amount.clone(),
        purchase_price: loan.purchase_price.clone(),
        property_value: loan.property_value.clone().or(loan.purchase_price.clone()),
        refinance_purpose: pick(&REFINANCE_PURPOSE_FIELD, loan.refinance_purpose.as_deref()),
        cash_out_amount: loan.cash_out_amount.clone(),
        second_amount: loan.second_amount.clone(),
        heloc_line_amount: loan.heloc_line_amount.clone(),
        heloc_draw_amount: loan.heloc_draw_amount.clone(),
        is_mortgage_insurance_paid_by_borrower: Some(
            loan.is_mortgage_insurance_paid_by_borrower != Some(false),
        ),
        impounds: pick(&IMPOUNDS_FIELD, loan.impound_type.as_deref()),
        aus: pick(&AUS_FIELD, loan.aus.as_deref()),
        position: pick(&POSITION_FIELD, loan.position.as_deref()),

        fha_financing_option: pick(&FINANCING_OPTION_FIELD, loan.fha_financing_option.as_deref()),
        fha_mortgage_insurance_premium: loan.fha_mortgage_insurance_premium_percentage.clone(),
        fha_mortgage_insurance_premium_amount: loan.fha_mortgage_insurance_premium_amount.clone(),
        fha_total_loan_amount: loan.fha_total_loan_amount.clone(),
        fha_finance_amount: loan.fha_financed_amount.clone(),
        fha_prior_endorsement_date: non_empty(loan.fha_case_assignment_date.as_deref()),

        usda_financing_option: pick(&FINANCING_OPTION_FIELD, loan.usda_financing_option.as_deref()),
        usda_guarantee_fee: loan.usda_guaranteed_percentage.clone(),
        usda_guarantee_fee_amount: loan.usda_guarantee_fee_amount.clone(),
        usda_total_loan_amount: loan.usda_total_loan_amount.clone(),
        usda_finance_amount: loan.usda_financed_amount.clone(),

        va_financing_option: pick(&FINANCING_OPTION_FIELD, loan.va_financing_option.as_deref()),
        va_down_payment_amount: loan.va_down_payment_amount.clone(),
        va_down_payment: loan.va_down_payment.clone(),
        va_loan_history: pick(&VA_LOAN_HISTORY_FIELD, loan.va_loan_history.as_deref()),
        va_funding_fee: loan.va_funding_fee_percentage.clone(),
        va_funding_fee_amount: loan.va_funding_fee_amount.clone(),
        va_total_loan_amount: loan.va_total_loan_amount.clone(),
        va_finance_amount: loan.va_financed_amount.clone(),
        va_funding_fee_exempt: Some(loan.is_va_funding_fee_exempt.unwrap_or(false)),
        va_cashout_ltv: loan.va_cashout_ltv.clone(),
        va_cashout_cltv: loan.va_cashout_cltv.clone(),
        va_cashout_hcltv: loan.va_cashout_hcltv.clone(),

        application_date: non_empty(loan.application_date.as_deref()),
        streamline_refinance_type: pick(&STREAMLINE_FIELD, loan.streamline_refinance_type.as_deref()),
        temporary_buydown_type: pick(&BUYDOWN_FIELD, loan.temporary_buydown_type.as_deref()),
        prepayment_penalty_structure_type: pick(
            &PREPAY_TYPE_FIELD,
            loan.prepayment_penalty_structure_type.as_deref(),
        ),
        prepayment_penalty_structure: pick(
            &PREPAY_STRUCTURE_FIELD,
            loan.prepayment_penalty_structure.as_deref(),
        ),
        prepayment_penalty_period_months: loan.prepayment_penalty_period_months,
        loan_type: pick(&LOAN_TYPE_FIELD, loan.loan_type.as_deref()),

        ltv: loan.ltv.clone(),
        cltv: loan.cltv.clone(),
        hcltv: loan.hcltv.clone(),
        lender_fee: loan.lender_fee.clone(),
        roll_lender_fee: loan.roll_lender_fee,
        is_second_community_loan: loan.is_second_community_loan,
        is_second_piggy_back: loan.is_second_piggyback,
        is_second_investor_same_as_first: loan.is_second_investor_same_as_first,
        loan_term: loan.loan_term,
        arm_fixed_term: loan.arm_fixed_term,
    }
}

/// Pricing property from the loan's property
#[must_use]
pub fn build_pricing_property_from_loan(loan: &LoanRecord) -> ExternalProperty {
    let p = &loan.property;

    ExternalProperty {
        state: or_blank(p.state.as_deref()),
        county: or_blank(p.county.as_deref()),
        property_type: PROPERTY_TYPE_FIELD
            .loan_to_pricing(&text(p.property_type.as_deref()))
            .map(str::to_string),
        occupancy: OCCUPANCY_FIELD
            .loan_to_pricing(&text(p.occupancy.as_deref()))
            .map(str::to_string),
        units: Some(p.units.unwrap_or(1)),
        stories: Some(p.stories.unwrap_or(1)),
        is_non_warrantable_project: p.is_non_warrantable_project,
        is_condotel: p.is_condotel,
        is_declining_market: p.is_declining_market,
        inspection_waiver: Some(p.inspection_waiver.unwrap_or(false)),
        is_high_cost_county: p.is_high_cost_county,
        address_line1: or_blank(p.address_line1.as_deref()),
        address_line2: or_blank(p.address_line2.as_deref()),
        city: or_blank(p.city.as_deref()),
        county_fips_code: or_blank(p.county_fips_code.as_deref()),
        zip_code: or_blank(p.zip_code.as_deref()),
        zip_code_plus_four: non_empty(p.zip_code_plus_four.as_deref()),
        property_attachment_type: PROPERTY_ATTACHMENT_FIELD
            .loan_to_pricing(&text(p.property_attachment_type.as_deref()))
            .map(str::to_string),
        estimated_value: p.estimated_value.clone(),
        appraised_value: p.appraised_value.clone(),
        lot_size_in_acres: p.lot_size_in_acres.clone(),
        median_income: p.median_income.clone(),
    }
}

/// Pricing broker compensation plan; a missing plan reads as empty
#[must_use]
pub fn build_pricing_broker_comp_from_loan(loan: &LoanRecord) -> ExternalBrokerCompPlan {
    let plan = loan.broker_comp_plan.clone().unwrap_or_default();

    ExternalBrokerCompPlan {
        fixed_amount: plan.fixed_amount,
        percent: plan.percent,
        min_amount: plan.min_amount,
        max_amount: plan.max_amount,
        calculated_amount: plan.calculated_amount,
        calculated_adjustment: plan.calculated_adjustment,
        paid_by: PAID_BY_FIELD
            .loan_to_pricing(&text(plan.paid_by.as_deref()))
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn convert(doc: Value) -> Value {
        let loan = LoanRecord::from_json(doc).unwrap();
        serde_json::to_value(get_loan_to_external_pricing_scenario(&loan)).unwrap()
    }

    #[test]
    fn purchase_scenario() {
        let out = convert(json!({
            "amount": "350000.0000",
            "ltv": "80.0000",
            "purpose": "PURCHASE",
            "aus": "NOT_SPECIFIED"
        }));
        assert_eq!(out["audienceId"], json!("Retail"));
        assert_eq!(out["purpose"], json!("Purchase"));
        assert_eq!(out["loan"]["amount"], json!("350000"));
        assert_eq!(out["loan"]["ltv"], json!("80"));
        assert_eq!(out["loan"]["aus"], json!("NotSpecified"));
        assert!(out.get("search").is_none());
        assert!(out.get("settings").is_none());
    }

    #[test]
    fn empty_loan_takes_section_fallbacks() {
        let out = convert(json!({}));
        assert!(out.get("purpose").is_none());
        assert_eq!(out["loan"]["impounds"], json!("Full"));
        assert_eq!(out["loan"]["position"], json!("First"));
        assert_eq!(out["loan"]["streamlineRefinanceType"], json!("None"));
        assert_eq!(out["loan"]["temporaryBuydownType"], json!("None"));
        assert_eq!(out["loan"]["isMortgageInsurancePaidByBorrower"], json!(true));
        assert_eq!(out["property"]["occupancy"], json!("PrimaryResidence"));
        assert_eq!(out["property"]["propertyType"], json!("SFR"));
        assert_eq!(out["brokerCompPlan"]["paidBy"], json!("Lender"));
        assert_eq!(out["borrower"]["annualIncome"], json!(0));
        assert_eq!(out["customValues"], json!([]));
    }

    #[test]
    fn loan_spellings_map_to_pricing() {
        let out = convert(json!({
            "impoundType": "PARTIAL",
            "streamlineRefinanceType": "NO_CASHOUT_FHA_STREAMLINED_REFINANCE",
            "loanType": "FHA",
            "fhaFinancingOption": "FINANCE",
            "property": {"occupancy": "INVESTMENT", "propertyType": "MULTI_UNIT"},
            "borrower": {"verificationMethod": "BANK_STATEMENT", "incomeMonthly": "8333.33"}
        }));
        assert_eq!(out["loan"]["impounds"], json!("Partial"));
        assert_eq!(
            out["loan"]["streamlineRefinanceType"],
            json!("NoCashoutFHAStreamlinedRefinance")
        );
        assert_eq!(out["loan"]["loanType"], json!("FHA"));
        assert_eq!(out["loan"]["fhaFinancingOption"], json!("Finance"));
        assert_eq!(out["property"]["occupancy"], json!("InvestmentProperty"));
        assert_eq!(out["property"]["propertyType"], json!("TwoFourUnit"));
        assert_eq!(out["borrower"]["verificationMethod"], json!("BankStatement"));
        assert_eq!(out["borrower"]["annualIncome"], json!(100_000));
    }

    #[test]
    fn oversized_income_yields_zero() {
        let out = convert(json!({"borrower": {"incomeMonthly": "1e308"}}));
        assert_eq!(out["borrower"]["annualIncome"], json!(0));
        let out = convert(json!({"borrower": {"incomeMonthly": "-1e300"}}));
        assert_eq!(out["borrower"]["annualIncome"], json!(0));
        assert_eq!(annual_income(Some(2500.5)), 30_006);
        assert_eq!(annual_income(Some(f64::NAN)), 0);
    }

    #[test]
    fn property_value_falls_back_to_purchase_price() {
        let out = convert(json!({"purchasePrice": 500000}));
        assert_eq!(out["loan"]["propertyValue"], json!("500000"));
    }

    #[test]
    fn custom_values_keep_mapping_order() {
        let out = convert(json!({"customValues": {"zeta": 1, "alpha": "two"}}));
        assert_eq!(
            out["customValues"],
            json!([{"name": "zeta", "value": 1}, {"name": "alpha", "value": "two"}])
        );
    }

    #[test]
    fn unknown_purpose_is_omitted() {
        let out = convert(json!({"purpose": "TIME_SHARE"}));
        assert!(out.get("purpose").is_none());
    }
}
