use chrono::{DateTime, SecondsFormat, Utc};

use crate::decimal::MaybeDecimal;
use crate::enums::policy::*;
use crate::enums::EnumField;
use crate::types::{
    ExternalPricingScenario, LoanBorrower, LoanBrokerCompPlan, LoanOfficer, LoanProperty,
    LoanRecord,
};

use super::{non_empty, or_blank, text};

/// Placeholder for required loan numerics that have no pricing value
const ZERO: &str = "0.0000";

/// Pricing scenario → loan, stamped with the current time
///
/// See [`external_to_get_loan_at`].
#[must_use]
pub fn external_to_get_loan(external: &ExternalPricingScenario) -> LoanRecord {
    external_to_get_loan_at(external, Utc::now())
}

/// Pricing scenario → loan with an explicit timestamp
///
/// The result is always structurally complete. Required numerics default to
/// `"0.0000"`, required enums take their loan fallback, and fields with no
/// pricing counterpart are blank strings or `null`. `now` stamps the
/// `created`, `modified` and `external*At` fields.
#[must_use]
pub fn external_to_get_loan_at(external: &ExternalPricingScenario, now: DateTime<Utc>) -> LoanRecord {
    let stamp = now.to_rfc3339_opts(SecondsFormat::Millis, true);
    let l = &external.loan;
    let pick = |field: &EnumField, value: Option<&str>| {
        field.pricing_to_loan(&text(value)).map(str::to_string)
    };

    let custom_values = external.custom_values.to_map();

    LoanRecord {
        borrower: borrower(external),
        loan_officer: LoanOfficer {
            name: Some(String::new()),
            email: Some(String::new()),
            assistant_email: None,
        },
        property: property(external),
        broker_comp_plan: (!external.broker_comp_plan.is_empty()).then(|| broker_comp_plan(external)),
        custom_values: (!custom_values.is_empty()).then_some(custom_values),

        external_created_at: Some(stamp.clone()),
        external_modified_at: Some(stamp.clone()),
        loan_number: Some(String::new()),
        purpose: pick(&PURPOSE_FIELD, external.effective_purpose()),
        amount: l.amount.clone().or_literal(ZERO),
        rate: MaybeDecimal::absent(),
        product_name: Some(String::new()),
        product_code: Some(String::new()),
        aus: pick(&AUS_FIELD, l.aus.as_deref()),
        application_date: non_empty(l.application_date.as_deref()),
        funded_at: None,
        ltv: l.ltv.clone().or_literal(ZERO),
        cltv: l.cltv.clone().or_literal(ZERO),
        hcltv: l.hcltv.clone().or_literal(ZERO),
        amortization_type: None,
        documentation_type: None,
        cash_out_amount: l.cash_out_amount.clone().or_literal(ZERO),

        fha_case_assignment_date: non_empty(l.fha_prior_endorsement_date.as_deref()),
        fha_total_loan_amount: l.fha_total_loan_amount.clone(),
        fha_mortgage_insurance_premium_percentage: l.fha_mortgage_insurance_premium.clone(),
        fha_mortgage_insurance_premium_amount: l.fha_mortgage_insurance_premium_amount.clone(),
        fha_financed_amount: l.fha_finance_amount.clone(),
        fha_financing_option: pick(&FINANCING_OPTION_FIELD, l.fha_financing_option.as_deref()),
        fha_tltv: MaybeDecimal::absent(),

        usda_total_loan_amount: l.usda_total_loan_amount.clone(),
        usda_guarantee_fee_amount: l.usda_guarantee_fee_amount.clone(),
        usda_guaranteed_percentage: l.usda_guarantee_fee.clone(),
        usda_financed_amount: l.usda_finance_amount.clone(),
        usda_financing_option: pick(&FINANCING_OPTION_FIELD, l.usda_financing_option.as_deref()),
        usda_tltv: MaybeDecimal::absent(),

        va_total_loan_amount: l.va_total_loan_amount.clone(),
        va_down_payment_amount: l.va_down_payment_amount.clone(),
        va_down_payment: l.va_down_payment.clone(),
        va_funding_fee_amount: l.va_funding_fee_amount.clone(),
        va_funding_fee_percentage: l.va_funding_fee.clone(),
        va_financed_amount: l.va_finance_amount.clone(),
        va_cash_funding_fee_amount: MaybeDecimal::absent(),
        va_financing_option: pick(&FINANCING_OPTION_FIELD, l.va_financing_option.as_deref()),
        va_loan_history: pick(&VA_LOAN_HISTORY_FIELD, l.va_loan_history.as_deref()),
        va_cashout_ltv: l.va_cashout_ltv.clone(),
        va_cashout_cltv: l.va_cashout_cltv.clone(),
        va_cashout_hcltv: l.va_cashout_hcltv.clone(),
        is_va_funding_fee_exempt: l.va_funding_fee_exempt,
        va_tltv: MaybeDecimal::absent(),

        heloc_draw_amount: l.heloc_draw_amount.clone(),
        heloc_line_amount: l.heloc_line_amount.clone().or_literal(ZERO),
        is_relocation_loan: None,
        lender_fee: l.lender_fee.clone(),
        is_mortgage_insurance_paid_by_borrower: Some(l.is_mortgage_insurance_paid_by_borrower != Some(false)),
        prepayment_penalty_period_months: l.prepayment_penalty_period_months,
        prepayment_penalty_structure: pick(&PREPAY_STRUCTURE_FIELD, l.prepayment_penalty_structure.as_deref()),
        prepayment_penalty_structure_type: pick(
            &PREPAY_TYPE_FIELD,
            l.prepayment_penalty_structure_type.as_deref(),
        ),
        property_value: l.property_value.clone().or_literal(ZERO),
        purchase_price: l.purchase_price.clone().or_literal(ZERO),
        refinance_purpose: pick(&REFINANCE_PURPOSE_FIELD, l.refinance_purpose.as_deref()),
        second_amount: l.second_amount.clone(),
        position: pick(&POSITION_FIELD, l.position.as_deref()),
        is_second_investor_same_as_first: l.is_second_investor_same_as_first,
        is_second_community_loan: l.is_second_community_loan,
        is_second_piggyback: l.is_second_piggy_back,
        servicer_name: Some(String::new()),
        temporary_buydown_type: pick(&BUYDOWN_FIELD, l.temporary_buydown_type.as_deref()),
        loan_term: l.loan_term,
        loan_type: pick(&LOAN_TYPE_FIELD, l.loan_type.as_deref()),
        impound_type: pick(&IMPOUNDS_FIELD, l.impounds.as_deref()),
        roll_lender_fee: l.roll_lender_fee,
        streamline_refinance_type: pick(&STREAMLINE_FIELD, l.streamline_refinance_type.as_deref()),
        arm_fixed_term: l.arm_fixed_term,
        created: Some(stamp.clone()),
        modified: Some(stamp),
        los_loan_id: Some(String::new()),
    }
}

#[allow(clippy::cast_precision_loss)]
fn borrower(external: &ExternalPricingScenario) -> LoanBorrower {
    let b = &external.borrower;
    let income_monthly = match b.annual_income {
        Some(annual) if annual != 0 => MaybeDecimal::from_f64(annual as f64 / 12.0),
        _ => MaybeDecimal::absent(),
    };
    let enum_value = |field: &EnumField, value: Option<&str>| {
        field.pricing_to_loan(&text(value)).map(str::to_string)
    };

    LoanBorrower {
        first_name: or_blank(b.first_name.as_deref()),
        last_name: or_blank(b.last_name.as_deref()),
        fico: b.fico,
        dti_ratio: b.dti_ratio.clone(),
        citizenship: enum_value(&CITIZENSHIP_FIELD, b.citizenship.as_deref()),
        credit_grade: enum_value(&CREDIT_GRADE_FIELD, b.credit_grade.as_deref()),
        full_doc_months: b.full_doc_months,
        is_non_occupancy_coborrower: Some(b.is_non_occupancy_coborrower.unwrap_or(false)),
        is_gift_funds: Some(b.is_gift_funds.unwrap_or(false)),
        multiple_borrower_pairs: Some(b.multiple_borrower_pairs.unwrap_or(false)),
        is_non_traditional_credit: Some(b.is_non_traditional_credit.unwrap_or(false)),
        income_monthly,
        is_first_time_home_buyer: Some(b.is_first_time_home_buyer.unwrap_or(false)),
        is_non_occupancy_buyer: Some(b.is_non_occupancy_borrower.unwrap_or(false)),
        is_self_employed: Some(b.is_self_employed.unwrap_or(false)),
        cpa_pand_l_months: b.cpa_pand_l_months,
        properties_owned: Some(b.properties_owned.unwrap_or(0)),
        months_of_reserves: Some(b.months_of_reserves.unwrap_or(0)),
        verification_method: enum_value(&VERIFICATION_METHOD_FIELD, b.verification_method.as_deref()),
        ..LoanBorrower::default()
    }
}

fn property(external: &ExternalPricingScenario) -> LoanProperty {
    let p = &external.property;

    LoanProperty {
        address_line1: or_blank(p.address_line1.as_deref()),
        address_line2: or_blank(p.address_line2.as_deref()),
        appraised_value: p.appraised_value.clone(),
        city: or_blank(p.city.as_deref()),
        county: or_blank(p.county.as_deref()),
        county_fips_code: or_blank(p.county_fips_code.as_deref()),
        county_fips_code_only: None,
        is_high_cost_county: p.is_high_cost_county,
        estimated_value: p.estimated_value.clone(),
        inspection_waiver: p.inspection_waiver,
        is_condotel: p.is_condotel,
        is_declining_market: p.is_declining_market,
        is_non_warrantable_project: p.is_non_warrantable_project,
        lot_size_in_acres: p.lot_size_in_acres.clone(),
        occupancy: OCCUPANCY_FIELD
            .pricing_to_loan(&text(p.occupancy.as_deref()))
            .map(str::to_string),
        property_type: PROPERTY_TYPE_FIELD
            .pricing_to_loan(&text(p.property_type.as_deref()))
            .map(str::to_string),
        property_attachment_type: PROPERTY_ATTACHMENT_FIELD
            .pricing_to_loan(&text(p.property_attachment_type.as_deref()))
            .map(str::to_string),
        state: or_blank(p.state.as_deref()),
        state_fips_code: Some(String::new()),
        stories: Some(p.stories.unwrap_or(1)),
        units: Some(p.units.unwrap_or(1)),
        zip_code: or_blank(p.zip_code.as_deref()),
        zip_code_plus_four: non_empty(p.zip_code_plus_four.as_deref()),
        msa_code: None,
        census_tract: None,
        median_income: p.median_income.clone(),
    }
}

fn broker_comp_plan(external: &ExternalPricingScenario) -> LoanBrokerCompPlan {
    let c = &external.broker_comp_plan;

    LoanBrokerCompPlan {
        fixed_amount: c.fixed_amount.clone(),
        percent: c.percent.clone(),
        min_amount: c.min_amount.clone(),
        max_amount: c.max_amount.clone(),
        calculated_adjustment: c.calculated_adjustment.clone(),
        calculated_amount: c.calculated_amount.clone(),
        paid_by: PAID_BY_FIELD
            .pricing_to_loan(&text(c.paid_by.as_deref()))
            .map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn convert(doc: Value) -> Value {
        let external = ExternalPricingScenario::from_json(doc).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        serde_json::to_value(external_to_get_loan_at(&external, now)).unwrap()
    }

    #[test]
    fn partial_impounds_scenario() {
        let out = convert(json!({"loan": {"amount": "200000", "impounds": "Partial"}}));
        assert_eq!(out["amount"], json!("200000"));
        assert_eq!(out["impoundType"], json!("PARTIAL"));
        assert_eq!(out["purpose"], json!("PURCHASE"));
        assert_eq!(out["aus"], json!("NOT_SPECIFIED"));
        assert_eq!(out["position"], json!("FIRST"));
        assert_eq!(out["refinancePurpose"], json!("NONE"));
        assert_eq!(out["ltv"], json!("0.0000"));
        assert_eq!(out["purchasePrice"], json!("0.0000"));
        assert_eq!(out["property"]["occupancy"], json!("PRIMARY"));
        assert_eq!(out["property"]["propertyType"], json!("SFR"));
    }

    #[test]
    fn timestamps_use_the_given_instant() {
        let out = convert(json!({}));
        for key in ["created", "modified", "externalCreatedAt", "externalModifiedAt"] {
            assert_eq!(out[key], json!("2026-01-02T03:04:05.000Z"), "{key}");
        }
    }

    #[test]
    fn blank_placeholders_for_loan_only_fields() {
        let out = convert(json!({}));
        assert_eq!(out["loanNumber"], json!(""));
        assert_eq!(out["losLoanId"], json!(""));
        assert_eq!(out["loanofficer"], json!({"name": "", "email": "", "assistantEmail": null}));
        assert_eq!(out["rate"], Value::Null);
        assert_eq!(out["customValues"], Value::Null);
        assert!(out.get("brokerCompPlan").is_none());
        assert!(out["borrower"]["derogatoryEvents"].is_object());
    }

    #[test]
    fn purpose_prefers_top_level() {
        let out = convert(json!({
            "purpose": "CashOutRefinance",
            "loan": {"purpose": "Purchase"}
        }));
        assert_eq!(out["purpose"], json!("CASH_OUT_REFINANCE"));
        let nested = convert(json!({"loan": {"purpose": "NoCashOutRefinance"}}));
        assert_eq!(nested["purpose"], json!("NO_CASH_OUT_REFINANCE"));
    }

    #[test]
    fn annual_income_becomes_monthly() {
        let out = convert(json!({"borrower": {"annualIncome": 120000}}));
        assert_eq!(out["borrower"]["incomeMonthly"], json!("10000"));
        let none = convert(json!({"borrower": {"annualIncome": 0}}));
        assert_eq!(none["borrower"]["incomeMonthly"], Value::Null);
    }

    #[test]
    fn prepay_period_keeps_explicit_zero() {
        let out = convert(json!({"loan": {"prepaymentPenaltyPeriodMonths": 0}}));
        assert_eq!(out["prepaymentPenaltyPeriodMonths"], json!(0));
        let absent = convert(json!({"loan": {}}));
        assert_eq!(absent["prepaymentPenaltyPeriodMonths"], Value::Null);
        let set = convert(json!({"loan": {"prepaymentPenaltyPeriodMonths": 36}}));
        assert_eq!(set["prepaymentPenaltyPeriodMonths"], json!(36));
    }

    #[test]
    fn custom_values_become_a_mapping() {
        let out = convert(json!({"customValues": [
            {"name": "zeta", "value": 1},
            {"name": "alpha", "value": "two"}
        ]}));
        let keys: Vec<_> = out["customValues"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta".to_string(), "alpha".to_string()]);
    }

    #[test]
    fn broker_plan_only_when_present() {
        let out = convert(json!({"brokerCompPlan": {"percent": "1.250", "paidBy": "Borrower"}}));
        assert_eq!(out["brokerCompPlan"]["percent"], json!("1.25"));
        assert_eq!(out["brokerCompPlan"]["paidBy"], json!("BORROWER"));
    }
}
