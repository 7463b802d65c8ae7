use crate::enums::policy::*;
use crate::enums::EnumField;
use crate::reader::{Aliases, Section};
use crate::types::{
    CustomValues, ExternalBorrower, ExternalBrokerCompPlan, ExternalLoan, ExternalPricingScenario,
    ExternalProperty, ExternalSearch, ExternalSettings, UiPricingScenario,
};

const AUDIENCE_ID: Aliases = &["audienceId", "AudienceId"];
const SEARCH: Aliases = &["search", "Search"];
const BORROWER: Aliases = &["borrower", "Borrower"];
const LOAN: Aliases = &["loan", "Loan"];
const PROPERTY: Aliases = &["property", "Property"];
const BROKER_COMP_PLAN: Aliases = &["brokerCompPlan", "BrokerCompPlan"];
const SETTINGS: Aliases = &["settings", "Settings"];
const CUSTOM_VALUES: Aliases = &["customValues", "CustomValues"];
const ADJUSTMENTS: Aliases = &["adjustments", "Adjustments"];

const DEFAULT_AUDIENCE: &str = "Retail";
const DEFAULT_LOCK_PERIOD: i64 = 30;
const DEFAULT_OPERATIONS: [&str; 2] = ["Eligibility", "Pricing"];

/// UI / PE3 request → pricing scenario
///
/// Every section resolves through its alias list and defaults to `{}`.
/// Every leaf is filled: enums through their UI code table and fallback,
/// decimals normalized or omitted, flags and counts with explicit defaults.
#[must_use]
pub fn ui_to_external_pricing_scenario(ui: &UiPricingScenario) -> ExternalPricingScenario {
    let root = ui.root();

    ExternalPricingScenario {
        audience_id: Some(root.string_or(AUDIENCE_ID, DEFAULT_AUDIENCE)),
        purpose: None,
        search: Some(search(root.section(SEARCH))),
        borrower: borrower(root.section(BORROWER)),
        loan: loan(root.section(LOAN)),
        property: property(root.section(PROPERTY)),
        broker_comp_plan: broker_comp_plan(root.section(BROKER_COMP_PLAN)),
        custom_values: root
            .get(CUSTOM_VALUES)
            .map(CustomValues::from_value)
            .unwrap_or_default(),
        adjustments: Some(root.array(ADJUSTMENTS).cloned().unwrap_or_default()),
        settings: Some(settings(root.section(SETTINGS))),
    }
}

fn search(s: Section<'_>) -> ExternalSearch {
    ExternalSearch {
        position: POSITION_FIELD.ui_to_pricing(s.value(&["position", "Position"])).map(str::to_string),
        desired_lock_period: Some(s.int_or(&["desiredLockPeriod", "DesiredLockPeriod"], DEFAULT_LOCK_PERIOD)),
        include_interest_only_products: Some(s.bool_or(
            &["includeInterestOnlyProducts", "IncludeInterestOnlyProducts"],
            false,
        )),
        loan_types: s.string_list(&["loanTypes", "LoanTypes"]),
        amortization_types: s.string_list(&["amortizationTypes", "AmortizationTypes"]),
        loan_terms: s.string_list(&["loanTerms", "LoanTerms"]),
        arm_fixed_terms: s.string_list(&["armFixedTerms", "ArmFixedTerms"]),
    }
}

fn borrower(b: Section<'_>) -> ExternalBorrower {
    let pick = |field: &EnumField, aliases: Aliases| field.ui_to_pricing(b.value(aliases)).map(str::to_string);

    ExternalBorrower {
        first_name: Some(b.string_or(&["firstName", "FirstName"], "")),
        last_name: Some(b.string_or(&["lastName", "LastName"], "")),
        fico: b.int(&["fico", "FICO", "Fico"]),
        dti_ratio: b.decimal(&["dtiRatio", "DTIRatio", "DtiRatio"]),
        months_of_reserves: Some(b.int_or(&["monthsOfReserves", "MonthsOfReserves"], 0)),
        is_non_occupancy_borrower: Some(b.bool_or(&["isNonOccupancyBorrower", "IsNonOccupancyBorrower"], false)),
        is_non_occupancy_coborrower: Some(b.bool_or(
            &["isNonOccupancyCoborrower", "IsNonOccupancyCoborrower"],
            false,
        )),
        properties_owned: Some(b.int_or(&["propertiesOwned", "PropertiesOwned"], 0)),
        is_self_employed: Some(b.bool_or(&["isSelfEmployed", "IsSelfEmployed"], false)),
        multiple_borrower_pairs: Some(b.bool_or(&["multipleBorrowerPairs", "MultipleBorrowerPairs"], false)),
        verification_method: pick(&VERIFICATION_METHOD_FIELD, &["verificationMethod", "VerificationMethod"]),
        credit_grade: pick(&CREDIT_GRADE_FIELD, &["creditGrade", "CreditGrade"]),
        citizenship: pick(&CITIZENSHIP_FIELD, &["citizenship", "Citizenship"]),
        employment_documentation_method: pick(
            &EMPLOYMENT_DOCUMENTATION_FIELD,
            &["employmentDocumentationMethod", "EmploymentDocumentationMethod"],
        ),
        is_non_traditional_credit: Some(b.bool_or(&["isNonTraditionalCredit", "IsNonTraditionalCredit"], false)),
        is_gift_funds: Some(b.bool_or(&["isGiftFunds", "IsGiftFunds"], false)),
        residual_income: Some(b.int_or(&["residualIncome", "ResidualIncome"], 0)),
        is_first_time_home_buyer: Some(b.bool_or(&["isFirstTimeHomeBuyer", "IsFirstTimeHomeBuyer"], false)),
        investor_experience: Some(b.int_or(&["investorExperience", "InvestorExperience"], 0)),
        full_doc_months: Some(b.int_or(&["fullDocMonths", "FullDocMonths"], 0)),
        cpa_pand_l_months: Some(b.int_or(&["cpaPandLMonths", "CpaPandLMonths"], 0)),
        annual_income: Some(b.int_or(&["annualIncome", "AnnualIncome", "income", "Income"], 0)),
    }
}

fn loan(l: Section<'_>) -> ExternalLoan {
    let pick = |field: &EnumField, aliases: Aliases| field.ui_to_pricing(l.value(aliases)).map(str::to_string);
    let purchase_price = l.decimal(&["purchasePrice", "PurchasePrice"]);

    ExternalLoan {
        purpose: pick(&PURPOSE_FIELD, &["purpose", "Purpose"]),
        amount: l.decimal(&["amount", "Amount"]),
        property_value: l
            .decimal(&["propertyValue", "PropertyValue"])
            .or(purchase_price.clone()),
        purchase_price,
        refinance_purpose: pick(&REFINANCE_PURPOSE_FIELD, &["refinancePurpose", "RefinancePurpose"]),
        cash_out_amount: l.decimal(&["cashOutAmount", "CashOutAmount"]),
        second_amount: l.decimal(&["secondAmount", "SecondAmount"]),
        heloc_line_amount: l.decimal(&["helocLineAmount", "HelocLineAmount"]),
        heloc_draw_amount: l.decimal(&["helocDrawAmount", "HelocDrawAmount"]),
        is_mortgage_insurance_paid_by_borrower: Some(l.bool_or(
            &["isMortgageInsurancePaidByBorrower", "IsMortgageInsurancePaidByBorrower"],
            true,
        )),
        impounds: pick(&IMPOUNDS_FIELD, &["impounds", "Impounds"]),
        aus: pick(&AUS_FIELD, &["aus", "Aus", "AUS"]),
        position: pick(&POSITION_FIELD, &["position", "Position"]),

        fha_financing_option: pick(&FINANCING_OPTION_FIELD, &["fhaFinancingOption", "FhaFinancingOption"]),
        fha_mortgage_insurance_premium: l.decimal(&["fhaMortgageInsurancePremium", "FhaMortgageInsurancePremium"]),
        fha_mortgage_insurance_premium_amount: l.decimal(&[
            "fhaMortgageInsurancePremiumAmount",
            "FhaMortgageInsurancePremiumAmount",
        ]),
        fha_total_loan_amount: l.decimal(&["fhaTotalLoanAmount", "FhaTotalLoanAmount"]),
        fha_finance_amount: l.decimal(&["fhaFinanceAmount", "FhaFinanceAmount"]),
        fha_prior_endorsement_date: l
            .string(&["fhaPriorEndorsementDate", "FhaPriorEndorsementDate"])
            .filter(|s| !s.is_empty()),

        usda_financing_option: pick(&FINANCING_OPTION_FIELD, &["usdaFinancingOption", "UsdaFinancingOption"]),
        usda_guarantee_fee: l.decimal(&["usdaGuaranteeFee", "UsdaGuaranteeFee"]),
        usda_guarantee_fee_amount: l.decimal(&["usdaGuaranteeFeeAmount", "UsdaGuaranteeFeeAmount"]),
        usda_total_loan_amount: l.decimal(&["usdaTotalLoanAmount", "UsdaTotalLoanAmount"]),
        usda_finance_amount: l.decimal(&["usdaFinanceAmount", "UsdaFinanceAmount"]),

        va_financing_option: pick(&FINANCING_OPTION_FIELD, &["vaFinancingOption", "VaFinancingOption"]),
        va_down_payment_amount: l.decimal(&["vaDownPaymentAmount", "VaDownPaymentAmount"]),
        va_down_payment: l.decimal(&["vaDownPayment", "VaDownPayment"]),
        va_loan_history: pick(&VA_LOAN_HISTORY_FIELD, &["vaLoanHistory", "VaLoanHistory"]),
        va_funding_fee: l.decimal(&["vaFundingFee", "VaFundingFee"]),
        va_funding_fee_amount: l.decimal(&["vaFundingFeeAmount", "VaFundingFeeAmount"]),
        va_total_loan_amount: l.decimal(&["vaTotalLoanAmount", "VaTotalLoanAmount"]),
        va_finance_amount: l.decimal(&["vaFinanceAmount", "VaFinanceAmount"]),
        va_funding_fee_exempt: Some(l.bool_or(&["vaFundingFeeExempt", "VaFundingFeeExempt"], false)),
        va_cashout_ltv: l.decimal(&["vaCashoutLTV", "VaCashoutLTV"]),
        va_cashout_cltv: l.decimal(&["vaCashoutCLTV", "VaCashoutCLTV"]),
        va_cashout_hcltv: l.decimal(&["vaCashoutHCLTV", "VaCashoutHCLTV"]),

        application_date: l
            .string(&["applicationDate", "ApplicationDate"])
            .filter(|s| !s.is_empty()),
        streamline_refinance_type: pick(
            &STREAMLINE_FIELD,
            &["streamlineRefinanceType", "StreamlineRefinanceType"],
        ),
        temporary_buydown_type: pick(&BUYDOWN_FIELD, &["temporaryBuydownType", "TemporaryBuydownType"]),
        prepayment_penalty_structure_type: pick(
            &PREPAY_TYPE_FIELD,
            &["prepaymentPenaltyStructureType", "PrepaymentPenaltyStructureType"],
        ),
        prepayment_penalty_structure: pick(
            &PREPAY_STRUCTURE_FIELD,
            &["prepaymentPenaltyStructure", "PrepaymentPenaltyStructure"],
        ),
        prepayment_penalty_period_months: l.int(&[
            "prepaymentPenaltyPeriodMonths",
            "PrepaymentPenaltyPeriodMonths",
        ]),
        loan_type: pick(&LOAN_TYPE_FIELD, &["loanType", "LoanType"]),

        ltv: l.decimal(&["ltv", "LTV", "Ltv"]),
        cltv: l.decimal(&["cltv", "CLTV", "Cltv"]),
        hcltv: l.decimal(&["hcltv", "HCLTV", "Hcltv"]),
        lender_fee: l.decimal(&["lenderFee", "LenderFee"]),
        roll_lender_fee: l.bool(&["rollLenderFee", "RollLenderFee"]),
        is_second_community_loan: l.bool(&["isSecondCommunityLoan", "IsSecondCommunityLoan"]),
        is_second_piggy_back: l.bool(&["isSecondPiggyBack", "isSecondPiggyback", "IsSecondPiggyBack"]),
        is_second_investor_same_as_first: l.bool(&[
            "isSecondInvestorSameAsFirst",
            "IsSecondInvestorSameAsFirst",
        ]),
        loan_term: l.int(&["loanTerm", "LoanTerm"]),
        arm_fixed_term: l.int(&["armFixedTerm", "ArmFixedTerm"]),
    }
}

fn property(p: Section<'_>) -> ExternalProperty {
    let pick = |field: &EnumField, aliases: Aliases| field.ui_to_pricing(p.value(aliases)).map(str::to_string);

    ExternalProperty {
        state: Some(p.string_or(&["state", "State"], "")),
        county: Some(p.string_or(&["county", "County"], "")),
        property_type: pick(&PROPERTY_TYPE_FIELD, &["propertyType", "PropertyType"]),
        occupancy: pick(&OCCUPANCY_FIELD, &["occupancy", "Occupancy"]),
        units: Some(p.int_or(&["units", "Units"], 1)),
        stories: Some(p.int_or(&["stories", "Stories"], 1)),
        is_non_warrantable_project: p.bool(&["isNonWarrantableProject", "IsNonWarrantableProject"]),
        is_condotel: p.bool(&["isCondotel", "IsCondotel"]),
        is_declining_market: p.bool(&["isDecliningMarket", "IsDecliningMarket"]),
        inspection_waiver: Some(p.bool_or(&["inspectionWaiver", "InspectionWaiver"], false)),
        is_high_cost_county: p.bool(&["isHighCostCounty", "IsHighCostCounty"]),
        address_line1: Some(p.string_or(&["addressLine1", "AddressLine1"], "")),
        address_line2: Some(p.string_or(&["addressLine2", "AddressLine2"], "")),
        city: Some(p.string_or(&["city", "City"], "")),
        county_fips_code: Some(p.string_or(&["countyFipsCode", "CountyFipsCode"], "")),
        zip_code: Some(p.string_or(&["zipCode", "ZipCode"], "")),
        zip_code_plus_four: p
            .string(&["zipCodePlusFour", "ZipCodePlusFour"])
            .filter(|s| !s.is_empty()),
        property_attachment_type: pick(
            &PROPERTY_ATTACHMENT_FIELD,
            &["propertyAttachmentType", "PropertyAttachmentType"],
        ),
        estimated_value: p.decimal(&["estimatedValue", "EstimatedValue"]),
        appraised_value: p.decimal(&["appraisedValue", "AppraisedValue"]),
        lot_size_in_acres: p.decimal(&["lotSizeInAcres", "LotSizeInAcres"]),
        median_income: p.decimal(&["medianIncome", "MedianIncome"]),
    }
}

fn broker_comp_plan(c: Section<'_>) -> ExternalBrokerCompPlan {
    ExternalBrokerCompPlan {
        fixed_amount: c.decimal(&["fixedAmount", "FixedAmount"]),
        percent: c.decimal(&["percent", "Percent"]),
        min_amount: c.decimal(&["minAmount", "MinAmount"]),
        max_amount: c.decimal(&["maxAmount", "MaxAmount"]),
        calculated_amount: c.decimal(&["calculatedAmount", "CalculatedAmount"]),
        calculated_adjustment: c.decimal(&["calculatedAdjustment", "CalculatedAdjustment"]),
        paid_by: PAID_BY_FIELD
            .ui_to_pricing(c.value(&["paidBy", "PaidBy"]))
            .map(str::to_string),
    }
}

fn settings(s: Section<'_>) -> ExternalSettings {
    let operations = match s.get(&["operations", "Operations"]) {
        Some(value) => crate::reader::value_to_string_list(value),
        None => DEFAULT_OPERATIONS.iter().map(|op| (*op).to_string()).collect(),
    };
    ExternalSettings {
        operations,
        return_terse_response: Some(s.bool_or(&["returnTerseResponse", "ReturnTerseResponse"], true)),
        return_terse_product_response: Some(s.bool_or(
            &["returnTerseProductResponse", "ReturnTerseProductResponse"],
            false,
        )),
        return_ineligible_products: Some(s.bool_or(
            &["returnIneligibleProducts", "ReturnIneligibleProducts"],
            false,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn convert(doc: Value) -> Value {
        serde_json::to_value(ui_to_external_pricing_scenario(&UiPricingScenario::new(doc))).unwrap()
    }

    #[test]
    fn unset_terms_and_flags_stay_null() {
        let out = convert(json!({}));
        assert_eq!(out["borrower"]["fico"], Value::Null);
        for key in [
            "rollLenderFee",
            "isSecondCommunityLoan",
            "isSecondPiggyBack",
            "isSecondInvestorSameAsFirst",
            "loanTerm",
            "prepaymentPenaltyPeriodMonths",
        ] {
            assert_eq!(out["loan"][key], Value::Null, "{key}");
        }

        let set = convert(json!({"Loan": {"LoanTerm": 360, "RollLenderFee": false}}));
        assert_eq!(set["loan"]["loanTerm"], json!(360));
        assert_eq!(set["loan"]["rollLenderFee"], json!(false));
    }

    #[test]
    fn empty_input_fills_every_section() {
        let out = convert(json!({}));
        assert_eq!(out["audienceId"], json!("Retail"));
        assert_eq!(out["search"]["position"], json!("First"));
        assert_eq!(out["search"]["desiredLockPeriod"], json!(30));
        assert_eq!(out["loan"]["purpose"], json!("Purchase"));
        assert_eq!(out["loan"]["impounds"], json!("Full"));
        assert_eq!(out["loan"]["aus"], json!("NotSpecified"));
        assert_eq!(out["property"]["occupancy"], json!("PrimaryResidence"));
        assert_eq!(out["property"]["propertyType"], json!("SFR"));
        assert_eq!(out["property"]["units"], json!(1));
        assert_eq!(out["brokerCompPlan"]["paidBy"], json!("Lender"));
        assert_eq!(out["settings"]["operations"], json!(["Eligibility", "Pricing"]));
        assert_eq!(out["settings"]["returnTerseResponse"], json!(true));
        assert_eq!(out["customValues"], json!([]));
        assert_eq!(out["adjustments"], json!([]));
        assert!(out["loan"].get("amount").is_none());
    }

    #[test]
    fn pascal_case_sections_inside_data_envelope() {
        let out = convert(json!({
            "data": {
                "AudienceId": "Wholesale",
                "Search": {"Position": 1, "LoanTerms": [360, 180], "ArmFixedTerms": ["", 5]},
                "Loan": {"Purpose": 7, "Amount": 250000.5, "LTV": "75.000", "Impounds": 1},
                "Property": {"PropertyType": 6, "Occupancy": "SecondHome", "State": "CA"},
                "Borrower": {"FICO": "740", "DTIRatio": 0.36}
            }
        }));
        assert_eq!(out["audienceId"], json!("Wholesale"));
        assert_eq!(out["search"]["position"], json!("Second"));
        assert_eq!(out["search"]["loanTerms"], json!(["360", "180"]));
        assert_eq!(out["search"]["armFixedTerms"], json!(["5"]));
        assert_eq!(out["loan"]["purpose"], json!("CashOutRefinance"));
        assert_eq!(out["loan"]["amount"], json!("250000.5"));
        assert_eq!(out["loan"]["ltv"], json!("75"));
        assert_eq!(out["loan"]["impounds"], json!("Partial"));
        assert_eq!(out["property"]["propertyType"], json!("TwoFourUnit"));
        assert_eq!(out["property"]["occupancy"], json!("SecondHome"));
        assert_eq!(out["property"]["state"], json!("CA"));
        assert_eq!(out["borrower"]["fico"], json!(740));
        assert_eq!(out["borrower"]["dtiRatio"], json!("0.36"));
    }

    #[test]
    fn camel_case_wins_over_pascal_case() {
        let out = convert(json!({
            "loan": {"aus": 2},
            "Loan": {"aus": 3}
        }));
        assert_eq!(out["loan"]["aus"], json!("DU"));
    }

    #[test]
    fn property_value_falls_back_to_purchase_price() {
        let out = convert(json!({"loan": {"purchasePrice": "410000.00"}}));
        assert_eq!(out["loan"]["propertyValue"], json!("410000"));
        assert_eq!(out["loan"]["purchasePrice"], json!("410000"));
    }

    #[test]
    fn unknown_codes_take_fallbacks_and_omissions() {
        let out = convert(json!({
            "loan": {"purpose": 42, "aus": "bogus", "loanType": 99},
            "borrower": {"creditGrade": 77}
        }));
        assert_eq!(out["loan"]["purpose"], json!("Purchase"));
        assert_eq!(out["loan"]["aus"], json!("NotSpecified"));
        assert!(out["loan"].get("loanType").is_none());
        assert!(out["borrower"].get("creditGrade").is_none());
    }

    #[test]
    fn custom_values_accept_pairs_or_mapping() {
        let pairs = convert(json!({"CustomValues": [{"name": "branch", "value": "12"}]}));
        assert_eq!(pairs["customValues"], json!([{"name": "branch", "value": "12"}]));
        let mapping = convert(json!({"customValues": {"branch": "12"}}));
        assert_eq!(mapping["customValues"], json!([{"name": "branch", "value": "12"}]));
    }
}
