//! Testing utilities for the LPG workspace
//!
//! Shared JSON fixtures for the three payload shapes.

#![allow(missing_docs)]
#![recursion_limit = "256"]

use serde_json::{json, Value};

/// A complete purchase loan as the loan service returns it
pub fn sample_loan() -> Value {
    json!({
        "borrower": {
            "firstName": "Jane",
            "lastName": "Doe",
            "fico": 742,
            "dtiRatio": "36.5000",
            "citizenship": "US_CITIZEN",
            "creditGrade": null,
            "incomeMonthly": "12500.0000",
            "isSelfEmployed": false,
            "monthsOfReserves": 6,
            "propertiesOwned": 1,
            "verificationMethod": "FULL",
            "derogatoryEvents": {"deMultBK": 0, "latePmt30x12": 0}
        },
        "loanofficer": {"name": "Pat Lee", "email": "pat@example.com", "assistantEmail": null},
        "property": {
            "addressLine1": "1 Main St",
            "city": "Austin",
            "state": "TX",
            "county": "Travis",
            "zipCode": "78701",
            "occupancy": "PRIMARY",
            "propertyType": "SFR",
            "units": 1,
            "estimatedValue": "450000.0000"
        },
        "brokerCompPlan": {"percent": "1.2500", "paidBy": "LENDER"},
        "customValues": {"branch": "042", "campaign": "spring"},
        "externalCreatedAt": "2025-04-01T12:00:00.000Z",
        "externalModifiedAt": "2025-04-02T08:30:00.000Z",
        "loanNumber": "LN-20001",
        "purpose": "PURCHASE",
        "amount": "360000.0000",
        "rate": "6.1250",
        "productName": "30 Year Fixed",
        "productCode": "C30F",
        "aus": "DU",
        "applicationDate": "2025-04-01",
        "fundedAt": null,
        "ltv": "80.0000",
        "cltv": "80.0000",
        "hcltv": "80.0000",
        "amortizationType": "FIXED",
        "documentationType": "FULL_DOCUMENTATION",
        "cashOutAmount": "0.0000",
        "fhaTotalLoanAmount": null,
        "helocDrawAmount": null,
        "helocLineAmount": "0.0000",
        "isRelocationLoan": false,
        "lenderFee": "1295.0000",
        "isMortgageInsurancePaidByBorrower": true,
        "prepaymentPenaltyPeriodMonths": null,
        "propertyValue": "450000.0000",
        "purchasePrice": "450000.0000",
        "refinancePurpose": "NONE",
        "secondAmount": null,
        "position": "FIRST",
        "isSecondInvestorSameAsFirst": null,
        "isSecondCommunityLoan": null,
        "isSecondPiggyback": null,
        "temporaryBuydownType": "TWO_ONE",
        "loanTerm": 360,
        "loanType": "CONVENTIONAL",
        "usdaTotalLoanAmount": null,
        "vaTotalLoanAmount": null,
        "impoundType": "FULL",
        "rollLenderFee": false,
        "streamlineRefinanceType": null,
        "losLoanId": "LOS-20001"
    })
}

/// A pricing scenario as the pricing service accepts it
pub fn sample_external() -> Value {
    json!({
        "audienceId": "Retail",
        "purpose": "Purchase",
        "borrower": {
            "firstName": "Jane",
            "lastName": "Doe",
            "fico": 742,
            "dtiRatio": "36.5",
            "annualIncome": 150000,
            "verificationMethod": "FullDocument"
        },
        "loan": {
            "amount": "360000",
            "purchasePrice": "450000",
            "propertyValue": "450000",
            "ltv": "80",
            "cltv": "80",
            "hcltv": "80",
            "impounds": "Full",
            "aus": "DU",
            "position": "First",
            "loanType": "Conventional",
            "loanTerm": 360,
            "temporaryBuydownType": "TwoOne"
        },
        "property": {
            "state": "TX",
            "county": "Travis",
            "occupancy": "PrimaryResidence",
            "propertyType": "SFR",
            "units": 1
        },
        "brokerCompPlan": {"percent": "1.25", "paidBy": "Lender"},
        "customValues": [
            {"name": "branch", "value": "042"},
            {"name": "campaign", "value": "spring"}
        ]
    })
}

/// A PE3-style UI request with `PascalCase` sections and integer codes
pub fn sample_ui() -> Value {
    json!({
        "data": {
            "AudienceId": "Wholesale",
            "Search": {"Position": 0, "DesiredLockPeriod": 45, "LoanTerms": [360, 180]},
            "Borrower": {"FirstName": "Jane", "FICO": 742, "Income": 150000, "Citizenship": 4},
            "Loan": {
                "Purpose": 1,
                "Amount": 360000,
                "PurchasePrice": "450000.00",
                "LTV": 80,
                "Impounds": 2,
                "AUS": 2,
                "LoanType": 1
            },
            "Property": {"State": "TX", "Occupancy": 1, "PropertyType": 1, "Units": "1"},
            "BrokerCompPlan": {"Percent": 1.25, "PaidBy": 1},
            "CustomValues": [{"name": "branch", "value": "042"}]
        }
    })
}

/// Enumeration document in the `{field: {enum: [...]}}` layout
pub fn sample_enum_metadata() -> Value {
    json!({
        "aus": {"enum": ["NONE", "MANUAL", "DU", "LP", "OTHER", "NOT_SPECIFIED"]},
        "occupancy": {"enum": ["PRIMARY", "SECONDARY", "INVESTMENT", null]},
        "propertyType": {"enum": ["SFR", "CONDO", "PUD", "MULTI_UNIT"]},
        "purpose": {"enum": ["PURCHASE", "CASH_OUT_REFINANCE", "NO_CASH_OUT_REFINANCE"]},
        "amount": {"type": "string", "format": "decimal"}
    })
}
