//! Loan ⇄ pricing domains, UI code tables and per-field fallbacks

use super::field::{EnumField, Fallback};
use super::{EnumDomain, UiCodeTable};

// ---------------------------------------------------------------------------
// Loan ⇄ pricing domains
// ---------------------------------------------------------------------------

/// `aus`
pub const AUS: EnumDomain = EnumDomain::new(
    "AUS",
    &[
        ("NONE", "None"),
        ("MANUAL", "Manual"),
        ("DU", "DU"),
        ("LP", "LP"),
        ("OTHER", "Other"),
        ("NOT_SPECIFIED", "NotSpecified"),
    ],
);

/// Loan `impoundType` / pricing `impounds`
pub const IMPOUNDS: EnumDomain = EnumDomain::new(
    "Impounds",
    &[("NONE", "None"), ("PARTIAL", "Partial"), ("FULL", "Full")],
);

/// `property.occupancy`
pub const OCCUPANCY: EnumDomain = EnumDomain::new(
    "Occupancy",
    &[
        ("NONE", "None"),
        ("PRIMARY", "PrimaryResidence"),
        ("SECONDARY", "SecondHome"),
        ("INVESTMENT", "InvestmentProperty"),
    ],
);

/// `property.propertyType`
pub const PROPERTY_TYPE: EnumDomain = EnumDomain::new(
    "PropertyType",
    &[
        ("SFR", "SFR"),
        ("CONDO", "Condominium"),
        ("PUD", "PUD"),
        ("MOBILE", "Mobile"),
        ("MULTI_UNIT", "TwoFourUnit"),
        ("COOP", "Cooperative"),
        ("TOWNHOME", "Townhome"),
        ("MULTI_FAMILY", "Multifamily"),
        ("COMMERCIAL", "Commercial"),
        ("MIXED_USE", "MixedUse"),
        ("FARM", "Farm"),
        ("HOME_BUSINESS", "HomeAndBusiness"),
        ("LAND", "Land"),
        ("MANUFACTURED_SINGLE", "ManufacturedSingleWide"),
        ("MANUFACTURED_DOUBLE", "ManufacturedDoubleWide"),
    ],
);

/// `streamlineRefinanceType`
pub const STREAMLINE_REFINANCE_TYPE: EnumDomain = EnumDomain::new(
    "StreamlineRefinanceType",
    &[
        ("NONE", "None"),
        ("NO_CASHOUT_STREAMLINED_REFINANCE", "NoCashoutStreamlinedRefinance"),
        ("NO_CASHOUT_FHA_STREAMLINED_REFINANCE", "NoCashoutFHAStreamlinedRefinance"),
    ],
);

/// `temporaryBuydownType`
pub const TEMPORARY_BUYDOWN_TYPE: EnumDomain = EnumDomain::new(
    "TemporaryBuydownType",
    &[
        ("NONE", "None"),
        ("THREE_TWO_ONE", "ThreeTwoOne"),
        ("TWO_ONE", "TwoOne"),
        ("ONE_ONE", "OneOne"),
        ("ONE_ZERO", "OneZero"),
    ],
);

/// Loan `purpose`
pub const LOAN_PURPOSE: EnumDomain = EnumDomain::new(
    "LoanPurpose",
    &[
        ("NONE", "None"),
        ("PURCHASE", "Purchase"),
        ("NO_CASH_OUT_REFINANCE", "NoCashOutRefinance"),
        ("CASH_OUT_REFINANCE", "CashOutRefinance"),
        ("REFINANCE", "Refinance"),
        ("CONSTRUCTION", "Construction"),
        ("CONSTRUCTION_PERM", "ConstructionPerm"),
        ("OTHER", "Other"),
    ],
);

/// `borrower.verificationMethod`
pub const VERIFICATION_METHOD: EnumDomain = EnumDomain::new(
    "VerificationMethod",
    &[
        ("FULL", "FullDocument"),
        ("BANK_STATEMENT", "BankStatement"),
        ("VOE", "VOE"),
        ("ASSET_QUALIFICATION", "AssetQualification"),
        ("1099", "Method1099"),
        ("DSCR", "DSCR"),
        ("CPAP_AND_L", "CPAPAndL"),
    ],
);

/// `borrower.creditGrade`
pub const CREDIT_GRADE: EnumDomain = EnumDomain::new(
    "CreditGrade",
    &[
        ("A", "A"),
        ("B", "B"),
        ("C", "C"),
        ("D", "D"),
        ("A_PLUS", "APlus"),
        ("B_MINUS", "BMinus"),
        ("AAA", "AAA"),
        ("AA", "AA"),
        ("A_MINUS", "AMinus"),
        ("BB", "BB"),
        ("B_PLUS", "BPlus"),
        ("C_MINUS", "CMinus"),
        ("BBB", "BBB"),
        ("CCC", "CCC"),
        ("CC", "CC"),
        ("C_PLUS", "CPlus"),
        ("DDD", "DDD"),
        ("DD", "DD"),
        ("D_PLUS", "DPlus"),
        ("D_MINUS", "DMinus"),
    ],
);

/// `prepaymentPenaltyStructureType`
pub const PREPAY_PENALTY_STRUCTURE_TYPE: EnumDomain = EnumDomain::new(
    "PrepayPenaltyStructureType",
    &[
        ("NONE", "None"),
        ("NO_PREPAY", "NoPrepay"),
        ("FIXED", "Fixed"),
        ("DECLINING", "Declining"),
        ("SIX_MONTHS_INTEREST", "SixMonthsInterest"),
    ],
);

/// `prepaymentPenaltyStructure`
///
/// The pricing side has no published spelling beyond the recapitalized
/// loan key, so the table pins those spellings down explicitly.
pub const PREPAY_PENALTY_STRUCTURE: EnumDomain = EnumDomain::new(
    "PrepayPenaltyStructure",
    &[
        ("NONE", "None"),
        ("PPS_1", "Pps1"),
        ("PPS_1_1_1", "Pps111"),
        ("PPS_2_1", "Pps21"),
        ("PPS_2_2", "Pps22"),
        ("PPS_3_6_20", "Pps3620"),
        ("PPS_3_6", "Pps36"),
        ("PPS_3_2_1", "Pps321"),
        ("PPS_3_3_3", "Pps333"),
        ("PPS_4_3_2_1", "Pps4321"),
        ("PPS_4_4_4_4", "Pps4444"),
        ("PPS_5", "Pps5"),
        ("PPS_5_4_3_2_1", "Pps54321"),
        ("PPS_5_5", "Pps55"),
        ("PPS_5_5_4_4_3_2_1", "Pps5544321"),
        ("PPS_5_5_5", "Pps555"),
        ("PPS_5_5_5_5", "Pps5555"),
        ("PPS_5_5_5_5_5", "Pps55555"),
    ],
);

/// `property.propertyAttachmentType`
pub const PROPERTY_ATTACHMENT_TYPE: EnumDomain = EnumDomain::new(
    "PropertyAttachmentType",
    &[
        ("UNSPECIFIED", "Unspecified"),
        ("DETACHED", "Detached"),
        ("ATTACHED", "Attached"),
    ],
);

/// `borrower.citizenship`
pub const CITIZENSHIP: EnumDomain = EnumDomain::new(
    "Citizenship",
    &[
        ("NONE", "None"),
        ("FOREIGN_NATIONAL", "ForeignNational"),
        ("NON_PERMANENT_RESIDENT_ALIEN", "NonPermanentResidentAlien"),
        ("PERMANENT_RESIDENT_ALIEN", "PermanentResidentAlien"),
        ("US_CITIZEN", "USCitizen"),
        ("US_CITIZEN_ABROAD", "USCitizenAbroad"),
    ],
);

/// `borrower.employmentDocumentationMethod`
pub const EMPLOYMENT_DOCUMENTATION: EnumDomain = EnumDomain::new(
    "EmploymentDocumentationMethod",
    &[("NONE", "None"), ("STATED", "Stated"), ("VERIFIED", "Verified")],
);

/// `loanType`
pub const LOAN_TYPE: EnumDomain = EnumDomain::new(
    "LoanType",
    &[
        ("NONE", "None"),
        ("CONVENTIONAL", "Conventional"),
        ("FHA", "FHA"),
        ("VA", "VA"),
        ("USDA", "USDA"),
        ("JUMBO", "Jumbo"),
        ("NON_QM", "NonQM"),
        ("HELOC", "HELOC"),
    ],
);

/// `position` (loan and search)
pub const LOAN_POSITION: EnumDomain = EnumDomain::new(
    "LoanPosition",
    &[
        ("FIRST", "First"),
        ("SECOND", "Second"),
        ("HELOC", "HELOC"),
        ("THIRD", "Third"),
    ],
);

/// `refinancePurpose`
pub const REFINANCE_PURPOSE: EnumDomain = EnumDomain::new(
    "RefinancePurpose",
    &[
        ("NONE", "None"),
        ("NO_CASH_OUT", "NoCashOut"),
        ("CASH_OUT", "CashOut"),
        ("LIMITED_CASH_OUT", "LimitedCashOut"),
        ("HOME_IMPROVEMENT", "HomeImprovement"),
        ("DEBT_CONSOLIDATION", "DebtConsolidation"),
        ("OTHER", "Other"),
    ],
);

/// `fhaFinancingOption`, `usdaFinancingOption`, `vaFinancingOption`
pub const FINANCING_OPTION: EnumDomain = EnumDomain::new(
    "FinancingOption",
    &[("FINANCE", "Finance"), ("PAID_IN_CASH", "PaidInCash")],
);

/// `vaLoanHistory`
pub const VA_LOAN_HISTORY: EnumDomain = EnumDomain::new(
    "VaLoanHistory",
    &[("FIRST_USE", "FirstUse"), ("REPEAT_USE", "RepeatUse")],
);

/// `brokerCompPlan.paidBy`
pub const BROKER_PAID_BY: EnumDomain = EnumDomain::new(
    "BrokerPaidBy",
    &[("LENDER", "Lender"), ("BORROWER", "Borrower"), ("SPLIT", "Split")],
);

/// Every domain, for table-wide checks
pub const ALL_DOMAINS: &[EnumDomain] = &[
    AUS,
    IMPOUNDS,
    OCCUPANCY,
    PROPERTY_TYPE,
    STREAMLINE_REFINANCE_TYPE,
    TEMPORARY_BUYDOWN_TYPE,
    LOAN_PURPOSE,
    VERIFICATION_METHOD,
    CREDIT_GRADE,
    PREPAY_PENALTY_STRUCTURE_TYPE,
    PREPAY_PENALTY_STRUCTURE,
    PROPERTY_ATTACHMENT_TYPE,
    CITIZENSHIP,
    EMPLOYMENT_DOCUMENTATION,
    LOAN_TYPE,
    LOAN_POSITION,
    REFINANCE_PURPOSE,
    FINANCING_OPTION,
    VA_LOAN_HISTORY,
    BROKER_PAID_BY,
];

// ---------------------------------------------------------------------------
// UI code tables
// ---------------------------------------------------------------------------

/// UI `loan.purpose`
pub const UI_LOAN_PURPOSE: UiCodeTable = UiCodeTable::new(
    "LoanPurpose",
    &[
        (1, "Purchase"),
        (2, "Refinance"),
        (3, "Construction"),
        (4, "ConstructionPerm"),
        (5, "Other"),
        (6, "NoCashOutRefinance"),
        (7, "CashOutRefinance"),
    ],
);

/// UI `loan.refinancePurpose`
pub const UI_REFINANCE_PURPOSE: UiCodeTable = UiCodeTable::new(
    "RefinancePurpose",
    &[
        (0, "None"),
        (1, "NoCashOut"),
        (2, "CashOut"),
        (3, "LimitedCashOut"),
        (4, "HomeImprovement"),
        (5, "DebtConsolidation"),
        (6, "Other"),
    ],
);

/// UI `property.occupancy`
pub const UI_OCCUPANCY: UiCodeTable = UiCodeTable::new(
    "Occupancy",
    &[
        (0, "None"),
        (1, "PrimaryResidence"),
        (2, "SecondHome"),
        (3, "InvestmentProperty"),
    ],
);

/// UI `property.propertyType`
///
/// Code 4 is unassigned.
pub const UI_PROPERTY_TYPE: UiCodeTable = UiCodeTable::new(
    "PropertyType",
    &[
        (1, "SFR"),
        (2, "Condominium"),
        (3, "PUD"),
        (5, "Mobile"),
        (6, "TwoFourUnit"),
        (7, "Cooperative"),
        (8, "Townhome"),
        (9, "Multifamily"),
        (10, "Commercial"),
        (11, "MixedUse"),
        (12, "Farm"),
        (13, "HomeAndBusiness"),
        (14, "Land"),
        (15, "ManufacturedSingleWide"),
        (16, "ManufacturedDoubleWide"),
    ],
);

/// UI `loan.impounds`
pub const UI_IMPOUNDS: UiCodeTable =
    UiCodeTable::new("Impounds", &[(0, "None"), (1, "Partial"), (2, "Full")]);

/// UI `loan.loanType`
pub const UI_LOAN_TYPE: UiCodeTable = UiCodeTable::new(
    "LoanType",
    &[
        (1, "Conventional"),
        (2, "FHA"),
        (3, "VA"),
        (4, "USDA"),
        (5, "Jumbo"),
        (8, "NonQM"),
        (9, "HELOC"),
    ],
);

/// UI `search.position` / `loan.position`
pub const UI_LOAN_POSITION: UiCodeTable = UiCodeTable::new(
    "LoanPosition",
    &[(0, "First"), (1, "Second"), (2, "HELOC"), (3, "Third")],
);

/// UI `borrower.employmentDocumentationMethod`
pub const UI_EMPLOYMENT_DOCUMENTATION: UiCodeTable = UiCodeTable::new(
    "EmploymentDocumentationMethod",
    &[(0, "None"), (1, "Stated"), (2, "Verified")],
);

/// UI `borrower.verificationMethod`
pub const UI_VERIFICATION_METHOD: UiCodeTable = UiCodeTable::new(
    "VerificationMethod",
    &[
        (1, "FullDocument"),
        (2, "BankStatement"),
        (3, "VOE"),
        (4, "AssetQualification"),
        (5, "DSCR"),
        (6, "Method1099"),
        (7, "CPAPAndL"),
    ],
);

/// UI `borrower.citizenship`
pub const UI_CITIZENSHIP: UiCodeTable = UiCodeTable::new(
    "Citizenship",
    &[
        (0, "None"),
        (1, "ForeignNational"),
        (2, "NonPermanentResidentAlien"),
        (3, "PermanentResidentAlien"),
        (4, "USCitizen"),
        (5, "USCitizenAbroad"),
    ],
);

/// UI `loan.temporaryBuydownType`
pub const UI_TEMPORARY_BUYDOWN: UiCodeTable = UiCodeTable::new(
    "TemporaryBuydown",
    &[
        (0, "None"),
        (1, "ThreeTwoOne"),
        (2, "TwoOne"),
        (3, "OneOne"),
        (4, "OneZero"),
    ],
);

/// UI `property.propertyAttachmentType`
pub const UI_PROPERTY_ATTACHMENT: UiCodeTable = UiCodeTable::new(
    "PropertyAttachment",
    &[(0, "Unspecified"), (1, "Detached"), (2, "Attached")],
);

/// UI `loan.aus`
pub const UI_AUS: UiCodeTable = UiCodeTable::new(
    "AUS",
    &[
        (0, "None"),
        (1, "Manual"),
        (2, "DU"),
        (3, "LP"),
        (4, "Other"),
        (5, "NotSpecified"),
    ],
);

/// UI `loan.streamlineRefinanceType`
pub const UI_STREAMLINE_REFINANCE_TYPE: UiCodeTable = UiCodeTable::new(
    "StreamlineRefinanceType",
    &[
        (0, "None"),
        (1, "NoCashoutStreamlinedRefinance"),
        (2, "NoCashoutFHAStreamlinedRefinance"),
    ],
);

/// UI `loan.prepaymentPenaltyStructureType`
pub const UI_PREPAY_PENALTY_STRUCTURE_TYPE: UiCodeTable = UiCodeTable::new(
    "PrepayPenaltyStructureType",
    &[
        (0, "None"),
        (1, "NoPrepay"),
        (2, "Fixed"),
        (3, "Declining"),
        (4, "SixMonthsInterest"),
    ],
);

/// UI `borrower.creditGrade`
pub const UI_CREDIT_GRADE: UiCodeTable = UiCodeTable::new(
    "CreditGrade",
    &[
        (1, "A"),
        (2, "B"),
        (3, "C"),
        (4, "D"),
        (5, "APlus"),
        (6, "BMinus"),
        (7, "AAA"),
        (8, "AA"),
        (9, "AMinus"),
        (10, "BB"),
        (11, "BPlus"),
        (12, "CMinus"),
        (13, "BBB"),
        (14, "CCC"),
        (15, "CC"),
        (16, "CPlus"),
        (17, "DDD"),
        (18, "DD"),
        (19, "DPlus"),
        (20, "DMinus"),
    ],
);

/// UI `brokerCompPlan.paidBy`
pub const UI_BROKER_PAID_BY: UiCodeTable =
    UiCodeTable::new("BrokerPaidBy", &[(1, "Lender"), (2, "Borrower"), (3, "Split")]);

/// UI `loan.*FinancingOption`
pub const UI_FINANCING_OPTION: UiCodeTable =
    UiCodeTable::new("FinancingOption", &[(1, "Finance"), (2, "PaidInCash")]);

/// UI `loan.vaLoanHistory`
pub const UI_VA_LOAN_HISTORY: UiCodeTable =
    UiCodeTable::new("VaLoanHistory", &[(1, "FirstUse"), (2, "RepeatUse")]);

// ---------------------------------------------------------------------------
// Per-field policy
// ---------------------------------------------------------------------------

/// Field-level policy shared by every converter
pub mod policy {
    use super::*;

    /// `loan.aus`
    pub const AUS_FIELD: EnumField = EnumField::new(
        "aus",
        AUS,
        Some(UI_AUS),
        Fallback::everywhere("NOT_SPECIFIED", "NotSpecified"),
    );

    /// Loan `impoundType` / pricing `loan.impounds`
    pub const IMPOUNDS_FIELD: EnumField = EnumField::new(
        "impounds",
        IMPOUNDS,
        Some(UI_IMPOUNDS),
        Fallback::everywhere("FULL", "Full"),
    );

    /// `property.occupancy`
    pub const OCCUPANCY_FIELD: EnumField = EnumField::new(
        "occupancy",
        OCCUPANCY,
        Some(UI_OCCUPANCY),
        Fallback::everywhere("PRIMARY", "PrimaryResidence"),
    );

    /// `property.propertyType`
    pub const PROPERTY_TYPE_FIELD: EnumField = EnumField::new(
        "propertyType",
        PROPERTY_TYPE,
        Some(UI_PROPERTY_TYPE),
        Fallback::everywhere("SFR", "SFR"),
    );

    /// `streamlineRefinanceType`: pricing defaults to `None`, loan stays null
    pub const STREAMLINE_FIELD: EnumField = EnumField::new(
        "streamlineRefinanceType",
        STREAMLINE_REFINANCE_TYPE,
        Some(UI_STREAMLINE_REFINANCE_TYPE),
        Fallback::pricing_only("None"),
    );

    /// `temporaryBuydownType`: pricing defaults to `None`, loan stays null
    pub const BUYDOWN_FIELD: EnumField = EnumField::new(
        "temporaryBuydownType",
        TEMPORARY_BUYDOWN_TYPE,
        Some(UI_TEMPORARY_BUYDOWN),
        Fallback::pricing_only("None"),
    );

    /// Purpose: loans default to `PURCHASE`, UI input to `Purchase`; a loan
    /// purpose that does not map is omitted from the pricing request
    pub const PURPOSE_FIELD: EnumField = EnumField::new(
        "purpose",
        LOAN_PURPOSE,
        Some(UI_LOAN_PURPOSE),
        Fallback {
            loan: Some("PURCHASE"),
            pricing: None,
            ui: Some("Purchase"),
        },
    );

    /// `refinancePurpose`
    pub const REFINANCE_PURPOSE_FIELD: EnumField = EnumField::new(
        "refinancePurpose",
        REFINANCE_PURPOSE,
        Some(UI_REFINANCE_PURPOSE),
        Fallback::everywhere("NONE", "None"),
    );

    /// `position`
    pub const POSITION_FIELD: EnumField = EnumField::new(
        "position",
        LOAN_POSITION,
        Some(UI_LOAN_POSITION),
        Fallback::everywhere("FIRST", "First"),
    );

    /// `property.propertyAttachmentType`
    pub const PROPERTY_ATTACHMENT_FIELD: EnumField = EnumField::new(
        "propertyAttachmentType",
        PROPERTY_ATTACHMENT_TYPE,
        Some(UI_PROPERTY_ATTACHMENT),
        Fallback::pricing_only("Unspecified"),
    );

    /// `brokerCompPlan.paidBy`
    pub const PAID_BY_FIELD: EnumField = EnumField::new(
        "paidBy",
        BROKER_PAID_BY,
        Some(UI_BROKER_PAID_BY),
        Fallback::pricing_only("Lender"),
    );

    /// `borrower.verificationMethod`
    pub const VERIFICATION_METHOD_FIELD: EnumField = EnumField::new(
        "verificationMethod",
        VERIFICATION_METHOD,
        Some(UI_VERIFICATION_METHOD),
        Fallback::OMIT,
    );

    /// `borrower.creditGrade`
    pub const CREDIT_GRADE_FIELD: EnumField = EnumField::new(
        "creditGrade",
        CREDIT_GRADE,
        Some(UI_CREDIT_GRADE),
        Fallback::OMIT,
    );

    /// `borrower.citizenship`
    pub const CITIZENSHIP_FIELD: EnumField = EnumField::new(
        "citizenship",
        CITIZENSHIP,
        Some(UI_CITIZENSHIP),
        Fallback::OMIT,
    );

    /// `borrower.employmentDocumentationMethod`
    pub const EMPLOYMENT_DOCUMENTATION_FIELD: EnumField = EnumField::new(
        "employmentDocumentationMethod",
        EMPLOYMENT_DOCUMENTATION,
        Some(UI_EMPLOYMENT_DOCUMENTATION),
        Fallback::OMIT,
    );

    /// `loanType`
    pub const LOAN_TYPE_FIELD: EnumField =
        EnumField::new("loanType", LOAN_TYPE, Some(UI_LOAN_TYPE), Fallback::OMIT);

    /// `prepaymentPenaltyStructureType`
    pub const PREPAY_TYPE_FIELD: EnumField = EnumField::new(
        "prepaymentPenaltyStructureType",
        PREPAY_PENALTY_STRUCTURE_TYPE,
        Some(UI_PREPAY_PENALTY_STRUCTURE_TYPE),
        Fallback::OMIT,
    );

    /// `prepaymentPenaltyStructure` (no UI codes)
    pub const PREPAY_STRUCTURE_FIELD: EnumField = EnumField::new(
        "prepaymentPenaltyStructure",
        PREPAY_PENALTY_STRUCTURE,
        None,
        Fallback::OMIT,
    );

    /// `fha/usda/vaFinancingOption`
    pub const FINANCING_OPTION_FIELD: EnumField = EnumField::new(
        "financingOption",
        FINANCING_OPTION,
        Some(UI_FINANCING_OPTION),
        Fallback::OMIT,
    );

    /// `vaLoanHistory`
    pub const VA_LOAN_HISTORY_FIELD: EnumField = EnumField::new(
        "vaLoanHistory",
        VA_LOAN_HISTORY,
        Some(UI_VA_LOAN_HISTORY),
        Fallback::OMIT,
    );
}
