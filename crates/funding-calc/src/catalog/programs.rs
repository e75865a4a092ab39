use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgramLevel {
    Provincial,
    Federal,
    Municipal,
    Private,
}

impl ProgramLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Provincial => "Provincial",
            Self::Federal => "Federal",
            Self::Municipal => "Municipal",
            Self::Private => "Private",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgramCategory {
    Grant,
    Loan,
    #[serde(rename = "Tax Credit")]
    TaxCredit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProgramStatus {
    Open,
    Paused,
    Closed,
}

/// Static catalog entry for one funding program.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: &'static str,
    pub name: &'static str,
    pub slug: &'static str,
    pub provider: &'static str,
    pub level: ProgramLevel,
    pub category: ProgramCategory,
    pub description: &'static str,
    /// Dollar cap; 0 means the cap varies with eligible expenses.
    pub funding_max: u64,
    pub funding_percentage: u8,
    pub status: ProgramStatus,
    pub tags: &'static [&'static str],
    pub eligibility: &'static [&'static str],
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub match_reason: &'static [&'static str],
}

pub(super) static PROGRAMS: [Program; 5] = [
    Program {
        id: "1",
        name: "ESSOR - Component 1",
        slug: "essor-component-1",
        provider: "Investissement Québec",
        level: ProgramLevel::Provincial,
        category: ProgramCategory::Loan,
        description: "Support for investment projects in Québec (feasibility studies, digital diagnostics).",
        funding_max: 100_000,
        funding_percentage: 50,
        status: ProgramStatus::Open,
        tags: &["Feasibility", "Digital Diagnostic", "SME"],
        eligibility: &["For-profit businesses in Québec", "Project cost > $20k"],
        match_reason: &["Supports feasibility studies", "Match for Québec SMEs"],
    },
    Program {
        id: "2",
        name: "CDAP - Boost Your Business Technology",
        slug: "cdap-boost",
        provider: "ISED (Federal)",
        level: ProgramLevel::Federal,
        category: ProgramCategory::Grant,
        description: "Get a grant to cover up to 90% of the cost of hiring a digital advisor to develop a digital adoption plan.",
        funding_max: 15_000,
        funding_percentage: 90,
        status: ProgramStatus::Open,
        tags: &["Digital Plan", "Advisory", "Small Business"],
        eligibility: &["Canadian-owned SME", "1-499 employees", "$500k+ revenue"],
        match_reason: &["High coverage (90%)", "Ideal for initial planning"],
    },
    Program {
        id: "3",
        name: "C3i - Investment and Innovation Tax Credit",
        slug: "c3i-tax-credit",
        provider: "Revenu Québec",
        level: ProgramLevel::Provincial,
        category: ProgramCategory::TaxCredit,
        description: "Tax credit for the acquisition of manufacturing and processing equipment, computer equipment, and management software packages.",
        funding_max: 0,
        funding_percentage: 20,
        status: ProgramStatus::Open,
        tags: &["Hardware", "Software", "Manufacturing"],
        eligibility: &["Establishment in Québec", "Eligible equipment expenses > $5k"],
        match_reason: &["Applies to hardware & software", "Refundable tax credit"],
    },
    Program {
        id: "4",
        name: "Productivité innovation",
        slug: "productivite-innovation",
        provider: "Investissement Québec",
        level: ProgramLevel::Provincial,
        category: ProgramCategory::Loan,
        description: "Term loan to support innovative projects and purchase of high-tech equipment to increase productivity.",
        funding_max: 5_000_000,
        funding_percentage: 100,
        status: ProgramStatus::Open,
        tags: &["Productivity", "Equipment", "Innovation"],
        eligibility: &["Profitable SME", "Project aims to increase productivity"],
        match_reason: &["Large funding capacity", "Supports equipment purchase"],
    },
    Program {
        id: "5",
        name: "CanExport SMEs",
        slug: "canexport-smes",
        provider: "Trade Commissioner Service",
        level: ProgramLevel::Federal,
        category: ProgramCategory::Grant,
        description: "Funding to help Canadian SMEs break into new international markets.",
        funding_max: 50_000,
        funding_percentage: 50,
        status: ProgramStatus::Paused,
        tags: &["Export", "International", "Marketing"],
        eligibility: &["SME", "Expanding to new market"],
        match_reason: &["Supports international expansion", "Digital marketing covered"],
    },
];
