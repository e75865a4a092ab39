//! Closed option sets offered by the intake wizard.
//!
//! Every enum serializes to the stable identifier stored in persisted form
//! state and sent to the scoring backend; `label()` is the text shown to users.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Montreal,
    QuebecCity,
    Laval,
    Monteregie,
    Laurentides,
    Lanaudiere,
    Estrie,
    Outaouais,
    Mauricie,
    Saguenay,
    BasStLaurent,
    Gaspesie,
    Abitibi,
    CoteNord,
    NordDuQuebec,
    OutsideQc,
}

impl Region {
    pub const fn ordered() -> [Self; 16] {
        [
            Self::Montreal,
            Self::QuebecCity,
            Self::Laval,
            Self::Monteregie,
            Self::Laurentides,
            Self::Lanaudiere,
            Self::Estrie,
            Self::Outaouais,
            Self::Mauricie,
            Self::Saguenay,
            Self::BasStLaurent,
            Self::Gaspesie,
            Self::Abitibi,
            Self::CoteNord,
            Self::NordDuQuebec,
            Self::OutsideQc,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Montreal => "Montréal",
            Self::QuebecCity => "Québec City",
            Self::Laval => "Laval",
            Self::Monteregie => "Montérégie",
            Self::Laurentides => "Laurentides",
            Self::Lanaudiere => "Lanaudière",
            Self::Estrie => "Estrie",
            Self::Outaouais => "Outaouais",
            Self::Mauricie => "Mauricie",
            Self::Saguenay => "Saguenay–Lac-Saint-Jean",
            Self::BasStLaurent => "Bas-Saint-Laurent",
            Self::Gaspesie => "Gaspésie–Îles-de-la-Madeleine",
            Self::Abitibi => "Abitibi-Témiscamingue",
            Self::CoteNord => "Côte-Nord",
            Self::NordDuQuebec => "Nord-du-Québec",
            Self::OutsideQc => "Outside Québec",
        }
    }

    pub const fn is_in_quebec(self) -> bool {
        !matches!(self, Self::OutsideQc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegalEntity {
    Incorporated,
    SoleProprietorship,
    Partnership,
    NonProfit,
    Other,
}

impl LegalEntity {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Incorporated,
            Self::SoleProprietorship,
            Self::Partnership,
            Self::NonProfit,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Incorporated => "Incorporated company (Inc. / Ltd. / S.A.)",
            Self::SoleProprietorship => "Sole proprietorship",
            Self::Partnership => "Partnership",
            Self::NonProfit => "Non-profit organization",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Manufacturing,
    Retail,
    Ecommerce,
    ProfessionalServices,
    Construction,
    Hospitality,
    Logistics,
    AgriFood,
    Tech,
    Health,
    Education,
    Other,
}

impl Industry {
    pub const fn ordered() -> [Self; 12] {
        [
            Self::Manufacturing,
            Self::Retail,
            Self::Ecommerce,
            Self::ProfessionalServices,
            Self::Construction,
            Self::Hospitality,
            Self::Logistics,
            Self::AgriFood,
            Self::Tech,
            Self::Health,
            Self::Education,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Manufacturing => "Manufacturing / industrial",
            Self::Retail => "Retail (physical stores)",
            Self::Ecommerce => "E-commerce / online retail",
            Self::ProfessionalServices => "Professional services / consulting",
            Self::Construction => "Construction / real estate",
            Self::Hospitality => "Hospitality / tourism / restaurants",
            Self::Logistics => "Transportation / logistics",
            Self::AgriFood => "Agriculture / agri-food",
            Self::Tech => "Technology / software / digital services",
            Self::Health => "Health / social services",
            Self::Education => "Education / training",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EmployeeBand {
    #[serde(rename = "1-4")]
    OneToFour,
    #[serde(rename = "5-9")]
    FiveToNine,
    #[serde(rename = "10-49")]
    TenToFortyNine,
    #[serde(rename = "50-99")]
    FiftyToNinetyNine,
    #[serde(rename = "100-249")]
    HundredToTwoFortyNine,
    #[serde(rename = "250+")]
    TwoFiftyPlus,
}

impl EmployeeBand {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::OneToFour,
            Self::FiveToNine,
            Self::TenToFortyNine,
            Self::FiftyToNinetyNine,
            Self::HundredToTwoFortyNine,
            Self::TwoFiftyPlus,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::OneToFour => "1–4",
            Self::FiveToNine => "5–9",
            Self::TenToFortyNine => "10–49",
            Self::FiftyToNinetyNine => "50–99",
            Self::HundredToTwoFortyNine => "100–249",
            Self::TwoFiftyPlus => "250+",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RevenueBand {
    #[serde(rename = "<250k")]
    Under250K,
    #[serde(rename = "250k-999k")]
    Under1M,
    #[serde(rename = "1m-4_9m")]
    Under5M,
    #[serde(rename = "5m-9_9m")]
    Under10M,
    #[serde(rename = "10m-49_9m")]
    Under50M,
    #[serde(rename = "50m+")]
    FiftyMillionPlus,
}

impl RevenueBand {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Under250K,
            Self::Under1M,
            Self::Under5M,
            Self::Under10M,
            Self::Under50M,
            Self::FiftyMillionPlus,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under250K => "Less than $250K",
            Self::Under1M => "$250K – $999K",
            Self::Under5M => "$1M – $4.9M",
            Self::Under10M => "$5M – $9.9M",
            Self::Under50M => "$10M – $49.9M",
            Self::FiftyMillionPlus => "$50M and above",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportScope {
    #[default]
    QcOnly,
    Canada,
    OutsideCanada,
    Both,
}

impl ExportScope {
    pub const fn label(self) -> &'static str {
        match self {
            Self::QcOnly => "Québec only",
            Self::Canada => "Elsewhere in Canada",
            Self::OutsideCanada => "Outside Canada",
            Self::Both => "Canada and international",
        }
    }
}

/// Tools the business already runs today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolTag {
    Accounting,
    Erp,
    Crm,
    Ecommerce,
    PointOfSale,
    BusinessIntelligence,
    IndustrialAutomation,
    CustomSoftware,
    BasicTools,
}

impl ToolTag {
    pub const fn ordered() -> [Self; 9] {
        [
            Self::Accounting,
            Self::Erp,
            Self::Crm,
            Self::Ecommerce,
            Self::PointOfSale,
            Self::BusinessIntelligence,
            Self::IndustrialAutomation,
            Self::CustomSoftware,
            Self::BasicTools,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Accounting => "Accounting software (QuickBooks, Sage, Acomba, etc.)",
            Self::Erp => "ERP (Odoo, SAP, NetSuite, etc.)",
            Self::Crm => "CRM",
            Self::Ecommerce => "E-commerce platform (Shopify, WooCommerce, etc.)",
            Self::PointOfSale => "POS system",
            Self::BusinessIntelligence => {
                "Business intelligence / dashboards (Power BI, Looker, etc.)"
            }
            Self::IndustrialAutomation => "Industrial automation / robots / Industry 4.0",
            Self::CustomSoftware => "Custom internal software",
            Self::BasicTools => "None / very basic tools",
        }
    }
}

/// Digital maturity, ordered from least to most mature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DigitalLevel {
    Beginning,
    Disconnected,
    FairlyDigital,
    Advanced,
}

impl DigitalLevel {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Beginning,
            Self::Disconnected,
            Self::FairlyDigital,
            Self::Advanced,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginning => "We are at the very beginning (mostly manual, Excel, paper).",
            Self::Disconnected => {
                "We have some digital tools, but they are not connected and create extra work."
            }
            Self::FairlyDigital => {
                "We are fairly digital, but we want to improve and automate more."
            }
            Self::Advanced => {
                "We are advanced and want to go into AI, predictive, or new automation."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    Erp,
    Crm,
    Website,
    Ecommerce,
    SystemIntegration,
    BusinessIntelligence,
    ProductionAutomation,
    ArtificialIntelligence,
    Cybersecurity,
    StaffTraining,
    Other,
}

impl ProjectType {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Erp,
            Self::Crm,
            Self::Website,
            Self::Ecommerce,
            Self::SystemIntegration,
            Self::BusinessIntelligence,
            Self::ProductionAutomation,
            Self::ArtificialIntelligence,
            Self::Cybersecurity,
            Self::StaffTraining,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Erp => "Implement or change ERP",
            Self::Crm => "Implement or change CRM",
            Self::Website => "Build or rebuild company website",
            Self::Ecommerce => "Launch or improve e-commerce store",
            Self::SystemIntegration => {
                "Connect systems / workflow automation (APIs, integrations, etc.)"
            }
            Self::BusinessIntelligence => "Implement or upgrade BI / dashboards / data platform",
            Self::ProductionAutomation => {
                "Automate or modernize production (Industry 4.0, sensors, machines)"
            }
            Self::ArtificialIntelligence => {
                "Implement AI / machine learning (forecasting, quality control, etc.)"
            }
            Self::Cybersecurity => "Improve cybersecurity / data protection",
            Self::StaffTraining => "Train staff on digital tools and new processes",
            Self::Other => "Other digital project",
        }
    }

    /// Projects that grow the online presence or online sales.
    pub const fn is_online_presence(self) -> bool {
        matches!(self, Self::Website | Self::Ecommerce)
    }

    /// Projects that touch production processes or automation.
    pub const fn is_production(self) -> bool {
        matches!(self, Self::ProductionAutomation | Self::SystemIntegration)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeline {
    #[serde(rename = "within_3_months")]
    WithinThreeMonths,
    #[serde(rename = "3_6_months")]
    ThreeToSixMonths,
    #[serde(rename = "6_12_months")]
    SixToTwelveMonths,
    #[serde(rename = "over_12_months")]
    OverTwelveMonths,
    #[serde(rename = "not_sure")]
    NotSure,
}

impl Timeline {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::WithinThreeMonths,
            Self::ThreeToSixMonths,
            Self::SixToTwelveMonths,
            Self::OverTwelveMonths,
            Self::NotSure,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::WithinThreeMonths => "Within the next 3 months",
            Self::ThreeToSixMonths => "In 3–6 months",
            Self::SixToTwelveMonths => "In 6–12 months",
            Self::OverTwelveMonths => "In more than 12 months",
            Self::NotSure => "Not sure yet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainGoal {
    Efficiency,
    OnlineSales,
    Both,
    Other,
}

impl MainGoal {
    pub const fn ordered() -> [Self; 4] {
        [Self::Efficiency, Self::OnlineSales, Self::Both, Self::Other]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Efficiency => "Improve internal efficiency and productivity",
            Self::OnlineSales => "Increase online sales and marketing reach",
            Self::Both => "Both: improve production AND online presence / sales",
            Self::Other => "Other",
        }
    }
}

/// How far the project has been written down, from idea to supplier quotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectDetailLevel {
    Idea,
    InternalNotes,
    WrittenRoadmap,
    SupplierQuotes,
}

impl ProjectDetailLevel {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Idea,
            Self::InternalNotes,
            Self::WrittenRoadmap,
            Self::SupplierQuotes,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Idea => "Just an idea; nothing written yet",
            Self::InternalNotes => "We have internal notes and a rough description",
            Self::WrittenRoadmap => "We have a clear written project plan / digital roadmap",
            Self::SupplierQuotes => "We already have written quotes from suppliers",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BudgetRange {
    #[serde(rename = "<20k")]
    Under20K,
    #[serde(rename = "20k-49k")]
    Under50K,
    #[serde(rename = "50k-99k")]
    Under100K,
    #[serde(rename = "100k-249k")]
    Under250K,
    #[serde(rename = "250k-499k")]
    Under500K,
    #[serde(rename = "500k+")]
    FiveHundredKPlus,
}

impl BudgetRange {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Under20K,
            Self::Under50K,
            Self::Under100K,
            Self::Under250K,
            Self::Under500K,
            Self::FiveHundredKPlus,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Under20K => "Less than $20K",
            Self::Under50K => "$20K – $49K",
            Self::Under100K => "$50K – $99K",
            Self::Under250K => "$100K – $249K",
            Self::Under500K => "$250K – $499K",
            Self::FiveHundredKPlus => "$500K and above",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostType {
    Consultants,
    SoftwareLicenses,
    Hardware,
    CustomDevelopment,
    Training,
    InternalStaff,
    MarketingExport,
    Other,
}

impl CostType {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::Consultants,
            Self::SoftwareLicenses,
            Self::Hardware,
            Self::CustomDevelopment,
            Self::Training,
            Self::InternalStaff,
            Self::MarketingExport,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Consultants => "External consultants / integrators / agencies",
            Self::SoftwareLicenses => "Software licenses / subscriptions",
            Self::Hardware => "Hardware / equipment / machines / sensors",
            Self::CustomDevelopment => "Custom development / programming / integrations",
            Self::Training => "Training for employees",
            Self::InternalStaff => "Internal staff time assigned to the project",
            Self::MarketingExport => "Marketing / export activities",
            Self::Other => "Other costs",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviousFunding {
    #[default]
    No,
    Yes,
    NotSure,
}

impl PreviousFunding {
    pub const fn label(self) -> &'static str {
        match self {
            Self::No => "No",
            Self::Yes => "Yes, at least one grant or tax credit",
            Self::NotSure => "Not sure",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorProgram {
    Essor,
    PcanCdap,
    InvestissementQuebec,
    Municipal,
    TaxCredits,
    Other,
}

impl PriorProgram {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Essor,
            Self::PcanCdap,
            Self::InvestissementQuebec,
            Self::Municipal,
            Self::TaxCredits,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Essor => "ESSOR",
            Self::PcanCdap => "PCAN / CDAP",
            Self::InvestissementQuebec => "Investissement Québec programs",
            Self::Municipal => "Municipal / regional programs",
            Self::TaxCredits => "Tax credits (C3i, CDAE, SR&ED, etc.)",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportType {
    Both,
    Grants,
    Tax,
    Loans,
    #[default]
    Any,
    Explain,
}

impl SupportType {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Both,
            Self::Grants,
            Self::Tax,
            Self::Loans,
            Self::Any,
            Self::Explain,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Both => "Grants + Tax Credits",
            Self::Grants => "Grants only",
            Self::Tax => "Tax Credits only",
            Self::Loans => "Loans / Financing",
            Self::Any => "Any / Optimized Mix",
            Self::Explain => "I don’t know — explain in results",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplexityPreference {
    #[default]
    Maximize,
    Simple,
}

impl ComplexityPreference {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Maximize => "Maximize funding (more programs, more paperwork)",
            Self::Simple => "Keep it simple (1–2 programs, less paperwork)",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HelpNext {
    SummaryByEmail,
    ValidationCall,
    FullProposal,
}

impl HelpNext {
    pub const fn label(self) -> &'static str {
        match self {
            Self::SummaryByEmail => "Just send me a summary report by email",
            Self::ValidationCall => "Contact me for a short call to validate funding options",
            Self::FullProposal => "Contact me with a full project + funding proposal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_identifiers_match_stored_values() {
        assert_eq!(
            serde_json::to_value(EmployeeBand::TwoFiftyPlus).expect("serializes"),
            "250+"
        );
        assert_eq!(
            serde_json::from_value::<RevenueBand>("1m-4_9m".into()).expect("parses"),
            RevenueBand::Under5M
        );
        assert_eq!(
            serde_json::from_value::<Region>("nord_du_quebec".into()).expect("parses"),
            Region::NordDuQuebec
        );
        assert_eq!(
            serde_json::to_value(Timeline::WithinThreeMonths).expect("serializes"),
            "within_3_months"
        );
    }

    #[test]
    fn option_sets_have_declared_sizes() {
        assert_eq!(Region::ordered().len(), 16);
        assert_eq!(Region::ordered().iter().filter(|r| r.is_in_quebec()).count(), 15);
        assert_eq!(Industry::ordered().len(), 12);
        assert_eq!(ProjectType::ordered().len(), 11);
        assert!(DigitalLevel::Beginning < DigitalLevel::Advanced);
    }
}
