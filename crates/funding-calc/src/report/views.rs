use serde::Serialize;

use super::backend::MatchStatus;
use super::estimate::FallbackEstimate;

/// Where the numbers in a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSource {
    Backend,
    Estimate,
}

impl ReportSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Backend => "Calculated by the funding engine",
            Self::Estimate => "Local estimate",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyCard {
    pub company: String,
    pub contact: String,
    pub email: String,
    pub region: String,
    pub sector: String,
    pub employees: String,
    pub focus: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FundingSummary {
    pub budget: f64,
    pub support_low: f64,
    pub support_high: f64,
    pub net_low: f64,
    pub net_high: f64,
    pub total_funding: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_low: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_high: Option<u32>,
    pub total_programs: u64,
    pub strong_matches: u64,
    pub conditional_matches: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgramEntry {
    pub title: String,
    pub kind: String,
    pub status: MatchStatus,
    pub status_label: &'static str,
    pub confidence: String,
    pub fit: String,
    pub amount_low: f64,
    pub amount_high: f64,
    pub amount_typical: f64,
    pub cover: Vec<String>,
    pub conditions: Vec<String>,
    pub summary: String,
}

impl ProgramEntry {
    /// Typical estimate when positive, otherwise the maximum.
    pub fn ranking_amount(&self) -> f64 {
        if self.amount_typical > 0.0 {
            self.amount_typical
        } else {
            self.amount_high
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartSeries {
    Budget,
    Grants,
    Tax,
    Net,
}

impl ChartSeries {
    pub const fn ordered() -> [Self; 4] {
        [Self::Budget, Self::Grants, Self::Tax, Self::Net]
    }

    pub const fn label(self, source: ReportSource) -> &'static str {
        match (self, source) {
            (Self::Budget, _) => "Total project budget",
            (Self::Grants, ReportSource::Backend) => "Grants & funds",
            (Self::Grants, ReportSource::Estimate) => "Grants & funds (est.)",
            (Self::Tax, ReportSource::Backend) => "Tax credits",
            (Self::Tax, ReportSource::Estimate) => "Tax credits (est.)",
            (Self::Net, ReportSource::Backend) => "Your net cost",
            (Self::Net, ReportSource::Estimate) => "Your net cost (approx.)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub series: ChartSeries,
    pub label: &'static str,
    pub value: f64,
}

/// Everything the results page and the export need.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub source: ReportSource,
    pub source_label: &'static str,
    pub company: CompanyCard,
    pub summary: FundingSummary,
    pub programs: Vec<ProgramEntry>,
    pub top_programs: Vec<ProgramEntry>,
    pub chart: Vec<ChartBar>,
    pub checklist: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<FallbackEstimate>,
    pub notice: String,
}

/// The results destination reached after a submission attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ResultsPage {
    Calculated {
        report: ReportView,
    },
    CouldNotCalculate {
        message: &'static str,
        estimate: ReportView,
    },
}

impl ResultsPage {
    /// The report shown on the page, backend-sourced or estimated.
    pub fn report(&self) -> &ReportView {
        match self {
            Self::Calculated { report } => report,
            Self::CouldNotCalculate { estimate, .. } => estimate,
        }
    }

    pub fn is_calculated(&self) -> bool {
        matches!(self, Self::Calculated { .. })
    }
}
