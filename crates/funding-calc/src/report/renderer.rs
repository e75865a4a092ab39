use std::cmp::Ordering;

use super::backend::{BackendResult, MatchStatus, ProgramResult};
use super::estimate::{estimate, FallbackEstimate};
use super::labels::{employees_label, industry_label, location_label, project_focus, MISSING};
use super::views::{
    ChartBar, ChartSeries, CompanyCard, FundingSummary, ProgramEntry, ReportSource, ReportView,
    ResultsPage,
};
use crate::calculator::domain::FormAnswers;
use crate::calculator::options::ComplexityPreference;

pub const COULD_NOT_CALCULATE: &str = "Could not calculate or find any programs for you. Sorry.";
pub const ESTIMATE_NOTE: &str = "Note: This is an estimate based on typical eligibility patterns and public program rules. Final approval depends on full application review.";
pub const EMPTY_BACKEND_NOTE: &str = "No program data was returned by the backend.";

pub(crate) const PLACEHOLDER: &str = "—";
const TOP_PROGRAMS: usize = 3;

/// Turns one data source into a report view.
pub trait ReportStrategy {
    fn source(&self) -> ReportSource;
    fn build(&self, answers: &FormAnswers) -> ReportView;
}

/// Report built from a persisted backend response.
pub struct BackendReport<'a> {
    result: &'a BackendResult,
}

impl<'a> BackendReport<'a> {
    pub fn new(result: &'a BackendResult) -> Self {
        Self { result }
    }
}

impl ReportStrategy for BackendReport<'_> {
    fn source(&self) -> ReportSource {
        ReportSource::Backend
    }

    fn build(&self, answers: &FormAnswers) -> ReportView {
        let result = self.result;

        let company = CompanyCard {
            company: result
                .company_name()
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            contact: result.contact_name.text_or(PLACEHOLDER),
            email: result.contact_email.text_or(""),
            region: result.region.text_or(PLACEHOLDER),
            sector: result.sector.text_or(PLACEHOLDER),
            employees: result.employees_band.text_or(PLACEHOLDER),
            focus: result.project_focus.text_or(PLACEHOLDER),
            description: result.project_description.text_or(""),
        };

        let summary = &result.summary;
        let budget = result.project_budget.get_or(0.0);
        let grants = summary.grants_total.get_or(0.0);
        let tax = summary.tax_total.get_or(0.0);
        let net = match summary.net_cost.get_or(0.0) {
            net if net > 0.0 => net,
            _ => (budget - (grants + tax)).max(0.0),
        };

        let mut programs: Vec<ProgramEntry> = result.programs.iter().map(backend_entry).collect();
        rank_programs(&mut programs);

        let notice = if result.programs.is_empty() {
            EMPTY_BACKEND_NOTE.to_string()
        } else {
            String::new()
        };

        ReportView {
            source: self.source(),
            source_label: self.source().label(),
            company,
            summary: FundingSummary {
                budget,
                support_low: summary.estimated_min.get_or(0.0),
                support_high: summary.estimated_max.get_or(0.0),
                net_low: net,
                net_high: net,
                total_funding: summary.total_funding.get_or(0.0),
                intensity_low: None,
                intensity_high: None,
                total_programs: summary.total_programs.get_or(0),
                strong_matches: summary.strong_matches.get_or(0),
                conditional_matches: summary.conditional_matches.get_or(0),
            },
            top_programs: programs.iter().take(TOP_PROGRAMS).cloned().collect(),
            programs,
            chart: chart(self.source(), [budget, grants, tax, net]),
            checklist: action_checklist(answers),
            estimate: None,
            notice,
        }
    }
}

fn backend_entry(program: &ProgramResult) -> ProgramEntry {
    ProgramEntry {
        title: program.name.text_or("Unnamed program"),
        kind: program.kind.text_or(PLACEHOLDER),
        status: program.status,
        status_label: program.status.label(),
        confidence: program.confidence.text_or(PLACEHOLDER),
        fit: String::new(),
        amount_low: program.est_min.get_or(0.0),
        amount_high: program.est_max.get_or(0.0),
        amount_typical: program.est_typical.get_or(0.0),
        cover: Vec::new(),
        conditions: Vec::new(),
        summary: program.summary.text_or(""),
    }
}

/// Report estimated locally from the answers.
#[derive(Debug, Default)]
pub struct EstimatedReport;

impl ReportStrategy for EstimatedReport {
    fn source(&self) -> ReportSource {
        ReportSource::Estimate
    }

    fn build(&self, answers: &FormAnswers) -> ReportView {
        let figures = estimate(answers);
        let or_dash = |value: &str| {
            if value == MISSING {
                PLACEHOLDER.to_string()
            } else {
                value.to_string()
            }
        };
        let text_or = |value: &str, fallback: &str| {
            if value.trim().is_empty() {
                fallback.to_string()
            } else {
                value.trim().to_string()
            }
        };

        let company = CompanyCard {
            company: text_or(&answers.company_name, "Your company"),
            contact: text_or(&answers.contact_name, PLACEHOLDER),
            email: answers.email.trim().to_string(),
            region: or_dash(location_label(answers.location)),
            sector: or_dash(industry_label(answers.industry)),
            employees: or_dash(employees_label(answers.employees)),
            focus: project_focus(answers),
            description: answers.description.trim().to_string(),
        };

        let programs = estimated_programs(&figures);
        let budget = figures.budget as f64;

        ReportView {
            source: self.source(),
            source_label: self.source().label(),
            company,
            summary: FundingSummary {
                budget,
                support_low: figures.total_support_low as f64,
                support_high: figures.total_support_high as f64,
                net_low: figures.net_low as f64,
                net_high: figures.net_high as f64,
                total_funding: figures.support_midpoint() as f64,
                intensity_low: Some(figures.intensity_low),
                intensity_high: Some(figures.intensity_high),
                total_programs: programs.len() as u64,
                strong_matches: 0,
                conditional_matches: programs.len() as u64,
            },
            top_programs: programs.iter().take(TOP_PROGRAMS).cloned().collect(),
            programs,
            chart: chart(
                self.source(),
                [
                    budget,
                    figures.grants_midpoint() as f64,
                    figures.tax_midpoint() as f64,
                    figures.net_midpoint() as f64,
                ],
            ),
            checklist: action_checklist(answers),
            estimate: Some(figures),
            notice: ESTIMATE_NOTE.to_string(),
        }
    }
}

struct TypicalProgram {
    title: &'static str,
    kind: &'static str,
    fit: &'static str,
    low: (f64, f64),
    high: (f64, f64),
    cover: &'static [&'static str],
    conditions: &'static [&'static str],
}

const TYPICAL_PROGRAMS: [TypicalProgram; 3] = [
    TypicalProgram {
        title: "ESSOR – Digital transformation & productivity",
        kind: "Non-repayable grant",
        fit: "⭐⭐⭐⭐☆ (Very strong)",
        low: (0.12, 60_000.0),
        high: (0.24, 90_000.0),
        cover: &[
            "Part of your production automation project (machines, software, integration)",
            "Part of your digital roadmap / consulting",
        ],
        conditions: &[
            "Manufacturing SME in Québec ✅",
            "Clear productivity gains (time saved, cost per unit, defects)",
            "Project size usually above $100,000 ✅",
        ],
    },
    TypicalProgram {
        title: "Industrial automation / Industry 4.0 support",
        kind: "Grant or combined grant + loan (program-dependent)",
        fit: "⭐⭐⭐⭐☆",
        low: (0.10, 50_000.0),
        high: (0.20, 80_000.0),
        cover: &[
            "Smart machines, sensors, data capture on the production line",
            "Integration with your ERP / BI to track production in real time",
        ],
        conditions: &[
            "Manufacturing plant in Québec ✅",
            "Clear link to automation and productivity ✅",
        ],
    },
    TypicalProgram {
        title: "Digital investment / productivity tax credit (C3i-type)",
        kind: "Refundable tax credit",
        fit: "⭐⭐⭐⭐☆",
        low: (0.08, 40_000.0),
        high: (0.16, 60_000.0),
        cover: &["Part of your software, hardware, and equipment costs"],
        conditions: &[
            "Investments in approved digital / manufacturing tech ✅",
            "Company taxable in Québec ✅",
        ],
    },
];

fn estimated_programs(figures: &FallbackEstimate) -> Vec<ProgramEntry> {
    let budget = figures.budget as f64;
    let capped = |(share, cap): (f64, f64)| f64::min(cap, (budget * share).round());

    TYPICAL_PROGRAMS
        .iter()
        .map(|program| {
            let low = capped(program.low);
            let high = capped(program.high);
            ProgramEntry {
                title: program.title.to_string(),
                kind: program.kind.to_string(),
                status: MatchStatus::Maybe,
                status_label: MatchStatus::Maybe.label(),
                confidence: "estimate".to_string(),
                fit: program.fit.to_string(),
                amount_low: low,
                amount_high: high,
                amount_typical: ((low + high) / 2.0).round(),
                cover: program.cover.iter().map(|line| line.to_string()).collect(),
                conditions: program
                    .conditions
                    .iter()
                    .map(|line| line.to_string())
                    .collect(),
                summary: String::new(),
            }
        })
        .collect()
}

/// Eligible first, then conditional, then the rest; larger estimates first
/// within a rank. Stable for equal keys.
pub fn rank_programs(programs: &mut [ProgramEntry]) {
    programs.sort_by(|left, right| {
        left.status
            .rank()
            .cmp(&right.status.rank())
            .then_with(|| {
                right
                    .ranking_amount()
                    .partial_cmp(&left.ranking_amount())
                    .unwrap_or(Ordering::Equal)
            })
    });
}

fn chart(source: ReportSource, values: [f64; 4]) -> Vec<ChartBar> {
    ChartSeries::ordered()
        .into_iter()
        .zip(values)
        .map(|(series, value)| ChartBar {
            series,
            label: series.label(source),
            value,
        })
        .collect()
}

pub fn action_checklist(answers: &FormAnswers) -> Vec<String> {
    let last = match answers.complexity_preference {
        Some(ComplexityPreference::Simple) => {
            "Option B: 1–2 programs only (less paperwork, lower funding but simpler)."
        }
        _ => "Option A: Maximise funding (more programs, more paperwork).",
    };

    [
        "Lock your project scope and budget.",
        "Define the exact machines, software, and website work we will include.",
        "Apply for the main grant (ESSOR / main program).",
        "Prepare a short digital transformation plan and basic financials.",
        "We help write this in the format the program expects.",
        "Structure the project so it also qualifies for tax credits.",
        "Tag which expenses are eligible (equipment vs software vs services).",
        "Check if an automation or regional program can be stacked.",
        "If yes, we adjust the timeline to avoid conflicts.",
        "Final step: decide your preferred option.",
        last,
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Picks the report strategy from what data is available.
#[derive(Debug, Default, Clone, Copy)]
pub struct ReportRenderer;

impl ReportRenderer {
    pub fn render(&self, answers: &FormAnswers, backend: Option<&BackendResult>) -> ResultsPage {
        match backend {
            Some(result) => ResultsPage::Calculated {
                report: BackendReport::new(result).build(answers),
            },
            None => ResultsPage::CouldNotCalculate {
                message: COULD_NOT_CALCULATE,
                estimate: EstimatedReport.build(answers),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::domain::BudgetItem;
    use serde_json::json;

    fn backend(value: serde_json::Value) -> BackendResult {
        BackendResult::from_value(&value).expect("object")
    }

    #[test]
    fn programs_rank_by_status_then_amount() {
        let result = backend(json!({
            "program_results": [
                {"name": "A", "status": "ineligible", "estimate": {"est_typical": 900000}},
                {"name": "B", "status": "eligible", "estimate": {"est_typical": 10}},
                {"name": "C", "status": "maybe", "estimate": {"est_max": 50000}},
                {"name": "D", "status": "eligible", "estimate": {"est_typical": 20}},
            ]
        }));

        let page = ReportRenderer.render(&FormAnswers::default(), Some(&result));
        let titles: Vec<_> = page
            .report()
            .programs
            .iter()
            .map(|entry| entry.title.as_str())
            .collect();

        assert!(page.is_calculated());
        assert_eq!(titles, ["D", "B", "C", "A"]);
        assert_eq!(page.report().top_programs.len(), 3);
        assert_eq!(page.report().programs[2].status_label, "Conditional");
    }

    #[test]
    fn backend_net_falls_back_to_budget_minus_support() {
        let result = backend(json!({
            "project": {"budget": 100000},
            "summary": {"grants_total": 30000, "tax_total": "15000"},
        }));

        let page = ReportRenderer.render(&FormAnswers::default(), Some(&result));
        let values: Vec<_> = page.report().chart.iter().map(|bar| bar.value).collect();

        assert_eq!(values, [100_000.0, 30_000.0, 15_000.0, 55_000.0]);
        assert_eq!(page.report().notice, EMPTY_BACKEND_NOTE);
        assert_eq!(page.report().company.company, "—");
        assert_eq!(page.report().company.region, "—");
    }

    #[test]
    fn identity_comes_from_the_backend_only() {
        let answers = FormAnswers {
            company_name: "Local Name Inc.".to_string(),
            ..FormAnswers::default()
        };
        let result = backend(json!({"company": "Backend Name Ltée"}));

        let page = ReportRenderer.render(&answers, Some(&result));

        assert_eq!(page.report().company.company, "Backend Name Ltée");
    }

    #[test]
    fn missing_backend_renders_labelled_estimate() {
        let answers = FormAnswers {
            complexity_preference: Some(ComplexityPreference::Simple),
            ..FormAnswers::default()
        };

        let page = ReportRenderer.render(&answers, None);

        match &page {
            ResultsPage::CouldNotCalculate { message, estimate } => {
                assert_eq!(*message, COULD_NOT_CALCULATE);
                assert_eq!(estimate.source, ReportSource::Estimate);
                assert_eq!(estimate.company.company, "Your company");
                assert_eq!(estimate.chart[1].label, "Grants & funds (est.)");
                assert_eq!(estimate.programs[0].amount_low, 30_000.0);
                assert_eq!(estimate.programs[0].amount_high, 60_000.0);
                assert_eq!(
                    estimate.checklist.last().map(String::as_str),
                    Some("Option B: 1–2 programs only (less paperwork, lower funding but simpler).")
                );
            }
            other => panic!("expected could-not-calculate page, got {other:?}"),
        }
    }

    #[test]
    fn huge_budget_renders_without_overflow() {
        let answers = FormAnswers {
            budget_items: vec![
                BudgetItem::new("1", "Plant", 1e20),
                BudgetItem::new("2", "Second plant", f64::MAX),
            ],
            ..FormAnswers::default()
        };

        let page = ReportRenderer.render(&answers, None);
        let report = page.report();
        let figures = report.estimate.expect("estimate attached");

        assert_eq!(figures.budget, u64::MAX);
        assert_eq!(figures.support_midpoint(), u64::MAX);
        assert_eq!(figures.net_midpoint(), 0);
        assert!(report.summary.total_funding.is_finite());
        assert_eq!(report.programs[0].amount_high, 90_000.0);
    }

    #[test]
    fn estimated_program_amounts_are_capped() {
        let figures = FallbackEstimate {
            budget: 1_000_000,
            ..estimate(&FormAnswers::default())
        };

        let programs = estimated_programs(&figures);

        assert_eq!(programs[0].amount_low, 60_000.0);
        assert_eq!(programs[0].amount_high, 90_000.0);
        assert_eq!(programs[2].amount_high, 60_000.0);
    }
}
