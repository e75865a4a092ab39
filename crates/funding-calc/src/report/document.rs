//! Printable HTML funding report generated from an export request.

use std::fmt::{self, Write as _};

use super::export::{ExportProgram, ExportRequest};
use super::labels::{format_currency, MISSING};

const MAX_PROGRAMS: usize = 3;
const MAX_COVER_ITEMS: usize = 5;
const MAX_CONDITIONS: usize = 6;
const MAX_CHECKLIST_ITEMS: usize = 20;
const DISCLAIMER: &str = "Note: This report is an estimate based on typical eligibility patterns and public program rules. Final approval depends on full application review.";

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub filename: String,
    pub body: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid export request: {0}")]
    InvalidRequest(String),
    #[error("failed to format document")]
    Format(#[from] fmt::Error),
}

/// Trimmed text, or `fallback` when blank.
pub fn safe_text(value: &str, fallback: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// `<company>-funding-report.html` with every run of non-alphanumerics
/// collapsed to a dash.
pub fn document_filename(company: &str) -> String {
    let mut stem = String::with_capacity(company.len());
    let mut pending_dash = false;
    for ch in company.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash {
                stem.push('-');
                pending_dash = false;
            }
            stem.push(ch);
        } else {
            pending_dash = true;
        }
    }
    if pending_dash {
        stem.push('-');
    }
    format!("{stem}-funding-report.html")
}

fn amount(value: f64) -> String {
    format_currency(if value.is_finite() { value } else { 0.0 })
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(value) if value.is_finite() => format!("{}%", value.round()),
        _ => MISSING.to_string(),
    }
}

pub fn render_document(request: &ExportRequest) -> Result<RenderedDocument, DocumentError> {
    let calc = &request.calc;
    let company = safe_text(&calc.company_name, "Your company");
    let estimates = &request.estimates;

    let mut html = String::new();
    writeln!(html, "<!doctype html>")?;
    writeln!(html, "<html><head><meta charset=\"utf-8\" />")?;
    writeln!(
        html,
        "<title>Funding Summary Report - {}</title>",
        escape_html(&company)
    )?;
    writeln!(
        html,
        "<style>body{{font-family:Arial,Helvetica,sans-serif;margin:32px;color:#111}}h1{{font-size:20px}}h2{{font-size:14px;margin-top:20px}}.muted{{color:#555;font-size:12px}}</style>"
    )?;
    writeln!(html, "</head><body>")?;
    writeln!(html, "<h1>Funding Summary Report</h1>")?;

    writeln!(html, "<h2>{}</h2>", escape_html(&company))?;
    writeln!(html, "<ul>")?;
    for (label, value) in [
        ("Location", &calc.location_label),
        ("Sector", &calc.industry_label),
        ("Employees", &calc.employees_label),
        ("Project focus", &calc.focus),
    ] {
        writeln!(
            html,
            "<li>{label}: {}</li>",
            escape_html(&safe_text(value, MISSING))
        )?;
    }
    writeln!(html, "</ul>")?;

    writeln!(html, "<h2>Highlights</h2>")?;
    writeln!(html, "<ul>")?;
    writeln!(
        html,
        "<li>Estimated eligible funding: {} – {}</li>",
        amount(estimates.total_support_low),
        amount(estimates.total_support_high)
    )?;
    writeln!(
        html,
        "<li>Estimated net project cost after funding: {} – {}</li>",
        amount(estimates.net_low),
        amount(estimates.net_high)
    )?;
    writeln!(
        html,
        "<li>Funding intensity estimate: {} – {}</li>",
        percent(estimates.intensity_low),
        percent(estimates.intensity_high)
    )?;
    writeln!(
        html,
        "<li>Total project budget: {}</li>",
        amount(estimates.budget)
    )?;
    writeln!(html, "</ul>")?;

    writeln!(html, "<h2>Top programs</h2>")?;
    if request.top_programs.is_empty() {
        writeln!(html, "<p class=\"muted\">No programs to show.</p>")?;
    }
    for (index, program) in request.top_programs.iter().take(MAX_PROGRAMS).enumerate() {
        write_program(&mut html, index + 1, program)?;
    }

    writeln!(html, "<h2>Action checklist</h2>")?;
    writeln!(html, "<ol>")?;
    for step in request
        .checklist
        .iter()
        .filter(|step| !step.trim().is_empty())
        .take(MAX_CHECKLIST_ITEMS)
    {
        writeln!(html, "<li>{}</li>", escape_html(step.trim()))?;
    }
    writeln!(html, "</ol>")?;

    writeln!(html, "<p class=\"muted\">{}</p>", escape_html(DISCLAIMER))?;
    writeln!(html, "</body></html>")?;

    Ok(RenderedDocument {
        filename: document_filename(&company),
        body: html,
    })
}

fn write_program(html: &mut String, position: usize, program: &ExportProgram) -> fmt::Result {
    writeln!(
        html,
        "<h3>{position}. {}</h3>",
        escape_html(&safe_text(&program.title, "Program"))
    )?;
    writeln!(
        html,
        "<p>Type: {}</p>",
        escape_html(&safe_text(&program.kind, MISSING))
    )?;
    if !program.fit.trim().is_empty() {
        writeln!(html, "<p>Fit: {}</p>", escape_html(program.fit.trim()))?;
    }
    writeln!(
        html,
        "<p>Estimated amount: {} – {}</p>",
        amount(program.amount.low),
        amount(program.amount.high)
    )?;

    write_list(html, "What it can cover", &program.cover, MAX_COVER_ITEMS)?;
    write_list(html, "Key conditions", &program.conditions, MAX_CONDITIONS)
}

fn write_list(html: &mut String, heading: &str, items: &[String], limit: usize) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(html, "<p>{heading}:</p><ul>")?;
    for item in items.iter().take(limit) {
        writeln!(html, "<li>{}</li>", escape_html(&safe_text(item, "")))?;
    }
    writeln!(html, "</ul>")
}
