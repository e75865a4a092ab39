//! Loosely-typed view over the scoring backend's response.
//!
//! The backend owns the schema and may omit or reshape any field, so every
//! accessor reports whether the value was present, absent, or unusable and
//! callers pick their own fallback.

use serde::Serialize;
use serde_json::Value;

/// Outcome of reading one field from the backend document.
#[derive(Debug, Clone, PartialEq)]
pub enum Reading<T> {
    Present(T),
    Absent,
    Invalid,
}

impl<T> Reading<T> {
    pub fn value(self) -> Option<T> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent | Self::Invalid => None,
        }
    }

}

impl<T: Clone> Reading<T> {
    /// Present value, or `fallback` when absent or invalid.
    pub fn get_or(&self, fallback: T) -> T {
        match self {
            Self::Present(value) => value.clone(),
            Self::Absent | Self::Invalid => fallback,
        }
    }
}

impl Reading<String> {
    pub fn text_or(&self, fallback: &str) -> String {
        match self {
            Self::Present(value) => value.clone(),
            Self::Absent | Self::Invalid => fallback.to_string(),
        }
    }
}

fn lookup<'a>(root: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(root, |current, key| current.as_object()?.get(*key))
}

/// Non-empty string at `path`.
pub fn read_text(root: &Value, path: &[&str]) -> Reading<String> {
    match lookup(root, path) {
        None | Some(Value::Null) => Reading::Absent,
        Some(Value::String(text)) if text.trim().is_empty() => Reading::Absent,
        Some(Value::String(text)) => Reading::Present(text.clone()),
        Some(_) => Reading::Invalid,
    }
}

/// Non-negative dollar amount at `path`; numeric strings are accepted.
pub fn read_amount(root: &Value, path: &[&str]) -> Reading<f64> {
    let parsed = match lookup(root, path) {
        None | Some(Value::Null) => return Reading::Absent,
        Some(Value::Number(number)) => number.as_f64(),
        Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match parsed {
        Some(amount) if amount.is_finite() && amount >= 0.0 => Reading::Present(amount),
        _ => Reading::Invalid,
    }
}

pub fn read_count(root: &Value, path: &[&str]) -> Reading<u64> {
    match read_amount(root, path) {
        Reading::Present(amount) => Reading::Present(amount.round() as u64),
        Reading::Absent => Reading::Absent,
        Reading::Invalid => Reading::Invalid,
    }
}

/// Eligibility verdict attached to one program result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Eligible,
    Maybe,
    Ineligible,
    Unknown,
}

impl MatchStatus {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "eligible" => Self::Eligible,
            "maybe" | "conditional" => Self::Maybe,
            "ineligible" => Self::Ineligible,
            _ => Self::Unknown,
        }
    }

    /// Sort key: eligible first, then conditional, then everything else.
    pub const fn rank(self) -> u8 {
        match self {
            Self::Eligible => 0,
            Self::Maybe => 1,
            Self::Ineligible | Self::Unknown => 2,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Eligible => "Eligible",
            Self::Maybe => "Conditional",
            Self::Ineligible => "Not eligible",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BackendSummary {
    pub estimated_min: Reading<f64>,
    pub estimated_max: Reading<f64>,
    pub net_cost: Reading<f64>,
    pub total_funding: Reading<f64>,
    pub grants_total: Reading<f64>,
    pub tax_total: Reading<f64>,
    pub total_programs: Reading<u64>,
    pub strong_matches: Reading<u64>,
    pub conditional_matches: Reading<u64>,
}

fn summary_path(key: &str) -> [&str; 2] {
    ["summary", key]
}

impl BackendSummary {
    fn read(root: &Value) -> Self {
        Self {
            estimated_min: read_amount(root, &summary_path("estimated_min")),
            estimated_max: read_amount(root, &summary_path("estimated_max")),
            net_cost: read_amount(root, &summary_path("net_cost")),
            total_funding: read_amount(root, &summary_path("total_funding")),
            grants_total: read_amount(root, &summary_path("grants_total")),
            tax_total: read_amount(root, &summary_path("tax_total")),
            total_programs: read_count(root, &summary_path("total_programs")),
            strong_matches: read_count(root, &summary_path("strong_matches")),
            conditional_matches: read_count(root, &summary_path("conditional_matches")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgramResult {
    pub name: Reading<String>,
    pub kind: Reading<String>,
    pub status: MatchStatus,
    pub confidence: Reading<String>,
    pub est_min: Reading<f64>,
    pub est_max: Reading<f64>,
    pub est_typical: Reading<f64>,
    pub summary: Reading<String>,
}

impl ProgramResult {
    fn read(entry: &Value) -> Option<Self> {
        if !entry.is_object() {
            return None;
        }
        let status = read_text(entry, &["status"])
            .value()
            .map(|raw| MatchStatus::parse(&raw))
            .unwrap_or(MatchStatus::Unknown);
        Some(Self {
            name: read_text(entry, &["name"]),
            kind: read_text(entry, &["type"]),
            status,
            confidence: read_text(entry, &["confidence"]),
            est_min: read_amount(entry, &["estimate", "est_min"]),
            est_max: read_amount(entry, &["estimate", "est_max"]),
            est_typical: read_amount(entry, &["estimate", "est_typical"]),
            summary: read_text(entry, &["explanation", "summary"]),
        })
    }
}

/// Parsed backend document. Only constructed from a JSON object.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendResult {
    pub company: Reading<String>,
    pub contact_name: Reading<String>,
    pub contact_company: Reading<String>,
    pub contact_email: Reading<String>,
    pub region: Reading<String>,
    pub sector: Reading<String>,
    pub employees_band: Reading<String>,
    pub project_budget: Reading<f64>,
    pub project_focus: Reading<String>,
    pub project_description: Reading<String>,
    pub summary: BackendSummary,
    pub programs: Vec<ProgramResult>,
}

impl BackendResult {
    pub fn from_value(root: &Value) -> Option<Self> {
        if !root.is_object() {
            return None;
        }
        let programs = match lookup(root, &["program_results"]) {
            Some(Value::Array(entries)) => entries.iter().filter_map(ProgramResult::read).collect(),
            _ => Vec::new(),
        };
        Some(Self {
            company: read_text(root, &["company"]),
            contact_name: read_text(root, &["profile", "contact", "name"]),
            contact_company: read_text(root, &["profile", "contact", "company"]),
            contact_email: read_text(root, &["profile", "contact", "email"]),
            region: read_text(root, &["profile", "region"]),
            sector: read_text(root, &["profile", "sector"]),
            employees_band: read_text(root, &["profile", "employees_band"]),
            project_budget: read_amount(root, &["project", "budget"]),
            project_focus: read_text(root, &["project", "main_goal"]),
            project_description: read_text(root, &["project", "description"]),
            summary: BackendSummary::read(root),
            programs,
        })
    }

    /// Parses raw persisted text; anything that is not a JSON object is `None`.
    pub fn from_raw(raw: &str) -> Option<Self> {
        serde_json::from_str::<Value>(raw)
            .ok()
            .and_then(|value| Self::from_value(&value))
    }

    pub fn company_name(&self) -> Option<String> {
        self.company
            .clone()
            .value()
            .or_else(|| self.contact_company.clone().value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn readers_distinguish_absent_from_invalid() {
        let doc = json!({
            "summary": {"net_cost": "1200.5", "grants_total": -3, "tax_total": "n/a"},
            "company": "   ",
        });

        assert_eq!(read_amount(&doc, &["summary", "net_cost"]), Reading::Present(1200.5));
        assert_eq!(read_amount(&doc, &["summary", "grants_total"]), Reading::Invalid);
        assert_eq!(read_amount(&doc, &["summary", "tax_total"]), Reading::Invalid);
        assert_eq!(read_amount(&doc, &["summary", "missing"]), Reading::Absent);
        assert_eq!(read_amount(&doc, &["company", "nested"]), Reading::Absent);
        assert_eq!(read_text(&doc, &["company"]), Reading::Absent);
    }

    #[test]
    fn non_object_documents_are_rejected() {
        assert!(BackendResult::from_raw("[1,2,3]").is_none());
        assert!(BackendResult::from_raw("null").is_none());
        assert!(BackendResult::from_raw("not json").is_none());
        assert!(BackendResult::from_raw("{}").is_some());
    }

    #[test]
    fn program_entries_are_read_leniently() {
        let doc = json!({
            "program_results": [
                {"name": "ESSOR", "status": "Eligible", "estimate": {"est_max": 90000}},
                "junk",
                {"status": "conditional", "estimate": {"est_typical": 0, "est_max": 12}},
            ]
        });

        let result = BackendResult::from_value(&doc).expect("object");

        assert_eq!(result.programs.len(), 2);
        assert_eq!(result.programs[0].status, MatchStatus::Eligible);
        assert_eq!(result.programs[0].est_max, Reading::Present(90000.0));
        assert_eq!(result.programs[1].status, MatchStatus::Maybe);
        assert_eq!(result.programs[1].est_typical, Reading::Present(0.0));
        assert_eq!(result.programs[1].name, Reading::Absent);
    }

    #[test]
    fn company_falls_back_to_contact_block() {
        let doc = json!({"profile": {"contact": {"company": "Acier Beauce"}}});
        let result = BackendResult::from_value(&doc).expect("object");
        assert_eq!(result.company_name().as_deref(), Some("Acier Beauce"));
    }
}
