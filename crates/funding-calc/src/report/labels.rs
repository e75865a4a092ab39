use crate::calculator::domain::FormAnswers;
use crate::calculator::options::{EmployeeBand, Industry, MainGoal, ProjectType, Region};

/// Placeholder for a missing answer in exported text.
pub const MISSING: &str = "-";

pub fn location_label(region: Option<Region>) -> &'static str {
    region.map_or(MISSING, Region::label)
}

/// Location as printed on the exported report.
pub fn export_location_label(region: Option<Region>) -> String {
    match region {
        Some(region) if region.is_in_quebec() => format!("{}, Québec", region.label()),
        Some(region) => region.label().to_string(),
        None => MISSING.to_string(),
    }
}

pub fn industry_label(industry: Option<Industry>) -> &'static str {
    industry.map_or(MISSING, Industry::label)
}

pub fn employees_label(band: Option<EmployeeBand>) -> &'static str {
    band.map_or(MISSING, EmployeeBand::label)
}

/// One-line summary of what the project is mostly about.
pub fn project_focus(answers: &FormAnswers) -> String {
    let online = answers
        .project_types
        .iter()
        .any(|kind| kind.is_online_presence());
    let production = answers.project_types.iter().any(|kind| kind.is_production());

    match (online, production) {
        (true, true) => return "Online presence + production process".to_string(),
        (true, false) => return "Online presence / sales".to_string(),
        (false, true) => return "Production process / automation".to_string(),
        (false, false) => {}
    }

    if answers.main_goal == Some(MainGoal::OnlineSales) {
        return "Online presence / sales".to_string();
    }

    if answers.project_types.is_empty() {
        "Digital transformation".to_string()
    } else {
        answers
            .project_types
            .iter()
            .take(2)
            .map(|kind| ProjectType::label(*kind))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

/// Whole-dollar amount with thousands separators, e.g. `$12,345`.
pub fn format_currency(amount: f64) -> String {
    let rounded = if amount.is_finite() { amount.round() } else { 0.0 };
    let negative = rounded < 0.0;
    let digits = (rounded.abs() as u64).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if negative {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// `low – high`, collapsing to one figure when either bound is missing.
pub fn format_range(low: f64, high: f64) -> String {
    match (low > 0.0, high > 0.0) {
        (false, false) => String::new(),
        (true, false) => format_currency(low),
        (false, true) => format_currency(high),
        (true, true) => format!("{} – {}", format_currency(low), format_currency(high)),
    }
}
