use serde::Serialize;

use crate::calculator::domain::FormAnswers;
use crate::calculator::options::{ComplexityPreference, ProjectDetailLevel};

/// Budget assumed when no line item carries a cost.
pub const DEFAULT_BUDGET: f64 = 250_000.0;

const GRANTS_RANGE: (f64, f64) = (0.22, 0.30);
const TAX_RANGE: (f64, f64) = (0.12, 0.18);
const INTENSITY_FLOOR: f64 = 0.25;
const INTENSITY_CEILING: f64 = 0.60;

/// Heuristic funding range derived from the answers alone. Amounts are whole
/// dollars, intensities whole percents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FallbackEstimate {
    pub budget: u64,
    pub total_support_low: u64,
    pub total_support_high: u64,
    pub grants_low: u64,
    pub grants_high: u64,
    pub tax_low: u64,
    pub tax_high: u64,
    pub net_low: u64,
    pub net_high: u64,
    pub intensity_low: u32,
    pub intensity_high: u32,
}

impl FallbackEstimate {
    pub fn grants_midpoint(&self) -> u64 {
        midpoint(self.grants_low, self.grants_high)
    }

    pub fn tax_midpoint(&self) -> u64 {
        midpoint(self.tax_low, self.tax_high)
    }

    /// Grants plus tax midpoints, saturating at `u64::MAX`.
    pub fn support_midpoint(&self) -> u64 {
        self.grants_midpoint().saturating_add(self.tax_midpoint())
    }

    /// Budget minus both midpoints, floored at 0.
    pub fn net_midpoint(&self) -> u64 {
        self.budget.saturating_sub(self.support_midpoint())
    }
}

fn midpoint(low: u64, high: u64) -> u64 {
    ((low as f64 + high as f64) / 2.0).round() as u64
}

fn dollars(amount: f64) -> u64 {
    amount.max(0.0).round() as u64
}

pub fn estimate(answers: &FormAnswers) -> FallbackEstimate {
    let total = answers.total_budget();
    let budget = if total > 0.0 { total } else { DEFAULT_BUDGET };

    let base = match answers.complexity_preference {
        Some(ComplexityPreference::Simple) => 0.35,
        _ => 0.50,
    };
    let boost = match answers.project_detail_level {
        Some(ProjectDetailLevel::SupplierQuotes) => 0.05,
        Some(ProjectDetailLevel::WrittenRoadmap) => 0.03,
        _ => 0.0,
    };

    let low = f64::max(INTENSITY_FLOOR, base - 0.15 + boost);
    let high = f64::min(INTENSITY_CEILING, base + boost);

    let total_support_low = dollars(budget * low);
    let total_support_high = dollars(budget * high);

    FallbackEstimate {
        budget: dollars(budget),
        total_support_low,
        total_support_high,
        grants_low: dollars(budget * GRANTS_RANGE.0),
        grants_high: dollars(budget * GRANTS_RANGE.1),
        tax_low: dollars(budget * TAX_RANGE.0),
        tax_high: dollars(budget * TAX_RANGE.1),
        net_low: dollars(budget - total_support_high as f64),
        net_high: dollars(budget - total_support_low as f64),
        intensity_low: (low * 100.0).round() as u32,
        intensity_high: (high * 100.0).round() as u32,
    }
}
