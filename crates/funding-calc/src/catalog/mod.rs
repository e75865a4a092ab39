//! Read-only catalog of funding programs.

mod programs;
pub mod router;

use std::str::FromStr;

use serde::Serialize;

use crate::report::labels::format_currency;

pub use programs::{Program, ProgramCategory, ProgramLevel, ProgramStatus};
pub use router::catalog_router;

pub fn programs() -> &'static [Program] {
    &programs::PROGRAMS
}

pub fn find_by_slug(slug: &str) -> Result<&'static Program, CatalogError> {
    programs()
        .iter()
        .find(|program| program.slug == slug)
        .ok_or_else(|| CatalogError::NotFound(slug.to_string()))
}

/// Level filter offered by the program listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LevelFilter {
    #[default]
    All,
    Only(ProgramLevel),
}

impl LevelFilter {
    fn matches(self, level: ProgramLevel) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == level,
        }
    }
}

impl FromStr for LevelFilter {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "provincial" => Ok(Self::Only(ProgramLevel::Provincial)),
            "federal" => Ok(Self::Only(ProgramLevel::Federal)),
            "municipal" => Ok(Self::Only(ProgramLevel::Municipal)),
            "private" => Ok(Self::Only(ProgramLevel::Private)),
            _ => Err(CatalogError::UnknownLevel(value.to_string())),
        }
    }
}

/// Case-insensitive match on name or description, narrowed by level.
pub fn search(query: &str, level: LevelFilter) -> Vec<&'static Program> {
    let needle = query.trim().to_lowercase();
    programs()
        .iter()
        .filter(|program| level.matches(program.level))
        .filter(|program| {
            needle.is_empty()
                || program.name.to_lowercase().contains(&needle)
                || program.description.to_lowercase().contains(&needle)
        })
        .collect()
}

pub fn funding_cap_label(program: &Program) -> String {
    if program.funding_max == 0 {
        "Varies".to_string()
    } else {
        format_currency(program.funding_max as f64)
    }
}

/// Program as exposed to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramView {
    #[serde(flatten)]
    pub program: &'static Program,
    pub level_label: &'static str,
    pub funding_cap_label: String,
}

impl From<&'static Program> for ProgramView {
    fn from(program: &'static Program) -> Self {
        Self {
            program,
            level_label: program.level.label(),
            funding_cap_label: funding_cap_label(program),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown program level '{0}'")]
    UnknownLevel(String),
    #[error("program '{0}' not found")]
    NotFound(String),
}
