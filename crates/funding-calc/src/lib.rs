//! Québec SME funding calculator: intake wizard, scoring submission,
//! funding reports and the program catalog.

pub mod calculator;
pub mod catalog;
pub mod config;
pub mod error;
pub mod report;
pub mod telemetry;
