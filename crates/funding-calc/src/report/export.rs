use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::labels::{
    employees_label, export_location_label, industry_label, project_focus, MISSING,
};
use super::renderer::PLACEHOLDER;
use super::views::{ProgramEntry, ReportSource, ReportView};
use crate::calculator::domain::FormAnswers;

/// Body accepted by the document generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportRequest {
    pub calc: ExportCompany,
    pub estimates: ExportEstimates,
    pub top_programs: Vec<ExportProgram>,
    pub checklist: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportCompany {
    pub company_name: String,
    pub location_label: String,
    pub industry_label: String,
    pub employees_label: String,
    pub focus: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportEstimates {
    pub budget: f64,
    pub total_support_low: f64,
    pub total_support_high: f64,
    pub net_low: f64,
    pub net_high: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_low: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_high: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportProgram {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub fit: String,
    pub amount: ExportAmount,
    pub cover: Vec<String>,
    pub conditions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportAmount {
    pub low: f64,
    pub high: f64,
}

impl ExportRequest {
    /// Builds the export body for the report currently shown.
    pub fn from_view(view: &ReportView, answers: &FormAnswers) -> Self {
        let calc = match view.source {
            ReportSource::Estimate => ExportCompany {
                company_name: view.company.company.clone(),
                location_label: export_location_label(answers.location),
                industry_label: industry_label(answers.industry).to_string(),
                employees_label: employees_label(answers.employees).to_string(),
                focus: project_focus(answers),
            },
            ReportSource::Backend => ExportCompany {
                company_name: dash(&view.company.company),
                location_label: dash(&view.company.region),
                industry_label: dash(&view.company.sector),
                employees_label: dash(&view.company.employees),
                focus: dash(&view.company.focus),
            },
        };

        let summary = &view.summary;
        Self {
            calc,
            estimates: ExportEstimates {
                budget: summary.budget,
                total_support_low: summary.support_low,
                total_support_high: summary.support_high,
                net_low: summary.net_low,
                net_high: summary.net_high,
                intensity_low: summary.intensity_low.map(f64::from),
                intensity_high: summary.intensity_high.map(f64::from),
            },
            top_programs: view.top_programs.iter().map(ExportProgram::from).collect(),
            checklist: view.checklist.clone(),
        }
    }
}

fn dash(value: &str) -> String {
    if value == PLACEHOLDER {
        MISSING.to_string()
    } else {
        value.to_string()
    }
}

impl From<&ProgramEntry> for ExportProgram {
    fn from(entry: &ProgramEntry) -> Self {
        Self {
            title: entry.title.clone(),
            kind: entry.kind.clone(),
            fit: entry.fit.clone(),
            amount: ExportAmount {
                low: entry.amount_low,
                high: entry.amount_high,
            },
            cover: entry.cover.clone(),
            conditions: entry.conditions.clone(),
        }
    }
}

/// Downloadable file returned by the document collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedDocument {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("document service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),
    #[error("document service rejected the export ({status}): {error}")]
    Rejected {
        status: u16,
        error: String,
        details: String,
    },
    #[error("document service returned an unreadable body: {0}")]
    Body(String),
}

impl ExportError {
    pub fn details(&self) -> String {
        match self {
            Self::Rejected { details, .. } => details.clone(),
            other => other.to_string(),
        }
    }
}

/// Collaborator turning an export request into a document.
#[async_trait]
pub trait DocumentExporter: Send + Sync {
    async fn export(&self, request: &ExportRequest) -> Result<ExportedDocument, ExportError>;
}

#[derive(Debug, Clone)]
pub struct HttpDocumentExporter {
    client: reqwest::Client,
    endpoint: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    error: String,
    details: String,
}

impl HttpDocumentExporter {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl DocumentExporter for HttpDocumentExporter {
    async fn export(&self, request: &ExportRequest) -> Result<ExportedDocument, ExportError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(ExportError::Unreachable)?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ExportError::Body(err.to_string()))?;

        if !status.is_success() {
            let body = serde_json::from_slice::<ErrorBody>(&bytes).unwrap_or_else(|_| ErrorBody {
                error: "document generation failed".to_string(),
                details: String::from_utf8_lossy(&bytes).into_owned(),
            });
            return Err(ExportError::Rejected {
                status: status.as_u16(),
                error: body.error,
                details: body.details,
            });
        }

        let content_type = headers
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| mime::APPLICATION_OCTET_STREAM.to_string());
        let filename = headers
            .get(reqwest::header::CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(attachment_filename)
            .unwrap_or_else(|| "funding-report".to_string());

        Ok(ExportedDocument {
            filename,
            content_type,
            bytes: bytes.to_vec(),
        })
    }
}

/// Extracts `filename="..."` from a Content-Disposition header.
pub fn attachment_filename(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let value = part.trim().strip_prefix("filename=")?;
        let value = value.trim_matches('"');
        (!value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::options::{EmployeeBand, Region};
    use crate::report::renderer::ReportRenderer;

    #[test]
    fn estimate_export_uses_answer_labels() {
        let answers = FormAnswers {
            company_name: "Érablière Roy".to_string(),
            location: Some(Region::Estrie),
            employees: Some(EmployeeBand::FiveToNine),
            ..FormAnswers::default()
        };
        let page = ReportRenderer.render(&answers, None);

        let request = ExportRequest::from_view(page.report(), &answers);
        let body = serde_json::to_value(&request).expect("serializes");

        assert_eq!(body["calc"]["companyName"], "Érablière Roy");
        assert_eq!(body["calc"]["locationLabel"], "Estrie, Québec");
        assert_eq!(body["calc"]["industryLabel"], "-");
        assert_eq!(body["calc"]["employeesLabel"], "5–9");
        assert_eq!(body["estimates"]["budget"], 250_000.0);
        assert_eq!(body["estimates"]["intensityLow"], 35.0);
        assert_eq!(body["topPrograms"].as_array().map(Vec::len), Some(3));
        assert_eq!(body["topPrograms"][0]["type"], "Non-repayable grant");
        assert_eq!(body["checklist"].as_array().map(Vec::len), Some(11));
    }

    #[test]
    fn request_parsing_tolerates_missing_blocks() {
        let request: ExportRequest =
            serde_json::from_str(r#"{"calc": {"companyName": "Acme"}}"#).expect("parses");
        assert_eq!(request.calc.company_name, "Acme");
        assert!(request.top_programs.is_empty());
        assert_eq!(request.estimates.intensity_low, None);
    }

    #[test]
    fn content_disposition_filename_is_extracted() {
        assert_eq!(
            attachment_filename(r#"attachment; filename="acme-funding-report.html""#).as_deref(),
            Some("acme-funding-report.html")
        );
        assert_eq!(attachment_filename("inline"), None);
    }
}
