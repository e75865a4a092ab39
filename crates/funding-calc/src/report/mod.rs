//! Results page: backend-sourced or locally estimated funding report, plus
//! the document export.

pub mod backend;
pub mod document;
pub mod estimate;
pub mod export;
pub mod labels;
pub mod renderer;
pub mod router;
pub mod views;

pub use backend::{BackendResult, MatchStatus, Reading};
pub use document::{render_document, DocumentError, RenderedDocument};
pub use estimate::{estimate, FallbackEstimate};
pub use export::{
    DocumentExporter, ExportError, ExportRequest, ExportedDocument, HttpDocumentExporter,
};
pub use renderer::{ReportRenderer, COULD_NOT_CALCULATE};
pub use router::{document_router, DOCUMENT_ROUTE};
pub use views::{ReportSource, ReportView, ResultsPage};
