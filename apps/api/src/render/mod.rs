// Report Renderer
// Turns one NumerologyReport plus display metadata into a PDF, a DOCX and an
// email HTML fragment. Presentation only: numbers are never recomputed here.
// Rendering is synchronous and CPU-bound; async callers use spawn_blocking.

pub mod docx;
pub mod email;
pub mod markup;
pub mod metrics;
pub mod outline;
pub mod pdf;

use thiserror::Error;

use crate::numerology::{BirthDate, FullName, NumerologyReport};

pub use docx::render_docx;
pub use email::render_email_html;
pub use pdf::render_pdf;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("Font error: {0}")]
    Font(#[from] ttf_parser::FaceParsingError),

    #[error("DOCX archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything a renderer needs: the report and how to present its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub full_name: String,
    /// Birth date as shown to the reader, e.g. `May 15, 1990`.
    pub birth_date: String,
    pub report: NumerologyReport,
}

impl ReportContext {
    pub fn new(full_name: &FullName, birth_date: BirthDate, report: NumerologyReport) -> Self {
        ReportContext {
            full_name: full_name.as_str().to_string(),
            birth_date: birth_date.display(),
            report,
        }
    }
}
