#![allow(dead_code)]

pub mod fixtures;
pub mod pdf_assertions;

use auditpdf::{Document, DocumentAssembler, ExportConfig, ExportError, ExportOutput};
use lopdf::Document as LopdfDocument;

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Wrapper around a generated PDF with helper methods
pub struct GeneratedPdf {
    pub bytes: Vec<u8>,
    pub doc: LopdfDocument,
}

impl GeneratedPdf {
    /// Create a GeneratedPdf from raw bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Box<dyn std::error::Error>> {
        let doc = LopdfDocument::load_mem(&bytes)?;
        Ok(Self { bytes, doc })
    }

    /// Get the number of pages in the PDF
    pub fn page_count(&self) -> usize {
        self.doc.get_pages().len()
    }

    /// Strings drawn on one page (1-based), in drawing order
    pub fn page_strings(&self, page: u32) -> Vec<String> {
        pdf_assertions::page_strings(&self.doc, page)
    }

    /// Save PDF to a file for manual debugging
    pub fn save_for_debug(&self, name: &str) -> std::io::Result<()> {
        std::fs::write(format!("test_output_{}.pdf", name), &self.bytes)
    }
}

/// Export with the given config and parse the result back.
pub fn export_with(
    config: ExportConfig,
    document: &Document,
) -> Result<(ExportOutput, GeneratedPdf), Box<dyn std::error::Error>> {
    let output = DocumentAssembler::new(config).assemble(document)?;
    let pdf = GeneratedPdf::from_bytes(output.bytes.clone())?;
    Ok((output, pdf))
}

/// Export with the default config and parse the result back.
pub fn export(document: &Document) -> Result<(ExportOutput, GeneratedPdf), Box<dyn std::error::Error>> {
    export_with(ExportConfig::default(), document)
}

/// Export without parsing, for tests that inspect the error.
pub fn try_export(document: &Document) -> Result<ExportOutput, ExportError> {
    DocumentAssembler::default().assemble(document)
}
