use crate::config::ExportConfig;
use crate::error::{ExportError, Warning};
use crate::image::ImageProcessor;
use crate::source::LoadedDocument;
use auditpdf_layout::{
    FontMetrics, LayoutEngine, NavigationLinker, PaginationSettings, Paginator, SectionPageMap,
    TextMeasurer, TocEntry, TocGrid, TocLayout,
};
use auditpdf_render_lopdf::{CoverLabels, PageRenderer, RenderInput};
use auditpdf_types::{AuditSummary, Document};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;

#[cfg(feature = "native")]
use std::io::Write;
#[cfg(feature = "native")]
use std::path::Path;

/// A finished report.
#[derive(Debug, Clone)]
pub struct ExportOutput {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub page_count: usize,
    pub section_pages: SectionPageMap,
    pub warnings: Vec<Warning>,
    pub summary: AuditSummary,
}

/// Runs the whole export: images, layout, pagination, linking and rendering.
///
/// Each call to [`assemble`](Self::assemble) is independent and reads the
/// document without modifying it, so the same assembler can export any
/// number of documents.
#[derive(Debug, Clone)]
pub struct DocumentAssembler {
    config: ExportConfig,
    measurer: TextMeasurer,
}

impl DocumentAssembler {
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            measurer: TextMeasurer::default(),
        }
    }

    /// Measures and embeds text with `metrics` instead of the built-in
    /// Helvetica tables.
    pub fn with_font_metrics(mut self, metrics: Arc<dyn FontMetrics>) -> Self {
        self.measurer = TextMeasurer::new(metrics);
        self
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn assemble(&self, document: &Document) -> Result<ExportOutput, ExportError> {
        self.assemble_with(document, Vec::new())
    }

    /// Exports a document read by [`DocumentSource`](crate::DocumentSource).
    /// Images skipped while loading are reported ahead of the export's own
    /// warnings.
    pub fn assemble_loaded(&self, loaded: &LoadedDocument) -> Result<ExportOutput, ExportError> {
        self.assemble_with(&loaded.document, loaded.warnings.clone())
    }

    fn assemble_with(&self, document: &Document, mut warnings: Vec<Warning>) -> Result<ExportOutput, ExportError> {
        self.config.validate()?;
        validate_ids(document)?;
        let config = &self.config;
        let summary = document.summary();
        info!(
            "[EXPORT] Starting export of {} sections, {} items for '{}'.",
            document.sections.len(),
            summary.total,
            document.metadata.subject
        );

        let batch = ImageProcessor::new(config.images)
            .with_parallelism(config.parallel_images)
            .process_batch(document.items());
        warnings.extend(batch.failures.into_iter().map(Warning::from));
        let images = batch.images;

        let engine = LayoutEngine::new(self.measurer.clone(), &config.page);
        let settings = PaginationSettings::for_page(&config.page)
            .with_section_break(config.section_break)
            .with_include_pending(config.include_pending);
        let pagination = Paginator::new(&engine, settings).paginate(&document.sections, &images)?;
        warnings.extend(pagination.overflows.iter().map(|overflow| Warning::LayoutOverflow {
            item: overflow.item.clone(),
            height: overflow.height,
            available: overflow.available,
        }));

        let entries = TocEntry::from_sections(&document.sections);
        let grid = TocGrid::for_page(&config.page);
        let toc = TocLayout::new(&self.measurer, grid, &entries)?;
        let links = NavigationLinker::new(grid).link(&pagination.section_pages, &entries)?;
        debug!(
            "[EXPORT] Paginated into {} pages with {} table of contents links.",
            pagination.total_pages(),
            links.len()
        );

        let renderer = PageRenderer::for_engine(&engine, config.page)
            .with_labels(CoverLabels {
                title: config.cover_title.clone(),
                subtitle: config.cover_subtitle.clone(),
            })
            .with_compression(config.compress);
        let bytes = renderer.render(&RenderInput {
            metadata: &document.metadata,
            summary,
            toc: &toc,
            pagination: &pagination,
            links: &links,
            images: &images,
        })?;

        for warning in &warnings {
            warn!("[EXPORT] {}", warning);
        }
        let output = ExportOutput {
            file_name: self.file_name(document),
            bytes,
            page_count: pagination.total_pages(),
            section_pages: pagination.section_pages,
            warnings,
            summary,
        };
        info!(
            "[EXPORT] Finished '{}': {} pages, {} bytes, {} warnings.",
            output.file_name,
            output.page_count,
            output.bytes.len(),
            output.warnings.len()
        );
        Ok(output)
    }

    /// Assembles the report and writes it into `dir` under its file name.
    ///
    /// The bytes go to a temporary file in the same directory that is renamed
    /// into place only once it is complete, so a failed export never leaves a
    /// partial report behind.
    #[cfg(feature = "native")]
    pub fn export_to_dir(&self, document: &Document, dir: impl AsRef<Path>) -> Result<ExportOutput, ExportError> {
        Self::write_into(self.assemble(document)?, dir.as_ref())
    }

    /// [`export_to_dir`](Self::export_to_dir) for a loaded manifest.
    #[cfg(feature = "native")]
    pub fn export_loaded_to_dir(
        &self,
        loaded: &LoadedDocument,
        dir: impl AsRef<Path>,
    ) -> Result<ExportOutput, ExportError> {
        Self::write_into(self.assemble_loaded(loaded)?, dir.as_ref())
    }

    #[cfg(feature = "native")]
    fn write_into(output: ExportOutput, dir: &Path) -> Result<ExportOutput, ExportError> {
        let mut temp_file = tempfile::NamedTempFile::new_in(dir)?;
        temp_file.write_all(&output.bytes)?;
        temp_file.as_file().sync_all()?;
        let target = dir.join(&output.file_name);
        temp_file.persist(&target).map_err(|e| ExportError::Io(e.error))?;

        info!("[EXPORT] Wrote {}", target.display());
        Ok(output)
    }

    /// `"{prefix}-{subject}-{date}.pdf"` with anything that is not a letter or
    /// digit in the subject and date replaced by `-`.
    pub fn file_name(&self, document: &Document) -> String {
        let metadata = &document.metadata;
        format!(
            "{}-{}-{}.pdf",
            self.config.file_prefix,
            sanitize(&metadata.subject),
            sanitize(&metadata.date)
        )
    }
}

impl Default for DocumentAssembler {
    fn default() -> Self {
        Self::new(ExportConfig::default())
    }
}

fn sanitize(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

fn validate_ids(document: &Document) -> Result<(), ExportError> {
    let mut sections = HashSet::new();
    let mut items = HashSet::new();
    for section in &document.sections {
        if !sections.insert(&section.id) {
            return Err(ExportError::InvalidDocument(format!(
                "section id '{}' is used more than once",
                section.id
            )));
        }
        for item in &section.items {
            if !items.insert(&item.id) {
                return Err(ExportError::InvalidDocument(format!(
                    "item id '{}' is used more than once",
                    item.id
                )));
            }
        }
    }
    Ok(())
}
