mod assembler;
mod canvas;
mod debug;
mod doc_context;
mod error;
mod font;
mod grid;
mod image_decode;
mod metrics;
mod model;
mod painter;
mod pdf;
mod pdfinspect;
mod theme;
mod types;
mod wrap;

pub use canvas::{Canvas, Command, Document, Page};
use debug::DebugLogger;
pub use doc_context::{AssemblyPhase, RenderState};
pub use error::CatalogError;
pub use font::{Base14Font, measure_text_width};
pub use grid::{GRID_COLUMNS, GRID_ROWS, TILE_SLOTS, Tile, paginate, tile_count};
pub use image_decode::{DecodeError, DecodedImage, FitEdge, decode, fit_within, scaled_size};
pub use metrics::{DocumentMetrics, PageKind, PageMetrics};
pub use model::{CatalogDocument, Contact, ImagePayload, Item, Section};
use painter::PainterOptions;
pub use painter::{
    Shadow, TextAlign, draw_shadowed_polygon, draw_shadowed_rect, draw_shadowed_text,
    format_phone, label_lines, slot_origin,
};
use pdf::PdfOptions;
pub use pdfinspect::{
    PdfInspectError, PdfInspectErrorCode, PdfInspectReport, inspect_pdf_bytes, inspect_pdf_path,
    require_pages,
};
pub use theme::{THEME_COUNT, Theme, theme_for};
pub use types::{Color, Pt, Size};
pub use wrap::wrap;

/// Renders normalized catalog documents into PDF bytes. One renderer can be
/// shared across threads; every call builds its own canvas.
pub struct CatalogRenderer {
    page_size: Size,
    painter_options: PainterOptions,
    pdf_options: PdfOptions,
    debug: Option<DebugLogger>,
}

pub struct CatalogRendererBuilder {
    page_size: Size,
    attribution: String,
    description_wrap: usize,
    attribute_wrap: usize,
    document_title: Option<String>,
    reuse_xobjects: bool,
    debug_path: Option<std::path::PathBuf>,
}

impl CatalogRenderer {
    pub fn builder() -> CatalogRendererBuilder {
        CatalogRendererBuilder::new()
    }

    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Paints every page without serializing. Useful for inspecting layout.
    pub fn render_to_document(&self, catalog: &CatalogDocument) -> Document {
        self.assemble(catalog).document
    }

    pub fn render(&self, catalog: &CatalogDocument) -> Result<Vec<u8>, CatalogError> {
        let (bytes, _metrics) = self.render_with_metrics(catalog)?;
        Ok(bytes)
    }

    pub fn render_with_metrics(
        &self,
        catalog: &CatalogDocument,
    ) -> Result<(Vec<u8>, DocumentMetrics), CatalogError> {
        let start = std::time::Instant::now();
        let assembly = self.assemble(catalog);
        let (bytes, report) = pdf::document_to_pdf(&assembly.document, &self.pdf_options)?;
        let mut pages = assembly.pages;
        for (page, content_bytes) in pages.iter_mut().zip(report.page_content_bytes) {
            page.content_bytes = content_bytes;
        }
        let metrics = DocumentMetrics {
            pages,
            total_render_ms: start.elapsed().as_secs_f64() * 1000.0,
            total_bytes: report.total_bytes,
        };
        self.emit_debug_summary("render");
        Ok((bytes, metrics))
    }

    pub fn render_to_writer<W: std::io::Write>(
        &self,
        catalog: &CatalogDocument,
        writer: &mut W,
    ) -> Result<usize, CatalogError> {
        let assembly = self.assemble(catalog);
        let report = pdf::write_document(writer, &assembly.document, &self.pdf_options)?;
        self.emit_debug_summary("render_to_writer");
        Ok(report.total_bytes)
    }

    pub fn render_to_file(
        &self,
        catalog: &CatalogDocument,
        path: impl AsRef<std::path::Path>,
    ) -> Result<usize, CatalogError> {
        let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
        self.render_to_writer(catalog, &mut file)
    }

    /// Renders independent documents on the rayon pool. Output order matches
    /// input order.
    pub fn render_many_parallel(
        &self,
        catalogs: &[CatalogDocument],
    ) -> Result<Vec<Vec<u8>>, CatalogError> {
        use rayon::prelude::*;

        let results: Vec<Result<Vec<u8>, CatalogError>> = catalogs
            .par_iter()
            .map(|catalog| {
                let assembly = self.assemble(catalog);
                let (bytes, _report) =
                    pdf::document_to_pdf(&assembly.document, &self.pdf_options)?;
                Ok(bytes)
            })
            .collect();
        self.emit_debug_summary("render_many_parallel");
        results.into_iter().collect()
    }

    fn assemble(&self, catalog: &CatalogDocument) -> assembler::Assembly {
        assembler::assemble(
            catalog,
            self.page_size,
            &self.painter_options,
            self.debug.as_ref(),
        )
    }

    fn emit_debug_summary(&self, context: &str) {
        if let Some(logger) = &self.debug {
            logger.emit_summary(context);
        }
    }
}

impl Default for CatalogRendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogRendererBuilder {
    pub fn new() -> Self {
        let defaults = PainterOptions::default();
        Self {
            page_size: Size::a4(),
            attribution: defaults.attribution,
            description_wrap: defaults.description_wrap,
            attribute_wrap: defaults.attribute_wrap,
            document_title: None,
            reuse_xobjects: true,
            debug_path: None,
        }
    }

    pub fn page_size(mut self, size: Size) -> Self {
        self.page_size = size;
        self
    }

    pub fn attribution(mut self, text: impl Into<String>) -> Self {
        self.attribution = text.into();
        self
    }

    // Character budgets for description lines and attribute lines.
    pub fn wrap_widths(mut self, wide: usize, narrow: usize) -> Self {
        self.description_wrap = wide;
        self.attribute_wrap = narrow;
        self
    }

    pub fn document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = Some(title.into());
        self
    }

    pub fn reuse_xobjects(mut self, enabled: bool) -> Self {
        self.reuse_xobjects = enabled;
        self
    }

    // JSON-lines diagnostics: one event per page and skipped image, plus a summary.
    pub fn debug_log(mut self, path: impl Into<std::path::PathBuf>) -> Self {
        self.debug_path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<CatalogRenderer, CatalogError> {
        if self.page_size.width <= Pt::ZERO || self.page_size.height <= Pt::ZERO {
            return Err(CatalogError::InvalidConfiguration(
                "page_size must be positive in both dimensions".to_string(),
            ));
        }
        if self.description_wrap == 0 || self.attribute_wrap == 0 {
            return Err(CatalogError::InvalidConfiguration(
                "wrap widths must be at least one character".to_string(),
            ));
        }
        let debug = match self.debug_path {
            Some(path) => Some(DebugLogger::new(path)?),
            None => None,
        };
        Ok(CatalogRenderer {
            page_size: self.page_size,
            painter_options: PainterOptions {
                attribution: self.attribution,
                description_wrap: self.description_wrap,
                attribute_wrap: self.attribute_wrap,
            },
            pdf_options: PdfOptions {
                reuse_xobjects: self.reuse_xobjects,
                document_title: self.document_title,
            },
            debug,
        })
    }
}
