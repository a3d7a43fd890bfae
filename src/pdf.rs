//! Serializes a laid-out [`Document`] to PDF bytes with `printpdf`.
//!
//! The layout works in points with the origin at the bottom-left page corner, the same convention
//! printpdf uses, so every placement maps to one `use_text` call after a unit conversion.

use std::io::BufWriter;

use log::info;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference};

use crate::error::ExportError;
use crate::model::{Document, Page};

const MM_PER_POINT: f64 = 25.4 / 72.0;
const LAYER_NAME: &str = "Text";

fn mm(points: f32) -> Mm {
    Mm(points as f64 * MM_PER_POINT)
}

/// The font used for every placement.
#[derive(Clone, Debug)]
pub enum FontSource {
    /// One of the 14 standard PDF fonts; nothing is embedded.
    Builtin(BuiltinFont),
    /// TrueType data embedded into the output.
    Embedded(Vec<u8>),
}

impl Default for FontSource {
    fn default() -> Self {
        Self::Builtin(BuiltinFont::Helvetica)
    }
}

/// Writes documents to PDF.
#[derive(Clone, Debug, Default)]
pub struct PdfWriter {
    font: FontSource,
}

impl PdfWriter {
    pub fn new(font: FontSource) -> Self {
        Self { font }
    }

    /// Renders every page of `document` and returns the PDF bytes.
    pub fn write(&self, document: &Document) -> Result<Vec<u8>, ExportError> {
        let first = document.pages().first().ok_or(ExportError::EmptyDocument)?;

        let (pdf, first_page, first_layer) = PdfDocument::new(
            document.title(),
            mm(first.width()),
            mm(first.height()),
            LAYER_NAME,
        );
        let font = self.install_font(&pdf)?;

        let mut layers = vec![(first_page, first_layer)];
        for page in &document.pages()[1..] {
            layers.push(pdf.add_page(mm(page.width()), mm(page.height()), LAYER_NAME));
        }

        for (page, (page_index, layer_index)) in document.pages().iter().zip(layers) {
            let layer = pdf.get_page(page_index).get_layer(layer_index);
            draw_page(&layer, page, &font);
        }

        let mut writer = BufWriter::new(Vec::new());
        pdf.save(&mut writer)
            .map_err(|err| ExportError::Pdf(err.to_string()))?;
        let bytes = writer
            .into_inner()
            .map_err(|err| ExportError::Io(err.into_error()))?;

        info!(
            "wrote {} pages to {} PDF bytes",
            document.page_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    fn install_font(&self, pdf: &PdfDocumentReference) -> Result<IndirectFontRef, ExportError> {
        let font = match &self.font {
            FontSource::Builtin(builtin) => pdf.add_builtin_font(builtin.clone()),
            FontSource::Embedded(bytes) => pdf.add_external_font(bytes.as_slice()),
        };
        font.map_err(|err| ExportError::Pdf(err.to_string()))
    }
}

fn draw_page(layer: &printpdf::PdfLayerReference, page: &Page, font: &IndirectFontRef) {
    for placement in page.placements() {
        layer.set_fill_color(placement.color.into());
        layer.use_text(
            placement.text.as_str(),
            placement.font_size as f64,
            mm(placement.x),
            mm(placement.y),
            font,
        );
    }
}
