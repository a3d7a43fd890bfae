//! Assembly of the render-then-write pipeline.

use std::path::PathBuf;

use log::warn;
use thiserror::Error;

use crate::config::{LayoutConfig, StyleConfig};
use crate::error::{ErrorClass, ExportError, FontError, RenderError};
use crate::fonts::{self, LoadedFont, TrueTypeMeasurer};
use crate::measure::{MetricsMeasurer, TextMeasurer};
use crate::model::{ArticleRecord, Document};
use crate::pdf::{FontSource, PdfWriter};
use crate::renderer::{DocumentRenderer, DEFAULT_DOCUMENT_TITLE};

/// Which font the digest is set in.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FontChoice {
    /// Use the discovered TrueType font, falling back to Helvetica when none is found.
    #[default]
    Auto,
    /// Always use the PDF built-in Helvetica.
    Builtin,
    /// Load the TrueType font at this path; failing to do so is an error.
    File(PathBuf),
}

/// Errors produced while building or running a [`Digest`].
#[derive(Debug, Error)]
pub enum DigestError {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("font loading failed: {0}")]
    FontLoad(#[from] FontError),

    /// A block size the embedded TrueType font cannot be measured at.
    #[error("TrueType fonts need whole point sizes between 1 and 255, got {font_size}")]
    UnsupportedFontSize { font_size: f32 },

    #[cfg(feature = "bookmarks")]
    #[error(transparent)]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

impl DigestError {
    /// Client-class for bad input, server-class for everything else.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Render(err) => err.class(),
            Self::UnsupportedFontSize { .. } => ErrorClass::Client,
            _ => ErrorClass::Server,
        }
    }
}

/// Builder for [`Digest`] instances pre-configured with the crate defaults.
#[derive(Debug, Default)]
pub struct DigestBuilder {
    title: Option<String>,
    layout: LayoutConfig,
    style: StyleConfig,
    font: FontChoice,
    fonts_dir: Option<PathBuf>,
    bookmarks: bool,
}

impl DigestBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the page geometry.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the paper size in points.
    pub fn with_paper_size(mut self, width: f32, height: f32) -> Self {
        self.layout.page_width = width;
        self.layout.page_height = height;
        self
    }

    /// Sets the margin applied on every side.
    pub fn with_margin(mut self, margin: f32) -> Self {
        self.layout.margin = margin;
        self
    }

    /// Replaces the block styles.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Selects the font.
    pub fn with_font(mut self, font: FontChoice) -> Self {
        self.font = font;
        self
    }

    /// Searches `dir` for the font before the default locations.
    pub fn with_fonts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(dir.into());
        self
    }

    /// Adds one outline entry per article to the written PDF.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Loads the font and builds a ready-to-run [`Digest`].
    pub fn build(self) -> Result<Digest, DigestError> {
        let (measurer, font): (Box<dyn TextMeasurer>, FontSource) = match &self.font {
            FontChoice::Builtin => builtin(),
            FontChoice::File(path) => embedded(LoadedFont::load(path)?),
            FontChoice::Auto => match fonts::resolve_font_file_with(self.fonts_dir.as_deref()) {
                Ok(path) => embedded(LoadedFont::load(path)?),
                Err(err) => {
                    warn!("{}; falling back to built-in Helvetica", err);
                    builtin()
                }
            },
        };

        if let FontSource::Embedded(_) = font {
            check_truetype_sizes(&self.style)?;
        }

        let renderer = DocumentRenderer::new(measurer)
            .with_layout(self.layout)
            .with_style(self.style)
            .with_title(
                self.title
                    .unwrap_or_else(|| DEFAULT_DOCUMENT_TITLE.to_owned()),
            );

        Ok(Digest {
            renderer,
            writer: PdfWriter::new(font),
            bookmarks: self.bookmarks,
        })
    }
}

fn check_truetype_sizes(style: &StyleConfig) -> Result<(), DigestError> {
    match style
        .blocks()
        .into_iter()
        .find(|block| !TrueTypeMeasurer::supports_size(block.font_size))
    {
        Some(block) => Err(DigestError::UnsupportedFontSize {
            font_size: block.font_size,
        }),
        None => Ok(()),
    }
}

fn builtin() -> (Box<dyn TextMeasurer>, FontSource) {
    (
        Box::new(MetricsMeasurer::helvetica()),
        FontSource::default(),
    )
}

fn embedded(font: LoadedFont) -> (Box<dyn TextMeasurer>, FontSource) {
    let (bytes, measurer) = font.into_parts();
    (Box::new(measurer), FontSource::Embedded(bytes))
}

/// Output of [`Digest::render`].
#[derive(Debug)]
pub struct RenderedPdf {
    /// The serialized PDF.
    pub bytes: Vec<u8>,
    /// The layout the bytes were produced from.
    pub document: Document,
}

/// A configured renderer paired with a PDF writer.
pub struct Digest {
    renderer: DocumentRenderer<Box<dyn TextMeasurer>>,
    writer: PdfWriter,
    bookmarks: bool,
}

impl Digest {
    /// Lays out `articles` without writing any bytes.
    pub fn layout(&self, articles: &[ArticleRecord]) -> Result<Document, RenderError> {
        self.renderer.render(articles)
    }

    /// Lays out `articles` and writes the result as PDF.
    pub fn render(&self, articles: &[ArticleRecord]) -> Result<RenderedPdf, DigestError> {
        let document = self.renderer.render(articles)?;
        let bytes = self.writer.write(&document)?;
        let bytes = self.apply_bookmarks(bytes, articles, &document)?;
        Ok(RenderedPdf { bytes, document })
    }

    #[cfg(feature = "bookmarks")]
    fn apply_bookmarks(
        &self,
        bytes: Vec<u8>,
        articles: &[ArticleRecord],
        document: &Document,
    ) -> Result<Vec<u8>, DigestError> {
        if !self.bookmarks {
            return Ok(bytes);
        }
        Ok(crate::bookmarks::apply_article_bookmarks(
            &bytes,
            articles,
            document.article_pages(),
        )?)
    }

    #[cfg(not(feature = "bookmarks"))]
    fn apply_bookmarks(
        &self,
        bytes: Vec<u8>,
        _articles: &[ArticleRecord],
        _document: &Document,
    ) -> Result<Vec<u8>, DigestError> {
        debug_assert!(!self.bookmarks);
        Ok(bytes)
    }
}
