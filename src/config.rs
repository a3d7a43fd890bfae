//! Layout and style configuration.
//!
//! All lengths are PDF points (1/72 inch).  [`LayoutConfig`] can be deserialized from JSON with
//! every field optional, so a configuration file only needs to mention what it overrides.

use serde::Deserialize;

use crate::error::ValidationError;
use crate::richtext::{Rgb, TextRun};

/// A4 portrait width in points.
pub const A4_WIDTH: f32 = 595.28;
/// A4 portrait height in points.
pub const A4_HEIGHT: f32 = 841.89;

/// Ratio between font size and the minimum line advance for that size.
pub const LEADING: f32 = 1.2;

/// Page geometry and vertical rhythm.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub page_width: f32,
    pub page_height: f32,
    /// Margin applied on every side of the page.
    pub margin: f32,
    /// Line advance for body text.
    pub line_height: f32,
    /// Gap below an article title.
    pub inter_block_gap: f32,
    /// Gap below an article summary.
    pub inter_article_gap: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 50.0,
            line_height: 16.0,
            inter_block_gap: 6.0,
            inter_article_gap: 20.0,
        }
    }
}

impl LayoutConfig {
    /// Maximum width of a line: page width minus left and right margins.
    pub fn content_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Vertical space between the top and bottom margins.
    pub fn content_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Line advance for text set at `font_size`.
    pub fn line_advance(&self, font_size: f32) -> f32 {
        self.line_height.max(font_size * LEADING)
    }

    /// Checks that the geometry can hold at least one line of every style in `style`.
    pub fn validate(&self, style: &StyleConfig) -> Result<(), ValidationError> {
        let values = [
            ("page_width", self.page_width),
            ("page_height", self.page_height),
            ("margin", self.margin),
            ("line_height", self.line_height),
            ("inter_block_gap", self.inter_block_gap),
            ("inter_article_gap", self.inter_article_gap),
        ];
        for (name, value) in values {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::Layout(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.line_height <= 0.0 {
            return Err(ValidationError::Layout(
                "line_height must be greater than zero".to_owned(),
            ));
        }

        if self.content_width() <= 0.0 {
            return Err(ValidationError::Layout(format!(
                "margins of {} leave no content width on a {}pt wide page",
                self.margin, self.page_width
            )));
        }

        let tallest = style
            .blocks()
            .iter()
            .map(|block| self.line_advance(block.font_size))
            .fold(self.line_height, f32::max);
        if tallest > self.content_height() {
            return Err(ValidationError::Layout(format!(
                "a {tallest}pt line does not fit into {}pt of content height",
                self.content_height()
            )));
        }

        for block in style.blocks() {
            if !block.font_size.is_finite() || block.font_size <= 0.0 {
                return Err(ValidationError::Layout(format!(
                    "font sizes must be positive, got {}",
                    block.font_size
                )));
            }
        }

        Ok(())
    }
}

/// Font size and colour for one kind of block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    pub font_size: f32,
    pub color: Rgb,
}

impl BlockStyle {
    pub fn new(font_size: f32, color: Rgb) -> Self {
        Self { font_size, color }
    }

    /// Creates a run of `text` in this style.
    pub fn run(&self, text: impl Into<String>) -> TextRun {
        TextRun::new(text, self.font_size).with_color(self.color)
    }
}

/// Styles for the four blocks rendered per article.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    pub title: BlockStyle,
    /// Source, date and author lines.
    pub metadata: BlockStyle,
    pub link: BlockStyle,
    pub summary: BlockStyle,
    /// Wrap each line of a summary separately instead of as one run.
    pub keep_paragraphs: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title: BlockStyle::new(18.0, Rgb::BLACK),
            metadata: BlockStyle::new(10.0, Rgb::new(0.4, 0.4, 0.4)),
            link: BlockStyle::new(10.0, Rgb::new(0.1, 0.3, 0.8)),
            summary: BlockStyle::new(12.0, Rgb::BLACK),
            keep_paragraphs: false,
        }
    }
}

impl StyleConfig {
    pub(crate) fn blocks(&self) -> [BlockStyle; 4] {
        [self.title, self.metadata, self.link, self.summary]
    }
}
