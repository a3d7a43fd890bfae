//! Text width measurement.
//!
//! The layout engine only ever asks one question of a font: how wide is this text at this size.
//! [`TextMeasurer`] captures that capability; [`MetricsMeasurer`] answers it from a per-character
//! width table and [`crate::fonts::TrueTypeMeasurer`] from a loaded TrueType font.

use crate::error::MeasurementError;

/// Reports the rendered width of a text run for a single bound font.
pub trait TextMeasurer {
    /// Returns the width of `text` at `font_size` points, in points.
    fn measure(&self, text: &str, font_size: f32) -> Result<f32, MeasurementError>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn measure(&self, text: &str, font_size: f32) -> Result<f32, MeasurementError> {
        (**self).measure(text, font_size)
    }
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for Box<M> {
    fn measure(&self, text: &str, font_size: f32) -> Result<f32, MeasurementError> {
        (**self).measure(text, font_size)
    }
}

/// Advance widths for printable ASCII (`' '..='~'`) in Helvetica, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

/// Width table for a single font, in em units.
#[derive(Clone, Debug, PartialEq)]
pub struct FontMetrics {
    /// Widths of printable ASCII characters starting at `' '`.
    pub char_widths: Vec<f32>,
    /// Width used for characters outside the table.
    pub default_width: f32,
}

impl FontMetrics {
    pub fn new(char_widths: Vec<f32>, default_width: f32) -> Self {
        Self {
            char_widths,
            default_width,
        }
    }

    /// Metrics of the standard Helvetica face, matching the PDF built-in font.
    pub fn helvetica() -> Self {
        Self::new(
            HELVETICA_WIDTHS
                .iter()
                .map(|&width| width as f32 / 1000.0)
                .collect(),
            0.556,
        )
    }

    /// Metrics where every character advances by `width` em.
    pub fn monospace(width: f32) -> Self {
        Self::new(vec![width; HELVETICA_WIDTHS.len()], width)
    }

    /// Width of a single character in em.
    pub fn width(&self, c: char) -> f32 {
        if c.is_ascii() && !c.is_ascii_control() {
            if let Some(w) = self.char_widths.get(c as usize - ' ' as usize) {
                return *w;
            }
        }
        if c.is_control() {
            0.0
        } else {
            self.default_width
        }
    }
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self::helvetica()
    }
}

/// Measures text by summing per-character widths from a [`FontMetrics`] table.
#[derive(Clone, Debug, Default)]
pub struct MetricsMeasurer {
    metrics: FontMetrics,
}

impl MetricsMeasurer {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }

    /// Measurer matching the PDF built-in Helvetica font.
    pub fn helvetica() -> Self {
        Self::new(FontMetrics::helvetica())
    }

    /// Measurer where every character is `width` em wide.
    pub fn monospace(width: f32) -> Self {
        Self::new(FontMetrics::monospace(width))
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }
}

impl TextMeasurer for MetricsMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> Result<f32, MeasurementError> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(MeasurementError::new(
                text,
                font_size,
                "font size must be a positive number",
            ));
        }
        let em: f32 = text.chars().map(|c| self.metrics.width(c)).sum();
        Ok(em * font_size)
    }
}
