//! Styled text runs and the wrapped lines produced from them.
//!
//! A [`TextRun`] is the unit the renderer hands to the line breaker: a span of text sharing one
//! font size and one colour.  Wrapping a run yields [`Line`] values that carry the same style and
//! are placed on pages by the flow controller.

/// An RGB colour with every channel in the `[0, 1]` range.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    r: f32,
    g: f32,
    b: f32,
}

impl Rgb {
    /// Pure black, the default text colour.
    pub const BLACK: Rgb = Rgb {
        r: 0.0,
        g: 0.0,
        b: 0.0,
    };

    /// Creates a colour, clamping each channel into `[0, 1]`.
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Creates a colour from 8-bit channels.
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Returns the channels as an `(r, g, b)` tuple.
    pub fn channels(&self) -> (f32, f32, f32) {
        (self.r, self.g, self.b)
    }
}

fn clamp_channel(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

impl From<Rgb> for printpdf::Color {
    fn from(color: Rgb) -> Self {
        printpdf::Color::Rgb(printpdf::Rgb::new(
            color.r as f64,
            color.g as f64,
            color.b as f64,
            None,
        ))
    }
}

/// A slice of text together with the style it is rendered in.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    text: String,
    font_size: f32,
    color: Rgb,
}

impl TextRun {
    /// Creates a run rendered in black at `font_size` points.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
            color: Rgb::BLACK,
        }
    }

    /// Sets the colour and returns the updated run.
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    /// Returns the raw text of the run.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the font size in points.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the run colour.
    pub fn color(&self) -> Rgb {
        self.color
    }

    /// Builds a line from wrapped text that inherits this run's style.
    pub fn line(&self, text: impl Into<String>) -> Line {
        Line {
            text: text.into(),
            font_size: self.font_size,
            color: self.color,
        }
    }
}

/// One wrapped line of a [`TextRun`].
///
/// The text is the line's words joined by single spaces.  Lines are never modified once the line
/// breaker has produced them.
#[derive(Clone, Debug, PartialEq)]
pub struct Line {
    text: String,
    font_size: f32,
    color: Rgb,
}

impl Line {
    /// Returns the reconstructed line text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Iterates over the words on the line in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.text.split_whitespace()
    }

    /// Returns the font size inherited from the run.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Returns the colour inherited from the run.
    pub fn color(&self) -> Rgb {
        self.color
    }
}
