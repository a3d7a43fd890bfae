//! Error types shared by the layout engine and its collaborators.

use std::io;

use thiserror::Error;

/// Broad classification used by front ends to pick a response category.
///
/// Validation problems are the caller's fault and map to a client-error class;
/// everything else is reported as a server-side failure without exposing
/// internal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input violated a contract (missing fields, nothing to render).
    Client,
    /// Layout or measurement failed while processing valid input.
    Server,
}

/// Missing or empty required input.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// The article list was empty.
    #[error("no articles to render")]
    NoArticles,

    /// A record lacks one of the fields the renderer refuses to guess.
    #[error("article {index} is missing required field `{field}`")]
    MissingField {
        /// Zero-based position of the offending record in the input.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },

    /// The layout configuration cannot hold a single line of text.
    #[error("invalid layout: {0}")]
    Layout(String),
}

/// The measurer could not report a usable width for a run of text.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("failed to measure {text:?} at {font_size}pt: {reason}")]
pub struct MeasurementError {
    /// The text whose width was requested.
    pub text: String,
    /// The requested font size in points.
    pub font_size: f32,
    /// Human-readable cause.
    pub reason: String,
}

impl MeasurementError {
    /// Creates a new measurement error for `text` at `font_size`.
    pub fn new(text: impl Into<String>, font_size: f32, reason: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font_size,
            reason: reason.into(),
        }
    }
}

/// Errors raised while turning article records into a laid-out document.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum RenderError {
    /// Input failed validation; nothing was rendered.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Width measurement failed part-way through the render.
    #[error(transparent)]
    Measurement(#[from] MeasurementError),
}

impl RenderError {
    /// Returns the response class the error should be surfaced as.
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Validation(_) => ErrorClass::Client,
            Self::Measurement(_) => ErrorClass::Server,
        }
    }
}

/// Errors raised while serializing a document to bytes.
#[derive(Debug, Error)]
pub enum ExportError {
    /// printpdf rejected a font or failed to write the document.
    #[error("PDF writer error: {0}")]
    Pdf(String),

    /// Writing the output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document had no pages to write.
    #[error("document has no pages")]
    EmptyDocument,
}

/// Errors raised while reading article records from JSON.
#[derive(Debug, Error)]
pub enum InputError {
    /// The input file could not be read.
    #[error("failed to read articles: {0}")]
    Io(#[from] io::Error),

    /// The input was not valid JSON.
    #[error("malformed article JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The JSON was valid but neither a record array nor a summaries envelope.
    #[error("unexpected article JSON: {0}")]
    Shape(String),

    /// A record could not be read.
    #[error("article {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// A record field held a value of the wrong type or format.
    #[error("article {index}: invalid `{field}`: {source}")]
    Field {
        index: usize,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    /// The summaries envelope reported a failed upstream request.
    #[error("upstream summarization reported failure: {0}")]
    Upstream(String),
}

/// Errors raised while locating or loading a TrueType font.
#[derive(Debug, Error)]
pub enum FontError {
    /// None of the candidate directories held the expected font file.
    #[error("unable to locate font file; checked: {0}")]
    NotFound(String),

    /// The font file exists but could not be read.
    #[error("failed to read font file: {0}")]
    Io(#[from] io::Error),

    /// genpdf could not parse the font data.
    #[error("failed to load font data: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_client_class() {
        let err = RenderError::from(ValidationError::NoArticles);
        assert_eq!(err.class(), ErrorClass::Client);
    }

    #[test]
    fn measurement_errors_are_server_class() {
        let err = RenderError::from(MeasurementError::new("x", 12.0, "no glyphs"));
        assert_eq!(err.class(), ErrorClass::Server);
    }

    #[test]
    fn missing_field_message_names_the_field() {
        let err = ValidationError::MissingField {
            index: 2,
            field: "summary",
        };
        assert_eq!(
            err.to_string(),
            "article 2 is missing required field `summary`"
        );
    }
}
