//! Paginated layout of summarized news articles.
//!
//! Article records are wrapped to the content width ([`wrap`]), flowed down fixed-size pages
//! ([`flow`]) by the [`renderer::DocumentRenderer`], and the finished [`model::Document`] is
//! written to PDF by [`pdf::PdfWriter`].  [`builder::DigestBuilder`] wires the pieces together.

pub mod builder;
pub mod config;
pub mod error;
pub mod flow;
pub mod fonts;
pub mod input;
pub mod measure;
pub mod model;
pub mod pdf;
pub mod renderer;
pub mod richtext;
pub mod sample;
pub mod text;
pub mod wrap;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{Digest, DigestBuilder, DigestError, FontChoice, RenderedPdf};
pub use config::{BlockStyle, LayoutConfig, StyleConfig};
pub use error::{ErrorClass, MeasurementError, RenderError, ValidationError};
pub use measure::{MetricsMeasurer, TextMeasurer};
pub use model::{ArticleRecord, Document, Page, Placement};
pub use renderer::DocumentRenderer;
