//! Turns article records into a paginated [`Document`].

use log::{debug, info};

use crate::config::{BlockStyle, LayoutConfig, StyleConfig};
use crate::error::{RenderError, ValidationError};
use crate::flow::{PageFlowController, PageGeometry};
use crate::measure::TextMeasurer;
use crate::model::{ArticleRecord, Document, Page};
use crate::wrap::wrap_run;

/// Title given to documents unless the caller picks one.
pub const DEFAULT_DOCUMENT_TITLE: &str = "News Digest";

/// Lays out article records with a single measurer, layout and style.
///
/// Each article contributes, in order: the title, a small gap, the source/date and author lines,
/// the link, the summary and a larger gap before the next article.  A render owns its own cursor
/// and page list, so a renderer can be reused for any number of documents.
#[derive(Clone, Debug)]
pub struct DocumentRenderer<M> {
    measurer: M,
    layout: LayoutConfig,
    style: StyleConfig,
    title: String,
}

impl<M: TextMeasurer> DocumentRenderer<M> {
    /// Creates a renderer with the default layout and style.
    pub fn new(measurer: M) -> Self {
        Self {
            measurer,
            layout: LayoutConfig::default(),
            style: StyleConfig::default(),
            title: DEFAULT_DOCUMENT_TITLE.to_owned(),
        }
    }

    /// Sets the layout and returns the updated renderer.
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Sets the block styles and returns the updated renderer.
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Sets the document title and returns the updated renderer.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn measurer(&self) -> &M {
        &self.measurer
    }

    /// Renders `articles` in input order.
    ///
    /// Fails with [`ValidationError`] before any layout happens when the list is empty, a record
    /// lacks a title or summary, or the layout cannot hold a line.  Measurement failures abort
    /// the render.
    pub fn render(&self, articles: &[ArticleRecord]) -> Result<Document, RenderError> {
        validate_articles(articles)?;
        self.layout.validate(&self.style)?;

        let mut flow = PageFlowController::new(PageGeometry::from(&self.layout), Vec::new());
        let mut article_pages = Vec::with_capacity(articles.len());

        for (index, article) in articles.iter().enumerate() {
            debug!("laying out article {} ({:?})", index, article.title);
            article_pages.push(self.render_article(&mut flow, article)?);
        }

        let pages: Vec<Page> = flow.finish();
        info!(
            "rendered {} articles onto {} pages",
            articles.len(),
            pages.len()
        );
        Ok(Document::new(self.title.clone(), pages, article_pages))
    }

    /// Emits one article and returns the page its title starts on.
    fn render_article(
        &self,
        flow: &mut PageFlowController<Vec<Page>>,
        article: &ArticleRecord,
    ) -> Result<usize, RenderError> {
        let style = &self.style;

        let start_page = self.emit(flow, style.title, &article.title)?;
        flow.consume(self.layout.inter_block_gap);

        self.emit(flow, style.metadata, &article.metadata_line())?;
        self.emit(flow, style.metadata, &article.author_line())?;
        self.emit(flow, style.link, &article.url)?;

        if style.keep_paragraphs {
            for paragraph in article.summary.lines() {
                self.emit(flow, style.summary, paragraph)?;
            }
        } else {
            self.emit(flow, style.summary, &article.summary)?;
        }
        flow.consume(self.layout.inter_article_gap);

        Ok(start_page.unwrap_or_else(|| flow.current_page()))
    }

    /// Wraps `text` in `block` style and places every line, returning the first line's page.
    fn emit(
        &self,
        flow: &mut PageFlowController<Vec<Page>>,
        block: BlockStyle,
        text: &str,
    ) -> Result<Option<usize>, RenderError> {
        let run = block.run(text);
        let line_height = self.layout.line_advance(block.font_size);
        let lines = wrap_run(&run, &self.measurer, self.layout.content_width())?;

        let mut first_page = None;
        for line in &lines {
            let placed = flow.place(line, line_height);
            first_page.get_or_insert(placed.page);
        }
        Ok(first_page)
    }
}

/// Rejects empty input and records without a title or summary.
pub(crate) fn validate_articles(articles: &[ArticleRecord]) -> Result<(), ValidationError> {
    if articles.is_empty() {
        return Err(ValidationError::NoArticles);
    }

    for (index, article) in articles.iter().enumerate() {
        if article.title.trim().is_empty() {
            return Err(ValidationError::MissingField {
                index,
                field: "title",
            });
        }
        if article.summary.trim().is_empty() {
            return Err(ValidationError::MissingField {
                index,
                field: "summary",
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeasurementError;
    use crate::measure::MetricsMeasurer;

    fn renderer() -> DocumentRenderer<MetricsMeasurer> {
        DocumentRenderer::new(MetricsMeasurer::helvetica())
    }

    fn article(title: &str, summary: &str) -> ArticleRecord {
        ArticleRecord::new(title, summary)
            .with_source("Wire")
            .with_url("https://example.com/story")
            .with_author("Reporter")
    }

    fn texts(document: &Document) -> Vec<&str> {
        document
            .placements()
            .map(|(_, placement)| placement.text.as_str())
            .collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        let err = renderer().render(&[]).unwrap_err();
        assert_eq!(err, RenderError::Validation(ValidationError::NoArticles));
    }

    #[test]
    fn missing_title_names_field_and_index() {
        let articles = [article("Fine", "ok"), article("  ", "ok")];
        let err = renderer().render(&articles).unwrap_err();
        assert_eq!(
            err,
            RenderError::Validation(ValidationError::MissingField {
                index: 1,
                field: "title"
            })
        );
    }

    #[test]
    fn missing_summary_names_field() {
        let err = renderer().render(&[article("Title", "")]).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Validation(ValidationError::MissingField {
                field: "summary",
                ..
            })
        ));
    }

    #[test]
    fn blocks_are_emitted_in_fixed_order() {
        let document = renderer().render(&[article("Headline", "Short summary.")]).unwrap();
        assert_eq!(
            texts(&document),
            vec![
                "Headline",
                "Wire | date unknown",
                "By Reporter",
                "https://example.com/story",
                "Short summary.",
            ]
        );
    }

    #[test]
    fn gaps_follow_title_and_summary_only() {
        let layout = LayoutConfig::default();
        let document = renderer()
            .render(&[article("One", "First."), article("Two", "Second.")])
            .unwrap();
        let ys: Vec<f32> = document.placements().map(|(_, p)| p.y).collect();

        let title_advance = layout.line_advance(18.0);
        let small = layout.line_advance(10.0);
        let body = layout.line_advance(12.0);

        assert_eq!(ys[0], layout.page_height - layout.margin);
        assert_eq!(ys[1], ys[0] - title_advance - layout.inter_block_gap);
        assert_eq!(ys[2], ys[1] - small);
        assert_eq!(ys[3], ys[2] - small);
        assert_eq!(ys[4], ys[3] - small);
        assert_eq!(ys[5], ys[4] - body - layout.inter_article_gap);
    }

    #[test]
    fn keep_paragraphs_wraps_summary_lines_separately() {
        let style = StyleConfig {
            keep_paragraphs: true,
            ..StyleConfig::default()
        };
        let document = renderer()
            .with_style(style)
            .render(&[article("T", "1/ first point\n\n2/ second point")])
            .unwrap();
        let texts = texts(&document);
        assert_eq!(&texts[4..], &["1/ first point", "2/ second point"]);
    }

    #[test]
    fn invalid_layout_is_a_validation_error() {
        let layout = LayoutConfig {
            margin: 400.0,
            ..LayoutConfig::default()
        };
        let err = renderer()
            .with_layout(layout)
            .render(&[article("T", "S")])
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::Validation(ValidationError::Layout(_))
        ));
    }

    #[test]
    fn measurement_errors_abort_the_render() {
        struct Failing;

        impl TextMeasurer for Failing {
            fn measure(&self, text: &str, font_size: f32) -> Result<f32, MeasurementError> {
                Err(MeasurementError::new(text, font_size, "no metrics"))
            }
        }

        let err = DocumentRenderer::new(Failing)
            .render(&[article("Two words", "summary")])
            .unwrap_err();
        assert!(matches!(err, RenderError::Measurement(_)));
    }

    #[test]
    fn records_start_page_per_article() {
        let document = renderer()
            .render(&[article("A", "a"), article("B", "b")])
            .unwrap();
        assert_eq!(document.article_pages(), &[1, 1]);
        assert_eq!(document.title(), DEFAULT_DOCUMENT_TITLE);
    }
}
