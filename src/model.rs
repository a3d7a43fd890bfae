//! Data structures for the rendering input and the laid-out output.
//!
//! [`ArticleRecord`] is what the summarization step produces and what the renderer consumes.
//! [`Document`], [`Page`] and [`Placement`] describe the finished layout: every piece of text
//! with its page, coordinates, size and colour, ready for a writer such as [`crate::pdf`] to turn
//! into bytes.  The layout types never reference the PDF crates so they can be inspected in tests
//! or handed to a different writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::richtext::{Line, Rgb};

/// Author shown when the upstream source does not name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

fn unknown_author() -> String {
    UNKNOWN_AUTHOR.to_owned()
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_unknown_author<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|author| !author.trim().is_empty())
        .unwrap_or_else(unknown_author))
}

/// One summarized news article.
///
/// `title` and `summary` default to empty strings when absent or `null` so that the renderer,
/// rather than the JSON layer, reports which record is incomplete.  A `null` or blank author
/// becomes [`UNKNOWN_AUTHOR`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    #[serde(default = "unknown_author", deserialize_with = "null_as_unknown_author")]
    pub author: String,
}

impl ArticleRecord {
    /// Creates a record with the two required fields and an unknown author.
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source: String::new(),
            url: String::new(),
            summary: summary.into(),
            date: None,
            author: unknown_author(),
        }
    }

    /// Sets the source name and returns the updated record.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the article link and returns the updated record.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the publication time and returns the updated record.
    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the author, substituting [`UNKNOWN_AUTHOR`] for blank names.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        let author = author.into();
        self.author = if author.trim().is_empty() {
            unknown_author()
        } else {
            author
        };
        self
    }

    /// Formats the publication time for display.
    pub fn display_date(&self) -> String {
        match self.date {
            Some(date) => date.format("%Y-%m-%d %H:%M UTC").to_string(),
            None => "date unknown".to_owned(),
        }
    }

    /// The source and date line shown under the title.
    pub fn metadata_line(&self) -> String {
        let source = if self.source.trim().is_empty() {
            "Unknown source"
        } else {
            self.source.trim()
        };
        format!("{source} | {}", self.display_date())
    }

    /// The author line shown under the metadata line.
    pub fn author_line(&self) -> String {
        format!("By {}", self.author)
    }
}

/// A piece of text at a fixed position on a page.
///
/// `x` is measured from the left page edge and `y` is the baseline measured upward from the
/// bottom page edge, both in points.
#[derive(Clone, Debug, PartialEq)]
pub struct Placement {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font_size: f32,
    pub color: Rgb,
}

impl Placement {
    /// Places `line` with its baseline at `(x, y)`.
    pub fn from_line(line: &Line, x: f32, y: f32) -> Self {
        Self {
            text: line.text().to_owned(),
            x,
            y,
            font_size: line.font_size(),
            color: line.color(),
        }
    }
}

/// A fixed-size page and the text placed on it.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    number: usize,
    width: f32,
    height: f32,
    placements: Vec<Placement>,
}

impl Page {
    /// Creates an empty page; `number` is 1-based.
    pub fn new(number: usize, width: f32, height: f32) -> Self {
        Self {
            number,
            width,
            height,
            placements: Vec::new(),
        }
    }

    pub fn number(&self) -> usize {
        self.number
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Returns the placements in the order they were made.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub(crate) fn push(&mut self, placement: Placement) {
        self.placements.push(placement);
    }
}

/// A fully laid-out document.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    title: String,
    pages: Vec<Page>,
    article_pages: Vec<usize>,
}

impl Document {
    pub fn new(title: impl Into<String>, pages: Vec<Page>, article_pages: Vec<usize>) -> Self {
        Self {
            title: title.into(),
            pages,
            article_pages,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// The 1-based page on which each article's title starts, in input order.
    pub fn article_pages(&self) -> &[usize] {
        &self.article_pages
    }

    /// Iterates over every placement in reading order.
    pub fn placements(&self) -> impl Iterator<Item = (&Page, &Placement)> {
        self.pages
            .iter()
            .flat_map(|page| page.placements().iter().map(move |p| (page, p)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn missing_author_deserializes_as_unknown() {
        let record: ArticleRecord = serde_json::from_str(
            r#"{ "title": "T", "source": "S", "url": "u", "summary": "x",
                 "date": "2024-05-01T08:30:00Z" }"#,
        )
        .unwrap();
        assert_eq!(record.author, UNKNOWN_AUTHOR);
        assert_eq!(record.display_date(), "2024-05-01 08:30 UTC");
    }

    #[test]
    fn missing_required_fields_deserialize_empty() {
        let record: ArticleRecord = serde_json::from_str(r#"{ "source": "S" }"#).unwrap();
        assert!(record.title.is_empty());
        assert!(record.summary.is_empty());
        assert_eq!(record.date, None);
    }

    #[test]
    fn null_fields_take_defaults() {
        let record: ArticleRecord = serde_json::from_str(
            r#"{ "title": null, "source": null, "url": null, "summary": "x",
                 "date": null, "author": null }"#,
        )
        .unwrap();
        assert!(record.title.is_empty());
        assert!(record.url.is_empty());
        assert_eq!(record.date, None);
        assert_eq!(record.author, UNKNOWN_AUTHOR);
    }

    #[test]
    fn metadata_and_author_lines() {
        let record = ArticleRecord::new("Title", "Summary")
            .with_source("The Wire")
            .with_date(Utc.with_ymd_and_hms(2023, 12, 24, 18, 5, 0).unwrap())
            .with_author("  ");
        assert_eq!(record.metadata_line(), "The Wire | 2023-12-24 18:05 UTC");
        assert_eq!(record.author_line(), "By Unknown");
    }

    #[test]
    fn document_iterates_placements_in_page_order() {
        let mut first = Page::new(1, 100.0, 100.0);
        let run = crate::richtext::TextRun::new("", 10.0);
        first.push(Placement::from_line(&run.line("a"), 10.0, 90.0));
        let mut second = Page::new(2, 100.0, 100.0);
        second.push(Placement::from_line(&run.line("b"), 10.0, 90.0));
        let document = Document::new("Digest", vec![first, second], vec![1]);

        let texts: Vec<(usize, &str)> = document
            .placements()
            .map(|(page, placement)| (page.number(), placement.text.as_str()))
            .collect();
        assert_eq!(texts, vec![(1, "a"), (2, "b")]);
    }
}
