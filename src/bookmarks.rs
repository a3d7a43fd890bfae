//! Article bookmarks built on top of `lopdf`.
//!
//! The outline is flat: one entry per article, labelled with the article title and the page it
//! starts on, in input order.

use lopdf::{Dictionary, Document, Object, ObjectId};
use thiserror::Error;

use crate::model::ArticleRecord;

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Debug, Error)]
pub enum BookmarkError {
    #[error("failed to parse PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("failed to write PDF bytes: {0}")]
    Write(#[from] std::io::Error),
    /// The trailer has no usable `/Root` dictionary.
    #[error("PDF catalog is missing or not a dictionary")]
    Catalog,
    /// An article's start page does not exist in the PDF.
    #[error("article {article_index} starts on page {page_number}, which the PDF does not have")]
    MissingPage {
        article_index: usize,
        page_number: usize,
    },
}

/// One article's outline entry before it is written.
struct ArticleMark {
    label: String,
    page: ObjectId,
}

/// Returns `pdf_bytes` with an outline entry per article pointing at its start page.
///
/// `article_pages` holds 1-based page numbers in article order, as recorded by
/// [`crate::model::Document::article_pages`].  The catalog is set to open with the outline
/// visible.
pub fn apply_article_bookmarks(
    pdf_bytes: &[u8],
    articles: &[ArticleRecord],
    article_pages: &[usize],
) -> Result<Vec<u8>, BookmarkError> {
    let mut document = Document::load_mem(pdf_bytes)?;
    let marks = article_marks(&document, articles, article_pages)?;
    if marks.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let outline = document.new_object_id();
    let ids: Vec<ObjectId> = marks.iter().map(|_| document.new_object_id()).collect();

    for (position, mark) in marks.into_iter().enumerate() {
        let mut item = Dictionary::new();
        item.set("Title", Object::string_literal(mark.label));
        item.set("Parent", outline);
        item.set(
            "Dest",
            vec![Object::Reference(mark.page), Object::Name(b"Fit".to_vec())],
        );
        if let Some(&prev) = position.checked_sub(1).and_then(|p| ids.get(p)) {
            item.set("Prev", prev);
        }
        if let Some(&next) = ids.get(position + 1) {
            item.set("Next", next);
        }
        document.objects.insert(ids[position], Object::Dictionary(item));
    }

    let mut root = Dictionary::new();
    root.set("Type", Object::Name(b"Outlines".to_vec()));
    root.set("Count", ids.len() as i64);
    root.set("First", ids[0]);
    root.set("Last", ids[ids.len() - 1]);
    document.objects.insert(outline, Object::Dictionary(root));

    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::Catalog)?;
    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .and_then(|object| object.as_dict_mut().ok())
        .ok_or(BookmarkError::Catalog)?;
    catalog.set("Outlines", outline);
    catalog.set("PageMode", Object::Name(b"UseOutlines".to_vec()));

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

fn article_marks(
    document: &Document,
    articles: &[ArticleRecord],
    article_pages: &[usize],
) -> Result<Vec<ArticleMark>, BookmarkError> {
    let pages = document.get_pages();

    articles
        .iter()
        .zip(article_pages)
        .enumerate()
        .map(|(article_index, (article, &page_number))| {
            let page = u32::try_from(page_number)
                .ok()
                .and_then(|number| pages.get(&number).copied())
                .ok_or(BookmarkError::MissingPage {
                    article_index,
                    page_number,
                })?;
            Ok(ArticleMark {
                label: format!("{} (p. {})", article.title.trim(), page_number),
                page,
            })
        })
        .collect()
}
