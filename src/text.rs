//! Plain-text rendering of an article list.
//!
//! This is the body handed to remote document services that accept a title plus unformatted text.
//! Blocks appear in the same order as in the paginated layout, one blank line between articles.

use crate::error::ValidationError;
use crate::model::ArticleRecord;
use crate::renderer::validate_articles;

/// Renders `articles` as plain text, validating them the same way the paginated renderer does.
pub fn plain_text(articles: &[ArticleRecord]) -> Result<String, ValidationError> {
    validate_articles(articles)?;

    let mut out = String::new();
    for (index, article) in articles.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        out.push_str(article.title.trim());
        out.push('\n');
        out.push_str(&article.metadata_line());
        out.push('\n');
        out.push_str(&article.author_line());
        out.push('\n');
        if !article.url.trim().is_empty() {
            out.push_str(article.url.trim());
            out.push('\n');
        }
        out.push_str(article.summary.trim());
        out.push('\n');
    }
    Ok(out)
}
