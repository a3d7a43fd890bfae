//! Greedy line breaking.

use log::trace;

use crate::error::MeasurementError;
use crate::measure::TextMeasurer;
use crate::richtext::{Line, TextRun};

/// Splits `text` into lines whose measured width stays within `max_width`.
///
/// Words are separated on whitespace and packed greedily: a word joins the current line unless
/// the extended line would exceed `max_width`, in which case the current line is committed first.
/// A word that is wider than `max_width` on its own is never split; it becomes a line by itself
/// and overflows.  Blank input yields no lines.
pub fn wrap<M>(
    text: &str,
    measurer: &M,
    font_size: f32,
    max_width: f32,
) -> Result<Vec<String>, MeasurementError>
where
    M: TextMeasurer + ?Sized,
{
    let mut lines = Vec::new();
    let mut candidate = String::new();

    for word in text.split_whitespace() {
        if candidate.is_empty() {
            candidate.push_str(word);
            continue;
        }

        let extended = format!("{candidate} {word}");
        if measurer.measure(&extended, font_size)? > max_width {
            lines.push(std::mem::replace(&mut candidate, word.to_owned()));
        } else {
            candidate = extended;
        }
    }

    if !candidate.is_empty() {
        lines.push(candidate);
    }

    trace!(
        "wrapped {} bytes into {} lines at {}pt within {}",
        text.len(),
        lines.len(),
        font_size,
        max_width
    );
    Ok(lines)
}

/// Wraps a [`TextRun`] into styled [`Line`]s.
pub fn wrap_run<M>(run: &TextRun, measurer: &M, max_width: f32) -> Result<Vec<Line>, MeasurementError>
where
    M: TextMeasurer + ?Sized,
{
    Ok(wrap(run.text(), measurer, run.font_size(), max_width)?
        .into_iter()
        .map(|text| run.line(text))
        .collect())
}
