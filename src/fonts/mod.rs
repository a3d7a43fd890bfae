//! Font discovery and TrueType width measurement.
//!
//! Documents are set in a single font family.  The regular face is looked up in, in order:
//!
//! 1. the directory named by `NEWS_DIGEST_FONTS_DIR`,
//! 2. `assets/fonts` next to the running executable,
//! 3. `assets/fonts` in this crate's manifest directory.
//!
//! When no font file is found callers fall back to the PDF built-in Helvetica face together with
//! [`crate::measure::MetricsMeasurer::helvetica`].

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use genpdf::fonts::{Font, FontCache, FontData, FontFamily};
use log::debug;

use crate::error::{FontError, MeasurementError};
use crate::measure::TextMeasurer;

/// File name of the regular face looked up in every candidate directory.
pub const DEFAULT_FONT_FILE: &str = "Roboto-Regular.ttf";

/// Environment variable overriding the font directory.
pub const FONTS_DIR_ENV: &str = "NEWS_DIGEST_FONTS_DIR";

const POINTS_PER_MM: f64 = 72.0 / 25.4;

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env::var_os(FONTS_DIR_ENV) {
        let path = PathBuf::from(path);
        if !path.as_os_str().is_empty() {
            candidates.push(path);
        }
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts");
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

    candidates
}

/// Finds the regular font file in the first directory that has one.
pub fn resolve_font_file() -> Result<PathBuf, FontError> {
    resolve_font_file_in(font_directory_candidates())
}

/// Like [`resolve_font_file`] but searching `dir` before the default locations.
pub fn resolve_font_file_with(dir: Option<&Path>) -> Result<PathBuf, FontError> {
    let mut candidates = font_directory_candidates();
    if let Some(dir) = dir {
        candidates.insert(0, dir.to_path_buf());
    }
    resolve_font_file_in(candidates)
}

fn resolve_font_file_in(candidates: Vec<PathBuf>) -> Result<PathBuf, FontError> {
    let mut attempts = Vec::new();

    for directory in candidates {
        let candidate = directory.join(DEFAULT_FONT_FILE);
        if candidate.is_file() {
            debug!("using font file {}", candidate.display());
            return Ok(candidate);
        }

        let reason = if directory.is_dir() {
            format!("no {DEFAULT_FONT_FILE}")
        } else {
            "directory missing".to_owned()
        };
        attempts.push(format!("{} ({})", directory.display(), reason));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };
    Err(FontError::NotFound(format!(
        "{summary}. Set {FONTS_DIR_ENV} to a directory containing {DEFAULT_FONT_FILE}."
    )))
}

/// A TrueType font ready for both measuring and embedding.
pub struct LoadedFont {
    bytes: Vec<u8>,
    measurer: TrueTypeMeasurer,
}

impl LoadedFont {
    /// Reads and parses the font at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FontError> {
        let bytes = fs::read(path.as_ref())?;
        Self::from_bytes(bytes)
    }

    /// Parses in-memory TrueType data.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        let measurer = TrueTypeMeasurer::from_bytes(bytes.clone())?;
        Ok(Self { bytes, measurer })
    }

    /// Raw font file contents, for embedding into the PDF.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn measurer(&self) -> &TrueTypeMeasurer {
        &self.measurer
    }

    /// Splits the font into its raw bytes and its measurer.
    pub fn into_parts(self) -> (Vec<u8>, TrueTypeMeasurer) {
        (self.bytes, self.measurer)
    }
}

/// Measures text with the glyph metrics of a TrueType font via genpdf's font cache.
///
/// genpdf only accepts whole-point font sizes between 1 and 255; other sizes are reported as
/// [`MeasurementError`]s rather than silently rounded to a different width.  Single-word lines are
/// never measured, so [`crate::builder::DigestBuilder::build`] checks every block size up front.
pub struct TrueTypeMeasurer {
    cache: FontCache,
    font: Font,
}

impl TrueTypeMeasurer {
    /// Whether genpdf can measure text at `font_size`.
    pub fn supports_size(font_size: f32) -> bool {
        font_size.fract() == 0.0 && (1.0..=255.0).contains(&font_size)
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, FontError> {
        let data = FontData::new(bytes, None).map_err(|err| FontError::Parse(err.to_string()))?;
        // Every block uses the regular face, so all four slots share it.
        let family = FontFamily {
            regular: data.clone(),
            bold: data.clone(),
            italic: data.clone(),
            bold_italic: data,
        };
        let cache = FontCache::new(family);
        let font = cache.default_font_family().regular;
        Ok(Self { cache, font })
    }
}

impl TextMeasurer for TrueTypeMeasurer {
    fn measure(&self, text: &str, font_size: f32) -> Result<f32, MeasurementError> {
        if !Self::supports_size(font_size) {
            return Err(MeasurementError::new(
                text,
                font_size,
                "TrueType measurement requires a whole point size between 1 and 255",
            ));
        }
        let width: printpdf::Mm = self.font.str_width(&self.cache, text, font_size as u8).into();
        Ok((width.0 * POINTS_PER_MM) as f32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directories_are_reported() {
        let err = resolve_font_file_in(vec![PathBuf::from("/__news_digest_missing_fonts__")])
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("directory missing"));
        assert!(message.contains(FONTS_DIR_ENV));
    }

    #[test]
    fn empty_candidate_list_is_reported() {
        let err = resolve_font_file_in(Vec::new()).unwrap_err();
        assert!(err.to_string().contains("no search paths"));
    }

    #[test]
    fn invalid_font_data_is_a_parse_error() {
        let result = LoadedFont::from_bytes(b"definitely not a font".to_vec());
        assert!(matches!(result, Err(FontError::Parse(_))));
    }

    #[test]
    fn only_whole_sizes_up_to_255_are_supported() {
        assert!(TrueTypeMeasurer::supports_size(12.0));
        assert!(TrueTypeMeasurer::supports_size(255.0));
        assert!(!TrueTypeMeasurer::supports_size(10.5));
        assert!(!TrueTypeMeasurer::supports_size(0.0));
        assert!(!TrueTypeMeasurer::supports_size(300.0));
        assert!(!TrueTypeMeasurer::supports_size(f32::NAN));
    }

    #[test]
    fn bundled_font_measures_when_available() {
        let Ok(path) = resolve_font_file() else {
            eprintln!("Skipping bundled_font_measures_when_available: fonts missing");
            return;
        };
        let font = LoadedFont::load(path).expect("load bundled font");
        let measurer = font.measurer();
        let short = measurer.measure("news", 12.0).unwrap();
        let long = measurer.measure("news digest", 12.0).unwrap();
        assert!(short > 0.0);
        assert!(long > short);
        assert!(measurer.measure("news", 10.5).is_err());
    }
}
