//! Module for loading fonts used in image macros.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rusttype::{point, Scale};
use thiserror::Error;

use super::builtin_font;
#[cfg(test)] use crate::model::DEFAULT_FONT_PATH;


/// Font that can be used to caption image macros.
pub enum Font {
    /// Font loaded from a TrueType/OpenType file.
    TrueType(rusttype::Font<'static>),
    /// The built-in bitmap font, which is always available.
    Builtin,
}

impl Font {
    #[inline]
    pub fn is_builtin(&self) -> bool {
        matches!(*self, Font::Builtin)
    }

    /// Width of the bounding box of given text rendered at given size, in pixels.
    pub fn text_width(&self, text: &str, size: f32) -> u32 {
        match *self {
            Font::TrueType(ref font) => {
                let glyphs = font.layout(text, Scale::uniform(size), point(0.0, 0.0));
                let (min_x, max_x) = glyphs
                    .filter_map(|g| g.pixel_bounding_box())
                    .fold((i32::MAX, i32::MIN), |(lo, hi), bb| (lo.min(bb.min.x), hi.max(bb.max.x)));
                if min_x < max_x { (max_x - min_x) as u32 } else { 0 }
            }
            Font::Builtin => builtin_font::text_width(text, size),
        }
    }

    /// Rasterize text with the top of its line at given position.
    ///
    /// `plot` is called with pixel coordinates (which may fall outside of any canvas)
    /// and the coverage of that pixel in the 0.0 - 1.0 range.
    pub fn draw<F>(&self, text: &str, size: f32, x: f32, y: f32, mut plot: F)
        where F: FnMut(i32, i32, f32)
    {
        match *self {
            Font::TrueType(ref font) => {
                let scale = Scale::uniform(size);
                let v_metrics = font.v_metrics(scale);
                for glyph in font.layout(text, scale, point(x, y + v_metrics.ascent)) {
                    if let Some(bbox) = glyph.pixel_bounding_box() {
                        glyph.draw(|gx, gy, v| {
                            plot(bbox.min.x + gx as i32, bbox.min.y + gy as i32, v);
                        });
                    }
                }
            }
            Font::Builtin => {
                builtin_font::draw(text, size, x.round() as i32, y.round() as i32,
                    |px, py| plot(px, py, 1.0));
            }
        }
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Font::TrueType(..) => write!(fmt, "Font::TrueType(...)"),
            Font::Builtin => write!(fmt, "Font::Builtin"),
        }
    }
}


/// Error while loading a font file.
#[derive(Debug, Error)]
pub enum FontError {
    /// The font file couldn't be read.
    #[error("cannot read font file: {0}")]
    Io(#[from] io::Error),
    /// The file isn't a font that can be used.
    #[error("not a valid TrueType/OpenType font")]
    Invalid,
}


/// Loads the captioning font, falling back to the built-in one.
#[derive(Clone, Debug, Default)]
pub struct FontLoader {
    path: Option<PathBuf>,
}

impl FontLoader {
    /// Create a loader which prefers the font file at given path.
    #[inline]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        FontLoader{path: Some(path.as_ref().to_owned())}
    }

    /// Create a loader which always yields the built-in font.
    #[inline]
    pub fn builtin() -> Self {
        FontLoader{path: None}
    }

    #[inline]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl FontLoader {
    /// Resolve the font to render captions with.
    ///
    /// This never fails: if the preferred font file cannot be loaded,
    /// the built-in font is returned instead.
    pub fn resolve(&self) -> Font {
        let path = match self.path {
            Some(ref p) => p,
            None => {
                trace!("No font file configured, using the built-in font");
                return Font::Builtin;
            }
        };
        match self.load_path(path) {
            Ok(font) => font,
            Err(e) => {
                warn!("Cannot load font {}, falling back to the built-in font: {}",
                    path.display(), e);
                Font::Builtin
            }
        }
    }

    /// Load a TrueType/OpenType font from given file.
    pub fn load_path<P: AsRef<Path>>(&self, path: P) -> Result<Font, FontError> {
        let path = path.as_ref();
        trace!("Loading font file {}...", path.display());
        let bytes = fs::read(path)?;
        let font = rusttype::Font::try_from_vec(bytes).ok_or(FontError::Invalid)?;
        debug!("Font {} loaded successfully", path.display());
        Ok(Font::TrueType(font))
    }
}

#[cfg(test)]
impl Font {
    /// A TrueType font installed on this machine, if there is one.
    pub(crate) fn system() -> Option<Font> {
        const CANDIDATES: &[&str] = &[
            DEFAULT_FONT_PATH,
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/Library/Fonts/Arial.ttf",
        ];
        CANDIDATES.iter()
            .filter(|p| Path::new(p).is_file())
            .find_map(|p| FontLoader::new(p).load_path(p).ok())
    }
}


#[cfg(test)]
mod tests {
    use std::fs;

    use spectral::prelude::*;
    use tempfile::TempDir;

    use super::{Font, FontError, FontLoader};

    #[test]
    fn builtin_loader() {
        let loader = FontLoader::builtin();
        assert!(loader.path().is_none());
        assert!(loader.resolve().is_builtin());
    }

    #[test]
    fn missing_font_falls_back() {
        let dir = TempDir::new().unwrap();
        let loader = FontLoader::new(dir.path().join("Missing-Bold.ttf"));
        assert!(loader.resolve().is_builtin());
    }

    #[test]
    fn invalid_font_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Garbage.ttf");
        fs::write(&path, b"this is not a font").unwrap();
        let loader = FontLoader::new(&path);

        match loader.load_path(&path) {
            Err(FontError::Invalid) => {}
            other => panic!("expected FontError::Invalid, got {:?}", other),
        }
        assert!(loader.resolve().is_builtin());
    }

    #[test]
    fn missing_font_is_io_error() {
        let loader = FontLoader::builtin();
        match loader.load_path("/definitely/not/here.ttf") {
            Err(FontError::Io(_)) => {}
            other => panic!("expected FontError::Io, got {:?}", other),
        }
    }

    #[test]
    fn builtin_width_and_draw_agree() {
        let font = Font::Builtin;
        let width = font.text_width("HELLO", 24.0) as i32;
        let (mut min_x, mut max_x) = (i32::MAX, i32::MIN);
        font.draw("HELLO", 24.0, 0.0, 0.0, |x, _, coverage| {
            assert_eq!(1.0, coverage);
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        });
        assert_eq!(width, max_x - min_x + 1);
    }

    #[test]
    fn truetype_width_matches_ink() {
        let font = match Font::system() {
            Some(font) => font,
            None => return,
        };
        assert!(!font.is_builtin());
        assert_eq!(0, font.text_width("", 40.0));
        assert_eq!(0, font.text_width(" ", 40.0));

        let width = font.text_width("HELLO", 40.0) as i32;
        assert_that!(width).is_greater_than(0);
        let (mut min_x, mut max_x, mut min_y) = (i32::MAX, i32::MIN, i32::MAX);
        let mut partial = false;
        font.draw("HELLO", 40.0, 0.0, 0.0, |x, y, coverage| {
            if coverage > 0.0 {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
            }
            partial |= coverage > 0.0 && coverage < 1.0;
        });
        assert_that!((max_x - min_x + 1 - width).abs()).is_less_than_or_equal_to(1);
        // Glyphs hang from the top of the line, not from the baseline.
        assert_that!(min_y).is_greater_than_or_equal_to(0);
        assert_that!(min_y).is_less_than(20);
        assert!(partial, "TrueType edges should be antialiased");
    }
}
