//! Module implementing the `CaptionRequest` type.

use std::fmt;

use super::align::VAlign;


/// Separator between the top and bottom text in a chat message.
const TEXT_SEPARATOR: char = '|';


/// Texts to caption an image macro with.
///
/// Either text may be empty, in which case that caption is not rendered at all.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct CaptionRequest {
    /// Text of the caption at the top of the image.
    pub top_text: String,
    /// Text of the caption at the bottom of the image.
    pub bottom_text: String,
}

impl CaptionRequest {
    #[inline]
    pub fn new<T: Into<String>, B: Into<String>>(top_text: T, bottom_text: B) -> Self {
        CaptionRequest{top_text: top_text.into(), bottom_text: bottom_text.into()}
    }

    /// Create a request with just the top caption.
    #[inline]
    pub fn top<S: Into<String>>(text: S) -> Self {
        Self::new(text, "")
    }

    /// Create a request with just the bottom caption.
    #[inline]
    pub fn bottom<S: Into<String>>(text: S) -> Self {
        Self::new("", text)
    }

    /// Parse the `top text | bottom text` syntax used in chat messages.
    ///
    /// Both parts are trimmed. A message without the separator
    /// only has the top text, and anything after a second separator is ignored.
    pub fn parse(message: &str) -> Self {
        let mut parts = message.split(TEXT_SEPARATOR).map(str::trim);
        let top_text = parts.next().unwrap_or("");
        let bottom_text = parts.next().unwrap_or("");
        Self::new(top_text, bottom_text)
    }
}

impl CaptionRequest {
    /// Whether there is any text to render.
    #[inline]
    pub fn has_text(&self) -> bool {
        !self.top_text.is_empty() || !self.bottom_text.is_empty()
    }

    /// Text of the caption at given vertical alignment.
    #[inline]
    pub fn text_at(&self, valign: VAlign) -> &str {
        match valign {
            VAlign::Top => &self.top_text,
            VAlign::Bottom => &self.bottom_text,
        }
    }

    /// Iterate over the captions that actually need rendering,
    /// top one first.
    pub fn captions(&self) -> impl Iterator<Item=(VAlign, &str)> + '_ {
        [VAlign::Top, VAlign::Bottom].into_iter()
            .map(move |v| (v, self.text_at(v)))
            .filter(|&(_, text)| !text.is_empty())
    }
}

impl fmt::Debug for CaptionRequest {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "CaptionRequest{{^{:?} _{:?}}}", self.top_text, self.bottom_text)
    }
}


#[cfg(test)]
mod tests {
    use spectral::prelude::*;

    use crate::model::VAlign;
    use super::CaptionRequest;

    #[test]
    fn parse_both_texts() {
        let request = CaptionRequest::parse("studying | watching memes");
        assert_eq!("studying", request.top_text);
        assert_eq!("watching memes", request.bottom_text);
    }

    #[test]
    fn parse_top_only() {
        let request = CaptionRequest::parse("  just the top  ");
        assert_eq!(CaptionRequest::top("just the top"), request);
    }

    #[test]
    fn parse_bottom_only() {
        assert_eq!(CaptionRequest::bottom("bottom only"), CaptionRequest::parse("|bottom only"));
    }

    #[test]
    fn parse_ignores_extra_parts() {
        let request = CaptionRequest::parse("a|b|c");
        assert_eq!(CaptionRequest::new("a", "b"), request);
    }

    #[test]
    fn parse_empty() {
        let request = CaptionRequest::parse("");
        assert!(!request.has_text());
        assert_that!(request.captions().count()).is_equal_to(0);
    }

    #[test]
    fn captions_skip_empty_text() {
        let request = CaptionRequest::bottom("bottom only");
        let captions: Vec<_> = request.captions().collect();
        assert_that!(captions).is_equal_to(vec![(VAlign::Bottom, "bottom only")]);
    }

    #[test]
    fn captions_top_first() {
        let request = CaptionRequest::new("top", "bottom");
        let captions: Vec<_> = request.captions().collect();
        assert_that!(captions)
            .is_equal_to(vec![(VAlign::Top, "top"), (VAlign::Bottom, "bottom")]);
    }
}
