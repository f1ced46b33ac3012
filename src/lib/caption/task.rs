//! Module implementing the actual captioning task.
//! Most if not all captioning logic lives here.

use std::ops::Deref;
use std::sync::Arc;

use image::{DynamicImage, RgbaImage};

use crate::model::{font_size_for, CaptionRequest};
use super::engine;
use super::text::{CaptionRenderer, Style};


/// Represents a single captioning task and contains all the relevant logic.
///
/// All the code here is executed synchronously,
/// in whatever thread the `Engine` has been called from.
pub(super) struct CaptionTask<R> {
    request: CaptionRequest,
    engine: Arc<engine::Inner<R>>,
}

impl<R> Deref for CaptionTask<R> {
    type Target = CaptionRequest;
    fn deref(&self) -> &Self::Target {
        &self.request  // makes the rendering code a little terser
    }
}

impl<R: CaptionRenderer> CaptionTask<R> {
    #[inline]
    pub fn new(request: CaptionRequest, engine: Arc<engine::Inner<R>>) -> Self {
        CaptionTask{request, engine}
    }

    /// Perform the captioning task on given source image.
    pub fn perform(self, image: DynamicImage) -> RgbaImage {
        debug!("Rendering {:?}", self.request);

        // Rendering text requires alpha blending.
        let mut canvas = image.into_rgba8();
        if !self.has_text() {
            debug!("No caption text, leaving the image as is.");
            return canvas;
        }

        let (width, height) = canvas.dimensions();
        let font_size = font_size_for(height);
        trace!("Image is {}x{}, font size computed as {}", width, height, font_size);
        let style = Style::new(&self.engine.font, font_size as f32);

        for (valign, text) in self.captions() {
            let text = text.to_uppercase();
            let anchor_y = valign.anchor_y(height, font_size);
            debug!("Rendering {v} text {text:?} at y = {y}",
                v = format!("{:?}", valign).to_lowercase(), text = text, y = anchor_y);
            self.engine.renderer.render(&mut canvas, &text, width, anchor_y, &style);
        }
        canvas
    }
}
