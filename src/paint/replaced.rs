//! Replaced-content painting
//!
//! Scales and clips an intrinsic image into a box's content area. The
//! image handle is taken out of the box on first paint so backend
//! resources can be released before the surface is finalized; painting the
//! same box twice is an upstream contract breach and fails loudly.

use super::{image_filter, Painter};
use crate::canvas::{Canvas, Extend, SavedCanvas};
use crate::error::{PaintError, Result};
use crate::geometry::Rect;
use crate::style::{BoxArea, Visibility};
use crate::tree::{BoxNode, ReplacedContent};

impl Painter<'_> {
  /// Paints a replaced box's image into its content box
  ///
  /// # Errors
  ///
  /// Returns [`PaintError::ReplacedContentConsumed`] if the box's image
  /// was already painted once.
  pub fn draw_replaced(
    &self,
    canvas: &mut dyn Canvas,
    node: &BoxNode,
    content: &ReplacedContent,
  ) -> Result<()> {
    if node.style.visibility == Visibility::Hidden {
      return Ok(());
    }
    let image = if self.invalidate_replaced {
      content.take()
    } else {
      content.peek()
    };
    let image = image.ok_or(PaintError::ReplacedContentConsumed)?;

    if image.intrinsic_width <= 0.0 || image.intrinsic_height <= 0.0 {
      return Ok(());
    }
    let content_box = node.box_rectangle(BoxArea::ContentBox);
    let scale_x = content_box.width() / image.intrinsic_width;
    let scale_y = content_box.height() / image.intrinsic_height;
    if scale_x == 0.0 || scale_y == 0.0 {
      // Zero-area box: nothing to draw, but the handle stays consumed
      return Ok(());
    }

    let mut canvas = SavedCanvas::new(canvas);
    canvas.translate(content_box.x(), content_box.y());
    canvas.rectangle(Rect::from_xywh(
      0.0,
      0.0,
      content_box.width(),
      content_box.height(),
    ));
    canvas.clip();
    // No extension: the same pattern object may tile a background elsewhere
    canvas.set_pattern(
      &image.pattern,
      Extend::None,
      image_filter(node.style.image_rendering),
    );
    canvas.scale(scale_x, scale_y);
    canvas.paint();
    Ok(())
  }
}
