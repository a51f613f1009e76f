//! Text and text-decoration painting
//!
//! Glyph rendering is delegated to the external text engine; this module
//! positions the run, sets its color and draws at most one decoration
//! line. When several decorations are set, the first of overline,
//! underline, line-through wins.

use super::Painter;
use crate::canvas::{Canvas, SavedCanvas};
use crate::error::{PaintError, Result};
use crate::geometry::{Point, Rect};
use crate::style::{BoxArea, TextDecoration, Visibility};
use crate::tree::{BoxNode, TextRun};

impl Painter<'_> {
  /// Draws a text run and its decoration
  ///
  /// # Errors
  ///
  /// Returns [`PaintError::ZeroFontSize`]: a zero font size on a text box
  /// means the upstream style stage broke its contract.
  pub fn draw_text(&mut self, canvas: &mut dyn Canvas, node: &BoxNode, run: &TextRun) -> Result<()> {
    if node.style.font_size <= 0.0 {
      return Err(PaintError::ZeroFontSize);
    }
    if node.style.visibility == Visibility::Hidden {
      return Ok(());
    }

    let content_box = node.box_rectangle(BoxArea::ContentBox);
    canvas.move_to(Point::new(content_box.x(), content_box.y() + run.baseline));
    canvas.set_color(node.style.color);
    self.text.show_first_line(canvas, run.layout, self.hinting);

    let decorations = node.style.text_decoration;
    let offset_y = if decorations.contains(TextDecoration::OVERLINE) {
      Some(run.baseline - 0.15 * node.style.font_size)
    } else if decorations.contains(TextDecoration::UNDERLINE) {
      Some(run.baseline + 0.15 * node.style.font_size)
    } else if decorations.contains(TextDecoration::LINE_THROUGH) {
      Some(content_box.height() * 0.5)
    } else {
      None
    };
    if let Some(offset_y) = offset_y {
      self.draw_text_decoration(canvas, node, content_box, offset_y);
    }
    Ok(())
  }

  fn draw_text_decoration(
    &self,
    canvas: &mut dyn Canvas,
    node: &BoxNode,
    content_box: Rect,
    offset_y: f32,
  ) {
    let mut canvas = SavedCanvas::new(canvas);
    if self.hinting {
      canvas.set_antialias(false);
    }
    canvas.set_color(node.style.color);
    canvas.set_line_width(1.0);
    canvas.move_to(Point::new(content_box.x(), content_box.y() + offset_y));
    canvas.line_to(Point::new(content_box.max_x(), content_box.y() + offset_y));
    canvas.stroke();
  }
}
