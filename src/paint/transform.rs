//! 2D transform application
//!
//! Transforms apply only to block-level and atomic inline-level boxes; a
//! non-atomic inline may fragment across lines and has no single origin.
//! The caller enforces that restriction and scopes the canvas state so the
//! transform never leaks to siblings.

use super::Painter;
use crate::canvas::Canvas;
use crate::geometry::Matrix;
use crate::style::{BoxArea, TransformFunction};
use crate::tree::BoxNode;

impl Painter<'_> {
  /// Composes the box's transform list onto the canvas, around its
  /// resolved transform origin
  pub fn apply_transforms(&self, canvas: &mut dyn Canvas, node: &BoxNode) {
    if node.style.transform.is_empty() {
      return;
    }
    let border_box = node.box_rectangle(BoxArea::BorderBox);
    let origin_x = border_box.x() + node.style.transform_origin.0.resolve(border_box.width());
    let origin_y = border_box.y() + node.style.transform_origin.1.resolve(border_box.height());

    canvas.translate(origin_x, origin_y);
    for function in &node.style.transform {
      match *function {
        TransformFunction::Scale(sx, sy) => canvas.scale(sx, sy),
        TransformFunction::Rotate(angle) => canvas.rotate(angle),
        TransformFunction::Translate(tx, ty) => canvas.translate(
          tx.resolve(border_box.width()),
          ty.resolve(border_box.height()),
        ),
        TransformFunction::SkewX(angle) => {
          canvas.transform(Matrix::new(1.0, 0.0, angle.tan(), 1.0, 0.0, 0.0));
        }
        TransformFunction::SkewY(angle) => {
          canvas.transform(Matrix::new(1.0, angle.tan(), 0.0, 1.0, 0.0, 0.0));
        }
        TransformFunction::Matrix(matrix) => canvas.transform(matrix),
      }
    }
    canvas.translate(-origin_x, -origin_y);
  }
}
