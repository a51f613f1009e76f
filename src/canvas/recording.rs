//! Recording canvas
//!
//! Records every primitive drawing call as a [`DrawOp`] value instead of
//! producing pixels. The painter's behavior is fully observable through the
//! recorded sequence, which is what the paint-order and compositing tests
//! assert on. Transform and clip state is tracked analytically so that
//! `clip_extents` and `user_to_device_distance` answer correctly.
//!
//! Clip tracking is a conservative bounding box: a trapezoid clip is
//! recorded exactly as ops but tracked as its device-space bbox, which is
//! sufficient for extent queries.

use super::{Canvas, Extend, ImageFilter, LineCap, Pattern};
use crate::geometry::{Matrix, Point, Rect};
use crate::style::Rgba;

/// One recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
  Save,
  Restore,
  MoveTo(Point),
  LineTo(Point),
  Rectangle(Rect),
  Clip,
  Translate(f32, f32),
  Scale(f32, f32),
  Rotate(f32),
  Transform(Matrix),
  SetColor(Rgba),
  SetPattern {
    width: u32,
    height: u32,
    extend: Extend,
    filter: ImageFilter,
  },
  SetLineWidth(f32),
  SetLineCap(LineCap),
  SetDash(Vec<f32>),
  SetAntialias(bool),
  Paint,
  PaintWithAlpha(f32),
  Stroke,
  PushGroup,
  PopGroupWithAlpha(f32),
}

#[derive(Clone)]
struct RecordedState {
  ctm: Matrix,
  /// Device-space clip bounding box; `None` means unclipped
  clip: Option<Rect>,
}

/// A canvas that records operations instead of rasterizing
///
/// # Examples
///
/// ```
/// use pagepaint::canvas::recording::{DrawOp, RecordingCanvas};
/// use pagepaint::canvas::Canvas;
/// use pagepaint::{Rect, Rgba};
///
/// let mut canvas = RecordingCanvas::new(200.0, 100.0);
/// canvas.rectangle(Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
/// canvas.clip();
/// canvas.set_color(Rgba::BLACK);
/// canvas.paint();
/// assert_eq!(canvas.ops().len(), 4);
/// assert_eq!(canvas.clip_extents(), Rect::from_xywh(0.0, 0.0, 10.0, 10.0));
/// ```
pub struct RecordingCanvas {
  ops: Vec<DrawOp>,
  stack: Vec<RecordedState>,
  state: RecordedState,
  /// Device-space bbox of the current path
  path_bounds: Option<Rect>,
  width: f32,
  height: f32,
}

impl RecordingCanvas {
  /// Creates a recording canvas with the given logical surface size
  pub fn new(width: f32, height: f32) -> Self {
    Self {
      ops: Vec::new(),
      stack: Vec::new(),
      state: RecordedState {
        ctm: Matrix::IDENTITY,
        clip: None,
      },
      path_bounds: None,
      width,
      height,
    }
  }

  /// The recorded operations, in issue order
  pub fn ops(&self) -> &[DrawOp] {
    &self.ops
  }

  /// Consumes the canvas and returns the recorded operations
  pub fn into_ops(self) -> Vec<DrawOp> {
    self.ops
  }

  fn add_path_point(&mut self, p: Point) {
    let device = self.state.ctm.transform_point(p);
    let point_rect = Rect::new(device, crate::geometry::Size::ZERO);
    self.path_bounds = Some(match self.path_bounds {
      Some(bounds) => join(bounds, point_rect),
      None => point_rect,
    });
  }
}

fn join(a: Rect, b: Rect) -> Rect {
  let min_x = a.min_x().min(b.min_x());
  let min_y = a.min_y().min(b.min_y());
  let max_x = a.max_x().max(b.max_x());
  let max_y = a.max_y().max(b.max_y());
  Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
}

impl Canvas for RecordingCanvas {
  fn save(&mut self) {
    self.ops.push(DrawOp::Save);
    self.stack.push(self.state.clone());
  }

  fn restore(&mut self) {
    self.ops.push(DrawOp::Restore);
    if let Some(state) = self.stack.pop() {
      self.state = state;
    }
  }

  fn move_to(&mut self, p: Point) {
    self.ops.push(DrawOp::MoveTo(p));
    self.add_path_point(p);
  }

  fn line_to(&mut self, p: Point) {
    self.ops.push(DrawOp::LineTo(p));
    self.add_path_point(p);
  }

  fn rectangle(&mut self, rect: Rect) {
    self.ops.push(DrawOp::Rectangle(rect));
    for corner in rect.corners() {
      self.add_path_point(corner);
    }
  }

  fn clip(&mut self) {
    self.ops.push(DrawOp::Clip);
    // An empty path clips everything away
    let path = self.path_bounds.take().unwrap_or(Rect::ZERO);
    self.state.clip = Some(match self.state.clip {
      Some(clip) => clip.intersection(path).unwrap_or(Rect::ZERO),
      None => path,
    });
  }

  fn clip_extents(&self) -> Rect {
    let device = self
      .state
      .clip
      .unwrap_or_else(|| Rect::from_xywh(0.0, 0.0, self.width, self.height));
    match self.state.ctm.invert() {
      Some(inverse) => inverse.transform_rect(device),
      None => Rect::ZERO,
    }
  }

  fn translate(&mut self, dx: f32, dy: f32) {
    self.ops.push(DrawOp::Translate(dx, dy));
    self.state.ctm = self.state.ctm.pre_concat(Matrix::translation(dx, dy));
  }

  fn scale(&mut self, sx: f32, sy: f32) {
    self.ops.push(DrawOp::Scale(sx, sy));
    self.state.ctm = self.state.ctm.pre_concat(Matrix::scaling(sx, sy));
  }

  fn rotate(&mut self, radians: f32) {
    self.ops.push(DrawOp::Rotate(radians));
    self.state.ctm = self.state.ctm.pre_concat(Matrix::rotation(radians));
  }

  fn transform(&mut self, matrix: Matrix) {
    self.ops.push(DrawOp::Transform(matrix));
    self.state.ctm = self.state.ctm.pre_concat(matrix);
  }

  fn user_to_device_distance(&self, dx: f32, dy: f32) -> (f32, f32) {
    self.state.ctm.transform_distance(dx, dy)
  }

  fn set_color(&mut self, color: Rgba) {
    self.ops.push(DrawOp::SetColor(color));
  }

  fn set_pattern(&mut self, pattern: &Pattern, extend: Extend, filter: ImageFilter) {
    self.ops.push(DrawOp::SetPattern {
      width: pattern.width(),
      height: pattern.height(),
      extend,
      filter,
    });
  }

  fn set_line_width(&mut self, width: f32) {
    self.ops.push(DrawOp::SetLineWidth(width));
  }

  fn set_line_cap(&mut self, cap: LineCap) {
    self.ops.push(DrawOp::SetLineCap(cap));
  }

  fn set_dash(&mut self, pattern: &[f32]) {
    self.ops.push(DrawOp::SetDash(pattern.to_vec()));
  }

  fn set_antialias(&mut self, enabled: bool) {
    self.ops.push(DrawOp::SetAntialias(enabled));
  }

  fn paint(&mut self) {
    self.ops.push(DrawOp::Paint);
  }

  fn paint_with_alpha(&mut self, alpha: f32) {
    self.ops.push(DrawOp::PaintWithAlpha(alpha));
  }

  fn stroke(&mut self) {
    self.ops.push(DrawOp::Stroke);
    self.path_bounds = None;
  }

  fn push_group(&mut self) {
    self.ops.push(DrawOp::PushGroup);
  }

  fn pop_group_with_alpha(&mut self, alpha: f32) {
    self.ops.push(DrawOp::PopGroupWithAlpha(alpha));
  }
}
