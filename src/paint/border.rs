//! Border painting
//!
//! Each border side is drawn from two parallel segments: the border edge
//! (outer, longer) and the padding edge (inner, shorter). Every style
//! except `dotted` and `dashed` is clipped to the trapezoid between those
//! two edges, which is what produces mitered corner joins when all four
//! sides paint.
//!
//! Dash lengths are snapped so a whole number of dashes fits the segment,
//! keeping corners symmetric.

use super::Painter;
use crate::canvas::{Canvas, LineCap, SavedCanvas};
use crate::geometry::{Point, Rect};
use crate::style::{BorderStyle, BoxArea, Rgba, Visibility};
use crate::tree::BoxNode;

/// A directed line segment, as a pair of endpoints
pub type Segment = (Point, Point);

/// Logical border side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
  Top,
  Right,
  Bottom,
  Left,
}

impl Side {
  /// Unit vector pointing from the border edge toward the box interior
  pub fn inward(self) -> (f32, f32) {
    match self {
      Side::Top => (0.0, 1.0),
      Side::Bottom => (0.0, -1.0),
      Side::Left => (1.0, 0.0),
      Side::Right => (-1.0, 0.0),
    }
  }
}

/// The segment of `rect`'s outline lying on `side`
///
/// Segments on opposite sides run in the same direction, so the border and
/// padding edges handed to the segment painter are always parallel and
/// equally oriented.
pub fn rect_side(rect: Rect, side: Side) -> Segment {
  let [top_left, top_right, bottom_right, bottom_left] = rect.corners();
  match side {
    Side::Top => (top_left, top_right),
    Side::Right => (top_right, bottom_right),
    Side::Bottom => (bottom_left, bottom_right),
    Side::Left => (top_left, bottom_left),
  }
}

impl Painter<'_> {
  /// Paints all four borders of a box
  ///
  /// Sides with zero width, transparent color or a `none`/`hidden` style
  /// are skipped.
  pub fn draw_border(&self, canvas: &mut dyn Canvas, node: &BoxNode) {
    if node.style.visibility == Visibility::Hidden {
      return;
    }
    let borders = &node.style.borders;
    let sides = [
      (Side::Top, borders.top),
      (Side::Right, borders.right),
      (Side::Bottom, borders.bottom),
      (Side::Left, borders.left),
    ];
    if sides.iter().all(|(_, border)| border.width == 0.0) {
      return;
    }

    let border_box = node.box_rectangle(BoxArea::BorderBox);
    let padding_box = node.box_rectangle(BoxArea::PaddingBox);
    for (side, border) in sides {
      if border.width <= 0.0
        || border.color.is_transparent()
        || matches!(border.style, BorderStyle::None | BorderStyle::Hidden)
      {
        continue;
      }
      self.draw_border_segment(
        canvas,
        border.style,
        border.width,
        border.color,
        side,
        rect_side(border_box, side),
        rect_side(padding_box, side),
      );
    }
  }

  /// Paints one border side in the given style
  ///
  /// `border_edge` and `padding_edge` are the outer and inner edges of the
  /// border band; `side` selects the bevel lighting direction and the
  /// inward offset used by `dotted` and `dashed`. Callers guarantee a
  /// positive width and a non-transparent color.
  pub fn draw_border_segment(
    &self,
    canvas: &mut dyn Canvas,
    style: BorderStyle,
    width: f32,
    color: Rgba,
    side: Side,
    border_edge: Segment,
    padding_edge: Segment,
  ) {
    let mut canvas = SavedCanvas::new(canvas);
    canvas.set_color(color);
    let (dx, dy) = side.inward();

    if self.hinting {
      // A sub-device-unit border would vanish without anti-aliasing, and
      // anti-aliased solid borders seam at shared corners
      let (ax, ay) = canvas.user_to_device_distance(width, 0.0);
      let (bx, by) = canvas.user_to_device_distance(0.0, width);
      if ax.hypot(ay) >= 1.0 && bx.hypot(by) >= 1.0 {
        canvas.set_antialias(false);
      }
    }

    if !matches!(style, BorderStyle::Dotted | BorderStyle::Dashed) {
      // Trapezoid between the longer border edge and the shorter padding
      // edge; strokes below run the full border-edge length and rely on
      // this clip for their corner joins
      canvas.move_to(border_edge.0);
      canvas.line_to(border_edge.1);
      canvas.line_to(padding_edge.1);
      canvas.line_to(padding_edge.0);
      canvas.clip();
    }

    match style {
      BorderStyle::None | BorderStyle::Hidden => {}
      BorderStyle::Solid => canvas.paint(),
      BorderStyle::Inset | BorderStyle::Outset => {
        let lighten =
          matches!(side, Side::Top | Side::Left) ^ (style == BorderStyle::Inset);
        canvas.set_color(color.lighten(if lighten { 0.5 } else { -0.5 }));
        canvas.paint();
      }
      BorderStyle::Groove | BorderStyle::Ridge => {
        // Two half-width strokes, lit in opposite senses
        let lighten_outer =
          matches!(side, Side::Top | Side::Left) ^ (style == BorderStyle::Groove);
        canvas.set_line_width(width / 2.0);
        let outer = offset_segment(border_edge, dx * width / 4.0, dy * width / 4.0);
        let inner =
          offset_segment(border_edge, dx * width * 3.0 / 4.0, dy * width * 3.0 / 4.0);
        canvas.set_color(color.lighten(if lighten_outer { 0.5 } else { -0.5 }));
        stroke_segment(&mut *canvas, outer);
        canvas.set_color(color.lighten(if lighten_outer { -0.5 } else { 0.5 }));
        stroke_segment(&mut *canvas, inner);
      }
      BorderStyle::Double => {
        canvas.set_line_width(width / 3.0);
        let outer = offset_segment(border_edge, dx * width / 6.0, dy * width / 6.0);
        let inner =
          offset_segment(border_edge, dx * width * 5.0 / 6.0, dy * width * 5.0 / 6.0);
        stroke_segment(&mut *canvas, outer);
        stroke_segment(&mut *canvas, inner);
      }
      BorderStyle::Dotted => {
        let start = border_edge.0.midpoint(padding_edge.0);
        let end = border_edge.1.midpoint(padding_edge.1);
        let length = start.distance_to(end);
        let mut dash = 2.0 * width;
        if canvas.user_to_device_distance(dash, 0.0).0 > 3.0 {
          // Snap so a whole number of dots fits, unless the dots would be
          // too small to read anyway
          let count = (length / dash).round();
          if count > 0.0 {
            dash = length / count;
          }
        }
        canvas.set_line_cap(LineCap::Round);
        canvas.set_dash(&[0.0, dash]);
        canvas.set_line_width(width);
        stroke_segment(&mut *canvas, (start, end));
      }
      BorderStyle::Dashed => {
        // Stroke centered inside the border band
        let start = border_edge.0.offset(dx * width / 2.0, dy * width / 2.0);
        let end = border_edge.1.offset(dx * width / 2.0, dy * width / 2.0);
        let length = start.distance_to(end);
        let mut dash = 2.0 * width;
        // Snap so the segment length is a multiple of 2×dash: both corners
        // end on a drawn dash
        let count = (length / (2.0 * dash)).round();
        if count > 0.0 {
          dash = length / (2.0 * count);
        }
        canvas.set_dash(&[dash]);
        canvas.set_line_width(width);
        stroke_segment(&mut *canvas, (start, end));
      }
    }
  }
}

fn offset_segment(segment: Segment, dx: f32, dy: f32) -> Segment {
  (segment.0.offset(dx, dy), segment.1.offset(dx, dy))
}

fn stroke_segment(canvas: &mut dyn Canvas, segment: Segment) {
  canvas.move_to(segment.0);
  canvas.line_to(segment.1);
  canvas.stroke();
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::canvas::recording::{DrawOp, RecordingCanvas};
  use crate::paint::{NoImages, NoText};
  use crate::style::BorderSide;
  use crate::tree::BoxContent;
  use crate::{EdgeOffsets, Size};

  fn painter<'a>(images: &'a mut NoImages, text: &'a mut NoText) -> Painter<'a> {
    Painter::new(images, text)
  }

  fn top_edges() -> (Segment, Segment) {
    // Border box 100×100 with a uniform width-10 border
    let border_box = Rect::from_xywh(0.0, 0.0, 100.0, 100.0);
    let padding_box = Rect::from_xywh(10.0, 10.0, 80.0, 80.0);
    (
      rect_side(border_box, Side::Top),
      rect_side(padding_box, Side::Top),
    )
  }

  /// Shoelace area of the polygon traced by MoveTo/LineTo ops
  fn traced_area(ops: &[DrawOp]) -> f32 {
    let points: Vec<Point> = ops
      .iter()
      .filter_map(|op| match op {
        DrawOp::MoveTo(p) | DrawOp::LineTo(p) => Some(*p),
        _ => None,
      })
      .collect();
    let mut doubled = 0.0;
    for i in 0..points.len() {
      let a = points[i];
      let b = points[(i + 1) % points.len()];
      doubled += a.x * b.y - b.x * a.y;
    }
    doubled.abs() / 2.0
  }

  #[test]
  fn test_solid_border_clips_to_trapezoid() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    let (border_edge, padding_edge) = top_edges();
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Solid,
      10.0,
      Rgba::BLACK,
      Side::Top,
      border_edge,
      padding_edge,
    );

    let ops = canvas.ops();
    assert!(ops.contains(&DrawOp::Clip));
    assert!(ops.contains(&DrawOp::Paint));
    assert_eq!(traced_area(ops), 900.0);
  }

  #[test]
  fn test_dashed_dash_snapping() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    // Segment length 100, width 5: base dash 10 snaps back to 10
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Dashed,
      5.0,
      Rgba::BLACK,
      Side::Top,
      (Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
      (Point::new(5.0, 5.0), Point::new(95.0, 5.0)),
    );
    assert!(canvas.ops().contains(&DrawOp::SetDash(vec![10.0])));
    // No trapezoid clip for dashed
    assert!(!canvas.ops().contains(&DrawOp::Clip));
  }

  #[test]
  fn test_dotted_dash_snapping_and_round_cap() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    // Midpoint line spans exactly 100 units
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Dotted,
      5.0,
      Rgba::BLACK,
      Side::Top,
      (Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
      (Point::new(0.0, 10.0), Point::new(100.0, 10.0)),
    );
    assert!(canvas.ops().contains(&DrawOp::SetDash(vec![0.0, 10.0])));
    assert!(canvas.ops().contains(&DrawOp::SetLineCap(LineCap::Round)));
  }

  #[test]
  fn test_inset_lightens_bottom_and_darkens_top() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let color = Rgba::rgb(100, 100, 100);
    let (border_edge, padding_edge) = top_edges();

    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Inset,
      10.0,
      color,
      Side::Top,
      border_edge,
      padding_edge,
    );
    // Top side under inset is darkened
    assert!(canvas.ops().contains(&DrawOp::SetColor(color.lighten(-0.5))));

    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Inset,
      10.0,
      color,
      Side::Bottom,
      border_edge,
      padding_edge,
    );
    assert!(canvas.ops().contains(&DrawOp::SetColor(color.lighten(0.5))));
  }

  #[test]
  fn test_groove_strokes_two_half_width_lines() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let (border_edge, padding_edge) = top_edges();
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Groove,
      10.0,
      Rgba::rgb(100, 100, 100),
      Side::Top,
      border_edge,
      padding_edge,
    );
    let strokes = canvas
      .ops()
      .iter()
      .filter(|op| **op == DrawOp::Stroke)
      .count();
    assert_eq!(strokes, 2);
    assert!(canvas.ops().contains(&DrawOp::SetLineWidth(5.0)));
    // First stroke centered a quarter width inward
    assert!(canvas.ops().contains(&DrawOp::MoveTo(Point::new(0.0, 2.5))));
    assert!(canvas.ops().contains(&DrawOp::MoveTo(Point::new(0.0, 7.5))));
  }

  #[test]
  fn test_double_strokes_at_sixths() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let (border_edge, padding_edge) = top_edges();
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Double,
      12.0,
      Rgba::BLACK,
      Side::Top,
      border_edge,
      padding_edge,
    );
    assert!(canvas.ops().contains(&DrawOp::SetLineWidth(4.0)));
    assert!(canvas.ops().contains(&DrawOp::MoveTo(Point::new(0.0, 2.0))));
    assert!(canvas.ops().contains(&DrawOp::MoveTo(Point::new(0.0, 10.0))));
  }

  #[test]
  fn test_hinting_disables_antialias_for_wide_dotted() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = Painter::new(&mut images, &mut text).with_hinting(true);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    // Device width 10 on both axes clears the 1-unit threshold; dotted gets
    // the same crisp-edge treatment as every other style
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Dotted,
      10.0,
      Rgba::BLACK,
      Side::Top,
      (Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
      (Point::new(10.0, 10.0), Point::new(90.0, 10.0)),
    );
    assert!(canvas.ops().contains(&DrawOp::SetAntialias(false)));
  }

  #[test]
  fn test_hinting_keeps_antialias_below_device_unit() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = Painter::new(&mut images, &mut text).with_hinting(true);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    canvas.scale(0.05, 0.05);
    painter.draw_border_segment(
      &mut canvas,
      BorderStyle::Solid,
      10.0,
      Rgba::BLACK,
      Side::Top,
      (Point::new(0.0, 0.0), Point::new(100.0, 0.0)),
      (Point::new(10.0, 10.0), Point::new(90.0, 10.0)),
    );
    assert!(!canvas.ops().contains(&DrawOp::SetAntialias(false)));
  }

  #[test]
  fn test_zero_width_sides_paint_nothing() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let mut node = BoxNode::new(BoxContent::Block(Vec::new()));
    node.size = Size::new(50.0, 50.0);
    // Styles and colors set, widths all zero
    node.style.borders.top = BorderSide {
      width: 0.0,
      style: BorderStyle::Solid,
      color: Rgba::BLACK,
    };
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_border(&mut canvas, &node);
    assert!(canvas.ops().is_empty());
  }

  #[test]
  fn test_hidden_box_paints_no_border() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let mut node = BoxNode::new(BoxContent::Block(Vec::new()));
    node.size = Size::new(50.0, 50.0);
    node.border_widths = EdgeOffsets::all(2.0);
    node.style.borders.top = BorderSide {
      width: 2.0,
      style: BorderStyle::Solid,
      color: Rgba::BLACK,
    };
    node.style.visibility = Visibility::Hidden;
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_border(&mut canvas, &node);
    assert!(canvas.ops().is_empty());
  }

  #[test]
  fn test_draw_border_paints_all_styled_sides() {
    let (mut images, mut text) = (NoImages, NoText);
    let painter = painter(&mut images, &mut text);
    let mut node = BoxNode::new(BoxContent::Block(Vec::new()));
    node.size = Size::new(50.0, 50.0);
    node.border_widths = EdgeOffsets::all(4.0);
    let side = BorderSide {
      width: 4.0,
      style: BorderStyle::Solid,
      color: Rgba::BLACK,
    };
    node.style.borders.top = side;
    node.style.borders.bottom = side;
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_border(&mut canvas, &node);
    let paints = canvas
      .ops()
      .iter()
      .filter(|op| **op == DrawOp::Paint)
      .count();
    assert_eq!(paints, 2);
  }
}
