//! Raster canvas backed by tiny-skia
//!
//! Implements the [`Canvas`] trait over a `tiny_skia::Pixmap`. The graphics
//! state (transform, clip mask, source, stroke parameters) lives in an
//! explicit stack; clips are rasterized into an alpha mask by filling the
//! clip path into a mask pixmap, masked by the previous clip so successive
//! clips intersect. Compositing groups are offscreen pixmaps composited
//! back with a uniform opacity.

use super::{Canvas, Extend, ImageFilter, LineCap, Pattern};
use crate::error::{PaintError, Result};
use crate::geometry::{Matrix, Point, Rect};
use crate::style::Rgba;
use tiny_skia::{
  FillRule, FilterQuality, Mask, MaskType, Paint, PathBuilder, Pixmap, PixmapPaint, SpreadMode,
  Stroke, StrokeDash, Transform,
};

#[derive(Clone)]
enum Source {
  Color(Rgba),
  Pattern {
    pattern: Pattern,
    extend: Extend,
    filter: ImageFilter,
  },
}

#[derive(Clone)]
struct RasterState {
  transform: Transform,
  clip: Option<Mask>,
  /// Device-space bounding box of the clip; `None` means unclipped
  clip_bounds: Option<Rect>,
  source: Source,
  line_width: f32,
  line_cap: tiny_skia::LineCap,
  dash: Vec<f32>,
  antialias: bool,
}

impl RasterState {
  fn new() -> Self {
    Self {
      transform: Transform::identity(),
      clip: None,
      clip_bounds: None,
      source: Source::Color(Rgba::BLACK),
      line_width: 1.0,
      line_cap: tiny_skia::LineCap::Butt,
      dash: Vec::new(),
      antialias: true,
    }
  }
}

/// A [`Canvas`] that rasterizes to a tiny-skia pixmap
///
/// # Examples
///
/// ```
/// use pagepaint::canvas::raster::RasterCanvas;
/// use pagepaint::canvas::Canvas;
/// use pagepaint::{Rect, Rgba};
///
/// let mut canvas = RasterCanvas::new(100, 100, Rgba::WHITE).unwrap();
/// canvas.rectangle(Rect::from_xywh(10.0, 10.0, 50.0, 50.0));
/// canvas.clip();
/// canvas.set_color(Rgba::rgb(255, 0, 0));
/// canvas.paint();
/// let pixmap = canvas.into_pixmap();
/// ```
pub struct RasterCanvas {
  pixmap: Pixmap,
  stack: Vec<RasterState>,
  state: RasterState,
  path: PathBuilder,
  /// Parent pixmaps of open compositing groups
  layers: Vec<Pixmap>,
}

impl RasterCanvas {
  /// Creates a canvas filled with `background`
  ///
  /// # Errors
  ///
  /// Returns [`PaintError::InvalidCanvasSize`] if either dimension is zero
  /// or the buffer cannot be allocated.
  pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
    let mut pixmap =
      Pixmap::new(width, height).ok_or(PaintError::InvalidCanvasSize { width, height })?;
    pixmap.fill(to_skia_color(background, 1.0));
    Ok(Self {
      pixmap,
      stack: Vec::new(),
      state: RasterState::new(),
      path: PathBuilder::new(),
      layers: Vec::new(),
    })
  }

  /// Canvas width in pixels
  pub fn width(&self) -> u32 {
    self.pixmap.width()
  }

  /// Canvas height in pixels
  pub fn height(&self) -> u32 {
    self.pixmap.height()
  }

  /// Consumes the canvas and returns the pixel buffer
  ///
  /// Open compositing groups are discarded; callers are expected to have
  /// balanced every `push_group` before finishing.
  pub fn into_pixmap(self) -> Pixmap {
    self.pixmap
  }

  /// Read access to the current pixels
  pub fn pixmap(&self) -> &Pixmap {
    &self.pixmap
  }

  fn surface_rect(&self) -> Rect {
    Rect::from_xywh(0.0, 0.0, self.pixmap.width() as f32, self.pixmap.height() as f32)
  }

  fn take_path(&mut self) -> Option<tiny_skia::Path> {
    std::mem::replace(&mut self.path, PathBuilder::new()).finish()
  }

  /// The device-space rectangle `paint` fills: the clip bounds, narrowed to
  /// the pattern's own extent when the pattern does not extend.
  fn paint_area(&self) -> Option<Rect> {
    let mut area = self.state.clip_bounds.unwrap_or_else(|| self.surface_rect());
    if let Source::Pattern {
      pattern,
      extend: Extend::None,
      ..
    } = &self.state.source
    {
      // Conservative: the bbox over-covers under rotation, but the shader
      // pad mode never samples outside the pattern for axis-aligned use.
      let bounds = transform_rect(
        self.state.transform,
        Rect::from_xywh(0.0, 0.0, pattern.width() as f32, pattern.height() as f32),
      );
      area = area.intersection(bounds)?;
    }
    Some(area)
  }

  fn fill_device_rect(&mut self, area: Rect, alpha: f32) {
    // Free-function paint construction keeps the borrow on self.state only,
    // so the pixmap can be written while the pattern shader is alive
    let paint = make_paint(&self.state, alpha);
    if let Some(rect) = tiny_skia::Rect::from_xywh(area.x(), area.y(), area.width(), area.height())
    {
      self.pixmap.fill_rect(
        rect,
        &paint,
        Transform::identity(),
        self.state.clip.as_ref(),
      );
    }
  }
}

fn make_paint(state: &RasterState, alpha: f32) -> Paint<'_> {
  let mut paint = Paint::default();
  paint.anti_alias = state.antialias;
  match &state.source {
    Source::Color(color) => {
      paint.set_color(to_skia_color(*color, alpha));
    }
    Source::Pattern {
      pattern,
      extend,
      filter,
    } => {
      paint.shader = tiny_skia::Pattern::new(
        pattern.pixmap().as_ref(),
        match extend {
          Extend::None => SpreadMode::Pad,
          Extend::Repeat => SpreadMode::Repeat,
        },
        match filter {
          ImageFilter::Fast => FilterQuality::Nearest,
          ImageFilter::Good => FilterQuality::Bilinear,
          ImageFilter::Best => FilterQuality::Bicubic,
        },
        alpha,
        state.transform,
      );
    }
  }
  paint
}

impl Canvas for RasterCanvas {
  fn save(&mut self) {
    self.stack.push(self.state.clone());
  }

  fn restore(&mut self) {
    if let Some(state) = self.stack.pop() {
      self.state = state;
    }
  }

  fn move_to(&mut self, p: Point) {
    self.path.move_to(p.x, p.y);
  }

  fn line_to(&mut self, p: Point) {
    self.path.line_to(p.x, p.y);
  }

  fn rectangle(&mut self, rect: Rect) {
    self.path.move_to(rect.min_x(), rect.min_y());
    self.path.line_to(rect.max_x(), rect.min_y());
    self.path.line_to(rect.max_x(), rect.max_y());
    self.path.line_to(rect.min_x(), rect.max_y());
    self.path.close();
  }

  fn clip(&mut self) {
    let path = self
      .take_path()
      .and_then(|path| path.transform(self.state.transform));
    let Some(mut mask_pixmap) = Pixmap::new(self.pixmap.width(), self.pixmap.height()) else {
      return;
    };
    match path {
      Some(path) => {
        let mut paint = Paint::default();
        paint.set_color_rgba8(255, 255, 255, 255);
        paint.anti_alias = self.state.antialias;
        // Filling through the previous mask intersects the two clips
        mask_pixmap.fill_path(
          &path,
          &paint,
          FillRule::Winding,
          Transform::identity(),
          self.state.clip.as_ref(),
        );
        let bounds = path.bounds();
        let bounds = Rect::from_xywh(bounds.x(), bounds.y(), bounds.width(), bounds.height());
        self.state.clip_bounds = Some(match self.state.clip_bounds {
          Some(previous) => previous.intersection(bounds).unwrap_or(Rect::ZERO),
          None => bounds,
        });
      }
      None => {
        // Clipping with an empty path leaves nothing paintable
        self.state.clip_bounds = Some(Rect::ZERO);
      }
    }
    self.state.clip = Some(Mask::from_pixmap(mask_pixmap.as_ref(), MaskType::Alpha));
  }

  fn clip_extents(&self) -> Rect {
    let device = self.state.clip_bounds.unwrap_or_else(|| self.surface_rect());
    match self.state.transform.invert() {
      Some(inverse) => transform_rect(inverse, device),
      None => Rect::ZERO,
    }
  }

  fn translate(&mut self, dx: f32, dy: f32) {
    self.state.transform = self.state.transform.pre_translate(dx, dy);
  }

  fn scale(&mut self, sx: f32, sy: f32) {
    self.state.transform = self.state.transform.pre_scale(sx, sy);
  }

  fn rotate(&mut self, radians: f32) {
    self.state.transform = self
      .state
      .transform
      .pre_concat(Transform::from_rotate(radians.to_degrees()));
  }

  fn transform(&mut self, matrix: Matrix) {
    self.state.transform = self.state.transform.pre_concat(Transform::from_row(
      matrix.a, matrix.b, matrix.c, matrix.d, matrix.e, matrix.f,
    ));
  }

  fn user_to_device_distance(&self, dx: f32, dy: f32) -> (f32, f32) {
    let t = self.state.transform;
    (t.sx * dx + t.kx * dy, t.ky * dx + t.sy * dy)
  }

  fn set_color(&mut self, color: Rgba) {
    self.state.source = Source::Color(color);
  }

  fn set_pattern(&mut self, pattern: &Pattern, extend: Extend, filter: ImageFilter) {
    self.state.source = Source::Pattern {
      pattern: pattern.clone(),
      extend,
      filter,
    };
  }

  fn set_line_width(&mut self, width: f32) {
    self.state.line_width = width;
  }

  fn set_line_cap(&mut self, cap: LineCap) {
    self.state.line_cap = match cap {
      LineCap::Butt => tiny_skia::LineCap::Butt,
      LineCap::Round => tiny_skia::LineCap::Round,
    };
  }

  fn set_dash(&mut self, pattern: &[f32]) {
    self.state.dash = pattern.to_vec();
  }

  fn set_antialias(&mut self, enabled: bool) {
    self.state.antialias = enabled;
  }

  fn paint(&mut self) {
    self.paint_with_alpha(1.0);
  }

  fn paint_with_alpha(&mut self, alpha: f32) {
    if let Some(area) = self.paint_area() {
      self.fill_device_rect(area, alpha);
    }
  }

  fn stroke(&mut self) {
    let Some(path) = self.take_path() else {
      return;
    };
    let mut stroke = Stroke {
      width: self.state.line_width,
      line_cap: self.state.line_cap,
      ..Stroke::default()
    };
    if !self.state.dash.is_empty() {
      let mut intervals = self.state.dash.clone();
      // A single interval means equal on/off lengths
      if intervals.len() % 2 == 1 {
        intervals.extend(self.state.dash.iter());
      }
      stroke.dash = StrokeDash::new(intervals, 0.0);
    }
    let paint = make_paint(&self.state, 1.0);
    self.pixmap.stroke_path(
      &path,
      &paint,
      &stroke,
      self.state.transform,
      self.state.clip.as_ref(),
    );
  }

  fn push_group(&mut self) {
    match Pixmap::new(self.pixmap.width(), self.pixmap.height()) {
      Some(group) => {
        let parent = std::mem::replace(&mut self.pixmap, group);
        self.layers.push(parent);
      }
      None => {
        // Allocation cannot fail here for a pixmap that already exists at
        // this size, but stay balanced with pop_group_with_alpha anyway.
        self.layers.push(self.pixmap.clone());
      }
    }
  }

  fn pop_group_with_alpha(&mut self, alpha: f32) {
    let Some(parent) = self.layers.pop() else {
      return;
    };
    let group = std::mem::replace(&mut self.pixmap, parent);
    let paint = PixmapPaint {
      opacity: alpha,
      ..PixmapPaint::default()
    };
    self.pixmap.draw_pixmap(
      0,
      0,
      group.as_ref(),
      &paint,
      Transform::identity(),
      self.state.clip.as_ref(),
    );
  }
}

fn to_skia_color(color: Rgba, alpha: f32) -> tiny_skia::Color {
  tiny_skia::Color::from_rgba8(
    color.r,
    color.g,
    color.b,
    ((color.a * alpha).clamp(0.0, 1.0) * 255.0) as u8,
  )
}

fn transform_point(t: Transform, p: Point) -> Point {
  Point::new(
    t.sx * p.x + t.kx * p.y + t.tx,
    t.ky * p.x + t.sy * p.y + t.ty,
  )
}

fn transform_rect(t: Transform, rect: Rect) -> Rect {
  let corners = rect.corners().map(|p| transform_point(t, p));
  let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
  let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
  let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
  let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
  Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
}
