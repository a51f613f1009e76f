//! Abstract 2D drawing surface
//!
//! The painter issues primitive drawing operations (path construction,
//! fills, strokes, clips, transforms, compositing groups) against the
//! [`Canvas`] trait and never touches pixels directly. Two implementations
//! ship with the crate:
//!
//! - [`RasterCanvas`](raster::RasterCanvas) rasterizes to a tiny-skia pixmap
//! - [`RecordingCanvas`](recording::RecordingCanvas) records the operation
//!   sequence for inspection, which is how the test suite asserts painting
//!   order
//!
//! # State model
//!
//! A canvas carries one mutable graphics state: current transform, clip,
//! source (color or pattern), stroke parameters and anti-alias mode. The
//! state is saved and restored as a stack. Every scoped region of the
//! painter brackets its work with [`SavedCanvas`] so the state is restored
//! on all exit paths, including early returns and propagated errors.

pub mod raster;
pub mod recording;

use crate::geometry::{Matrix, Point, Rect};
use crate::style::Rgba;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Line cap applied when stroking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
  #[default]
  Butt,
  Round,
}

/// How a pattern behaves outside its intrinsic bounds
///
/// `None` prevents bleed from an image pattern that was also used as a
/// tiling background elsewhere; `Repeat` tiles in both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extend {
  None,
  Repeat,
}

/// Resampling filter used when a pattern is scaled
///
/// Mapped from the `image-rendering` property: `optimizeSpeed` → `Fast`,
/// `auto` → `Good`, `optimizeQuality` → `Best`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFilter {
  Fast,
  #[default]
  Good,
  Best,
}

/// A drawable image pattern
///
/// Produced by the external image resolver (raster decode, SVG
/// rasterization and caching all live upstream). Cloning is cheap; the
/// pixel data is shared.
#[derive(Debug, Clone)]
pub struct Pattern {
  pixels: Arc<tiny_skia::Pixmap>,
}

impl Pattern {
  /// Wraps decoded pixels as a drawable pattern
  pub fn from_pixmap(pixmap: tiny_skia::Pixmap) -> Self {
    Self {
      pixels: Arc::new(pixmap),
    }
  }

  /// Pattern width in pixels
  pub fn width(&self) -> u32 {
    self.pixels.width()
  }

  /// Pattern height in pixels
  pub fn height(&self) -> u32 {
    self.pixels.height()
  }

  /// The underlying pixel data
  pub fn pixmap(&self) -> &tiny_skia::Pixmap {
    &self.pixels
  }
}

/// An image resolved for painting: a pattern plus its intrinsic size
///
/// The intrinsic size is in CSS pixels and is the reference for
/// `background-size` and replaced-content scaling.
#[derive(Debug, Clone)]
pub struct Image {
  /// Drawable pattern
  pub pattern: Pattern,
  /// Intrinsic width in CSS pixels
  pub intrinsic_width: f32,
  /// Intrinsic height in CSS pixels
  pub intrinsic_height: f32,
}

/// Primitive 2D drawing operations
///
/// Semantics follow the usual immediate-mode vector surface model:
///
/// - Path construction (`move_to`/`line_to`/`rectangle`) accumulates a
///   current path in user space; `clip`, `paint` (implicitly, by filling
///   the clip region) and `stroke` consume it.
/// - `clip` intersects the current clip region with the current path.
/// - `paint` fills everything inside the current clip with the current
///   source; `stroke` strokes the current path with the current stroke
///   parameters.
/// - Transforms compose onto the current transform; distances passed to
///   stroking are in user space and scale with it.
/// - `push_group` redirects drawing to an isolated layer;
///   `pop_group_with_alpha` composites that layer back with a uniform
///   alpha multiplier.
pub trait Canvas {
  /// Pushes the current graphics state onto the state stack
  fn save(&mut self);

  /// Pops the graphics state stack
  fn restore(&mut self);

  /// Begins a new subpath at `p`
  fn move_to(&mut self, p: Point);

  /// Adds a line segment from the current point to `p`
  fn line_to(&mut self, p: Point);

  /// Adds a closed rectangular subpath
  fn rectangle(&mut self, rect: Rect);

  /// Intersects the clip region with the current path, then clears the path
  fn clip(&mut self);

  /// Returns a user-space bounding box of the current clip region
  ///
  /// With no clip established this is the whole surface.
  fn clip_extents(&self) -> Rect;

  /// Translates the user coordinate system
  fn translate(&mut self, dx: f32, dy: f32);

  /// Scales the user coordinate system
  fn scale(&mut self, sx: f32, sy: f32);

  /// Rotates the user coordinate system by `radians`
  fn rotate(&mut self, radians: f32);

  /// Composes an arbitrary affine matrix onto the current transform
  fn transform(&mut self, matrix: Matrix);

  /// Maps a user-space distance vector to device space (no translation)
  ///
  /// Used for hinting decisions: whether a border or dash is at least a
  /// device unit wide.
  fn user_to_device_distance(&self, dx: f32, dy: f32) -> (f32, f32);

  /// Sets the source to a solid color
  fn set_color(&mut self, color: Rgba);

  /// Sets the source to an image pattern
  ///
  /// The pattern occupies `[0, width] × [0, height]` in user space;
  /// `extend` controls behavior outside that rectangle and `filter` the
  /// resampling quality.
  fn set_pattern(&mut self, pattern: &Pattern, extend: Extend, filter: ImageFilter);

  /// Sets the stroke line width (user space)
  fn set_line_width(&mut self, width: f32);

  /// Sets the stroke line cap
  fn set_line_cap(&mut self, cap: LineCap);

  /// Sets the stroke dash pattern (user space); empty means solid
  fn set_dash(&mut self, pattern: &[f32]);

  /// Enables or disables anti-aliasing for subsequent operations
  fn set_antialias(&mut self, enabled: bool);

  /// Fills the current clip region with the current source
  fn paint(&mut self);

  /// Like [`paint`](Canvas::paint), with an extra uniform alpha multiplier
  fn paint_with_alpha(&mut self, alpha: f32);

  /// Strokes the current path, then clears the path
  fn stroke(&mut self);

  /// Redirects subsequent drawing to a new isolated compositing group
  fn push_group(&mut self);

  /// Ends the current group and composites it with a uniform alpha
  fn pop_group_with_alpha(&mut self, alpha: f32);
}

/// Scope guard pairing [`Canvas::save`] with [`Canvas::restore`]
///
/// Construction saves the state; dropping the guard restores it, so the
/// surface state is balanced on every exit path. This is the only way the
/// painter ever saves canvas state.
///
/// # Examples
///
/// ```
/// use pagepaint::canvas::{recording::RecordingCanvas, SavedCanvas};
///
/// let mut canvas = RecordingCanvas::new(100.0, 100.0);
/// {
///   let mut scoped = SavedCanvas::new(&mut canvas);
///   scoped.translate(10.0, 10.0);
/// } // restore happens here
/// ```
pub struct SavedCanvas<'a> {
  canvas: &'a mut dyn Canvas,
}

impl<'a> SavedCanvas<'a> {
  /// Saves the canvas state and returns the guard
  pub fn new(canvas: &'a mut dyn Canvas) -> Self {
    canvas.save();
    Self { canvas }
  }
}

impl<'a> Deref for SavedCanvas<'a> {
  type Target = dyn Canvas + 'a;

  fn deref(&self) -> &Self::Target {
    self.canvas
  }
}

impl<'a> DerefMut for SavedCanvas<'a> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    self.canvas
  }
}

impl Drop for SavedCanvas<'_> {
  fn drop(&mut self) {
    self.canvas.restore();
  }
}
