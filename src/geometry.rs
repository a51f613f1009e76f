//! Core geometry types for painting
//!
//! All units are CSS pixels. The coordinate system has its origin at the
//! top-left corner: positive X extends to the right, positive Y downward,
//! matching CSS 2.1 Section 8.3.1.

use std::fmt;

/// A 2D point in CSS pixel space
///
/// # Examples
///
/// ```
/// use pagepaint::Point;
///
/// let p = Point::new(10.0, 20.0);
/// assert_eq!(p.x, 10.0);
/// assert_eq!(Point::ZERO, Point::new(0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
  /// X coordinate (increases to the right)
  pub x: f32,
  /// Y coordinate (increases downward)
  pub y: f32,
}

impl Point {
  /// The origin (0, 0)
  pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

  /// Creates a new point at the given coordinates
  pub const fn new(x: f32, y: f32) -> Self {
    Self { x, y }
  }

  /// Returns this point shifted by `(dx, dy)`
  pub fn offset(self, dx: f32, dy: f32) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
    }
  }

  /// Computes the Euclidean distance to another point
  ///
  /// # Examples
  ///
  /// ```
  /// use pagepaint::Point;
  ///
  /// let p1 = Point::new(0.0, 0.0);
  /// let p2 = Point::new(3.0, 4.0);
  /// assert_eq!(p1.distance_to(p2), 5.0);
  /// ```
  pub fn distance_to(self, other: Point) -> f32 {
    let dx = other.x - self.x;
    let dy = other.y - self.y;
    (dx * dx + dy * dy).sqrt()
  }

  /// Returns the point halfway between this point and another
  pub fn midpoint(self, other: Point) -> Point {
    Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
  }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({}, {})", self.x, self.y)
  }
}

/// A 2D size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
  /// Width (horizontal extent)
  pub width: f32,
  /// Height (vertical extent)
  pub height: f32,
}

impl Size {
  /// A size with zero width and height
  pub const ZERO: Self = Self {
    width: 0.0,
    height: 0.0,
  };

  /// Creates a new size with the given dimensions
  pub const fn new(width: f32, height: f32) -> Self {
    Self { width, height }
  }

  /// Returns true if either dimension is zero
  pub fn is_empty(self) -> bool {
    self.width == 0.0 || self.height == 0.0
  }
}

impl fmt::Display for Size {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}×{}", self.width, self.height)
  }
}

/// An axis-aligned rectangle in CSS pixel space
///
/// Defined by an origin point (top-left corner) and a size.
///
/// # Examples
///
/// ```
/// use pagepaint::Rect;
///
/// let rect = Rect::from_xywh(10.0, 20.0, 100.0, 50.0);
/// assert_eq!(rect.x(), 10.0);
/// assert_eq!(rect.max_y(), 70.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
  /// The top-left corner
  pub origin: Point,
  /// The extent of the rectangle
  pub size: Size,
}

impl Rect {
  /// A zero-sized rectangle at the origin
  pub const ZERO: Self = Self {
    origin: Point::ZERO,
    size: Size::ZERO,
  };

  /// Creates a new rectangle from an origin point and size
  pub const fn new(origin: Point, size: Size) -> Self {
    Self { origin, size }
  }

  /// Creates a rectangle from x, y, width, height components
  pub const fn from_xywh(x: f32, y: f32, width: f32, height: f32) -> Self {
    Self {
      origin: Point::new(x, y),
      size: Size::new(width, height),
    }
  }

  /// Returns the x coordinate of the left edge
  pub fn x(self) -> f32 {
    self.origin.x
  }

  /// Returns the y coordinate of the top edge
  pub fn y(self) -> f32 {
    self.origin.y
  }

  /// Returns the width
  pub fn width(self) -> f32 {
    self.size.width
  }

  /// Returns the height
  pub fn height(self) -> f32 {
    self.size.height
  }

  /// Returns the x coordinate of the left edge
  pub fn min_x(self) -> f32 {
    self.origin.x
  }

  /// Returns the x coordinate of the right edge
  pub fn max_x(self) -> f32 {
    self.origin.x + self.size.width
  }

  /// Returns the y coordinate of the top edge
  pub fn min_y(self) -> f32 {
    self.origin.y
  }

  /// Returns the y coordinate of the bottom edge
  pub fn max_y(self) -> f32 {
    self.origin.y + self.size.height
  }

  /// Returns the four corners, clockwise from the top-left
  pub fn corners(self) -> [Point; 4] {
    [
      Point::new(self.min_x(), self.min_y()),
      Point::new(self.max_x(), self.min_y()),
      Point::new(self.max_x(), self.max_y()),
      Point::new(self.min_x(), self.max_y()),
    ]
  }

  /// Computes the intersection with another rectangle
  ///
  /// Returns `None` if the rectangles do not overlap.
  ///
  /// # Examples
  ///
  /// ```
  /// use pagepaint::Rect;
  ///
  /// let a = Rect::from_xywh(0.0, 0.0, 10.0, 10.0);
  /// let b = Rect::from_xywh(5.0, 5.0, 10.0, 10.0);
  /// assert_eq!(a.intersection(b), Some(Rect::from_xywh(5.0, 5.0, 5.0, 5.0)));
  /// ```
  pub fn intersection(self, other: Rect) -> Option<Rect> {
    let min_x = self.min_x().max(other.min_x());
    let min_y = self.min_y().max(other.min_y());
    let max_x = self.max_x().min(other.max_x());
    let max_y = self.max_y().min(other.max_y());

    if min_x > max_x || min_y > max_y {
      return None;
    }
    Some(Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y))
  }

  /// Returns this rectangle shifted by `(dx, dy)`
  pub fn translate(self, dx: f32, dy: f32) -> Rect {
    Rect {
      origin: self.origin.offset(dx, dy),
      size: self.size,
    }
  }
}

impl fmt::Display for Rect {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}+{}", self.origin, self.size)
  }
}

/// Edge offsets on all four sides of a box
///
/// Used for margin widths, border widths and padding.
/// Follows CSS box-model order: top, right, bottom, left.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EdgeOffsets {
  /// Top edge offset
  pub top: f32,
  /// Right edge offset
  pub right: f32,
  /// Bottom edge offset
  pub bottom: f32,
  /// Left edge offset
  pub left: f32,
}

impl EdgeOffsets {
  /// Zero offsets on all sides
  pub const ZERO: Self = Self {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
  };

  /// Creates edge offsets with individual values per side
  pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
    Self {
      top,
      right,
      bottom,
      left,
    }
  }

  /// Creates edge offsets with the same value on all sides
  pub const fn all(value: f32) -> Self {
    Self {
      top: value,
      right: value,
      bottom: value,
      left: value,
    }
  }

  /// Returns the sum of the left and right offsets
  pub fn horizontal(self) -> f32 {
    self.left + self.right
  }

  /// Returns the sum of the top and bottom offsets
  pub fn vertical(self) -> f32 {
    self.top + self.bottom
  }
}

/// A 2D affine transformation matrix
///
/// Uses the usual vector-graphics row convention:
///
/// ```text
/// x' = a·x + c·y + e
/// y' = b·x + d·y + f
/// ```
///
/// # Examples
///
/// ```
/// use pagepaint::geometry::{Matrix, Point};
///
/// let m = Matrix::translation(10.0, 5.0);
/// assert_eq!(m.transform_point(Point::new(1.0, 2.0)), Point::new(11.0, 7.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix {
  pub a: f32,
  pub b: f32,
  pub c: f32,
  pub d: f32,
  pub e: f32,
  pub f: f32,
}

impl Matrix {
  /// The identity transform
  pub const IDENTITY: Self = Self {
    a: 1.0,
    b: 0.0,
    c: 0.0,
    d: 1.0,
    e: 0.0,
    f: 0.0,
  };

  /// Creates a matrix from its six coefficients
  pub const fn new(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Self {
    Self { a, b, c, d, e, f }
  }

  /// A pure translation
  pub const fn translation(tx: f32, ty: f32) -> Self {
    Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
  }

  /// A pure scale
  pub const fn scaling(sx: f32, sy: f32) -> Self {
    Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
  }

  /// A rotation by `angle` radians (positive is clockwise in this
  /// y-down coordinate system)
  pub fn rotation(angle: f32) -> Self {
    let (sin, cos) = angle.sin_cos();
    Self::new(cos, sin, -sin, cos, 0.0, 0.0)
  }

  /// Composes `self` with `other`, applying `other` first
  ///
  /// This matches the way drawing surfaces accumulate transforms: each new
  /// transform operates in the coordinate space established by the ones
  /// already applied.
  pub fn pre_concat(self, other: Matrix) -> Matrix {
    Matrix {
      a: self.a * other.a + self.c * other.b,
      b: self.b * other.a + self.d * other.b,
      c: self.a * other.c + self.c * other.d,
      d: self.b * other.c + self.d * other.d,
      e: self.a * other.e + self.c * other.f + self.e,
      f: self.b * other.e + self.d * other.f + self.f,
    }
  }

  /// Maps a point through this transform
  pub fn transform_point(self, p: Point) -> Point {
    Point::new(
      self.a * p.x + self.c * p.y + self.e,
      self.b * p.x + self.d * p.y + self.f,
    )
  }

  /// Maps a distance vector through this transform, ignoring translation
  pub fn transform_distance(self, dx: f32, dy: f32) -> (f32, f32) {
    (self.a * dx + self.c * dy, self.b * dx + self.d * dy)
  }

  /// Maps a rectangle and returns the axis-aligned bounding box
  pub fn transform_rect(self, rect: Rect) -> Rect {
    let corners = rect.corners().map(|p| self.transform_point(p));
    let min_x = corners.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
    let min_y = corners.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    let max_x = corners.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
    let max_y = corners.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);
    Rect::from_xywh(min_x, min_y, max_x - min_x, max_y - min_y)
  }

  /// Returns the inverse transform, or `None` if this matrix is singular
  pub fn invert(self) -> Option<Matrix> {
    let det = self.a * self.d - self.b * self.c;
    if det == 0.0 || !det.is_finite() {
      return None;
    }
    Some(Matrix {
      a: self.d / det,
      b: -self.b / det,
      c: -self.c / det,
      d: self.a / det,
      e: (self.c * self.f - self.d * self.e) / det,
      f: (self.b * self.e - self.a * self.f) / det,
    })
  }
}

impl Default for Matrix {
  fn default() -> Self {
    Self::IDENTITY
  }
}
