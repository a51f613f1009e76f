//! Color type for resolved styles
//!
//! Colors arrive here already resolved by the upstream style stage; painting
//! only reads them, lightens or darkens them for bevel border styles, and
//! converts them to the drawing surface's representation.

use std::fmt;

/// RGBA color
///
/// - R, G, B: 0-255 (stored as u8)
/// - A: 0.0-1.0 (0.0 is fully transparent and skips painting entirely)
///
/// # Examples
///
/// ```
/// use pagepaint::Rgba;
///
/// let red = Rgba::new(255, 0, 0, 1.0);
/// let faded = Rgba::new(0, 0, 255, 0.5);
/// assert!(Rgba::TRANSPARENT.is_transparent());
/// assert!(!red.is_transparent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
  /// Red component (0-255)
  pub r: u8,
  /// Green component (0-255)
  pub g: u8,
  /// Blue component (0-255)
  pub b: u8,
  /// Alpha component (0.0-1.0)
  pub a: f32,
}

impl Rgba {
  /// Fully transparent black
  pub const TRANSPARENT: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 0.0,
  };

  /// Opaque black
  pub const BLACK: Self = Self {
    r: 0,
    g: 0,
    b: 0,
    a: 1.0,
  };

  /// Opaque white
  pub const WHITE: Self = Self {
    r: 255,
    g: 255,
    b: 255,
    a: 1.0,
  };

  /// Creates a new RGBA color
  pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
    Self { r, g, b, a }
  }

  /// Creates an opaque color from RGB components
  pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
    Self { r, g, b, a: 1.0 }
  }

  /// Returns true if the alpha channel is exactly zero
  pub fn is_transparent(self) -> bool {
    self.a == 0.0
  }

  /// Returns a lighter color (or darker, for negative offsets)
  ///
  /// The offset is in normalized [0, 1] color units and is added uniformly
  /// to the R, G and B components, saturating at the channel bounds. Alpha
  /// is unchanged. Bevel border styles (inset/outset/groove/ridge) use
  /// offsets of ±0.5.
  ///
  /// # Examples
  ///
  /// ```
  /// use pagepaint::Rgba;
  ///
  /// let gray = Rgba::rgb(100, 100, 100);
  /// let lighter = gray.lighten(0.5);
  /// assert_eq!(lighter, Rgba::rgb(228, 228, 228));
  /// let darker = gray.lighten(-0.5);
  /// assert_eq!(darker, Rgba::rgb(0, 0, 0));
  /// ```
  pub fn lighten(self, offset: f32) -> Self {
    let shift = |channel: u8| (channel as f32 + offset * 255.0).round().clamp(0.0, 255.0) as u8;
    Self {
      r: shift(self.r),
      g: shift(self.g),
      b: shift(self.b),
      a: self.a,
    }
  }
}

impl fmt::Display for Rgba {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
  }
}
