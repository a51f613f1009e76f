//! Resolved style values consumed by the painter
//!
//! The cascade and computed-value stages live upstream; painting receives a
//! [`Style`] with every relevant property already resolved to the types in
//! this module. The only resolution left to the painter is
//! percentage-against-reference-dimension, modeled by
//! [`LengthOrPercentage::resolve`].

use crate::geometry::Matrix;
use crate::style::color::Rgba;
use bitflags::bitflags;

/// CSS `visibility`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
  #[default]
  Visible,
  Hidden,
}

/// CSS `overflow`
///
/// Anything other than `Visible` clips the stacking context to the box's
/// padding rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
  #[default]
  Visible,
  Hidden,
  Scroll,
  Auto,
}

/// CSS `border-collapse` (tables)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderCollapse {
  #[default]
  Separate,
  Collapse,
}

/// Border line styles
///
/// `None` and `Hidden` are carried so resolved styles stay exhaustive, but
/// they are filtered out before a border segment is ever painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderStyle {
  #[default]
  None,
  Hidden,
  Solid,
  Double,
  Dotted,
  Dashed,
  Groove,
  Ridge,
  Inset,
  Outset,
}

/// One resolved border side: used width, line style, color
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BorderSide {
  /// Used border width in CSS pixels
  pub width: f32,
  /// Line style
  pub style: BorderStyle,
  /// Border color
  pub color: Rgba,
}

/// Resolved borders for all four sides
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Borders {
  pub top: BorderSide,
  pub right: BorderSide,
  pub bottom: BorderSide,
  pub left: BorderSide,
}

/// The three nested rectangles of the CSS box model
///
/// Used both as the geometry-accessor selector and as the resolved value of
/// `background-origin` / `background-clip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxArea {
  BorderBox,
  PaddingBox,
  ContentBox,
}

/// An absolute length or a percentage of some reference dimension
///
/// # Examples
///
/// ```
/// use pagepaint::style::LengthOrPercentage;
///
/// assert_eq!(LengthOrPercentage::Px(12.0).resolve(400.0), 12.0);
/// assert_eq!(LengthOrPercentage::Percent(25.0).resolve(400.0), 100.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LengthOrPercentage {
  /// Absolute length in CSS pixels
  Px(f32),
  /// Percentage (0-100 scale) of a reference dimension
  Percent(f32),
}

impl LengthOrPercentage {
  /// Zero pixels
  pub const ZERO: Self = Self::Px(0.0);

  /// Resolves this value against a reference dimension
  pub fn resolve(self, reference: f32) -> f32 {
    match self {
      LengthOrPercentage::Px(value) => value,
      LengthOrPercentage::Percent(value) => reference * value / 100.0,
    }
  }
}

/// An absolute length or the `auto` keyword, for the `clip` rect
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum LengthOrAuto {
  #[default]
  Auto,
  Px(f32),
}

/// CSS 2.1 `clip` property: `rect(top, right, bottom, left)`
///
/// Offsets are from the box's border-box top-left corner. `auto` resolves
/// to 0 for the top/right components and to the box's border-box dimensions
/// for the bottom/left components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
  pub top: LengthOrAuto,
  pub right: LengthOrAuto,
  pub bottom: LengthOrAuto,
  pub left: LengthOrAuto,
}

/// One axis of `background-size`
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BackgroundSizeComponent {
  #[default]
  Auto,
  Length(LengthOrPercentage),
}

/// CSS `background-size`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundSize {
  /// Uniform scale so the image covers the whole positioning area
  Cover,
  /// Uniform scale so the image fits inside the positioning area
  Contain,
  /// Per-axis explicit or `auto` sizing
  Explicit(BackgroundSizeComponent, BackgroundSizeComponent),
}

impl Default for BackgroundSize {
  fn default() -> Self {
    BackgroundSize::Explicit(BackgroundSizeComponent::Auto, BackgroundSizeComponent::Auto)
  }
}

/// CSS `background-repeat`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundRepeat {
  #[default]
  Repeat,
  RepeatX,
  RepeatY,
  NoRepeat,
}

/// CSS `background-attachment`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundAttachment {
  #[default]
  Scroll,
  /// Positioned against the page's content box instead of the box itself
  Fixed,
}

/// CSS `image-rendering`, normalized to the three recognized levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageRendering {
  /// `optimizeSpeed`
  OptimizeSpeed,
  /// `auto`
  #[default]
  Auto,
  /// `optimizeQuality`
  OptimizeQuality,
}

/// Resolved background properties for one box
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
  /// Background color; alpha 0 paints nothing
  pub color: Rgba,
  /// Background image URI, resolved through the external image resolver
  pub image: Option<String>,
  /// `background-position`, per axis; percentages resolve against
  /// `positioning_dimension - image_dimension`
  pub position: (LengthOrPercentage, LengthOrPercentage),
  /// `background-size`
  pub size: BackgroundSize,
  /// `background-repeat`
  pub repeat: BackgroundRepeat,
  /// `background-attachment`
  pub attachment: BackgroundAttachment,
  /// `background-origin`: the box the position resolves against
  pub origin: BoxArea,
  /// `background-clip`: the box the painting is clipped to
  pub clip: BoxArea,
}

impl Default for Background {
  fn default() -> Self {
    Self {
      color: Rgba::TRANSPARENT,
      image: None,
      position: (LengthOrPercentage::ZERO, LengthOrPercentage::ZERO),
      size: BackgroundSize::default(),
      repeat: BackgroundRepeat::Repeat,
      attachment: BackgroundAttachment::Scroll,
      origin: BoxArea::PaddingBox,
      clip: BoxArea::BorderBox,
    }
  }
}

/// One entry of a CSS 2D transform list
///
/// Angles are in radians; translate components may be percentages of the
/// box's border-box dimensions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransformFunction {
  Scale(f32, f32),
  Rotate(f32),
  Translate(LengthOrPercentage, LengthOrPercentage),
  SkewX(f32),
  SkewY(f32),
  Matrix(Matrix),
}

bitflags! {
  /// The set of `text-decoration` values on a text run
  #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
  pub struct TextDecoration: u8 {
    const OVERLINE = 1 << 0;
    const UNDERLINE = 1 << 1;
    const LINE_THROUGH = 1 << 2;
  }
}

/// Fully resolved style for one box
///
/// Produced by the upstream style stage; read-only during painting.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
  /// CSS `visibility`; hidden boxes paint nothing of their own
  pub visibility: Visibility,
  /// CSS `opacity` in [0, 1]; below 1 the stacking context composites
  /// through an isolated group
  pub opacity: f32,
  /// CSS `overflow`
  pub overflow: Overflow,
  /// CSS 2.1 `clip` rect, if any
  pub clip: Option<ClipRect>,
  /// Foreground (text) color
  pub color: Rgba,
  /// Font size in CSS pixels; zero is a contract breach for text boxes
  pub font_size: f32,
  /// Text decoration set
  pub text_decoration: TextDecoration,
  /// Background color/image and placement
  pub background: Background,
  /// Resolved border sides
  pub borders: Borders,
  /// 2D transform list, applied around `transform_origin`
  pub transform: Vec<TransformFunction>,
  /// `transform-origin`, per axis against border-box dimensions
  pub transform_origin: (LengthOrPercentage, LengthOrPercentage),
  /// `image-rendering` for background images and replaced content
  pub image_rendering: ImageRendering,
  /// `border-collapse` (meaningful on tables only)
  pub border_collapse: BorderCollapse,
}

impl Default for Style {
  fn default() -> Self {
    Self {
      visibility: Visibility::Visible,
      opacity: 1.0,
      overflow: Overflow::Visible,
      clip: None,
      color: Rgba::BLACK,
      font_size: 16.0,
      text_decoration: TextDecoration::empty(),
      background: Background::default(),
      borders: Borders::default(),
      transform: Vec::new(),
      transform_origin: (LengthOrPercentage::Percent(50.0), LengthOrPercentage::Percent(50.0)),
      image_rendering: ImageRendering::Auto,
      border_collapse: BorderCollapse::Separate,
    }
  }
}
