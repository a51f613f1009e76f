//! Resolved style model
//!
//! Style resolution (parsing, cascade, inheritance) is an external concern;
//! this module only defines the resolved value types the painter reads.

pub mod color;
pub mod types;

pub use color::Rgba;
pub use types::{
  Background, BackgroundAttachment, BackgroundRepeat, BackgroundSize, BackgroundSizeComponent,
  BorderCollapse, BorderSide, BorderStyle, Borders, BoxArea, ClipRect, ImageRendering,
  LengthOrAuto, LengthOrPercentage, Overflow, Style, TextDecoration, TransformFunction,
  Visibility,
};
