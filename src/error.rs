//! Error types for the paint pipeline
//!
//! Painting has almost no recoverable-error surface: the box tree and styles
//! are produced by an upstream layout/style stage and are assumed well
//! formed. The variants here cover the few contract breaches that must fail
//! loudly instead of silently drawing nothing, plus canvas construction.
//!
//! Degenerate geometry (zero-area replaced boxes, empty table grids, borders
//! with no width anywhere) is tolerated as a no-op and never reaches this
//! module. A missing background image is the resolver's `None` sentinel,
//! also not an error.

use thiserror::Error;

/// Result type alias for paint operations
pub type Result<T> = std::result::Result<T, PaintError>;

/// Errors raised while painting a page
///
/// All variants indicate either an invalid drawing surface or a breach of
/// the upstream contract (a precondition violation). A failure aborts the
/// current page render; the drawing-surface state is still restored by the
/// scoped guards on the way out, so previously rendered pages are
/// unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PaintError {
  /// Canvas dimensions were zero or too large to allocate
  #[error("cannot create canvas: {width}x{height}")]
  InvalidCanvasSize { width: u32, height: u32 },

  /// A replaced box's intrinsic resource was painted a second time
  ///
  /// Replaced boxes are atomic and painted at most once per render; the
  /// resource is invalidated after the first paint so that backends with
  /// lazy rasterization release it before the surface is finalized.
  #[error("replaced content was already painted once; replaced boxes are atomic and must not be painted twice")]
  ReplacedContentConsumed,

  /// A text run with `font-size: 0` reached the text painter
  #[error("cannot paint text with font-size: 0")]
  ZeroFontSize,

  /// A box kind that is not legal at inline level was found in a line
  #[error("unexpected {kind} box in inline-level content")]
  UnexpectedInlineContent { kind: &'static str },
}
