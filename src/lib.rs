//! Paints laid-out document box trees onto a 2D canvas.
//!
//! The input is a tree of boxes already positioned and sized by an
//! upstream layout engine, grouped into stacking contexts; the output is a
//! sequence of primitive drawing operations (fills, strokes, clips,
//! transforms, image composites) issued against an abstract [`Canvas`].
//! Two canvas implementations ship with the crate: a tiny-skia rasterizer
//! and a recording canvas for inspecting paint order.
//!
//! # Architecture
//!
//! - [`tree`] defines the read-only box tree and stacking contexts
//! - [`style`] defines the resolved style values the painter reads
//! - [`canvas`] is the drawing-surface abstraction and its backends
//! - [`paint`] walks the tree in CSS 2.1 Appendix E painting order and
//!   issues the drawing operations
//!
//! Text shaping, image decoding and style resolution live behind the
//! [`TextEngine`] and [`ImageResolver`] seams; this crate never touches
//! fonts or image formats itself.
//!
//! # Example
//!
//! ```
//! use pagepaint::canvas::raster::RasterCanvas;
//! use pagepaint::paint::{NoImages, NoText, Painter};
//! use pagepaint::tree::{BoxContent, BoxNode, Page, StackingContext};
//! use pagepaint::{Point, Rgba, Size};
//!
//! let mut root_box = BoxNode::new(BoxContent::Block(Vec::new()));
//! root_box.size = Size::new(100.0, 40.0);
//! root_box.style.background.color = Rgba::rgb(200, 220, 255);
//!
//! let mut page_box = BoxNode::new(BoxContent::Block(Vec::new()));
//! page_box.size = Size::new(595.0, 842.0);
//! let page = Page {
//!   page_box,
//!   canvas_background: None,
//!   root: StackingContext::new(root_box),
//! };
//!
//! let (mut images, mut text) = (NoImages, NoText);
//! let mut painter = Painter::new(&mut images, &mut text);
//! let mut canvas = RasterCanvas::new(595, 842, Rgba::WHITE)?;
//! painter.render_page(&mut canvas, &page)?;
//! let pixmap = canvas.into_pixmap();
//! # Ok::<(), pagepaint::PaintError>(())
//! ```

pub mod canvas;
pub mod error;
pub mod geometry;
pub mod paint;
pub mod style;
pub mod tree;

pub use canvas::{Canvas, Extend, Image, ImageFilter, LineCap, Pattern, SavedCanvas};
pub use error::{PaintError, Result};
pub use geometry::{EdgeOffsets, Matrix, Point, Rect, Size};
pub use paint::{ImageResolver, Painter, TextEngine};
pub use style::Rgba;
pub use tree::{BoxContent, BoxNode, Page, StackingContext};
