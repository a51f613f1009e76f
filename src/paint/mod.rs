//! The paint pipeline
//!
//! [`Painter`] walks a page's stacking-context tree depth first and issues
//! drawing operations against a [`Canvas`]. Painting order follows CSS 2.1
//! Appendix E: for each context, its own background and border, then
//! negative z-index contexts, in-flow block descendants, floats, inline
//! content, zero z-index contexts and positive z-index contexts, with
//! `clip`/`overflow` clipping and opacity grouping bracketing the whole
//! context.
//!
//! The traversal is strictly sequential: canvas state (transform, clip,
//! source, groups) is one shared stack, and every scoped region is held by
//! a [`SavedCanvas`] guard so the state rewinds on every exit path.

pub mod background;
pub mod border;
pub mod collapse;
pub mod replaced;
pub mod text;
pub mod transform;

pub use border::{rect_side, Segment, Side};

use crate::canvas::{Canvas, Image, ImageFilter, SavedCanvas};
use crate::error::Result;
use crate::geometry::Rect;
use crate::style::{
  BackgroundAttachment, BorderCollapse, BoxArea, ImageRendering, LengthOrAuto, Overflow,
  Visibility,
};
use crate::tree::{BoxContent, BoxNode, InlineLevel, Page, ShapedTextId, StackingContext};
use log::{debug, trace};

/// Resolves image references to drawable patterns
///
/// Decoding, caching and SVG rasterization all live behind this seam; the
/// painter only ever asks for a finished [`Image`].
pub trait ImageResolver {
  /// Returns the image for `uri`, or `None` when it cannot be resolved
  fn resolve(&mut self, uri: &str) -> Option<Image>;
}

/// Draws shaped glyph runs
///
/// The painter positions the run (`move_to`) and sets the source color
/// before calling; the engine draws the run's single line at the current
/// position with the current source.
pub trait TextEngine {
  fn show_first_line(&mut self, canvas: &mut dyn Canvas, layout: ShapedTextId, hinting: bool);
}

/// An image resolver with no sources; every lookup misses
///
/// Backgrounds fall back to their color fill and replaced boxes keep
/// whatever image layout attached to them.
#[derive(Debug, Default)]
pub struct NoImages;

impl ImageResolver for NoImages {
  fn resolve(&mut self, _uri: &str) -> Option<Image> {
    None
  }
}

/// A text engine that draws nothing
///
/// Useful for exercising paint order without any font machinery.
#[derive(Debug, Default)]
pub struct NoText;

impl TextEngine for NoText {
  fn show_first_line(&mut self, _canvas: &mut dyn Canvas, _layout: ShapedTextId, _hinting: bool) {}
}

/// Paints laid-out pages onto a canvas
///
/// # Examples
///
/// ```
/// use pagepaint::canvas::recording::RecordingCanvas;
/// use pagepaint::paint::{NoImages, NoText, Painter};
/// use pagepaint::tree::{BoxContent, BoxNode, Page, StackingContext};
///
/// let page = Page {
///   page_box: BoxNode::new(BoxContent::Block(Vec::new())),
///   canvas_background: None,
///   root: StackingContext::new(BoxNode::new(BoxContent::Block(Vec::new()))),
/// };
/// let (mut images, mut text) = (NoImages, NoText);
/// let mut painter = Painter::new(&mut images, &mut text);
/// let mut canvas = RecordingCanvas::new(595.0, 842.0);
/// painter.render_page(&mut canvas, &page).unwrap();
/// ```
pub struct Painter<'a> {
  pub(crate) images: &'a mut dyn ImageResolver,
  pub(crate) text: &'a mut dyn TextEngine,
  pub(crate) hinting: bool,
  pub(crate) invalidate_replaced: bool,
  /// Positioning area for `background-attachment: fixed`, set while a
  /// page render is in progress
  fixed_positioning_area: Option<Rect>,
}

impl<'a> Painter<'a> {
  /// Creates a painter over the given capability seams
  ///
  /// Hinting starts disabled; replaced-content invalidation starts
  /// enabled.
  pub fn new(images: &'a mut dyn ImageResolver, text: &'a mut dyn TextEngine) -> Self {
    Self {
      images,
      text,
      hinting: false,
      invalidate_replaced: true,
      fixed_positioning_area: None,
    }
  }

  /// Enables or disables device hinting
  ///
  /// Hinting disables anti-aliasing for background fills, wide borders
  /// and decoration lines, trading smooth edges for seam-free joins on
  /// raster targets.
  pub fn with_hinting(mut self, enabled: bool) -> Self {
    self.hinting = enabled;
    self
  }

  /// Controls the one-shot consumption of replaced-content images
  ///
  /// Backends with lazy rasterization need the handle released right
  /// after painting; backends without that constraint may disable the
  /// consumption and paint the same tree repeatedly.
  pub fn with_replaced_invalidation(mut self, enabled: bool) -> Self {
    self.invalidate_replaced = enabled;
    self
  }

  /// Renders one full page
  ///
  /// Idempotent except for replaced-content consumption: with
  /// invalidation enabled, a page containing replaced boxes can only be
  /// rendered once.
  pub fn render_page(&mut self, canvas: &mut dyn Canvas, page: &Page) -> Result<()> {
    let page_box = &page.page_box;
    debug!(
      "painting page, border box {}",
      page_box.box_rectangle(BoxArea::BorderBox)
    );
    self.fixed_positioning_area = Some(page_box.box_rectangle(BoxArea::ContentBox));

    // The page's own background bleeds to the canvas edge
    let positioning_area = self.background_positioning_area(page_box);
    self.draw_background(canvas, &page_box.style, None, positioning_area)?;

    // Root (or body) background propagated to the canvas
    if let Some(style) = &page.canvas_background {
      let padding_box = page_box.box_rectangle(BoxArea::PaddingBox);
      self.draw_background(canvas, style, Some(padding_box), padding_box)?;
    }

    self.draw_border(canvas, page_box);
    let result = self.draw_stacking_context(canvas, &page.root);
    self.fixed_positioning_area = None;
    result
  }

  /// Paints one stacking context and everything below it
  pub fn draw_stacking_context(
    &mut self,
    canvas: &mut dyn Canvas,
    context: &StackingContext,
  ) -> Result<()> {
    let root = &context.root;
    trace!("stacking context rooted at {} box", root.content.kind_name());
    let mut canvas = SavedCanvas::new(canvas);

    if let Some(clip) = root.style.clip {
      let border_box = root.box_rectangle(BoxArea::BorderBox);
      let top = resolve_clip_component(clip.top, 0.0);
      let right = resolve_clip_component(clip.right, 0.0);
      let bottom = resolve_clip_component(clip.bottom, border_box.height());
      let left = resolve_clip_component(clip.left, border_box.width());
      canvas.rectangle(Rect::from_xywh(
        border_box.x() + right,
        border_box.y() + top,
        left - right,
        bottom - top,
      ));
      canvas.clip();
    }

    if root.style.overflow != Overflow::Visible {
      canvas.rectangle(root.box_rectangle(BoxArea::PaddingBox));
      canvas.clip();
    }

    let grouped = root.style.opacity < 1.0;
    if grouped {
      canvas.push_group();
    }

    let atomic = !matches!(
      root.content,
      BoxContent::Inline(_) | BoxContent::Line(_) | BoxContent::Text(_)
    );
    if atomic {
      self.apply_transforms(&mut *canvas, root);
    }

    if matches!(
      root.content,
      BoxContent::Block(_)
        | BoxContent::Margin(_)
        | BoxContent::InlineBlock(_)
        | BoxContent::Table(_)
        | BoxContent::TableCell(_)
    ) {
      self.draw_box_background_and_border(&mut *canvas, root)?;
    }

    for child in &context.negative_z {
      self.draw_stacking_context(&mut *canvas, child)?;
    }

    for block in &context.blocks_and_cells {
      self.draw_box_background_and_border(&mut *canvas, block)?;
    }

    for child in &context.floats {
      self.draw_stacking_context(&mut *canvas, child)?;
    }

    if matches!(root.content, BoxContent::Inline(_)) {
      self.draw_inline_level(&mut *canvas, root)?;
    }

    // Markers, replaced content and line boxes, for the root and every
    // in-flow block: after backgrounds and borders, before child contexts
    for block in std::iter::once(root).chain(context.blocks_and_cells.iter()) {
      if let Some(marker) = &block.outside_list_marker {
        self.draw_inline_level(&mut *canvas, marker)?;
      }
      match &block.content {
        BoxContent::Replaced(replaced) | BoxContent::InlineReplaced(replaced) => {
          self.draw_replaced(&mut *canvas, block, replaced)?;
        }
        BoxContent::Block(children)
        | BoxContent::Margin(children)
        | BoxContent::InlineBlock(children)
        | BoxContent::TableCell(children) => {
          for child in children {
            if matches!(child.content, BoxContent::Line(_)) {
              self.draw_inline_level(&mut *canvas, child)?;
            }
          }
        }
        _ => {}
      }
    }

    for child in &context.zero_z {
      self.draw_stacking_context(&mut *canvas, child)?;
    }

    for child in &context.positive_z {
      self.draw_stacking_context(&mut *canvas, child)?;
    }

    if grouped {
      canvas.pop_group_with_alpha(root.style.opacity);
    }
    Ok(())
  }

  /// Paints a box's background and border, with the full per-column,
  /// per-row, per-cell pass for tables
  pub fn draw_box_background_and_border(
    &mut self,
    canvas: &mut dyn Canvas,
    node: &BoxNode,
  ) -> Result<()> {
    self.draw_node_background(canvas, node)?;
    let BoxContent::Table(table) = &node.content else {
      self.draw_border(canvas, node);
      return Ok(());
    };

    for column_group in &table.column_groups {
      self.draw_node_background(canvas, column_group)?;
      if let BoxContent::TableColumnGroup(columns) = &column_group.content {
        for column in columns {
          self.draw_node_background(canvas, column)?;
        }
      }
    }
    for row_group in &table.row_groups {
      self.draw_node_background(canvas, row_group)?;
      if let BoxContent::TableRowGroup(rows) = &row_group.content {
        for row in rows {
          self.draw_node_background(canvas, row)?;
          if let BoxContent::TableRow(cells) = &row.content {
            for cell in cells {
              self.draw_node_background(canvas, cell)?;
            }
          }
        }
      }
    }

    if node.style.border_collapse == BorderCollapse::Separate {
      self.draw_separate_borders(canvas, node, table);
    } else {
      self.draw_collapsed_borders(canvas, table);
    }
    Ok(())
  }

  /// Paints one inline-level box: its background and border, then its
  /// content
  pub fn draw_inline_level(&mut self, canvas: &mut dyn Canvas, node: &BoxNode) -> Result<()> {
    self.draw_node_background(canvas, node)?;
    self.draw_border(canvas, node);
    match &node.content {
      BoxContent::Inline(children) | BoxContent::Line(children) => {
        for child in children {
          match child {
            InlineLevel::Context(child_context) => {
              self.draw_stacking_context(canvas, child_context)?;
            }
            InlineLevel::Box(child_box) => {
              self.draw_inline_level(canvas, child_box)?;
            }
          }
        }
        Ok(())
      }
      BoxContent::InlineReplaced(replaced) => self.draw_replaced(canvas, node, replaced),
      // Bare text at this level happens for list markers
      BoxContent::Text(run) => self.draw_text(canvas, node, run),
      other => Err(crate::PaintError::UnexpectedInlineContent {
        kind: other.kind_name(),
      }),
    }
  }

  /// Paints a single box's background, deriving its painting and
  /// positioning areas from `background-clip` and `background-origin`
  pub(crate) fn draw_node_background(
    &mut self,
    canvas: &mut dyn Canvas,
    node: &BoxNode,
  ) -> Result<()> {
    if node.style.visibility == Visibility::Hidden {
      return Ok(());
    }
    let painting_area = node.box_rectangle(node.style.background.clip);
    let positioning_area = self.background_positioning_area(node);
    self.draw_background(canvas, &node.style, Some(painting_area), positioning_area)
  }

  fn background_positioning_area(&self, node: &BoxNode) -> Rect {
    if node.style.background.attachment == BackgroundAttachment::Fixed {
      if let Some(area) = self.fixed_positioning_area {
        return area;
      }
    }
    node.box_rectangle(node.style.background.origin)
  }
}

fn resolve_clip_component(value: LengthOrAuto, auto_value: f32) -> f32 {
  match value {
    LengthOrAuto::Auto => auto_value,
    LengthOrAuto::Px(value) => value,
  }
}

/// Maps `image-rendering` to a pattern resampling filter
pub(crate) fn image_filter(rendering: ImageRendering) -> ImageFilter {
  match rendering {
    ImageRendering::OptimizeSpeed => ImageFilter::Fast,
    ImageRendering::Auto => ImageFilter::Good,
    ImageRendering::OptimizeQuality => ImageFilter::Best,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::canvas::recording::{DrawOp, RecordingCanvas};
  use crate::style::{ClipRect, Rgba};
  use crate::{EdgeOffsets, Point, Size};

  fn block(x: f32, y: f32, background: Rgba) -> BoxNode {
    let mut node = BoxNode::new(BoxContent::Block(Vec::new()));
    node.position = Point::new(x, y);
    node.size = Size::new(50.0, 20.0);
    node.style.background.color = background;
    node
  }

  #[test]
  fn test_overflow_hidden_clips_to_padding_box() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    let mut root = block(10.0, 10.0, Rgba::TRANSPARENT);
    root.padding = EdgeOffsets::all(5.0);
    root.style.overflow = Overflow::Hidden;
    let context = StackingContext::new(root);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_stacking_context(&mut canvas, &context).unwrap();
    assert_eq!(
      canvas.ops()[1],
      DrawOp::Rectangle(Rect::from_xywh(10.0, 10.0, 60.0, 30.0))
    );
    assert_eq!(canvas.ops()[2], DrawOp::Clip);
  }

  #[test]
  fn test_clip_property_auto_resolution() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    let mut root = block(0.0, 0.0, Rgba::TRANSPARENT);
    // auto sides resolve to 0 (top/right) and the border dimensions
    // (bottom/left), covering the whole border box
    root.style.clip = Some(ClipRect {
      top: LengthOrAuto::Auto,
      right: LengthOrAuto::Auto,
      bottom: LengthOrAuto::Auto,
      left: LengthOrAuto::Auto,
    });
    let context = StackingContext::new(root);
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    painter.draw_stacking_context(&mut canvas, &context).unwrap();
    assert_eq!(
      canvas.ops()[1],
      DrawOp::Rectangle(Rect::from_xywh(0.0, 0.0, 50.0, 20.0))
    );
  }

  #[test]
  fn test_unexpected_inline_content_fails() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    let node = BoxNode::new(BoxContent::Block(Vec::new()));
    let mut canvas = RecordingCanvas::new(200.0, 200.0);
    assert_eq!(
      painter.draw_inline_level(&mut canvas, &node),
      Err(crate::PaintError::UnexpectedInlineContent { kind: "block" })
    );
  }

  #[test]
  fn test_render_page_paints_page_then_content() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    let mut page_box = BoxNode::new(BoxContent::Block(Vec::new()));
    page_box.size = Size::new(100.0, 100.0);
    page_box.style.background.color = Rgba::WHITE;
    let root = StackingContext::new(block(0.0, 0.0, Rgba::BLACK));
    let page = Page {
      page_box,
      canvas_background: None,
      root,
    };
    let mut canvas = RecordingCanvas::new(100.0, 100.0);
    painter.render_page(&mut canvas, &page).unwrap();
    let colors: Vec<Rgba> = canvas
      .ops()
      .iter()
      .filter_map(|op| match op {
        DrawOp::SetColor(color) => Some(*color),
        _ => None,
      })
      .collect();
    assert_eq!(colors, vec![Rgba::WHITE, Rgba::BLACK]);
  }

  #[test]
  fn test_fixed_attachment_positions_against_page_content_box() {
    let (mut images, mut text) = (NoImages, NoText);
    let mut painter = Painter::new(&mut images, &mut text);
    painter.fixed_positioning_area = Some(Rect::from_xywh(5.0, 5.0, 90.0, 90.0));
    let mut node = block(40.0, 40.0, Rgba::TRANSPARENT);
    node.style.background.attachment = BackgroundAttachment::Fixed;
    assert_eq!(
      painter.background_positioning_area(&node),
      Rect::from_xywh(5.0, 5.0, 90.0, 90.0)
    );
  }
}
