//! Laid-out box tree
//!
//! Input to the painter: a fragment tree produced by layout, with every
//! position and size already resolved to CSS pixels in page coordinates.
//! Painting never mutates the tree except for the one-shot consumption of
//! replaced content handles.
//!
//! A box records its margin-box origin plus the thicknesses of its margin,
//! border and padding rings; the three box-model rectangles are derived on
//! demand by [`BoxNode::box_rectangle`].

use crate::canvas::Image;
use crate::geometry::{EdgeOffsets, Point, Rect, Size};
use crate::style::{BorderStyle, BoxArea, Rgba, Style};
use std::cell::RefCell;

/// Opaque handle to a shaped, positioned line of text
///
/// Shaping and glyph layout live upstream; the painter hands this back to
/// the text engine when the run is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapedTextId(pub u64);

/// A shaped text run inside a line box
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
  /// Handle to the shaped glyphs
  pub layout: ShapedTextId,
  /// Baseline offset from the box's content-box top, in CSS pixels
  pub baseline: f32,
}

/// Replaced content (image, canvas, embedded object) resolved to a
/// drawable image
///
/// The handle is consumed the first time it is painted: external resources
/// may hold streams or GPU surfaces that must not be drawn twice. A second
/// paint attempt surfaces as
/// [`PaintError::ReplacedContentConsumed`](crate::PaintError::ReplacedContentConsumed).
#[derive(Debug, Clone)]
pub struct ReplacedContent {
  image: RefCell<Option<Image>>,
}

impl ReplacedContent {
  /// Wraps a resolved image as replaced content
  pub fn new(image: Image) -> Self {
    Self {
      image: RefCell::new(Some(image)),
    }
  }

  /// Takes the image out, leaving the handle consumed
  pub fn take(&self) -> Option<Image> {
    self.image.borrow_mut().take()
  }

  /// Returns a copy of the image without consuming the handle
  pub fn peek(&self) -> Option<Image> {
    self.image.borrow().clone()
  }

  /// True once the image has been taken
  pub fn is_consumed(&self) -> bool {
    self.image.borrow().is_none()
  }
}

/// Border resolved for one cell-grid edge, with its conflict-resolution
/// score
///
/// Higher scores win edge conflicts. The score encodes the CSS 2.1
/// collapsing priority (style strength, then width, then source proximity)
/// and is assigned by the upstream table-layout stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBorder {
  /// Conflict-resolution priority; segments paint in ascending order so
  /// higher scores end up on top
  pub score: u32,
  pub style: BorderStyle,
  pub width: f32,
  pub color: Rgba,
}

/// Resolved collapsed-border grid for one table fragment
///
/// `vertical[y][x]` is the edge left of column `x` in row `y`
/// (`x` ranges over `columns + 1`); `horizontal[y][x]` is the edge above
/// row `y` in column `x` (`y` ranges over `rows + 1`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderGrid {
  pub vertical: Vec<Vec<GridBorder>>,
  pub horizontal: Vec<Vec<GridBorder>>,
}

/// Table-specific structure attached to a table box
#[derive(Debug, Clone)]
pub struct TableContent {
  /// Column group boxes, each containing its column boxes
  pub column_groups: Vec<BoxNode>,
  /// Row group boxes, each containing rows, each containing cells
  pub row_groups: Vec<BoxNode>,
  /// X coordinate of each column's left edge, in page coordinates
  pub column_positions: Vec<f32>,
  /// Used width of each column
  pub column_widths: Vec<f32>,
  /// Collapsed-border grid; present when `border-collapse: collapse`
  pub collapsed_border_grid: Option<BorderGrid>,
  /// Rows of the grid skipped before this fragment (page breaks)
  pub skipped_rows: usize,
}

/// An inline-level item inside a line box
#[derive(Debug, Clone)]
pub enum InlineLevel {
  /// An ordinary inline-level box painted in flow
  Box(BoxNode),
  /// An atomic inline that established its own stacking context
  Context(Box<StackingContext>),
}

/// The content carried by a box, which decides how it is painted
#[derive(Debug, Clone)]
pub enum BoxContent {
  /// Block container with block-level children
  Block(Vec<BoxNode>),
  /// Page margin box (running headers/footers)
  Margin(Vec<BoxNode>),
  /// Inline box: children are inline-level
  Inline(Vec<InlineLevel>),
  /// Line box: children are inline-level
  Line(Vec<InlineLevel>),
  /// Inline-block: block-level children, painted atomically
  InlineBlock(Vec<BoxNode>),
  /// A shaped text run
  Text(TextRun),
  /// Block-level replaced element
  Replaced(ReplacedContent),
  /// Inline-level replaced element
  InlineReplaced(ReplacedContent),
  /// Table wrapper content
  Table(TableContent),
  /// Column group containing column boxes
  TableColumnGroup(Vec<BoxNode>),
  /// A single table column (no children of its own)
  TableColumn,
  /// Row group containing row boxes
  TableRowGroup(Vec<BoxNode>),
  /// Row containing cell boxes
  TableRow(Vec<BoxNode>),
  /// Table cell with block-level children
  TableCell(Vec<BoxNode>),
}

impl BoxContent {
  /// Short name of the content kind, for diagnostics
  pub fn kind_name(&self) -> &'static str {
    match self {
      BoxContent::Block(_) => "block",
      BoxContent::Margin(_) => "margin",
      BoxContent::Inline(_) => "inline",
      BoxContent::Line(_) => "line",
      BoxContent::InlineBlock(_) => "inline-block",
      BoxContent::Text(_) => "text",
      BoxContent::Replaced(_) => "replaced",
      BoxContent::InlineReplaced(_) => "inline-replaced",
      BoxContent::Table(_) => "table",
      BoxContent::TableColumnGroup(_) => "table-column-group",
      BoxContent::TableColumn => "table-column",
      BoxContent::TableRowGroup(_) => "table-row-group",
      BoxContent::TableRow(_) => "table-row",
      BoxContent::TableCell(_) => "table-cell",
    }
  }
}

/// One laid-out box fragment
///
/// # Examples
///
/// ```
/// use pagepaint::tree::{BoxContent, BoxNode};
/// use pagepaint::style::BoxArea;
/// use pagepaint::{EdgeOffsets, Point, Rect, Size};
///
/// let mut node = BoxNode::new(BoxContent::Block(Vec::new()));
/// node.position = Point::new(10.0, 10.0);
/// node.margin = EdgeOffsets::all(5.0);
/// node.border_widths = EdgeOffsets::all(2.0);
/// node.padding = EdgeOffsets::all(3.0);
/// node.size = Size::new(100.0, 40.0);
///
/// assert_eq!(
///   node.box_rectangle(BoxArea::BorderBox),
///   Rect::from_xywh(15.0, 15.0, 110.0, 50.0)
/// );
/// assert_eq!(
///   node.box_rectangle(BoxArea::ContentBox),
///   Rect::from_xywh(20.0, 20.0, 100.0, 40.0)
/// );
/// ```
#[derive(Debug, Clone)]
pub struct BoxNode {
  /// Margin-box top-left corner in page coordinates
  pub position: Point,
  /// Margin thicknesses
  pub margin: EdgeOffsets,
  /// Used border widths
  pub border_widths: EdgeOffsets,
  /// Padding thicknesses
  pub padding: EdgeOffsets,
  /// Content-box size
  pub size: Size,
  /// Resolved style
  pub style: Style,
  /// Marker box of a `list-style-position: outside` list item, painted
  /// with the item's first line
  pub outside_list_marker: Option<Box<BoxNode>>,
  /// What the box contains
  pub content: BoxContent,
}

impl BoxNode {
  /// Creates a box with the given content and default geometry and style
  pub fn new(content: BoxContent) -> Self {
    Self {
      position: Point::ZERO,
      margin: EdgeOffsets::ZERO,
      border_widths: EdgeOffsets::ZERO,
      padding: EdgeOffsets::ZERO,
      size: Size::ZERO,
      style: Style::default(),
      outside_list_marker: None,
      content,
    }
  }

  /// Returns one of the box-model rectangles in page coordinates
  ///
  /// The three areas nest: the border box is the padding box grown by the
  /// border widths, which is the content box grown by the padding.
  pub fn box_rectangle(&self, area: BoxArea) -> Rect {
    let border_box = Rect::from_xywh(
      self.position.x + self.margin.left,
      self.position.y + self.margin.top,
      self.size.width + self.padding.horizontal() + self.border_widths.horizontal(),
      self.size.height + self.padding.vertical() + self.border_widths.vertical(),
    );
    match area {
      BoxArea::BorderBox => border_box,
      BoxArea::PaddingBox => inset(border_box, self.border_widths),
      BoxArea::ContentBox => inset(inset(border_box, self.border_widths), self.padding),
    }
  }
}

fn inset(rect: Rect, edges: EdgeOffsets) -> Rect {
  Rect::from_xywh(
    rect.x() + edges.left,
    rect.y() + edges.top,
    rect.width() - edges.horizontal(),
    rect.height() - edges.vertical(),
  )
}

/// A stacking context with its descendants pre-sorted into paint layers
///
/// Layers follow CSS 2.1 Appendix E: negative z-index contexts first, then
/// in-flow block-level boxes, then floats, then non-positioned contexts
/// (z-index auto, opacity, transform), then zero and positive z-index
/// contexts. The upstream stacking stage sorts `negative_z` and
/// `positive_z` by `z-index`, ties in tree order.
#[derive(Debug, Clone)]
pub struct StackingContext {
  /// The box that established this context
  pub root: BoxNode,
  /// Child contexts with negative `z-index`, in paint order
  pub negative_z: Vec<StackingContext>,
  /// In-flow, non-positioned block-level descendant boxes and table cells,
  /// painted for backgrounds and borders only
  pub blocks_and_cells: Vec<BoxNode>,
  /// Floating descendants, each an atomic pseudo-context
  pub floats: Vec<StackingContext>,
  /// Child contexts with `z-index: 0` or auto, in tree order
  pub zero_z: Vec<StackingContext>,
  /// Child contexts with positive `z-index`, in paint order
  pub positive_z: Vec<StackingContext>,
}

impl StackingContext {
  /// Creates a context with no layered descendants
  pub fn new(root: BoxNode) -> Self {
    Self {
      root,
      negative_z: Vec::new(),
      blocks_and_cells: Vec::new(),
      floats: Vec::new(),
      zero_z: Vec::new(),
      positive_z: Vec::new(),
    }
  }
}

/// One laid-out page, ready to paint
#[derive(Debug, Clone)]
pub struct Page {
  /// The page box; its margin boxes are painted as part of the root
  /// context's tree
  pub page_box: BoxNode,
  /// Style of the element whose background propagated to the canvas
  /// (the root element, or `<body>` when the root background is none)
  pub canvas_background: Option<Style>,
  /// Root stacking context of the page's content
  pub root: StackingContext,
}
