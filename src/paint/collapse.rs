//! Collapsed table borders
//!
//! Conflict resolution between adjacent cells' borders happens upstream;
//! this module only consumes the resolved grid. Its job is geometric:
//! place each grid edge on the row/column boundaries, shorten segments at
//! shared corners so perpendicular borders do not double-paint, and paint
//! in ascending priority so higher-priority borders win at overlaps.

use super::border::{Segment, Side};
use super::Painter;
use crate::canvas::Canvas;
use crate::geometry::Point;
use crate::style::{BorderStyle, BoxArea, Rgba};
use crate::tree::{BoxContent, BoxNode, GridBorder, TableContent};

struct CollapsedSegment {
  score: u32,
  style: BorderStyle,
  width: f32,
  color: Rgba,
  side: Side,
  border_edge: Segment,
  padding_edge: Segment,
}

fn grid_border(grid: &[Vec<GridBorder>], y: isize, x: isize) -> Option<GridBorder> {
  if y < 0 || x < 0 {
    return None;
  }
  grid.get(y as usize)?.get(x as usize).copied()
}

/// Half the widest border among the given grid slots
///
/// Segments are shortened by this much at each end, which is what makes
/// T- and cross-junctions look mitered instead of overlapping.
fn half_max_width(grid: &[Vec<GridBorder>], slots: &[(isize, isize)]) -> f32 {
  slots
    .iter()
    .filter_map(|&(y, x)| grid_border(grid, y, x))
    .map(|border| border.width)
    .fold(0.0, f32::max)
    / 2.0
}

impl Painter<'_> {
  /// Paints every border of a table with `border-collapse: collapse`
  ///
  /// The table and its cells get no independent border painting; the grid
  /// is the single source of truth.
  pub fn draw_collapsed_borders(
    &self,
    canvas: &mut dyn Canvas,
    table: &TableContent,
  ) {
    let Some(grid) = &table.collapsed_border_grid else {
      return;
    };

    // Boundary positions: each row/column start plus one synthetic end
    let mut row_positions = Vec::new();
    let mut last_row_height = 0.0;
    for row_group in &table.row_groups {
      if let BoxContent::TableRowGroup(rows) = &row_group.content {
        for row in rows {
          let rect = row.box_rectangle(BoxArea::BorderBox);
          row_positions.push(rect.y());
          last_row_height = rect.height();
        }
      }
    }
    if row_positions.is_empty() || table.column_widths.is_empty() {
      return;
    }
    row_positions.push(row_positions[row_positions.len() - 1] + last_row_height);

    let mut column_positions = table.column_positions.clone();
    let last_width = table.column_widths[table.column_widths.len() - 1];
    column_positions.push(column_positions[column_positions.len() - 1] + last_width);

    let columns = table.column_widths.len();
    let rows = row_positions.len() - 1;
    let skipped = table.skipped_rows as isize;

    let mut segments = Vec::new();

    let add_vertical = |segments: &mut Vec<CollapsedSegment>, x: usize, y: usize| {
      let grid_y = y as isize + skipped;
      let Some(border) = grid_border(&grid.vertical, grid_y, x as isize) else {
        return;
      };
      if border.width == 0.0 || border.color.is_transparent() {
        return;
      }
      let x_slot = x as isize;
      let top_shorten = half_max_width(
        &grid.horizontal,
        &[(grid_y, x_slot - 1), (grid_y, x_slot)],
      );
      let bottom_shorten = half_max_width(
        &grid.horizontal,
        &[(grid_y + 1, x_slot - 1), (grid_y + 1, x_slot)],
      );
      let pos_x = column_positions[x];
      let y1 = row_positions[y] + top_shorten;
      let y2 = row_positions[y + 1] - bottom_shorten;
      let half = border.width / 2.0;
      segments.push(CollapsedSegment {
        score: border.score,
        style: border.style,
        width: border.width,
        color: border.color,
        side: Side::Left,
        border_edge: (Point::new(pos_x - half, y1), Point::new(pos_x - half, y2)),
        padding_edge: (Point::new(pos_x + half, y1), Point::new(pos_x + half, y2)),
      });
    };

    let add_horizontal = |segments: &mut Vec<CollapsedSegment>, x: usize, y: usize| {
      let grid_y = y as isize + skipped;
      let Some(border) = grid_border(&grid.horizontal, grid_y, x as isize) else {
        return;
      };
      if border.width == 0.0 || border.color.is_transparent() {
        return;
      }
      let x_slot = x as isize;
      let left_shorten = half_max_width(
        &grid.vertical,
        &[(grid_y - 1, x_slot), (grid_y, x_slot)],
      );
      let right_shorten = half_max_width(
        &grid.vertical,
        &[(grid_y - 1, x_slot + 1), (grid_y, x_slot + 1)],
      );
      let pos_y = row_positions[y];
      let x1 = column_positions[x] + left_shorten;
      let x2 = column_positions[x + 1] - right_shorten;
      let half = border.width / 2.0;
      segments.push(CollapsedSegment {
        score: border.score,
        style: border.style,
        width: border.width,
        color: border.color,
        side: Side::Top,
        border_edge: (Point::new(x1, pos_y - half), Point::new(x2, pos_y - half)),
        padding_edge: (Point::new(x1, pos_y + half), Point::new(x2, pos_y + half)),
      });
    };

    // Discovery order: the table's top edge left to right, then per row
    // its left edge, the verticals after each column, and the horizontals
    // below each column
    for x in 0..columns {
      add_horizontal(&mut segments, x, 0);
    }
    for y in 0..rows {
      add_vertical(&mut segments, 0, y);
      for x in 0..columns {
        add_vertical(&mut segments, x + 1, y);
        add_horizontal(&mut segments, x, y + 1);
      }
    }

    // Stable: ties keep discovery order, higher scores paint last and win
    segments.sort_by_key(|segment| segment.score);
    for segment in segments {
      self.draw_border_segment(
        canvas,
        segment.style,
        segment.width,
        segment.color,
        segment.side,
        segment.border_edge,
        segment.padding_edge,
      );
    }
  }

  /// Paints the table border and every cell border in the separate model
  pub(crate) fn draw_separate_borders(
    &self,
    canvas: &mut dyn Canvas,
    table_box: &BoxNode,
    table: &TableContent,
  ) {
    self.draw_border(canvas, table_box);
    for row_group in &table.row_groups {
      if let BoxContent::TableRowGroup(rows) = &row_group.content {
        for row in rows {
          if let BoxContent::TableRow(cells) = &row.content {
            for cell in cells {
              self.draw_border(canvas, cell);
            }
          }
        }
      }
    }
  }
}
