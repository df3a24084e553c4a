//! A fixed grid of chart areas with a row-major cursor.
//!
//! Draw calls without an explicit position go to the cursor cell and then
//! move the cursor to the next cell, wrapping back to `(0, 0)` after the
//! last one. Draw calls with an explicit position never move the cursor.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::error::GridError;
use crate::graph::{self, GraphConfig};
use crate::ir::{ChartArea, ChartStyle};
use crate::table::Table;
use crate::transform::{self, Histogram};

/// Default histogram bucket count.
pub const DEFAULT_BINS: usize = 30;

/// `(row, col)` of a cell.
pub type Position = (usize, usize);

#[derive(Debug, Clone)]
pub struct PlotGrid {
    rows: usize,
    cols: usize,
    size: (u32, u32),
    /// Row-major, `rows * cols` long. Never resized.
    cells: Vec<ChartArea>,
    cursor: Position,
}

impl PlotGrid {
    /// Create a `rows x cols` grid rendered at `size` = (width, height) pixels.
    pub fn new(rows: usize, cols: usize, size: (u32, u32)) -> Result<Self, GridError> {
        if rows == 0 {
            return Err(GridError::InvalidDimension { what: "rows" });
        }
        if cols == 0 {
            return Err(GridError::InvalidDimension { what: "cols" });
        }
        if size.0 == 0 {
            return Err(GridError::InvalidDimension { what: "width" });
        }
        if size.1 == 0 {
            return Err(GridError::InvalidDimension { what: "height" });
        }

        Ok(PlotGrid {
            rows,
            cols,
            size,
            cells: vec![ChartArea::new(); rows * cols],
            cursor: (0, 0),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn cell(&self, position: Position) -> Option<&ChartArea> {
        self.index_of(position).ok().map(|idx| &self.cells[idx])
    }

    /// Cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, &ChartArea)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| ((idx / cols, idx % cols), cell))
    }

    /// Histogram of `column` with `bins` equal-width buckets.
    ///
    /// Rows without a value for `column` are left out. If nothing is left the
    /// cell still gets its title and labels, just no bars.
    pub fn add_histogram(
        &mut self,
        table: &Table,
        column: &str,
        bins: usize,
        position: Option<Position>,
        style: ChartStyle,
    ) -> Result<(), GridError> {
        let idx = self.resolve(position)?;
        let values = transform::extract_present_numbers(table, column)?;
        let histogram = Histogram::from_values(&values, bins)?;

        debug!(
            "Histogram of '{}' in cell {:?}: {} of {} rows, {} bins",
            column,
            self.position_of(idx),
            values.len(),
            table.len(),
            bins
        );
        self.cells[idx].draw_histogram(column, histogram, style);
        self.advance_if_implicit(position);
        Ok(())
    }

    /// Line through `(x, y)` in input order. Every row needs both values.
    pub fn add_line_plot(
        &mut self,
        table: &Table,
        x: &str,
        y: &str,
        position: Option<Position>,
        style: ChartStyle,
    ) -> Result<(), GridError> {
        let idx = self.resolve(position)?;
        let points = transform::extract_pairs(table, x, y)?;

        debug!("Line plot {} vs {} in cell {:?}: {} points", y, x, self.position_of(idx), points.len());
        self.cells[idx].draw_line(x, y, points, style);
        self.advance_if_implicit(position);
        Ok(())
    }

    /// Unconnected `(x, y)` points. Same rules as [`PlotGrid::add_line_plot`].
    pub fn add_scatter_plot(
        &mut self,
        table: &Table,
        x: &str,
        y: &str,
        position: Option<Position>,
        style: ChartStyle,
    ) -> Result<(), GridError> {
        let idx = self.resolve(position)?;
        let points = transform::extract_pairs(table, x, y)?;

        debug!("Scatter plot {} vs {} in cell {:?}: {} points", y, x, self.position_of(idx), points.len());
        self.cells[idx].draw_scatter(x, y, points, style);
        self.advance_if_implicit(position);
        Ok(())
    }

    /// Clear one cell (cursor untouched) or, with `None`, every cell and
    /// reset the cursor to `(0, 0)`.
    pub fn clear(&mut self, position: Option<Position>) -> Result<(), GridError> {
        match position {
            Some(pos) => {
                let idx = self.index_of(pos)?;
                self.cells[idx].clear();
            }
            None => {
                self.cells.iter_mut().for_each(ChartArea::clear);
                self.cursor = (0, 0);
            }
        }
        Ok(())
    }

    /// Compose every cell into one PNG image.
    pub fn render(&self) -> Result<Vec<u8>> {
        let config = GraphConfig {
            rows: self.rows,
            cols: self.cols,
            width: self.size.0,
            height: self.size.1,
        };
        graph::render_grid(&self.cells, &config)
    }

    /// Render and write the PNG to `path`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let png = self.render()?;
        std::fs::write(path, png).with_context(|| format!("Failed to write {}", path.display()))
    }

    fn resolve(&self, position: Option<Position>) -> Result<usize, GridError> {
        self.index_of(position.unwrap_or(self.cursor))
    }

    fn index_of(&self, (row, col): Position) -> Result<usize, GridError> {
        if row >= self.rows || col >= self.cols {
            return Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    fn position_of(&self, idx: usize) -> Position {
        (idx / self.cols, idx % self.cols)
    }

    fn advance_if_implicit(&mut self, position: Option<Position>) {
        if position.is_some() {
            return;
        }
        let next = (self.cursor.0 * self.cols + self.cursor.1 + 1) % (self.rows * self.cols);
        self.cursor = self.position_of(next);
    }
}
