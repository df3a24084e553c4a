// Chart requests as written on the command line

use crate::error::GridError;
use crate::grid::{PlotGrid, Position, DEFAULT_BINS};
use crate::ir::ChartStyle;
use crate::table::Table;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// One chart to draw, e.g. `hist:age:20`, `line:x:y@1,0`, `scatter:x:y`.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartRequest {
    pub kind: ChartKind,
    pub position: Option<Position>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartKind {
    Histogram { column: String, bins: usize },
    Line { x: String, y: String },
    Scatter { x: String, y: String },
}

impl ChartRequest {
    /// Draw this request into `grid`.
    pub fn apply(&self, grid: &mut PlotGrid, table: &Table, style: ChartStyle) -> Result<(), GridError> {
        match &self.kind {
            ChartKind::Histogram { column, bins } => {
                grid.add_histogram(table, column, *bins, self.position, style)
            }
            ChartKind::Line { x, y } => grid.add_line_plot(table, x, y, self.position, style),
            ChartKind::Scatter { x, y } => grid.add_scatter_plot(table, x, y, self.position, style),
        }
    }
}

impl FromStr for ChartRequest {
    type Err = anyhow::Error;

    fn from_str(input: &str) -> Result<Self> {
        let (body, position) = match input.rsplit_once('@') {
            Some((body, pos)) => (body, Some(parse_position(pos)?)),
            None => (input, None),
        };

        let parts: Vec<&str> = body.split(':').collect();
        let kind = match parts.as_slice() {
            ["hist", column] => ChartKind::Histogram {
                column: column.to_string(),
                bins: DEFAULT_BINS,
            },
            ["hist", column, bins] => ChartKind::Histogram {
                column: column.to_string(),
                bins: bins
                    .parse()
                    .map_err(|_| anyhow!("Invalid bin count '{}' in '{}'", bins, input))?,
            },
            ["line", x, y] => ChartKind::Line {
                x: x.to_string(),
                y: y.to_string(),
            },
            ["scatter", x, y] => ChartKind::Scatter {
                x: x.to_string(),
                y: y.to_string(),
            },
            _ => {
                return Err(anyhow!(
                    "Invalid chart '{}' (expected hist:<col>[:<bins>], line:<x>:<y> or scatter:<x>:<y>)",
                    input
                ))
            }
        };

        Ok(ChartRequest { kind, position })
    }
}

fn parse_position(input: &str) -> Result<Position> {
    let (row, col) = input
        .split_once(',')
        .ok_or_else(|| anyhow!("Invalid position '{}' (expected <row>,<col>)", input))?;
    let row = row
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid row '{}'", row))?;
    let col = col
        .trim()
        .parse()
        .map_err(|_| anyhow!("Invalid column '{}'", col))?;
    Ok((row, col))
}
