//! Missing-value statistics and imputation.

use crate::table::{Table, Value};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// One line of the missing-value report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingEntry {
    pub column: String,
    pub count: usize,
    pub percent: f64,
}

/// How [`fill_missing`] chooses the replacement value.
#[derive(Debug, Clone, PartialEq)]
pub enum FillStrategy {
    Mean,
    Median,
    Mode,
    /// Per-column constants; columns not in the map get `0`.
    Constant(HashMap<String, Value>),
}

impl FillStrategy {
    fn name(&self) -> &'static str {
        match self {
            FillStrategy::Mean => "mean",
            FillStrategy::Median => "median",
            FillStrategy::Mode => "mode",
            FillStrategy::Constant(_) => "constant",
        }
    }

    fn needs_numeric(&self) -> bool {
        matches!(self, FillStrategy::Mean | FillStrategy::Median)
    }
}

impl fmt::Display for FillStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FillStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mean" => Ok(FillStrategy::Mean),
            "median" => Ok(FillStrategy::Median),
            "mode" => Ok(FillStrategy::Mode),
            "constant" => Ok(FillStrategy::Constant(HashMap::new())),
            other => Err(format!(
                "Unknown fill strategy '{}' (expected mean, median, mode or constant)",
                other
            )),
        }
    }
}

/// Number of missing cells in every column, in header order.
pub fn count_missing(table: &Table) -> Vec<(String, usize)> {
    table
        .headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let count = table.rows.iter().filter(|row| row[idx].is_missing()).count();
            (name.clone(), count)
        })
        .collect()
}

/// Columns with at least one missing value, most-missing first.
pub fn missing_report(table: &Table) -> Vec<MissingEntry> {
    let total = table.len();
    let mut report: Vec<MissingEntry> = count_missing(table)
        .into_iter()
        .filter(|(_, count)| *count > 0)
        .map(|(column, count)| MissingEntry {
            column,
            count,
            percent: count as f64 / total as f64 * 100.0,
        })
        .collect();
    // stable: ties keep header order
    report.sort_by(|a, b| b.count.cmp(&a.count));
    report
}

/// Return a copy of `table` with missing cells filled.
///
/// `columns = None` means every numeric column for mean/median and every
/// column for mode/constant. Columns that cannot be filled are skipped with
/// a warning.
pub fn fill_missing(table: &Table, strategy: &FillStrategy, columns: Option<&[String]>) -> Table {
    let mut filled = table.clone();

    let targets: Vec<String> = match columns {
        Some(cols) => cols.to_vec(),
        None if strategy.needs_numeric() => table
            .headers
            .iter()
            .filter(|h| is_numeric_column(table, h))
            .cloned()
            .collect(),
        None => table.headers.clone(),
    };

    for column in &targets {
        let idx = match table.column_index(column) {
            Some(idx) => idx,
            None => {
                warn!("Column '{}' not found, skipping", column);
                continue;
            }
        };

        let present: Vec<&Value> = table
            .rows
            .iter()
            .map(|row| &row[idx])
            .filter(|v| !v.is_missing())
            .collect();
        if present.len() == table.len() {
            continue;
        }

        let replacement = match strategy {
            FillStrategy::Mean | FillStrategy::Median => {
                let numbers: Option<Vec<f64>> = present.iter().map(|v| v.as_f64()).collect();
                match numbers {
                    Some(numbers) if !numbers.is_empty() => {
                        let stat = if matches!(strategy, FillStrategy::Mean) {
                            mean(&numbers)
                        } else {
                            median(numbers)
                        };
                        Value::Number(stat)
                    }
                    _ => {
                        warn!(
                            "Column '{}' is not numeric, {} fill skipped",
                            column, strategy
                        );
                        continue;
                    }
                }
            }
            FillStrategy::Mode => match mode(&present) {
                Some(value) => value,
                None => {
                    warn!("Could not compute a mode for '{}'", column);
                    continue;
                }
            },
            FillStrategy::Constant(values) => values
                .get(column)
                .cloned()
                .unwrap_or(Value::Number(0.0)),
        };

        debug!("Filling '{}' with {} value {}", column, strategy, replacement);
        for row in &mut filled.rows {
            if row[idx].is_missing() {
                row[idx] = replacement.clone();
            }
        }
    }

    filled
}

fn is_numeric_column(table: &Table, name: &str) -> bool {
    let values = match table.column(name) {
        Some(values) => values,
        None => return false,
    };
    let mut present = values.into_iter().filter(|v| !v.is_missing()).peekable();
    present.peek().is_some() && present.all(|v| v.as_f64().is_some())
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn median(mut values: Vec<f64>) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}

/// Most frequent value; ties go to the smallest.
fn mode(values: &[&Value]) -> Option<Value> {
    let mut counts: Vec<(&Value, usize)> = Vec::new();
    for value in values {
        match counts.iter_mut().find(|(seen, _)| seen == value) {
            Some((_, count)) => *count += 1,
            None => counts.push((value, 1)),
        }
    }
    counts
        .into_iter()
        .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.rank_cmp(a)))
        .map(|(value, _)| value.clone())
}
