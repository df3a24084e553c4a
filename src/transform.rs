use crate::error::GridError;
use crate::table::{Table, Value};

/// Equal-width histogram over a set of values.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` increasing bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Bin `values` into `bins` equal-width buckets spanning min..max.
    ///
    /// Buckets are half-open except the last, which also holds the maximum.
    /// Identical values span `value - 0.5 .. value + 0.5`. Non-finite values
    /// are ignored, and no values means no buckets at all.
    pub fn from_values(values: &[f64], bins: usize) -> Result<Self, GridError> {
        if bins == 0 {
            return Err(GridError::InvalidBins);
        }
        let values: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if values.is_empty() {
            return Ok(Histogram {
                edges: Vec::new(),
                counts: Vec::new(),
            });
        }

        let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let (lo, hi) = if min == max {
            let half = 0.5_f64.max(min.abs() * 1e-6);
            ((min - half).max(f64::MIN), (max + half).min(f64::MAX))
        } else {
            (min, max)
        };

        // divide before subtracting so spans near f64::MAX stay finite
        let n = bins as f64;
        let width = hi / n - lo / n;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| {
                let t = i as f64 / n;
                lo * (1.0 - t) + hi * t
            })
            .collect();

        let mut counts = vec![0usize; bins];
        for &v in &values {
            let offset = v - lo;
            let pos = if offset.is_finite() {
                offset / width
            } else {
                v / width - lo / width
            };
            let idx = (pos.floor() as usize).min(bins - 1);
            counts[idx] += 1;
        }

        Ok(Histogram { edges, counts })
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// (start, end, count) per bucket.
    pub fn buckets(&self) -> impl Iterator<Item = (f64, f64, usize)> + '_ {
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| (edge[0], edge[1], count))
    }
}

/// Numeric values of `column`, skipping rows with no value.
///
/// An unknown column yields no values. A present value that is not a number
/// is an error.
pub fn extract_present_numbers(table: &Table, column: &str) -> Result<Vec<f64>, GridError> {
    let idx = match table.column_index(column) {
        Some(idx) => idx,
        None => return Ok(Vec::new()),
    };

    let mut values = Vec::new();
    for (row_idx, row) in table.rows.iter().enumerate() {
        match &row[idx] {
            Value::Missing => continue,
            other => values.push(require_number(other, column, row_idx)?),
        }
    }
    Ok(values)
}

/// (x, y) pairs in input order. Every record must have both values.
pub fn extract_pairs(table: &Table, x_col: &str, y_col: &str) -> Result<Vec<(f64, f64)>, GridError> {
    let x_idx = table
        .column_index(x_col)
        .ok_or_else(|| GridError::missing_column(x_col, 1))?;
    let y_idx = table
        .column_index(y_col)
        .ok_or_else(|| GridError::missing_column(y_col, 1))?;

    let mut points = Vec::with_capacity(table.len());
    for (row_idx, row) in table.rows.iter().enumerate() {
        let x = row_number(&row[x_idx], x_col, row_idx)?;
        let y = row_number(&row[y_idx], y_col, row_idx)?;
        points.push((x, y));
    }
    Ok(points)
}

fn row_number(value: &Value, column: &str, row_idx: usize) -> Result<f64, GridError> {
    if value.is_missing() {
        return Err(GridError::missing_column(column, row_idx + 1));
    }
    require_number(value, column, row_idx)
}

fn require_number(value: &Value, column: &str, row_idx: usize) -> Result<f64, GridError> {
    value.as_f64().filter(|n| n.is_finite()).ok_or_else(|| GridError::NonNumeric {
        column: column.to_string(),
        row: row_idx + 1,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    fn make_table() -> Table {
        Table::new(
            vec!["x".to_string(), "y".to_string(), "label".to_string()],
            vec![
                vec![num(3.0), num(30.0), Value::Text("c".into())],
                vec![num(1.0), num(10.0), Value::Text("a".into())],
                vec![num(2.0), Value::Missing, Value::Text("b".into())],
            ],
        )
    }

    #[test]
    fn test_histogram_counts_and_edges() {
        let hist = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4).unwrap();
        assert_eq!(hist.edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        // the maximum lands in the last bucket
        assert_eq!(hist.counts, vec![1, 1, 1, 2]);
        assert_eq!(hist.total(), 5);
    }

    #[test]
    fn test_histogram_single_value() {
        let hist = Histogram::from_values(&[7.0, 7.0, 7.0], 2).unwrap();
        assert_eq!(hist.edges, vec![6.5, 7.0, 7.5]);
        assert_eq!(hist.total(), 3);
    }

    #[test]
    fn test_histogram_empty() {
        let hist = Histogram::from_values(&[], 10).unwrap();
        assert!(hist.is_empty());
        assert_eq!(hist.total(), 0);
        assert_eq!(hist.buckets().count(), 0);
    }

    #[test]
    fn test_histogram_zero_bins() {
        assert_eq!(Histogram::from_values(&[1.0], 0), Err(GridError::InvalidBins));
    }

    #[test]
    fn test_histogram_huge_span_stays_finite() {
        let hist = Histogram::from_values(&[-1e308, 1e308], 4).unwrap();
        assert_eq!(hist.counts, vec![1, 0, 0, 1]);
        assert_eq!(hist.edges.len(), 5);
        assert_eq!(hist.edges[0], -1e308);
        assert_eq!(hist.edges[2], 0.0);
        assert_eq!(hist.edges[4], 1e308);
        assert!(hist.edges.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_histogram_ignores_non_finite() {
        let hist = Histogram::from_values(&[1.0, f64::NAN, 2.0, f64::INFINITY], 2).unwrap();
        assert_eq!(hist.total(), 2);
        assert!(hist.edges.iter().all(|e| e.is_finite()));
    }

    #[test]
    fn test_histogram_single_huge_value() {
        let hist = Histogram::from_values(&[f64::MAX], 3).unwrap();
        assert_eq!(hist.total(), 1);
        assert!(hist.edges.iter().all(|e| e.is_finite()));
        assert!(hist.edges[0] < hist.edges[3]);
    }

    #[test]
    fn test_histogram_buckets() {
        let hist = Histogram::from_values(&[0.0, 10.0], 2).unwrap();
        let buckets: Vec<_> = hist.buckets().collect();
        assert_eq!(buckets, vec![(0.0, 5.0, 1), (5.0, 10.0, 1)]);
    }

    #[test]
    fn test_extract_present_numbers_skips_missing() {
        let values = extract_present_numbers(&make_table(), "y").unwrap();
        assert_eq!(values, vec![30.0, 10.0]);
    }

    #[test]
    fn test_extract_present_numbers_unknown_column() {
        assert!(extract_present_numbers(&make_table(), "nope").unwrap().is_empty());
    }

    #[test]
    fn test_extract_present_numbers_text_fails() {
        let err = extract_present_numbers(&make_table(), "label").unwrap_err();
        assert!(matches!(err, GridError::NonNumeric { row: 1, .. }));
    }

    #[test]
    fn test_extract_non_finite_number_fails() {
        let table = Table::new(vec!["v".to_string()], vec![vec![num(1.0)], vec![num(f64::INFINITY)]]);
        let err = extract_present_numbers(&table, "v").unwrap_err();
        assert!(matches!(err, GridError::NonNumeric { row: 2, .. }));
    }

    #[test]
    fn test_extract_pairs_keeps_input_order() {
        let mut table = make_table();
        table.rows[2][1] = num(20.0);
        let points = extract_pairs(&table, "x", "y").unwrap();
        assert_eq!(points, vec![(3.0, 30.0), (1.0, 10.0), (2.0, 20.0)]);
    }

    #[test]
    fn test_extract_pairs_missing_value() {
        let err = extract_pairs(&make_table(), "x", "y").unwrap_err();
        assert_eq!(err, GridError::missing_column("y", 3));
    }

    #[test]
    fn test_extract_pairs_unknown_column() {
        let err = extract_pairs(&make_table(), "x", "z").unwrap_err();
        assert!(matches!(err, GridError::MissingColumn { .. }));
    }
}
