use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;

/// Values treated as missing when they appear as raw text fields.
const MISSING_MARKERS: &[&str] = &["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

/// A single cell of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Missing,
    Number(f64),
    Bool(bool),
    Text(String),
}

impl Value {
    /// Infer a value from a raw text field (CSV cells, query results).
    pub fn parse_field(raw: &str) -> Value {
        let trimmed = raw.trim();
        if MISSING_MARKERS.contains(&trimmed) {
            return Value::Missing;
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            // `inf`, `-Infinity` and `NAN` parse but cannot be charted
            if !n.is_finite() {
                return Value::Missing;
            }
            return Value::Number(n);
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Value::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Value::Bool(false);
        }
        Value::Text(raw.to_string())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Total order used for mode tie-breaking: numbers, then bools, then text.
    pub(crate) fn rank_cmp(&self, other: &Value) -> Ordering {
        fn kind(v: &Value) -> u8 {
            match v {
                Value::Number(_) => 0,
                Value::Bool(_) => 1,
                Value::Text(_) => 2,
                Value::Missing => 3,
            }
        }
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a.total_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            _ => kind(self).cmp(&kind(other)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Missing => write!(f, ""),
            Value::Number(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Rows of named fields. Every row is aligned with `headers`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table, padding short rows with `Missing`.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Missing);
                row
            })
            .collect();
        Table { headers, rows }
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.headers.len())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Look up a column by name. Exact matches win over case-insensitive ones.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|h| h == name)
            .or_else(|| self.headers.iter().position(|h| h.eq_ignore_ascii_case(name)))
    }

    /// Cell at (row, column name); `None` when the column does not exist.
    pub fn get(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    /// All values of a column in row order.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|r| &r[idx]).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table() -> Table {
        Table::new(
            vec!["name".to_string(), "Age".to_string()],
            vec![
                vec![Value::Text("ann".to_string()), Value::Number(31.0)],
                vec![Value::Text("bob".to_string())],
            ],
        )
    }

    #[test]
    fn test_parse_field_number() {
        assert_eq!(Value::parse_field("42"), Value::Number(42.0));
        assert_eq!(Value::parse_field("-1.5e3"), Value::Number(-1500.0));
    }

    #[test]
    fn test_parse_field_missing_markers() {
        for raw in ["", "NA", "NaN", "null", "None", "  "] {
            assert_eq!(Value::parse_field(raw), Value::Missing, "raw: {:?}", raw);
        }
    }

    #[test]
    fn test_parse_field_non_finite_is_missing() {
        for raw in ["inf", "-inf", "Infinity", "NAN"] {
            assert_eq!(Value::parse_field(raw), Value::Missing, "raw: {:?}", raw);
        }
        assert_eq!(Value::parse_field("1e308"), Value::Number(1e308));
    }

    #[test]
    fn test_parse_field_text_and_bool() {
        assert_eq!(Value::parse_field("True"), Value::Bool(true));
        assert_eq!(Value::parse_field("hello"), Value::Text("hello".to_string()));
    }

    #[test]
    fn test_new_pads_short_rows() {
        let table = make_table();
        assert_eq!(table.shape(), (2, 2));
        assert_eq!(table.rows[1][1], Value::Missing);
    }

    #[test]
    fn test_column_lookup_case_insensitive() {
        let table = make_table();
        assert_eq!(table.column_index("age"), Some(1));
        assert_eq!(table.get(0, "AGE"), Some(&Value::Number(31.0)));
        assert!(table.column("height").is_none());
    }

    #[test]
    fn test_rank_cmp_orders_kinds() {
        assert_eq!(Value::Number(5.0).rank_cmp(&Value::Text("a".into())), Ordering::Less);
        assert_eq!(Value::Number(1.0).rank_cmp(&Value::Number(2.0)), Ordering::Less);
        assert_eq!(Value::Text("b".into()).rank_cmp(&Value::Text("a".into())), Ordering::Greater);
    }
}
