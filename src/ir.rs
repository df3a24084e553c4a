use crate::transform::Histogram;

/// Default bar opacity for histograms.
pub const HISTOGRAM_ALPHA: f64 = 0.75;
pub const DEFAULT_LINE_WIDTH: u32 = 2;
pub const DEFAULT_MARKER_SIZE: u32 = 3;

/// Fixed set of recognized style options for a chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartStyle {
    /// Colour name or `#rrggbb`; `None` uses the cell's palette colour.
    pub color: Option<String>,
    pub alpha: Option<f64>,
    pub line_width: Option<u32>,
    pub marker_size: Option<u32>,
}

impl ChartStyle {
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn with_line_width(mut self, width: u32) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn with_marker_size(mut self, size: u32) -> Self {
        self.marker_size = Some(size);
        self
    }

    /// Opacity clamped to 0..=1.
    pub fn alpha_or(&self, default: f64) -> f64 {
        self.alpha.unwrap_or(default).clamp(0.0, 1.0)
    }
}

/// What a cell currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartContent {
    Empty,
    Histogram(Histogram),
    Line(Vec<(f64, f64)>),
    Scatter(Vec<(f64, f64)>),
}

/// One drawable area of the grid.
///
/// Keeps a description of what has been drawn so the whole grid can be
/// rendered again at any time.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArea {
    pub title: Option<String>,
    pub x_label: String,
    pub y_label: String,
    pub content: ChartContent,
    pub style: ChartStyle,
}

impl ChartArea {
    pub fn new() -> Self {
        ChartArea {
            title: None,
            x_label: String::new(),
            y_label: String::new(),
            content: ChartContent::Empty,
            style: ChartStyle::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && matches!(self.content, ChartContent::Empty)
    }

    /// Drop everything drawn; the area itself stays.
    pub fn clear(&mut self) {
        *self = ChartArea::new();
    }

    pub fn draw_histogram(&mut self, column: &str, histogram: Histogram, style: ChartStyle) {
        self.title = Some(format!("Histogram: {}", column));
        self.x_label = column.to_string();
        self.y_label = "frequency".to_string();
        self.content = ChartContent::Histogram(histogram);
        self.style = style;
    }

    pub fn draw_line(&mut self, x: &str, y: &str, points: Vec<(f64, f64)>, style: ChartStyle) {
        self.title = Some(format!("Line plot: {} vs {}", y, x));
        self.set_xy_labels(x, y);
        self.content = ChartContent::Line(points);
        self.style = style;
    }

    pub fn draw_scatter(&mut self, x: &str, y: &str, points: Vec<(f64, f64)>, style: ChartStyle) {
        self.title = Some(format!("Scatter plot: {} vs {}", y, x));
        self.set_xy_labels(x, y);
        self.content = ChartContent::Scatter(points);
        self.style = style;
    }

    fn set_xy_labels(&mut self, x: &str, y: &str) {
        self.x_label = x.to_string();
        self.y_label = y.to_string();
    }
}

impl Default for ChartArea {
    fn default() -> Self {
        ChartArea::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_area_is_empty() {
        assert!(ChartArea::new().is_empty());
    }

    #[test]
    fn test_draw_line_sets_labels() {
        let mut area = ChartArea::new();
        area.draw_line("time", "temp", vec![(0.0, 1.0)], ChartStyle::default());
        assert_eq!(area.title.as_deref(), Some("Line plot: temp vs time"));
        assert_eq!(area.x_label, "time");
        assert_eq!(area.y_label, "temp");
        assert!(!area.is_empty());
    }

    #[test]
    fn test_empty_histogram_is_still_titled() {
        let mut area = ChartArea::new();
        let hist = Histogram::from_values(&[], 5).unwrap();
        area.draw_histogram("age", hist, ChartStyle::default());
        assert_eq!(area.title.as_deref(), Some("Histogram: age"));
        assert_eq!(area.y_label, "frequency");
        assert!(!area.is_empty());
    }

    #[test]
    fn test_clear_resets_area() {
        let mut area = ChartArea::new();
        area.draw_scatter("a", "b", vec![(1.0, 2.0)], ChartStyle::default().with_color("red"));
        area.clear();
        assert_eq!(area, ChartArea::new());
    }

    #[test]
    fn test_alpha_is_clamped() {
        assert_eq!(ChartStyle::default().with_alpha(3.0).alpha_or(0.5), 1.0);
        assert_eq!(ChartStyle::default().alpha_or(0.5), 0.5);
    }
}
