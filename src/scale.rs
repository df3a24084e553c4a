use crate::ir::ChartContent;
use std::ops::Range;

/// Axis ranges (x, y) for a cell's content.
///
/// Both ranges are finite with a finite, positive width.
pub fn chart_ranges(content: &ChartContent) -> (Range<f64>, Range<f64>) {
    let (x, y) = raw_ranges(content);
    (drawable(x), drawable(y))
}

fn raw_ranges(content: &ChartContent) -> (Range<f64>, Range<f64>) {
    match content {
        ChartContent::Empty => (0.0..1.0, 0.0..1.0),
        ChartContent::Histogram(hist) => {
            let (Some(&first), Some(&last)) = (hist.edges.first(), hist.edges.last()) else {
                return (0.0..1.0, 0.0..1.0);
            };
            let max_count = hist.counts.iter().copied().max().unwrap_or(0);
            // bars always start at zero
            let top = (max_count.max(1) as f64) * 1.05;
            (first..last, 0.0..top)
        }
        ChartContent::Line(points) | ChartContent::Scatter(points) => {
            let xs: Vec<f64> = points.iter().map(|p| p.0).collect();
            let ys: Vec<f64> = points.iter().map(|p| p.1).collect();
            (calculate_range(&xs), calculate_range(&ys))
        }
    }
}

/// Calculate range with padding for a dataset
pub fn calculate_range(data: &[f64]) -> Range<f64> {
    if data.is_empty() {
        return 0.0..1.0;
    }

    let min = data.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = data.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let (min, max) = pad_range(min, max);
    min..max
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    let padding = if min == max {
        1.0_f64.max(min.abs() * 1e-6)
    } else {
        // 5% of the span, halved first so it cannot overflow
        (max / 2.0 - min / 2.0) * 0.1
    };
    ((min - padding).max(f64::MIN), (max + padding).min(f64::MAX))
}

/// Plotters never returns from an axis with a NaN, infinite or empty span.
fn drawable(range: Range<f64>) -> Range<f64> {
    let span = range.end - range.start;
    if span.is_finite() && span > 0.0 {
        range
    } else {
        0.0..1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Histogram;

    #[test]
    fn test_range_continuous_is_padded() {
        let range = calculate_range(&[0.0, 10.0]);
        assert!(range.start < 0.0);
        assert!(range.end > 10.0);
    }

    #[test]
    fn test_range_single_point() {
        assert_eq!(calculate_range(&[5.0]), 4.0..6.0);
    }

    #[test]
    fn test_range_empty() {
        assert_eq!(calculate_range(&[]), 0.0..1.0);
        assert_eq!(chart_ranges(&ChartContent::Empty), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn test_histogram_ranges_start_at_zero() {
        let hist = Histogram::from_values(&[1.0, 2.0, 2.0, 3.0], 2).unwrap();
        let (x, y) = chart_ranges(&ChartContent::Histogram(hist));
        assert_eq!(x, 1.0..3.0);
        assert_eq!(y.start, 0.0);
        assert!(y.end > 3.0);
    }

    #[test]
    fn test_empty_histogram_ranges() {
        let hist = Histogram::from_values(&[], 4).unwrap();
        assert_eq!(chart_ranges(&ChartContent::Histogram(hist)), (0.0..1.0, 0.0..1.0));
    }

    #[test]
    fn test_huge_values_give_drawable_ranges() {
        let hist = Histogram::from_values(&[-1e308, 1e308], 4).unwrap();
        let (x, y) = chart_ranges(&ChartContent::Histogram(hist));
        assert!((x.end - x.start).is_finite() && x.end > x.start);
        assert_eq!(y.start, 0.0);

        let (x, y) = chart_ranges(&ChartContent::Scatter(vec![(-1e308, 1.0), (1e308, 2.0)]));
        assert_eq!(x, 0.0..1.0);
        assert!(y.start < 1.0 && y.end > 2.0);
    }

    #[test]
    fn test_padding_does_not_overflow() {
        let range = calculate_range(&[f64::MAX, f64::MAX / 2.0]);
        assert!(range.start.is_finite() && range.end.is_finite());
        assert_eq!(range.end, f64::MAX);
        let range = calculate_range(&[1e308]);
        assert!(range.start < 1e308 && range.end > 1e308);
    }

    #[test]
    fn test_scatter_ranges() {
        let (x, y) = chart_ranges(&ChartContent::Scatter(vec![(1.0, 10.0), (3.0, 10.0)]));
        assert!(x.start < 1.0 && x.end > 3.0);
        assert_eq!(y, 9.0..11.0);
    }
}
