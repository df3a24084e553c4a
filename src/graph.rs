use anyhow::{Context, Result};
use image::ImageEncoder;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

use crate::ir::{ChartArea, ChartContent, ChartStyle, DEFAULT_LINE_WIDTH, DEFAULT_MARKER_SIZE, HISTOGRAM_ALPHA};
use crate::palette::{parse_color, ColorPalette};
use crate::scale::chart_ranges;

/// Canvas geometry for a grid render.
pub struct GraphConfig {
    pub rows: usize,
    pub cols: usize,
    pub width: u32,
    pub height: u32,
}

/// Draw `cells` (row-major) onto an evenly split canvas and encode it as PNG.
pub fn render_grid(cells: &[ChartArea], config: &GraphConfig) -> Result<Vec<u8>> {
    let mut buffer = vec![0u8; config.width as usize * config.height as usize * 3];

    {
        let root = BitMapBackend::with_buffer(&mut buffer, (config.width, config.height))
            .into_drawing_area();

        root.fill(&WHITE)
            .context("Failed to fill background")?;

        let panels = root.split_evenly((config.rows, config.cols));
        for (index, (panel, cell)) in panels.iter().zip(cells.iter()).enumerate() {
            draw_cell(panel, cell, index).with_context(|| {
                format!(
                    "Failed to draw cell ({}, {})",
                    index / config.cols,
                    index % config.cols
                )
            })?;
        }

        root.present().context("Failed to present drawing")?;
    }

    encode_png(&buffer, config.width, config.height)
}

fn draw_cell(area: &DrawingArea<BitMapBackend<'_>, Shift>, cell: &ChartArea, index: usize) -> Result<()> {
    let (x_range, y_range) = chart_ranges(&cell.content);
    let color = resolve_color(&cell.style, index);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(cell.title.as_deref().unwrap_or(""), ("sans-serif", 18))
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(x_range, y_range)
        .context("Failed to build chart")?;

    chart
        .configure_mesh()
        .x_desc(&cell.x_label)
        .y_desc(&cell.y_label)
        .draw()
        .context("Failed to draw mesh")?;

    match &cell.content {
        ChartContent::Empty => {}
        ChartContent::Histogram(hist) => {
            let fill = color.mix(cell.style.alpha_or(HISTOGRAM_ALPHA)).filled();
            chart
                .draw_series(
                    hist.buckets()
                        .filter(|&(_, _, count)| count > 0)
                        .map(|(start, end, count)| {
                            Rectangle::new([(start, 0.0), (end, count as f64)], fill)
                        }),
                )
                .context("Failed to draw histogram bars")?;
        }
        ChartContent::Line(points) => {
            let stroke = color
                .mix(cell.style.alpha_or(1.0))
                .stroke_width(cell.style.line_width.unwrap_or(DEFAULT_LINE_WIDTH));
            chart
                .draw_series(LineSeries::new(points.iter().copied(), stroke))
                .context("Failed to draw line series")?;
        }
        ChartContent::Scatter(points) => {
            let fill = color.mix(cell.style.alpha_or(1.0)).filled();
            let size = cell.style.marker_size.unwrap_or(DEFAULT_MARKER_SIZE);
            chart
                .draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), size, fill)))
                .context("Failed to draw points")?;
        }
    }

    Ok(())
}

/// Style colour, or the palette colour for this cell.
fn resolve_color(style: &ChartStyle, index: usize) -> RGBColor {
    let fallback = ColorPalette::category10().rgb(index);
    match &style.color {
        None => fallback,
        Some(name) => parse_color(name).unwrap_or_else(|| {
            warn!("Unknown colour '{}', using palette colour", name);
            fallback
        }),
    }
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let mut png_bytes = Vec::new();
    {
        let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
        encoder
            .write_image(buffer, width, height, image::ColorType::Rgb8)
            .context("Failed to encode PNG")?;
    }
    Ok(png_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_color_defaults_to_palette() {
        let style = ChartStyle::default();
        assert_eq!(resolve_color(&style, 1), ColorPalette::category10().rgb(1));
    }

    #[test]
    fn test_resolve_color_named_and_unknown() {
        let style = ChartStyle::default().with_color("#000000");
        assert_eq!(resolve_color(&style, 0), RGBColor(0, 0, 0));

        let style = ChartStyle::default().with_color("not-a-colour");
        assert_eq!(resolve_color(&style, 2), ColorPalette::category10().rgb(2));
    }

    #[test]
    fn test_encode_png_signature() {
        let buffer = vec![255u8; 4 * 3 * 3];
        let png = encode_png(&buffer, 4, 3).unwrap();
        assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    }
}
