use anyhow::{anyhow, Context, Result};
use clap::Parser;
use plotgrid::request::ChartRequest;
use plotgrid::{fill_missing, load_table, missing_report, ChartStyle, FillStrategy, PlotGrid, Source, Value};
use std::collections::HashMap;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "plotgrid")]
#[command(about = "Draw histograms, line and scatter plots from tabular data on a grid", long_about = None)]
struct Args {
    #[arg(help = "CSV file, JSON file or http(s) URL returning JSON")]
    source: String,

    #[arg(long = "rows", default_value = "1", help = "Number of grid rows")]
    rows: usize,

    #[arg(long = "cols", default_value = "1", help = "Number of grid columns")]
    cols: usize,

    #[arg(long = "width", default_value = "1200", help = "Output width in pixels")]
    width: u32,

    #[arg(long = "height", default_value = "800", help = "Output height in pixels")]
    height: u32,

    #[arg(
        short = 'c',
        long = "chart",
        help = "Chart to draw: hist:<col>[:<bins>], line:<x>:<y> or scatter:<x>:<y>, optionally @<row>,<col>"
    )]
    charts: Vec<ChartRequest>,

    #[arg(long = "color", help = "Colour name or #rrggbb for every chart")]
    color: Option<String>,

    #[arg(long = "alpha", help = "Opacity between 0 and 1")]
    alpha: Option<f64>,

    #[arg(long = "report", help = "Print the missing-value report to stderr")]
    report: bool,

    #[arg(long = "fill", help = "Fill missing values: mean, median, mode or constant")]
    fill: Option<FillStrategy>,

    #[arg(long = "fill-columns", value_delimiter = ',', help = "Columns to fill (default: all applicable)")]
    fill_columns: Vec<String>,

    #[arg(
        long = "fill-value",
        requires = "fill",
        help = "Constant for a column, as <col>=<value> (with --fill constant)"
    )]
    fill_values: Vec<String>,

    #[arg(long = "param", help = "Query parameter for API sources, as <key>=<value>")]
    params: Vec<String>,

    #[arg(short = 'o', long = "output", help = "Write the PNG here instead of stdout")]
    output: Option<PathBuf>,

    #[arg(long = "log-level", default_value = "warn", help = "Log level (RUST_LOG overrides)")]
    log_level: String,
}

/// Logs go to stderr so stdout stays free for the PNG.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    if args.charts.is_empty() && !args.report {
        anyhow::bail!("Nothing to do: pass at least one --chart or --report");
    }

    let source = match Source::infer(&args.source) {
        Source::Api { url, .. } => Source::Api {
            url,
            params: args
                .params
                .iter()
                .map(|p| parse_key_value(p))
                .collect::<Result<_>>()?,
        },
        other => other,
    };

    let mut table = load_table(&source)
        .with_context(|| format!("Failed to load table from {}", args.source))?;

    if args.report {
        let report = missing_report(&table);
        let json = serde_json::to_string_pretty(&report).context("Failed to format report")?;
        eprintln!("{}", json);
    }

    if let Some(strategy) = args.fill.clone() {
        let strategy = match strategy {
            FillStrategy::Constant(_) => {
                let mut values = HashMap::new();
                for entry in &args.fill_values {
                    let (column, raw) = parse_key_value(entry)?;
                    values.insert(column, Value::parse_field(&raw));
                }
                FillStrategy::Constant(values)
            }
            other => {
                if !args.fill_values.is_empty() {
                    warn!("Ignoring --fill-value: it only applies to --fill constant, not {}", other);
                }
                other
            }
        };
        let columns = (!args.fill_columns.is_empty()).then_some(args.fill_columns.as_slice());
        info!("Filling missing values with {}", strategy);
        table = fill_missing(&table, &strategy, columns);
    }

    if args.charts.is_empty() {
        return Ok(());
    }

    let mut grid = PlotGrid::new(args.rows, args.cols, (args.width, args.height))
        .context("Failed to create plot grid")?;

    let style = ChartStyle {
        color: args.color.clone(),
        alpha: args.alpha,
        ..Default::default()
    };

    for (idx, request) in args.charts.iter().enumerate() {
        request
            .apply(&mut grid, &table, style.clone())
            .with_context(|| format!("Failed to draw chart {}", idx + 1))?;
    }

    match &args.output {
        Some(path) => grid.save(path)?,
        None => {
            let png_bytes = grid.render().context("Failed to render grid")?;
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(&png_bytes)
                .context("Failed to write PNG to stdout")?;
            handle.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}

fn parse_key_value(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| anyhow!("Expected <key>=<value>, got '{}'", input))?;
    Ok((key.trim().to_string(), value.to_string()))
}
