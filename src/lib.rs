// Library exports for plotgrid

pub mod error;
pub mod graph;
pub mod grid;
pub mod ir;
pub mod loader;
pub mod missing;
pub mod palette;
pub mod request;
pub mod scale;
pub mod table;
pub mod transform;

pub use error::{GridError, LoadError};
pub use grid::{PlotGrid, Position, DEFAULT_BINS};
pub use ir::{ChartArea, ChartContent, ChartStyle};
pub use loader::{load_table, Source};
pub use missing::{count_missing, fill_missing, missing_report, FillStrategy, MissingEntry};
pub use table::{Table, Value};
