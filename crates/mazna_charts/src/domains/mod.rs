//! Domain modules for chart data preparation.
//!
//! Everything here is pure and synchronous; fetching lives in [`crate::fallback`].
//!
//! # Modules
//!
//! - [`bands`]: Severity bands, colours and threshold tables
//! - [`readings`]: Flattening entries into series and per-band counts
//! - [`zones`]: Shading zones and pie slices derived from a table
//! - [`labels`]: Tooltip, annotation and pie label text

pub mod bands;
pub mod labels;
pub mod readings;
pub mod zones;

pub use bands::{Band, Classification, Color, Threshold, ThresholdTable, classify};
pub use readings::{
    BreakdownCount, LineRow, Measure, MissingPolicy, Reading, TimeOfDay, breakdown, count_bands,
    reading_series, to_breakdown, to_line_rows, to_reading_series,
};
pub use zones::{PieSlice, ShadeZone, pie_slices, shading_zones};
