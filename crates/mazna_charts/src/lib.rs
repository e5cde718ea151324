//! Chart data for MAZNA: glucose classification, reading series, per-band
//! breakdowns and the labels drawn around them.

use mazna_client::Entry;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

pub mod domains;
pub mod error;
pub mod fallback;
mod test_utils;

pub use domains::{
    Band, BreakdownCount, Classification, Color, LineRow, Measure, MissingPolicy, PieSlice,
    Reading, ShadeZone, Threshold, ThresholdTable, TimeOfDay, breakdown, classify, pie_slices,
    reading_series, shading_zones, to_breakdown, to_line_rows, to_reading_series,
};
pub use error::{ChartError, ChartResult};
pub use fallback::{Sourced, load_entries, placeholder_entries};

use domains::labels::{PLACEHOLDER_NOTICE, Tooltip, entry_tooltips};

/// Log filter from `MAZNA_LOG_LEVEL`, then `RUST_LOG`, then `info`.
///
/// Returns the raw setting alongside the filter; an unparsable setting yields an `info` filter.
pub fn log_filter(mut get: impl FnMut(&str) -> Option<String>) -> (String, EnvFilter) {
    let log_env = get("MAZNA_LOG_LEVEL")
        .or_else(|| get("RUST_LOG"))
        .unwrap_or_else(|| "info".to_string());
    let env_filter = EnvFilter::try_new(&log_env).unwrap_or_else(|_| EnvFilter::new("info"));
    (log_env, env_filter)
}

/// Line chart for one measure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineChart {
    pub title: &'static str,
    pub unit: &'static str,
    pub rows: Vec<LineRow>,
    pub tooltips: Vec<Tooltip>,
}

impl LineChart {
    fn build(
        entries: &[Entry],
        measure: Measure,
        table: &ThresholdTable,
        policy: MissingPolicy,
    ) -> ChartResult<Self> {
        Ok(Self {
            title: measure.title(),
            unit: measure.unit(),
            rows: to_line_rows(entries, measure, policy),
            tooltips: entry_tooltips(entries, measure, policy, table)?,
        })
    }
}

/// Everything the presentation layer needs to draw the charts page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPayload {
    pub is_placeholder: bool,
    /// Set only for placeholder data.
    pub notice: Option<&'static str>,
    pub thresholds: ThresholdTable,
    pub glucose: LineChart,
    pub insulin: LineChart,
    pub breakdown: Vec<PieSlice>,
    pub zones: Vec<ShadeZone>,
}

pub fn build_chart_payload(
    entries: &Sourced<Vec<Entry>>,
    table: &ThresholdTable,
    policy: MissingPolicy,
) -> ChartResult<ChartPayload> {
    let data = &entries.data;
    let counts = breakdown(data, table, policy)?;
    Ok(ChartPayload {
        is_placeholder: entries.is_placeholder,
        notice: entries.is_placeholder.then_some(PLACEHOLDER_NOTICE),
        thresholds: table.clone(),
        glucose: LineChart::build(data, Measure::Glucose, table, policy)?,
        insulin: LineChart::build(data, Measure::Insulin, table, policy)?,
        breakdown: pie_slices(&counts),
        zones: shading_zones(table),
    })
}
