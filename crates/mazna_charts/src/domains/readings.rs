//! Flattening entries into reading series and counting readings per band.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use mazna_client::Entry;
use serde::{Deserialize, Serialize};

use super::bands::{Band, ThresholdTable};
use crate::error::ChartResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 3] = [TimeOfDay::Morning, TimeOfDay::Afternoon, TimeOfDay::Evening];

    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }
}

/// Which triple of entry fields a series is built from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    #[default]
    Glucose,
    Insulin,
}

impl Measure {
    pub fn unit(self) -> &'static str {
        match self {
            Measure::Glucose => "mg/dL",
            Measure::Insulin => "units",
        }
    }

    /// Chart title, as offered in the chart picker.
    pub fn title(self) -> &'static str {
        match self {
            Measure::Glucose => "Blood Glucose Readings",
            Measure::Insulin => "Insulin Dosages",
        }
    }

    /// Morning, afternoon and evening values of `entry` for this measure.
    pub fn values(self, entry: &Entry) -> [Option<f64>; 3] {
        match self {
            Measure::Glucose => entry.glucose(),
            Measure::Insulin => entry.insulin(),
        }
    }
}

/// How absent readings enter a series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingPolicy {
    /// Chart an absent reading as 0. It then counts as Very Low.
    #[default]
    Zero,
    /// Leave absent readings out of the series and the breakdown.
    Omit,
}

impl MissingPolicy {
    pub fn apply(self, value: Option<f64>) -> Option<f64> {
        match (self, value) {
            (_, Some(v)) => Some(v),
            (MissingPolicy::Zero, None) => Some(0.0),
            (MissingPolicy::Omit, None) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Reading {
    pub date: NaiveDate,
    pub time_of_day: TimeOfDay,
    pub value: f64,
}

/// Flatten entries into readings: entry order first, then morning, afternoon, evening.
pub fn reading_series(entries: &[Entry], measure: Measure, policy: MissingPolicy) -> Vec<Reading> {
    let mut series = Vec::with_capacity(entries.len() * TimeOfDay::ALL.len());
    for entry in entries {
        for (time_of_day, value) in TimeOfDay::ALL.into_iter().zip(measure.values(entry)) {
            if let Some(value) = policy.apply(value) {
                series.push(Reading {
                    date: entry.date,
                    time_of_day,
                    value,
                });
            }
        }
    }
    series
}

/// Glucose series with absent readings charted as 0; always `3 * entries.len()` long.
pub fn to_reading_series(entries: &[Entry]) -> Vec<Reading> {
    reading_series(entries, Measure::Glucose, MissingPolicy::Zero)
}

/// Reading count per band; every band is present, zero when unused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BreakdownCount(BTreeMap<Band, u64>);

impl BreakdownCount {
    pub fn new() -> Self {
        Self(Band::ALL.into_iter().map(|band| (band, 0)).collect())
    }

    pub fn get(&self, band: Band) -> u64 {
        self.0.get(&band).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.0.values().sum()
    }

    /// Bands in ascending severity with their counts.
    pub fn iter(&self) -> impl Iterator<Item = (Band, u64)> + '_ {
        self.0.iter().map(|(band, count)| (*band, *count))
    }

    fn increment(&mut self, band: Band) {
        *self.0.entry(band).or_insert(0) += 1;
    }
}

impl Default for BreakdownCount {
    fn default() -> Self {
        Self::new()
    }
}

/// Classify each reading against `table` and count per band.
pub fn count_bands(readings: &[Reading], table: &ThresholdTable) -> ChartResult<BreakdownCount> {
    let mut counts = BreakdownCount::new();
    for reading in readings {
        counts.increment(table.classify(reading.value)?.band);
    }
    Ok(counts)
}

/// Glucose breakdown of `entries` under `table` and `policy`.
pub fn breakdown(
    entries: &[Entry],
    table: &ThresholdTable,
    policy: MissingPolicy,
) -> ChartResult<BreakdownCount> {
    count_bands(
        &reading_series(entries, Measure::Glucose, policy),
        table,
    )
}

/// Glucose breakdown under the standard table; sums to `3 * entries.len()`.
pub fn to_breakdown(entries: &[Entry]) -> ChartResult<BreakdownCount> {
    breakdown(entries, ThresholdTable::standard(), MissingPolicy::Zero)
}

/// One line-chart row per entry. Omitted readings stay `None` so the line breaks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineRow {
    pub date: NaiveDate,
    pub morning: Option<f64>,
    pub afternoon: Option<f64>,
    pub evening: Option<f64>,
}

pub fn to_line_rows(entries: &[Entry], measure: Measure, policy: MissingPolicy) -> Vec<LineRow> {
    entries
        .iter()
        .map(|entry| {
            let [morning, afternoon, evening] = measure.values(entry).map(|v| policy.apply(v));
            LineRow {
                date: entry.date,
                morning,
                afternoon,
                evening,
            }
        })
        .collect()
}
