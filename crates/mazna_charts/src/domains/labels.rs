//! Text shown next to readings: tooltips, entry-form annotations and pie labels.

use chrono::NaiveDate;
use mazna_client::Entry;
use serde::Serialize;

use super::bands::{Band, Color, ThresholdTable};
use super::readings::{Measure, MissingPolicy, Reading, TimeOfDay};
use super::zones::PieSlice;
use crate::error::ChartResult;

pub const PLACEHOLDER_NOTICE: &str =
    "No data yet. Showing sample readings until your first entry is saved.";

/// Rounded to one decimal; values that round to a whole number print bare.
pub fn format_value(value: f64, measure: Measure) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0} {}", measure.unit())
    } else {
        format!("{rounded:.1} {}", measure.unit())
    }
}

/// `Morning: 238 mg/dL (High)` for glucose, `Morning: 4 units` for insulin.
pub fn tooltip_line(
    reading: &Reading,
    measure: Measure,
    table: &ThresholdTable,
) -> ChartResult<String> {
    let value = format_value(reading.value, measure);
    let line = match measure {
        Measure::Glucose => {
            let band = table.classify(reading.value)?.band;
            format!("{}: {value} ({band})", reading.time_of_day.label())
        }
        Measure::Insulin => format!("{}: {value}", reading.time_of_day.label()),
    };
    Ok(line)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub date: NaiveDate,
    pub text: String,
}

/// One tooltip per entry: the date, then a line per charted reading.
pub fn entry_tooltips(
    entries: &[Entry],
    measure: Measure,
    policy: MissingPolicy,
    table: &ThresholdTable,
) -> ChartResult<Vec<Tooltip>> {
    entries
        .iter()
        .map(|entry| {
            let mut text = entry.date.format("%Y-%m-%d").to_string();
            for (time_of_day, value) in TimeOfDay::ALL.into_iter().zip(measure.values(entry)) {
                let Some(value) = policy.apply(value) else {
                    continue;
                };
                let reading = Reading {
                    date: entry.date,
                    time_of_day,
                    value,
                };
                text.push('\n');
                text.push_str(&tooltip_line(&reading, measure, table)?);
            }
            Ok(Tooltip {
                date: entry.date,
                text,
            })
        })
        .collect()
}

/// Inline message beside one glucose field of the entry form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub time_of_day: TimeOfDay,
    pub text: String,
    pub band: Option<Band>,
    pub color: Option<Color>,
}

pub fn annotate(
    time_of_day: TimeOfDay,
    value: Option<f64>,
    table: &ThresholdTable,
) -> ChartResult<Annotation> {
    let Some(value) = value else {
        return Ok(Annotation {
            time_of_day,
            text: format!("BG {}: No messages to display.", time_of_day.label()),
            band: None,
            color: None,
        });
    };
    let classification = table.classify(value)?;
    Ok(Annotation {
        time_of_day,
        text: format!(
            "BG {}: {} ({})",
            time_of_day.label(),
            format_value(value, Measure::Glucose),
            classification.band
        ),
        band: Some(classification.band),
        color: Some(classification.color),
    })
}

/// Annotations for the morning, afternoon and evening glucose of `entry`.
pub fn annotate_entry(entry: &Entry, table: &ThresholdTable) -> ChartResult<Vec<Annotation>> {
    TimeOfDay::ALL
        .into_iter()
        .zip(entry.glucose())
        .map(|(time_of_day, value)| annotate(time_of_day, value, table))
        .collect()
}

/// `High: 2 (33.3%)`
pub fn pie_label(slice: &PieSlice) -> String {
    format!("{}: {} ({:.1}%)", slice.label, slice.count, slice.share * 100.0)
}
