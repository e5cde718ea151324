//! Severity bands for glucose readings and the threshold tables that assign them.
//!
//! A [`ThresholdTable`] is the single source of truth for band boundaries:
//! classification, chart shading zones and pie colours all read from it.

use std::fmt;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Severity classification of a glucose reading, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Band {
    VeryLow,
    Low,
    Normal,
    Borderline,
    High,
    VeryHigh,
}

impl Band {
    pub const ALL: [Band; 6] = [
        Band::VeryLow,
        Band::Low,
        Band::Normal,
        Band::Borderline,
        Band::High,
        Band::VeryHigh,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Band::VeryLow => "Very Low",
            Band::Low => "Low",
            Band::Normal => "Normal",
            Band::Borderline => "Borderline",
            Band::High => "High",
            Band::VeryHigh => "Very High",
        }
    }

    /// Display colour shared by annotations, shading zones and pie slices.
    pub fn color(self) -> Color {
        match self {
            Band::VeryLow => Color("#6A1B9A"),
            Band::Low => Color("#1565C0"),
            Band::Normal => Color("#2E7D32"),
            Band::Borderline => Color("#F9A825"),
            Band::High => Color("#EF6C00"),
            Band::VeryHigh => Color("#C62828"),
        }
    }

    /// Position in [`Band::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A `#RRGGBB` colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Color(&'static str);

impl Color {
    pub fn hex(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Result of classifying one reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Classification {
    pub band: Band,
    pub color: Color,
}

impl From<Band> for Classification {
    fn from(band: Band) -> Self {
        Self {
            band,
            color: band.color(),
        }
    }
}

/// Inclusive lower bound at which `band` starts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub lower: f64,
    pub band: Band,
}

impl Threshold {
    pub const fn new(lower: f64, band: Band) -> Self {
        Self { lower, band }
    }
}

/// Named, versioned, ordered list of `(lower bound, band)` pairs.
///
/// Bands cover `[lower, next lower)`; the last band is unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThresholdTable {
    name: String,
    version: u32,
    thresholds: Vec<Threshold>,
}

const STANDARD_THRESHOLDS: [Threshold; 6] = [
    Threshold::new(0.0, Band::VeryLow),
    Threshold::new(51.0, Band::Low),
    Threshold::new(80.0, Band::Normal),
    Threshold::new(131.0, Band::Borderline),
    Threshold::new(181.0, Band::High),
    Threshold::new(281.0, Band::VeryHigh),
];

const LEGACY_THRESHOLDS: [Threshold; 6] = [
    Threshold::new(0.0, Band::VeryLow),
    Threshold::new(51.0, Band::Low),
    Threshold::new(70.0, Band::Normal),
    Threshold::new(108.0, Band::Borderline),
    Threshold::new(180.0, Band::High),
    Threshold::new(280.0, Band::VeryHigh),
];

static STANDARD: LazyLock<ThresholdTable> = LazyLock::new(|| ThresholdTable {
    name: ThresholdTable::STANDARD_NAME.to_string(),
    version: ThresholdTable::STANDARD_VERSION,
    thresholds: STANDARD_THRESHOLDS.to_vec(),
});

static LEGACY: LazyLock<ThresholdTable> = LazyLock::new(|| ThresholdTable {
    name: ThresholdTable::LEGACY_NAME.to_string(),
    version: ThresholdTable::LEGACY_VERSION,
    thresholds: LEGACY_THRESHOLDS.to_vec(),
});

impl ThresholdTable {
    pub const STANDARD_NAME: &'static str = "mazna-standard";
    pub const STANDARD_VERSION: u32 = 3;
    pub const LEGACY_NAME: &'static str = "mazna-legacy";
    pub const LEGACY_VERSION: u32 = 1;

    /// Production table: 51 / 80 / 131 / 181 / 281 mg/dL.
    pub fn standard() -> &'static ThresholdTable {
        &STANDARD
    }

    /// Earlier table: 51 / 70 / 108 / 180 / 280 mg/dL. Kept so that readings
    /// annotated under it can be reproduced.
    pub fn legacy() -> &'static ThresholdTable {
        &LEGACY
    }

    /// Build a replacement table.
    ///
    /// The table must list every band exactly once in [`Band::ALL`] order,
    /// start at 0 and have finite, strictly increasing lower bounds, so that
    /// classification stays total over non-negative readings.
    pub fn new(
        name: impl Into<String>,
        version: u32,
        thresholds: Vec<Threshold>,
    ) -> ChartResult<Self> {
        if thresholds.len() != Band::ALL.len() {
            return Err(ChartError::InvalidThresholds(format!(
                "expected {} thresholds, got {}",
                Band::ALL.len(),
                thresholds.len()
            )));
        }
        for (threshold, expected) in thresholds.iter().zip(Band::ALL) {
            if threshold.band != expected {
                return Err(ChartError::InvalidThresholds(format!(
                    "expected {:?} at this position, got {:?}",
                    expected, threshold.band
                )));
            }
            if !threshold.lower.is_finite() {
                return Err(ChartError::InvalidThresholds(format!(
                    "lower bound for {:?} is not finite",
                    threshold.band
                )));
            }
        }
        if thresholds[0].lower != 0.0 {
            return Err(ChartError::InvalidThresholds(format!(
                "first lower bound must be 0, got {}",
                thresholds[0].lower
            )));
        }
        if let Some(pair) = thresholds.windows(2).find(|w| w[1].lower <= w[0].lower) {
            return Err(ChartError::InvalidThresholds(format!(
                "lower bound for {:?} ({}) must exceed {:?} ({})",
                pair[1].band, pair[1].lower, pair[0].band, pair[0].lower
            )));
        }
        Ok(Self {
            name: name.into(),
            version,
            thresholds,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn thresholds(&self) -> &[Threshold] {
        &self.thresholds
    }

    /// Half-open range `[lower, upper)` covered by `band`; `None` means unbounded.
    pub fn range(&self, band: Band) -> (f64, Option<f64>) {
        let i = band.index();
        let lower = self.thresholds[i].lower;
        let upper = self.thresholds.get(i + 1).map(|t| t.lower);
        (lower, upper)
    }

    pub fn classify(&self, value: f64) -> ChartResult<Classification> {
        if !value.is_finite() || value < 0.0 {
            return Err(ChartError::InvalidReading { value });
        }
        let band = self
            .thresholds
            .iter()
            .rev()
            .find(|t| value >= t.lower)
            .map(|t| t.band)
            .unwrap_or(Band::VeryLow);
        Ok(band.into())
    }
}

impl Default for ThresholdTable {
    fn default() -> Self {
        Self::standard().clone()
    }
}

/// Classify a reading against the standard table.
pub fn classify(value: f64) -> ChartResult<Classification> {
    ThresholdTable::standard().classify(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn band(value: f64) -> Band {
        classify(value).expect("valid reading").band
    }

    fn sweep(from: f64, to: f64) -> impl Iterator<Item = f64> {
        let steps = ((to - from) * 4.0) as usize;
        (0..steps).map(move |i| from + i as f64 * 0.25)
    }

    #[test]
    fn very_low_range_and_boundary() {
        assert!(sweep(0.0, 51.0).all(|v| band(v) == Band::VeryLow));
        assert_eq!(band(50.0), Band::VeryLow);
        assert_eq!(band(50.99), Band::VeryLow);
        assert_eq!(band(51.0), Band::Low);
    }

    #[test]
    fn normal_range_and_boundary() {
        assert!(sweep(80.0, 131.0).all(|v| band(v) == Band::Normal));
        assert_eq!(band(79.9), Band::Low);
        assert_eq!(band(130.0), Band::Normal);
        assert_eq!(band(131.0), Band::Borderline);
    }

    #[test]
    fn upper_bands() {
        assert_eq!(band(180.0), Band::Borderline);
        assert_eq!(band(181.0), Band::High);
        assert_eq!(band(280.0), Band::High);
        assert_eq!(band(281.0), Band::VeryHigh);
        assert_eq!(band(1.0e300), Band::VeryHigh);
        assert_eq!(band(f64::MAX), Band::VeryHigh);
    }

    #[test]
    fn every_non_negative_value_gets_one_deterministic_band() {
        for v in sweep(0.0, 400.0) {
            let first = classify(v).unwrap();
            let second = classify(v).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.color, first.band.color());
        }
    }

    #[test]
    fn typical_readings_classify() {
        assert_eq!(band(238.0), Band::High);
        assert_eq!(band(261.0), Band::High);
        assert_eq!(band(127.0), Band::Normal);
        assert_eq!(band(20.0), Band::VeryLow);
        assert_eq!(band(130.0), Band::Normal);
        assert_eq!(band(85.0), Band::Normal);
        assert_eq!(band(0.0), Band::VeryLow);
    }

    #[test]
    fn rejects_negative_and_non_finite() {
        for v in [-1.0, -0.001, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                classify(v),
                Err(ChartError::InvalidReading { .. })
            ));
        }
        assert_eq!(band(-0.0), Band::VeryLow);
    }

    #[test]
    fn colors_are_distinct() {
        let mut hexes: Vec<&str> = Band::ALL.iter().map(|b| b.color().hex()).collect();
        hexes.sort();
        hexes.dedup();
        assert_eq!(hexes.len(), Band::ALL.len());
    }

    #[test]
    fn legacy_table_uses_older_boundaries() {
        let legacy = ThresholdTable::legacy();
        let band = |v: f64| legacy.classify(v).unwrap().band;
        assert_eq!(band(60.0), Band::Low);
        assert_eq!(band(100.0), Band::Normal);
        assert_eq!(band(127.0), Band::Borderline);
        assert_eq!(band(180.0), Band::High);
        assert_eq!(band(238.0), Band::High);
        assert_eq!(band(280.0), Band::VeryHigh);
        assert_eq!(legacy.version(), ThresholdTable::LEGACY_VERSION);
    }

    #[test]
    fn replacement_table_reclassifies() {
        let table = ThresholdTable::new(
            "clinic-custom",
            1,
            vec![
                Threshold::new(0.0, Band::VeryLow),
                Threshold::new(70.0, Band::Low),
                Threshold::new(108.0, Band::Normal),
                Threshold::new(140.0, Band::Borderline),
                Threshold::new(180.0, Band::High),
                Threshold::new(280.0, Band::VeryHigh),
            ],
        )
        .expect("valid table");
        assert_eq!(table.classify(60.0).unwrap().band, Band::VeryLow);
        assert_eq!(table.classify(100.0).unwrap().band, Band::Low);
        assert_eq!(table.classify(280.0).unwrap().band, Band::VeryHigh);
        assert_eq!(band(60.0), Band::Low);
        assert_eq!(table.name(), "clinic-custom");
        assert_eq!(table.version(), 1);
    }

    #[test]
    fn invalid_tables_are_rejected() {
        let mut short = STANDARD_THRESHOLDS.to_vec();
        short.pop();
        assert!(ThresholdTable::new("short", 1, short).is_err());

        let mut swapped = STANDARD_THRESHOLDS.to_vec();
        swapped.swap(1, 2);
        assert!(ThresholdTable::new("swapped", 1, swapped).is_err());

        let mut offset = STANDARD_THRESHOLDS.to_vec();
        offset[0].lower = 10.0;
        assert!(ThresholdTable::new("offset", 1, offset).is_err());

        let mut flat = STANDARD_THRESHOLDS.to_vec();
        flat[3].lower = flat[2].lower;
        assert!(matches!(
            ThresholdTable::new("flat", 1, flat),
            Err(ChartError::InvalidThresholds(_))
        ));

        let mut infinite = STANDARD_THRESHOLDS.to_vec();
        infinite[5].lower = f64::INFINITY;
        assert!(ThresholdTable::new("infinite", 1, infinite).is_err());
    }

    #[test]
    fn range_reports_half_open_bounds() {
        let table = ThresholdTable::standard();
        assert_eq!(table.range(Band::VeryLow), (0.0, Some(51.0)));
        assert_eq!(table.range(Band::Normal), (80.0, Some(131.0)));
        assert_eq!(table.range(Band::VeryHigh), (281.0, None));
        assert_eq!(table.name(), ThresholdTable::STANDARD_NAME);
        assert_eq!(table.version(), 3);
    }
}
