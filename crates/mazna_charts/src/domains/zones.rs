//! Chart shading zones and pie slices, both derived from the threshold table.

use serde::Serialize;

use super::bands::{Band, Color, ThresholdTable};
use super::readings::BreakdownCount;

/// Background reference zone on the glucose line chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadeZone {
    pub band: Band,
    pub label: &'static str,
    pub lower: f64,
    /// Exclusive upper bound; `None` for the top band.
    pub upper: Option<f64>,
    pub color: Color,
}

pub fn shading_zones(table: &ThresholdTable) -> Vec<ShadeZone> {
    Band::ALL
        .into_iter()
        .map(|band| {
            let (lower, upper) = table.range(band);
            ShadeZone {
                band,
                label: band.label(),
                lower,
                upper,
                color: band.color(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub band: Band,
    pub label: &'static str,
    pub count: u64,
    /// Fraction of all readings, 0 when there are none.
    pub share: f64,
    pub color: Color,
}

pub fn pie_slices(breakdown: &BreakdownCount) -> Vec<PieSlice> {
    let total = breakdown.total();
    breakdown
        .iter()
        .map(|(band, count)| PieSlice {
            band,
            label: band.label(),
            count,
            share: if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            },
            color: band.color(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::readings::to_breakdown;
    use chrono::NaiveDate;
    use mazna_client::Entry;

    #[test]
    fn zones_share_bounds_and_colors_with_classifier() {
        let table = ThresholdTable::standard();
        let zones = shading_zones(table);
        assert_eq!(zones.len(), Band::ALL.len());
        for zone in &zones {
            let at_lower = table.classify(zone.lower).unwrap();
            assert_eq!(at_lower.band, zone.band);
            assert_eq!(at_lower.color, zone.color);
            if let Some(upper) = zone.upper {
                assert_ne!(table.classify(upper).unwrap().band, zone.band);
            }
        }
        assert_eq!(zones[0].lower, 0.0);
        assert_eq!(zones[5].upper, None);
    }

    #[test]
    fn zones_follow_a_replacement_table() {
        let zones = shading_zones(ThresholdTable::legacy());
        assert_eq!(zones[3].band, Band::Borderline);
        assert_eq!(zones[3].lower, 108.0);
        assert_eq!(zones[3].upper, Some(180.0));
    }

    #[test]
    fn zones_are_contiguous() {
        let zones = shading_zones(ThresholdTable::standard());
        for pair in zones.windows(2) {
            assert_eq!(pair[0].upper, Some(pair[1].lower));
        }
    }

    #[test]
    fn pie_slices_cover_every_band_with_shares() {
        let entries = vec![
            Entry::new(NaiveDate::from_ymd_opt(2009, 1, 7).unwrap()).with_glucose(
                Some(238.0),
                Some(261.0),
                Some(127.0),
            ),
        ];
        let slices = pie_slices(&to_breakdown(&entries).unwrap());
        assert_eq!(slices.len(), 6);
        let high = slices.iter().find(|s| s.band == Band::High).unwrap();
        assert_eq!(high.count, 2);
        assert!((high.share - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(high.color, Band::High.color());
        let total_share: f64 = slices.iter().map(|s| s.share).sum();
        assert!((total_share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pie_slices_of_empty_breakdown_have_zero_share() {
        let slices = pie_slices(&BreakdownCount::new());
        assert!(slices.iter().all(|s| s.count == 0 && s.share == 0.0));
    }
}
