//! Mapping from fill percentage to severity band and display color.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Width of each band in percentage points.
const BAND_WIDTH: i64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// Six ordered severity bands, from an empty bin to a full one.
pub enum FillBand {
    /// 0 to 19 percent.
    Empty,
    /// 20 to 39 percent.
    Low,
    /// 40 to 59 percent.
    Moderate,
    /// 60 to 79 percent.
    MidLevel,
    /// 80 to 99 percent.
    NearlyFull,
    /// 100 percent.
    Full,
}

impl FillBand {
    /// All bands in ascending order.
    pub const ALL: [FillBand; 6] = [
        FillBand::Empty,
        FillBand::Low,
        FillBand::Moderate,
        FillBand::MidLevel,
        FillBand::NearlyFull,
        FillBand::Full,
    ];

    /// Band for the given position in [`FillBand::ALL`], clamped to the last band.
    #[must_use]
    pub fn from_index(index: usize) -> Self {
        match index {
            0 => FillBand::Empty,
            1 => FillBand::Low,
            2 => FillBand::Moderate,
            3 => FillBand::MidLevel,
            4 => FillBand::NearlyFull,
            _ => FillBand::Full,
        }
    }

    /// Human readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            FillBand::Empty => "Empty",
            FillBand::Low => "Low",
            FillBand::Moderate => "Moderate",
            FillBand::MidLevel => "Mid-level",
            FillBand::NearlyFull => "Nearly Full",
            FillBand::Full => "Full",
        }
    }

    /// Named display color for the band.
    #[must_use]
    pub fn color(self) -> &'static str {
        match self {
            FillBand::Empty => "green",
            FillBand::Low => "lime",
            FillBand::Moderate => "yellowgreen",
            FillBand::MidLevel => "yellow",
            FillBand::NearlyFull => "orange",
            FillBand::Full => "red",
        }
    }
}

impl fmt::Display for FillBand {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Classify a fill percentage into its band and color.
///
/// Total over all integers: values below zero land in [`FillBand::Empty`],
/// values of 100 and above in [`FillBand::Full`].
#[must_use]
pub fn classify(fill_percent: i64) -> (FillBand, &'static str) {
    let band = fill_band(fill_percent);
    (band, band.color())
}

/// Band for a fill percentage, without the color.
#[must_use]
pub fn fill_band(fill_percent: i64) -> FillBand {
    let index = fill_percent.div_euclid(BAND_WIDTH).clamp(0, 5);
    usize::try_from(index).map_or(FillBand::Empty, FillBand::from_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries() {
        assert_eq!(classify(0), (FillBand::Empty, "green"));
        assert_eq!(classify(19), (FillBand::Empty, "green"));
        assert_eq!(classify(20), (FillBand::Low, "lime"));
        assert_eq!(classify(40), (FillBand::Moderate, "yellowgreen"));
        assert_eq!(classify(60), (FillBand::MidLevel, "yellow"));
        assert_eq!(classify(80), (FillBand::NearlyFull, "orange"));
        assert_eq!(classify(99), (FillBand::NearlyFull, "orange"));
        assert_eq!(classify(100), (FillBand::Full, "red"));
    }

    #[test]
    fn out_of_range_input_is_clamped() {
        assert_eq!(classify(-1), (FillBand::Empty, "green"));
        assert_eq!(classify(i64::MIN), (FillBand::Empty, "green"));
        assert_eq!(classify(101), (FillBand::Full, "red"));
        assert_eq!(classify(i64::MAX), (FillBand::Full, "red"));
    }

    #[test]
    fn bands_are_monotonic() {
        let mut previous = FillBand::Empty;
        for fill in 0..=100 {
            let band = fill_band(fill);
            assert!(band >= previous, "band went down at {fill}%");
            previous = band;
        }
    }

    #[test]
    fn from_index_follows_all() {
        for (position, band) in FillBand::ALL.iter().enumerate() {
            assert_eq!(FillBand::from_index(position), *band);
        }
        assert_eq!(FillBand::from_index(42), FillBand::Full);
    }

    #[test]
    fn display_uses_label() {
        assert_eq!(FillBand::MidLevel.to_string(), "Mid-level");
        assert_eq!(FillBand::NearlyFull.to_string(), "Nearly Full");
    }
}
