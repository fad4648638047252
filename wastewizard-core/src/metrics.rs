//! Column averages and band assignment over a sample.

use crate::classify::{FillBand, classify};
use crate::model::{BinReading, Summary};

/// Average fill, temperature and humidity over the readings.
#[must_use]
pub fn summarize(readings: &[BinReading]) -> Summary {
    Summary {
        average_fill: mean(readings.iter().map(|reading| f64::from(reading.fill_percent))),
        average_temperature: mean(readings.iter().map(|reading| reading.temperature_c)),
        average_humidity: mean(readings.iter().map(|reading| reading.humidity_percent)),
    }
}

/// Pair every reading with its fill band and display color, keeping order.
pub fn classify_all(
    readings: &[BinReading],
) -> impl Iterator<Item = (&BinReading, FillBand, &'static str)> {
    readings.iter().map(|reading| {
        let (band, color) = classify(i64::from(reading.fill_percent));
        (reading, band, color)
    })
}

#[expect(
    clippy::cast_precision_loss,
    reason = "sample sizes are a handful of bins"
)]
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0_usize), |(sum, count), value| {
        (sum + value, count + 1)
    });
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::model::BinId;

    fn reading(fill_percent: u8, temperature_c: f64, humidity_percent: f64) -> BinReading {
        BinReading {
            bin_id: BinId::from("Bin"),
            fill_percent,
            temperature_c,
            humidity_percent,
            last_emptied: Utc::now(),
            latitude: -15.4167,
            longitude: 28.2833,
        }
    }

    #[test]
    fn empty_sample_has_no_averages() {
        assert_eq!(summarize(&[]), Summary::default());
    }

    #[test]
    fn averages_each_column() {
        let readings = [
            reading(10, 20.0, 30.0),
            reading(50, 25.0, 50.0),
            reading(90, 30.0, 70.0),
        ];
        let summary = summarize(&readings);

        assert_eq!(summary.average_fill, Some(50.0));
        assert_eq!(summary.average_temperature, Some(25.0));
        assert_eq!(summary.average_humidity, Some(50.0));
    }

    #[test]
    fn classify_all_keeps_order() {
        let readings = [reading(100, 21.0, 40.0), reading(5, 21.0, 40.0)];
        let classified: Vec<(FillBand, &str)> = classify_all(&readings)
            .map(|(_, band, color)| (band, color))
            .collect();

        assert_eq!(
            classified,
            vec![(FillBand::Full, "red"), (FillBand::Empty, "green")]
        );
    }
}
