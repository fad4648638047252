//! Projection of readings onto map markers.

use serde::{Deserialize, Serialize};

use crate::classify::{FillBand, fill_band};
use crate::model::{BinId, BinReading, GeoPoint};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
/// Errors raised while preparing map markers.
pub enum MapError {
    /// A reading carries no usable coordinate.
    #[error("missing coordinates for {bin_id}")]
    MissingCoordinates {
        /// Bin whose position is unusable.
        bin_id: BinId,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A bin marker ready to be plotted.
pub struct MapPoint {
    /// Bin shown by the marker.
    pub bin_id: BinId,
    /// Marker position.
    pub position: GeoPoint,
    /// Band used to color the marker.
    pub band: FillBand,
}

/// Convert readings into map markers.
///
/// # Errors
///
/// Returns [`MapError::MissingCoordinates`] for the first reading whose
/// latitude or longitude is not a finite number.
pub fn map_points(readings: &[BinReading]) -> Result<Vec<MapPoint>, MapError> {
    readings
        .iter()
        .map(|reading| {
            if !reading.latitude.is_finite() || !reading.longitude.is_finite() {
                return Err(MapError::MissingCoordinates {
                    bin_id: reading.bin_id.clone(),
                });
            }
            Ok(MapPoint {
                bin_id: reading.bin_id.clone(),
                position: reading.position(),
                band: fill_band(i64::from(reading.fill_percent)),
            })
        })
        .collect()
}

/// Smallest box around all points, widened by `padding` degrees on every side.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn bounds(points: &[GeoPoint], padding: f64) -> Option<(GeoPoint, GeoPoint)> {
    let first = points.first()?;
    let (min, max) = points.iter().fold((*first, *first), |(min, max), point| {
        (
            GeoPoint::new(
                min.latitude.min(point.latitude),
                min.longitude.min(point.longitude),
            ),
            GeoPoint::new(
                max.latitude.max(point.latitude),
                max.longitude.max(point.longitude),
            ),
        )
    });
    Some((
        GeoPoint::new(min.latitude - padding, min.longitude - padding),
        GeoPoint::new(max.latitude + padding, max.longitude + padding),
    ))
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn reading(label: &str, latitude: f64, longitude: f64) -> BinReading {
        BinReading {
            bin_id: BinId::from(label),
            fill_percent: 42,
            temperature_c: 24.0,
            humidity_percent: 55.0,
            last_emptied: Utc::now(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn markers_follow_readings() {
        let readings = [
            reading("Bin 1", -15.41, 28.28),
            reading("Bin 2", -15.42, 28.29),
        ];
        let points = map_points(&readings).expect("finite coordinates");

        assert_eq!(points.len(), 2);
        assert_eq!(points.first().map(|point| point.bin_id.0.as_str()), Some("Bin 1"));
        assert!(points.iter().all(|point| point.band == FillBand::Moderate));
    }

    #[test]
    fn non_finite_coordinate_is_reported() {
        let readings = [
            reading("Bin 1", -15.41, 28.28),
            reading("Bin 2", f64::NAN, 28.29),
        ];

        assert_eq!(
            map_points(&readings),
            Err(MapError::MissingCoordinates {
                bin_id: BinId::from("Bin 2"),
            })
        );
    }

    #[test]
    fn bounds_cover_all_points() {
        let points = [GeoPoint::new(-15.0, 28.0), GeoPoint::new(-16.0, 29.0)];
        let (min, max) = bounds(&points, 0.5).expect("non-empty");

        assert!((min.latitude + 16.5).abs() < 1e-9);
        assert!((min.longitude - 27.5).abs() < 1e-9);
        assert!((max.latitude + 14.5).abs() < 1e-9);
        assert!((max.longitude - 29.5).abs() < 1e-9);
        assert!(bounds(&[], 0.5).is_none());
    }
}
