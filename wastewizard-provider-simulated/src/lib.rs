//! Telemetry source that simulates smart bins with random readings.
//!
//! Every sample is a fresh, independent draw. Nothing is remembered between
//! calls apart from the random number generator itself.

use std::ops::{Range, RangeInclusive};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use wastewizard_core::{
    model::{BinId, BinReading, DeploymentId, DeploymentMeta, GeoPoint},
    plugin::DeploymentPlugin,
    ports::{PortError, TelemetrySource},
};

/// Reference coordinate of the pilot deployment (Lusaka).
pub const LUSAKA: GeoPoint = GeoPoint::new(-15.4167, 28.2833);

#[derive(Debug, Clone, PartialEq)]
/// Value ranges the simulated readings are drawn from.
pub struct SimulationProfile {
    /// Fill level in percent.
    pub fill_percent: RangeInclusive<u8>,
    /// Temperature in degrees Celsius.
    pub temperature_c: Range<f64>,
    /// Relative humidity in percent.
    pub humidity_percent: Range<f64>,
    /// Whole hours elapsed since the bin was last emptied.
    pub hours_since_emptied: RangeInclusive<i64>,
    /// Coordinate the bins are scattered around.
    pub base: GeoPoint,
    /// Maximum offset in degrees applied to latitude and longitude.
    ///
    /// The sign is ignored; a non-finite value disables the offset.
    pub jitter: f64,
}

impl Default for SimulationProfile {
    fn default() -> Self {
        Self {
            fill_percent: 0..=100,
            temperature_c: 20.0..30.0,
            humidity_percent: 30.0..70.0,
            hours_since_emptied: 1..=48,
            base: LUSAKA,
            jitter: 0.01,
        }
    }
}

impl SimulationProfile {
    /// Default ranges scattered around a different base coordinate.
    #[must_use]
    pub fn around(base: GeoPoint) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }

    /// Usable jitter: the magnitude of `jitter`, or zero when it is not finite.
    #[must_use]
    pub fn jitter_bound(&self) -> f64 {
        if self.jitter.is_finite() {
            self.jitter.abs()
        } else {
            0.0
        }
    }
}

/// Uniform offset in `[-bound, bound]`.
fn coordinate_offset<R: Rng>(rng: &mut R, bound: f64) -> f64 {
    if bound > 0.0 {
        rng.random_range(-bound..=bound)
    } else {
        0.0
    }
}

/// Draw one reading per bin, in order, using `rng` and the clock value `now`.
///
/// # Panics
///
/// Panics if one of the profile's value ranges is empty. The jitter never
/// panics: see [`SimulationProfile::jitter_bound`].
pub fn sample_with<R: Rng>(
    rng: &mut R,
    profile: &SimulationProfile,
    bin_ids: &[BinId],
    now: DateTime<Utc>,
) -> Vec<BinReading> {
    let jitter = profile.jitter_bound();
    bin_ids
        .iter()
        .map(|bin_id| {
            let hours = rng.random_range(profile.hours_since_emptied.clone());
            BinReading {
                bin_id: bin_id.clone(),
                fill_percent: rng.random_range(profile.fill_percent.clone()),
                temperature_c: rng.random_range(profile.temperature_c.clone()),
                humidity_percent: rng.random_range(profile.humidity_percent.clone()),
                last_emptied: now - Duration::hours(hours),
                latitude: profile.base.latitude + coordinate_offset(rng, jitter),
                longitude: profile.base.longitude + coordinate_offset(rng, jitter),
            }
        })
        .collect()
}

/// Draw one sample with the thread-local generator and the current time.
#[must_use]
pub fn sample(bin_ids: &[BinId]) -> Vec<BinReading> {
    sample_with(
        &mut rand::rng(),
        &SimulationProfile::default(),
        bin_ids,
        Utc::now(),
    )
}

/// Simulated telemetry source for one deployment.
pub struct SimulatedSource {
    meta: DeploymentMeta,
    profile: SimulationProfile,
    rng: Mutex<StdRng>,
}

impl SimulatedSource {
    /// Create a source seeded from operating system entropy.
    #[must_use]
    pub fn new(meta: DeploymentMeta, profile: SimulationProfile) -> Self {
        Self::with_rng(meta, profile, StdRng::from_os_rng())
    }

    /// Create a source whose readings are reproducible for a given seed.
    #[must_use]
    pub fn seeded(meta: DeploymentMeta, profile: SimulationProfile, seed: u64) -> Self {
        Self::with_rng(meta, profile, StdRng::seed_from_u64(seed))
    }

    fn with_rng(meta: DeploymentMeta, profile: SimulationProfile, rng: StdRng) -> Self {
        Self {
            meta,
            profile,
            rng: Mutex::new(rng),
        }
    }
}

#[async_trait]
impl TelemetrySource for SimulatedSource {
    fn deployment(&self) -> &DeploymentMeta {
        &self.meta
    }

    async fn sample(&self, bin_ids: &[BinId]) -> Result<Vec<BinReading>, PortError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|err| PortError::Internal(format!("random generator unavailable: {err}")))?;
        let readings = sample_with(&mut *rng, &self.profile, bin_ids, Utc::now());
        debug!(
            "simulated {} readings for {}",
            readings.len(),
            self.meta.id
        );
        Ok(readings)
    }
}

/// Built-in deployments: the two pilot sites and their bins.
#[must_use]
pub fn deployments() -> Vec<DeploymentMeta> {
    vec![
        DeploymentMeta {
            id: DeploymentId(String::from("wizard")),
            name: String::from("WasteWizard Pilot"),
            base: LUSAKA,
            bins: bin_ids("Wizard", 3),
        },
        DeploymentMeta {
            id: DeploymentId(String::from("classic")),
            name: String::from("Classic Bins"),
            base: LUSAKA,
            bins: bin_ids("Bin", 3),
        },
    ]
}

/// Collection vehicle route driven from the base coordinate.
#[must_use]
pub fn vehicle_route(base: GeoPoint) -> Vec<GeoPoint> {
    [(0.0, 0.0), (-0.0003, 0.0007), (-0.0013, 0.0017), (-0.0023, 0.0027)]
        .into_iter()
        .map(|(d_lat, d_lon)| GeoPoint::new(base.latitude + d_lat, base.longitude + d_lon))
        .collect()
}

/// Build the plugin bundles for every built-in deployment.
///
/// With a seed, each deployment gets its own reproducible stream.
#[must_use]
pub fn plugins(seed: Option<u64>) -> Vec<DeploymentPlugin> {
    deployments()
        .into_iter()
        .zip(0_u64..)
        .map(|(meta, offset)| {
            let profile = SimulationProfile::around(meta.base);
            let route = vehicle_route(meta.base);
            let source = match seed {
                Some(seed) => {
                    SimulatedSource::seeded(meta.clone(), profile, seed.wrapping_add(offset))
                }
                None => SimulatedSource::new(meta.clone(), profile),
            };
            DeploymentPlugin {
                meta,
                source: Arc::new(source),
                route,
            }
        })
        .collect()
}

fn bin_ids(prefix: &str, count: usize) -> Vec<BinId> {
    (1..=count)
        .map(|number| BinId(format!("{prefix} {number}")))
        .collect()
}
