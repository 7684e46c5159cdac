use crate::models::{DayBucket, RawSeries};
use chrono::{DateTime, NaiveDate, Utc};
use std::collections::BTreeMap;
use tracing::warn;

// Response keys from the point-forecast API. Requesting the `windWaves`
// parameter yields the `wwaves_*` series.
pub const WAVES_KEY: &str = "waves_height-surface";
pub const SWELL1_KEY: &str = "swell1_height-surface";
pub const SWELL2_KEY: &str = "swell2_height-surface";
pub const WIND_WAVES_KEY: &str = "wwaves_height-surface";
pub const WIND_U_KEY: &str = "wind_u-surface";
pub const WIND_V_KEY: &str = "wind_v-surface";
pub const TEMP_KEY: &str = "temp-surface";

/// m/s to knots.
pub const MS_TO_KNOTS: f64 = 1.94384;
pub const KELVIN_OFFSET: f64 = 273.15;

/// Substituted when a wave-domain sample is absent from the payload.
const MISSING_WAVE: f64 = 0.0;
/// Substituted when a wind vector component is absent.
const MISSING_WIND_COMPONENT: f64 = 0.0;
/// Substituted when a temperature sample is absent (Kelvin).
const DEFAULT_KELVIN: f64 = 293.0;

pub struct DayGrouper;

impl DayGrouper {
    /// Partition a wave series and a weather series into per-UTC-day buckets.
    ///
    /// The wave series establishes the day keys; weather samples are merged
    /// into existing buckets only, and samples for days without wave data are
    /// dropped. Arrival order within a bucket is preserved.
    pub fn group(wave: &RawSeries, weather: &RawSeries) -> BTreeMap<NaiveDate, DayBucket> {
        let mut days: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

        for (i, &ts) in wave.timestamps.iter().enumerate() {
            let Some(date) = utc_day(ts) else {
                warn!("Skipping wave sample with out-of-range timestamp {}", ts);
                continue;
            };

            let bucket = days.entry(date).or_default();
            bucket.timestamps.push(ts);
            bucket.waves.push(wave.value_or(WAVES_KEY, i, MISSING_WAVE));
            bucket.swell1.push(wave.value_or(SWELL1_KEY, i, MISSING_WAVE));
            bucket.swell2.push(wave.value_or(SWELL2_KEY, i, MISSING_WAVE));
            bucket
                .wind_waves
                .push(wave.value_or(WIND_WAVES_KEY, i, MISSING_WAVE));
        }

        for (i, &ts) in weather.timestamps.iter().enumerate() {
            let Some(date) = utc_day(ts) else {
                continue;
            };

            // Weather samples only land in days the wave pass created.
            let Some(bucket) = days.get_mut(&date) else {
                continue;
            };

            let u = weather.value_or(WIND_U_KEY, i, MISSING_WIND_COMPONENT);
            let v = weather.value_or(WIND_V_KEY, i, MISSING_WIND_COMPONENT);

            bucket.wind_speed.push(wind_speed_knots(u, v));
            bucket.wind_direction.push(wind_direction_degrees(u, v));
            bucket
                .temperature
                .push(weather.value_or(TEMP_KEY, i, DEFAULT_KELVIN) - KELVIN_OFFSET);
        }

        days
    }
}

fn utc_day(timestamp_ms: i64) -> Option<NaiveDate> {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms).map(|dt| dt.date_naive())
}

/// Euclidean norm of the (u, v) wind vector, converted to knots.
pub fn wind_speed_knots(u: f64, v: f64) -> f64 {
    u.hypot(v) * MS_TO_KNOTS
}

/// Meteorological wind direction in degrees, 0-360.
pub fn wind_direction_degrees(u: f64, v: f64) -> f64 {
    (v.atan2(u).to_degrees() + 180.0).rem_euclid(360.0)
}
