use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A configured surf spot. Loaded once at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfSpot {
    pub id: u32,
    pub name: String,
    pub region: String,
    pub lat: f64,
    pub lng: f64,
    pub description: String,
    /// Per-spot multiplicative correction for nearshore attenuation,
    /// applied on top of the fixed environmental factors.
    pub calibration: f64,
}

/// Raw time series from one point-forecast request: epoch-millisecond
/// timestamps plus parallel parameter arrays aligned by index. Individual
/// arrays may be missing entirely, or hold nulls for single samples.
#[derive(Debug, Clone, Default)]
pub struct RawSeries {
    pub timestamps: Vec<i64>,
    pub params: HashMap<String, Vec<Option<f64>>>,
}

impl RawSeries {
    /// Sample value for `key` at `index`, or `default` when the array or the
    /// sample is absent.
    pub fn value_or(&self, key: &str, index: usize, default: f64) -> f64 {
        self.params
            .get(key)
            .and_then(|values| values.get(index).copied().flatten())
            .unwrap_or(default)
    }
}

/// One UTC calendar day of merged wave and weather samples.
///
/// The wave-domain arrays (waves, swell1, swell2, wind_waves) are equal
/// length and aligned with `timestamps`. The weather arrays may be shorter
/// when the weather series covers fewer samples of the day.
#[derive(Debug, Clone, Default)]
pub struct DayBucket {
    pub timestamps: Vec<i64>,
    pub waves: Vec<f64>,
    pub swell1: Vec<f64>,
    pub swell2: Vec<f64>,
    pub wind_waves: Vec<f64>,
    /// Knots.
    pub wind_speed: Vec<f64>,
    /// Degrees, 0-360.
    pub wind_direction: Vec<f64>,
    /// Celsius.
    pub temperature: Vec<f64>,
}

/// Whether a summary was derived from upstream data or substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataQuality {
    Real,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayStats {
    pub max_wave_height: f64,
    pub avg_wave_height: f64,
    pub min_wave_height: f64,
    pub max_wind_speed: f64,
    pub avg_wind_speed: f64,
    pub avg_temperature: f64,
}

/// One row of the hourly detail table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySample {
    /// "HH:MM", UTC.
    pub time: String,
    pub wave_height: f64,
    pub swell1: f64,
    pub swell2: f64,
    pub wind_waves: f64,
    pub wind_speed: f64,
    pub wind_direction: i32,
    pub temperature: f64,
}

/// Daily tier-score recommendation attached to a summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub score: u32,
    pub suitability: String,
    pub conditions: Vec<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySummary {
    pub statistics: DayStats,
    pub hourly_data: Vec<HourlySample>,
    pub recommendation: Recommendation,
    pub data_quality: DataQuality,
}

/// Comparative multi-factor score used for cross-spot ranking. The four
/// components are discrete tier scores; the total is their weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub swell: u32,
    pub wind_wave: u32,
    pub total_wave: u32,
    pub temperature: u32,
    pub total: f64,
}

/// Ranking label with its canned reason text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub level: &'static str,
    pub reason: &'static str,
}

/// Multi-day forecast for one spot, keyed by UTC date.
#[derive(Debug, Clone, Serialize)]
pub struct SpotForecast {
    pub spot_id: u32,
    pub spot_name: String,
    pub generated_at: DateTime<Utc>,
    pub days: BTreeMap<NaiveDate, DaySummary>,
}

/// Everything the renderer needs for one spot on one date. Ephemeral,
/// rebuilt on every analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct SpotAnalysis {
    pub spot: SurfSpot,
    pub date: NaiveDate,
    pub day: DaySummary,
    pub score: ScoreBreakdown,
    pub verdict: Verdict,
}
