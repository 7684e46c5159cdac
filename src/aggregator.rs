use crate::calibration::calibrate;
use crate::models::{DataQuality, DayBucket, DayStats, DaySummary, HourlySample, Recommendation, SurfSpot};
use crate::scoring;
use chrono::{DateTime, Utc};

// Substituted summary statistics when a day has no wind or temperature
// samples, and the fixed statistics for a day with no wave samples at all.
const DEFAULT_WIND_SPEED: f64 = 10.0;
const DEFAULT_TEMPERATURE: f64 = 20.0;
const DEFAULT_MAX_WAVE: f64 = 0.8;
const DEFAULT_AVG_WAVE: f64 = 0.6;
const DEFAULT_MIN_WAVE: f64 = 0.4;
const DEFAULT_MAX_WIND: f64 = 12.0;
const DEFAULT_SCORE: u32 = 50;

pub struct DayAggregator;

impl DayAggregator {
    /// Reduce one day's bucket to summary statistics, an hourly detail
    /// sequence and a daily recommendation. Wave heights are calibrated here,
    /// exactly once per sample.
    ///
    /// A bucket with no wave samples yields the fixed default summary; that
    /// is the designed degenerate-input behavior, not an error.
    pub fn summarize(bucket: &DayBucket, spot: &SurfSpot) -> DaySummary {
        if bucket.waves.is_empty() {
            return Self::default_summary();
        }

        let calibrated: Vec<f64> = bucket
            .waves
            .iter()
            .map(|&wave| calibrate(wave, spot.calibration))
            .collect();

        let max_wave = calibrated.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let min_wave = calibrated.iter().cloned().fold(f64::INFINITY, f64::min);
        let avg_wave = mean(&calibrated);

        let (max_wind, avg_wind) = if bucket.wind_speed.is_empty() {
            (DEFAULT_WIND_SPEED, DEFAULT_WIND_SPEED)
        } else {
            (
                bucket
                    .wind_speed
                    .iter()
                    .cloned()
                    .fold(f64::NEG_INFINITY, f64::max),
                mean(&bucket.wind_speed),
            )
        };

        let avg_temp = if bucket.temperature.is_empty() {
            DEFAULT_TEMPERATURE
        } else {
            mean(&bucket.temperature)
        };

        // The scorer sees the unrounded values; rounding is presentation only.
        let recommendation = scoring::daily_recommendation(max_wave, avg_wind, avg_temp);

        DaySummary {
            statistics: DayStats {
                max_wave_height: round2(max_wave),
                avg_wave_height: round2(avg_wave),
                min_wave_height: round2(min_wave),
                max_wind_speed: round1(max_wind),
                avg_wind_speed: round1(avg_wind),
                avg_temperature: round1(avg_temp),
            },
            hourly_data: Self::hourly_detail(bucket, &calibrated),
            recommendation,
            data_quality: DataQuality::Real,
        }
    }

    fn hourly_detail(bucket: &DayBucket, calibrated: &[f64]) -> Vec<HourlySample> {
        bucket
            .timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| HourlySample {
                time: hour_label(ts),
                wave_height: round2(calibrated[i]),
                swell1: round2(sample_or(&bucket.swell1, i, 0.0)),
                swell2: round2(sample_or(&bucket.swell2, i, 0.0)),
                wind_waves: round2(sample_or(&bucket.wind_waves, i, 0.0)),
                wind_speed: round1(sample_or(&bucket.wind_speed, i, 0.0)),
                wind_direction: sample_or(&bucket.wind_direction, i, 0.0).round() as i32,
                temperature: round1(sample_or(&bucket.temperature, i, DEFAULT_TEMPERATURE)),
            })
            .collect()
    }

    /// The exact summary substituted for a day with zero wave samples.
    pub fn default_summary() -> DaySummary {
        DaySummary {
            statistics: DayStats {
                max_wave_height: DEFAULT_MAX_WAVE,
                avg_wave_height: DEFAULT_AVG_WAVE,
                min_wave_height: DEFAULT_MIN_WAVE,
                max_wind_speed: DEFAULT_MAX_WIND,
                avg_wind_speed: DEFAULT_WIND_SPEED,
                avg_temperature: DEFAULT_TEMPERATURE,
            },
            hourly_data: Vec::new(),
            recommendation: Recommendation {
                score: DEFAULT_SCORE,
                suitability: "一般".to_string(),
                conditions: vec!["小浪".to_string(), "轻风".to_string()],
                summary: "一般的冲浪条件".to_string(),
            },
            data_quality: DataQuality::Fallback,
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_or(values: &[f64], index: usize, default: f64) -> f64 {
    values.get(index).copied().unwrap_or(default)
}

fn hour_label(timestamp_ms: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| "00:00".to_string())
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataQuality;

    fn spot(calibration: f64) -> SurfSpot {
        SurfSpot {
            id: 1,
            name: "东沙冲浪公园".to_string(),
            region: "zhoushan".to_string(),
            lat: 30.0444,
            lng: 122.1067,
            description: String::new(),
            calibration,
        }
    }

    fn bucket_with_waves(waves: Vec<f64>) -> DayBucket {
        DayBucket {
            timestamps: waves.iter().enumerate().map(|(i, _)| i as i64 * 3_600_000).collect(),
            swell1: vec![0.0; waves.len()],
            swell2: vec![0.0; waves.len()],
            wind_waves: vec![0.0; waves.len()],
            waves,
            ..DayBucket::default()
        }
    }

    #[test]
    fn test_empty_bucket_returns_fixed_default_summary() {
        let summary = DayAggregator::summarize(&DayBucket::default(), &spot(0.75));

        assert_eq!(summary.statistics.max_wave_height, 0.8);
        assert_eq!(summary.statistics.avg_wave_height, 0.6);
        assert_eq!(summary.statistics.min_wave_height, 0.4);
        assert_eq!(summary.statistics.max_wind_speed, 12.0);
        assert_eq!(summary.statistics.avg_wind_speed, 10.0);
        assert_eq!(summary.statistics.avg_temperature, 20.0);
        assert_eq!(summary.recommendation.score, 50);
        assert_eq!(summary.recommendation.suitability, "一般");
        assert!(summary.hourly_data.is_empty());
        assert_eq!(summary.data_quality, DataQuality::Fallback);
    }

    #[test]
    fn test_calibrated_statistics_worked_example() {
        // Raw waves [0.5, 1.0, 1.5] at calibration 0.75: combined factor
        // 0.75 * 0.3024 = 0.2268, so [0.1134, 0.2268, 0.3402].
        let summary = DayAggregator::summarize(&bucket_with_waves(vec![0.5, 1.0, 1.5]), &spot(0.75));

        assert_eq!(summary.statistics.max_wave_height, 0.34);
        assert_eq!(summary.statistics.min_wave_height, 0.11);
        assert_eq!(summary.statistics.avg_wave_height, 0.23);
        assert_eq!(summary.data_quality, DataQuality::Real);

        let heights: Vec<f64> = summary.hourly_data.iter().map(|h| h.wave_height).collect();
        assert_eq!(heights, vec![0.11, 0.23, 0.34]);
    }

    #[test]
    fn test_empty_wind_and_temperature_use_defaults() {
        let summary = DayAggregator::summarize(&bucket_with_waves(vec![1.0]), &spot(0.75));

        assert_eq!(summary.statistics.max_wind_speed, 10.0);
        assert_eq!(summary.statistics.avg_wind_speed, 10.0);
        assert_eq!(summary.statistics.avg_temperature, 20.0);

        // Hourly rows fall back per sample as well.
        let hour = &summary.hourly_data[0];
        assert_eq!(hour.wind_speed, 0.0);
        assert_eq!(hour.wind_direction, 0);
        assert_eq!(hour.temperature, 20.0);
    }

    #[test]
    fn test_hourly_detail_zips_all_series() {
        let mut bucket = bucket_with_waves(vec![1.0, 2.0]);
        bucket.swell1 = vec![0.42, 0.58];
        bucket.wind_speed = vec![9.71];
        bucket.wind_direction = vec![233.13];
        bucket.temperature = vec![24.96];

        let summary = DayAggregator::summarize(&bucket, &spot(1.0));

        let first = &summary.hourly_data[0];
        assert_eq!(first.time, "00:00");
        assert_eq!(first.swell1, 0.42);
        assert_eq!(first.wind_speed, 9.7);
        assert_eq!(first.wind_direction, 233);
        assert_eq!(first.temperature, 25.0);

        // Second row has no weather sample.
        let second = &summary.hourly_data[1];
        assert_eq!(second.time, "01:00");
        assert_eq!(second.wind_speed, 0.0);
        assert_eq!(second.temperature, 20.0);
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(round2(0.2268), 0.23);
        assert_eq!(round2(0.1134), 0.11);
        assert_eq!(round1(9.7192), 9.7);
    }
}
