//! Deterministic synthetic data substituted when the upstream forecast is
//! unavailable for a spot. Always tagged `DataQuality::Fallback`, never mixed
//! with real samples within one spot's analysis.

use crate::aggregator::{round1, round2};
use crate::models::{DataQuality, DayStats, DaySummary, HourlySample, SurfSpot};
use crate::scoring::{self, ScoreInputs};
use std::f64::consts::PI;

/// Baseline (wave m, wind kt, water temp C) per spot.
#[derive(Debug, Clone, Copy)]
pub struct DemoBaseline {
    pub wave: f64,
    pub wind: f64,
    pub temp: f64,
}

/// Share of the baseline wave attributed to swell in the demo snapshot.
const DEMO_SWELL_SHARE: f64 = 0.7;
/// Floor for the synthetic hourly wave height.
const MIN_DEMO_WAVE: f64 = 0.2;
/// Amplitude of the diurnal wave-height variation.
const WAVE_VARIATION_AMPLITUDE: f64 = 0.2;

pub fn baseline(spot_id: u32) -> DemoBaseline {
    let (wave, wind, temp) = match spot_id {
        1 => (0.8, 12.0, 24.0),
        2 => (0.6, 10.0, 23.0),
        3 => (1.2, 15.0, 19.0),
        4 => (0.9, 13.0, 20.0),
        5 => (0.7, 11.0, 18.0),
        _ => (0.8, 12.0, 20.0),
    };
    DemoBaseline { wave, wind, temp }
}

/// 24 synthetic hourly samples: sinusoidal diurnal wave variation over the
/// baseline, a linear wind ramp and a mild diurnal temperature swing.
pub fn demo_hourly(base_wave: f64) -> Vec<HourlySample> {
    (0..24)
        .map(|i| {
            let phase = i as f64 * PI / 12.0;
            let wave = (base_wave + phase.sin() * WAVE_VARIATION_AMPLITUDE).max(MIN_DEMO_WAVE);

            HourlySample {
                time: format!("{:02}:00", i),
                wave_height: round1(wave),
                swell1: round1(wave * 0.4),
                swell2: round1(wave * 0.3),
                wind_waves: round1(wave * 0.3),
                wind_speed: round1(10.0 + i as f64 * 0.5),
                wind_direction: 180 + i * 5,
                temperature: round1(20.0 + phase.sin() * 3.0),
            }
        })
        .collect()
}

/// Full fallback day summary for one spot, derived from its baseline.
pub fn demo_summary(spot: &SurfSpot) -> DaySummary {
    let base = baseline(spot.id);
    let hourly = demo_hourly(base.wave);

    let waves: Vec<f64> = hourly.iter().map(|h| h.wave_height).collect();
    let winds: Vec<f64> = hourly.iter().map(|h| h.wind_speed).collect();
    let temps: Vec<f64> = hourly.iter().map(|h| h.temperature).collect();

    let max_wave = waves.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let min_wave = waves.iter().cloned().fold(f64::INFINITY, f64::min);
    let avg_wave = waves.iter().sum::<f64>() / waves.len() as f64;
    let max_wind = winds.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let avg_wind = winds.iter().sum::<f64>() / winds.len() as f64;
    let avg_temp = temps.iter().sum::<f64>() / temps.len() as f64;

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
        hourly_data: hourly,
        recommendation,
        data_quality: DataQuality::Fallback,
    }
}

/// Comparative-score snapshot for demo data, taken from the baseline rather
/// than the synthetic hourly sequence.
pub fn demo_score_inputs(spot_id: u32) -> ScoreInputs {
    let base = baseline(spot_id);
    ScoreInputs {
        swell_height: base.wave * DEMO_SWELL_SHARE,
        total_wave_height: base.wave,
        water_temperature: base.temp,
    }
}
