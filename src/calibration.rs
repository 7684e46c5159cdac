//! Four-factor wave-height calibration.
//!
//! Open-ocean model output overestimates nearshore wave height; the
//! correction multiplies fixed environmental factors with the per-spot
//! calibration constant and floors the result.

const TERRAIN_FACTOR: f64 = 0.7;
const SEABED_FACTOR: f64 = 0.8;
const TIDAL_FACTOR: f64 = 0.9;
const ENERGY_FACTOR: f64 = 0.6;

/// Floor for calibrated heights, keeps degenerate inputs out of the stats.
const MIN_CALIBRATED_HEIGHT: f64 = 0.1;

/// Product of the fixed environmental factors and the spot constant.
pub fn combined_factor(spot_calibration: f64) -> f64 {
    TERRAIN_FACTOR * SEABED_FACTOR * TIDAL_FACTOR * ENERGY_FACTOR * spot_calibration
}

/// Calibrate a single raw wave-height sample. Must be applied exactly once
/// per sample, before any aggregation.
pub fn calibrate(raw_wave_height: f64, spot_calibration: f64) -> f64 {
    (raw_wave_height * combined_factor(spot_calibration)).max(MIN_CALIBRATED_HEIGHT)
}
