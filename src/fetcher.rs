use crate::error::{AppError, Result};
use crate::models::RawSeries;
use reqwest::Client;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

pub const WAVE_MODEL: &str = "gfsWave";
pub const WEATHER_MODEL: &str = "gfs";

const WAVE_PARAMETERS: &[&str] = &["waves", "swell1", "swell2", "windWaves"];
const WEATHER_PARAMETERS: &[&str] = &["wind", "temp"];
const SURFACE_LEVELS: &[&str] = &["surface"];

/// Client for the point-forecast API. One spot forecast is exactly two
/// logical requests: the wave model and the weather model. Failures are not
/// retried; the caller substitutes demo data instead.
pub struct ForecastFetcher {
    client: Client,
    api_url: String,
    api_key: String,
}

#[derive(Serialize)]
struct PointForecastRequest<'a> {
    lat: f64,
    lon: f64,
    model: &'a str,
    parameters: &'a [&'a str],
    levels: &'a [&'a str],
    key: &'a str,
}

impl ForecastFetcher {
    pub fn new(api_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent("surfcast/0.1.0")
            .timeout(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Wave-model series (waves, swell1, swell2, windWaves) for a coordinate.
    pub async fn fetch_wave_series(&self, lat: f64, lon: f64) -> Result<RawSeries> {
        self.fetch_series(lat, lon, WAVE_MODEL, WAVE_PARAMETERS).await
    }

    /// Weather-model series (wind vector, temperature) for a coordinate.
    pub async fn fetch_weather_series(&self, lat: f64, lon: f64) -> Result<RawSeries> {
        self.fetch_series(lat, lon, WEATHER_MODEL, WEATHER_PARAMETERS)
            .await
    }

    async fn fetch_series(
        &self,
        lat: f64,
        lon: f64,
        model: &str,
        parameters: &[&str],
    ) -> Result<RawSeries> {
        debug!("Fetching {} series for ({}, {})", model, lat, lon);

        let request = PointForecastRequest {
            lat,
            lon,
            model,
            parameters,
            levels: SURFACE_LEVELS,
            key: &self.api_key,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    AppError::Environment(format!("forecast endpoint unreachable: {}", e))
                } else {
                    AppError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Upstream(format!(
                "{} request for ({}, {}) failed with status {}",
                model, lat, lon, status
            )));
        }

        let body = response.text().await?;
        let json: serde_json::Value = serde_json::from_str(&body).map_err(|e| {
            AppError::Upstream(format!("unparseable {} response body: {}", model, e))
        })?;

        decode_point_forecast(&json)
    }
}

/// Decode a point-forecast response body into a `RawSeries`.
///
/// The `ts` field is required; every other array-valued key is kept as a
/// parameter series with per-sample nulls preserved as `None`. Non-array
/// keys (e.g. `units`) are metadata and are skipped.
pub fn decode_point_forecast(body: &serde_json::Value) -> Result<RawSeries> {
    let ts = body
        .get("ts")
        .and_then(|value| value.as_array())
        .ok_or_else(|| AppError::Upstream("response is missing the `ts` timestamp array".to_string()))?;

    let timestamps: Vec<i64> = ts
        .iter()
        .map(|value| {
            value
                .as_i64()
                .ok_or_else(|| AppError::Upstream(format!("non-integer timestamp in `ts`: {}", value)))
        })
        .collect::<Result<_>>()?;

    let mut params: HashMap<String, Vec<Option<f64>>> = HashMap::new();
    if let Some(object) = body.as_object() {
        for (key, value) in object {
            if key == "ts" {
                continue;
            }
            if let Some(values) = value.as_array() {
                params.insert(key.clone(), values.iter().map(|v| v.as_f64()).collect());
            }
        }
    }

    Ok(RawSeries { timestamps, params })
}
