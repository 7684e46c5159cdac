use crate::aggregator::DayAggregator;
use crate::cache::ForecastCache;
use crate::config::Config;
use crate::demo;
use crate::error::Result;
use crate::fetcher::ForecastFetcher;
use crate::grouper::DayGrouper;
use crate::models::{SpotAnalysis, SpotForecast, SurfSpot};
use crate::scoring::{self, ScoreInputs};
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Orchestrates the pipeline per spot: fetch both series, group by day,
/// aggregate, score. Upstream failures are isolated per spot and answered
/// with demo data, so a full run always produces one analysis per spot.
pub struct SurfAnalyzer {
    config: Config,
    fetcher: ForecastFetcher,
    cache: ForecastCache,
}

impl SurfAnalyzer {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = ForecastFetcher::new(&config.source.api_url, &config.source.api_key)?;
        let cache = ForecastCache::new(Duration::from_secs(config.cache.ttl_minutes * 60));

        Ok(Self {
            config,
            fetcher,
            cache,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Analyze every configured spot for a date, optionally filtered by
    /// region. Spots are processed sequentially (two round trips each) with
    /// the configured politeness delay; per-spot failures never abort the run.
    pub async fn analyze_all(&mut self, date: NaiveDate, region: Option<&str>) -> Vec<SpotAnalysis> {
        let spots: Vec<SurfSpot> = self
            .config
            .spots
            .iter()
            .filter(|spot| region.map_or(true, |r| spot.region == r))
            .cloned()
            .collect();

        info!(
            "Analyzing {} spots for {} (region: {})",
            spots.len(),
            date,
            region.unwrap_or("all")
        );

        let delay = Duration::from_millis(self.config.source.request_delay_ms);
        let mut analyses = Vec::with_capacity(spots.len());

        for (i, spot) in spots.iter().enumerate() {
            analyses.push(self.analyze_spot(spot, date).await);

            if i + 1 < spots.len() && !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        analyses
    }

    /// Analyze a spot named by id. Unknown ids fail this request only.
    pub async fn analyze_spot_by_id(&mut self, spot_id: u32, date: NaiveDate) -> Result<SpotAnalysis> {
        let spot = self.config.spot(spot_id)?.clone();
        Ok(self.analyze_spot(&spot, date).await)
    }

    /// Analyze one spot for one date. Falls back to demo data when the
    /// forecast cannot be fetched or the date has no forecast day; real and
    /// demo data are never mixed within one analysis.
    pub async fn analyze_spot(&mut self, spot: &SurfSpot, date: NaiveDate) -> SpotAnalysis {
        match self.spot_forecast(spot).await {
            Ok(forecast) => match forecast.days.get(&date) {
                Some(summary) => {
                    let inputs = ScoreInputs::from_summary(summary);
                    let score = scoring::comparative_score(&inputs);

                    SpotAnalysis {
                        spot: spot.clone(),
                        date,
                        day: summary.clone(),
                        score,
                        verdict: scoring::verdict(score.total),
                    }
                }
                None => {
                    warn!(
                        "No forecast day {} for spot {} ({}), using demo data",
                        date, spot.id, spot.name
                    );
                    self.fallback_analysis(spot, date)
                }
            },
            Err(e) => {
                warn!(
                    "Forecast for spot {} ({}) failed: {}. Using demo data",
                    spot.id, spot.name, e
                );
                self.fallback_analysis(spot, date)
            }
        }
    }

    /// Multi-day forecast for one spot: cached within the TTL, otherwise two
    /// upstream requests followed by grouping and per-day aggregation.
    async fn spot_forecast(&mut self, spot: &SurfSpot) -> Result<SpotForecast> {
        if let Some(cached) = self.cache.get(spot.id) {
            debug!("Cache hit for spot {} ({})", spot.id, spot.name);
            return Ok(cached.clone());
        }

        let wave = self.fetcher.fetch_wave_series(spot.lat, spot.lng).await?;
        let weather = self.fetcher.fetch_weather_series(spot.lat, spot.lng).await?;

        let buckets = DayGrouper::group(&wave, &weather);
        let days: BTreeMap<_, _> = buckets
            .iter()
            .map(|(date, bucket)| (*date, DayAggregator::summarize(bucket, spot)))
            .collect();

        info!(
            "Built forecast for spot {} ({}): {} days from {} wave samples",
            spot.id,
            spot.name,
            days.len(),
            wave.timestamps.len()
        );

        let forecast = SpotForecast {
            spot_id: spot.id,
            spot_name: spot.name.clone(),
            generated_at: Utc::now(),
            days,
        };

        self.cache.insert(spot.id, forecast.clone());
        Ok(forecast)
    }

    fn fallback_analysis(&self, spot: &SurfSpot, date: NaiveDate) -> SpotAnalysis {
        let score = scoring::comparative_score(&demo::demo_score_inputs(spot.id));

        SpotAnalysis {
            spot: spot.clone(),
            date,
            day: demo::demo_summary(spot),
            score,
            verdict: scoring::verdict(score.total),
        }
    }
}
