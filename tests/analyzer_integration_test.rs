use chrono::NaiveDate;
use serde_json::json;
use surfcast::analyzer::SurfAnalyzer;
use surfcast::config::Config;
use surfcast::models::DataQuality;
use surfcast::scoring;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

// 2024-06-01T00:00:00Z in epoch milliseconds, plus 3-hour steps.
const T0: i64 = 1_717_200_000_000;
const HOUR3: i64 = 3 * 3600 * 1000;

fn test_config(api_url: &str) -> Config {
    let yaml = format!(
        r#"
source:
  api_url: {api_url}
  api_key: test-key
  request_delay_ms: 0
spots:
  - id: 1
    name: 东沙冲浪公园
    region: zhoushan
    lat: 30.0444
    lng: 122.1067
    description: 舟山群岛最受欢迎的冲浪点
    calibration: 0.75
  - id: 3
    name: 石老人海水浴场
    region: qingdao
    lat: 36.1000
    lng: 120.4667
    description: 青岛著名冲浪胜地
    calibration: 0.62
"#
    );
    serde_yaml::from_str(&yaml).expect("test config should parse")
}

fn forecast_date() -> NaiveDate {
    "2024-06-01".parse().unwrap()
}

async fn mount_forecast_mocks(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "gfsWave" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ts": [T0, T0 + HOUR3, T0 + 2 * HOUR3],
            "waves_height-surface": [0.5, 1.0, 1.5],
            "swell1_height-surface": [0.3, 0.6, 0.9],
            "swell2_height-surface": [0.1, 0.1, 0.1],
            "wwaves_height-surface": [0.2, 0.4, 0.6]
        })))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "gfs" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ts": [T0, T0 + HOUR3, T0 + 2 * HOUR3],
            "wind_u-surface": [3.0, 3.0, 3.0],
            "wind_v-surface": [4.0, 4.0, 4.0],
            "temp-surface": [298.15, 298.15, 298.15]
        })))
        .mount(mock_server)
        .await;
}

/// Full pipeline against a mocked API: fetch, group, calibrate, aggregate,
/// score. Numbers follow the worked example for calibration constant 0.75.
#[tokio::test]
async fn test_end_to_end_real_forecast() {
    let mock_server = MockServer::start().await;
    mount_forecast_mocks(&mock_server).await;

    let mut analyzer = SurfAnalyzer::new(test_config(&mock_server.uri())).unwrap();
    let analysis = analyzer
        .analyze_spot_by_id(1, forecast_date())
        .await
        .unwrap();

    assert_eq!(analysis.day.data_quality, DataQuality::Real);

    // Calibrated waves: [0.1134, 0.2268, 0.3402]
    let stats = &analysis.day.statistics;
    assert_eq!(stats.max_wave_height, 0.34);
    assert_eq!(stats.avg_wave_height, 0.23);
    assert_eq!(stats.min_wave_height, 0.11);
    assert_eq!(stats.max_wind_speed, 9.7);
    assert_eq!(stats.avg_wind_speed, 9.7);
    assert_eq!(stats.avg_temperature, 25.0);

    // Daily tier score: 微浪 10 + 轻风 30 + 适宜水温 20
    assert_eq!(analysis.day.recommendation.score, 60);
    assert_eq!(analysis.day.recommendation.suitability, "良好");

    // Comparative: swell 0.138 (3x5) + wind wave 0.202 (10x3) + delta (7x2)
    // + temp 25 (10x1) = 69
    assert_eq!(analysis.score.total, 69.0);
    assert_eq!(analysis.verdict.level, "优质选择");

    // Hourly detail carries the converted weather samples.
    let hour = &analysis.day.hourly_data[0];
    assert_eq!(hour.time, "00:00");
    assert_eq!(hour.wind_speed, 9.7);
    assert_eq!(hour.wind_direction, 233);
    assert_eq!(hour.temperature, 25.0);
}

/// A failing upstream never fails the run; the spot gets tagged demo data.
#[tokio::test]
async fn test_upstream_failure_substitutes_demo_data() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let mut analyzer = SurfAnalyzer::new(test_config(&mock_server.uri())).unwrap();
    let analysis = analyzer
        .analyze_spot_by_id(1, forecast_date())
        .await
        .unwrap();

    assert_eq!(analysis.day.data_quality, DataQuality::Fallback);
    assert_eq!(analysis.day.hourly_data.len(), 24);

    // Spot 1 demo baseline: swell 0.56 (5x5) + wind wave 0.24 (10x3) +
    // delta (7x2) + temp 24 (10x1) = 79
    assert_eq!(analysis.score.total, 79.0);
    assert_eq!(analysis.verdict.level, "必去");
}

/// A date outside the forecast window also falls back to demo data.
#[tokio::test]
async fn test_missing_forecast_day_substitutes_demo_data() {
    let mock_server = MockServer::start().await;
    mount_forecast_mocks(&mock_server).await;

    let far_future: NaiveDate = "2030-01-01".parse().unwrap();

    let mut analyzer = SurfAnalyzer::new(test_config(&mock_server.uri())).unwrap();
    let analysis = analyzer.analyze_spot_by_id(1, far_future).await.unwrap();

    assert_eq!(analysis.day.data_quality, DataQuality::Fallback);
}

/// The second analysis of a spot within the TTL must not hit the network.
#[tokio::test]
async fn test_forecast_is_cached_between_analyses() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "gfsWave" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ts": [T0],
            "waves_height-surface": [1.0]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "model": "gfs" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ts": [T0],
            "wind_u-surface": [3.0],
            "wind_v-surface": [4.0],
            "temp-surface": [298.15]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut analyzer = SurfAnalyzer::new(test_config(&mock_server.uri())).unwrap();

    let first = analyzer.analyze_spot_by_id(1, forecast_date()).await.unwrap();
    let second = analyzer.analyze_spot_by_id(1, forecast_date()).await.unwrap();

    assert_eq!(first.day.statistics, second.day.statistics);
    // Mock expectations (one wave + one weather request) verify on drop.
}

/// analyze_all processes every spot, honors the region filter, and the
/// ranked output is ordered by comparative total.
#[tokio::test]
async fn test_analyze_all_with_region_filter_and_ranking() {
    let mock_server = MockServer::start().await;
    mount_forecast_mocks(&mock_server).await;

    let mut analyzer = SurfAnalyzer::new(test_config(&mock_server.uri())).unwrap();

    let all = analyzer.analyze_all(forecast_date(), None).await;
    assert_eq!(all.len(), 2);

    let qingdao_only = analyzer.analyze_all(forecast_date(), Some("qingdao")).await;
    assert_eq!(qingdao_only.len(), 1);
    assert_eq!(qingdao_only[0].spot.id, 3);

    let ranked = scoring::rank(all);
    for pair in ranked.windows(2) {
        assert!(pair[0].score.total >= pair[1].score.total);
    }

    let top = scoring::top_n(&ranked, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].score.total, ranked[0].score.total);
}
