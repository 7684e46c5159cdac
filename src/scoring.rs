//! The two scoring formulas.
//!
//! The daily tier score grades one day at one spot from its summary
//! statistics; the comparative multi-factor score ranks spots against each
//! other. They are deliberately independent formulas and are never merged.

use crate::models::{DaySummary, Recommendation, ScoreBreakdown, SpotAnalysis, Verdict};

/// Share of the average wave height attributed to swell when building the
/// comparative snapshot from a real day summary.
const SWELL_SHARE_OF_AVG: f64 = 0.6;

/// Daily tier score: three independently bucketed components, each carrying
/// a condition tag.
pub fn daily_recommendation(
    max_wave_height: f64,
    avg_wind_speed: f64,
    avg_temperature: f64,
) -> Recommendation {
    let mut score = 0;
    let mut conditions = Vec::new();

    if max_wave_height >= 1.5 {
        score += 40;
        conditions.push("大浪");
    } else if max_wave_height >= 1.0 {
        score += 35;
        conditions.push("中浪");
    } else if max_wave_height >= 0.6 {
        score += 25;
        conditions.push("小浪");
    } else {
        score += 10;
        conditions.push("微浪");
    }

    if avg_wind_speed <= 10.0 {
        score += 30;
        conditions.push("轻风");
    } else if avg_wind_speed <= 15.0 {
        score += 20;
        conditions.push("中风");
    } else {
        score += 5;
        conditions.push("强风");
    }

    if avg_temperature >= 20.0 {
        score += 20;
        conditions.push("适宜水温");
    } else if avg_temperature >= 15.0 {
        score += 15;
        conditions.push("偏凉水温");
    } else {
        score += 5;
        conditions.push("低水温");
    }

    let suitability = if score >= 80 {
        "优秀"
    } else if score >= 60 {
        "良好"
    } else if score >= 40 {
        "一般"
    } else {
        "较差"
    };

    Recommendation {
        score,
        suitability: suitability.to_string(),
        conditions: conditions.iter().map(|c| c.to_string()).collect(),
        summary: format!("{}的冲浪条件 ({})", suitability, conditions.join(", ")),
    }
}

/// The analysis snapshot the comparative scorer works from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    pub swell_height: f64,
    pub total_wave_height: f64,
    pub water_temperature: f64,
}

impl ScoreInputs {
    /// Snapshot from a real day summary: swell is taken as a fixed share of
    /// the average wave height, the total as the daily maximum.
    pub fn from_summary(summary: &DaySummary) -> Self {
        Self {
            swell_height: summary.statistics.avg_wave_height * SWELL_SHARE_OF_AVG,
            total_wave_height: summary.statistics.max_wave_height,
            water_temperature: summary.statistics.avg_temperature,
        }
    }
}

fn swell_tier(height: f64) -> u32 {
    if height >= 1.0 {
        10
    } else if height >= 0.6 {
        7
    } else if height >= 0.3 {
        5
    } else if height > 0.0 {
        3
    } else {
        0
    }
}

fn wind_wave_tier(height: f64) -> u32 {
    if height < 0.3 {
        10
    } else if height <= 0.5 {
        7
    } else if height <= 0.8 {
        5
    } else if height <= 1.2 {
        3
    } else {
        0
    }
}

fn wave_delta_tier(delta: f64) -> u32 {
    if delta <= 0.1 {
        10
    } else if delta <= 0.3 {
        7
    } else if delta <= 0.7 {
        5
    } else {
        3
    }
}

fn temperature_tier(celsius: f64) -> u32 {
    if (22.0..=28.0).contains(&celsius) {
        10
    } else if (18.0..=21.0).contains(&celsius) || (29.0..=32.0).contains(&celsius) {
        7
    } else if (14.0..=17.0).contains(&celsius) {
        5
    } else if (10.0..=13.0).contains(&celsius) {
        3
    } else {
        0
    }
}

const SWELL_WEIGHT: f64 = 5.0;
const WIND_WAVE_WEIGHT: f64 = 3.0;
const TOTAL_WAVE_WEIGHT: f64 = 2.0;
const TEMPERATURE_WEIGHT: f64 = 1.0;

/// Comparative multi-factor score: four tiered sub-scores, weighted 5/3/2/1.
pub fn comparative_score(inputs: &ScoreInputs) -> ScoreBreakdown {
    let swell = swell_tier(inputs.swell_height);
    let wind_wave_height = inputs.total_wave_height - inputs.swell_height;
    let wind_wave = wind_wave_tier(wind_wave_height);
    let total_wave = wave_delta_tier(inputs.total_wave_height - inputs.swell_height);
    let temperature = temperature_tier(inputs.water_temperature);

    let total = f64::from(swell) * SWELL_WEIGHT
        + f64::from(wind_wave) * WIND_WAVE_WEIGHT
        + f64::from(total_wave) * TOTAL_WAVE_WEIGHT
        + f64::from(temperature) * TEMPERATURE_WEIGHT;

    ScoreBreakdown {
        swell,
        wind_wave,
        total_wave,
        temperature,
        total,
    }
}

/// Ranking label for a comparative total.
pub fn verdict(total: f64) -> Verdict {
    if total > 75.0 {
        Verdict {
            level: "必去",
            reason: "涌浪条件极佳，且海面干净。不要错过。",
        }
    } else if total >= 60.0 {
        Verdict {
            level: "优质选择",
            reason: "良好的冲浪日。涌浪不错，风浪干扰较小。推荐选择。",
        }
    } else if total >= 45.0 {
        Verdict {
            level: "一般/可冲",
            reason: "可冲，但有明显缺陷。适合解瘾或练习。",
        }
    } else if total >= 30.0 {
        Verdict {
            level: "勉强/不推荐",
            reason: "条件较差。除非没得选，否则不建议前往。",
        }
    } else {
        Verdict {
            level: "放弃",
            reason: "回家休息。",
        }
    }
}

/// Sort analyses by comparative total, descending. The sort is stable, so
/// spots with equal totals keep their input order.
pub fn rank(mut analyses: Vec<SpotAnalysis>) -> Vec<SpotAnalysis> {
    analyses.sort_by(|a, b| {
        b.score
            .total
            .partial_cmp(&a.score.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    analyses
}

/// Top `n` of an already-ranked list.
pub fn top_n(ranked: &[SpotAnalysis], n: usize) -> Vec<SpotAnalysis> {
    ranked.iter().take(n).cloned().collect()
}
