use super::load_configuration;
use crate::cli::ScoreArgs;
use crate::scoring::{green_deficit, ExposureScorer, ReadingNormalizer};
use anyhow::{anyhow, Result};
use serde::Serialize;

/// Normalized inputs and the resulting priority.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreOutcome {
    pub heat_norm: f64,
    pub ndvi_norm: f64,
    pub green_deficit_norm: f64,
    pub aqi_norm: Option<f64>,
    pub priority_score: f64,
}

pub fn handle_score(args: ScoreArgs) -> Result<()> {
    let config = load_configuration(args.config.as_deref())?;
    let normalizer = ReadingNormalizer::new(config.normalization());
    let scorer = ExposureScorer::new(config.scoring());
    let outcome = compute_score(&args, &normalizer, &scorer)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("heat_norm:          {:.4}", outcome.heat_norm);
        println!("green_deficit_norm: {:.4}", outcome.green_deficit_norm);
        match outcome.aqi_norm {
            Some(aqi) => println!("aqi_norm:           {:.4}", aqi),
            None => println!("aqi_norm:           - (heat and vegetation only)"),
        }
        println!("priority_score:     {:.4}", outcome.priority_score);
    }
    Ok(())
}

pub fn compute_score(
    args: &ScoreArgs,
    normalizer: &ReadingNormalizer,
    scorer: &ExposureScorer,
) -> Result<ScoreOutcome> {
    let (heat_norm, ndvi_norm) = if args.raw {
        (
            normalizer
                .heat(args.heat)
                .ok_or_else(|| anyhow!("--heat must be a finite temperature"))?,
            normalizer
                .ndvi(args.ndvi)
                .ok_or_else(|| anyhow!("--ndvi must be a finite NDVI reading"))?,
        )
    } else {
        (unit("--heat", args.heat)?, unit("--ndvi", args.ndvi)?)
    };

    let aqi_norm = match (args.aqi_raw, args.aqi_norm) {
        (Some(raw), _) => Some(
            normalizer
                .aqi(raw)
                .ok_or_else(|| anyhow!("--aqi-raw must be a finite AQI reading"))?,
        ),
        (None, Some(norm)) => Some(unit("--aqi-norm", norm)?),
        (None, None) => None,
    };

    let deficit = green_deficit(ndvi_norm);
    Ok(ScoreOutcome {
        heat_norm,
        ndvi_norm,
        green_deficit_norm: deficit,
        aqi_norm,
        priority_score: scorer.score(heat_norm, deficit, aqi_norm),
    })
}

fn unit(flag: &str, value: f64) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(anyhow!("{} must be a normalized value in [0, 1], got {}", flag, value))
    }
}
