use super::load_configuration;
use crate::cli::{
    configure_thread_pool, AggregateArgs, ModeArg, OutputFormat as OutputFormatArg, PresetArg,
};
use crate::config::{merge_preset_with_config, AggregationConfig, CorridormapConfig, PresetLevel};
use crate::io::{create_writer, load_elements, OutputFormat};
use crate::observability::{set_current_input, set_phase, AggregationPhase};
use crate::pipeline::{AggregationParams, AggregationSession, ThresholdPolicy};
use crate::scoring::{fill_missing_priorities, ExposureScorer};
use crate::spatial::ConnectivityMode;
use anyhow::{Context, Result};
use std::io::{BufWriter, Write};

pub fn handle_aggregate(args: AggregateArgs) -> Result<()> {
    configure_thread_pool(args.jobs);

    let mut config = load_configuration(args.config.as_deref())?;
    if let Some(preset) = args.preset {
        config = merge_preset_with_config(preset_level(preset), config);
    }
    let params = build_params(&args, &config.aggregation());
    params.validate()?;

    let _input = set_current_input(&args.input);
    let mut elements = {
        let _phase = set_phase(AggregationPhase::InputLoading);
        load_elements(&args.input)?
    };
    if args.score_missing {
        let scorer = ExposureScorer::new(config.scoring());
        let filled = fill_missing_priorities(&mut elements, &scorer);
        log::info!("Scored {} elements without a priority", filled);
    }

    let mut session = AggregationSession::with_classification(elements, config.classification())?;
    let result = session.aggregate(&params)?;

    let _phase = set_phase(AggregationPhase::OutputGeneration);
    let format = resolve_format(args.format, &config);
    let color_disabled = config.output.as_ref().and_then(|o| o.use_color) == Some(false);
    if args.no_color || args.output.is_some() || color_disabled {
        colored::control::set_override(false);
    }

    match &args.output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Cannot create output file {}", path.display()))?;
            let mut buffered = BufWriter::new(file);
            create_writer(format, &mut buffered).write_results(&result, session.elements())?;
            buffered.flush()?;
            log::info!("Wrote {} corridors to {}", result.corridors.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            create_writer(format, &mut lock).write_results(&result, session.elements())?;
        }
    }
    Ok(())
}

/// Aggregation parameters: CLI flags over config over built-in defaults.
pub fn build_params(args: &AggregateArgs, defaults: &AggregationConfig) -> AggregationParams {
    let config = AggregationConfig {
        priority_threshold: args.threshold.unwrap_or(defaults.priority_threshold),
        connectivity_tolerance_m: args.tolerance.unwrap_or(defaults.connectivity_tolerance_m),
        min_length_m: args.min_length.unwrap_or(defaults.min_length_m),
        d_max_m: args.d_max.unwrap_or(defaults.d_max_m),
        n_min: args.n_min.unwrap_or(defaults.n_min),
    };
    let params = AggregationParams::from_config(&config, connectivity_mode(args.mode));
    match args.percentile {
        Some(p) => params.with_threshold(ThresholdPolicy::Percentile(p)),
        None => params,
    }
}

fn connectivity_mode(mode: ModeArg) -> ConnectivityMode {
    match mode {
        ModeArg::Segment => ConnectivityMode::Segment,
        ModeArg::Point => ConnectivityMode::Point,
    }
}

fn preset_level(preset: PresetArg) -> PresetLevel {
    match preset {
        PresetArg::Strict => PresetLevel::Strict,
        PresetArg::Balanced => PresetLevel::Balanced,
        PresetArg::Lenient => PresetLevel::Lenient,
    }
}

fn resolve_format(flag: Option<OutputFormatArg>, config: &CorridormapConfig) -> OutputFormat {
    match flag {
        Some(OutputFormatArg::Json) => OutputFormat::Json,
        Some(OutputFormatArg::Terminal) => OutputFormat::Terminal,
        None => match config.default_format() {
            Some("json") => OutputFormat::Json,
            _ => OutputFormat::Terminal,
        },
    }
}
