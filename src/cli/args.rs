use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Road segments joined by touching geometry or nearby endpoints
    Segment,
    /// Sampled points joined by distance
    Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    /// Only the most exposed elements, long corridors
    Strict,
    /// Default thresholds and floors
    Balanced,
    /// Lower threshold, wider gaps, shorter corridors
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

#[derive(Parser, Debug)]
#[command(name = "corridormap")]
#[command(about = "Aggregate high-exposure road elements into green corridors", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Aggregate an element file into corridors
    Aggregate(AggregateArgs),

    /// Compute a priority score from exposure readings
    Score(ScoreArgs),

    /// Write a default .corridormap.toml in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct AggregateArgs {
    /// JSON file with the element collection
    pub input: PathBuf,

    /// Connectivity mode
    #[arg(short, long, value_enum, default_value = "segment")]
    pub mode: ModeArg,

    /// Minimum priority score for eligibility
    #[arg(long, conflicts_with = "percentile")]
    pub threshold: Option<f64>,

    /// Eligibility threshold as a percentile (0-100) of present priorities
    #[arg(long)]
    pub percentile: Option<f64>,

    /// Segment mode: endpoint gap still counted as connected (meters)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Point mode: largest gap between connected points (meters)
    #[arg(long = "d-max")]
    pub d_max: Option<f64>,

    /// Segment mode: shortest corridor kept (meters)
    #[arg(long = "min-length")]
    pub min_length: Option<f64>,

    /// Point mode: fewest points per corridor
    #[arg(long = "n-min")]
    pub n_min: Option<usize>,

    /// Aggregation preset used where the config file is silent
    #[arg(long, value_enum)]
    pub preset: Option<PresetArg>,

    /// Explicit config file instead of searching for .corridormap.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Score elements lacking a priority from their exposure attributes
    #[arg(long)]
    pub score_missing: bool,

    /// Output format (defaults to the config file's choice, then terminal)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable colored terminal output
    #[arg(long)]
    pub no_color: bool,

    /// Worker threads (0 = all cores)
    #[arg(short, long, default_value = "0")]
    pub jobs: usize,
}

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    /// Heat: normalized [0, 1], or land surface temperature in °C with --raw
    #[arg(long)]
    pub heat: f64,

    /// Vegetation: normalized NDVI [0, 1], or raw NDVI with --raw
    #[arg(long)]
    pub ndvi: f64,

    /// Raw AQI reading
    #[arg(long = "aqi-raw", conflicts_with = "aqi_norm")]
    pub aqi_raw: Option<f64>,

    /// Already normalized AQI [0, 1]
    #[arg(long = "aqi-norm")]
    pub aqi_norm: Option<f64>,

    /// Treat --heat and --ndvi as raw readings
    #[arg(long)]
    pub raw: bool,

    /// Explicit config file instead of searching for .corridormap.toml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_aggregate_defaults() {
        let cli = Cli::try_parse_from(["corridormap", "aggregate", "roads.json"]).unwrap();
        let Commands::Aggregate(args) = cli.command else {
            panic!("expected aggregate");
        };
        assert_eq!(args.mode, ModeArg::Segment);
        assert_eq!(args.threshold, None);
        assert_eq!(args.jobs, 0);
    }

    #[test]
    fn test_threshold_conflicts_with_percentile() {
        let parsed = Cli::try_parse_from([
            "corridormap",
            "aggregate",
            "roads.json",
            "--threshold",
            "0.7",
            "--percentile",
            "90",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["corridormap", "-vv", "init"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
