use anyhow::Result;
use corridormap::cli::{init_logging, parse_args, Commands};
use corridormap::commands;
use corridormap::observability::install_panic_hook;

fn main() -> Result<()> {
    install_panic_hook();

    let cli = parse_args();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Aggregate(args) => commands::handle_aggregate(args),
        Commands::Score(args) => commands::handle_score(args),
        Commands::Init { force } => commands::init_config(force),
    }
}
