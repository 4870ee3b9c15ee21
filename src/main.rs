use anyhow::Result;
use clap::Parser;
use dashboard_data::{cli::Cli, logging::init_logging, run};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if !run(cli)? {
        std::process::exit(1);
    }
    Ok(())
}
