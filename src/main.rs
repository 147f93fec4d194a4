use clap::Parser;
use element_picker::cli::commands::{ReplayArgs, cmd_probe, cmd_replay, cmd_similar};
use element_picker::cli::config::{Cli, Commands, load_config};
use element_picker::error::PickerError;
use element_picker::logging;

fn main() -> Result<(), PickerError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // CLI > config file > defaults
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Replay {
            page,
            script,
            format,
            trace,
            mode,
        } => {
            let args = ReplayArgs {
                page: &page,
                script: &script,
                format: format.as_deref(),
                trace: trace.as_deref(),
                mode,
            };
            let all_passed = cmd_replay(&args, &config)?;
            if !all_passed {
                std::process::exit(1);
            }
        }
        Commands::Probe { page, x, y } => cmd_probe(&page, x, y, &config)?,
        Commands::Similar { page, x, y } => cmd_similar(&page, x, y, &config)?,
    }

    Ok(())
}
