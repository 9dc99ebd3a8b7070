use std::process::ExitCode;

use clap::Parser;
use log::error;

use network_notifier::app;
use network_notifier::cli::Cli;
use network_notifier::config::Config;
use network_notifier::logging;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let conf = match Config::from_any() {
        Ok(conf) => conf,
        Err(e) => {
            eprintln!("Could not load config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    // Setup simplelog
    if let Err(e) = logging::setup(&conf.log) {
        eprintln!("Could not set up logging: {}", e);
        return ExitCode::FAILURE;
    }

    match app::launch(cli, conf) {
        Ok(code) => code,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
