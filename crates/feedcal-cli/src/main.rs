//! feedcal CLI entry point.

use std::process::ExitCode;

use clap::Parser;
use feedcal_core::{TracingConfig, TracingOutputFormat, init_tracing};

use feedcal_cli::cli::{Cli, Command, ConfigAction};
use feedcal_cli::commands;
use feedcal_cli::config;
use feedcal_cli::error::ClientResult;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(tracing_config(&cli)) {
        eprintln!("error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn tracing_config(cli: &Cli) -> TracingConfig {
    let config = match (&cli.command, cli.debug) {
        (_, true) => TracingConfig::cli_debug(),
        (Command::Serve, false) => TracingConfig::service(),
        _ => TracingConfig::default(),
    };
    if cli.json_logs {
        config.with_format(TracingOutputFormat::Json)
    } else {
        config
    }
}

async fn run(cli: Cli) -> ClientResult<()> {
    let explicit = cli.config.as_deref();
    if let Command::Config {
        action: ConfigAction::Path,
    } = cli.command
    {
        return commands::config::path(explicit);
    }
    let config = config::load(explicit)?;

    match cli.command {
        Command::Run { stdout } => commands::run::run(&config, stdout).await.map(|_| ()),
        Command::Serve => commands::serve::run(&config).await,
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, explicit),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(explicit),
        },
    }
}
