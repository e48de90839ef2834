use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pokejournal::cli::{Cli, Commands, ConfigAction, OutputOptions};
use pokejournal::commands::{
    cmd_browse, cmd_config_get, cmd_config_set, cmd_config_show, cmd_ls, cmd_show, LsOptions,
};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Browse { at } => cmd_browse(at.as_deref()).await,

        Commands::Ls {
            types,
            generations,
            search,
            limit,
            json,
        } => {
            cmd_ls(
                LsOptions {
                    types,
                    generations,
                    search,
                    limit,
                },
                OutputOptions::new(json),
            )
            .await
        }

        Commands::Show { name, json } => cmd_show(&name, OutputOptions::new(json)).await,

        Commands::Config { action } => match action {
            ConfigAction::Show { json } => cmd_config_show(OutputOptions::new(json)),
            ConfigAction::Set { key, value, json } => {
                cmd_config_set(&key, &value, OutputOptions::new(json))
            }
            ConfigAction::Get { key, json } => cmd_config_get(&key, OutputOptions::new(json)),
        },
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
