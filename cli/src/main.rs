#![deny(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use crate::app_config::AppConfig;
use args::{CliArgs, Command, ConfigArgs};
use clap::{CommandFactory, Parser};
use commands::{
    completions::completions_cmd, config::config_cmd, export::export_cmd, fetch::fetch_cmd,
};
use dotenvy::dotenv;
use profile::{get_profile_path, Profile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app_config;
mod args;
mod commands;
mod errors;
mod profile;
mod report;
mod sink;
mod source;

fn main() {
    // Must run before parsing so clap sees TODOIST_API_TOKEN from .env
    dotenv().ok();

    let args = CliArgs::parse();
    setup_tracing(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: CliArgs) -> anyhow::Result<()> {
    let Some(command) = args.command else {
        CliArgs::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Export(export_args) => export_cmd(&load_config(args.config)?, export_args)?,
        Command::Fetch(fetch_args) => fetch_cmd(&load_config(args.config)?, fetch_args)?,
        Command::Config => config_cmd(load_config(args.config)?)?,
        Command::Completions { shell } => completions_cmd(shell)?,
    }

    Ok(())
}

fn load_config(args: ConfigArgs) -> anyhow::Result<AppConfig> {
    let profile_path = get_profile_path(&args.profile_path);
    let profile = Profile::from_path(&profile_path)?;

    Ok(AppConfig::from_args(args, &profile_path, profile.as_ref()))
}

fn setup_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "{crate_name}={default_level},tasktree_core={default_level}",
                    crate_name = env!("CARGO_CRATE_NAME")
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
