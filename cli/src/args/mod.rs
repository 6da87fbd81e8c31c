use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(
    name = "tasktree",
    version,
    about,
    long_about = "Fetch a full task-manager snapshot and export it as a nested JSON tree"
)]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub config: ConfigArgs,

    /// Log debug output to stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Path to profile configuration file
    #[arg(long, short, global = true, env = "TASKTREE_PROFILE")]
    pub profile_path: Option<String>,

    /// API token used for the sync request
    #[arg(long, global = true, env = "TODOIST_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Command {
    /// Fetches a snapshot and writes the normalized export
    Export(ExportArgs),
    /// Fetches a snapshot and saves it untouched
    Fetch(FetchArgs),
    /// Prints out current configuration
    Config,
    /// Prints a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args, PartialEq, Default)]
pub struct ExportArgs {
    /// Read the snapshot from a file instead of the sync endpoint
    #[arg(long, short, value_name = "FILE")]
    pub input: Option<String>,

    /// Directory the export file is written to
    #[arg(long, short, value_name = "DIR")]
    pub output_dir: Option<String>,

    /// Print the export to stdout instead of writing a file
    #[arg(long, default_value_t = false)]
    pub stdout: bool,

    /// Write single-line JSON
    #[arg(long, default_value_t = false)]
    pub compact: bool,

    /// Leave out sections that have no tasks
    #[arg(long, default_value_t = false)]
    pub drop_empty_sections: bool,

    /// Skip the summary report
    #[arg(long, short, default_value_t = false)]
    pub quiet: bool,
}

#[derive(Debug, Args, PartialEq)]
pub struct FetchArgs {
    /// File the raw snapshot is written to
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<String>,
}
