use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "salvo", version)]
#[command(about = "Write the logs of every pod in a Kubernetes namespace to local files")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Path to the kubeconfig file (defaults to ~/.kube/config)
    #[arg(long, global = true)]
    pub kubeconfig: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Retrieve logs for all pods in a namespace
    Logs(LogsArgs),
    /// Print the Kubernetes configuration file in use
    Config,
    /// Print the version of the application
    Version,
}

#[derive(Debug, Args)]
pub struct LogsArgs {
    /// The namespace to get logs from
    #[arg(short = 'n', long, default_value = "default")]
    pub namespace: String,

    /// The directory to write the logs to (defaults to ./logs/<namespace>)
    #[arg(short = 'd', long)]
    pub directory: Option<PathBuf>,

    /// Number of pods to fetch at once
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Abort on the first pod that fails instead of continuing with the rest
    #[arg(long)]
    pub fail_fast: bool,
}
