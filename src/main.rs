use clap::Parser;
use tracing::debug;

use salvo::cli::{Cli, Command};
use salvo::config::kubeconfig_path;
use salvo::{LogsConfig, Progress, VERSION};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Non-verbose runs stay quiet unless RUST_LOG says otherwise
    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Logs(args) => {
            let config = LogsConfig::from_args(args, cli.verbose, cli.kubeconfig);
            run_logs_command(config).await
        }
        Command::Config => {
            println!("Getting Kubernetes config");
            let path = kubeconfig_path(cli.kubeconfig.as_deref())?;
            println!("Using Kubernetes config file: {}", path.display());
            Ok(())
        }
        Command::Version => {
            println!("{VERSION}");
            Ok(())
        }
    }
}

async fn run_logs_command(config: LogsConfig) -> anyhow::Result<()> {
    let progress = Progress::stdout(config.verbose);
    debug!(?config, "Starting log retrieval");

    let report = salvo::run_logs(&config, &progress).await?;

    for (pod, e) in report.failures() {
        debug!(pod = %pod.name, kind = %e.kind(), "log retrieval failed");
        eprintln!("Error: {e}");
    }

    if !report.is_success() {
        anyhow::bail!(
            "{} of {} pods in namespace \"{}\" failed",
            report.failed_count(),
            report.outcomes.len(),
            report.namespace
        );
    }
    Ok(())
}
