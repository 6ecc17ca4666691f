use std::fmt;
use std::path::Path;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::config::{LogsConfig, kubeconfig_path};
use crate::errors::AppResult;
use crate::kubernetes::{KubeCluster, PodSource, load_config};
use crate::output::write_log;
use crate::types::{OutputTarget, PodOutcome, PodRef, RunReport};

type Sink = dyn Fn(&str) + Send + Sync;

/// Progress callback handed to each stage. Silent unless a sink is set.
pub struct Progress {
    sink: Option<Box<Sink>>,
}

impl Progress {
    pub fn silent() -> Self {
        Self { sink: None }
    }

    pub fn new(verbose: bool, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        if verbose {
            Self {
                sink: Some(Box::new(sink)),
            }
        } else {
            Self::silent()
        }
    }

    pub fn stdout(verbose: bool) -> Self {
        Self::new(verbose, |line| println!("{line}"))
    }

    pub fn report(&self, args: fmt::Arguments<'_>) {
        if let Some(sink) = &self.sink {
            sink(&args.to_string());
        }
    }
}

/// Resolve the cluster config, connect, and collect logs for the namespace.
pub async fn run_logs(config: &LogsConfig, progress: &Progress) -> AppResult<RunReport> {
    progress.report(format_args!("Using namespace \"{}\"", config.namespace));

    let path = kubeconfig_path(config.kubeconfig.as_deref())?;
    progress.report(format_args!("Using kubeconfig: {}", path.display()));

    let kube_config = load_config(&path).await?;
    let cluster = KubeCluster::from_config(kube_config)?;

    collect_logs(&cluster, config, progress).await
}

/// List the namespace's pods, then stream and write each pod's log.
///
/// Listing failures abort the run. Pod failures are recorded in the report
/// and the remaining pods are still processed, unless `fail_fast` is set.
pub async fn collect_logs<S>(
    source: &S,
    config: &LogsConfig,
    progress: &Progress,
) -> AppResult<RunReport>
where
    S: PodSource + ?Sized,
{
    let directory = config.output_dir();
    progress.report(format_args!(
        "Getting Kubernetes pods for namespace {}",
        config.namespace
    ));

    let pods = source.list_pods(&config.namespace).await?;
    info!(
        "Found {} pods in namespace {}",
        pods.len(),
        config.namespace
    );

    let mut outcomes = Vec::with_capacity(pods.len());
    {
        let dir = directory.as_path();
        let mut results = stream::iter(pods)
            .map(move |pod| async move {
                let result = process_pod(source, &pod, dir, progress).await;
                PodOutcome { pod, result }
            })
            .buffered(config.concurrency.max(1));

        while let Some(PodOutcome { pod, result }) = results.next().await {
            if let Err(e) = &result {
                debug!(pod = %pod.name, kind = %e.kind(), "pod failed: {e}");
            }
            match result {
                Err(e) if config.fail_fast => return Err(e),
                result => outcomes.push(PodOutcome { pod, result }),
            }
        }
    }

    let report = RunReport {
        namespace: config.namespace.clone(),
        directory,
        outcomes,
    };
    debug!(
        "Wrote {} of {} pod logs to {}",
        report.written().count(),
        report.outcomes.len(),
        report.directory.display()
    );
    Ok(report)
}

async fn process_pod<S>(
    source: &S,
    pod: &PodRef,
    directory: &Path,
    progress: &Progress,
) -> AppResult<OutputTarget>
where
    S: PodSource + ?Sized,
{
    progress.report(format_args!("Pod name: {}", pod.name));
    let payload = source.stream_log(pod).await?;
    write_log(&payload, pod, directory, progress).await
}
